use crate::board::Board;
use crate::engine::legal::is_legal;
use crate::state::GameState;
use crate::types::{idx_to_rc, Dir, Tile, EMPTY, MAX_TILE};

/// Per-value ledger of tiles still obtainable by a board: the configured
/// supply minus every tile already locked into some grid. Tiles on the table
/// and in the draw pile are both still obtainable and stay counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingCounts {
    counts: [u8; MAX_TILE as usize + 1],
}

impl RemainingCounts {
    /// Derive the ledger from the supply invariant: for each value,
    /// `sets_per_player * players` copies exist across grids, table and pile.
    pub fn for_state(state: &GameState) -> Self {
        let supply = state.rules.supply_per_value(state.boards.len());
        let mut counts = [supply; MAX_TILE as usize + 1];
        counts[EMPTY as usize] = 0;
        for board in &state.boards {
            for v in board.tiles() {
                if v <= MAX_TILE {
                    let slot = &mut counts[v as usize];
                    *slot = slot.saturating_sub(1);
                }
            }
        }
        Self { counts }
    }

    #[inline]
    pub fn count(&self, v: Tile) -> u8 {
        if v == EMPTY || v > MAX_TILE {
            0
        } else {
            self.counts[v as usize]
        }
    }

    /// Consume one copy of `v`, e.g. the tile currently held in hand.
    #[inline]
    pub fn take(&mut self, v: Tile) {
        if v != EMPTY && v <= MAX_TILE {
            self.counts[v as usize] = self.counts[v as usize].saturating_sub(1);
        }
    }

    /// Return one copy of `v` to the obtainable pool, e.g. a tile a swap
    /// would push back onto the table.
    #[inline]
    pub fn give_back(&mut self, v: Tile) {
        if v != EMPTY && v <= MAX_TILE {
            self.counts[v as usize] = self.counts[v as usize].saturating_add(1);
        }
    }

    #[inline]
    pub fn any_at_least(&self, min: Tile) -> bool {
        (min..=MAX_TILE).any(|v| self.counts[v as usize] > 0)
    }

    /// Copies with value in `min..=max`.
    #[inline]
    pub fn in_range(&self, min: Tile, max: Tile) -> u32 {
        if min > max {
            return 0;
        }
        (min.max(1)..=max.min(MAX_TILE))
            .map(|v| u32::from(self.counts[v as usize]))
            .sum()
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }
}

/// Whether a legal placement of `tile` at `cell` can still be completed.
///
/// Walking outward (down and right) from the cell, every empty cell up to the
/// first placed tile or the edge must be coverable by some remaining tile of
/// strictly increasing magnitude: the running minimum starts at `tile` and
/// grows by one per empty cell passed. A placed tile ending the walk must
/// itself exceed the running minimum, otherwise the path is already broken.
/// Inward paths need no supply check; the nearest-neighbor legality bound is
/// all that applies there.
///
/// `remaining` must already exclude the in-hand tile being placed.
/// Legality is a precondition and is re-checked: an illegal placement is
/// never feasible.
pub fn is_feasible(board: &Board, cell: u8, tile: Tile, remaining: &RemainingCounts) -> bool {
    if !is_legal(board, tile, cell) {
        return false;
    }
    Dir::outward()
        .into_iter()
        .all(|dir| outward_path_fillable(board, cell, tile, remaining, dir))
}

fn outward_path_fillable(
    board: &Board,
    cell: u8,
    tile: Tile,
    remaining: &RemainingCounts,
    dir: Dir,
) -> bool {
    let (mut r, mut c) = idx_to_rc(cell);
    let mut required = tile;
    while let Some((nr, nc)) = dir.step(r, c) {
        r = nr;
        c = nc;
        let v = board.get_rc(r, c);
        if v == EMPTY {
            if required == MAX_TILE {
                return false;
            }
            required += 1;
            if !remaining.any_at_least(required) {
                return false;
            }
        } else {
            return v > required;
        }
    }
    true
}
