use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::board::Board;
use crate::rng::rng_for_game;
use crate::rules::{Heuristics, Rules};
use crate::state::{DrawPile, GameState};
use crate::types::{Tile, CELLS, EMPTY, MAX_TILE};

pub const FORMAT_VERSION: u32 = 1;

/// One board as persisted: the grid row-by-row with `0` as the empty-cell
/// sentinel, plus the computer-player flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub grid: [Tile; CELLS as usize],
    pub is_ai: bool,
}

/// Persisted game state: current player, table contents and every grid.
/// The draw pile is deliberately absent; it is rebuilt from the supply
/// invariant on load and reshuffled with an explicit seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub current: usize,
    pub table: Vec<Tile>,
    pub boards: Vec<BoardSnapshot>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let boards = state
            .boards
            .iter()
            .map(|b| {
                let mut grid = [EMPTY; CELLS as usize];
                for (slot, v) in grid.iter_mut().zip(b.cells()) {
                    *slot = v;
                }
                BoardSnapshot {
                    grid,
                    is_ai: b.is_ai,
                }
            })
            .collect();
        Self {
            version: FORMAT_VERSION,
            current: state.current,
            table: state.table.clone(),
            boards,
        }
    }
}

/// Save a snapshot of `state` as pretty-printed JSON.
pub fn save_snapshot<P: AsRef<Path>>(path: P, state: &GameState) -> Result<(), String> {
    let snap = Snapshot::capture(state);
    let text = serde_json::to_string_pretty(&snap)
        .map_err(|e| format!("snapshot serialize error: {e}"))?;
    fs::write(path.as_ref(), text).map_err(|e| format!("write error: {e}"))?;
    Ok(())
}

/// Load a snapshot written by [`save_snapshot`].
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, String> {
    let text = fs::read_to_string(path.as_ref()).map_err(|e| format!("read error: {e}"))?;
    let snap: Snapshot =
        serde_json::from_str(&text).map_err(|e| format!("snapshot parse error: {e}"))?;
    if snap.version != FORMAT_VERSION {
        return Err(format!(
            "snapshot version {} unsupported (expected {FORMAT_VERSION})",
            snap.version
        ));
    }
    Ok(snap)
}

/// Reconstruct a playable state from a snapshot.
///
/// The draw pile is derived from the supply invariant: every copy of each
/// value not visible on a grid or the table must still be in the pile. The
/// rebuilt pile is shuffled with the explicit `seed`, so a reconstructed
/// state is indistinguishable from a live one as far as the engine is
/// concerned.
pub fn restore_state(
    snap: &Snapshot,
    rules: Rules,
    heuristics: Heuristics,
    seed: u64,
) -> Result<GameState, String> {
    let players = snap.boards.len();
    if players == 0 || players > 4 {
        return Err(format!("snapshot has {players} boards (expected 1..=4)"));
    }
    if snap.current >= players {
        return Err(format!(
            "snapshot current player {} out of range (have {players} boards)",
            snap.current
        ));
    }

    let supply = rules.supply_per_value(players);
    let mut counts = [supply; MAX_TILE as usize + 1];
    counts[EMPTY as usize] = 0;
    let mut claim = |v: Tile, where_: &str| -> Result<(), String> {
        if v == EMPTY || v > MAX_TILE {
            return Err(format!("invalid tile value {v} in snapshot {where_}"));
        }
        let slot = &mut counts[v as usize];
        if *slot == 0 {
            return Err(format!(
                "snapshot holds more copies of tile {v} than the supply allows"
            ));
        }
        *slot -= 1;
        Ok(())
    };

    let mut boards = Vec::with_capacity(players);
    for bs in &snap.boards {
        for &v in &bs.grid {
            if v != EMPTY {
                claim(v, "grid")?;
            }
        }
        boards.push(Board::from_cells(bs.grid, bs.is_ai));
    }
    for &v in &snap.table {
        claim(v, "table")?;
    }

    let mut leftover: Vec<Tile> = Vec::new();
    for v in 1..=MAX_TILE {
        for _ in 0..counts[v as usize] {
            leftover.push(v);
        }
    }
    let mut draw = DrawPile::from_tiles(leftover);
    let mut rng = rng_for_game(seed, 0);
    draw.shuffle(&mut rng);

    Ok(GameState::from_parts(
        rules,
        heuristics,
        boards,
        snap.table.clone(),
        draw,
        snap.current,
    ))
}
