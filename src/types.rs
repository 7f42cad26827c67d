/// Tile value. `0` (`EMPTY`) marks an empty cell and is never a playable tile.
pub type Tile = u8;

pub const EMPTY: Tile = 0;

/// Side length of every player grid.
pub const BOARD_SIZE: u8 = 4;

/// Cell count of a grid (cells are indexed row-major `0..CELLS`).
pub const CELLS: u8 = BOARD_SIZE * BOARD_SIZE;

/// Highest tile value in the supply (tiles run 1..=MAX_TILE).
pub const MAX_TILE: Tile = BOARD_SIZE * 5;

/// Board indexing helpers (4x4 board)
#[inline]
pub fn idx_to_rc(idx: u8) -> (u8, u8) {
    debug_assert!(idx < CELLS);
    (idx / BOARD_SIZE, idx % BOARD_SIZE)
}

#[inline]
pub fn rc_to_idx(r: u8, c: u8) -> Option<u8> {
    if r < BOARD_SIZE && c < BOARD_SIZE {
        Some(r * BOARD_SIZE + c)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    #[inline]
    pub fn all() -> [Dir; 4] {
        [Dir::Up, Dir::Right, Dir::Down, Dir::Left]
    }

    /// Outward directions run toward increasing row/column index, where the
    /// ripple ordering requires strictly larger values.
    #[inline]
    pub fn is_outward(self) -> bool {
        matches!(self, Dir::Down | Dir::Right)
    }

    #[inline]
    pub fn outward() -> [Dir; 2] {
        [Dir::Down, Dir::Right]
    }

    /// One step from (r, c), or None past the board edge.
    #[inline]
    pub fn step(self, r: u8, c: u8) -> Option<(u8, u8)> {
        match self {
            Dir::Up => r.checked_sub(1).map(|nr| (nr, c)),
            Dir::Down => {
                if r + 1 < BOARD_SIZE {
                    Some((r + 1, c))
                } else {
                    None
                }
            }
            Dir::Left => c.checked_sub(1).map(|nc| (r, nc)),
            Dir::Right => {
                if c + 1 < BOARD_SIZE {
                    Some((r, c + 1))
                } else {
                    None
                }
            }
        }
    }
}
