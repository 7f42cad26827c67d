use serde::{Deserialize, Serialize};

use crate::types::{idx_to_rc, rc_to_idx, Tile, BOARD_SIZE, CELLS, EMPTY};

/// One player's 4x4 grid. Cells 0..=15 laid out row-major (r*4 + c);
/// `EMPTY` (0) marks an unfilled cell. The grid itself enforces nothing:
/// ordering legality is checked by the engine before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Tile; CELLS as usize],
    /// Whether this board is driven by the automated player.
    pub is_ai: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [EMPTY; CELLS as usize],
            is_ai: false,
        }
    }
}

impl Board {
    #[inline]
    pub fn new(is_ai: bool) -> Self {
        Self {
            cells: [EMPTY; CELLS as usize],
            is_ai,
        }
    }

    #[inline]
    pub fn from_cells(cells: [Tile; CELLS as usize], is_ai: bool) -> Self {
        Self { cells, is_ai }
    }

    /// Build a board from 4 rows of 4 values, as grids are usually written out.
    #[inline]
    pub fn from_rows(rows: [[Tile; BOARD_SIZE as usize]; BOARD_SIZE as usize], is_ai: bool) -> Self {
        let mut cells = [EMPTY; CELLS as usize];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r * BOARD_SIZE as usize + c] = v;
            }
        }
        Self { cells, is_ai }
    }

    #[inline]
    pub fn get(&self, idx: u8) -> Tile {
        self.cells[idx as usize]
    }

    #[inline]
    pub fn get_rc(&self, r: u8, c: u8) -> Tile {
        self.cells[(r * BOARD_SIZE + c) as usize]
    }

    #[inline]
    pub fn set(&mut self, idx: u8, tile: Tile) {
        self.cells[idx as usize] = tile;
    }

    #[inline]
    pub fn is_empty_cell(&self, idx: u8) -> bool {
        self.cells[idx as usize] == EMPTY
    }

    #[inline]
    pub fn filled_count(&self) -> u8 {
        self.cells.iter().filter(|&&v| v != EMPTY).count() as u8
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled_count() == CELLS
    }

    /// All cell values, row-major, `EMPTY` included.
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().copied()
    }

    /// Placed tiles only, row-major.
    #[inline]
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().copied().filter(|&v| v != EMPTY)
    }

    /// Diagonal neighbor indices for a cell in
    /// [UpLeft, UpRight, DownLeft, DownRight] order. None means off-board.
    #[inline]
    pub fn diagonal_neighbors(&self, idx: u8) -> [Option<u8>; 4] {
        let (r, c) = idx_to_rc(idx);
        let up = r.checked_sub(1);
        let down = if r + 1 < BOARD_SIZE { Some(r + 1) } else { None };
        let left = c.checked_sub(1);
        let right = if c + 1 < BOARD_SIZE { Some(c + 1) } else { None };
        [
            up.zip(left).and_then(|(nr, nc)| rc_to_idx(nr, nc)),
            up.zip(right).and_then(|(nr, nc)| rc_to_idx(nr, nc)),
            down.zip(left).and_then(|(nr, nc)| rc_to_idx(nr, nc)),
            down.zip(right).and_then(|(nr, nc)| rc_to_idx(nr, nc)),
        ]
    }

    /// Write tiles onto the main diagonal, the usual starting fill.
    #[inline]
    pub fn set_diagonal(&mut self, tiles: [Tile; BOARD_SIZE as usize]) {
        for (i, &t) in tiles.iter().enumerate() {
            self.cells[i * BOARD_SIZE as usize + i] = t;
        }
    }
}
