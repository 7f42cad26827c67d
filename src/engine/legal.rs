use crate::board::Board;
use crate::types::{idx_to_rc, Dir, Tile, CELLS, EMPTY, MAX_TILE};

/// Whether `tile` may occupy `cell` given the grid as it stands.
///
/// Values ripple outward from the grid interior: in each of the four
/// directions only the nearest placed tile constrains the candidate. Toward
/// the interior (up/left) the candidate must be strictly greater, toward the
/// edge (down/right) strictly smaller. Empty cells are skipped; a direction
/// with no placed tile imposes nothing. Intermediate empty cells are covered
/// transitively by the feasibility check, not here.
///
/// Malformed inputs (tile 0 or above the supply range, cell out of bounds)
/// yield `false` rather than a panic.
pub fn is_legal(board: &Board, tile: Tile, cell: u8) -> bool {
    if cell >= CELLS || tile == EMPTY || tile > MAX_TILE {
        return false;
    }
    Dir::all()
        .into_iter()
        .all(|dir| direction_allows(board, tile, cell, dir))
}

fn direction_allows(board: &Board, tile: Tile, cell: u8, dir: Dir) -> bool {
    let (mut r, mut c) = idx_to_rc(cell);
    while let Some((nr, nc)) = dir.step(r, c) {
        r = nr;
        c = nc;
        let v = board.get_rc(r, c);
        if v == EMPTY {
            continue;
        }
        return if dir.is_outward() { tile < v } else { tile > v };
    }
    true
}
