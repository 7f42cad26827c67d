use crate::board::Board;
use crate::engine::feasible::RemainingCounts;
use crate::rules::Heuristics;
use crate::types::{idx_to_rc, Tile, BOARD_SIZE, EMPTY, MAX_TILE};

/// Expected center distance for a tile value: tile 1 belongs at distance 2
/// (the corner nearest the interior), MAX_TILE at the far corner.
#[inline]
fn ideal_distance(tile: Tile) -> f64 {
    2.0 + 0.32 * f64::from(tile.saturating_sub(1))
}

/// Center distance of a cell, `2 + r + c`, matching the range of
/// `ideal_distance` over the full tile span.
#[inline]
fn cell_distance(cell: u8) -> f64 {
    let (r, c) = idx_to_rc(cell);
    f64::from(2 + r + c)
}

/// Positional alignment in [0, 1]: peaks when the tile's magnitude matches
/// the cell's distance from the grid center, falling off as a Gaussian with
/// sharpness `alpha`.
#[inline]
pub fn alignment(h: &Heuristics, tile: Tile, cell: u8) -> f64 {
    let diff = ideal_distance(tile) - cell_distance(cell);
    (-h.alpha * diff * diff).exp()
}

/// Fraction of still-obtainable tiles whose value falls in `lo..=hi`.
/// An impossible interval or an exhausted pool count as zero.
#[inline]
pub fn fill_probability(remaining: &RemainingCounts, lo: Tile, hi: Tile) -> f64 {
    if lo > hi {
        return 0.0;
    }
    let total = remaining.total();
    if total == 0 {
        return 0.0;
    }
    f64::from(remaining.in_range(lo, hi)) / f64::from(total)
}

/// Value interval a row cell could legally hold, bounded by its nearest
/// placed row neighbors.
fn row_bounds(board: &Board, r: u8, c: u8) -> (Tile, Tile) {
    let mut lo: Tile = 1;
    let mut hi: Tile = MAX_TILE;
    for cc in (0..c).rev() {
        let v = board.get_rc(r, cc);
        if v != EMPTY {
            lo = v + 1;
            break;
        }
    }
    for cc in c + 1..BOARD_SIZE {
        let v = board.get_rc(r, cc);
        if v != EMPTY {
            hi = v.saturating_sub(1);
            break;
        }
    }
    (lo, hi)
}

/// Value interval a column cell could legally hold, bounded by its nearest
/// placed column neighbors.
fn col_bounds(board: &Board, r: u8, c: u8) -> (Tile, Tile) {
    let mut lo: Tile = 1;
    let mut hi: Tile = MAX_TILE;
    for rr in (0..r).rev() {
        let v = board.get_rc(rr, c);
        if v != EMPTY {
            lo = v + 1;
            break;
        }
    }
    for rr in r + 1..BOARD_SIZE {
        let v = board.get_rc(rr, c);
        if v != EMPTY {
            hi = v.saturating_sub(1);
            break;
        }
    }
    (lo, hi)
}

/// How likely the rest of the cell's row stays fillable, as a product over
/// the other empty row cells of `1 - w * (1 - p)`: `p` is the pool fraction
/// fitting that cell's interval and `w = 1 / (distance + 1)` weights nearer
/// cells more heavily.
pub fn row_flexibility(board: &Board, remaining: &RemainingCounts, cell: u8) -> f64 {
    let (r, c) = idx_to_rc(cell);
    let mut prob = 1.0;
    for cc in 0..BOARD_SIZE {
        if cc == c || board.get_rc(r, cc) != EMPTY {
            continue;
        }
        let weight = 1.0 / (f64::from(cc.abs_diff(c)) + 1.0);
        let (lo, hi) = row_bounds(board, r, cc);
        let p = fill_probability(remaining, lo, hi);
        prob *= 1.0 - weight * (1.0 - p);
    }
    prob
}

/// Column counterpart of [`row_flexibility`].
pub fn col_flexibility(board: &Board, remaining: &RemainingCounts, cell: u8) -> f64 {
    let (r, c) = idx_to_rc(cell);
    let mut prob = 1.0;
    for rr in 0..BOARD_SIZE {
        if rr == r || board.get_rc(rr, c) != EMPTY {
            continue;
        }
        let weight = 1.0 / (f64::from(rr.abs_diff(r)) + 1.0);
        let (lo, hi) = col_bounds(board, rr, c);
        let p = fill_probability(remaining, lo, hi);
        prob *= 1.0 - weight * (1.0 - p);
    }
    prob
}

/// Desirability of placing `tile` at `cell`: positional alignment damped by
/// how much slack the row and column keep for future draws. All three factors
/// live in [0, 1]; the product is used purely for relative ranking.
pub fn placement_score(
    board: &Board,
    remaining: &RemainingCounts,
    h: &Heuristics,
    tile: Tile,
    cell: u8,
) -> f64 {
    alignment(h, tile, cell)
        * row_flexibility(board, remaining, cell)
        * col_flexibility(board, remaining, cell)
}
