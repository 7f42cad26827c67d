use crate::engine::movegen::best_moves;
use crate::engine::score::alignment;
use crate::state::{GameState, Move};
use crate::types::{Tile, CELLS, EMPTY};

/// Where a recommended tile should be acquired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    Table,
    Pile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub tile: Tile,
    pub source: DrawSource,
    /// Best move found for the recommended tile.
    pub mv: Move,
    pub score: f64,
    /// Weakest placed tile's cell, when the recommendation is to take from
    /// the table and a placed tile's alignment sits below `weak_threshold`.
    pub evict: Option<u8>,
}

/// Which tile the current player should prefer to acquire, if any.
///
/// Every tile on the table and the top of the draw pile are evaluated by
/// their best placement on the current board. The highest best-move score
/// strictly above `recommend_threshold` wins; table tiles are scanned in
/// table order before the pile top, and only a strictly better score
/// displaces an earlier candidate, so ties resolve to the first seen.
/// `None` means nothing clears the bar and the caller should draw blindly.
pub fn recommend(state: &GameState) -> Option<Recommendation> {
    let threshold = state.heuristics.recommend_threshold;
    let mut best: Option<Recommendation> = None;

    let consider = |tile: Tile, source: DrawSource, best: &mut Option<Recommendation>| {
        let Some(top) = best_moves(state, tile).first().copied() else {
            return;
        };
        if top.score <= threshold {
            return;
        }
        if best.map_or(true, |b| top.score > b.score) {
            *best = Some(Recommendation {
                tile,
                source,
                mv: top.mv,
                score: top.score,
                evict: None,
            });
        }
    };

    for &tile in &state.table {
        consider(tile, DrawSource::Table, &mut best);
    }
    if let Some(top) = state.draw.peek() {
        consider(top, DrawSource::Pile, &mut best);
    }

    let mut rec = best?;
    if rec.source == DrawSource::Table {
        rec.evict = weakest_tile(state);
    }
    Some(rec)
}

/// Cell of the single weakest placed tile on the current board: minimum
/// positional alignment strictly below `weak_threshold`, ties broken by the
/// first occurrence in row-major order.
pub fn weakest_tile(state: &GameState) -> Option<u8> {
    let board = state.current_board();
    let h = &state.heuristics;
    let mut weakest: Option<(u8, f64)> = None;
    for cell in 0..CELLS {
        let tile = board.get(cell);
        if tile == EMPTY {
            continue;
        }
        let a = alignment(h, tile, cell);
        if a < h.weak_threshold && weakest.map_or(true, |(_, best)| a < best) {
            weakest = Some((cell, a));
        }
    }
    weakest.map(|(cell, _)| cell)
}
