use crate::engine::feasible::{is_feasible, RemainingCounts};
use crate::engine::legal::is_legal;
use crate::engine::score::placement_score;
use crate::state::{GameState, Move};
use crate::types::{Tile, CELLS, EMPTY, MAX_TILE};

/// A candidate move with its heuristic score. The score is for ranking only
/// and carries no correctness meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMove {
    pub mv: Move,
    pub score: f64,
}

/// All legal-and-feasible placements and swaps of `tile` on the current
/// board, best first.
///
/// Cells are scanned row-major and each cell yields at most one candidate:
/// a `Place` when empty, a `Swap` when occupied by a different value. Swap
/// candidates are judged with the occupant evacuated (cleared from the grid
/// and counted back into the obtainable pool, since it would land on the
/// table) and are only offered when the incoming tile outscores the occupant
/// by `swap_margin`; both scores are judged against the grid as it stands so
/// the comparison is like for like. Infeasible placements are filtered out
/// entirely, they provably cannot lead to a completed grid.
///
/// The sort is stable and descending by score, so ties keep the row-major
/// enumeration order. An empty result means the caller must fall back to
/// discarding, which is always valid.
pub fn best_moves(state: &GameState, tile: Tile) -> Vec<RankedMove> {
    if tile == EMPTY || tile > MAX_TILE {
        return Vec::new();
    }
    let board = state.current_board();
    let h = &state.heuristics;
    let mut remaining = RemainingCounts::for_state(state);
    // The in-hand tile fills exactly one cell; it cannot also cover a future
    // path cell.
    remaining.take(tile);

    let mut moves: Vec<RankedMove> = Vec::new();
    for cell in 0..CELLS {
        let occupant = board.get(cell);
        if occupant == EMPTY {
            if is_feasible(board, cell, tile, &remaining) {
                moves.push(RankedMove {
                    mv: Move::Place { cell },
                    score: placement_score(board, &remaining, h, tile, cell),
                });
            }
        } else if occupant != tile {
            let mut scratch = *board;
            scratch.set(cell, EMPTY);
            let mut freed = remaining;
            freed.give_back(occupant);
            if is_legal(&scratch, tile, cell) && is_feasible(&scratch, cell, tile, &freed) {
                let new_score = placement_score(board, &remaining, h, tile, cell);
                let old_score = placement_score(board, &remaining, h, occupant, cell);
                if new_score > old_score * (1.0 + h.swap_margin) {
                    moves.push(RankedMove {
                        mv: Move::Swap {
                            cell,
                            old: occupant,
                        },
                        score: new_score,
                    });
                }
            }
        }
    }

    moves.sort_by(|a, b| b.score.total_cmp(&a.score));
    moves
}
