#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod rules;
pub mod board;
pub mod state;
pub mod rng;
pub mod persist;

pub mod engine {
    pub mod legal;
    pub mod feasible;
    pub mod score;
    pub mod movegen;
    pub mod recommend;
    pub mod apply;
}

pub mod driver;

// Re-exports: stable minimal API surface for external callers
pub use crate::board::Board;
pub use crate::driver::{ai_take_turn, TurnEvent, TurnReport};
pub use crate::engine::apply::{apply_move, bruno_match, Applied};
pub use crate::engine::feasible::{is_feasible, RemainingCounts};
pub use crate::engine::legal::is_legal;
pub use crate::engine::movegen::{best_moves, RankedMove};
pub use crate::engine::recommend::{recommend, weakest_tile, DrawSource, Recommendation};
pub use crate::engine::score::{alignment, placement_score};
pub use crate::persist::{load_snapshot, restore_state, save_snapshot, Snapshot};
pub use crate::rng::rng_for_game;
pub use crate::rules::{Heuristics, Rules};
pub use crate::state::{is_terminal, DrawPile, GameState, Move};
pub use crate::types::{idx_to_rc, rc_to_idx, Dir, Tile, BOARD_SIZE, CELLS, EMPTY, MAX_TILE};
