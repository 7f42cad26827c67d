use crate::board::Board;
use crate::engine::legal::is_legal;
use crate::state::{GameState, Move};
use crate::types::{Tile, CELLS, EMPTY, MAX_TILE};

/// Result of committing a move: the successor state and whether the Bruno
/// variant granted the mover another turn.
#[derive(Debug, Clone)]
pub struct Applied {
    pub state: GameState,
    pub extra_turn: bool,
}

/// Apply a move as a pure transform: returns the successor state on success.
///
/// Transitions, for the current player's board:
/// - `Place`: the cell goes Empty -> Occupied(tile); must be empty and legal.
/// - `Swap`: Occupied(old) -> Occupied(tile); the displaced tile is appended
///   to the shared table. Legality is judged with the occupant evacuated.
/// - `Discard`: no grid mutation; `tile` is appended to the table.
///
/// With the Bruno variant on, a placed tile matching any of its four diagonal
/// neighbors grants an extra turn, unless the grid just became full (a full
/// grid ends the game immediately). Turn advancement is the caller's job.
pub fn apply_move(state: &GameState, mv: Move, tile: Tile) -> Result<Applied, String> {
    if tile == EMPTY || tile > MAX_TILE {
        return Err(format!("tile {tile} out of range (1..={MAX_TILE})"));
    }
    let board = state.current_board();

    let mut ns = state.clone();
    let placed_cell = match mv {
        Move::Place { cell } => {
            if cell >= CELLS {
                return Err(format!("cell index {cell} out of range"));
            }
            if !board.is_empty_cell(cell) {
                return Err(format!("cell {cell} is already occupied"));
            }
            if !is_legal(board, tile, cell) {
                return Err(format!("placing {tile} at cell {cell} breaks the ordering"));
            }
            ns.current_board_mut().set(cell, tile);
            Some(cell)
        }
        Move::Swap { cell, old } => {
            if cell >= CELLS {
                return Err(format!("cell index {cell} out of range"));
            }
            let occupant = board.get(cell);
            if occupant == EMPTY {
                return Err(format!("cell {cell} is empty, nothing to swap out"));
            }
            if occupant != old {
                return Err(format!(
                    "cell {cell} holds {occupant}, not the recorded {old}"
                ));
            }
            let mut scratch = *board;
            scratch.set(cell, EMPTY);
            if !is_legal(&scratch, tile, cell) {
                return Err(format!("swapping {tile} into cell {cell} breaks the ordering"));
            }
            ns.current_board_mut().set(cell, tile);
            ns.table.push(old);
            Some(cell)
        }
        Move::Discard => {
            ns.table.push(tile);
            None
        }
    };

    let extra_turn = match placed_cell {
        Some(cell) => {
            let board = ns.current_board();
            ns.rules.bruno && !board.is_full() && bruno_match(board, cell)
        }
        None => false,
    };

    Ok(Applied {
        state: ns,
        extra_turn,
    })
}

/// Bruno check: does the tile at `cell` match any diagonally adjacent tile?
pub fn bruno_match(board: &Board, cell: u8) -> bool {
    let tile = board.get(cell);
    if tile == EMPTY {
        return false;
    }
    board
        .diagonal_neighbors(cell)
        .into_iter()
        .flatten()
        .any(|n| board.get(n) == tile)
}
