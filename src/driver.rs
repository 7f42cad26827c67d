use crate::engine::apply::apply_move;
use crate::engine::movegen::best_moves;
use crate::engine::recommend::{recommend, DrawSource};
use crate::state::{GameState, Move};
use crate::types::Tile;

/// One thing that happened during an automated turn, for display and stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    TookFromTable(Tile),
    DrewFromPile(Tile),
    Played { mv: Move, tile: Tile },
    Discarded(Tile),
    ExtraTurn,
}

#[derive(Debug, Clone)]
pub struct TurnReport {
    pub player: usize,
    pub events: Vec<TurnEvent>,
    /// The mover's grid is full; the game is over.
    pub finished: bool,
}

/// Run one full computer turn on the current board: acquire a tile (from the
/// table when the draw recommendation says so, blindly from the pile
/// otherwise), play the best move or discard, and repeat while the Bruno
/// variant grants extra turns.
///
/// An exhausted draw pile on a required draw is returned as an error for the
/// outer loop to treat as terminal; the engine itself only ends the game on a
/// full grid. Turn advancement is left to the caller.
pub fn ai_take_turn(state: &mut GameState) -> Result<TurnReport, String> {
    let player = state.current;
    let mut events = Vec::new();

    loop {
        let tile = match recommend(state) {
            Some(rec) if rec.source == DrawSource::Table => {
                if !state.take_from_table(rec.tile) {
                    return Err(format!(
                        "internal error: recommended tile {} missing from table",
                        rec.tile
                    ));
                }
                events.push(TurnEvent::TookFromTable(rec.tile));
                rec.tile
            }
            _ => {
                let tile = state
                    .draw
                    .draw()
                    .ok_or_else(|| "draw pile exhausted".to_string())?;
                events.push(TurnEvent::DrewFromPile(tile));
                tile
            }
        };

        let mv = best_moves(state, tile)
            .first()
            .map_or(Move::Discard, |ranked| ranked.mv);
        let applied = apply_move(state, mv, tile)?;
        *state = applied.state;
        match mv {
            Move::Discard => events.push(TurnEvent::Discarded(tile)),
            _ => events.push(TurnEvent::Played { mv, tile }),
        }

        if state.is_terminal() {
            return Ok(TurnReport {
                player,
                events,
                finished: true,
            });
        }
        if !applied.extra_turn {
            break;
        }
        events.push(TurnEvent::ExtraTurn);
    }

    Ok(TurnReport {
        player,
        events,
        finished: false,
    })
}
