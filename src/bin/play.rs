use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use unlucky::engine::feasible::{is_feasible, RemainingCounts};
use unlucky::{
    ai_take_turn, alignment, apply_move, best_moves, idx_to_rc, is_legal, load_snapshot,
    placement_score, recommend, restore_state, rng_for_game, save_snapshot, DrawSource, GameState,
    Heuristics, Move, Rules, Tile, TurnEvent, BOARD_SIZE, EMPTY, MAX_TILE,
};

#[derive(Debug, Parser)]
#[command(name = "play", about = "Interactive ascending tile-placement game")]
struct Args {
    /// Snapshot file to resume from (skips fresh setup)
    #[arg(long)]
    load: Option<PathBuf>,

    /// Number of human players
    #[arg(long, default_value_t = 1)]
    humans: usize,

    /// Number of computer players
    #[arg(long, default_value_t = 1)]
    ai: usize,

    /// Enable the Bruno variant (extra turn on a diagonal value match)
    #[arg(long)]
    bruno: bool,

    /// Analyze mode: drawn tiles and diagonals are entered manually
    #[arg(long)]
    analyze: bool,

    /// Tile sets contributed per player (2 for the two-sets ruleset)
    #[arg(long, default_value_t = 1)]
    sets: u8,

    /// RNG seed for shuffling (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
}

enum TurnOutcome {
    Continue,
    Quit,
    GameOver,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(seed_from_clock);
    let rules = Rules {
        bruno: args.bruno,
        analyze: args.analyze,
        sets_per_player: args.sets,
    };
    let heuristics = Heuristics::default();
    log::debug!("seed {seed}, rules {rules:?}");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut state = if let Some(path) = &args.load {
        let snap = load_snapshot(path)?;
        let state = restore_state(&snap, rules, heuristics, seed)?;
        println!("Loaded game from {}", path.display());
        state
    } else {
        let mut flags = vec![false; args.humans];
        flags.extend(std::iter::repeat(true).take(args.ai));
        let mut rng = rng_for_game(seed, 0);
        let mut state = GameState::new(rules, heuristics, &flags, &mut rng)?;
        if args.analyze {
            prompt_diagonals(&mut state, &mut input)?;
        }
        state
    };

    print_boards(&state);
    loop {
        let outcome = if state.current_board().is_ai {
            computer_turn(&mut state)
        } else {
            human_turn(&mut state, &mut input)?
        };
        match outcome {
            TurnOutcome::Quit => {
                println!("Exiting game.");
                return Ok(());
            }
            TurnOutcome::GameOver => {
                print_boards(&state);
                println!("GAME OVER!");
                return Ok(());
            }
            TurnOutcome::Continue => {}
        }
        print_boards(&state);
        state.advance_turn();
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x00C0_FFEE)
}

fn computer_turn(state: &mut GameState) -> TurnOutcome {
    match ai_take_turn(state) {
        Ok(report) => {
            for event in &report.events {
                narrate(report.player, event);
            }
            if report.finished {
                TurnOutcome::GameOver
            } else {
                TurnOutcome::Continue
            }
        }
        Err(e) => {
            println!("{e} — game over.");
            TurnOutcome::GameOver
        }
    }
}

fn narrate(player: usize, event: &TurnEvent) {
    match *event {
        TurnEvent::TookFromTable(tile) => {
            println!("Computer {player} takes {tile} from the table");
        }
        TurnEvent::DrewFromPile(tile) => println!("Computer {player} draws {tile} from the pile"),
        TurnEvent::Played { mv, tile } => match mv {
            Move::Place { cell } => {
                let (r, c) = idx_to_rc(cell);
                println!("Computer {player} places {tile} at ({r},{c})");
            }
            Move::Swap { cell, old } => {
                let (r, c) = idx_to_rc(cell);
                println!("Computer {player} swaps {tile} into ({r},{c}), {old} to the table");
            }
            Move::Discard => {}
        },
        TurnEvent::Discarded(tile) => println!("Computer {player} discards {tile} to the table"),
        TurnEvent::ExtraTurn => println!("Bruno match! Computer {player} goes again."),
    }
}

fn human_turn(
    state: &mut GameState,
    input: &mut impl BufRead,
) -> Result<TurnOutcome, Box<dyn Error>> {
    loop {
        let tile = match acquire_tile(state, input)? {
            Acquired::Tile(tile) => tile,
            Acquired::Quit => return Ok(TurnOutcome::Quit),
            Acquired::PileEmpty => {
                println!("Draw pile is empty — game over.");
                return Ok(TurnOutcome::GameOver);
            }
        };
        match place_tile(state, input, tile)? {
            Placed::Done => return Ok(TurnOutcome::Continue),
            Placed::GameOver => return Ok(TurnOutcome::GameOver),
            Placed::ExtraTurn => {
                println!("Bruno match! Extra turn.");
            }
        }
    }
}

enum Acquired {
    Tile(Tile),
    Quit,
    PileEmpty,
}

fn acquire_tile(
    state: &mut GameState,
    input: &mut impl BufRead,
) -> Result<Acquired, Box<dyn Error>> {
    loop {
        let line = match prompt(input, "[d]raw, [t]able, [r]ecommend, [s]ave, or [q]uit? ")? {
            Some(line) => line.to_ascii_lowercase(),
            None => return Ok(Acquired::Quit),
        };
        match line.as_str() {
            "q" => return Ok(Acquired::Quit),
            "s" => {
                let Some(name) = prompt(input, "Enter file name for save: ")? else {
                    return Ok(Acquired::Quit);
                };
                let mut name = name;
                if !name.ends_with(".json") {
                    name.push_str(".json");
                }
                match save_snapshot(&name, state) {
                    Ok(()) => println!("Game saved."),
                    Err(e) => println!("Failed to save: {e}"),
                }
                return Ok(Acquired::Quit);
            }
            "r" => match recommend(state) {
                Some(rec) => {
                    let source = match rec.source {
                        DrawSource::Table => "the table",
                        DrawSource::Pile => "the pile",
                    };
                    match rec.mv {
                        Move::Place { cell } => {
                            let (r, c) = idx_to_rc(cell);
                            println!(
                                "Taking {} from {source} and placing it at ({r},{c}) is the best choice",
                                rec.tile
                            );
                        }
                        Move::Swap { cell, old } => {
                            let (r, c) = idx_to_rc(cell);
                            println!(
                                "Taking {} from {source} and swapping it into ({r},{c}) (pushing {old} out) is the best choice",
                                rec.tile
                            );
                        }
                        Move::Discard => {}
                    }
                    if let Some(cell) = rec.evict {
                        let (r, c) = idx_to_rc(cell);
                        println!("Tile at ({r},{c}) is weakly placed and worth swapping out.");
                    }
                }
                None => println!("Nothing on offer clears the bar — draw from the pile."),
            },
            "t" => {
                if state.table.is_empty() {
                    println!("The table is empty.");
                    continue;
                }
                println!("Tiles on table: {:?}", state.table);
                let Some(text) = prompt(input, "Enter tile to pick: ")? else {
                    return Ok(Acquired::Quit);
                };
                match text.parse::<Tile>() {
                    Ok(tile) if state.take_from_table(tile) => return Ok(Acquired::Tile(tile)),
                    _ => println!("Invalid choice."),
                }
            }
            "d" | "" => {
                if state.rules.analyze {
                    let Some(text) = prompt(input, "Enter drawn tile: ")? else {
                        return Ok(Acquired::Quit);
                    };
                    if text.is_empty() {
                        return Ok(Acquired::Quit);
                    }
                    match text.parse::<Tile>() {
                        Ok(tile) if (1..=MAX_TILE).contains(&tile) => {
                            return Ok(Acquired::Tile(tile))
                        }
                        _ => println!("Invalid tile number."),
                    }
                } else {
                    match state.draw.draw() {
                        Some(tile) => {
                            println!("Drew a {tile}");
                            return Ok(Acquired::Tile(tile));
                        }
                        None => return Ok(Acquired::PileEmpty),
                    }
                }
            }
            _ => println!("Invalid option."),
        }
    }
}

enum Placed {
    Done,
    ExtraTurn,
    GameOver,
}

fn place_tile(
    state: &mut GameState,
    input: &mut impl BufRead,
    tile: Tile,
) -> Result<Placed, Box<dyn Error>> {
    loop {
        let line = match prompt(
            input,
            &format!("Action for {tile}? ([r]ecommend, [d]iscard, or row,col): "),
        )? {
            Some(line) => line,
            None => {
                // Input ran out mid-placement; discarding keeps the state consistent.
                commit(state, Move::Discard, tile)?;
                return Ok(Placed::Done);
            }
        };
        match line.as_str() {
            "d" => {
                commit(state, Move::Discard, tile)?;
                println!("Placed on table.");
                return Ok(Placed::Done);
            }
            "r" => {
                let ranked = best_moves(state, tile);
                if ranked.is_empty() {
                    println!("No legal placements found.");
                    continue;
                }
                print_score_map(state, tile);
                for (i, rm) in ranked.iter().enumerate() {
                    let label = match rm.mv {
                        Move::Place { .. } => "Place",
                        Move::Swap { .. } => "Swap",
                        Move::Discard => "Discard",
                    };
                    if let Some(cell) = rm.mv.cell() {
                        let (r, c) = idx_to_rc(cell);
                        println!("{}) {label} at ({r},{c}) — score {:.4}", i + 1, rm.score);
                    }
                }
                let Some(choice) = prompt(input, "Choose move number or press Enter to skip: ")?
                else {
                    continue;
                };
                if choice.is_empty() {
                    continue;
                }
                match choice.parse::<usize>() {
                    Ok(idx) if idx >= 1 && idx <= ranked.len() => {
                        return commit_and_report(state, ranked[idx - 1].mv, tile);
                    }
                    _ => println!("Invalid choice."),
                }
            }
            _ => {
                if let Some(mv) = parse_manual_move(state, tile, &line) {
                    return commit_and_report(state, mv, tile);
                }
                println!("Invalid input, try again.");
            }
        }
    }
}

/// Parse "row,col" into a Place or Swap, validated against the engine's
/// legality and feasibility predicates.
fn parse_manual_move(state: &GameState, tile: Tile, line: &str) -> Option<Move> {
    let (r, c) = line.split_once(',')?;
    let r: u8 = r.trim().parse().ok()?;
    let c: u8 = c.trim().parse().ok()?;
    if r >= BOARD_SIZE || c >= BOARD_SIZE {
        return None;
    }
    let cell = r * BOARD_SIZE + c;

    let board = state.current_board();
    let mut remaining = RemainingCounts::for_state(state);
    remaining.take(tile);

    let occupant = board.get(cell);
    if occupant == EMPTY {
        if is_feasible(board, cell, tile, &remaining) {
            return Some(Move::Place { cell });
        }
    } else if occupant != tile {
        let mut scratch = *board;
        scratch.set(cell, EMPTY);
        let mut freed = remaining;
        freed.give_back(occupant);
        if is_legal(&scratch, tile, cell) && is_feasible(&scratch, cell, tile, &freed) {
            return Some(Move::Swap {
                cell,
                old: occupant,
            });
        }
    }
    None
}

fn commit(state: &mut GameState, mv: Move, tile: Tile) -> Result<bool, Box<dyn Error>> {
    let applied = apply_move(state, mv, tile)?;
    *state = applied.state;
    Ok(applied.extra_turn)
}

fn commit_and_report(
    state: &mut GameState,
    mv: Move,
    tile: Tile,
) -> Result<Placed, Box<dyn Error>> {
    let extra = commit(state, mv, tile)?;
    match mv {
        Move::Place { cell } => {
            let (r, c) = idx_to_rc(cell);
            println!("Placed {tile} at ({r},{c}).");
        }
        Move::Swap { cell, old } => {
            let (r, c) = idx_to_rc(cell);
            println!("Swapped {old} onto the table, placed {tile} at ({r},{c}).");
        }
        Move::Discard => println!("Placed on table."),
    }
    if state.is_terminal() {
        return Ok(Placed::GameOver);
    }
    if extra {
        return Ok(Placed::ExtraTurn);
    }
    Ok(Placed::Done)
}

fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>, Box<dyn Error>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    if n == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_diagonals(
    state: &mut GameState,
    input: &mut impl BufRead,
) -> Result<(), Box<dyn Error>> {
    for i in 0..state.boards.len() {
        let who = if state.boards[i].is_ai {
            "Computer"
        } else {
            "Player"
        };
        let Some(line) = prompt(
            input,
            &format!("Enter 4 numbers for {who} {i} diagonal positions (or leave blank to keep the random fill): "),
        )?
        else {
            return Ok(());
        };
        if line.is_empty() {
            continue;
        }
        let values: Vec<Tile> = line
            .split_whitespace()
            .filter_map(|t| t.parse().ok())
            .collect();
        let mut diagonal = [EMPTY; BOARD_SIZE as usize];
        for (slot, &v) in diagonal.iter_mut().zip(values.iter()) {
            if (1..=MAX_TILE).contains(&v) {
                *slot = v;
            }
        }
        state.boards[i].set_diagonal(diagonal);
    }
    Ok(())
}

fn print_boards(state: &GameState) {
    const CELL_WIDTH: usize = 5;
    let board_width = BOARD_SIZE as usize * (CELL_WIDTH + 1) + 1;
    let total_width = board_width * state.boards.len() + (state.boards.len() - 1) * 2;

    let mut table_tiles = state.table.clone();
    table_tiles.sort_unstable();
    let content = if table_tiles.is_empty() {
        "(empty)".to_string()
    } else {
        table_tiles
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };
    println!("+{}+", center(" TABLE ", total_width, '-'));
    println!("|{}|", center(&content, total_width, ' '));
    println!("+{}+", "-".repeat(total_width));

    let headers: Vec<String> = state
        .boards
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let name = if b.is_ai { "Computer" } else { "Player" };
            let marker = if i == state.current { "*" } else { "" };
            format!("{name} {i}{marker}")
        })
        .collect();
    let header_line: Vec<String> = headers
        .iter()
        .map(|h| center(h, board_width, ' '))
        .collect();
    println!("{}", header_line.join("  "));

    let rule: String = {
        let one = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(BOARD_SIZE as usize));
        vec![one; state.boards.len()].join("  ")
    };
    for r in 0..BOARD_SIZE {
        println!("{rule}");
        let row_line: Vec<String> = state
            .boards
            .iter()
            .map(|b| {
                let mut line = String::from("|");
                for c in 0..BOARD_SIZE {
                    let v = b.get_rc(r, c);
                    let text = if v == EMPTY {
                        ".".to_string()
                    } else {
                        v.to_string()
                    };
                    line.push_str(&center(&text, CELL_WIDTH, ' '));
                    line.push('|');
                }
                line
            })
            .collect();
        println!("{}", row_line.join("  "));
    }
    println!("{rule}");
}

fn print_score_map(state: &GameState, tile: Tile) {
    let board = state.current_board();
    let mut remaining = RemainingCounts::for_state(state);
    remaining.take(tile);
    let h = &state.heuristics;

    println!("Tile {tile} — base alignment:");
    for r in 0..BOARD_SIZE {
        let row: Vec<String> = (0..BOARD_SIZE)
            .map(|c| format!("{:5.2}", alignment(h, tile, r * BOARD_SIZE + c)))
            .collect();
        println!("| {} |", row.join(" | "));
    }
    println!("Score considering current tile placements:");
    for r in 0..BOARD_SIZE {
        let row: Vec<String> = (0..BOARD_SIZE)
            .map(|c| {
                format!(
                    "{:5.2}",
                    placement_score(board, &remaining, h, tile, r * BOARD_SIZE + c)
                )
            })
            .collect();
        println!("| {} |", row.join(" | "));
    }
}

fn center(text: &str, width: usize, pad: char) -> String {
    if text.len() >= width {
        return text.to_string();
    }
    let left = (width - text.len()) / 2;
    let right = width - text.len() - left;
    format!(
        "{}{}{}",
        pad.to_string().repeat(left),
        text,
        pad.to_string().repeat(right)
    )
}
