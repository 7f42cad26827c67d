use std::error::Error;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use unlucky::{
    ai_take_turn, GameState, Heuristics, Move, Rules, TurnEvent,
};

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Batch self-play driver for engine soak testing")]
struct Args {
    /// Number of games to run
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Computer players per game (1-4)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Base seed; each game derives its own from this and its index
    #[arg(long, default_value_t = 0x00C0_FFEE)]
    seed: u64,

    /// Enable the Bruno variant
    #[arg(long)]
    bruno: bool,

    /// Tile sets contributed per player
    #[arg(long, default_value_t = 1)]
    sets: u8,
}

#[derive(Debug, Default, Clone, Copy)]
struct GameStats {
    turns: u64,
    pile_draws: u64,
    table_draws: u64,
    placements: u64,
    swaps: u64,
    discards: u64,
    extra_turns: u64,
    winner: Option<usize>,
}

// A game that neither fills a grid nor drains the pile within this many turns
// is abandoned and counted as unfinished.
const TURN_CAP: u64 = 4096;

fn run_game(base_seed: u64, game_id: u64, players: usize, rules: Rules) -> Result<GameStats, String> {
    let mut rng = unlucky::rng_for_game(base_seed, game_id);
    let flags = vec![true; players];
    let mut state = GameState::new(rules, Heuristics::default(), &flags, &mut rng)?;

    let mut stats = GameStats::default();
    loop {
        if stats.turns >= TURN_CAP {
            break;
        }
        match ai_take_turn(&mut state) {
            Ok(report) => {
                stats.turns += 1;
                for event in &report.events {
                    match event {
                        TurnEvent::DrewFromPile(_) => stats.pile_draws += 1,
                        TurnEvent::TookFromTable(_) => stats.table_draws += 1,
                        TurnEvent::Played { mv, .. } => match mv {
                            Move::Place { .. } => stats.placements += 1,
                            Move::Swap { .. } => stats.swaps += 1,
                            Move::Discard => {}
                        },
                        TurnEvent::Discarded(_) => stats.discards += 1,
                        TurnEvent::ExtraTurn => stats.extra_turns += 1,
                    }
                }
                if report.finished {
                    stats.winner = Some(report.player);
                    break;
                }
                state.advance_turn();
            }
            // Pile exhausted on a required draw ends the game with no winner.
            Err(_) => break,
        }
    }
    Ok(stats)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    if args.players == 0 || args.players > 4 {
        return Err(format!("--players {} out of range (1..=4)", args.players).into());
    }
    let rules = Rules::new(args.bruno, args.sets);
    log::info!(
        "simulating {} games, {} players, seed {:#x}",
        args.games,
        args.players,
        args.seed
    );

    let pb = ProgressBar::new(args.games);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] games {bar:40.cyan/blue} {pos}/{len}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let results: Result<Vec<GameStats>, String> = (0..args.games)
        .into_par_iter()
        .map(|game_id| {
            let stats = run_game(args.seed, game_id, args.players, rules);
            pb.inc(1);
            stats
        })
        .collect();
    pb.finish();
    let results = results?;

    let games = results.len() as u64;
    let finished = results.iter().filter(|s| s.winner.is_some()).count() as u64;
    let total_turns: u64 = results.iter().map(|s| s.turns).sum();
    let total_discards: u64 = results.iter().map(|s| s.discards).sum();
    let total_swaps: u64 = results.iter().map(|s| s.swaps).sum();
    let total_extra: u64 = results.iter().map(|s| s.extra_turns).sum();
    let total_table: u64 = results.iter().map(|s| s.table_draws).sum();
    let total_pile: u64 = results.iter().map(|s| s.pile_draws).sum();

    let mut wins = vec![0u64; args.players];
    for s in &results {
        if let Some(w) = s.winner {
            wins[w] += 1;
        }
    }

    println!("simulated {games} games ({finished} finished with a full grid)");
    #[allow(clippy::cast_precision_loss)]
    {
        println!(
            "turns/game: {:.1}   draws: {total_pile} pile / {total_table} table",
            total_turns as f64 / games.max(1) as f64
        );
    }
    let total_placements: u64 = results.iter().map(|s| s.placements).sum();
    println!(
        "placements: {total_placements}   swaps: {total_swaps}   discards: {total_discards}   bruno extra turns: {total_extra}"
    );
    for (i, w) in wins.iter().enumerate() {
        println!("computer {i}: {w} wins");
    }

    Ok(())
}
