use std::io::Write;

use unlucky::persist::{BoardSnapshot, Snapshot, FORMAT_VERSION};
use unlucky::{
    ai_take_turn, best_moves, load_snapshot, restore_state, rng_for_game, save_snapshot, GameState,
    Heuristics, Rules, CELLS, EMPTY, MAX_TILE,
};

fn played_in_state(seed: u64, turns: usize) -> GameState {
    let mut rng = rng_for_game(seed, 0);
    let mut state = GameState::new(Rules::default(), Heuristics::default(), &[true, true], &mut rng)
        .expect("two computer players");
    for _ in 0..turns {
        let report = ai_take_turn(&mut state).expect("pile is far from empty");
        if report.finished {
            break;
        }
        state.advance_turn();
    }
    state
}

#[test]
fn snapshot_round_trip_preserves_engine_results() {
    let state = played_in_state(42, 6);

    let file = tempfile::NamedTempFile::new().expect("temp file");
    save_snapshot(file.path(), &state).expect("save");
    let snap = load_snapshot(file.path()).expect("load");
    let restored =
        restore_state(&snap, state.rules, state.heuristics, 42).expect("restore");

    assert_eq!(restored.boards, state.boards);
    assert_eq!(restored.table, state.table);
    assert_eq!(restored.current, state.current);

    // The engine cannot tell a reconstructed state from a live one.
    for tile in 1..=MAX_TILE {
        assert_eq!(best_moves(&restored, tile), best_moves(&state, tile));
    }
}

#[test]
fn restored_pile_closes_the_supply_invariant() {
    let state = played_in_state(7, 4);

    let file = tempfile::NamedTempFile::new().expect("temp file");
    save_snapshot(file.path(), &state).expect("save");
    let snap = load_snapshot(file.path()).expect("load");
    let restored = restore_state(&snap, state.rules, state.heuristics, 7).expect("restore");

    let supply = state.rules.supply_per_value(state.boards.len());
    for v in 1..=MAX_TILE {
        let on_grids: usize = restored
            .boards
            .iter()
            .map(|b| b.tiles().filter(|&t| t == v).count())
            .sum();
        let on_table = restored.table.iter().filter(|&&t| t == v).count();
        let in_pile = restored.draw.iter().filter(|&t| t == v).count();
        assert_eq!(
            on_grids + on_table + in_pile,
            supply as usize,
            "supply of tile {v}"
        );
    }
}

#[test]
fn oversupplied_snapshot_is_rejected() {
    let mut grid = [EMPTY; CELLS as usize];
    grid[0] = 5;
    let snap = Snapshot {
        version: FORMAT_VERSION,
        current: 0,
        table: vec![5, 5],
        boards: vec![BoardSnapshot {
            grid,
            is_ai: false,
        }],
    };
    // One player, one set: three 5s cannot exist.
    let err = restore_state(&snap, Rules::default(), Heuristics::default(), 0)
        .expect_err("supply violation");
    assert!(err.contains("tile 5"), "unexpected error: {err}");
}

#[test]
fn unknown_snapshot_version_is_rejected() {
    let snap = Snapshot {
        version: FORMAT_VERSION + 1,
        current: 0,
        table: Vec::new(),
        boards: vec![BoardSnapshot {
            grid: [EMPTY; CELLS as usize],
            is_ai: true,
        }],
    };
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    let text = serde_json::to_string(&snap).expect("serialize");
    file.write_all(text.as_bytes()).expect("write");

    let err = load_snapshot(file.path()).expect_err("version mismatch");
    assert!(err.contains("version"), "unexpected error: {err}");
}

#[test]
fn bad_player_indices_are_rejected() {
    let snap = Snapshot {
        version: FORMAT_VERSION,
        current: 2,
        table: Vec::new(),
        boards: vec![
            BoardSnapshot {
                grid: [EMPTY; CELLS as usize],
                is_ai: false,
            },
            BoardSnapshot {
                grid: [EMPTY; CELLS as usize],
                is_ai: true,
            },
        ],
    };
    assert!(restore_state(&snap, Rules::default(), Heuristics::default(), 0).is_err());
}
