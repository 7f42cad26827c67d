use unlucky::{
    apply_move, bruno_match, is_legal, rc_to_idx, Board, DrawPile, GameState, Heuristics, Move,
    Rules, MAX_TILE,
};

fn board_a() -> Board {
    Board::from_rows(
        [[5, 0, 0, 9], [0, 7, 0, 0], [0, 0, 10, 19], [0, 0, 19, 20]],
        false,
    )
}

fn board_b() -> Board {
    Board::from_rows(
        [[6, 0, 0, 0], [0, 10, 0, 0], [0, 0, 14, 0], [0, 0, 0, 20]],
        false,
    )
}

fn two_board_state() -> GameState {
    GameState::from_parts(
        Rules::default(),
        Heuristics::default(),
        vec![board_a(), board_b()],
        vec![7, 5, 17, 4, 10],
        DrawPile::empty(),
        0,
    )
}

fn cell(r: u8, c: u8) -> u8 {
    rc_to_idx(r, c).expect("in bounds")
}

#[test]
fn legality_against_nearest_neighbors() {
    let b = board_a();

    // Right neighbor 9 allows 6; left neighbor 5 forbids 4.
    assert!(is_legal(&b, 6, cell(0, 1)));
    assert!(!is_legal(&b, 4, cell(0, 1)));

    // Between 7 (above) and nothing below, under 10 to the right.
    assert!(is_legal(&b, 8, cell(2, 1)));

    // 20 at (3,0) collides with the 19 further right in its row.
    assert!(!is_legal(&b, 20, cell(3, 0)));
}

#[test]
fn empty_lines_impose_no_constraint() {
    let b = Board::new(false);
    for idx in 0..16 {
        for v in 1..=MAX_TILE {
            assert!(is_legal(&b, v, idx), "tile {v} at cell {idx}");
        }
    }
}

#[test]
fn unconstrained_cell_accepts_every_tile() {
    // A lone 10 at (0,0) shares no row or column with (1,2).
    let mut b = Board::new(false);
    b.set(cell(0, 0), 10);
    for v in 1..=MAX_TILE {
        assert!(is_legal(&b, v, cell(1, 2)));
    }
}

#[test]
fn malformed_inputs_are_rejected_not_fatal() {
    let b = board_a();
    assert!(!is_legal(&b, 0, cell(1, 0)));
    assert!(!is_legal(&b, MAX_TILE + 1, cell(1, 0)));
    assert!(!is_legal(&b, 6, 16));
}

#[test]
fn apply_place_writes_the_grid() {
    let state = two_board_state();
    let applied = apply_move(&state, Move::Place { cell: cell(0, 1) }, 6).expect("legal place");
    assert_eq!(applied.state.boards[0].get(cell(0, 1)), 6);
    assert!(!applied.extra_turn);
    // Source state untouched
    assert_eq!(state.boards[0].get(cell(0, 1)), 0);
}

#[test]
fn apply_place_rejects_occupied_and_illegal() {
    let state = two_board_state();
    assert!(apply_move(&state, Move::Place { cell: cell(0, 0) }, 6).is_err());
    assert!(apply_move(&state, Move::Place { cell: cell(0, 1) }, 4).is_err());
}

#[test]
fn apply_swap_pushes_old_tile_to_table() {
    let state = two_board_state();
    let mv = Move::Swap {
        cell: cell(0, 0),
        old: 5,
    };
    let applied = apply_move(&state, mv, 3).expect("legal swap");
    assert_eq!(applied.state.boards[0].get(cell(0, 0)), 3);
    assert_eq!(applied.state.table.last().copied(), Some(5));
    assert_eq!(applied.state.table.len(), state.table.len() + 1);
}

#[test]
fn apply_swap_rejects_mismatched_old_tile() {
    let state = two_board_state();
    let mv = Move::Swap {
        cell: cell(0, 0),
        old: 9,
    };
    assert!(apply_move(&state, mv, 3).is_err());
}

#[test]
fn apply_discard_touches_only_the_table() {
    let state = two_board_state();
    let applied = apply_move(&state, Move::Discard, 13).expect("discard is always valid");
    assert_eq!(applied.state.table.last().copied(), Some(13));
    assert_eq!(applied.state.boards[0], state.boards[0]);
    assert!(!applied.extra_turn);
}

#[test]
fn bruno_matches_any_diagonal() {
    // A 7 in the middle, matched from each of the four diagonal corners.
    for (r, c) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
        let mut b = Board::new(false);
        b.set(cell(1, 1), 7);
        b.set(cell(r, c), 7);
        assert!(bruno_match(&b, cell(1, 1)), "diagonal at ({r},{c})");
    }

    let mut b = Board::new(false);
    b.set(cell(1, 1), 7);
    b.set(cell(1, 2), 7); // orthogonal, not diagonal
    b.set(cell(0, 0), 6);
    assert!(!bruno_match(&b, cell(1, 1)));
}

#[test]
fn bruno_grants_extra_turn_only_when_enabled() {
    let mut board = Board::new(false);
    board.set(cell(0, 0), 7);
    let mk_state = |rules: Rules| {
        GameState::from_parts(
            rules,
            Heuristics::default(),
            vec![board],
            Vec::new(),
            DrawPile::empty(),
            0,
        )
    };

    let on = apply_move(
        &mk_state(Rules::new(true, 1)),
        Move::Place { cell: cell(1, 1) },
        7,
    )
    .expect("legal place");
    assert!(on.extra_turn);

    let off = apply_move(
        &mk_state(Rules::default()),
        Move::Place { cell: cell(1, 1) },
        7,
    )
    .expect("legal place");
    assert!(!off.extra_turn);
}

#[test]
fn full_grid_ends_game_and_suppresses_extra_turn() {
    // One hole at (3,3); the 16 that fills it also matches the diagonal 16.
    let board = Board::from_rows(
        [[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 16, 12], [13, 14, 15, 0]],
        false,
    );
    let state = GameState::from_parts(
        Rules::new(true, 1),
        Heuristics::default(),
        vec![board],
        Vec::new(),
        DrawPile::empty(),
        0,
    );
    let applied = apply_move(&state, Move::Place { cell: cell(3, 3) }, 16).expect("legal place");
    assert!(applied.state.is_terminal());
    assert!(!applied.extra_turn);
}
