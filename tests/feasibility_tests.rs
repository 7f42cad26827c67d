use unlucky::{
    is_feasible, is_legal, rc_to_idx, Board, DrawPile, GameState, Heuristics, RemainingCounts,
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

/// Two boards, one-set supply: both 19s and both 20s are locked into grids.
fn two_board_state() -> GameState {
    GameState::from_parts(
        Rules::default(),
        Heuristics::default(),
        vec![board_a(), board_b()],
        vec![7, 5, 17, 4, 10],
        DrawPile::empty(),
        1,
    )
}

fn cell(r: u8, c: u8) -> u8 {
    rc_to_idx(r, c).expect("in bounds")
}

#[test]
fn remaining_counts_follow_the_supply_invariant() {
    let state = two_board_state();
    let remaining = RemainingCounts::for_state(&state);

    // Both 19s sit on the first board; every 20 is on some grid.
    assert_eq!(remaining.count(19), 0);
    assert_eq!(remaining.count(20), 0);
    // 18 is still fully obtainable.
    assert_eq!(remaining.count(18), 2);
    // One 7 placed, one loose.
    assert_eq!(remaining.count(7), 1);
}

#[test]
fn missing_intermediate_tiles_break_the_outward_path() {
    let state = two_board_state();
    let board = state.current_board();
    let mut remaining = RemainingCounts::for_state(&state);
    remaining.take(18);

    // 18 at (0,3) needs a 19 between it and the 20 below; none are left.
    assert!(is_legal(board, 18, cell(0, 3)));
    assert!(!is_feasible(board, cell(0, 3), 18, &remaining));

    // Directly above the 20 no intermediate value is needed.
    assert!(is_feasible(board, cell(2, 3), 18, &remaining));
}

#[test]
fn feasibility_implies_legality() {
    let state = two_board_state();
    let remaining = RemainingCounts::for_state(&state);
    for board in [&board_a(), &board_b()] {
        for tile in 1..=MAX_TILE {
            let mut r = remaining;
            r.take(tile);
            for idx in 0..16 {
                if !is_legal(board, tile, idx) {
                    assert!(
                        !is_feasible(board, idx, tile, &r),
                        "tile {tile} at cell {idx}"
                    );
                }
            }
        }
    }
}

#[test]
fn exhausted_high_values_make_legal_cells_infeasible() {
    // Single board, single set: the lone 19 and 20 are already placed.
    let board = Board::from_rows(
        [[0, 0, 0, 0], [0, 0, 0, 0], [19, 0, 0, 0], [0, 0, 0, 20]],
        false,
    );
    let state = GameState::from_parts(
        Rules::default(),
        Heuristics::default(),
        vec![board],
        Vec::new(),
        DrawPile::empty(),
        0,
    );
    let mut remaining = RemainingCounts::for_state(&state);
    remaining.take(18);

    // (3,0): the cell between 18 and the row's 20 can never be filled.
    assert!(is_legal(&board, 18, cell(3, 0)));
    assert!(!is_feasible(&board, cell(3, 0), 18, &remaining));

    // (3,2): 20 sits immediately outward, no gap to cover.
    assert!(is_feasible(&board, cell(3, 2), 18, &remaining));
}

#[test]
fn running_minimum_cannot_pass_the_top_tile() {
    // Empty single-player board with a full supply: 19 placed too far from
    // the edge would need a 21 below it.
    let board = Board::new(false);
    let state = GameState::from_parts(
        Rules::default(),
        Heuristics::default(),
        vec![board],
        Vec::new(),
        DrawPile::empty(),
        0,
    );
    let mut remaining = RemainingCounts::for_state(&state);
    remaining.take(19);

    assert!(!is_feasible(&board, cell(1, 0), 19, &remaining));
    assert!(is_feasible(&board, cell(2, 2), 19, &remaining));
}

#[test]
fn ledger_take_and_give_back_are_bounded() {
    let state = two_board_state();
    let mut remaining = RemainingCounts::for_state(&state);

    remaining.take(19); // already zero
    assert_eq!(remaining.count(19), 0);
    remaining.give_back(19);
    assert_eq!(remaining.count(19), 1);

    remaining.take(0);
    remaining.give_back(0);
    assert_eq!(remaining.count(0), 0);
}
