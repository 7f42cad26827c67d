use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::rules::{Heuristics, Rules};
use crate::types::{Tile, BOARD_SIZE, EMPTY, MAX_TILE};

/// A committed action for one drawn tile.
///
/// `Swap` records the displaced occupant so the transition (and its undo in
/// analysis tooling) is self-describing; `Discard` touches only the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Place { cell: u8 },
    Swap { cell: u8, old: Tile },
    Discard,
}

impl Move {
    /// The grid cell this move writes to, if any.
    #[inline]
    pub fn cell(&self) -> Option<u8> {
        match *self {
            Move::Place { cell } | Move::Swap { cell, .. } => Some(cell),
            Move::Discard => None,
        }
    }
}

/// Face-down draw pile with defined draw/peek operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawPile {
    tiles: VecDeque<Tile>,
}

impl DrawPile {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_tiles<I: IntoIterator<Item = Tile>>(tiles: I) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// Full unshuffled supply: `sets_per_player * players` copies of each
    /// value 1..=MAX_TILE.
    pub fn full_supply(rules: &Rules, players: usize) -> Self {
        let copies = rules.supply_per_value(players);
        let mut tiles = VecDeque::with_capacity(copies as usize * MAX_TILE as usize);
        for _ in 0..copies {
            for v in 1..=MAX_TILE {
                tiles.push_back(v);
            }
        }
        Self { tiles }
    }

    #[inline]
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.tiles.make_contiguous().shuffle(rng);
    }

    /// Take the top tile. None when the pile is exhausted.
    #[inline]
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }

    /// Look at the top tile without drawing it.
    #[inline]
    pub fn peek(&self) -> Option<Tile> {
        self.tiles.front().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub boards: Vec<Board>,
    /// Face-up discards, available to any player.
    pub table: Vec<Tile>,
    pub draw: DrawPile,
    /// Index of the board whose turn it is.
    pub current: usize,
    pub rules: Rules,
    pub heuristics: Heuristics,
}

impl GameState {
    /// Fresh game: full shuffled pile, one board per entry of `ai_flags`,
    /// each board's main diagonal filled by drawing from the pile.
    pub fn new<R: Rng>(
        rules: Rules,
        heuristics: Heuristics,
        ai_flags: &[bool],
        rng: &mut R,
    ) -> Result<Self, String> {
        let players = ai_flags.len();
        if players == 0 || players > 4 {
            return Err(format!("player count {players} out of range (1..=4)"));
        }
        let mut draw = DrawPile::full_supply(&rules, players);
        draw.shuffle(rng);

        let mut boards = Vec::with_capacity(players);
        for &is_ai in ai_flags {
            let mut board = Board::new(is_ai);
            let mut diagonal = [EMPTY; BOARD_SIZE as usize];
            for slot in &mut diagonal {
                *slot = draw
                    .draw()
                    .ok_or_else(|| "draw pile exhausted during setup".to_string())?;
            }
            board.set_diagonal(diagonal);
            boards.push(board);
        }

        Ok(Self {
            boards,
            table: Vec::new(),
            draw,
            current: 0,
            rules,
            heuristics,
        })
    }

    /// Assemble a state from already-built parts (manual setup, snapshots,
    /// tests). No supply accounting is performed here.
    #[inline]
    pub fn from_parts(
        rules: Rules,
        heuristics: Heuristics,
        boards: Vec<Board>,
        table: Vec<Tile>,
        draw: DrawPile,
        current: usize,
    ) -> Self {
        Self {
            boards,
            table,
            draw,
            current,
            rules,
            heuristics,
        }
    }

    #[inline]
    pub fn current_board(&self) -> &Board {
        &self.boards[self.current]
    }

    #[inline]
    pub fn current_board_mut(&mut self) -> &mut Board {
        &mut self.boards[self.current]
    }

    /// Remove one copy of `tile` from the table. Returns false if absent.
    pub fn take_from_table(&mut self, tile: Tile) -> bool {
        if let Some(pos) = self.table.iter().position(|&v| v == tile) {
            self.table.remove(pos);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn discard_to_table(&mut self, tile: Tile) {
        self.table.push(tile);
    }

    #[inline]
    pub fn advance_turn(&mut self) {
        self.current = (self.current + 1) % self.boards.len();
    }

    /// The game ends as soon as any grid is completely filled.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.boards.iter().any(Board::is_full)
    }
}

/// Re-export minimal surface for callers as a free function to align with the
/// engine API.
#[inline]
pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}
