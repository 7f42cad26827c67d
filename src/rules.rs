#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rules {
    /// Bruno variant: a placed tile matching a diagonal neighbor grants an
    /// extra turn.
    pub bruno: bool,
    /// Analyze mode: board setup and drawn tiles are supplied by the
    /// operator instead of the shuffled pile, for studying positions.
    pub analyze: bool,
    /// Copies of each tile value contributed per player. The per-value supply
    /// for a game is `sets_per_player * player_count`.
    pub sets_per_player: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            bruno: false,
            analyze: false,
            sets_per_player: 1,
        }
    }
}

impl Rules {
    #[inline]
    pub const fn new(bruno: bool, sets_per_player: u8) -> Self {
        Self {
            bruno,
            analyze: false,
            sets_per_player,
        }
    }

    /// Two-sets-per-player ruleset (per-value supply of 2x player count).
    #[inline]
    pub const fn two_sets() -> Self {
        Self {
            bruno: false,
            analyze: false,
            sets_per_player: 2,
        }
    }

    /// Per-value tile supply for a game with `players` boards.
    #[inline]
    pub fn supply_per_value(&self, players: usize) -> u8 {
        self.sets_per_player.saturating_mul(players.min(u8::MAX as usize) as u8)
    }
}

/// Tunable constants of the scoring and recommendation heuristics.
///
/// Scores live in [0, 1] and are only meaningful relative to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heuristics {
    /// Falloff sharpness of the positional alignment term.
    pub alpha: f64,
    /// Required relative score improvement before a swap is offered.
    pub swap_margin: f64,
    /// Alignment below which a placed tile counts as weak (swap-out candidate).
    pub weak_threshold: f64,
    /// Minimum best-move score for a draw recommendation to be made at all.
    pub recommend_threshold: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            swap_margin: 0.10,
            weak_threshold: 0.25,
            recommend_threshold: 0.005,
        }
    }
}
