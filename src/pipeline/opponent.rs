//! The non-learning opponent used during training

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::tictactoe::{Action, Board};

/// Plays a uniformly random empty cell
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    /// Create a new random opponent
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random opponent with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Pick a move, or `None` on a full board
    pub fn select_move(&mut self, board: &Board) -> Option<Action> {
        board.available_moves().choose(&mut self.rng).copied()
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}
