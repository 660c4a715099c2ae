//! Game outcomes and terminal checks shared by training and play

use serde::{Deserialize, Serialize};

use super::board::{Action, Board, Player};

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

impl Move {
    pub fn new(action: Action, player: Player) -> Self {
        Self { action, player }
    }

    /// Apply the move and report whether it ended the game.
    ///
    /// A completed line through the move wins for its player; otherwise a
    /// full board is a draw.
    pub fn play(self, board: &mut Board) -> Option<GameOutcome> {
        board.apply_move(self.action, self.player);
        if board.check_winner(self.action.row(), self.action.col(), self.player) {
            Some(GameOutcome::Win(self.player))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}
