//! Reward shaping for one agent step.
//!
//! Every agent move is followed (unless the game ended) by one opponent
//! reply; the pair is scored as a single step from the agent's side.

use crate::tictactoe::{GameOutcome, Player};

/// Reward for completing a line.
pub const WIN_REWARD: f64 = 1.0;
/// Reward when the board fills without a winner, whoever moved last.
pub const DRAW_REWARD: f64 = 0.5;
/// Reward charged to the agent's move when the opponent's reply wins.
pub const LOSS_REWARD: f64 = -1.0;
/// Reward while the game continues.
pub const STEP_REWARD: f64 = 0.0;

/// How an agent step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent's own move completed a line.
    AgentWon,
    /// The agent's move filled the board.
    AgentDrew,
    /// The opponent's reply completed a line.
    OpponentWon,
    /// The opponent's reply filled the board.
    OpponentDrew,
    /// Neither move ended the game.
    Continue,
}

impl StepOutcome {
    pub fn reward(self) -> f64 {
        match self {
            StepOutcome::AgentWon => WIN_REWARD,
            StepOutcome::AgentDrew | StepOutcome::OpponentDrew => DRAW_REWARD,
            StepOutcome::OpponentWon => LOSS_REWARD,
            StepOutcome::Continue => STEP_REWARD,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != StepOutcome::Continue
    }

    /// Final game outcome for a terminal step, with the agent playing `agent`
    pub fn game_outcome(self, agent: Player) -> Option<GameOutcome> {
        match self {
            StepOutcome::AgentWon => Some(GameOutcome::Win(agent)),
            StepOutcome::OpponentWon => Some(GameOutcome::Win(agent.opponent())),
            StepOutcome::AgentDrew | StepOutcome::OpponentDrew => Some(GameOutcome::Draw),
            StepOutcome::Continue => None,
        }
    }
}
