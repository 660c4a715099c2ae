//! Play command - a human (O) against the trained agent (X)

use std::io::{BufRead, Write};

use crate::{
    Error, Result,
    pipeline::AGENT_PLAYER,
    q_learning::{QLearningAgent, QTable},
    tictactoe::{Action, Board, GameOutcome, Move, Player},
};

/// The human always plays O and moves second.
pub const HUMAN_PLAYER: Player = Player::O;

pub const PROMPT: &str = "Enter your move (row col, 0-2): ";

/// Why a line of human input is not a move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("expected two numbers, got {0}")]
    WrongTokenCount(usize),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },
}

/// Parse `"row col"` into an [`Action`].
pub fn parse_move(line: &str) -> std::result::Result<Action, MoveParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [row, col] = tokens[..] else {
        return Err(MoveParseError::WrongTokenCount(tokens.len()));
    };

    let number = |token: &str| {
        token
            .parse::<usize>()
            .map_err(|_| MoveParseError::NotANumber(token.to_string()))
    };
    let (row, col) = (number(row)?, number(col)?);

    Action::new(row, col).ok_or(MoveParseError::OutOfRange { row, col })
}

/// One interactive game over arbitrary line-based I/O.
///
/// The table is only read; nothing is learned during play.
pub struct PlaySession<'a, R, W> {
    table: &'a QTable,
    agent: &'a mut QLearningAgent,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> PlaySession<'a, R, W> {
    pub fn new(table: &'a QTable, agent: &'a mut QLearningAgent, input: R, output: W) -> Self {
        Self {
            table,
            agent,
            input,
            output,
        }
    }

    /// Play until someone wins or the board fills, printing the board after
    /// every move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] if input ends mid-game, or an I/O
    /// error if writing fails.
    pub fn run(mut self) -> Result<GameOutcome> {
        writeln!(self.output, "Play Phase: ")?;
        let mut board = Board::new();

        loop {
            let state = board.state();
            let action = self
                .agent
                .select_greedy(self.table, &state, &board.available_moves())
                .ok_or(Error::NoValidMoves)?;
            let outcome = Move::new(action, AGENT_PLAYER).play(&mut board);
            write!(self.output, "{board}")?;
            if let Some(outcome) = outcome {
                return self.finish(outcome);
            }

            let action = self.read_human_move(&board)?;
            let outcome = Move::new(action, HUMAN_PLAYER).play(&mut board);
            write!(self.output, "{board}")?;
            if let Some(outcome) = outcome {
                return self.finish(outcome);
            }
        }
    }

    /// Prompt until the human enters a legal move.
    fn read_human_move(&mut self, board: &Board) -> Result<Action> {
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }

            match parse_move(&line) {
                Ok(action) if board.is_legal(action) => return Ok(action),
                Ok(action) => writeln!(self.output, "Cell {action} is already taken.")?,
                Err(e) => writeln!(self.output, "Invalid move: {e}.")?,
            }
        }
    }

    fn finish(&mut self, outcome: GameOutcome) -> Result<GameOutcome> {
        let message = match outcome {
            GameOutcome::Win(player) if player == AGENT_PLAYER => "Agent wins!",
            GameOutcome::Win(_) => "You win!",
            GameOutcome::Draw => "It's a tie!",
        };
        writeln!(self.output, "{message}")?;
        Ok(outcome)
    }
}
