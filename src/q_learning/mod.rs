//! Tabular Q-learning
//!
//! Off-policy TD control over `(State, Action)` pairs:
//!
//! `Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]`
//!
//! ## Usage Example
//!
//! ```
//! use xo_qlearn::q_learning::{LearningParams, QLearningAgent, QTable};
//! use xo_qlearn::tictactoe::Board;
//!
//! let mut agent = QLearningAgent::new(LearningParams::default())?.with_seed(7);
//! let table = QTable::new();
//!
//! let board = Board::new();
//! let action = agent.select_greedy(&table, &board.state(), &board.available_moves());
//! assert!(action.is_some());
//! # Ok::<(), xo_qlearn::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod reward;
pub mod serialization;

pub use agent::{LearningParams, QLearningAgent, Transition};
pub use q_table::QTable;
pub use reward::StepOutcome;
pub use serialization::{SavedEntry, SavedQTable};
