//! Tabular Q-learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - A 3x3 board with incremental win detection
//! - A Q-table over `(state, action)` pairs with MessagePack persistence
//! - An epsilon-greedy Q-learning agent trained against a random opponent
//! - An interactive console game against the trained agent

pub mod adapters;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
