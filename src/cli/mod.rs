//! Command-line layer: argument parsing, console output and the
//! interactive game.

pub mod commands;
pub mod config;
pub mod output;
