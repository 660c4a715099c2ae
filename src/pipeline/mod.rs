//! Training pipeline
//!
//! Runs episodes of the learning agent against a random opponent and
//! reports progress through observers.

pub mod observers;
pub mod opponent;
pub mod training;

pub use observers::ProgressObserver;
pub use opponent::RandomOpponent;
pub use training::{
    AGENT_PLAYER, TrainingConfig, TrainingPipeline, TrainingResult, play_episode,
};

pub use crate::ports::Observer;
