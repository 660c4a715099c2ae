//! Run configuration assembled from command-line arguments

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{pipeline::TrainingConfig, q_learning::LearningParams};

/// Default location of the persisted Q-table
pub const DEFAULT_Q_TABLE_PATH: &str = "q_table.msgpack";

/// Everything one load → train → save → play run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Where the Q-table is loaded from and saved to
    pub q_table: PathBuf,

    /// Episode count and seed
    pub training: TrainingConfig,

    /// α, γ and the training ε
    pub learning: LearningParams,

    /// Whether to show a progress bar while training
    pub progress: bool,

    /// Whether to start an interactive game after training
    pub play: bool,

    /// Optional JSON file for the training summary
    pub summary: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            q_table: PathBuf::from(DEFAULT_Q_TABLE_PATH),
            training: TrainingConfig::default(),
            learning: LearningParams::default(),
            progress: true,
            play: true,
            summary: None,
        }
    }
}
