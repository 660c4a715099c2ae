//! Run command - load the Q-table, train, save it, then play a human

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::{
        commands::play::PlaySession,
        config::{DEFAULT_Q_TABLE_PATH, RunConfig},
        output::{format_number, format_percent, write_kv, write_section},
    },
    pipeline::{ProgressObserver, RandomOpponent, TrainingConfig, TrainingPipeline, TrainingResult},
    ports::QTableRepository,
    q_learning::{LearningParams, QLearningAgent, QTable},
    tictactoe::GameOutcome,
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent against a random opponent, then play it")]
pub struct RunArgs {
    /// Q-table file, loaded before training and overwritten after it
    #[arg(long, default_value = DEFAULT_Q_TABLE_PATH)]
    pub q_table: PathBuf,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 15_000)]
    pub episodes: usize,

    /// Learning rate α
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Exploration rate ε during training
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the training progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Stop after saving instead of starting a game
    #[arg(long)]
    pub skip_play: bool,

    /// Write a JSON training summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl RunArgs {
    pub fn into_config(self) -> RunConfig {
        let mut training = TrainingConfig::default().with_episodes(self.episodes);
        training.seed = self.seed;

        RunConfig {
            q_table: self.q_table,
            training,
            learning: LearningParams::default()
                .with_learning_rate(self.alpha)
                .with_discount_factor(self.gamma)
                .with_epsilon(self.epsilon),
            progress: !self.no_progress,
            play: !self.skip_play,
            summary: self.summary,
        }
    }
}

/// What a run produced
#[derive(Debug)]
pub struct RunReport {
    pub training: TrainingResult,
    pub game: Option<GameOutcome>,
}

/// Entry point used by the binary: console I/O on stdin/stdout.
pub fn execute(args: RunArgs) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&args.into_config(), stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Load → train → save → play.
pub fn run<R: BufRead, W: Write>(config: &RunConfig, input: R, mut output: W) -> Result<RunReport> {
    // Seeding, when configured, happens inside the training pipeline.
    let mut agent = QLearningAgent::new(config.learning).context("Invalid learning parameters")?;

    let repository = MsgPackRepository::new();
    let mut table = load_table(&repository, config, &mut output)?;

    writeln!(output, "Training start...")?;
    let mut pipeline = TrainingPipeline::new(config.training.clone());
    if config.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    let training = pipeline
        .run(&mut table, &mut agent, &mut RandomOpponent::new())
        .context("Training failed")?;
    writeln!(output, "Training complete.")?;
    write_training_summary(&mut output, &training)?;

    repository
        .save(&table, &config.q_table)
        .with_context(|| format!("Failed to save Q-table to {}", config.q_table.display()))?;
    writeln!(output, "Q-table saved to {}", config.q_table.display())?;

    if let Some(path) = &config.summary {
        training
            .save(path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        writeln!(output, "Summary written to {}", path.display())?;
    }

    let game = if config.play {
        Some(PlaySession::new(&table, &mut agent, input, &mut output).run()?)
    } else {
        None
    };

    Ok(RunReport { training, game })
}

fn load_table<R: QTableRepository, W: Write>(
    repository: &R,
    config: &RunConfig,
    output: &mut W,
) -> Result<QTable> {
    let loaded = repository
        .load_if_exists(&config.q_table)
        .with_context(|| format!("Failed to load Q-table from {}", config.q_table.display()))?;

    match loaded {
        Some(table) => {
            writeln!(
                output,
                "Q-table loaded from {} ({} entries)",
                config.q_table.display(),
                format_number(table.len())
            )?;
            Ok(table)
        }
        None => {
            writeln!(output, "Q-table file not found, starting with an empty Q-table.")?;
            Ok(QTable::new())
        }
    }
}

fn write_training_summary<W: Write>(output: &mut W, result: &TrainingResult) -> Result<()> {
    write_section(output, "Training Summary")?;
    write_kv(output, "Episodes", &format_number(result.total_games))?;
    write_kv(
        output,
        "Wins",
        &format!("{} ({})", result.wins, format_percent(result.win_rate)),
    )?;
    write_kv(
        output,
        "Draws",
        &format!("{} ({})", result.draws, format_percent(result.draw_rate)),
    )?;
    write_kv(
        output,
        "Losses",
        &format!("{} ({})", result.losses, format_percent(result.loss_rate)),
    )?;
    write_kv(output, "Q-table entries", &format_number(result.q_table_size))?;
    Ok(())
}
