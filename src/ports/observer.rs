//! Observer port - abstraction for training observation
//!
//! Lets progress reporting and metrics hook into the training loop without
//! the loop knowing about any output format.

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. `on_episode_end(episode, outcome)` - after every episode, `episode` is 1-based
/// 3. `on_training_end()` - once at the end
///
/// # Examples
///
/// ```no_run
/// use xo_qlearn::{ports::Observer, tictactoe::GameOutcome};
///
/// struct CountingObserver {
///     episodes: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> xo_qlearn::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its outcome (X is the learning agent).
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
