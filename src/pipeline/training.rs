//! Training loop: the learning agent (X) against a random opponent (O)

use serde::{Deserialize, Serialize};

use super::opponent::RandomOpponent;
use crate::{
    Error, Result,
    ports::Observer,
    q_learning::{QLearningAgent, QTable, StepOutcome, Transition},
    tictactoe::{Board, GameOutcome, Move, Player},
};

/// The learning agent always plays X and moves first.
pub const AGENT_PLAYER: Player = Player::X;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Random seed; the opponent uses `seed + 1`
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 15_000,
            seed: None,
        }
    }
}

/// Result of a training run, counted from the agent's side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,

    /// Explicit Q-table entries after training
    pub q_table_size: usize,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(
        total_games: usize,
        wins: usize,
        draws: usize,
        losses: usize,
        q_table_size: usize,
    ) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
            q_table_size,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Training pipeline for the Q-learning agent against a random opponent
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run every configured episode, updating `table` after each agent move.
    ///
    /// With zero episodes the table is left untouched.
    pub fn run(
        &mut self,
        table: &mut QTable,
        agent: &mut QLearningAgent,
        opponent: &mut RandomOpponent,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
            opponent.set_rng_seed(seed.wrapping_add(1));
        }

        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 1..=self.config.episodes {
            let outcome = play_episode(table, agent, opponent)?;

            match outcome {
                GameOutcome::Win(winner) if winner == AGENT_PLAYER => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                GameOutcome::Draw => draws += 1,
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            wins,
            draws,
            losses,
            table.len(),
        ))
    }
}

/// Play one episode from an empty board and return its outcome.
///
/// Each agent move, together with the opponent's reply when the game is not
/// already over, is one step and gets exactly one TD update. The opponent's
/// moves are never learned from.
pub fn play_episode(
    table: &mut QTable,
    agent: &mut QLearningAgent,
    opponent: &mut RandomOpponent,
) -> Result<GameOutcome> {
    let mut board = Board::new();

    loop {
        let state = board.state();
        let legal_actions = board.available_moves();
        let action = agent
            .select_action(table, &state, &legal_actions)
            .ok_or(Error::NoValidMoves)?;

        let step = match Move::new(action, AGENT_PLAYER).play(&mut board) {
            Some(GameOutcome::Win(_)) => StepOutcome::AgentWon,
            Some(GameOutcome::Draw) => StepOutcome::AgentDrew,
            None => opponent_reply(&mut board, opponent)?,
        };

        let next_actions = if step.is_terminal() {
            Vec::new()
        } else {
            board.available_moves()
        };

        agent.update(
            table,
            &Transition {
                state,
                action,
                reward: step.reward(),
                next_state: board.state(),
                next_actions,
            },
        );

        if let Some(outcome) = step.game_outcome(AGENT_PLAYER) {
            return Ok(outcome);
        }
    }
}

fn opponent_reply(board: &mut Board, opponent: &mut RandomOpponent) -> Result<StepOutcome> {
    let reply = opponent.select_move(board).ok_or(Error::NoValidMoves)?;
    Ok(match Move::new(reply, AGENT_PLAYER.opponent()).play(board) {
        Some(GameOutcome::Win(_)) => StepOutcome::OpponentWon,
        Some(GameOutcome::Draw) => StepOutcome::OpponentDrew,
        None => StepOutcome::Continue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        q_learning::{
            LearningParams,
            reward::{DRAW_REWARD, LOSS_REWARD, WIN_REWARD},
        },
        tictactoe::{Action, CELL_COUNT, Cell, State},
    };

    fn seeded_agent(seed: u64) -> QLearningAgent {
        QLearningAgent::new(LearningParams::default())
            .unwrap()
            .with_seed(seed)
    }

    fn learner(
        learning_rate: f64,
        discount_factor: f64,
        epsilon: f64,
        seed: u64,
    ) -> QLearningAgent {
        QLearningAgent::new(
            LearningParams::default()
                .with_learning_rate(learning_rate)
                .with_discount_factor(discount_factor)
                .with_epsilon(epsilon),
        )
        .unwrap()
        .with_seed(seed)
    }

    fn count(state: &State, mark: Cell) -> usize {
        state.cells().iter().filter(|&&cell| cell == mark).count()
    }

    fn occupied(state: &State) -> usize {
        CELL_COUNT - count(state, Cell::Empty)
    }

    fn outcome_reward(outcome: GameOutcome) -> f64 {
        match outcome {
            GameOutcome::Win(winner) if winner == AGENT_PLAYER => WIN_REWARD,
            GameOutcome::Win(_) => LOSS_REWARD,
            GameOutcome::Draw => DRAW_REWARD,
        }
    }

    fn is_loss(outcome: GameOutcome) -> bool {
        matches!(outcome, GameOutcome::Win(winner) if winner != AGENT_PLAYER)
    }

    fn all_states() -> impl Iterator<Item = State> {
        (0..3usize.pow(CELL_COUNT as u32)).map(|mut code| {
            let mut cells = [Cell::Empty; CELL_COUNT];
            for cell in &mut cells {
                *cell = match code % 3 {
                    0 => Cell::Empty,
                    1 => Cell::X,
                    _ => Cell::O,
                };
                code /= 3;
            }
            State(cells)
        })
    }

    const X_TO_MOVE_MARKER: f64 = 100.0;
    const O_TO_MOVE_MARKER: f64 = 50.0;

    /// Every legal action of every board preset to a marker chosen by whose
    /// turn it is, so a bootstrapped value shows which state it read.
    fn marked_table() -> QTable {
        all_states()
            .flat_map(|state| {
                let (x, o) = (count(&state, Cell::X), count(&state, Cell::O));
                let marker = if x == o {
                    Some(X_TO_MOVE_MARKER)
                } else if x == o + 1 {
                    Some(O_TO_MOVE_MARKER)
                } else {
                    None
                };
                Board::from_cells(state.0)
                    .available_moves()
                    .into_iter()
                    .filter_map(move |action| marker.map(|value| (state, action, value)))
            })
            .collect()
    }

    #[test]
    fn test_default_episode_count() {
        assert_eq!(TrainingConfig::default().episodes, 15_000);
    }

    #[test]
    fn test_zero_episodes_leaves_table_unchanged() {
        let mut table = QTable::new();
        table.set(Board::new().state(), Action::new(1, 1).unwrap(), 0.3);
        let before = table.clone();

        let mut pipeline = TrainingPipeline::new(TrainingConfig::default().with_episodes(0));
        let result = pipeline
            .run(&mut table, &mut seeded_agent(1), &mut RandomOpponent::with_seed(2))
            .unwrap();

        assert_eq!(table, before);
        assert_eq!(result.total_games, 0);
        assert_eq!(result.win_rate, 0.0);
    }

    #[test]
    fn test_single_episode_updates_agent_moves_only() {
        let mut table = QTable::new();
        let outcome = play_episode(
            &mut table,
            &mut seeded_agent(3),
            &mut RandomOpponent::with_seed(4),
        )
        .unwrap();

        // The agent moves at most five times, and every stored key is a
        // state with X to move (equal counts of X and O).
        assert!(!table.is_empty() && table.len() <= 5);
        for (state, action, _) in table.iter() {
            let board = Board::from_cells(*state.cells());
            let x = state.cells().iter().filter(|&&c| c == Cell::X).count();
            let o = state.cells().iter().filter(|&&c| c == Cell::O).count();
            assert_eq!(x, o);
            assert!(board.is_legal(action));
        }
        assert!(matches!(outcome, GameOutcome::Win(_) | GameOutcome::Draw));
    }

    #[test]
    fn test_outcomes_add_up() {
        let mut table = QTable::new();
        let mut pipeline =
            TrainingPipeline::new(TrainingConfig::default().with_episodes(200).with_seed(9));
        let result = pipeline
            .run(&mut table, &mut seeded_agent(0), &mut RandomOpponent::new())
            .unwrap();

        assert_eq!(result.wins + result.draws + result.losses, 200);
        assert_eq!(result.q_table_size, table.len());
        assert!((result.win_rate + result.draw_rate + result.loss_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let mut table = QTable::new();
            let mut pipeline =
                TrainingPipeline::new(TrainingConfig::default().with_episodes(50).with_seed(21));
            pipeline
                .run(&mut table, &mut seeded_agent(0), &mut RandomOpponent::new())
                .unwrap();
            table
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_terminal_reward_lands_on_last_agent_move() {
        let mut losses = 0;
        for seed in 0..200 {
            let mut table = QTable::new();
            let outcome = play_episode(
                &mut table,
                &mut learner(1.0, 0.0, 0.1, seed),
                &mut RandomOpponent::with_seed(seed + 1),
            )
            .unwrap();
            if is_loss(outcome) {
                losses += 1;
            }

            // With α = 1 and γ = 0 every stored value is exactly its step reward.
            let last_decision = table.iter().map(|(state, _, _)| occupied(state)).max();
            let rewarded: Vec<_> = table.iter().filter(|&(_, _, value)| value != 0.0).collect();
            assert_eq!(rewarded.len(), 1, "seed {seed}");
            let (state, _, value) = rewarded[0];
            assert_eq!(value, outcome_reward(outcome), "seed {seed}");
            assert_eq!(Some(occupied(state)), last_decision, "seed {seed}");
        }
        assert!(losses > 0);
    }

    #[test]
    fn test_bootstrap_reads_state_after_opponent_reply() {
        let mut losses = 0;
        for seed in 0..40 {
            let mut table = marked_table();
            let outcome = play_episode(
                &mut table,
                &mut learner(1.0, 0.9, 1.0, seed),
                &mut RandomOpponent::with_seed(seed + 1),
            )
            .unwrap();
            if is_loss(outcome) {
                losses += 1;
            }

            let mut updated: Vec<(State, f64)> = table
                .iter()
                .filter(|(state, _, value)| {
                    count(state, Cell::X) == count(state, Cell::O) && *value != X_TO_MOVE_MARKER
                })
                .map(|(state, _, value)| (*state, value))
                .collect();
            updated.sort_by_key(|(state, _)| occupied(state));
            let (terminal, continuing) = updated.split_last().unwrap();

            // Continuing steps bootstrap from the board after O's reply (X to
            // move), never from the board right after X's own move.
            for &(state, value) in continuing {
                assert!(
                    (value - 0.9 * X_TO_MOVE_MARKER).abs() < 1e-9,
                    "seed {seed}: {value} at\n{}",
                    Board::from_cells(state.0)
                );
            }
            // Terminal steps have no successor actions, whatever cells remain.
            assert!(
                (terminal.1 - outcome_reward(outcome)).abs() < 1e-9,
                "seed {seed}: {} for {outcome:?}",
                terminal.1
            );
        }
        assert!(losses > 0);
    }
}
