//! Epsilon-greedy Q-learning agent
//!
//! The agent holds the hyperparameters and its own RNG. The Q-table is
//! passed in on every call so that training can mutate it and play can
//! read it without the agent owning it.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    q_learning::q_table::QTable,
    tictactoe::{Action, State},
};

/// Learning hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningParams {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate ε used while training
    pub epsilon: f64,
}

impl LearningParams {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check that α ∈ (0, 1], γ ∈ [0, 1] and ε ∈ [0, 1].
    pub fn validate(&self) -> Result<()> {
        let invalid = |name: &str, value: f64, range: &str| Error::InvalidConfiguration {
            message: format!("{name} must be in {range}, got {value}"),
        };

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid("learning rate", self.learning_rate, "(0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(invalid("discount factor", self.discount_factor, "[0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid("epsilon", self.epsilon, "[0, 1]"));
        }
        Ok(())
    }
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 0.1,
        }
    }
}

/// One agent step as seen by the TD update.
///
/// `next_actions` is empty for terminal steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: State,
    pub action: Action,
    pub reward: f64,
    pub next_state: State,
    pub next_actions: Vec<Action>,
}

/// Q-learning agent (off-policy TD control)
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    params: LearningParams,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `params` are out of range.
    pub fn new(params: LearningParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            rng: StdRng::from_rng(&mut rand::rng()),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    /// Reseed the exploration and tie-break RNG
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// ε-greedy selection with the training exploration rate
    pub fn select_action(
        &mut self,
        table: &QTable,
        state: &State,
        legal_actions: &[Action],
    ) -> Option<Action> {
        self.select_action_epsilon_greedy(table, state, legal_actions, self.params.epsilon)
    }

    /// Pure exploitation (ε = 0), used when playing
    pub fn select_greedy(
        &mut self,
        table: &QTable,
        state: &State,
        legal_actions: &[Action],
    ) -> Option<Action> {
        self.select_action_epsilon_greedy(table, state, legal_actions, 0.0)
    }

    /// With probability `epsilon` pick any legal action; otherwise pick
    /// uniformly among the actions sharing the highest Q-value.
    ///
    /// Returns `None` only when `legal_actions` is empty.
    pub fn select_action_epsilon_greedy(
        &mut self,
        table: &QTable,
        state: &State,
        legal_actions: &[Action],
        epsilon: f64,
    ) -> Option<Action> {
        if epsilon > 0.0 && self.rng.random::<f64>() < epsilon {
            // Explore: random action
            return legal_actions.choose(&mut self.rng).copied();
        }

        // Exploit: random among ties so no cell is favoured by scan order
        table
            .best_actions(state, legal_actions)
            .choose(&mut self.rng)
            .copied()
    }

    /// Apply one Q-learning update for `transition` and return the new value.
    pub fn update(&self, table: &mut QTable, transition: &Transition) -> f64 {
        table.q_learning_update(
            transition.state,
            transition.action,
            transition.reward,
            &transition.next_state,
            &transition.next_actions,
            self.params.learning_rate,
            self.params.discount_factor,
        )
    }
}
