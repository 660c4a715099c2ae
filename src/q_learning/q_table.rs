//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::tictactoe::{Action, State};

/// Q-table mapping (state, action) pairs to Q-values.
///
/// Only pairs that have been written are stored. Every other pair reads as
/// `0.0` through [`QTable::get`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    q_values: HashMap<(State, Action), f64>,
}

impl QTable {
    /// Value reported for pairs that were never written
    pub const DEFAULT_Q: f64 = 0.0;

    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for a state-action pair, if one was ever written
    pub fn lookup(&self, state: &State, action: Action) -> Option<f64> {
        self.q_values.get(&(*state, action)).copied()
    }

    /// Get Q-value for a state-action pair, `0.0` when unseen
    pub fn get(&self, state: &State, action: Action) -> f64 {
        self.lookup(state, action).unwrap_or(Self::DEFAULT_Q)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: State, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Get maximum Q-value over the given actions, `0.0` when there are none
    pub fn max_q(&self, state: &State, actions: &[Action]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
            .unwrap_or(Self::DEFAULT_Q)
    }

    /// Every action whose Q-value equals the maximum over `actions`.
    ///
    /// Order follows `actions`. Empty when `actions` is empty.
    pub fn best_actions(&self, state: &State, actions: &[Action]) -> Vec<Action> {
        let q_values: Vec<f64> = actions.iter().map(|&a| self.get(state, a)).collect();
        let Some(max_q) = q_values.iter().copied().reduce(f64::max) else {
            return Vec::new();
        };
        actions
            .iter()
            .zip(&q_values)
            .filter(|&(_, &q)| q == max_q)
            .map(|(&action, _)| action)
            .collect()
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// An empty `next_actions` marks a terminal transition (max term is 0).
    #[allow(clippy::too_many_arguments)]
    pub fn q_learning_update(
        &mut self,
        state: State,
        action: Action,
        reward: f64,
        next_state: &State,
        next_actions: &[Action],
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current_q = self.get(&state, action);
        let max_next_q = self.max_q(next_state, next_actions);
        let td_target = reward + discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Iterate over explicitly stored entries
    pub fn iter(&self) -> impl Iterator<Item = (&State, Action, f64)> {
        self.q_values
            .iter()
            .map(|((state, action), &value)| (state, *action, value))
    }
}

impl FromIterator<(State, Action, f64)> for QTable {
    fn from_iter<I: IntoIterator<Item = (State, Action, f64)>>(iter: I) -> Self {
        Self {
            q_values: iter
                .into_iter()
                .map(|(state, action, value)| ((state, action), value))
                .collect(),
        }
    }
}
