//! On-disk layout of a persisted Q-table.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    q_learning::q_table::QTable,
    tictactoe::{Action, State},
};

/// One explicitly stored Q-value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub state: State,
    pub action: Action,
    pub value: f64,
}

/// Versioned snapshot of a [`QTable`].
///
/// Only written pairs are stored; the default of `0.0` for everything else
/// is restored by the table's accessors after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub entries: Vec<SavedEntry>,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn from_table(table: &QTable) -> Self {
        let mut entries: Vec<SavedEntry> = table
            .iter()
            .map(|(&state, action, value)| SavedEntry {
                state,
                action,
                value,
            })
            .collect();
        // HashMap order is random; sort so identical tables encode identically.
        entries.sort_by(|a, b| {
            let key = |e: &SavedEntry| (e.state.cells().map(|c| c as u8), e.action);
            key(a).cmp(&key(b))
        });

        Self {
            version: Self::VERSION,
            entries,
        }
    }

    pub fn into_table(self) -> Result<QTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        self.entries
            .into_iter()
            .map(|entry| {
                // Action fields are private but serde can still fill them with anything.
                Action::new(entry.action.row(), entry.action.col())
                    .map(|action| (entry.state, action, entry.value))
                    .ok_or_else(|| Error::SerializationContext {
                        operation: "restore Q-table".to_string(),
                        message: format!("stored action {} is off the board", entry.action),
                    })
            })
            .collect()
    }
}
