//! In-memory Q-table repository for testing.

use std::{cell::RefCell, collections::HashMap, path::Path, rc::Rc};

use crate::{
    Result,
    error::Error,
    ports::QTableRepository,
    q_learning::{QTable, SavedQTable},
};

/// Stores encoded tables in a shared map keyed by path, without touching disk.
///
/// Tables go through the same MessagePack encoding as
/// [`MsgPackRepository`](super::MsgPackRepository). Clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of tables currently stored.
    pub fn count(&self) -> usize {
        self.storage.borrow().len()
    }

    /// Check if a table exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage
            .borrow()
            .contains_key(path.to_string_lossy().as_ref())
    }
}

impl QTableRepository for InMemoryRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(&SavedQTable::from_table(table)).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table for in-memory storage".to_string(),
                message: e.to_string(),
            }
        })?;

        let _ = self
            .storage
            .borrow_mut()
            .insert(path.to_string_lossy().to_string(), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        let storage = self.storage.borrow();
        let bytes = storage
            .get(path.to_string_lossy().as_ref())
            .ok_or_else(|| Error::NotFound {
                path: path.to_path_buf(),
            })?;

        let saved: SavedQTable =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize Q-table from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        saved.into_table()
    }
}
