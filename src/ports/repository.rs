//! Repository port for Q-table persistence.

use std::path::Path;

use crate::{Error, Result, q_learning::QTable};

/// Port for persisting and loading Q-tables.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use xo_qlearn::{adapters::MsgPackRepository, ports::QTableRepository, q_learning::QTable};
///
/// let repo = MsgPackRepository::new();
/// let table = repo
///     .load_if_exists(Path::new("q_table.msgpack"))?
///     .unwrap_or_default();
/// repo.save(&table, Path::new("q_table.msgpack"))?;
/// # Ok::<(), xo_qlearn::Error>(())
/// ```
pub trait QTableRepository {
    /// Save the whole table, replacing whatever was stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or encoding fails.
    fn save(&self, table: &QTable, path: &Path) -> Result<()>;

    /// Load a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) when nothing is
    /// stored at `path`, and other variants when the data cannot be read or
    /// decoded.
    fn load(&self, path: &Path) -> Result<QTable>;

    /// Like [`load`](Self::load), but `Ok(None)` when nothing is stored at `path`.
    fn load_if_exists(&self, path: &Path) -> Result<Option<QTable>> {
        match self.load(path) {
            Ok(table) => Ok(Some(table)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
