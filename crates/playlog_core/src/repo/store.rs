//! Store connection abstraction and its SQLite implementation.
//!
//! # Responsibility
//! - Hold the single process-wide connection between `open` and `close`.
//! - Run each unit of work inside one atomic scope.
//!
//! # Invariants
//! - A scope commits only when its work returns `Ok`; any error rolls back
//!   every write made inside it.
//! - `open` is idempotent and `close` on a closed store is a no-op.

use super::{RepoError, RepoResult};
use crate::db::{open_db, open_db_in_memory};
use log::{info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const MEMORY_LOCATION: &str = ":memory:";

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Private in-memory database; contents are lost on `close`.
    Memory,
}

impl StoreLocation {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path.as_path()),
            Self::Memory => None,
        }
    }
}

impl From<&str> for StoreLocation {
    fn from(value: &str) -> Self {
        if value.trim() == MEMORY_LOCATION {
            Self::Memory
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl From<PathBuf> for StoreLocation {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

impl From<&Path> for StoreLocation {
    fn from(value: &Path) -> Self {
        Self::File(value.to_path_buf())
    }
}

impl Display for StoreLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => f.write_str(MEMORY_LOCATION),
        }
    }
}

/// Connection owner that hands out atomic scopes.
pub trait Store {
    fn location(&self) -> &StoreLocation;
    fn is_open(&self) -> bool;
    /// Opens the store and ensures the schema exists.
    fn open(&mut self) -> RepoResult<()>;
    /// Releases the connection.
    fn close(&mut self) -> RepoResult<()>;
    /// Runs `work` inside one transaction, committing on `Ok` and rolling
    /// back on `Err`.
    fn scope<T, F>(&mut self, work: F) -> RepoResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> RepoResult<T>;
}

/// SQLite-backed store holding at most one connection.
pub struct SqliteStore {
    location: StoreLocation,
    conn: Option<Connection>,
}

impl SqliteStore {
    pub fn new(location: impl Into<StoreLocation>) -> Self {
        Self {
            location: location.into(),
            conn: None,
        }
    }
}

impl Store for SqliteStore {
    fn location(&self) -> &StoreLocation {
        &self.location
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn open(&mut self) -> RepoResult<()> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn = match &self.location {
            StoreLocation::File(path) => open_db(path)?,
            StoreLocation::Memory => open_db_in_memory()?,
        };
        self.conn = Some(conn);
        info!(
            "event=repo_init module=repo status=ok location={}",
            self.location
        );
        Ok(())
    }

    fn close(&mut self) -> RepoResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!(
                    "event=repo_close module=repo status=ok location={}",
                    self.location
                );
                Ok(())
            }
            // The handle is dropped either way; sqlite finalizes it on drop.
            Err((_conn, err)) => Err(err.into()),
        }
    }

    fn scope<T, F>(&mut self, work: F) -> RepoResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
    {
        let conn = self.conn.as_mut().ok_or(RepoError::NotInitialized)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        match work(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=scope_rollback module=repo status=error error={}",
                        rollback_err
                    );
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SqliteStore, Store, StoreLocation};
    use crate::repo::RepoError;
    use std::path::PathBuf;

    #[test]
    fn memory_marker_maps_to_memory_location() {
        assert_eq!(StoreLocation::from(":memory:"), StoreLocation::Memory);
        assert_eq!(
            StoreLocation::from("data/playlog.db"),
            StoreLocation::File(PathBuf::from("data/playlog.db"))
        );
        assert_eq!(StoreLocation::Memory.to_string(), ":memory:");
    }

    #[test]
    fn scope_before_open_reports_not_initialized() {
        let mut store = SqliteStore::new(StoreLocation::Memory);
        let result = store.scope(|_| Ok(()));
        assert!(matches!(result, Err(RepoError::NotInitialized)));
    }

    #[test]
    fn failed_scope_rolls_back_all_writes() {
        let mut store = SqliteStore::new(StoreLocation::Memory);
        store.open().unwrap();

        let result: Result<(), RepoError> = store.scope(|tx| {
            tx.execute(
                "INSERT INTO characters (name, created_at, is_active)
                 VALUES ('ghost', '2024-01-01T00:00:00.000000Z', 0);",
                [],
            )?;
            Err(RepoError::InvalidData("abort".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = store
            .scope(|tx| {
                Ok(tx.query_row("SELECT COUNT(*) FROM characters;", [], |row| {
                    row.get(0)
                })?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut store = SqliteStore::new(StoreLocation::Memory);
        store.open().unwrap();
        store.open().unwrap();
        assert!(store.is_open());
        store.close().unwrap();
        store.close().unwrap();
        assert!(!store.is_open());
    }
}
