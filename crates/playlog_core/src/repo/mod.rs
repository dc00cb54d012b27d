//! Store access layer.
//!
//! # Responsibility
//! - Own the store connection lifecycle and per-operation atomic scopes.
//! - Map each tracking table to and from detached model values.
//! - Expose the caller-facing `Repository` operations.
//!
//! # Invariants
//! - Every read or write happens inside one `Store::scope`.
//! - Values leaving this layer never borrow the connection.
//! - Typed helpers report `NotFound` separately from store failures; only the
//!   `Repository` façade collapses them into neutral results.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity_repo;
pub mod business_repo;
pub mod character_repo;
mod columns;
pub mod earnings_repo;
pub mod repository;
pub mod session_repo;
pub mod store;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised by store scopes and table mappers.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The store has not been opened (or was closed).
    NotInitialized,
    NotFound {
        entity: &'static str,
        id: i64,
    },
    InvalidData(String),
}

impl RepoError {
    /// Returns whether this is a normal negative result rather than a
    /// failure of the store itself.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotInitialized => write!(f, "store is not initialized"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotInitialized | Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
