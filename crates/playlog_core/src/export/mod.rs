//! File exports built on top of `Repository` reads.
//!
//! # Responsibility
//! - Write session, history and breakdown reports as CSV or JSON files.
//! - Report how many data rows were written.
//!
//! # Invariants
//! - Exports only read through the repository; they never write the store.
//! - Parent directories are created on demand.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod format;
mod writers;

pub use format::{format_duration_hm, format_money};
pub use writers::{
    export_activity_history, export_earnings_breakdown, export_session_csv, export_session_json,
    export_sessions_summary, DEFAULT_ACTIVITY_TYPES, HISTORY_SESSION_LIMIT,
};

pub type ExportResult<T> = Result<T, ExportError>;

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// File written, or directory for multi-file exports.
    pub file_path: PathBuf,
    pub rows_exported: usize,
}

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    /// Nothing to export for the requested session or character.
    NotFound(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "export io error: {err}"),
            Self::Csv(err) => write!(f, "export csv error: {err}"),
            Self::Json(err) => write!(f, "export json error: {err}"),
            Self::NotFound(message) => f.write_str(message),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
