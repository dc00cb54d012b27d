//! Persistence core for the play-session tracker.
//! Records characters, sessions, activities, earnings and business snapshots,
//! and answers aggregate queries over that history.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;

pub use export::{ExportError, ExportReport, ExportResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::activity::{Activity, ActivityId, NewActivity};
pub use model::business::{BusinessSnapshot, NewBusinessSnapshot, SnapshotId};
pub use model::character::{Character, CharacterId};
pub use model::earnings::{Earning, EarningId};
pub use model::report::{
    ActivityRecord, ActivityStats, EarningRecord, SessionExport, SessionSummary,
};
pub use model::session::{Session, SessionId};
pub use model::time::Timestamp;
pub use repo::repository::{Repository, DEFAULT_RECENT_SESSIONS, DEFAULT_STATS_WINDOW_DAYS};
pub use repo::store::{SqliteStore, Store, StoreLocation};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
