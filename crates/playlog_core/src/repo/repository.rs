//! Caller-facing repository over the tracking store.
//!
//! # Responsibility
//! - Wrap every operation in exactly one store scope.
//! - Hand back detached values, never live store handles.
//! - Compute the earnings total and per-activity statistics.
//!
//! # Invariants
//! - No operation propagates an error. Store failures are logged and turned
//!   into a neutral value (`None`, `false`, empty list, zero stats).
//! - A missing row is a normal negative result and is not logged as an error.
//! - Exactly one character is active after a successful
//!   `set_active_character`; a failed activation leaves flags untouched.

use super::activity_repo::{ActivityRepository, SqliteActivityRepository};
use super::business_repo::{BusinessRepository, SqliteBusinessRepository};
use super::character_repo::{CharacterRepository, SqliteCharacterRepository};
use super::earnings_repo::{EarningsRepository, SqliteEarningsRepository};
use super::session_repo::{SessionRepository, SqliteSessionRepository};
use super::store::{SqliteStore, Store, StoreLocation};
use super::{RepoError, RepoResult};
use crate::model::activity::{Activity, NewActivity};
use crate::model::business::{BusinessSnapshot, NewBusinessSnapshot};
use crate::model::character::{Character, CharacterId};
use crate::model::earnings::Earning;
use crate::model::report::{
    ActivityRecord, ActivityStats, EarningRecord, SessionExport, SessionSummary,
};
use crate::model::session::{Session, SessionId};
use crate::model::time::{utc_now, Timestamp};
use chrono::{Datelike, Duration};
use log::{debug, error, info, warn};
use rusqlite::Transaction;

/// Default number of sessions returned by `get_recent_sessions` callers.
pub const DEFAULT_RECENT_SESSIONS: u32 = 10;
/// Default look-back window for totals and statistics.
pub const DEFAULT_STATS_WINDOW_DAYS: u32 = 30;

/// Transactional repository over one store connection.
///
/// Operations take `&mut self`: one repository serializes all work through
/// its single connection.
pub struct Repository<S: Store = SqliteStore> {
    store: S,
}

impl Repository<SqliteStore> {
    /// Creates a repository for `location`. Nothing is opened until
    /// `initialize` (or the first operation) runs.
    pub fn new(location: impl Into<StoreLocation>) -> Self {
        Self::with_store(SqliteStore::new(location))
    }
}

impl<S: Store> Repository<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn location(&self) -> &StoreLocation {
        self.store.location()
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_open()
    }

    /// Typed access to the underlying store for callers that need to tell
    /// `NotFound` apart from store failures.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Opens the store and ensures all tables exist. Safe to call repeatedly.
    pub fn initialize(&mut self) -> bool {
        match self.store.open() {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=repo_init module=repo status=error location={} error={}",
                    self.store.location(),
                    err
                );
                false
            }
        }
    }

    /// Releases the connection. Closing twice is harmless.
    pub fn close(&mut self) {
        if let Err(err) = self.store.close() {
            warn!(
                "event=repo_close module=repo status=error location={} error={}",
                self.store.location(),
                err
            );
        }
    }

    // Characters

    /// Looks a character up by exact name, creating it (inactive) if absent.
    pub fn get_or_create_character(&mut self, name: &str) -> Option<Character> {
        self.run("get_or_create_character", None, |tx| {
            let characters = SqliteCharacterRepository::new(tx);
            if let Some(existing) = characters.find_by_name(name)? {
                return Ok(Some(existing));
            }

            let created = characters.insert(name, utc_now())?;
            info!(
                "event=character_create module=repo status=ok character_id={} name={}",
                created.id, created.name
            );
            Ok(Some(created))
        })
    }

    /// Exact-name lookup that never creates a character.
    pub fn find_character(&mut self, name: &str) -> Option<Character> {
        self.run("find_character", None, |tx| {
            SqliteCharacterRepository::new(tx).find_by_name(name)
        })
    }

    pub fn get_active_character(&mut self) -> Option<Character> {
        self.run("get_active_character", None, |tx| {
            SqliteCharacterRepository::new(tx).find_active()
        })
    }

    /// Every character, in id order.
    pub fn get_all_characters(&mut self) -> Vec<Character> {
        self.run("get_all_characters", Vec::new(), |tx| {
            SqliteCharacterRepository::new(tx).list_all()
        })
    }

    /// Makes `character_id` the only active character.
    ///
    /// Returns `false` when the id does not exist; flags are left unchanged in
    /// that case.
    pub fn set_active_character(&mut self, character_id: CharacterId) -> bool {
        self.run("set_active_character", false, |tx| {
            let characters = SqliteCharacterRepository::new(tx);
            if !characters.exists(character_id)? {
                return Err(RepoError::NotFound {
                    entity: "character",
                    id: character_id,
                });
            }

            characters.clear_active()?;
            Ok(characters.activate(character_id)? > 0)
        })
    }

    // Sessions

    /// Opens a new session for `character` starting now.
    pub fn start_session(&mut self, character: &Character, start_money: i64) -> Option<Session> {
        self.run("start_session", None, |tx| {
            let session = SqliteSessionRepository::new(tx).insert(character.id, start_money, utc_now())?;
            info!(
                "event=session_start module=repo status=ok session_id={} character_id={} character={} start_money={}",
                session.id, character.id, character.name, start_money
            );
            Ok(Some(session))
        })
    }

    /// Closes a session, settling `total_earnings = end_money - start_money`.
    ///
    /// Returns `false` when the session does not exist.
    pub fn end_session(&mut self, session_id: SessionId, end_money: i64) -> bool {
        self.run("end_session", false, |tx| {
            let sessions = SqliteSessionRepository::new(tx);
            let session = sessions.require(session_id)?;
            let total_earnings = end_money.checked_sub(session.start_money).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "session {session_id} earnings overflow: {end_money} - {}",
                    session.start_money
                ))
            })?;
            let changed = sessions.close(session_id, utc_now(), end_money, total_earnings)?;
            info!(
                "event=session_end module=repo status=ok session_id={} total_earnings={}",
                session_id, total_earnings
            );
            Ok(changed > 0)
        })
    }

    /// Newest sessions of a character first, at most `limit` of them.
    pub fn get_recent_sessions(&mut self, character_id: CharacterId, limit: u32) -> Vec<Session> {
        self.run("get_recent_sessions", Vec::new(), |tx| {
            SqliteSessionRepository::new(tx).list_recent(character_id, limit)
        })
    }

    // Activities

    /// Records an already-completed activity ending now.
    pub fn log_activity(&mut self, request: &NewActivity) -> Option<Activity> {
        self.run("log_activity", None, |tx| {
            let activity = SqliteActivityRepository::new(tx).insert(request, utc_now())?;
            debug!(
                "event=activity_log module=repo status=ok activity_id={} session_id={} type={} earnings={}",
                activity.id, activity.session_id, activity.activity_type, activity.earnings
            );
            Ok(Some(activity))
        })
    }

    /// Activities of a session, most recently ended first.
    pub fn get_session_activities(&mut self, session_id: SessionId) -> Vec<Activity> {
        self.run("get_session_activities", Vec::new(), |tx| {
            SqliteActivityRepository::new(tx).list_for_session(session_id)
        })
    }

    // Business snapshots

    pub fn save_business_snapshot(
        &mut self,
        request: &NewBusinessSnapshot,
    ) -> Option<BusinessSnapshot> {
        self.run("save_business_snapshot", None, |tx| {
            SqliteBusinessRepository::new(tx).insert(request, utc_now()).map(Some)
        })
    }

    pub fn get_latest_business_snapshot(
        &mut self,
        character_id: CharacterId,
        business_type: &str,
    ) -> Option<BusinessSnapshot> {
        self.run("get_latest_business_snapshot", None, |tx| {
            SqliteBusinessRepository::new(tx).latest(character_id, business_type)
        })
    }

    // Earnings

    pub fn log_earning(
        &mut self,
        session_id: SessionId,
        amount: i64,
        source: Option<&str>,
        balance_after: Option<i64>,
    ) -> Option<Earning> {
        self.run("log_earning", None, |tx| {
            SqliteEarningsRepository::new(tx)
                .insert(session_id, amount, source, balance_after, utc_now())
                .map(Some)
        })
    }

    // Statistics

    /// Sum of settled earnings over sessions started in the last `days` days.
    pub fn get_total_earnings(&mut self, character_id: CharacterId, days: u32) -> i64 {
        let cutoff = window_start(days);
        self.run("get_total_earnings", 0, |tx| {
            SqliteSessionRepository::new(tx).sum_earnings_since(character_id, cutoff)
        })
    }

    /// Count, totals and floor-divided averages for one activity type over
    /// sessions started in the last `days` days.
    pub fn get_activity_stats(
        &mut self,
        character_id: CharacterId,
        activity_type: &str,
        days: u32,
    ) -> ActivityStats {
        let cutoff = window_start(days);
        self.run("get_activity_stats", ActivityStats::default(), |tx| {
            if SqliteSessionRepository::new(tx).count_started_since(character_id, cutoff)? == 0 {
                return Ok(ActivityStats::default());
            }

            let samples = SqliteActivityRepository::new(tx).samples_since(
                character_id,
                activity_type,
                cutoff,
            )?;
            ActivityStats::from_samples(samples).ok_or_else(|| {
                RepoError::InvalidData(format!("{activity_type} statistics overflow i64"))
            })
        })
    }

    /// Assembles one session with its activities and earnings.
    pub fn export_session_data(&mut self, session_id: SessionId) -> Option<SessionExport> {
        self.run("export_session_data", None, |tx| {
            let Some(session) = SqliteSessionRepository::new(tx).get(session_id)? else {
                return Ok(None);
            };
            let activities = SqliteActivityRepository::new(tx).list_for_session_logged_order(session_id)?;
            let earnings = SqliteEarningsRepository::new(tx).list_for_session(session_id)?;

            Ok(Some(SessionExport {
                session: SessionSummary::from_session(&session, utc_now()),
                activities: activities.iter().map(ActivityRecord::from).collect(),
                earnings: earnings.iter().map(EarningRecord::from).collect(),
            }))
        })
    }

    /// Runs `work` in one scope, lazily opening the store first.
    ///
    /// Any error is logged and replaced by `fallback`.
    fn run<T, F>(&mut self, operation: &'static str, fallback: T, work: F) -> T
    where
        F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
    {
        match self.try_run(work) {
            Ok(value) => value,
            Err(err) if err.is_not_found() => {
                debug!(
                    "event=scope_done module=repo status=not_found op={} detail={}",
                    operation, err
                );
                fallback
            }
            Err(err) => {
                error!(
                    "event=scope_failed module=repo status=error op={} error={}",
                    operation, err
                );
                fallback
            }
        }
    }

    fn try_run<T, F>(&mut self, work: F) -> RepoResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
    {
        if !self.store.is_open() {
            self.store.open()?;
        }
        self.store.scope(work)
    }
}

/// Start of a `days`-day look-back window. `None` means the window reaches
/// past the representable calendar and has no lower bound.
fn window_start(days: u32) -> Option<Timestamp> {
    Duration::try_days(i64::from(days))
        .and_then(|window| utc_now().checked_sub_signed(window))
        .filter(|cutoff| cutoff.year() > 0)
}

#[cfg(test)]
mod tests {
    use super::Repository;
    use crate::model::activity::NewActivity;
    use crate::repo::store::StoreLocation;

    fn repository() -> Repository {
        let mut repo = Repository::new(StoreLocation::Memory);
        assert!(repo.initialize());
        repo
    }

    #[test]
    fn operations_open_the_store_lazily() {
        let mut repo = Repository::new(StoreLocation::Memory);
        assert!(!repo.is_initialized());
        assert!(repo.get_or_create_character("Lazy").is_some());
        assert!(repo.is_initialized());
    }

    #[test]
    fn foreign_key_violation_is_swallowed_and_rolled_back() {
        let mut repo = repository();
        let orphan = repo.log_activity(&NewActivity::new(4242, "VIP_WORK"));
        assert!(orphan.is_none());
        assert!(repo.get_session_activities(4242).is_empty());
    }

    #[test]
    fn negative_duration_is_rejected_by_the_store() {
        let mut repo = repository();
        let character = repo.get_or_create_character("Clock").unwrap();
        let session = repo.start_session(&character, 0).unwrap();

        let request = NewActivity::new(session.id, "HEIST_PREP").duration_seconds(-5);
        assert!(repo.log_activity(&request).is_none());
        assert!(repo.get_session_activities(session.id).is_empty());
    }
}
