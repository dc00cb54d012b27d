//! Play session records and derived duration.
//!
//! # Invariants
//! - `ended_at`, `end_money` and `total_earnings` stay `None` while open.
//! - `total_earnings = end_money - start_money`, set only when closed.

use super::character::CharacterId;
use super::time::{utc_now, Timestamp};
use serde::{Deserialize, Serialize};

/// Store-assigned session identifier.
pub type SessionId = i64;

/// One bounded play period for a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub character_id: CharacterId,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub start_money: i64,
    pub end_money: Option<i64>,
    pub total_earnings: Option<i64>,
}

impl Session {
    /// Returns whether the session has not been closed yet.
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Session length in whole seconds, measured against the current time
    /// while the session is still open.
    pub fn duration_seconds(&self) -> i64 {
        self.duration_seconds_at(utc_now())
    }

    /// Session length in whole seconds using `now` for open sessions.
    pub fn duration_seconds_at(&self, now: Timestamp) -> i64 {
        let end = self.ended_at.unwrap_or(now);
        (end - self.started_at).num_seconds()
    }

    /// Earnings treated as zero while the session is open.
    pub fn settled_earnings(&self) -> i64 {
        self.total_earnings.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use chrono::{Duration, TimeZone, Utc};

    fn open_session() -> Session {
        Session {
            id: 1,
            character_id: 1,
            started_at: Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap(),
            ended_at: None,
            start_money: 1_000_000,
            end_money: None,
            total_earnings: None,
        }
    }

    #[test]
    fn open_session_duration_uses_reference_time() {
        let session = open_session();
        let now = session.started_at + Duration::seconds(90);
        assert!(session.is_open());
        assert_eq!(session.duration_seconds_at(now), 90);
        assert_eq!(session.settled_earnings(), 0);
    }

    #[test]
    fn closed_session_duration_ignores_reference_time() {
        let mut session = open_session();
        session.ended_at = Some(session.started_at + Duration::hours(2));
        session.total_earnings = Some(500_000);
        let much_later = session.started_at + Duration::days(3);
        assert_eq!(session.duration_seconds_at(much_later), 7_200);
        assert_eq!(session.settled_earnings(), 500_000);
    }
}
