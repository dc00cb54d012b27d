//! Completed in-session activity records.
//!
//! # Invariants
//! - `earnings` defaults to 0.
//! - `duration_seconds` is never negative.
//! - Activities are logged after the fact, so `ended_at` is the log time.

use super::session::SessionId;
use super::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Store-assigned activity identifier.
pub type ActivityId = i64;

/// One completed in-session task with outcome and earnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub session_id: SessionId,
    pub activity_type: String,
    pub activity_name: String,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub duration_seconds: i64,
    pub earnings: i64,
    pub success: Option<bool>,
    pub business_type: Option<String>,
    pub notes: Option<String>,
}

/// Request model for logging a completed activity.
///
/// Defaults: empty name, zero earnings, successful outcome, zero duration,
/// no business, no notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub session_id: SessionId,
    pub activity_type: String,
    pub activity_name: String,
    pub earnings: i64,
    pub success: Option<bool>,
    pub duration_seconds: i64,
    pub business_type: Option<String>,
    pub notes: Option<String>,
}

impl NewActivity {
    pub fn new(session_id: SessionId, activity_type: impl Into<String>) -> Self {
        Self {
            session_id,
            activity_type: activity_type.into(),
            activity_name: String::new(),
            earnings: 0,
            success: Some(true),
            duration_seconds: 0,
            business_type: None,
            notes: None,
        }
    }

    pub fn name(mut self, activity_name: impl Into<String>) -> Self {
        self.activity_name = activity_name.into();
        self
    }

    pub fn earnings(mut self, earnings: i64) -> Self {
        self.earnings = earnings;
        self
    }

    /// `None` records an unknown outcome.
    pub fn success(mut self, success: Option<bool>) -> Self {
        self.success = success;
        self
    }

    pub fn duration_seconds(mut self, duration_seconds: i64) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }

    pub fn business_type(mut self, business_type: impl Into<String>) -> Self {
        self.business_type = Some(business_type.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
