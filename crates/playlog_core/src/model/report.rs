//! Aggregate and export shapes handed to callers.
//!
//! # Invariants
//! - `ActivityStats::default()` is the all-zero record returned for empty
//!   windows; averages never divide by zero.
//! - Export date-times serialize as ISO-8601 strings.

use super::activity::Activity;
use super::earnings::Earning;
use super::session::{Session, SessionId};
use super::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Per-activity-type statistics over a time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub count: i64,
    pub total_earnings: i64,
    pub avg_earnings: i64,
    pub avg_duration: i64,
}

impl ActivityStats {
    /// Builds stats from `(earnings, duration_seconds)` pairs.
    ///
    /// Averages use floor division, matching integer money semantics.
    /// Returns `None` when a running sum overflows `i64`.
    pub fn from_samples(samples: impl IntoIterator<Item = (i64, i64)>) -> Option<Self> {
        let (count, total_earnings, total_duration) = samples.into_iter().try_fold(
            (0_i64, 0_i64, 0_i64),
            |(count, earnings, duration), (sample_earnings, sample_duration)| {
                Some((
                    count.checked_add(1)?,
                    earnings.checked_add(sample_earnings)?,
                    duration.checked_add(sample_duration)?,
                ))
            },
        )?;

        if count == 0 {
            return Some(Self::default());
        }

        Some(Self {
            count,
            total_earnings,
            avg_earnings: total_earnings.div_euclid(count),
            avg_duration: total_duration.div_euclid(count),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Session block of a session export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub start_money: i64,
    pub end_money: Option<i64>,
    pub total_earnings: Option<i64>,
    pub duration_seconds: i64,
}

impl SessionSummary {
    pub fn from_session(session: &Session, now: Timestamp) -> Self {
        Self {
            id: session.id,
            started_at: session.started_at,
            ended_at: session.ended_at,
            start_money: session.start_money,
            end_money: session.end_money,
            total_earnings: session.total_earnings,
            duration_seconds: session.duration_seconds_at(now),
        }
    }
}

/// Activity entry of a session export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub earnings: i64,
    pub duration_seconds: i64,
    pub success: Option<bool>,
    pub ended_at: Option<Timestamp>,
}

impl From<&Activity> for ActivityRecord {
    fn from(activity: &Activity) -> Self {
        Self {
            kind: activity.activity_type.clone(),
            name: activity.activity_name.clone(),
            earnings: activity.earnings,
            duration_seconds: activity.duration_seconds,
            success: activity.success,
            ended_at: activity.ended_at,
        }
    }
}

/// Earnings entry of a session export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningRecord {
    pub amount: i64,
    pub source: Option<String>,
    pub balance_after: Option<i64>,
    pub timestamp: Timestamp,
}

impl From<&Earning> for EarningRecord {
    fn from(earning: &Earning) -> Self {
        Self {
            amount: earning.amount,
            source: earning.source.clone(),
            balance_after: earning.balance_after,
            timestamp: earning.timestamp,
        }
    }
}

/// Complete structured snapshot of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionExport {
    pub session: SessionSummary,
    pub activities: Vec<ActivityRecord>,
    pub earnings: Vec<EarningRecord>,
}

#[cfg(test)]
mod tests {
    use super::ActivityStats;

    #[test]
    fn empty_samples_yield_zero_record() {
        let stats = ActivityStats::from_samples(Vec::<(i64, i64)>::new()).unwrap();
        assert_eq!(stats, ActivityStats::default());
        assert!(stats.is_empty());
    }

    #[test]
    fn averages_use_floor_division() {
        let stats = ActivityStats::from_samples(vec![(10, 100), (10, 100), (11, 101)]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_earnings, 31);
        assert_eq!(stats.avg_earnings, 10);
        assert_eq!(stats.avg_duration, 100);
    }

    #[test]
    fn negative_totals_floor_toward_negative_infinity() {
        let stats = ActivityStats::from_samples(vec![(-5, 0), (0, 0)]).unwrap();
        assert_eq!(stats.avg_earnings, -3);
    }

    #[test]
    fn overflowing_sums_yield_none() {
        assert!(ActivityStats::from_samples(vec![(i64::MAX, 0), (1, 0)]).is_none());
        assert!(ActivityStats::from_samples(vec![(0, i64::MAX), (0, 1)]).is_none());
    }
}
