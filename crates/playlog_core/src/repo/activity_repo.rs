//! `activities` table mapper.

use super::columns::{bool_to_int, optional_flag, optional_timestamp, timestamp};
use super::{RepoError, RepoResult};
use crate::model::activity::{Activity, ActivityId, NewActivity};
use crate::model::character::CharacterId;
use crate::model::session::SessionId;
use crate::model::time::{format_timestamp, Timestamp};
use chrono::{Datelike, Duration};
use rusqlite::{params, Connection, Row};

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    session_id,
    activity_type,
    activity_name,
    started_at,
    ended_at,
    duration_seconds,
    earnings,
    success,
    business_type,
    notes
FROM activities";

/// Data-mapping contract for the `activities` table.
pub trait ActivityRepository {
    fn get(&self, id: ActivityId) -> RepoResult<Option<Activity>>;
    fn insert(&self, request: &NewActivity, ended_at: Timestamp) -> RepoResult<Activity>;
    fn list_for_session(&self, session_id: SessionId) -> RepoResult<Vec<Activity>>;
    fn list_for_session_logged_order(&self, session_id: SessionId) -> RepoResult<Vec<Activity>>;
    fn samples_since(
        &self,
        character_id: CharacterId,
        activity_type: &str,
        cutoff: Option<Timestamp>,
    ) -> RepoResult<Vec<(i64, i64)>>;
}

/// SQLite-backed `activities` mapper.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn get(&self, id: ActivityId) -> RepoResult<Option<Activity>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTIVITY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_activity_row(row)?)),
            None => Ok(None),
        }
    }

    /// Inserts a completed activity that ended at `ended_at`.
    ///
    /// `started_at` is back-dated by the reported duration.
    fn insert(&self, request: &NewActivity, ended_at: Timestamp) -> RepoResult<Activity> {
        let started_at = Duration::try_seconds(request.duration_seconds.max(0))
            .and_then(|duration| ended_at.checked_sub_signed(duration))
            .filter(|started_at| started_at.year() > 0)
            .ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "activity duration {}s is out of range",
                    request.duration_seconds
                ))
            })?;
        self.conn.execute(
            "INSERT INTO activities (
                session_id,
                activity_type,
                activity_name,
                started_at,
                ended_at,
                duration_seconds,
                earnings,
                success,
                business_type,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                request.session_id,
                request.activity_type.as_str(),
                request.activity_name.as_str(),
                format_timestamp(&started_at),
                format_timestamp(&ended_at),
                request.duration_seconds,
                request.earnings,
                request.success.map(bool_to_int),
                request.business_type.as_deref(),
                request.notes.as_deref(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted activity {id} could not be read back"))
        })
    }

    /// Activities of a session, most recently ended first.
    fn list_for_session(&self, session_id: SessionId) -> RepoResult<Vec<Activity>> {
        collect_activities(
            self.conn,
            &format!(
                "{ACTIVITY_SELECT_SQL}
                 WHERE session_id = ?1
                 ORDER BY julianday(ended_at) DESC, id DESC;"
            ),
            session_id,
        )
    }

    /// Activities of a session in the order they were logged.
    fn list_for_session_logged_order(
        &self,
        session_id: SessionId,
    ) -> RepoResult<Vec<Activity>> {
        collect_activities(
            self.conn,
            &format!("{ACTIVITY_SELECT_SQL} WHERE session_id = ?1 ORDER BY id ASC;"),
            session_id,
        )
    }

    /// `(earnings, duration_seconds)` of every activity of `activity_type`
    /// inside the character's sessions started at or after `cutoff`
    /// (every session when `cutoff` is `None`).
    fn samples_since(
        &self,
        character_id: CharacterId,
        activity_type: &str,
        cutoff: Option<Timestamp>,
    ) -> RepoResult<Vec<(i64, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.earnings, a.duration_seconds
             FROM activities a
             INNER JOIN sessions s ON s.id = a.session_id
             WHERE s.character_id = ?1
               AND (?2 IS NULL OR julianday(s.started_at) >= julianday(?2))
               AND a.activity_type = ?3
             ORDER BY a.id ASC;",
        )?;
        let mut rows = stmt.query(params![
            character_id,
            cutoff.as_ref().map(format_timestamp),
            activity_type
        ])?;
        let mut samples = Vec::new();
        while let Some(row) = rows.next()? {
            samples.push((row.get(0)?, row.get(1)?));
        }
        Ok(samples)
    }
}

fn collect_activities(
    conn: &Connection,
    sql: &str,
    session_id: SessionId,
) -> RepoResult<Vec<Activity>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([session_id])?;
    let mut activities = Vec::new();
    while let Some(row) = rows.next()? {
        activities.push(parse_activity_row(row)?);
    }
    Ok(activities)
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    Ok(Activity {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        activity_type: row.get("activity_type")?,
        activity_name: row
            .get::<_, Option<String>>("activity_name")?
            .unwrap_or_default(),
        started_at: timestamp(row, "started_at")?,
        ended_at: optional_timestamp(row, "ended_at")?,
        duration_seconds: row.get("duration_seconds")?,
        earnings: row.get("earnings")?,
        success: optional_flag(row, "success")?,
        business_type: row.get("business_type")?,
        notes: row.get("notes")?,
    })
}
