//! `sessions` table mapper.
//!
//! Window filters and ordering go through `julianday()` so legacy rows
//! stored without an offset compare correctly against canonical UTC text.

use super::columns::{optional_timestamp, timestamp};
use super::{RepoError, RepoResult};
use crate::model::character::CharacterId;
use crate::model::session::{Session, SessionId};
use crate::model::time::{format_timestamp, Timestamp};
use rusqlite::{params, Connection, Row};

const SESSION_SELECT_SQL: &str = "SELECT
    id,
    character_id,
    started_at,
    ended_at,
    start_money,
    end_money,
    total_earnings
FROM sessions";

/// Data-mapping contract for the `sessions` table.
pub trait SessionRepository {
    fn get(&self, id: SessionId) -> RepoResult<Option<Session>>;
    fn require(&self, id: SessionId) -> RepoResult<Session>;
    fn insert(
        &self,
        character_id: CharacterId,
        start_money: i64,
        started_at: Timestamp,
    ) -> RepoResult<Session>;
    fn close(
        &self,
        id: SessionId,
        ended_at: Timestamp,
        end_money: i64,
        total_earnings: i64,
    ) -> RepoResult<usize>;
    fn list_recent(&self, character_id: CharacterId, limit: u32) -> RepoResult<Vec<Session>>;
    fn sum_earnings_since(
        &self,
        character_id: CharacterId,
        cutoff: Option<Timestamp>,
    ) -> RepoResult<i64>;
    fn count_started_since(
        &self,
        character_id: CharacterId,
        cutoff: Option<Timestamp>,
    ) -> RepoResult<i64>;
}

/// SQLite-backed `sessions` mapper.
pub struct SqliteSessionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSessionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SessionRepository for SqliteSessionRepository<'_> {
    fn get(&self, id: SessionId) -> RepoResult<Option<Session>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SESSION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_session_row(row)?)),
            None => Ok(None),
        }
    }

    /// Like `get`, but a missing row is `RepoError::NotFound`.
    fn require(&self, id: SessionId) -> RepoResult<Session> {
        self.get(id)?.ok_or(RepoError::NotFound {
            entity: "session",
            id,
        })
    }

    /// Inserts an open session and returns the stored row.
    fn insert(
        &self,
        character_id: CharacterId,
        start_money: i64,
        started_at: Timestamp,
    ) -> RepoResult<Session> {
        self.conn.execute(
            "INSERT INTO sessions (character_id, started_at, start_money) VALUES (?1, ?2, ?3);",
            params![character_id, format_timestamp(&started_at), start_money],
        )?;
        self.require(self.conn.last_insert_rowid())
    }

    /// Stamps the closing fields. Returns the number of rows changed.
    fn close(
        &self,
        id: SessionId,
        ended_at: Timestamp,
        end_money: i64,
        total_earnings: i64,
    ) -> RepoResult<usize> {
        Ok(self.conn.execute(
            "UPDATE sessions
             SET
                ended_at = ?2,
                end_money = ?3,
                total_earnings = ?4
             WHERE id = ?1;",
            params![id, format_timestamp(&ended_at), end_money, total_earnings],
        )?)
    }

    /// Newest sessions first, ties broken by id.
    fn list_recent(&self, character_id: CharacterId, limit: u32) -> RepoResult<Vec<Session>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SESSION_SELECT_SQL}
             WHERE character_id = ?1
             ORDER BY julianday(started_at) DESC, id DESC
             LIMIT ?2;"
        ))?;
        let mut rows = stmt.query(params![character_id, i64::from(limit)])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(parse_session_row(row)?);
        }
        Ok(sessions)
    }

    /// Sum of `total_earnings` for sessions started at or after `cutoff`,
    /// or for every session when `cutoff` is `None`. Open sessions count as
    /// zero.
    fn sum_earnings_since(
        &self,
        character_id: CharacterId,
        cutoff: Option<Timestamp>,
    ) -> RepoResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COALESCE(SUM(COALESCE(total_earnings, 0)), 0)
             FROM sessions
             WHERE character_id = ?1
               AND (?2 IS NULL OR julianday(started_at) >= julianday(?2));",
            params![character_id, cutoff.as_ref().map(format_timestamp)],
            |row| row.get(0),
        )?)
    }

    fn count_started_since(
        &self,
        character_id: CharacterId,
        cutoff: Option<Timestamp>,
    ) -> RepoResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*)
             FROM sessions
             WHERE character_id = ?1
               AND (?2 IS NULL OR julianday(started_at) >= julianday(?2));",
            params![character_id, cutoff.as_ref().map(format_timestamp)],
            |row| row.get(0),
        )?)
    }
}

fn parse_session_row(row: &Row<'_>) -> RepoResult<Session> {
    Ok(Session {
        id: row.get("id")?,
        character_id: row.get("character_id")?,
        started_at: timestamp(row, "started_at")?,
        ended_at: optional_timestamp(row, "ended_at")?,
        start_money: row.get("start_money")?,
        end_money: row.get("end_money")?,
        total_earnings: row.get("total_earnings")?,
    })
}
