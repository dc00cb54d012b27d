//! `earnings` table mapper.

use super::columns::timestamp;
use super::{RepoError, RepoResult};
use crate::model::earnings::{Earning, EarningId};
use crate::model::session::SessionId;
use crate::model::time::{format_timestamp, Timestamp};
use rusqlite::{params, Connection, Row};

const EARNING_SELECT_SQL: &str = "SELECT
    id,
    session_id,
    timestamp,
    amount,
    source,
    balance_after
FROM earnings";

/// Data-mapping contract for the `earnings` table.
pub trait EarningsRepository {
    fn get(&self, id: EarningId) -> RepoResult<Option<Earning>>;
    fn insert(
        &self,
        session_id: SessionId,
        amount: i64,
        source: Option<&str>,
        balance_after: Option<i64>,
        recorded_at: Timestamp,
    ) -> RepoResult<Earning>;
    fn list_for_session(&self, session_id: SessionId) -> RepoResult<Vec<Earning>>;
}

/// SQLite-backed `earnings` mapper.
pub struct SqliteEarningsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEarningsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EarningsRepository for SqliteEarningsRepository<'_> {
    fn get(&self, id: EarningId) -> RepoResult<Option<Earning>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EARNING_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_earning_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert(
        &self,
        session_id: SessionId,
        amount: i64,
        source: Option<&str>,
        balance_after: Option<i64>,
        recorded_at: Timestamp,
    ) -> RepoResult<Earning> {
        self.conn.execute(
            "INSERT INTO earnings (session_id, timestamp, amount, source, balance_after)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                session_id,
                format_timestamp(&recorded_at),
                amount,
                source,
                balance_after,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted earning {id} could not be read back"))
        })
    }

    /// Earnings of a session in the order they were logged.
    fn list_for_session(&self, session_id: SessionId) -> RepoResult<Vec<Earning>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EARNING_SELECT_SQL} WHERE session_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([session_id])?;
        let mut earnings = Vec::new();
        while let Some(row) = rows.next()? {
            earnings.push(parse_earning_row(row)?);
        }
        Ok(earnings)
    }
}

fn parse_earning_row(row: &Row<'_>) -> RepoResult<Earning> {
    Ok(Earning {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        timestamp: timestamp(row, "timestamp")?,
        amount: row.get("amount")?,
        source: row.get("source")?,
        balance_after: row.get("balance_after")?,
    })
}
