//! `business_snapshots` table mapper.

use super::columns::timestamp;
use super::{RepoError, RepoResult};
use crate::model::business::{BusinessSnapshot, NewBusinessSnapshot, SnapshotId};
use crate::model::character::CharacterId;
use crate::model::time::{format_timestamp, Timestamp};
use rusqlite::{params, Connection, Row};

const SNAPSHOT_SELECT_SQL: &str = "SELECT
    id,
    character_id,
    business_type,
    timestamp,
    stock_level,
    supply_level,
    stock_value
FROM business_snapshots";

/// Data-mapping contract for the `business_snapshots` table.
pub trait BusinessRepository {
    fn get(&self, id: SnapshotId) -> RepoResult<Option<BusinessSnapshot>>;
    fn insert(
        &self,
        request: &NewBusinessSnapshot,
        taken_at: Timestamp,
    ) -> RepoResult<BusinessSnapshot>;
    fn latest(
        &self,
        character_id: CharacterId,
        business_type: &str,
    ) -> RepoResult<Option<BusinessSnapshot>>;
}

/// SQLite-backed `business_snapshots` mapper.
pub struct SqliteBusinessRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBusinessRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BusinessRepository for SqliteBusinessRepository<'_> {
    fn get(&self, id: SnapshotId) -> RepoResult<Option<BusinessSnapshot>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SNAPSHOT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_snapshot_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert(
        &self,
        request: &NewBusinessSnapshot,
        taken_at: Timestamp,
    ) -> RepoResult<BusinessSnapshot> {
        self.conn.execute(
            "INSERT INTO business_snapshots (
                character_id,
                business_type,
                timestamp,
                stock_level,
                supply_level,
                stock_value
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                request.character_id,
                request.business_type.as_str(),
                format_timestamp(&taken_at),
                request.stock_level,
                request.supply_level,
                request.stock_value,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted snapshot {id} could not be read back"))
        })
    }

    /// Snapshot with the greatest timestamp for the pair; the later insert
    /// wins a timestamp tie.
    fn latest(
        &self,
        character_id: CharacterId,
        business_type: &str,
    ) -> RepoResult<Option<BusinessSnapshot>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SNAPSHOT_SELECT_SQL}
             WHERE character_id = ?1
               AND business_type = ?2
             ORDER BY julianday(timestamp) DESC, id DESC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query(params![character_id, business_type])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_snapshot_row(row)?)),
            None => Ok(None),
        }
    }
}

fn parse_snapshot_row(row: &Row<'_>) -> RepoResult<BusinessSnapshot> {
    Ok(BusinessSnapshot {
        id: row.get("id")?,
        character_id: row.get("character_id")?,
        business_type: row.get("business_type")?,
        timestamp: timestamp(row, "timestamp")?,
        stock_level: row.get("stock_level")?,
        supply_level: row.get("supply_level")?,
        stock_value: row.get("stock_value")?,
    })
}
