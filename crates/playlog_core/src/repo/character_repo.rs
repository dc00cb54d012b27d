//! `characters` table mapper.
//!
//! # Invariants
//! - `clear_active` + `activate` must run in the same scope so no committed
//!   state has zero or two active characters by accident.

use super::columns::{bool_to_int, flag, timestamp};
use super::{RepoError, RepoResult};
use crate::model::character::{Character, CharacterId};
use crate::model::time::{format_timestamp, Timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CHARACTER_SELECT_SQL: &str = "SELECT
    id,
    name,
    created_at,
    is_active
FROM characters";

/// Data-mapping contract for the `characters` table.
pub trait CharacterRepository {
    fn get(&self, id: CharacterId) -> RepoResult<Option<Character>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Character>>;
    fn find_active(&self) -> RepoResult<Option<Character>>;
    fn list_all(&self) -> RepoResult<Vec<Character>>;
    fn insert(&self, name: &str, created_at: Timestamp) -> RepoResult<Character>;
    fn exists(&self, id: CharacterId) -> RepoResult<bool>;
    fn clear_active(&self) -> RepoResult<usize>;
    fn activate(&self, id: CharacterId) -> RepoResult<usize>;
    fn count_active(&self) -> RepoResult<i64>;
}

/// SQLite-backed `characters` mapper.
pub struct SqliteCharacterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCharacterRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CharacterRepository for SqliteCharacterRepository<'_> {
    fn get(&self, id: CharacterId) -> RepoResult<Option<Character>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHARACTER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_character_row(row)?)),
            None => Ok(None),
        }
    }

    /// Exact, case-sensitive name lookup. The oldest match wins.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Character>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CHARACTER_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([name])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_character_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_active(&self) -> RepoResult<Option<Character>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CHARACTER_SELECT_SQL} WHERE is_active = 1 ORDER BY id ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_character_row(row)?)),
            None => Ok(None),
        }
    }

    /// All characters in id order.
    fn list_all(&self) -> RepoResult<Vec<Character>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHARACTER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut characters = Vec::new();
        while let Some(row) = rows.next()? {
            characters.push(parse_character_row(row)?);
        }
        Ok(characters)
    }

    /// Inserts an inactive character and returns the stored row.
    fn insert(&self, name: &str, created_at: Timestamp) -> RepoResult<Character> {
        self.conn.execute(
            "INSERT INTO characters (name, created_at, is_active) VALUES (?1, ?2, ?3);",
            params![name, format_timestamp(&created_at), bool_to_int(false)],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted character {id} could not be read back"))
        })
    }

    fn exists(&self, id: CharacterId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM characters WHERE id = ?1;", [id], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Clears the active flag everywhere. Returns the number of rows changed.
    fn clear_active(&self) -> RepoResult<usize> {
        Ok(self
            .conn
            .execute("UPDATE characters SET is_active = 0 WHERE is_active <> 0;", [])?)
    }

    /// Sets the active flag on one character. Returns the number of rows changed.
    fn activate(&self, id: CharacterId) -> RepoResult<usize> {
        Ok(self
            .conn
            .execute("UPDATE characters SET is_active = 1 WHERE id = ?1;", [id])?)
    }

    fn count_active(&self) -> RepoResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM characters WHERE is_active = 1;",
            [],
            |row| row.get(0),
        )?)
    }
}

fn parse_character_row(row: &Row<'_>) -> RepoResult<Character> {
    Ok(Character {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: timestamp(row, "created_at")?,
        is_active: flag(row, "is_active")?,
    })
}
