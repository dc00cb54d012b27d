//! Column codecs shared by the table mappers.

use super::{RepoError, RepoResult};
use crate::model::time::{parse_timestamp, Timestamp};
use rusqlite::Row;

pub(crate) fn timestamp(row: &Row<'_>, column: &str) -> RepoResult<Timestamp> {
    let raw: String = row.get(column)?;
    decode_timestamp(&raw, column)
}

pub(crate) fn optional_timestamp(row: &Row<'_>, column: &str) -> RepoResult<Option<Timestamp>> {
    match row.get::<_, Option<String>>(column)? {
        Some(raw) => decode_timestamp(&raw, column).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn flag(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    decode_flag(row.get(column)?, column)
}

pub(crate) fn optional_flag(row: &Row<'_>, column: &str) -> RepoResult<Option<bool>> {
    match row.get::<_, Option<i64>>(column)? {
        Some(value) => decode_flag(value, column).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn decode_timestamp(raw: &str, column: &str) -> RepoResult<Timestamp> {
    parse_timestamp(raw).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{raw}` in column `{column}`"))
    })
}

fn decode_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in column `{column}`"
        ))),
    }
}
