//! Store and logging location resolution.
//!
//! Precedence: explicit flag, then environment variable, then default.

use playlog_core::StoreLocation;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PLAYLOG_DB_PATH";
pub const LOG_DIR_ENV: &str = "PLAYLOG_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "playlog.sqlite3";

/// Resolves the store location from `--db`, `PLAYLOG_DB_PATH`, or the temp
/// directory default.
pub fn resolve_store_location(flag: Option<&str>) -> StoreLocation {
    let env_value = std::env::var(DB_PATH_ENV).ok();
    resolve_store_location_from(flag, env_value.as_deref())
}

/// Resolves the log directory; `None` leaves logging uninitialized.
pub fn resolve_log_dir(flag: Option<&str>) -> Option<String> {
    let env_value = std::env::var(LOG_DIR_ENV).ok();
    first_non_empty(flag, env_value.as_deref()).map(str::to_string)
}

fn resolve_store_location_from(flag: Option<&str>, env_value: Option<&str>) -> StoreLocation {
    match first_non_empty(flag, env_value) {
        Some(raw) => StoreLocation::from(raw),
        None => StoreLocation::File(std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
    }
}

fn first_non_empty<'a>(flag: Option<&'a str>, env_value: Option<&'a str>) -> Option<&'a str> {
    [flag, env_value]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Default export directory next to the store file.
pub fn default_export_dir(location: &StoreLocation) -> PathBuf {
    location
        .path()
        .and_then(|path| path.parent())
        .map(|parent| parent.join("exports"))
        .unwrap_or_else(|| std::env::temp_dir().join("playlog-exports"))
}

#[cfg(test)]
mod tests {
    use super::{default_export_dir, resolve_store_location_from};
    use playlog_core::StoreLocation;
    use std::path::PathBuf;

    #[test]
    fn flag_wins_over_environment() {
        let location = resolve_store_location_from(Some("/data/a.db"), Some("/data/b.db"));
        assert_eq!(location, StoreLocation::File(PathBuf::from("/data/a.db")));
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        let location = resolve_store_location_from(Some("  "), Some(""));
        assert_eq!(
            location,
            StoreLocation::File(std::env::temp_dir().join("playlog.sqlite3"))
        );
    }

    #[test]
    fn memory_marker_is_honored() {
        let location = resolve_store_location_from(None, Some(":memory:"));
        assert_eq!(location, StoreLocation::Memory);
    }

    #[test]
    fn exports_default_next_to_store_file() {
        let location = StoreLocation::File(PathBuf::from("/data/playlog.db"));
        assert_eq!(default_export_dir(&location), PathBuf::from("/data/exports"));
    }
}
