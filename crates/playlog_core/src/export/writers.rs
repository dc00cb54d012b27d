//! Report writers.

use super::format::{format_duration_hm, format_money, minutes_one_decimal, per_hour, yes_no};
use super::{ExportError, ExportReport, ExportResult};
use crate::model::character::CharacterId;
use crate::model::session::SessionId;
use crate::model::time::utc_now;
use crate::repo::repository::Repository;
use crate::repo::store::Store;
use log::info;
use std::fs;
use std::path::Path;

/// Activity types covered by the earnings breakdown when the caller has no
/// list of its own.
pub const DEFAULT_ACTIVITY_TYPES: [&str; 8] = [
    "CONTACT_MISSION",
    "VIP_WORK",
    "SELL_MISSION",
    "HEIST_FINALE",
    "HEIST_PREP",
    "SECURITY_CONTRACT",
    "PAYPHONE_HIT",
    "MC_CONTRACT",
];

/// Upper bound on sessions scanned by the activity history export.
pub const HISTORY_SESSION_LIMIT: u32 = 1000;

const SESSION_INFO_ROWS: usize = 7;

/// Writes the session export structure as pretty-printed JSON.
pub fn export_session_json<S: Store>(
    repo: &mut Repository<S>,
    session_id: SessionId,
    output_file: &Path,
) -> ExportResult<ExportReport> {
    let data = repo
        .export_session_data(session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    ensure_parent(output_file)?;
    let json = serde_json::to_string_pretty(&data)?;
    fs::write(output_file, json)?;

    let rows_exported = data.activities.len() + data.earnings.len();
    info!(
        "event=export_json module=export status=ok session_id={} rows={} path={}",
        session_id,
        rows_exported,
        output_file.display()
    );
    Ok(ExportReport {
        file_path: output_file.to_path_buf(),
        rows_exported,
    })
}

/// Writes `session_<id>_info.csv`, `session_<id>_activities.csv` and, when
/// requested, `session_<id>_earnings.csv` into `output_dir`.
pub fn export_session_csv<S: Store>(
    repo: &mut Repository<S>,
    session_id: SessionId,
    output_dir: &Path,
    include_earnings: bool,
) -> ExportResult<ExportReport> {
    let data = repo
        .export_session_data(session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    fs::create_dir_all(output_dir)?;
    let mut rows_exported = 0;

    let session = &data.session;
    let mut writer =
        csv::Writer::from_path(output_dir.join(format!("session_{session_id}_info.csv")))?;
    writer.write_record(["Property", "Value"])?;
    writer.write_record(["Session ID", session.id.to_string().as_str()])?;
    writer.write_record(["Started At", session.started_at.to_rfc3339().as_str()])?;
    let ended_at = session
        .ended_at
        .map(|value| value.to_rfc3339())
        .unwrap_or_else(|| "In Progress".to_string());
    writer.write_record(["Ended At", ended_at.as_str()])?;
    writer.write_record(["Start Money", format_money(session.start_money).as_str()])?;
    writer.write_record([
        "End Money",
        format_money(session.end_money.unwrap_or(0)).as_str(),
    ])?;
    writer.write_record([
        "Total Earnings",
        format_money(session.total_earnings.unwrap_or(0)).as_str(),
    ])?;
    writer.write_record([
        "Duration",
        format_duration_hm(session.duration_seconds).as_str(),
    ])?;
    writer.flush()?;
    rows_exported += SESSION_INFO_ROWS;

    let mut writer =
        csv::Writer::from_path(output_dir.join(format!("session_{session_id}_activities.csv")))?;
    writer.write_record([
        "Activity Type",
        "Activity Name",
        "Earnings",
        "Duration (min)",
        "Success",
        "Completed At",
    ])?;
    for activity in &data.activities {
        writer.write_record([
            activity.kind.clone(),
            activity.name.clone(),
            format_money(activity.earnings),
            minutes_one_decimal(activity.duration_seconds),
            yes_no(activity.success).to_string(),
            activity
                .ended_at
                .map(|value| value.to_rfc3339())
                .unwrap_or_default(),
        ])?;
        rows_exported += 1;
    }
    writer.flush()?;

    if include_earnings {
        let mut writer =
            csv::Writer::from_path(output_dir.join(format!("session_{session_id}_earnings.csv")))?;
        writer.write_record(["Timestamp", "Amount", "Source", "Balance After"])?;
        for earning in &data.earnings {
            writer.write_record([
                earning.timestamp.to_rfc3339(),
                format_money(earning.amount),
                earning.source.clone().unwrap_or_default(),
                earning.balance_after.map(format_money).unwrap_or_default(),
            ])?;
            rows_exported += 1;
        }
        writer.flush()?;
    }

    info!(
        "event=export_session_csv module=export status=ok session_id={} rows={} dir={}",
        session_id,
        rows_exported,
        output_dir.display()
    );
    Ok(ExportReport {
        file_path: output_dir.to_path_buf(),
        rows_exported,
    })
}

/// One row per recent session of a character, newest first.
pub fn export_sessions_summary<S: Store>(
    repo: &mut Repository<S>,
    character_id: CharacterId,
    output_file: &Path,
    limit: u32,
) -> ExportResult<ExportReport> {
    let sessions = repo.get_recent_sessions(character_id, limit);
    if sessions.is_empty() {
        return Err(no_sessions(character_id));
    }

    ensure_parent(output_file)?;
    let now = utc_now();
    let mut writer = csv::Writer::from_path(output_file)?;
    writer.write_record([
        "Session ID",
        "Date",
        "Duration (min)",
        "Start Money",
        "End Money",
        "Total Earnings",
        "$/Hour",
    ])?;
    for session in &sessions {
        let duration = session.duration_seconds_at(now);
        let earnings = session.settled_earnings();
        writer.write_record([
            session.id.to_string(),
            session.started_at.format("%Y-%m-%d %H:%M").to_string(),
            format!("{:.0}", duration as f64 / 60.0),
            format_money(session.start_money),
            format_money(session.end_money.unwrap_or(0)),
            format_money(earnings),
            format_money(per_hour(earnings, duration)),
        ])?;
    }
    writer.flush()?;

    info!(
        "event=export_sessions_summary module=export status=ok character_id={} rows={} path={}",
        character_id,
        sessions.len(),
        output_file.display()
    );
    Ok(ExportReport {
        file_path: output_file.to_path_buf(),
        rows_exported: sessions.len(),
    })
}

/// One row per activity across the character's recent sessions.
pub fn export_activity_history<S: Store>(
    repo: &mut Repository<S>,
    character_id: CharacterId,
    output_file: &Path,
) -> ExportResult<ExportReport> {
    let sessions = repo.get_recent_sessions(character_id, HISTORY_SESSION_LIMIT);
    if sessions.is_empty() {
        return Err(no_sessions(character_id));
    }

    ensure_parent(output_file)?;
    let mut writer = csv::Writer::from_path(output_file)?;
    writer.write_record([
        "Session ID",
        "Date",
        "Activity Type",
        "Activity Name",
        "Earnings",
        "Duration (min)",
        "Success",
    ])?;

    let mut rows_exported = 0;
    for session in &sessions {
        for activity in repo.get_session_activities(session.id) {
            writer.write_record([
                session.id.to_string(),
                activity
                    .ended_at
                    .map(|value| value.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
                activity.activity_type,
                activity.activity_name,
                format_money(activity.earnings),
                minutes_one_decimal(activity.duration_seconds),
                yes_no(activity.success).to_string(),
            ])?;
            rows_exported += 1;
        }
    }
    writer.flush()?;

    info!(
        "event=export_activity_history module=export status=ok character_id={} rows={} path={}",
        character_id,
        rows_exported,
        output_file.display()
    );
    Ok(ExportReport {
        file_path: output_file.to_path_buf(),
        rows_exported,
    })
}

/// Per-type statistics rows; types without activity in the window are
/// skipped.
pub fn export_earnings_breakdown<S: Store>(
    repo: &mut Repository<S>,
    character_id: CharacterId,
    output_file: &Path,
    days: u32,
    activity_types: &[&str],
) -> ExportResult<ExportReport> {
    ensure_parent(output_file)?;
    let mut writer = csv::Writer::from_path(output_file)?;
    writer.write_record([
        "Activity Type",
        "Count",
        "Total Earnings",
        "Avg Earnings",
        "Avg Duration (min)",
        "$/Hour",
    ])?;

    let mut rows_exported = 0;
    for activity_type in activity_types {
        let stats = repo.get_activity_stats(character_id, activity_type, days);
        if stats.is_empty() {
            continue;
        }
        writer.write_record([
            (*activity_type).to_string(),
            stats.count.to_string(),
            format_money(stats.total_earnings),
            format_money(stats.avg_earnings),
            minutes_one_decimal(stats.avg_duration),
            format_money(per_hour(stats.avg_earnings, stats.avg_duration)),
        ])?;
        rows_exported += 1;
    }
    writer.flush()?;

    info!(
        "event=export_earnings_breakdown module=export status=ok character_id={} rows={} path={}",
        character_id,
        rows_exported,
        output_file.display()
    );
    Ok(ExportReport {
        file_path: output_file.to_path_buf(),
        rows_exported,
    })
}

fn ensure_parent(path: &Path) -> ExportResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn session_not_found(session_id: SessionId) -> ExportError {
    ExportError::NotFound(format!("session {session_id} not found"))
}

fn no_sessions(character_id: CharacterId) -> ExportError {
    ExportError::NotFound(format!("no sessions found for character {character_id}"))
}
