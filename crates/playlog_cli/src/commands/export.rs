use super::{resolve_character, CommandResult};
use crate::config::default_export_dir;
use clap::{Args, Subcommand};
use playlog_core::export::{
    export_activity_history, export_earnings_breakdown, export_session_csv, export_session_json,
    export_sessions_summary, DEFAULT_ACTIVITY_TYPES,
};
use playlog_core::{ExportReport, Repository, DEFAULT_RECENT_SESSIONS, DEFAULT_STATS_WINDOW_DAYS};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory; defaults to `exports/` next to the store file
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ExportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// One session as a JSON document
    Json { session: i64 },
    /// One session as info/activities/earnings CSV files
    Csv {
        session: i64,
        #[arg(long)]
        no_earnings: bool,
    },
    /// Recent sessions of a character, one row each
    Summary {
        #[arg(long)]
        character: Option<String>,
        #[arg(long, default_value_t = DEFAULT_RECENT_SESSIONS)]
        limit: u32,
    },
    /// Every activity of a character's sessions
    History {
        #[arg(long)]
        character: Option<String>,
    },
    /// Per-activity-type statistics over a window
    Breakdown {
        #[arg(long)]
        character: Option<String>,
        #[arg(long, default_value_t = DEFAULT_STATS_WINDOW_DAYS)]
        days: u32,
        /// Activity types to include; defaults to the common mission types
        #[arg(long = "type")]
        types: Vec<String>,
    },
}

pub fn execute(args: ExportArgs, repo: &mut Repository) -> CommandResult {
    let out_dir = args
        .out
        .unwrap_or_else(|| default_export_dir(repo.location()));

    let report = match args.command {
        ExportCommand::Json { session } => {
            let path = out_dir.join(format!("session_{session}.json"));
            export_session_json(repo, session, &path)?
        }
        ExportCommand::Csv {
            session,
            no_earnings,
        } => export_session_csv(repo, session, &out_dir, !no_earnings)?,
        ExportCommand::Summary { character, limit } => {
            let character = resolve_character(repo, character.as_deref())?;
            let path = out_dir.join(format!("sessions_summary_{}.csv", character.id));
            export_sessions_summary(repo, character.id, &path, limit)?
        }
        ExportCommand::History { character } => {
            let character = resolve_character(repo, character.as_deref())?;
            let path = out_dir.join(format!("activity_history_{}.csv", character.id));
            export_activity_history(repo, character.id, &path)?
        }
        ExportCommand::Breakdown {
            character,
            days,
            types,
        } => {
            let character = resolve_character(repo, character.as_deref())?;
            let path = out_dir.join(format!("earnings_breakdown_{}_{days}d.csv", character.id));
            let selected: Vec<&str> = if types.is_empty() {
                DEFAULT_ACTIVITY_TYPES.to_vec()
            } else {
                types.iter().map(String::as_str).collect()
            };
            export_earnings_breakdown(repo, character.id, &path, days, &selected)?
        }
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &ExportReport) {
    println!(
        "Exported {} rows to {}",
        report.rows_exported,
        report.file_path.display()
    );
}
