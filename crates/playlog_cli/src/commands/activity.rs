use super::{print_json, resolve_character, CommandResult};
use clap::{Args, Subcommand};
use playlog_core::{NewActivity, Repository, DEFAULT_STATS_WINDOW_DAYS};

#[derive(Debug, Args)]
pub struct ActivityArgs {
    #[command(subcommand)]
    pub command: ActivityCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Record a completed activity ending now
    Log {
        #[arg(long)]
        session: i64,
        /// Activity type, e.g. VIP_WORK
        #[arg(long = "type")]
        activity_type: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        earnings: i64,
        #[arg(long, default_value_t = 0)]
        duration: i64,
        /// Record the activity as failed
        #[arg(long, conflicts_with = "unknown_outcome")]
        failed: bool,
        /// Record the outcome as unknown
        #[arg(long)]
        unknown_outcome: bool,
        #[arg(long)]
        business: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Activities of a session, most recent first
    List { session: i64 },
    /// Aggregates for one activity type over a look-back window
    Stats {
        #[arg(long = "type")]
        activity_type: String,
        #[arg(long)]
        character: Option<String>,
        #[arg(long, default_value_t = DEFAULT_STATS_WINDOW_DAYS)]
        days: u32,
    },
}

pub fn execute(args: ActivityArgs, repo: &mut Repository) -> CommandResult {
    match args.command {
        ActivityCommand::Log {
            session,
            activity_type,
            name,
            earnings,
            duration,
            failed,
            unknown_outcome,
            business,
            notes,
        } => {
            let outcome = if unknown_outcome {
                None
            } else {
                Some(!failed)
            };
            let mut request = NewActivity::new(session, activity_type)
                .name(name)
                .earnings(earnings)
                .duration_seconds(duration)
                .success(outcome);
            if let Some(business) = business {
                request = request.business_type(business);
            }
            if let Some(notes) = notes {
                request = request.notes(notes);
            }
            let activity = repo
                .log_activity(&request)
                .ok_or_else(|| format!("could not log activity for session {session}"))?;
            print_json(&activity)
        }
        ActivityCommand::List { session } => print_json(&repo.get_session_activities(session)),
        ActivityCommand::Stats {
            activity_type,
            character,
            days,
        } => {
            let character = resolve_character(repo, character.as_deref())?;
            print_json(&repo.get_activity_stats(character.id, &activity_type, days))
        }
    }
}
