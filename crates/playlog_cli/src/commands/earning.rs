use super::{print_json, resolve_character, CommandResult};
use clap::{Args, Subcommand};
use playlog_core::{Repository, DEFAULT_STATS_WINDOW_DAYS};
use serde_json::json;

#[derive(Debug, Args)]
pub struct EarningArgs {
    #[command(subcommand)]
    pub command: EarningCommand,
}

#[derive(Debug, Subcommand)]
pub enum EarningCommand {
    /// Record a money-change event in a session
    Log {
        #[arg(long)]
        session: i64,
        #[arg(long, allow_hyphen_values = true)]
        amount: i64,
        #[arg(long)]
        source: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        balance_after: Option<i64>,
    },
    /// Settled earnings over sessions started in the window
    Total {
        #[arg(long)]
        character: Option<String>,
        #[arg(long, default_value_t = DEFAULT_STATS_WINDOW_DAYS)]
        days: u32,
    },
}

pub fn execute(args: EarningArgs, repo: &mut Repository) -> CommandResult {
    match args.command {
        EarningCommand::Log {
            session,
            amount,
            source,
            balance_after,
        } => {
            let earning = repo
                .log_earning(session, amount, source.as_deref(), balance_after)
                .ok_or_else(|| format!("could not log earning for session {session}"))?;
            print_json(&earning)
        }
        EarningCommand::Total { character, days } => {
            let character = resolve_character(repo, character.as_deref())?;
            let total = repo.get_total_earnings(character.id, days);
            print_json(&json!({
                "character_id": character.id,
                "days": days,
                "total_earnings": total,
            }))
        }
    }
}
