use super::{print_json, resolve_character, resolve_or_create_character, CommandResult};
use clap::{Args, Subcommand};
use playlog_core::{Repository, DEFAULT_RECENT_SESSIONS};

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Open a session starting now
    Start {
        /// Character name (created if absent); defaults to the active character
        #[arg(long)]
        character: Option<String>,
        /// In-game balance at session start
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        money: i64,
    },
    /// Close a session and settle its earnings
    End {
        id: i64,
        /// In-game balance at session end
        #[arg(long, allow_hyphen_values = true)]
        money: i64,
    },
    /// Newest sessions of a character first
    Recent {
        #[arg(long)]
        character: Option<String>,
        #[arg(long, default_value_t = DEFAULT_RECENT_SESSIONS)]
        limit: u32,
    },
    /// Print a session with its activities and earnings
    Export { id: i64 },
}

pub fn execute(args: SessionArgs, repo: &mut Repository) -> CommandResult {
    match args.command {
        SessionCommand::Start { character, money } => {
            let character = resolve_or_create_character(repo, character.as_deref())?;
            let session = repo
                .start_session(&character, money)
                .ok_or("could not start session")?;
            print_json(&session)
        }
        SessionCommand::End { id, money } => {
            if !repo.end_session(id, money) {
                return Err(format!("session {id} not found").into());
            }
            let data = repo
                .export_session_data(id)
                .ok_or_else(|| format!("session {id} not found"))?;
            print_json(&data.session)
        }
        SessionCommand::Recent { character, limit } => {
            let character = resolve_character(repo, character.as_deref())?;
            print_json(&repo.get_recent_sessions(character.id, limit))
        }
        SessionCommand::Export { id } => {
            let data = repo
                .export_session_data(id)
                .ok_or_else(|| format!("session {id} not found"))?;
            print_json(&data)
        }
    }
}
