use super::{print_json, resolve_character, CommandResult};
use clap::{Args, Subcommand};
use playlog_core::{NewBusinessSnapshot, Repository};

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    #[command(subcommand)]
    pub command: SnapshotCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnapshotCommand {
    /// Record a business state reading taken now
    Save {
        /// Business type, e.g. BUNKER
        business: String,
        #[arg(long)]
        character: Option<String>,
        #[arg(long)]
        stock: Option<i64>,
        #[arg(long)]
        supply: Option<i64>,
        #[arg(long)]
        value: Option<i64>,
    },
    /// Most recent reading for a business type
    Latest {
        business: String,
        #[arg(long)]
        character: Option<String>,
    },
}

pub fn execute(args: SnapshotArgs, repo: &mut Repository) -> CommandResult {
    match args.command {
        SnapshotCommand::Save {
            business,
            character,
            stock,
            supply,
            value,
        } => {
            let character = resolve_character(repo, character.as_deref())?;
            let request = NewBusinessSnapshot {
                stock_level: stock,
                supply_level: supply,
                stock_value: value,
                ..NewBusinessSnapshot::new(character.id, business)
            };
            let snapshot = repo
                .save_business_snapshot(&request)
                .ok_or("could not save business snapshot")?;
            print_json(&snapshot)
        }
        SnapshotCommand::Latest {
            business,
            character,
        } => {
            let character = resolve_character(repo, character.as_deref())?;
            let snapshot = repo
                .get_latest_business_snapshot(character.id, &business)
                .ok_or_else(|| format!("no `{business}` snapshot for {}", character.name))?;
            print_json(&snapshot)
        }
    }
}
