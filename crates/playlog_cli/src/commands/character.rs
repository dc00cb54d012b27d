use super::{print_json, CommandResult};
use clap::{Args, Subcommand};
use playlog_core::Repository;

#[derive(Debug, Args)]
pub struct CharacterArgs {
    #[command(subcommand)]
    pub command: CharacterCommand,
}

#[derive(Debug, Subcommand)]
pub enum CharacterCommand {
    /// Get or create a character by exact name
    Add {
        name: String,
        /// Also make it the active character
        #[arg(long)]
        activate: bool,
    },
    /// List all characters
    List,
    /// Show the active character
    Active,
    /// Make a character the only active one
    Activate { id: i64 },
}

pub fn execute(args: CharacterArgs, repo: &mut Repository) -> CommandResult {
    match args.command {
        CharacterCommand::Add { name, activate } => {
            let character = repo
                .get_or_create_character(&name)
                .ok_or_else(|| format!("could not create character `{name}`"))?;
            if activate && !repo.set_active_character(character.id) {
                return Err(format!("could not activate character {}", character.id).into());
            }
            let character = if activate {
                repo.get_active_character().unwrap_or(character)
            } else {
                character
            };
            print_json(&character)
        }
        CharacterCommand::List => print_json(&repo.get_all_characters()),
        CharacterCommand::Active => {
            let character = repo
                .get_active_character()
                .ok_or("no active character")?;
            print_json(&character)
        }
        CharacterCommand::Activate { id } => {
            if !repo.set_active_character(id) {
                return Err(format!("character {id} not found").into());
            }
            println!("Activated character {id}");
            Ok(())
        }
    }
}
