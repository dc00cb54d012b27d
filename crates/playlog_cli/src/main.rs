//! `playlog` command-line entry point.
//!
//! # Responsibility
//! - Resolve store/log locations and initialize logging.
//! - Build one `Repository` and dispatch a single subcommand against it.

use clap::{Parser, Subcommand};
use log::warn;
use playlog_core::{default_log_level, init_logging, Repository};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "playlog")]
#[command(about = "Play-session, activity and earnings tracker", long_about = None)]
#[command(version = playlog_core::core_version())]
struct Cli {
    /// Store file path (`:memory:` for a throwaway store)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Character management
    Character(commands::character::CharacterArgs),
    /// Session lifecycle
    Session(commands::session::SessionArgs),
    /// Activity logging and statistics
    Activity(commands::activity::ActivityArgs),
    /// Earnings events and totals
    Earning(commands::earning::EarningArgs),
    /// Business state snapshots
    Snapshot(commands::snapshot::SnapshotArgs),
    /// File exports
    Export(commands::export::ExportArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = config::resolve_log_dir(cli.log_dir.as_deref()) {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("Warning: logging disabled: {err}");
        }
    }

    let location = config::resolve_store_location(cli.db.as_deref());
    let mut repo = Repository::new(location);
    if !repo.initialize() {
        eprintln!("Error: could not open store at {}", repo.location());
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Character(args) => commands::character::execute(args, &mut repo),
        Commands::Session(args) => commands::session::execute(args, &mut repo),
        Commands::Activity(args) => commands::activity::execute(args, &mut repo),
        Commands::Earning(args) => commands::earning::execute(args, &mut repo),
        Commands::Snapshot(args) => commands::snapshot::execute(args, &mut repo),
        Commands::Export(args) => commands::export::execute(args, &mut repo),
    };

    repo.close();

    if let Err(e) = result {
        warn!("event=cli_command module=cli status=error error={e}");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
