//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod asset;
mod fetch;
mod init;
mod serve;
mod status;
mod user;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "assetman")]
#[command(about = "Asset inventory tracking and assignment system")]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Start the web server
    Serve {
        /// Bind address: port, host, or host:port
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Manage assets
    Asset {
        #[command(subcommand)]
        command: asset::AssetCommands,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        command: user::UserCommands,
    },

    /// Fetch an asset listing from a URL and display it
    Fetch {
        /// Asset listing URL, e.g. http://localhost:3030/api/assets
        url: String,
    },

    /// Show inventory status
    Status,
}

/// Print a hint when the database has not been initialized yet.
fn require_database(settings: &Settings) -> anyhow::Result<()> {
    if !settings.database_exists() {
        eprintln!(
            "{} No database found at {}",
            style("✗").red(),
            settings.database_path().display()
        );
        eprintln!("  Run `assetman init` first");
        anyhow::bail!("database not initialized");
    }
    Ok(())
}

/// Parse CLI arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.data_dir);

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Asset { command } => {
            require_database(&settings)?;
            asset::cmd_asset(&settings, command).await
        }
        Commands::User { command } => {
            require_database(&settings)?;
            user::cmd_user(&settings, command).await
        }
        Commands::Fetch { url } => fetch::cmd_fetch(&url).await,
        Commands::Status => {
            require_database(&settings)?;
            status::cmd_status(&settings).await
        }
    }
}
