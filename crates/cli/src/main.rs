//! Fingertrail CLI - fpd command

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli_lib::{cmd, config, daemon};
use ft_core::Game;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fingertrail - Content fingerprint tracking for live games
#[derive(Parser)]
#[command(name = "fpd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "FINGERTRAIL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the change detector and HTTP server in the foreground
    Serve {
        /// Keep fingerprints in memory instead of the on-disk journal
        #[arg(long)]
        memory: bool,
    },
    /// Show record counts and the latest fingerprint per game
    Status,
    /// Show fingerprint history for a game, newest first
    History {
        /// Game name or slug (e.g. clash-royale)
        game: Game,
        /// Number of entries to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the latest fingerprint for a game
    Latest {
        /// Game name or slug
        game: Game,
    },
    /// Print the stored fingerprint document for a sha
    Show {
        /// Game name or slug
        game: Game,
        /// Fingerprint sha
        sha: String,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Show configuration
    Config {
        /// Print a commented example config
        #[arg(long)]
        example: bool,
        /// Print the config file location only
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let explicit = cli.config.as_deref();

    if let Commands::Config { example: true, .. } = cli.command {
        return cmd::config::run(&config::Config::default(), explicit, true, false).await;
    }

    let config = config::load(explicit)?;

    match cli.command {
        Commands::Serve { memory } => daemon::serve(config, memory).await,
        Commands::Status => cmd::status::run(&config).await,
        Commands::History { game, limit } => cmd::history::run(&config, game, limit).await,
        Commands::Latest { game } => cmd::latest::run(&config, game).await,
        Commands::Show { game, sha, json } => cmd::show::run(&config, game, &sha, json).await,
        Commands::Config { example, path } => {
            cmd::config::run(&config, explicit, example, path).await
        }
    }
}
