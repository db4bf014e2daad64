mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;
use sidekick_core::{FileStore, SessionManager, SidekickConfig, SidekickEngine};
use tracing::info;

use crate::output::Output;

#[derive(Parser)]
#[command(name = "sidekick-cli")]
#[command(about = "Divergify sidekick engine CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Session store file path (overrides the default data dir)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat with the sidekick
    Chat,
    /// Classify a single message and show the detected state
    Classify {
        /// The message text
        text: String,
    },
    /// Overwhelm check-in management
    Checkin {
        #[command(subcommand)]
        cmd: CheckinCommands,
    },
    /// Show the support profile for a value or the stored session
    Profile {
        /// Overwhelm value 0-100; omitted = use the stored session
        value: Option<f64>,
    },
}

#[derive(Subcommand)]
enum CheckinCommands {
    /// Record a check-in value (0-100)
    Set { value: f64 },
    /// Skip the check-in for the current TTL window
    Skip,
    /// Clear the stored check-in value
    Clear,
    /// Show check-in freshness and the stored value
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if cli.debug {
        EnvFilter::new("sidekick_core=debug,sidekick_cli=debug")
    } else {
        EnvFilter::new("sidekick_core=info,sidekick_cli=info,warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        info!("Loading config from: {:?}", config_path);
        SidekickConfig::load(config_path)?
    } else {
        SidekickConfig::default()
    };

    let store_path = cli.store.clone().unwrap_or_else(default_store_path);
    tracing::debug!("Using session store at: {:?}", store_path);

    let engine = SidekickEngine::new(&config);
    let sessions = SessionManager::new(FileStore::new(store_path), &config);
    let output = Output::new();

    match &cli.command {
        Commands::Chat => commands::chat::run(&engine, &sessions, &output),
        Commands::Classify { text } => {
            commands::classify::run(&engine, text, &output);
            Ok(())
        }
        Commands::Checkin { cmd } => {
            match cmd {
                CheckinCommands::Set { value } => commands::checkin::set(&sessions, *value, &output),
                CheckinCommands::Skip => commands::checkin::skip(&sessions, &output),
                CheckinCommands::Clear => commands::checkin::clear(&sessions, &output),
                CheckinCommands::Status => commands::checkin::status(&sessions, &output),
            }
            Ok(())
        }
        Commands::Profile { value } => {
            commands::profile::run(&sessions, *value, &output);
            Ok(())
        }
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sidekick")
        .join("session.json")
}
