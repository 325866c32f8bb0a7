mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Directory for daily rolling log files; logs go to stderr when unset.
const LOG_DIR_ENV: &str = "PEDTRACK_LOG_DIR";

#[derive(Parser)]
#[command(version, about = "Track hunting sessions from the game chat log")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that build a session.
#[derive(clap::Args, Clone, Default)]
pub struct SessionArgs {
    /// Avatar name used to pick out the player's own globals
    #[arg(long)]
    pub player: Option<String>,
    /// Loadout definition (TOML) to price shots and decay with
    #[arg(short, long)]
    pub loadout: Option<PathBuf>,
    /// Cost per shot when no loadout is active
    #[arg(long)]
    pub cost_per_shot: Option<f64>,
    /// Session name
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the chat log live; Ctrl+C ends and saves the session
    Watch {
        #[arg(short, long)]
        path: Option<PathBuf>,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Classify a whole log file and print its statistics
    Parse {
        #[arg(short, long)]
        path: PathBuf,
        #[command(flatten)]
        session: SessionArgs,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
        /// Also store the parsed session
        #[arg(long)]
        save: bool,
    },
    /// Manage stored sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Show or update the configuration
    Config {
        #[arg(long)]
        log_path: Option<String>,
        #[arg(long)]
        player: Option<String>,
        #[arg(long)]
        cost_per_shot: Option<f64>,
        #[arg(long)]
        loadout: Option<String>,
        #[arg(long)]
        european_numbers: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    List,
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    Delete {
        id: String,
    },
    Export {
        id: String,
        path: PathBuf,
    },
    Import {
        path: PathBuf,
    },
}

fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
        let appender = tracing_appender::rolling::daily(dir, "pedtrack.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .init();
        return Some(guard);
    }

    // stdout carries event output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    None
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let _guard = init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch { path, session } => commands::watch(path, session).await,
        Commands::Parse {
            path,
            session,
            json,
            save,
        } => commands::parse(&path, session, json, save),
        Commands::Sessions { command } => commands::sessions(command),
        Commands::Config {
            log_path,
            player,
            cost_per_shot,
            loadout,
            european_numbers,
        } => commands::config(log_path, player, cost_per_shot, loadout, european_numbers),
    }
}
