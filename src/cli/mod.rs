//! Command-line interface definitions.

pub mod check;
pub mod diagnostic;
pub mod init;
pub mod output;
pub mod run;
pub mod send;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;

/// Tradebell - chat notifications for trading events.
#[derive(Parser, Debug)]
#[command(name = "tradebell")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    Init(InitArgs),

    /// Validate configuration and list the messengers it enables
    Check(ConfigPathArg),

    /// Send one message to every configured messenger
    Send(SendArgs),

    /// Notify on events read as JSON lines from stdin
    Run(RunArgs),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file [default: ./config.toml, then the user config dir]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConfigPathArg {
    /// The explicit path, or the default location.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}

/// Arguments for the `init` subcommand.
#[derive(Parser, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `send` subcommand.
#[derive(Parser, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Log the message instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Message text
    pub text: String,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Seconds to wait for in-flight notifications on shutdown
    #[arg(long, default_value = "5")]
    pub drain_secs: u64,
}

/// Run the parsed command.
///
/// # Errors
///
/// Returns a rendered diagnostic for any failure.
pub async fn execute(cli: Cli) -> miette::Result<()> {
    match cli.command {
        Commands::Init(args) => {
            init::execute(&args.config.path(), args.force).map_err(diagnostic::report)
        }
        Commands::Check(args) => check::execute(&args.path()),
        Commands::Send(args) => send::execute(&args).await.map_err(diagnostic::report),
        Commands::Run(args) => run::execute(&args).await.map_err(diagnostic::report),
    }
}

/// Load configuration for commands that can fall back to the log messenger.
///
/// A dry run tolerates a missing file and uses defaults.
#[allow(clippy::result_large_err)]
fn load_config(path: &Path, dry_run: bool) -> Result<Config> {
    if dry_run && !path.exists() {
        return Ok(Config::default());
    }
    Config::load(path)
}
