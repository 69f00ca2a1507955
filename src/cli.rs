//! CLI argument parsing for oppnda-check

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "oppnda-check")]
#[command(version)]
#[command(
    about = "Config, artifact and snapshot checks for an OppNDA project tree",
    long_about = None
)]
pub struct Cli {
    /// Project root (defaults to $OPPNDA_ROOT, then the current directory)
    #[arg(short, long, global = true, env = "OPPNDA_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Checker settings file (defaults to <root>/oppnda-check.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Exit with status 1 when any check fails or any snapshot is not clean
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable debug tracing on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Validate the JSON configuration files
    Configs,
    /// Check sources parse, GUI assets exist and the settings page is well formed
    Framework,
    /// Run both suites (default)
    All,
    /// Capture or compare file snapshots
    #[command(subcommand)]
    Snapshot(SnapshotCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotCommand {
    /// Record the digest of every baseline file
    Capture,
    /// Compare every baseline file with its recorded digest
    Compare,
}

impl Cli {
    /// Subcommand to run, `all` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::All)
    }
}
