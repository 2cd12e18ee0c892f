//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Entail CLI - Maintain an entailment hypergraph document.
#[derive(Debug, Parser)]
#[command(name = "entail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding hypergraph.json and its history
    #[arg(short, long, global = true, env = "ENTAIL_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file path (default: ~/.entail/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new document holding only the root claim
    Init(InitArgs),

    /// Validate the document on disk
    Validate,

    /// Show the cost of every claim
    Costs,

    /// Remove claims that do not feed the root
    Prune(PruneArgs),

    /// List history snapshots, oldest first
    History,

    /// Make a history snapshot the current document
    Restore(RestoreArgs),

    /// Show the document overview
    Summary,

    /// List implications that need an entailment check
    Stale,
}

/// Arguments for the init command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Text of the root hypothesis
    pub hypothesis: String,

    /// Document name
    #[arg(short, long, default_value = "Untitled")]
    pub name: String,

    /// Document description
    #[arg(long, default_value = "")]
    pub description: String,
}

/// Arguments for the prune command.
#[derive(Debug, Parser)]
pub struct PruneArgs {
    /// Report what would be removed without removing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the restore command.
#[derive(Debug, Parser)]
pub struct RestoreArgs {
    /// Snapshot id as shown by 'history'
    pub id: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Log filter implied by the verbosity flag
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_command() {
        let cli = Cli::parse_from(["entail", "init", "The hypothesis", "--name", "Study"]);
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.hypothesis, "The hypothesis");
                assert_eq!(args.name, "Study");
            }
            _ => panic!("Expected Init command"),
        }
        assert_eq!(cli.dir, PathBuf::from("."));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["entail", "prune", "--dry-run", "--dir", "/tmp/doc", "--format", "json"]);
        match cli.command {
            Command::Prune(args) => assert!(args.dry_run),
            _ => panic!("Expected Prune command"),
        }
        assert_eq!(cli.dir, PathBuf::from("/tmp/doc"));
        assert_eq!(cli.format, Some(CliFormat::Json));
    }

    #[test]
    fn test_restore_requires_id() {
        assert!(Cli::try_parse_from(["entail", "restore"]).is_err());
        let cli = Cli::parse_from(["entail", "restore", "000001-x"]);
        assert!(matches!(cli.command, Command::Restore(RestoreArgs { ref id }) if id == "000001-x"));
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(Cli::parse_from(["entail", "summary"]).log_level(), "warn");
        assert_eq!(Cli::parse_from(["entail", "-vv", "summary"]).log_level(), "debug");
    }
}
