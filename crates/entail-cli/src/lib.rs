//! Entail CLI library.
//!
//! Configuration loading, command execution and output formatting for the
//! `entail` binary. Every command works on the document kept in one
//! directory (`hypergraph.json` plus its `history/`).

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{Config, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;
