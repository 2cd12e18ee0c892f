//! Entail CLI - Command-line interface for entailment hypergraph documents.

use anyhow::Context;
use clap::Parser;
use entail_cli::commands;
use entail_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let dir = cli.dir.as_path();
    let output = match cli.command {
        Command::Init(args) => commands::execute_init(args, dir, &config, &formatter)?,
        Command::Validate => commands::execute_validate(dir, &config, &formatter)?,
        Command::Costs => commands::execute_costs(dir, &config, &formatter)?,
        Command::Prune(args) => commands::execute_prune(args, dir, &config, &formatter)?,
        Command::History => commands::execute_history(dir, &config, &formatter)?,
        Command::Restore(args) => commands::execute_restore(args, dir, &config, &formatter)?,
        Command::Summary => commands::execute_summary(dir, &config, &formatter)?,
        Command::Stale => commands::execute_stale(dir, &config, &formatter)?,
    };

    println!("{}", output);
    Ok(())
}
