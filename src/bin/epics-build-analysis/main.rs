//! epics-build-analysis CLI

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use epics_build_analysis::util::config::CONFIG_FILE_NAME;
use epics_build_analysis::Config;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("epics_build_analysis=debug")
    } else {
        EnvFilter::new("epics_build_analysis=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config = load_config(&cli)?;

    // Execute command
    match cli.command {
        Commands::Compare(args) => commands::compare::execute(&config, args),
        Commands::Deps(args) => commands::deps::execute(&config, args),
        Commands::Analyze(args) => commands::analyze::execute(&config, args),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        // An explicit config file must load
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(CONFIG_FILE_NAME)),
    };

    if let Some(dir) = &cli.output_dir {
        config.paths.output_dir = dir.clone();
    }

    Ok(config)
}
