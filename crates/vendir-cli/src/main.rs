//! vendir-bot CLI
//!
//! Lists, checks and updates the dependencies vendored by `vendir.yml`.

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::BotConfig;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} vendir dependency updater", "vendir-bot".green().bold());
        println!();
        println!("Run {} for available commands.", "vendir-bot --help".cyan());
        return Ok(());
    };

    match command {
        Commands::List { dir, json } => {
            let config = BotConfig::load(&dir, cli.config.as_deref())?;
            commands::run_list(&dir, &config, json)
        }
        Commands::Check { dir, json } => {
            let config = BotConfig::load(&dir, cli.config.as_deref())?;
            commands::run_check(&dir, &config, json)
        }
        Commands::Update {
            dir,
            dependencies,
            dry_run,
        } => {
            let config = BotConfig::load(&dir, cli.config.as_deref())?;
            commands::run_update(&dir, &config, &dependencies, dry_run)
        }
    }
}

/// Log to stderr so `--json` output stays parseable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{}: tracing subscriber already set", "warning".yellow());
    }
    tracing::debug!("Verbose mode enabled");
}
