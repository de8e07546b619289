//! tomlenv CLI
//!
//! Thin wrapper over the tomlenv-core resolution engine: regenerates,
//! checks and inspects environment-specific configuration artifacts.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;
use tomlenv_core::Environment;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => commands::run_completions(shell),
        Some(cmd) => {
            let env = Environment::select(cli.env.as_deref())?;
            execute_command(cmd, &cli.root, env)
        }
        None => {
            // No command provided - show help hint
            println!("{} tomlenv CLI", "tomlenv".green().bold());
            println!();
            println!("Run {} for available commands.", "tomlenv --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, root: &std::path::Path, env: Environment) -> Result<()> {
    match cmd {
        Commands::Generate { out, dry_run } => {
            commands::run_generate(root, env, out.as_deref(), dry_run)
        }
        Commands::Check => commands::run_check(root, env),
        Commands::Show { json } => commands::run_show(root, env, json),
        Commands::Diff { out } => commands::run_diff(root, env, out.as_deref()),
        Commands::Envs => commands::run_envs(root, env),
        Commands::Completions { .. } => unreachable!("handled before environment selection"),
    }
}
