//! Envs command implementation
//!
//! Lists the known environments, marking which have overlay and secrets
//! documents and which one the current invocation resolves to.

use std::path::Path;

use colored::Colorize;

use tomlenv_core::{Environment, SourceTree};

use crate::error::Result;

/// Run the envs command
pub fn run_envs(root: &Path, selected: Environment) -> Result<()> {
    let tree = SourceTree::new(root);

    println!("{}", "Environments".bold());
    println!();
    for env in Environment::ALL {
        let marker = if env == selected {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        let overlay = if tree.overlay_exists(env) {
            "overlay".cyan().to_string()
        } else {
            "-".dimmed().to_string()
        };
        let secrets = if tree.secrets_exists(env) {
            "secrets".cyan().to_string()
        } else {
            "-".dimmed().to_string()
        };
        println!("{marker} {:<10} {overlay:<12} {secrets}", env.to_string());
    }
    println!();
    println!(
        "Selected: {} (explicit {} > {} > default {})",
        selected.to_string().cyan(),
        "--env".bold(),
        "APP_ENV".bold(),
        "local".cyan()
    );

    Ok(())
}
