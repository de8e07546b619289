//! Generate command implementation
//!
//! Resolves the configuration for the selected environment and writes the
//! env file, or prints the rendered lines in dry-run mode.

use std::path::Path;

use chrono::Utc;
use colored::Colorize;

use tomlenv_core::{Environment, Resolver, settings};

use crate::error::Result;

/// Run the generate command
pub fn run_generate(
    root: &Path,
    env: Environment,
    out: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let resolver = Resolver::new(root, settings::schema());

    if dry_run {
        let (_, lines) = resolver.render(env)?;
        println!(
            "{} would write for {} ({} lines):",
            "dry-run".yellow().bold(),
            env.to_string().cyan(),
            lines.len()
        );
        for line in &lines {
            println!("{line}");
        }
        return Ok(());
    }

    let path = resolver.generate(env, out, Utc::now())?;
    println!(
        "{} generated {} for {}",
        "OK".green().bold(),
        path.display().to_string().yellow(),
        env.to_string().cyan()
    );
    Ok(())
}
