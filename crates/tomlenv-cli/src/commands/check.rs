//! Check command implementation
//!
//! Validates the configuration for the selected environment without
//! writing anything. Validation failures propagate to main, which prints
//! the complete violation list on stderr.

use std::path::Path;

use colored::Colorize;

use tomlenv_core::{Environment, Resolver, settings};

use crate::error::Result;

/// Run the check command
pub fn run_check(root: &Path, env: Environment) -> Result<()> {
    let resolver = Resolver::new(root, settings::schema());
    let config = resolver.resolve(env)?;
    println!(
        "{} configuration for {} is valid ({} fields)",
        "OK".green().bold(),
        env.to_string().cyan(),
        config.entries().len()
    );
    Ok(())
}
