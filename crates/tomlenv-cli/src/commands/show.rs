//! Show command implementation
//!
//! Prints the resolved configuration as a TOML table or as JSON for
//! scripting.

use std::path::Path;

use colored::Colorize;

use tomlenv_core::{Environment, Resolver, settings};

use crate::error::Result;

/// Run the show command
pub fn run_show(root: &Path, env: Environment, json: bool) -> Result<()> {
    let resolver = Resolver::new(root, settings::schema());
    let config = resolver.resolve(env)?;
    let table = config.to_table();

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!(
            "{} resolved configuration for {}",
            "OK".green().bold(),
            env.to_string().cyan()
        );
        println!();
        print!("{}", toml::to_string_pretty(&table)?);
    }

    Ok(())
}
