//! Diff command implementation
//!
//! Shows what generate would change in the existing env file, without
//! writing anything. Header comment lines are excluded from the
//! comparison so a timestamp alone never shows as drift.

use std::fs;
use std::path::Path;

use colored::Colorize;
use similar::TextDiff;

use tomlenv_core::{Environment, Resolver, settings};

use crate::error::Result;

/// Run the diff command
pub fn run_diff(root: &Path, env: Environment, out: Option<&Path>) -> Result<()> {
    let resolver = Resolver::new(root, settings::schema());
    let (_, lines) = resolver.render(env)?;

    let target = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| resolver.tree().env_file_path(env));

    let current = if target.is_file() {
        fs::read_to_string(&target)?
    } else {
        String::new()
    };
    let current_body = strip_header(&current);
    let generated_body: String = lines.iter().map(|l| format!("{l}\n")).collect();

    if current_body == generated_body {
        println!(
            "{} {} is up to date for {}",
            "OK".green().bold(),
            target.display().to_string().yellow(),
            env.to_string().cyan()
        );
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "Diff".blue().bold(),
        target.display().to_string().yellow(),
        env.to_string().cyan()
    );
    println!();
    let diff = TextDiff::from_lines(&current_body, &generated_body);
    print!("{}", diff.unified_diff().header("current", "generated"));

    Ok(())
}

/// Drop generated-header comment lines, keeping only KEY=VALUE lines.
fn strip_header(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| format!("{line}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tomlenv_test_utils::ConfigTree;

    #[test]
    fn freshly_generated_file_shows_no_drift() {
        let tree = ConfigTree::with_sample_base();
        let resolver = Resolver::new(tree.root(), settings::schema());
        resolver
            .generate(Environment::Local, None, Utc::now())
            .unwrap();
        run_diff(tree.root(), Environment::Local, None).unwrap();
    }

    #[test]
    fn missing_target_file_still_diffs() {
        let tree = ConfigTree::with_sample_base();
        run_diff(tree.root(), Environment::Local, None).unwrap();
    }

    #[test]
    fn header_lines_are_ignored() {
        let stripped = strip_header(
            "# This .env file was automatically generated\n# Environment: dev\nA=1\n\nB=2\n",
        );
        assert_eq!(stripped, "A=1\nB=2\n");
    }
}
