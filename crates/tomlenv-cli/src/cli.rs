//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// tomlenv - Resolve environment-specific configuration from TOML sources
#[derive(Parser, Debug)]
#[command(name = "tomlenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration root directory
    #[arg(long, global = true, default_value = "config", env = "TOMLENV_ROOT")]
    pub root: PathBuf,

    /// Environment to resolve (falls back to APP_ENV, then "local")
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate the env file for the resolved environment
    Generate {
        /// Write to this path instead of <root>/<env>/.env.<env>
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the rendered lines without writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration without writing anything
    Check,

    /// Print the resolved configuration
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show what generate would change in the existing env file
    Diff {
        /// Compare against this path instead of <root>/<env>/.env.<env>
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List known environments and their source documents
    Envs,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
