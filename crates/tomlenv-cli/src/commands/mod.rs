//! Command implementations for tomlenv-cli

pub mod check;
pub mod completions;
pub mod diff;
pub mod envs;
pub mod generate;
pub mod show;

pub use check::run_check;
pub use completions::run_completions;
pub use diff::run_diff;
pub use envs::run_envs;
pub use generate::run_generate;
pub use show::run_show;
