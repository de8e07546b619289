//! Environment selection
//!
//! Resolves which environment overlay a run should use. Precedence:
//! explicit argument > `APP_ENV` process variable > `local`.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Process environment variable consulted when no explicit name is given.
pub const ENV_VAR_NAME: &str = "APP_ENV";

/// A deployment environment recognized by the engine.
///
/// Immutable once resolved for a given run; every variant maps to an
/// overlay directory of the same lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Local,
    Dev,
    Staging,
    Prod,
}

impl Environment {
    /// All recognized environments, in display order.
    pub const ALL: [Environment; 4] = [
        Environment::Local,
        Environment::Dev,
        Environment::Staging,
        Environment::Prod,
    ];

    /// Lowercase wire name, matching the overlay directory name.
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    /// Resolve the environment for this run.
    ///
    /// Precedence: `explicit` argument, then the `APP_ENV` process
    /// variable, then the fixed default `local`.
    pub fn select(explicit: Option<&str>) -> Result<Self> {
        Self::select_with(explicit, |var| std::env::var(var).ok())
    }

    /// Like [`Environment::select`] but with an injectable process-env
    /// lookup, so selection stays a pure function under test.
    pub fn select_with(
        explicit: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(name) = explicit {
            return name.parse();
        }
        match lookup(ENV_VAR_NAME) {
            Some(name) if !name.is_empty() => name.parse(),
            _ => Ok(Environment::Local),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            other => Err(Error::UnknownEnvironment {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
