//! Source document loading
//!
//! A [`SourceTree`] locates the TOML documents for a configuration root:
//! a mandatory base document shared by all environments, an optional
//! per-environment overlay, and an optional per-environment secrets
//! overlay. Documents parse into raw untyped mappings; nothing here is
//! validated beyond TOML syntax.

use std::fs;
use std::path::{Path, PathBuf};

use toml::Table;

use crate::{Environment, Error, Result};

/// Filename of the base document and of each environment overlay.
pub const CONFIG_FILE: &str = "config.toml";

/// Filename of the optional per-environment secrets overlay.
pub const SECRETS_FILE: &str = ".secrets.toml";

/// The on-disk layout of configuration sources under one root directory.
///
/// ```text
/// <root>/config.toml           base (mandatory)
/// <root>/<env>/config.toml     overlay (optional)
/// <root>/<env>/.secrets.toml   secrets overlay (optional)
/// <root>/<env>/.env.<env>      generated output
/// ```
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn base_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn overlay_path(&self, env: Environment) -> PathBuf {
        self.root.join(env.as_str()).join(CONFIG_FILE)
    }

    pub fn secrets_path(&self, env: Environment) -> PathBuf {
        self.root.join(env.as_str()).join(SECRETS_FILE)
    }

    /// Default path of the generated env file for an environment.
    pub fn env_file_path(&self, env: Environment) -> PathBuf {
        self.root
            .join(env.as_str())
            .join(format!(".env.{}", env.as_str()))
    }

    pub fn overlay_exists(&self, env: Environment) -> bool {
        self.overlay_path(env).is_file()
    }

    pub fn secrets_exists(&self, env: Environment) -> bool {
        self.secrets_path(env).is_file()
    }

    /// Load the mandatory base document.
    ///
    /// Fails with [`Error::SourceNotFound`] when the file is missing.
    pub fn load_base(&self) -> Result<Table> {
        let path = self.base_path();
        if !path.is_file() {
            return Err(Error::SourceNotFound { path });
        }
        tracing::debug!(?path, "Loading base document");
        read_table(&path)
    }

    /// Load the environment overlay, substituting an empty mapping when
    /// the file is absent.
    pub fn load_overlay(&self, env: Environment) -> Result<Table> {
        let path = self.overlay_path(env);
        if !path.is_file() {
            tracing::debug!(?path, "No overlay document — substituting empty mapping");
            return Ok(Table::new());
        }
        tracing::debug!(?path, "Loading overlay document");
        read_table(&path)
    }

    /// Load the secrets overlay, substituting an empty mapping when the
    /// file is absent.
    pub fn load_secrets(&self, env: Environment) -> Result<Table> {
        let path = self.secrets_path(env);
        if !path.is_file() {
            tracing::debug!(?path, "No secrets document — substituting empty mapping");
            return Ok(Table::new());
        }
        tracing::debug!(?path, "Loading secrets document");
        read_table(&path)
    }
}

/// Parse one TOML document into a raw mapping.
///
/// Syntax errors surface as [`Error::MalformedSource`] carrying the file
/// identity and the parser's line/column rendering.
fn read_table(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    content.parse::<Table>().map_err(|e| Error::MalformedSource {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
