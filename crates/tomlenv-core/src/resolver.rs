//! Pipeline orchestration
//!
//! The [`Resolver`] wires the stages together: load base + overlay +
//! secrets, deep-merge them under document precedence, validate against
//! the schema, and render/write the env file. Every method is a pure
//! function of the sources on disk and the process environment; no state
//! is carried between runs.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use toml::Table;

use crate::render::{EnvFileLine, render_document, render_lines};
use crate::schema::Schema;
use crate::source::SourceTree;
use crate::validate::{ValidatedConfig, validate};
use crate::{Environment, Result, io, merge};

/// Resolves environment-specific configuration from a source tree
/// against a schema.
#[derive(Debug, Clone)]
pub struct Resolver {
    tree: SourceTree,
    schema: Schema,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>, schema: Schema) -> Self {
        Self {
            tree: SourceTree::new(root),
            schema,
        }
    }

    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Load and merge the source documents without validating.
    ///
    /// Document precedence, lowest to highest: base, environment overlay,
    /// secrets overlay.
    pub fn merged(&self, env: Environment) -> Result<Table> {
        let base = self.tree.load_base()?;
        let overlay = self.tree.load_overlay(env)?;
        let secrets = self.tree.load_secrets(env)?;
        tracing::debug!(%env, "Merging base, overlay and secrets documents");
        let merged = merge::deep_merge(&base, &overlay);
        Ok(merge::deep_merge(&merged, &secrets))
    }

    /// Run the full load → merge → validate pipeline.
    pub fn resolve(&self, env: Environment) -> Result<ValidatedConfig> {
        let merged = self.merged(env)?;
        tracing::debug!(%env, "Validating merged mapping against schema");
        validate(&self.schema, &merged, env)
    }

    /// Resolve and render the env-file lines.
    pub fn render(&self, env: Environment) -> Result<(ValidatedConfig, Vec<EnvFileLine>)> {
        let config = self.resolve(env)?;
        let lines = render_lines(&config)?;
        Ok((config, lines))
    }

    /// Resolve, render and atomically write the env file.
    ///
    /// Writes to `out` when given, otherwise to the tree's default
    /// `<root>/<env>/.env.<env>` path. The full document is composed in
    /// memory first, so a failure anywhere in the pipeline leaves any
    /// previous file untouched. Returns the written path.
    pub fn generate(
        &self,
        env: Environment,
        out: Option<&Path>,
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let config = self.resolve(env)?;
        let document = render_document(&config, generated_at)?;
        let path = out
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.tree.env_file_path(env));
        io::write_atomic(&path, document.as_bytes())?;
        tracing::info!(%env, path = %path.display(), "Generated env file");
        Ok(path)
    }
}
