//! [`ConfigTree`] builder for configuration-root test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A base document that satisfies the application schema, used by tests
/// that only care about one aspect of the pipeline.
pub const SAMPLE_BASE: &str = r#"[database]
user = "app"
password = "app-password"
name = "appdb"
host = "localhost"
port = 5432
driver = "asyncpg"
"#;

/// A temporary configuration root with helper methods for laying out
/// base, overlay and secrets documents.
///
/// # Example
///
/// ```rust,no_run
/// use tomlenv_test_utils::ConfigTree;
///
/// let tree = ConfigTree::new();
/// tree.write_base("[database]\nhost = \"localhost\"\n");
/// tree.write_overlay("prod", "[database]\nhost = \"prod-db\"\n");
/// tree.assert_file_exists("prod/config.toml");
/// ```
pub struct ConfigTree {
    temp_dir: TempDir,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Create an empty temporary configuration root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a root already holding [`SAMPLE_BASE`] as the base document.
    pub fn with_sample_base() -> Self {
        let tree = Self::new();
        tree.write_base(SAMPLE_BASE);
        tree
    }

    /// Return the configuration root path.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write the base document at `<root>/config.toml`.
    pub fn write_base(&self, content: &str) {
        fs::write(self.root().join("config.toml"), content).unwrap();
    }

    /// Write an environment overlay at `<root>/<env>/config.toml`.
    pub fn write_overlay(&self, env: &str, content: &str) {
        let dir = self.root().join(env);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), content).unwrap();
    }

    /// Write a secrets overlay at `<root>/<env>/.secrets.toml`.
    pub fn write_secrets(&self, env: &str, content: &str) {
        let dir = self.root().join(env);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(".secrets.toml"), content).unwrap();
    }

    /// Default generated env-file path for an environment.
    pub fn env_file_path(&self, env: &str) -> PathBuf {
        self.root().join(env).join(format!(".env.{env}"))
    }

    /// Read the generated env file for an environment.
    ///
    /// # Panics
    /// Panics if the file does not exist.
    pub fn read_env_file(&self, env: &str) -> String {
        let path = self.env_file_path(env);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_absent(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file to be absent: {}",
            full_path.display()
        );
    }
}
