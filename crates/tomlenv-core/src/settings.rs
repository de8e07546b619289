//! Application schema and typed settings
//!
//! The concrete configuration contract of the application: the
//! declarative [`Schema`] interpreted by the validator, plus serde-typed
//! settings structs for direct in-process consumption without re-parsing
//! the generated file.

use std::path::PathBuf;

use serde::Deserialize;

use crate::schema::{Constraint, Field, FieldKind, Schema};
use crate::{Environment, Resolver, Result};

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: &[&str] = &["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

const PORT_MIN: i64 = 1;
const PORT_MAX: i64 = 65535;

/// The application's configuration schema.
///
/// Declaration order here is env-file output order.
pub fn schema() -> Schema {
    Schema::new(vec![
        Field::new("database.user", FieldKind::String)
            .required()
            .constraint(Constraint::NonEmpty),
        Field::new("database.password", FieldKind::String).required(),
        Field::new("database.name", FieldKind::String)
            .required()
            .constraint(Constraint::NonEmpty),
        Field::new("database.host", FieldKind::String)
            .required()
            .constraint(Constraint::NonEmpty)
            .env_override("POSTGRES_HOST"),
        Field::new("database.port", FieldKind::Integer)
            .required()
            .coercible()
            .constraint(Constraint::IntRange {
                min: PORT_MIN,
                max: PORT_MAX,
            }),
        Field::new("database.driver", FieldKind::String)
            .required()
            .constraint(Constraint::NonEmpty),
        Field::new("engine.echo", FieldKind::Boolean)
            .default_value(false)
            .coercible(),
        Field::new("engine.echo_pool", FieldKind::Boolean)
            .default_value(false)
            .coercible(),
        Field::new("engine.pool_size", FieldKind::Integer)
            .default_value(5i64)
            .coercible()
            .constraint(Constraint::IntRange { min: 1, max: 10_000 }),
        Field::new("engine.max_overflow", FieldKind::Integer)
            .default_value(10i64)
            .coercible()
            .constraint(Constraint::IntRange { min: 0, max: 10_000 }),
        Field::new("logging.level", FieldKind::String)
            .default_value("INFO")
            .constraint(Constraint::OneOf(LOG_LEVELS)),
        Field::new("secrets.secret_one", FieldKind::String),
        Field::new("secrets.secret_two", FieldKind::String),
    ])
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub driver: String,
}

impl DatabaseSettings {
    /// Connection string in SQLAlchemy-compatible form:
    /// `postgresql+<driver>://user:password@host:port/name`.
    pub fn dsn(&self) -> String {
        format!(
            "postgresql+{}://{}:{}@{}:{}/{}",
            self.driver, self.user, self.password, self.host, self.port, self.name
        )
    }
}

/// Connection-pool engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    pub echo: bool,
    pub echo_pool: bool,
    pub pool_size: u32,
    pub max_overflow: u32,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl LoggingSettings {
    /// Map the validated level string to a `tracing` level.
    ///
    /// `WARNING` maps to `WARN`; `CRITICAL` has no tracing equivalent and
    /// maps to `ERROR`.
    pub fn tracing_level(&self) -> tracing::Level {
        match self.level.as_str() {
            "DEBUG" => tracing::Level::DEBUG,
            "WARNING" => tracing::Level::WARN,
            "ERROR" | "CRITICAL" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

/// Optional secret values.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretsSettings {
    #[serde(default)]
    pub secret_one: Option<String>,
    #[serde(default)]
    pub secret_two: Option<String>,
}

/// The fully typed application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub database: DatabaseSettings,
    pub engine: EngineSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub secrets: Option<SecretsSettings>,
}

impl AppSettings {
    /// Resolve and type the configuration for one environment in a
    /// single call.
    pub fn load(root: impl Into<PathBuf>, env: Environment) -> Result<Self> {
        Resolver::new(root, schema()).resolve(env)?.into_typed()
    }
}
