//! Env-file rendering
//!
//! Serializes a [`ValidatedConfig`] into an ordered sequence of
//! `KEY=VALUE` lines. Output order is schema declaration order, never the
//! insertion order of the source documents, so identical validated input
//! renders byte-identically.

use std::fmt;

use chrono::{DateTime, Utc};
use toml::Value;

use crate::validate::ValidatedConfig;
use crate::{Error, Result};

/// A single `KEY=VALUE` output unit.
///
/// The key is the schema field's export name; the value is a string-safe
/// scalar serialization. Shell quoting is the consuming boundary's
/// concern, not the renderer's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileLine {
    pub key: String,
    pub value: String,
}

impl fmt::Display for EnvFileLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Render one line per resolved field, in schema declaration order.
///
/// Fails with [`Error::UnflattenableValue`] if a nested table or array
/// reaches this stage; the schema is flat by contract, so this guards a
/// schema declaration mistake (for instance a table default).
pub fn render_lines(config: &ValidatedConfig) -> Result<Vec<EnvFileLine>> {
    config
        .entries()
        .iter()
        .map(|entry| {
            let value = scalar_to_string(entry.value()).ok_or_else(|| {
                Error::UnflattenableValue {
                    field: entry.path().to_string(),
                }
            })?;
            Ok(EnvFileLine {
                key: entry.export().to_string(),
                value,
            })
        })
        .collect()
}

/// Render the complete env-file document, including the generated header.
///
/// The timestamp is injected by the caller so rendering itself stays
/// deterministic; tests pin it, the CLI passes `Utc::now()`.
pub fn render_document(
    config: &ValidatedConfig,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let lines = render_lines(config)?;
    let mut out = String::new();
    out.push_str("# This .env file was automatically generated from TOML configuration sources.\n");
    out.push_str("# Do not edit it directly; regenerate instead.\n");
    out.push_str(&format!("# Environment: {}\n", config.environment()));
    out.push_str(&format!("# Generated: {}\n", generated_at.to_rfc3339()));
    for line in &lines {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    Ok(out)
}

/// Serialize a scalar TOML value for env-file output.
///
/// Booleans render lowercase, datetimes in TOML form, strings as-is.
/// Returns `None` for tables and arrays.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}
