//! Schema validation of merged mappings
//!
//! Converts a merged raw mapping into a [`ValidatedConfig`] or fails with
//! the complete set of field-level violations. Validation never
//! short-circuits: every problem across the whole schema is accumulated
//! before the error is returned, so a caller sees everything in one pass.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::schema::{Field, FieldKind, Schema, value_kind_name};
use crate::{Environment, Error, Result};

/// A single field-level violation found during validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// Required field with no default is absent from the merged mapping
    #[error("missing required field `{field}`")]
    MissingRequired { field: String },

    /// Value kind does not match the declared kind and no coercion applies
    #[error("field `{field}`: expected {expected}, received {received} `{value}`")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        received: &'static str,
        value: String,
    },

    /// A string value could not be coerced to the declared kind
    #[error("field `{field}`: cannot coerce {value:?} to {expected}")]
    CoercionFailed {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// A constraint predicate rejected the value
    #[error("field `{field}`: {message}")]
    ConstraintFailed { field: String, message: String },

    /// Merged key maps to no schema field (strict mode)
    #[error("unknown key `{key}`")]
    UnknownKey { key: String },

    /// Table and scalar collide at the same path across documents
    #[error("path `{path}`: {message}")]
    StructuralConflict { path: String, message: String },
}

impl Violation {
    /// The dotted path this violation is about.
    pub fn field(&self) -> &str {
        match self {
            Violation::MissingRequired { field }
            | Violation::TypeMismatch { field, .. }
            | Violation::CoercionFailed { field, .. }
            | Violation::ConstraintFailed { field, .. } => field,
            Violation::UnknownKey { key } => key,
            Violation::StructuralConflict { path, .. } => path,
        }
    }
}

/// Validation failure carrying every violation found across the schema.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub environment: Environment,
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Configuration for `{}` failed validation with {} violation(s):",
            self.environment,
            self.violations.len()
        )?;
        for violation in &self.violations {
            writeln!(f, "  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// One resolved field of a validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    path: String,
    export: String,
    value: Value,
}

impl ResolvedEntry {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn export(&self) -> &str {
        &self.export
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// The immutable product of validation.
///
/// Holds resolved fields in schema declaration order. No
/// partially-validated state ever escapes the validator: either every
/// field resolved cleanly or the whole run failed.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    environment: Environment,
    entries: Vec<ResolvedEntry>,
}

impl ValidatedConfig {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Resolved fields in schema declaration order. Optional fields that
    /// were absent (with no default) are omitted.
    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    /// Look up a resolved value by its dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| &e.value)
    }

    /// Reconstruct the nested TOML table from the resolved fields.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        for entry in &self.entries {
            insert_dotted(&mut table, &entry.path, entry.value.clone());
        }
        table
    }

    /// Convert into a caller-defined serde type, avoiding a round trip
    /// through the generated text file.
    pub fn into_typed<T: DeserializeOwned>(&self) -> Result<T> {
        let typed = Value::Table(self.to_table()).try_into()?;
        Ok(typed)
    }
}

fn insert_dotted(table: &mut Table, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            table.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = table
                .entry(head.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if let Value::Table(inner) = entry {
                insert_dotted(inner, rest, value);
            }
        }
    }
}

/// Validate a merged mapping against a schema.
///
/// Per-field process-env overrides read the real process environment; use
/// [`validate_with_lookup`] to inject a lookup under test.
pub fn validate(
    schema: &Schema,
    merged: &Table,
    environment: Environment,
) -> Result<ValidatedConfig> {
    validate_with_lookup(schema, merged, environment, |var| std::env::var(var).ok())
}

/// Validate with an injectable process-env lookup.
pub fn validate_with_lookup(
    schema: &Schema,
    merged: &Table,
    environment: Environment,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ValidatedConfig> {
    let mut violations = Vec::new();
    let mut leaves = BTreeMap::new();
    flatten(merged, "", schema, &mut leaves, &mut violations);

    let mut entries = Vec::new();
    for field in schema.fields() {
        resolve_field(field, &leaves, &lookup, &mut entries, &mut violations);
    }

    if violations.is_empty() {
        Ok(ValidatedConfig {
            environment,
            entries,
        })
    } else {
        Err(Error::Validation(ValidationError {
            environment,
            violations,
        }))
    }
}

/// Walk the merged mapping, collecting leaf values by dotted path and
/// reporting structural conflicts and unknown keys along the way.
fn flatten(
    table: &Table,
    prefix: &str,
    schema: &Schema,
    leaves: &mut BTreeMap<String, Value>,
    violations: &mut Vec<Violation>,
) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(inner) => {
                if schema.field(&path).is_some() {
                    violations.push(Violation::StructuralConflict {
                        path,
                        message: "expected a scalar value but found a table".to_string(),
                    });
                } else if schema.is_table_path(&path) || !schema.is_permissive() {
                    flatten(inner, &path, schema, leaves, violations);
                } else {
                    tracing::debug!(%path, "Dropping unknown table (permissive schema)");
                }
            }
            _ => {
                if schema.field(&path).is_some() {
                    leaves.insert(path, value.clone());
                } else if schema.is_table_path(&path) {
                    violations.push(Violation::StructuralConflict {
                        path,
                        message: format!(
                            "expected a table but found {}",
                            value_kind_name(value)
                        ),
                    });
                } else if schema.is_permissive() {
                    tracing::debug!(%path, "Dropping unknown key (permissive schema)");
                } else {
                    violations.push(Violation::UnknownKey { key: path });
                }
            }
        }
    }
}

fn resolve_field(
    field: &Field,
    leaves: &BTreeMap<String, Value>,
    lookup: impl Fn(&str) -> Option<String>,
    entries: &mut Vec<ResolvedEntry>,
    violations: &mut Vec<Violation>,
) {
    // Process-env override supersedes both the merged value and defaults.
    if let Some(var) = field.env_override_var() {
        if let Some(raw) = lookup(var) {
            if !raw.is_empty() {
                match coerce(field.kind(), &raw) {
                    Some(value) => {
                        if check_constraints(field, &value, violations) {
                            entries.push(entry(field, value));
                        }
                    }
                    None => violations.push(Violation::CoercionFailed {
                        field: field.path().to_string(),
                        expected: field.kind().name(),
                        value: raw,
                    }),
                }
                return;
            }
        }
    }

    match leaves.get(field.path()) {
        Some(value) => {
            if let Some(value) = check_value(field, value, violations) {
                entries.push(entry(field, value));
            }
        }
        // Defaults apply only when the field is absent, never overriding
        // an explicitly supplied value.
        None => match field.default() {
            Some(default) => entries.push(entry(field, default.clone())),
            None if field.is_required() => violations.push(Violation::MissingRequired {
                field: field.path().to_string(),
            }),
            None => {}
        },
    }
}

fn entry(field: &Field, value: Value) -> ResolvedEntry {
    ResolvedEntry {
        path: field.path().to_string(),
        export: field.export().to_string(),
        value,
    }
}

/// Type-check a supplied value, applying string coercion only when the
/// field declares it, then run the field's constraints.
fn check_value(
    field: &Field,
    value: &Value,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    let resolved = if field.kind().matches(value) {
        value.clone()
    } else if field.is_coercible() {
        if let Value::String(raw) = value {
            match coerce(field.kind(), raw) {
                Some(coerced) => coerced,
                None => {
                    violations.push(Violation::CoercionFailed {
                        field: field.path().to_string(),
                        expected: field.kind().name(),
                        value: raw.clone(),
                    });
                    return None;
                }
            }
        } else {
            violations.push(type_mismatch(field, value));
            return None;
        }
    } else {
        violations.push(type_mismatch(field, value));
        return None;
    };

    if check_constraints(field, &resolved, violations) {
        Some(resolved)
    } else {
        None
    }
}

/// Run every constraint, accumulating all failures rather than stopping
/// at the first.
fn check_constraints(field: &Field, value: &Value, violations: &mut Vec<Violation>) -> bool {
    let mut ok = true;
    for constraint in field.constraints() {
        if let Err(message) = constraint.check(value) {
            violations.push(Violation::ConstraintFailed {
                field: field.path().to_string(),
                message,
            });
            ok = false;
        }
    }
    ok
}

fn type_mismatch(field: &Field, value: &Value) -> Violation {
    Violation::TypeMismatch {
        field: field.path().to_string(),
        expected: field.kind().name(),
        received: value_kind_name(value),
        value: render_received(value),
    }
}

fn render_received(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a string into the declared kind.
fn coerce(kind: FieldKind, raw: &str) -> Option<Value> {
    match kind {
        FieldKind::String => Some(Value::String(raw.to_string())),
        FieldKind::Integer => raw.trim().parse().ok().map(Value::Integer),
        FieldKind::Float => raw.trim().parse().ok().map(Value::Float),
        FieldKind::Boolean => match raw.trim() {
            "true" => Some(Value::Boolean(true)),
            "false" => Some(Value::Boolean(false)),
            _ => None,
        },
        FieldKind::Datetime => raw.trim().parse().ok().map(Value::Datetime),
    }
}
