//! Declarative configuration schema
//!
//! A [`Schema`] is an ordered table of [`Field`] records — dotted path,
//! declared kind, required flag, optional default, coercibility, and
//! constraint predicates — interpreted by the generic validator. Schemas
//! are defined in code and versioned with the application.

use toml::Value;

/// The declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
}

impl FieldKind {
    /// Human-readable name used in violation messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Datetime => "datetime",
        }
    }

    /// Whether a TOML value already has this kind, without coercion.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldKind::String, Value::String(_))
                | (FieldKind::Integer, Value::Integer(_))
                | (FieldKind::Float, Value::Float(_))
                | (FieldKind::Boolean, Value::Boolean(_))
                | (FieldKind::Datetime, Value::Datetime(_))
        )
    }
}

/// Human-readable kind name of an arbitrary TOML value.
pub fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

/// A validation constraint attached to a field, checked after type
/// resolution and coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// String value must be non-empty.
    NonEmpty,
    /// Integer value must fall within the inclusive range.
    IntRange { min: i64, max: i64 },
    /// String value must be one of the listed alternatives.
    OneOf(&'static [&'static str]),
}

impl Constraint {
    /// Check the constraint against a type-resolved value.
    ///
    /// Returns a violation message on failure. Constraints only inspect
    /// values of their own kind; a kind mismatch is the type checker's
    /// problem, not theirs.
    pub fn check(&self, value: &Value) -> std::result::Result<(), String> {
        match self {
            Constraint::NonEmpty => match value {
                Value::String(s) if s.is_empty() => Err("must not be empty".to_string()),
                _ => Ok(()),
            },
            Constraint::IntRange { min, max } => match value {
                Value::Integer(i) if !(*min..=*max).contains(i) => Err(format!(
                    "must be between {min} and {max} (received {i})"
                )),
                _ => Ok(()),
            },
            Constraint::OneOf(allowed) => match value {
                Value::String(s) if !allowed.contains(&s.as_str()) => Err(format!(
                    "must be one of {} (received {s:?})",
                    allowed.join(", ")
                )),
                _ => Ok(()),
            },
        }
    }
}

/// Derive the env-file export name from a dotted field path.
///
/// `database.user` becomes `DATABASE_USER`.
pub fn export_name(path: &str) -> String {
    path.replace('.', "_").to_uppercase()
}

/// A single schema field declaration.
#[derive(Debug, Clone)]
pub struct Field {
    path: String,
    export: String,
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
    coercible: bool,
    constraints: Vec<Constraint>,
    env_override: Option<String>,
}

impl Field {
    /// Declare an optional field at `path` with the given kind.
    ///
    /// The export name is derived from the path; builder methods refine
    /// the declaration.
    pub fn new(path: impl Into<String>, kind: FieldKind) -> Self {
        let path = path.into();
        let export = export_name(&path);
        Self {
            path,
            export,
            kind,
            required: false,
            default: None,
            coercible: false,
            constraints: Vec::new(),
            env_override: None,
        }
    }

    /// Mark the field as required: absence with no default is a violation.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default applied only when the field is absent from the merged
    /// mapping. An explicitly supplied value, including an empty string,
    /// is never overridden.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Allow string-to-kind coercion for values supplied as strings.
    pub fn coercible(mut self) -> Self {
        self.coercible = true;
        self
    }

    /// Attach a validation constraint.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Name a process environment variable that, when set and non-empty,
    /// supersedes the merged value and any default.
    pub fn env_override(mut self, var: impl Into<String>) -> Self {
        self.env_override = Some(var.into());
        self
    }

    /// Override the derived export name.
    pub fn export_as(mut self, name: impl Into<String>) -> Self {
        self.export = name.into();
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn export(&self) -> &str {
        &self.export
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_coercible(&self) -> bool {
        self.coercible
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn env_override_var(&self) -> Option<&str> {
        self.env_override.as_deref()
    }
}

/// Policy for merged keys that map to no schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeyPolicy {
    /// Reject unknown keys as violations.
    #[default]
    Strict,
    /// Silently drop unknown keys.
    Permissive,
}

/// An ordered, flat set of field declarations.
///
/// Declaration order determines env-file output order. Field paths must be
/// unique and no path may be a prefix of another (the schema is flat by
/// contract; nested tables exist only as path segments).
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
    unknown_keys: UnknownKeyPolicy,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        debug_assert!(
            {
                let mut paths: Vec<_> = fields.iter().map(Field::path).collect();
                paths.sort_unstable();
                paths.windows(2).all(|w| w[0] != w[1])
            },
            "schema field paths must be unique"
        );
        Self {
            fields,
            unknown_keys: UnknownKeyPolicy::Strict,
        }
    }

    /// Switch the schema to permissive unknown-key handling.
    pub fn permissive(mut self) -> Self {
        self.unknown_keys = UnknownKeyPolicy::Permissive;
        self
    }

    pub fn is_permissive(&self) -> bool {
        self.unknown_keys == UnknownKeyPolicy::Permissive
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by its full dotted path.
    pub fn field(&self, path: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.path == path)
    }

    /// Whether `path` is a strict prefix of any declared field path,
    /// i.e. a table is expected at this position.
    pub fn is_table_path(&self, path: &str) -> bool {
        self.fields.iter().any(|f| {
            f.path.len() > path.len()
                && f.path.starts_with(path)
                && f.path.as_bytes()[path.len()] == b'.'
        })
    }
}
