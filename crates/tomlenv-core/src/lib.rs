//! Configuration resolution engine for multi-environment deployments
//!
//! Resolves a base TOML document plus an environment-selected overlay (and an
//! optional secrets overlay) into a validated, schema-typed configuration,
//! then renders it as a flat `KEY=VALUE` env file or a typed settings object.
//!
//! Pipeline: [`Environment`] selection → [`SourceTree`] loading →
//! [`merge::deep_merge`] → [`validate::validate`] → [`render`]. Each stage is
//! a pure function of its inputs; the [`Resolver`] orchestrates them.

pub mod env;
pub mod error;
pub mod io;
pub mod merge;
pub mod render;
pub mod resolver;
pub mod schema;
pub mod settings;
pub mod source;
pub mod validate;

pub use env::{ENV_VAR_NAME, Environment};
pub use error::{Error, Result};
pub use merge::deep_merge;
pub use render::{EnvFileLine, render_document, render_lines};
pub use resolver::Resolver;
pub use schema::{Constraint, Field, FieldKind, Schema};
pub use source::SourceTree;
pub use validate::{ValidatedConfig, ValidationError, Violation, validate};
