//! Shared test utilities for the tomlenv workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`tree`] — [`ConfigTree`] builder for temporary configuration roots
//!
//! [`ConfigTree`]: tree::ConfigTree

pub mod tree;

pub use tree::ConfigTree;
