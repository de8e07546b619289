//! Source loader behaviour: mandatory base, optional overlays, parse
//! error reporting.

use pretty_assertions::assert_eq;
use toml::Table;
use tomlenv_core::{Environment, Error, SourceTree};
use tomlenv_test_utils::ConfigTree;

#[test]
fn missing_base_document_is_an_error() {
    let tree = ConfigTree::new();
    let source = SourceTree::new(tree.root());
    let err = source.load_base().unwrap_err();
    match err {
        Error::SourceNotFound { path } => {
            assert_eq!(path, tree.root().join("config.toml"));
        }
        other => panic!("expected SourceNotFound, got: {other}"),
    }
}

#[test]
fn base_document_parses_into_a_raw_mapping() {
    let tree = ConfigTree::new();
    tree.write_base("[database]\nuser = \"postgres\"\nport = 1234\n");
    let source = SourceTree::new(tree.root());
    let base = source.load_base().unwrap();
    let expected: Table = "[database]\nuser = \"postgres\"\nport = 1234"
        .parse()
        .unwrap();
    assert_eq!(base, expected);
}

#[test]
fn absent_overlay_degrades_to_an_empty_mapping() {
    let tree = ConfigTree::new();
    tree.write_base("a = 1\n");
    let source = SourceTree::new(tree.root());
    assert_eq!(source.load_overlay(Environment::Prod).unwrap(), Table::new());
    assert_eq!(source.load_secrets(Environment::Prod).unwrap(), Table::new());
    assert!(!source.overlay_exists(Environment::Prod));
    assert!(!source.secrets_exists(Environment::Prod));
}

#[test]
fn overlay_and_secrets_load_from_the_environment_directory() {
    let tree = ConfigTree::new();
    tree.write_base("a = 1\n");
    tree.write_overlay("dev", "[database]\nhost = \"dev-db\"\n");
    tree.write_secrets("dev", "[database]\npassword = \"secret\"\n");
    let source = SourceTree::new(tree.root());
    assert!(source.overlay_exists(Environment::Dev));
    assert!(source.secrets_exists(Environment::Dev));
    let overlay = source.load_overlay(Environment::Dev).unwrap();
    assert_eq!(overlay["database"]["host"].as_str(), Some("dev-db"));
    let secrets = source.load_secrets(Environment::Dev).unwrap();
    assert_eq!(secrets["database"]["password"].as_str(), Some("secret"));
}

#[test]
fn malformed_base_reports_file_identity_and_position() {
    let tree = ConfigTree::new();
    tree.write_base("[database\nuser = \"postgres\"\n");
    let source = SourceTree::new(tree.root());
    let err = source.load_base().unwrap_err();
    match err {
        Error::MalformedSource { path, message } => {
            assert_eq!(path, tree.root().join("config.toml"));
            assert!(message.contains("line 1"), "no position in: {message}");
        }
        other => panic!("expected MalformedSource, got: {other}"),
    }
}

#[test]
fn malformed_overlay_reports_the_overlay_path() {
    let tree = ConfigTree::new();
    tree.write_base("a = 1\n");
    tree.write_overlay("staging", "key = = broken\n");
    let source = SourceTree::new(tree.root());
    let err = source.load_overlay(Environment::Staging).unwrap_err();
    match err {
        Error::MalformedSource { path, .. } => {
            assert_eq!(path, tree.root().join("staging").join("config.toml"));
        }
        other => panic!("expected MalformedSource, got: {other}"),
    }
}

#[test]
fn env_file_path_follows_the_environment_layout() {
    let source = SourceTree::new("/srv/config");
    assert_eq!(
        source.env_file_path(Environment::Prod),
        std::path::Path::new("/srv/config/prod/.env.prod")
    );
}
