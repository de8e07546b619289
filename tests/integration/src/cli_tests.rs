//! Binary-level tests for the `tomlenv` CLI: exit codes, stderr violation
//! listings and environment selection across the process boundary.

use assert_cmd::Command;
use predicates::prelude::*;
use tomlenv_test_utils::ConfigTree;

fn tomlenv(tree: &ConfigTree) -> Command {
    let mut cmd = Command::cargo_bin("tomlenv").unwrap();
    cmd.arg("--root")
        .arg(tree.root())
        .env_remove("APP_ENV")
        .env_remove("TOMLENV_ROOT")
        .env_remove("POSTGRES_HOST");
    cmd
}

#[test]
fn generate_defaults_to_local_and_writes_the_env_file() {
    let tree = ConfigTree::with_sample_base();
    tomlenv(&tree)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains(".env.local"));
    tree.assert_file_exists("local/.env.local");

    let content = tree.read_env_file("local");
    assert!(content.contains("# Environment: local"));
    assert!(content.contains("DATABASE_HOST=localhost"));
}

#[test]
fn app_env_variable_selects_the_environment() {
    let tree = ConfigTree::with_sample_base();
    tree.write_overlay("dev", "[database]\nhost = \"dev-db\"\n");
    tomlenv(&tree)
        .arg("generate")
        .env("APP_ENV", "dev")
        .assert()
        .success();
    tree.assert_file_exists("dev/.env.dev");
    assert!(tree.read_env_file("dev").contains("DATABASE_HOST=dev-db"));
}

#[test]
fn explicit_env_argument_beats_app_env() {
    let tree = ConfigTree::with_sample_base();
    tree.write_overlay("prod", "[database]\nhost = \"prod-db\"\n");
    tomlenv(&tree)
        .args(["generate", "-e", "prod"])
        .env("APP_ENV", "dev")
        .assert()
        .success();
    tree.assert_file_exists("prod/.env.prod");
    tree.assert_file_absent("dev/.env.dev");
}

#[test]
fn unknown_environment_fails_with_the_valid_set() {
    let tree = ConfigTree::with_sample_base();
    tomlenv(&tree)
        .args(["check", "-e", "production"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown environment: production"))
        .stderr(predicate::str::contains("local, dev, staging, prod"));
}

#[test]
fn check_lists_every_violation_on_stderr() {
    let tree = ConfigTree::new();
    tree.write_base("[database]\nuser = \"\"\nport = \"not-a-number\"\n");
    tomlenv(&tree)
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("database.user"))
        .stderr(predicate::str::contains("database.port"))
        .stderr(predicate::str::contains("database.password"))
        .stderr(predicate::str::contains("database.host"));
}

#[test]
fn check_succeeds_on_a_valid_tree() {
    let tree = ConfigTree::with_sample_base();
    tomlenv(&tree)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn dry_run_prints_lines_without_writing() {
    let tree = ConfigTree::with_sample_base();
    tomlenv(&tree)
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DATABASE_USER=app"))
        .stdout(predicate::str::contains("LOGGING_LEVEL=INFO"));
    tree.assert_file_absent("local/.env.local");
}

#[test]
fn missing_base_fails_with_source_not_found() {
    let tree = ConfigTree::new();
    tomlenv(&tree)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Base configuration not found"));
}

#[test]
fn show_json_emits_the_resolved_tree() {
    let tree = ConfigTree::with_sample_base();
    tomlenv(&tree)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"database\""))
        .stdout(predicate::str::contains("\"host\": \"localhost\""));
}

#[test]
fn diff_reports_up_to_date_after_generate() {
    let tree = ConfigTree::with_sample_base();
    tomlenv(&tree).arg("generate").assert().success();
    tomlenv(&tree)
        .arg("diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn diff_shows_drift_after_a_source_change() {
    let tree = ConfigTree::with_sample_base();
    tomlenv(&tree).arg("generate").assert().success();
    tree.write_overlay("local", "[database]\nhost = \"tunnel\"\n");
    tomlenv(&tree)
        .arg("diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("-DATABASE_HOST=localhost"))
        .stdout(predicate::str::contains("+DATABASE_HOST=tunnel"));
}

#[test]
fn envs_marks_present_documents_and_selection() {
    let tree = ConfigTree::with_sample_base();
    tree.write_overlay("prod", "[database]\nhost = \"prod-db\"\n");
    tree.write_secrets("prod", "[secrets]\nsecret_one = \"s1\"\n");
    tomlenv(&tree)
        .arg("envs")
        .assert()
        .success()
        .stdout(predicate::str::contains("prod"))
        .stdout(predicate::str::contains("overlay"))
        .stdout(predicate::str::contains("secrets"))
        .stdout(predicate::str::contains("Selected: local"));
}

#[test]
fn completions_emit_a_script() {
    let tree = ConfigTree::new();
    tomlenv(&tree)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tomlenv"));
}

#[test]
fn postgres_host_override_reaches_the_output() {
    let tree = ConfigTree::with_sample_base();
    tomlenv(&tree)
        .arg("generate")
        .env("POSTGRES_HOST", "db.internal")
        .assert()
        .success();
    assert!(
        tree.read_env_file("local")
            .contains("DATABASE_HOST=db.internal")
    );
}
