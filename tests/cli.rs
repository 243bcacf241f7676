// ABOUTME: Integration tests for the converge CLI commands.
// ABOUTME: Validates --help output, init behavior, and config error reporting.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn converge_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("converge"))
}

#[test]
fn help_shows_commands() {
    converge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("loadbalancer"))
        .stdout(predicate::str::contains("listener"))
        .stdout(predicate::str::contains("image"))
        .stdout(predicate::str::contains("--max-attempts"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("converge.yml");

    converge_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--endpoint", "https://neutron.local:9696"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created converge.yml"));

    assert!(config_path.exists(), "converge.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("endpoint: https://neutron.local:9696"));
    assert!(content.contains("polling:"), "Config should have polling section");
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("converge.yml");

    fs::write(&config_path, "polling: {}").unwrap();

    converge_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn missing_config_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();

    converge_cmd()
        .current_dir(temp_dir.path())
        .args(["loadbalancer", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn unknown_polling_key_fails_before_any_request() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("converge.yml"),
        "neutron:\n  endpoint: http://127.0.0.1:1\npolling:\n  jitter: true\n",
    )
    .unwrap();

    converge_cmd()
        .current_dir(temp_dir.path())
        .args(["listener", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("jitter"));
}

#[test]
fn zero_interval_flag_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("converge.yml"),
        "neutron:\n  endpoint: http://127.0.0.1:1\n  token: t\n",
    )
    .unwrap();

    converge_cmd()
        .current_dir(temp_dir.path())
        .args(["--interval", "0", "loadbalancer", "delete-all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}
