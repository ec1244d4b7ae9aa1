//! Integration tests for the devai binary: global flags, config and
//! completion commands.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for running devai with an isolated config environment.
fn devai(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("devai").unwrap();
    cmd.env("HOME", home)
        .env("DEVAI_CONFIG", home.join("config.toml"))
        .env_remove("DEVAI_ENDPOINT")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

#[test]
fn version_flag_works() {
    let home = TempDir::new().unwrap();
    devai(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devai"));
}

#[test]
fn help_lists_ai_group() {
    let home = TempDir::new().unwrap();
    devai(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ai"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn ai_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    devai(home.path())
        .args(["ai", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("prompt"))
        .stdout(predicate::str::contains("enhance-response"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();

    devai(home.path())
        .args(["config", "set", "handler.endpoint", "http://localhost:8080/api/ai"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set handler.endpoint"));

    assert!(home.path().join("config.toml").exists());

    devai(home.path())
        .args(["config", "get", "handler.endpoint"])
        .assert()
        .success()
        .stdout("http://localhost:8080/api/ai\n");
}

#[test]
fn config_set_quiet_prints_nothing() {
    let home = TempDir::new().unwrap();

    devai(home.path())
        .args(["-q", "config", "set", "handler.model", "gpt-4"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn config_set_rejects_invalid_endpoint() {
    let home = TempDir::new().unwrap();

    devai(home.path())
        .args(["config", "set", "handler.endpoint", "localhost:8080"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config value"));

    assert!(!home.path().join("config.toml").exists());
}

#[test]
fn config_get_unknown_key_fails() {
    let home = TempDir::new().unwrap();

    devai(home.path())
        .args(["config", "get", "handler.retries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration key: handler.retries"));
}

#[test]
fn config_list_shows_defaults() {
    let home = TempDir::new().unwrap();

    devai(home.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("handler.endpoint = (not set)"))
        .stdout(predicate::str::contains("handler.timeout_secs = 120"));
}

#[test]
fn project_config_overrides_global() {
    let home = TempDir::new().unwrap();
    let project = home.path().join("project");
    std::fs::create_dir_all(project.join(".devai")).unwrap();
    std::fs::write(
        project.join(".devai/config.toml"),
        "[handler]\ntimeout_secs = 15\n",
    )
    .unwrap();

    devai(home.path())
        .args(["config", "get", "handler.timeout_secs", "--cwd"])
        .arg(&project)
        .assert()
        .success()
        .stdout("15\n");
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();

    devai(home.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enhance-response"));
}

#[test]
fn config_set_writes_the_xdg_file_that_is_read() {
    let home = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let xdg = home.path().join("xdg");
    std::fs::create_dir_all(xdg.join("devai")).unwrap();
    std::fs::write(
        xdg.join("devai/config.toml"),
        "[handler]\nendpoint = \"http://old:1\"\n",
    )
    .unwrap();

    let run = |args: &[&str]| {
        let mut cmd = devai(home.path());
        cmd.env_remove("DEVAI_CONFIG")
            .env("XDG_CONFIG_HOME", &xdg)
            .current_dir(elsewhere.path())
            .args(args);
        cmd
    };

    run(&["config", "set", "handler.endpoint", "http://new:2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            xdg.join("devai/config.toml").display().to_string(),
        ));

    run(&["config", "get", "handler.endpoint"])
        .assert()
        .success()
        .stdout("http://new:2\n");

    assert!(!home.path().join(".devai/config.toml").exists());
}
