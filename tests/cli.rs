//
//  storedesk
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tests for the `sd` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `sd` with its config and data directories inside `home`.
fn sd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sd").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("STOREDESK_API_BASE")
        .env_remove("STOREDESK_DEBUG");
    cmd
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    sd(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sd version "));
}

#[test]
fn test_protected_command_without_session_exits_with_auth_code() {
    let home = TempDir::new().unwrap();
    // Port 9 is never contacted: the missing token is caught first.
    sd(&home)
        .args(["--ephemeral", "--base-url", "http://127.0.0.1:9", "order", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("sd auth login"));
}

#[test]
fn test_usage_error_exit_code() {
    let home = TempDir::new().unwrap();
    sd(&home).args(["order", "frobnicate"]).assert().code(2);
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();

    sd(&home)
        .args(["config", "set", "api.base_url", "shop.example.com/api/"])
        .assert()
        .success();

    sd(&home)
        .args(["config", "get", "api.base_url"])
        .assert()
        .success()
        .stdout("http://shop.example.com/api\n");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    sd(&home)
        .args(["config", "set", "api.colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_path_json() {
    let home = TempDir::new().unwrap();
    sd(&home)
        .args(["config", "path", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exists\": false"));
}

#[test]
fn test_auth_status_when_signed_out() {
    let home = TempDir::new().unwrap();
    sd(&home)
        .args(["--ephemeral", "auth", "status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signed_in\": false"));
}

#[test]
fn test_completion_script() {
    let home = TempDir::new().unwrap();
    sd(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_sd()"));
}
