//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret123";
pub const CLIENT_PASSWORD: &str = "client123";

/// Helper to get a cft command
pub fn cft() -> Command {
    Command::new(cargo::cargo_bin!("cft"))
}

/// Helper to create a project with a signed-in administrator
pub fn setup_admin_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    cft()
        .current_dir(tmp.path())
        .args([
            "init",
            "--admin-email",
            ADMIN_EMAIL,
            "--admin-password",
            ADMIN_PASSWORD,
        ])
        .assert()
        .success();
    tmp
}

/// Helper to add an emission factor (requires admin session)
pub fn add_factor(tmp: &TempDir, name: &str, scope: &str, value: &str, unit: &str) {
    cft()
        .current_dir(tmp.path())
        .args([
            "factor", "add", "--name", name, "--scope", scope, "--value", value, "--unit", unit,
        ])
        .assert()
        .success();
}

/// Helper to create a reporting module from factor keys
pub fn add_module(tmp: &TempDir, name: &str, keys: &[&str]) {
    let mut cmd = cft();
    cmd.current_dir(tmp.path()).args(["module", "add", "--name", name]);
    for key in keys {
        cmd.args(["--factor", key]);
    }
    cmd.assert().success();
}

/// Helper to provision a client account
pub fn create_client(tmp: &TempDir, org: &str, email: &str, module: &str) {
    cft()
        .current_dir(tmp.path())
        .args([
            "client",
            "add",
            "--org",
            org,
            "--email",
            email,
            "--password",
            CLIENT_PASSWORD,
            "--module",
            module,
        ])
        .assert()
        .success();
}

/// Helper to switch the session to a different account
pub fn login(tmp: &TempDir, email: &str, password: &str) {
    cft()
        .current_dir(tmp.path())
        .args(["login", email, "--password", password])
        .assert()
        .success();
}

/// Helper to submit activity values as the signed-in client
pub fn submit(tmp: &TempDir, sets: &[&str]) {
    let mut cmd = cft();
    cmd.current_dir(tmp.path()).arg("submit");
    for set in sets {
        cmd.args(["--set", set]);
    }
    cmd.assert().success();
}

/// Extract the first submission id from `cft queue` table output
pub fn queue_submission_id(tmp: &TempDir) -> String {
    let output = cft()
        .current_dir(tmp.path())
        .arg("queue")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .split(|c: char| !c.is_ascii_alphanumeric())
        .find(|token| token.len() == 26 && token.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Standard catalog and client fixture: two factors, one module, one client,
/// leaving the client signed in
pub fn setup_client_scenario() -> TempDir {
    let tmp = setup_admin_project();
    add_factor(&tmp, "Grid Electricity", "2", "0.45", "kWh");
    add_factor(&tmp, "Diesel", "1", "2.0", "litre");
    add_module(&tmp, "GHG Basic", &["Grid_Electricity_S2", "Diesel_S1"]);
    create_client(&tmp, "Acme Corp", "acme@example.com", "GHG Basic");
    login(&tmp, "acme@example.com", CLIENT_PASSWORD);
    tmp
}
