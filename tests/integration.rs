//! Integration tests for the suite binary
//!
//! These drive the compiled CLI without a browser or a live portal:
//! step listing, environment validation, and fail-fast behavior when the
//! run cannot start. Each test runs in a scratch directory with a
//! scrubbed environment so the host's variables and .env files cannot
//! leak in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const REQUIRED_VARS: [(&str, &str); 7] = [
    ("URL", "https://portal.dev.example.com/login"),
    ("EMAIL", "qa@example.com"),
    ("PASSWORD", "hunter2"),
    ("TARGET_PORTAL", "Acme Events"),
    ("NEW_WEBCAST_TITLE", "Quarterly All-Hands"),
    ("SLIDE_PATH", "/data/slides.pdf"),
    ("VIDEO_PATH", "/data/intro.mp4"),
];

/// Run the binary in a scratch dir with a clean environment
fn run_in(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_portal-e2e"))
        .args(args)
        .current_dir(dir)
        .env_clear()
        .envs(envs.iter().copied())
        .output()
        .expect("failed to run portal-e2e binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn steps_lists_the_journey_in_order() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["steps"], &[]);
    assert!(output.status.success());

    let out = stdout(&output);
    let expected = [
        "1. login",
        "2. open-portal",
        "3. create-webcast",
        "4. upload-media",
        "5. activate-manage",
        "6. configure-layout",
        "7. toggle-status",
    ];
    let mut last = 0;
    for name in expected {
        let pos = out.find(name).unwrap_or_else(|| panic!("missing '{name}' in:\n{out}"));
        assert!(pos > last, "'{name}' out of order in:\n{out}");
        last = pos;
    }
}

#[test]
fn check_reports_every_missing_variable() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["check", "--env", "dev"], &[]);
    assert!(!output.status.success());

    let out = stdout(&output);
    for (key, _) in REQUIRED_VARS {
        assert!(
            out.contains(&format!("{key} (missing)")),
            "expected {key} to be reported missing in:\n{out}"
        );
    }
    assert!(stderr(&output).contains("environment check failed"));
}

#[test]
fn check_prod_wants_the_prod_variants() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["check", "--env", "prod"], &[]);
    assert!(!output.status.success());

    let out = stdout(&output);
    assert!(out.contains("URL_PROD (missing)"));
    assert!(out.contains("EMAIL_PROD (missing)"));
    assert!(out.contains("PASSWORD_PROD (missing)"));
}

#[test]
fn check_passes_with_full_environment_and_driver_override() {
    let dir = TempDir::new().unwrap();
    let fake_browser = dir.path().join("fake-chromium");
    std::fs::write(&fake_browser, "#!/bin/sh\n").unwrap();

    let driver = fake_browser.to_str().unwrap();
    let mut envs: Vec<(&str, &str)> = REQUIRED_VARS.to_vec();
    envs.push(("DRIVER", driver));

    let output = run_in(dir.path(), &["check", "--env", "dev"], &envs);
    let out = stdout(&output);
    assert!(
        output.status.success(),
        "check should pass, got:\n{out}\n{}",
        stderr(&output)
    );
    assert!(out.contains("Ready"));
    assert!(out.contains("fake-chromium"));
}

#[test]
fn run_fails_fast_when_the_environment_is_incomplete() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["run", "--env", "dev"], &[]);
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("Missing environment variable URL"),
        "expected a missing-variable error, got:\n{}",
        stderr(&output)
    );
}

#[test]
fn env_file_in_the_working_directory_is_loaded() {
    let dir = TempDir::new().unwrap();
    let mut dotenv = String::new();
    for (key, value) in REQUIRED_VARS {
        dotenv.push_str(&format!("{key}={value}\n"));
    }
    let fake_browser = dir.path().join("fake-chromium");
    std::fs::write(&fake_browser, "#!/bin/sh\n").unwrap();
    dotenv.push_str(&format!("DRIVER={}\n", fake_browser.display()));
    std::fs::write(dir.path().join(".env"), dotenv).unwrap();

    let output = run_in(dir.path(), &["check", "--env", "dev"], &[]);
    assert!(
        output.status.success(),
        "check should pass from .env alone, got:\n{}\n{}",
        stdout(&output),
        stderr(&output)
    );
}
