//! End-to-end tests for the terminal confirmation prompt using TTY simulation.
//!
//! These tests use the `rexpect` crate to simulate an interactive terminal
//! session, which is required because `dialoguer` prompts need a real TTY.
//!
//! **Platform limitation**: `rexpect` only works on Unix-like systems (Linux, macOS, WSL).
//! These tests are automatically skipped on Windows.

#![cfg(unix)]

#[allow(dead_code)]
mod common;

use std::process::Command;

use common::GitFixture;
use rexpect::session::{spawn_command, PtySession};

/// Create a new PTY session running `pusher --reset hard` in the fixture.
fn spawn_hard_reset(fixture: &GitFixture) -> Result<PtySession, rexpect::error::Error> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pusher"));
    cmd.args(["--reset", "hard", "--color", "never"])
        .current_dir(fixture.work_path())
        .env("GIT_CONFIG_GLOBAL", fixture.global_config_path())
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", fixture.root());

    spawn_command(cmd, Some(30_000)) // 30 second timeout
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_terminal_hard_reset_declined() {
    let Some(fixture) = GitFixture::new() else {
        return;
    };
    fixture.write("README.md", "local edit\n");

    let mut session = spawn_hard_reset(&fixture).expect("Failed to spawn interactive session");

    session
        .exp_string("Continue? (y/n)")
        .expect("Should see confirmation prompt");
    session.send_line("n").expect("Failed to send answer");
    session
        .exp_string("Cancelled.")
        .expect("Should see cancellation");
    session.exp_eof().expect("Process should exit");

    let content = std::fs::read_to_string(fixture.work_path().join("README.md")).unwrap();
    assert_eq!(content, "local edit\n");
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_terminal_hard_reset_confirmed() {
    let Some(fixture) = GitFixture::new() else {
        return;
    };
    fixture.write("README.md", "local edit\n");

    let mut session = spawn_hard_reset(&fixture).expect("Failed to spawn interactive session");

    session
        .exp_string("Continue? (y/n)")
        .expect("Should see confirmation prompt");
    session.send_line("y").expect("Failed to send answer");
    session
        .exp_string("git reset --hard origin/main done!")
        .expect("Should see reset step");
    session.exp_eof().expect("Process should exit");

    let content = std::fs::read_to_string(fixture.work_path().join("README.md")).unwrap();
    assert_eq!(content, "# fixture\n");
}
