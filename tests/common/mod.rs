//! Shared test utilities for E2E tests.
//!
//! Tests run the real `pusher` binary against real git repositories in a
//! temporary directory:
//!
//! - `remote.git`: a bare repository acting as `origin`
//! - `work`: a clone-like working copy with `origin` pointing at `remote.git`
//! - `gitconfig`: an isolated global git config (identity, default branch)
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let Some(fixture) = GitFixture::new() else { return };
//!     fixture.command().arg("--pull").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::git_available;
    #[allow(unused_imports)]
    pub use super::GitFixture;
}

const GLOBAL_CONFIG: &str = "\
[user]
\tname = Test User
\temail = test@example.com
[init]
\tdefaultBranch = main
";

/// Check whether a usable `git` is on the PATH.
///
/// Tests that need git return early when it is missing.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// A working copy with a bare `origin`, both inside one temporary directory.
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
}

impl GitFixture {
    /// Create the fixture with one commit on `main`, already pushed.
    ///
    /// Returns `None` when git is not installed.
    pub fn new() -> Option<Self> {
        let fixture = Self::empty()?;

        fixture.run_git(fixture.root(), &["init", "--bare", "remote.git"]);
        fixture.run_git(fixture.root(), &["init", "work"]);
        fixture.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        let remote = fixture.remote_path();
        fixture.git(&["remote", "add", "origin", remote.to_str().unwrap()]);

        fixture.write("README.md", "# fixture\n");
        fixture.git(&["add", "."]);
        fixture.git(&["commit", "-m", "initial"]);
        fixture.git(&["push", "origin", "main"]);

        Some(fixture)
    }

    /// Only the isolated git config and an empty `work` directory.
    ///
    /// Returns `None` when git is not installed.
    pub fn empty() -> Option<Self> {
        if !git_available() {
            eprintln!("git not found on PATH, skipping test");
            return None;
        }

        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("gitconfig")
            .write_str(GLOBAL_CONFIG)
            .expect("Failed to write git config");
        temp_dir
            .child("work")
            .create_dir_all()
            .expect("Failed to create work directory");

        Some(Self { temp_dir })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The working copy commands run in.
    pub fn work_path(&self) -> PathBuf {
        self.root().join("work")
    }

    /// The bare repository acting as `origin`.
    pub fn remote_path(&self) -> PathBuf {
        self.root().join("remote.git")
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.root().join("gitconfig")
    }

    /// Write a file inside the working copy.
    pub fn write(&self, path: &str, content: &str) {
        std::fs::write(self.work_path().join(path), content).expect("Failed to write file");
    }

    /// Run git inside the working copy, asserting success and returning stdout.
    pub fn git(&self, args: &[&str]) -> String {
        self.run_git(&self.work_path(), args)
    }

    /// Run git inside `dir` with the fixture's isolated configuration.
    pub fn run_git(&self, dir: &Path, args: &[&str]) -> String {
        let output = self
            .isolate(&mut Command::new("git"))
            .args(args)
            .current_dir(dir)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Subject lines of `branch` in the bare remote, newest first.
    pub fn remote_log(&self, branch: &str) -> Vec<String> {
        self.run_git(
            &self.remote_path(),
            &["log", "--format=%s", branch, "--"],
        )
        .lines()
        .map(str::to_string)
        .collect()
    }

    /// Subject line of the working copy's HEAD.
    pub fn head_subject(&self) -> String {
        self.git(&["log", "-1", "--format=%s"]).trim().to_string()
    }

    /// Push a new commit to `origin/main` from a second working copy.
    pub fn push_from_peer(&self, file: &str, content: &str, subject: &str) {
        let peer = self.root().join("peer");
        if !peer.exists() {
            self.run_git(
                self.root(),
                &["clone", self.remote_path().to_str().unwrap(), "peer"],
            );
        } else {
            self.run_git(&peer, &["pull", "origin", "main"]);
        }
        std::fs::write(peer.join(file), content).expect("Failed to write peer file");
        self.run_git(&peer, &["add", "."]);
        self.run_git(&peer, &["commit", "-m", subject]);
        self.run_git(&peer, &["push", "origin", "HEAD:main"]);
    }

    /// A `pusher` command running in the working copy.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pusher");
        cmd.current_dir(self.work_path())
            .env("GIT_CONFIG_GLOBAL", self.global_config_path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("HOME", self.root())
            .env("NO_COLOR", "1")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env_remove("PUSHER_BRANCH")
            .env_remove("PUSHER_MESSAGE")
            .env_remove("PUSHER_REMOTE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn isolate<'c>(&self, cmd: &'c mut Command) -> &'c mut Command {
        cmd.env("GIT_CONFIG_GLOBAL", self.global_config_path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("HOME", self.root())
            .env("GIT_TERMINAL_PROMPT", "0")
    }
}
