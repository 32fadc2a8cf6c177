//! Default values for pusher operations.
//!
//! This module provides centralized default values used by the CLI flags
//! and the setup wizard, ensuring consistency and avoiding duplication.

/// Branch used by push, pull and reset when `--branch` is not given.
///
/// This can be overridden by the `--branch` CLI flag or the
/// `PUSHER_BRANCH` environment variable.
pub const DEFAULT_BRANCH: &str = "main";

/// Commit message used by push when `--message` is not given.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Auto commit";

/// Commit message offered by the setup wizard.
pub const DEFAULT_SETUP_COMMIT_MESSAGE: &str = "Initial commit";

/// Remote every operation talks to.
pub const DEFAULT_REMOTE: &str = "origin";

/// Host used when the setup wizard rewrites the remote with credentials.
pub const CREDENTIAL_HOST: &str = "github.com";
