//! # Invocation Requests
//!
//! A run of `pusher` performs exactly one operation. This module turns the
//! raw operation flags into an [`InvocationRequest`], rejecting ambiguous or
//! empty selections before anything touches the repository.
//!
//! `--setup` pre-empts the check entirely: when it is present, the other
//! operation flags are ignored.

use std::fmt;

use clap::ValueEnum;

use crate::defaults::{DEFAULT_BRANCH, DEFAULT_COMMIT_MESSAGE, DEFAULT_REMOTE};
use crate::error::{Error, Result};

/// Message shown when the operation flags do not select exactly one operation.
pub const USAGE_MESSAGE: &str =
    "Error: You must choose exactly ONE of --push, --pull, --reset, or --setup.";

/// How `git reset` should treat the index and working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResetMode {
    /// Discard all local changes
    Hard,
    /// Keep the index and working tree
    Soft,
    /// Keep the working tree, reset the index
    Mixed,
}

impl ResetMode {
    /// The mode name as git spells it after `--`.
    pub fn as_str(self) -> &'static str {
        match self {
            ResetMode::Hard => "hard",
            ResetMode::Soft => "soft",
            ResetMode::Mixed => "mixed",
        }
    }

    /// Whether this mode throws away uncommitted work and needs confirmation.
    pub fn is_destructive(self) -> bool {
        matches!(self, ResetMode::Hard)
    }
}

impl fmt::Display for ResetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single top-level action of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Push,
    Pull,
    Reset(ResetMode),
    Setup,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Push => f.write_str("push"),
            Operation::Pull => f.write_str("pull"),
            Operation::Reset(mode) => write!(f, "reset --{}", mode),
            Operation::Setup => f.write_str("setup"),
        }
    }
}

/// Operation flags exactly as the user supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationFlags {
    pub push: bool,
    pub pull: bool,
    pub reset: Option<ResetMode>,
    pub setup: bool,
}

impl OperationFlags {
    /// Resolve the flags to a single operation.
    pub fn operation(&self) -> Result<Operation> {
        if self.setup {
            return Ok(Operation::Setup);
        }

        match (self.push, self.pull, self.reset) {
            (true, false, None) => Ok(Operation::Push),
            (false, true, None) => Ok(Operation::Pull),
            (false, false, Some(mode)) => Ok(Operation::Reset(mode)),
            _ => Err(Error::Usage {
                message: USAGE_MESSAGE.to_string(),
            }),
        }
    }
}

/// Everything the dispatcher needs to perform one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub operation: Operation,
    pub branch: String,
    pub message: String,
    pub remote: String,
}

impl InvocationRequest {
    /// Build a request from the operation flags and the shared options.
    pub fn from_flags(
        flags: &OperationFlags,
        branch: impl Into<String>,
        message: impl Into<String>,
        remote: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            operation: flags.operation()?,
            branch: branch.into(),
            message: message.into(),
            remote: remote.into(),
        })
    }

    /// A request for `operation` with every option at its default.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            branch: DEFAULT_BRANCH.to_string(),
            message: DEFAULT_COMMIT_MESSAGE.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// The remote-tracking ref that reset targets, e.g. `origin/main`.
    pub fn tracking_ref(&self) -> String {
        format!("{}/{}", self.remote, self.branch)
    }
}
