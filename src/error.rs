//! # Error Handling
//!
//! This module defines the centralized error type for `pusher`. It uses the
//! `thiserror` library to describe every way a run can stop early.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum covering all failure modes of a run. Each variant
//!   carries the context needed to tell the user what went wrong.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The failure modes are:
//!
//! - Usage errors, raised before any external command runs.
//! - External command failures (non-zero exit status).
//! - External commands that could not be started at all.
//! - Prompt failures and closed input while a question is pending.
//! - Remote URLs that cannot carry credentials.
//! - I/O errors.
//!
//! A user declining the hard-reset confirmation is not an error; the
//! dispatcher reports it as [`crate::dispatcher::Outcome::Cancelled`].

use thiserror::Error;

/// Main error type for pusher operations
#[derive(Error, Debug)]
pub enum Error {
    /// The operation flags did not select exactly one operation.
    #[error("{message}")]
    Usage { message: String },

    /// An external command exited with a non-zero status.
    ///
    /// `command` is the display form of the invocation, with secret
    /// arguments already redacted.
    #[error("Command failed: {command}{}{}", code.map(|c| format!(" (exit code {})", c)).unwrap_or_default(), if stderr.trim().is_empty() { String::new() } else { format!("\n{}", stderr.trim_end()) })]
    CommandFailed {
        command: String,
        /// Exit code, or `None` when the process was killed by a signal
        code: Option<i32>,
        stderr: String,
    },

    /// An external command could not be started.
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A prompt could not be shown or answered.
    #[error("Prompt error: {message}")]
    Prompt { message: String },

    /// Input ended while a question was still waiting for an answer.
    #[error("Input closed while waiting for: {question}")]
    InputClosed { question: String },

    /// The credential-bearing remote URL could not be built.
    #[error("Cannot build authenticated remote URL: {message}")]
    Credentials { message: String },

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the dispatcher already printed this error as a failed step.
    pub fn is_reported(&self) -> bool {
        matches!(self, Error::CommandFailed { .. } | Error::Spawn { .. })
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt {
            message: err.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
