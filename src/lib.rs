//! # Pusher Library
//!
//! This library provides the core of the `pusher` command-line tool: turning
//! one selected operation into an ordered sequence of `git` invocations, run
//! one at a time and stopped at the first failure.
//!
//! ## Quick Example
//!
//! ```
//! use pusher::request::{InvocationRequest, Operation, OperationFlags, ResetMode};
//!
//! let flags = OperationFlags {
//!     reset: Some(ResetMode::Soft),
//!     ..OperationFlags::default()
//! };
//! let request = InvocationRequest::from_flags(&flags, "develop", "Auto commit", "origin").unwrap();
//! assert_eq!(request.operation, Operation::Reset(ResetMode::Soft));
//! assert_eq!(request.tracking_ref(), "origin/develop");
//!
//! // Two operations at once is a usage error
//! let flags = OperationFlags { push: true, pull: true, ..OperationFlags::default() };
//! assert!(flags.operation().is_err());
//! ```
//!
//! ## Core Concepts
//!
//! - **Requests (`request`)**: The validated, single operation of a run plus
//!   its branch, commit message and remote.
//! - **External commands (`git`)**: Structured argument lists, never shell
//!   strings, with secret arguments redacted from every display.
//! - **Dispatcher (`dispatcher`)**: Runs push, pull and reset, reporting each
//!   command as it finishes.
//! - **Setup (`setup`)**: The interactive first-time setup wizard.
//! - **Prompts (`prompt`)**: Questions as data, answered through a terminal
//!   or a piped input.
//! - **Output (`output`)**: Color decisions and status line formatting.

pub mod defaults;
pub mod dispatcher;
pub mod error;
pub mod git;
pub mod output;
pub mod prompt;
pub mod request;
pub mod setup;

#[cfg(test)]
mod request_proptest;
