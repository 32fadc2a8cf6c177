//! # Command Dispatcher
//!
//! Executes one [`InvocationRequest`] as an ordered sequence of external
//! commands. Commands run one at a time, each to completion, and the first
//! non-zero exit status stops the run. Nothing is retried or rolled back.
//!
//! Every command prints a status line through the [`Reporter`]: a success
//! line, or a failure line followed by the command's captured stderr.
//!
//! | Operation | Commands |
//! |---|---|
//! | push | `add .`, `status --porcelain`, `commit -m MSG`, `push REMOTE BRANCH` |
//! | pull | `pull REMOTE BRANCH` |
//! | reset | `fetch REMOTE`, `reset --MODE REMOTE/BRANCH` |
//! | setup | see [`crate::setup`] |

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::git::{self, CommandRunner, ExternalCommand};
use crate::output::{Reporter, Tone};
use crate::prompt::{self, Prompter, Question};
use crate::request::{InvocationRequest, Operation, ResetMode};
use crate::setup;

/// Confirmation asked before a hard reset.
pub const CONFIRM_HARD_RESET: Question = Question::yes_no(
    "confirm_hard_reset",
    "⚠ Warning: --hard reset will discard all local changes! Continue? (y/n)",
)
.with_tone(Tone::Reset);

/// How a run that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every planned command ran and succeeded.
    Completed,
    /// Push found nothing staged and stopped before committing.
    NothingToCommit,
    /// The user declined the hard-reset confirmation.
    Cancelled,
}

/// Runs requests against a command runner, asking questions through a prompter.
pub struct Dispatcher<'a> {
    runner: &'a mut dyn CommandRunner,
    prompter: &'a mut dyn Prompter,
    reporter: Reporter,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        runner: &'a mut dyn CommandRunner,
        prompter: &'a mut dyn Prompter,
        reporter: Reporter,
    ) -> Self {
        Self {
            runner,
            prompter,
            reporter,
        }
    }

    /// Perform the request's operation.
    pub fn execute(&mut self, request: &InvocationRequest) -> Result<Outcome> {
        info!("starting {} on {}", request.operation, request.tracking_ref());

        let outcome = match request.operation {
            Operation::Push => self.push(request),
            Operation::Pull => self.pull(request),
            Operation::Reset(mode) => self.reset(request, mode),
            Operation::Setup => setup::run(self, request),
        }?;

        info!("{} finished: {:?}", request.operation, outcome);
        Ok(outcome)
    }

    /// Run a command and report it. Fails on a non-zero exit status.
    ///
    /// Returns the command's stdout.
    pub fn run_step(&mut self, command: &ExternalCommand) -> Result<String> {
        self.invoke(command, true)
    }

    /// Like [`run_step`](Self::run_step), but only a failure is reported.
    fn probe(&mut self, command: &ExternalCommand) -> Result<String> {
        self.invoke(command, false)
    }

    fn invoke(&mut self, command: &ExternalCommand, report_success: bool) -> Result<String> {
        let shown = command.to_string();
        let output = match self.runner.run(command) {
            Ok(output) => output,
            Err(err) => {
                self.reporter.step_failed(&shown, &err.to_string());
                return Err(err);
            }
        };

        if output.is_success() {
            if report_success {
                self.reporter.step_done(&shown);
            } else {
                debug!("{} succeeded", shown);
            }
            return Ok(output.stdout);
        }

        self.reporter.step_failed(&shown, &output.stderr);
        Err(Error::CommandFailed {
            command: shown,
            code: output.code,
            stderr: output.stderr,
        })
    }

    pub fn ask(&mut self, question: &Question) -> Result<String> {
        prompt::ask(&mut *self.prompter, question)
    }

    pub fn ask_yes_no(&mut self, question: &Question) -> Result<bool> {
        prompt::ask_yes_no(&mut *self.prompter, question)
    }

    pub fn reporter(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    fn push(&mut self, request: &InvocationRequest) -> Result<Outcome> {
        self.reporter.line(
            Tone::Push,
            "⇗",
            "[push]",
            &format!("Pushing changes to {}...", request.branch),
        );

        self.run_step(&git::add_all())?;

        let status = self.probe(&git::status_porcelain())?;
        if status.trim().is_empty() {
            warn!("nothing staged after add, skipping commit and push");
            self.reporter.warning("Nothing to commit. Skipping push.");
            return Ok(Outcome::NothingToCommit);
        }

        self.run_step(&git::commit(&request.message))?;
        self.run_step(&git::push(&request.remote, &request.branch))?;
        Ok(Outcome::Completed)
    }

    fn pull(&mut self, request: &InvocationRequest) -> Result<Outcome> {
        self.reporter.line(
            Tone::Pull,
            "⇘",
            "[pull]",
            &format!("Pulling latest changes from {}...", request.branch),
        );

        self.run_step(&git::pull(&request.remote, &request.branch))?;
        Ok(Outcome::Completed)
    }

    fn reset(&mut self, request: &InvocationRequest, mode: ResetMode) -> Result<Outcome> {
        if mode.is_destructive() && !self.ask_yes_no(&CONFIRM_HARD_RESET)? {
            warn!("hard reset declined");
            self.reporter.cancelled("Cancelled.");
            return Ok(Outcome::Cancelled);
        }

        self.reporter.line(
            Tone::Reset,
            "⟲",
            "[reset]",
            &format!("Resetting {} branch with --{}...", request.branch, mode),
        );

        self.run_step(&git::fetch(&request.remote))?;
        self.run_step(&git::reset(mode, &request.tracking_ref()))?;
        Ok(Outcome::Completed)
    }
}
