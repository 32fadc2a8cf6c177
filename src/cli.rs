//! CLI argument parsing and operation dispatch

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use log::debug;

use pusher::defaults::{DEFAULT_BRANCH, DEFAULT_COMMIT_MESSAGE, DEFAULT_REMOTE};
use pusher::dispatcher::{Dispatcher, Outcome};
use pusher::error::Error;
use pusher::git::SystemRunner;
use pusher::output::{emoji, paint, OutputConfig, Reporter, Tone};
use pusher::prompt::{LinePrompter, Prompter, TerminalPrompter};
use pusher::request::{InvocationRequest, OperationFlags, ResetMode};

const EXAMPLES: &str = "\
Examples:
    pusher --push                   # Add, commit, push to main
    pusher --push -b develop        # Push to develop
    pusher --push -m \"fix: bug\"     # Push with custom message
    pusher --pull                   # Pull latest changes
    pusher --reset hard             # Reset --hard to remote
    pusher --setup                  # Run the setup wizard";

/// Git helper - runs one of push, pull, reset or setup
#[derive(Parser, Debug)]
#[command(name = "pusher")]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Stage everything, commit and push to the remote
    #[arg(long)]
    push: bool,

    /// Pull changes from the remote
    #[arg(long)]
    pull: bool,

    /// Reset the branch to its remote counterpart
    #[arg(long, value_enum, value_name = "MODE")]
    reset: Option<ResetMode>,

    /// Branch to push/pull/reset
    #[arg(short, long, default_value = DEFAULT_BRANCH, env = "PUSHER_BRANCH")]
    branch: String,

    /// Commit message for push
    #[arg(short, long, default_value = DEFAULT_COMMIT_MESSAGE, env = "PUSHER_MESSAGE")]
    message: String,

    /// Run initial Git setup and configuration
    #[arg(long)]
    setup: bool,

    /// Remote to talk to
    #[arg(long, default_value = DEFAULT_REMOTE, env = "PUSHER_REMOTE")]
    remote: String,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Run the selected operation and map the result to an exit code.
    pub fn execute(self) -> ExitCode {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.run(&output) {
            Ok(outcome) => {
                debug!("run ended: {:?}", outcome);
                ExitCode::SUCCESS
            }
            Err(err) => {
                report_error(&output, &err);
                ExitCode::FAILURE
            }
        }
    }

    fn run(self, output: &OutputConfig) -> Result<Option<Outcome>> {
        if let Some(shell) = self.completions {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            return Ok(None);
        }

        let request = self.request()?;

        let mut runner = SystemRunner::new();
        let mut prompter: Box<dyn Prompter> = if io::stdin().is_terminal() {
            Box::new(TerminalPrompter::new(output.clone()))
        } else {
            debug!("stdin is not a terminal, reading answers line by line");
            Box::new(LinePrompter::stdio(output.clone()))
        };
        let reporter = Reporter::stdout(output.clone());

        let outcome = Dispatcher::new(&mut runner, prompter.as_mut(), reporter)
            .execute(&request)
            .with_context(|| format!("{} failed", request.operation))?;
        Ok(Some(outcome))
    }

    /// The request described by the flags.
    fn request(&self) -> pusher::error::Result<InvocationRequest> {
        let flags = OperationFlags {
            push: self.push,
            pull: self.pull,
            reset: self.reset,
            setup: self.setup,
        };
        InvocationRequest::from_flags(&flags, &self.branch, &self.message, &self.remote)
    }
}

/// Initialize `env_logger`; `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Print an error unless the dispatcher already reported it as a failed step.
fn report_error(output: &OutputConfig, err: &anyhow::Error) {
    if err.downcast_ref::<Error>().is_some_and(Error::is_reported) {
        return;
    }

    eprintln!(
        "{}",
        paint(
            output,
            Tone::Error,
            &format!("{} {:#}", emoji(output, "⊘", "[error]"), err)
        )
    );
}
