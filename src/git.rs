//! External command invocation.
//!
//! Every git call is described as an [`ExternalCommand`]: a program name and
//! a structured argument list. Nothing is ever handed to a shell, so commit
//! messages and URLs reach git exactly as typed.
//!
//! Arguments can be marked secret. Secret arguments are passed to the child
//! unchanged but rendered as `***` whenever the command is displayed, logged
//! or stored in an error.

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};
use crate::request::ResetMode;

const REDACTED: &str = "***";

/// A single argument of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    Plain(String),
    /// Passed through to the child, never displayed.
    Secret(String),
}

impl CommandArg {
    /// The value handed to the child process.
    pub fn value(&self) -> &str {
        match self {
            CommandArg::Plain(value) | CommandArg::Secret(value) => value,
        }
    }
}

/// A program plus its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<CommandArg>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Shorthand for a `git` command with the given plain arguments.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git").args(args)
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args
            .extend(args.into_iter().map(|a| CommandArg::Plain(a.into())));
        self
    }

    /// Append an argument that must never be displayed.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(CommandArg::Secret(arg.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Argument values exactly as the child receives them.
    pub fn arg_values(&self) -> Vec<&str> {
        self.args.iter().map(CommandArg::value).collect()
    }

    pub fn has_secret(&self) -> bool {
        self.args
            .iter()
            .any(|arg| matches!(arg, CommandArg::Secret(_)))
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            let shown = match arg {
                CommandArg::Plain(value) => value.as_str(),
                CommandArg::Secret(_) => REDACTED,
            };
            if shown.is_empty() || shown.contains(char::is_whitespace) {
                write!(f, " \"{}\"", shown)?;
            } else {
                write!(f, " {}", shown)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands to completion.
///
/// Returns `Err` only when the command could not be started; a non-zero
/// exit status is reported through [`CommandOutput::code`].
pub trait CommandRunner {
    fn run(&mut self, command: &ExternalCommand) -> Result<CommandOutput>;
}

/// Runs commands as real child processes.
///
/// Stdout and stderr are captured; stdin is inherited so that installers
/// and credential helpers can still ask the user questions.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    cwd: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command inside `dir` instead of the current directory.
    #[cfg(test)]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &ExternalCommand) -> Result<CommandOutput> {
        debug!("running: {}", command);

        let mut cmd = Command::new(command.program());
        cmd.args(command.arg_values())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| Error::Spawn {
            command: command.to_string(),
            source: e,
        })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!("finished: {} (exit code {:?})", command, result.code);
        Ok(result)
    }
}

/// `git add .`
pub fn add_all() -> ExternalCommand {
    ExternalCommand::git(["add", "."])
}

/// `git status --porcelain`
pub fn status_porcelain() -> ExternalCommand {
    ExternalCommand::git(["status", "--porcelain"])
}

/// `git commit -m <message>`
pub fn commit(message: &str) -> ExternalCommand {
    ExternalCommand::git(["commit", "-m", message])
}

/// `git push <remote> <branch>`
pub fn push(remote: &str, branch: &str) -> ExternalCommand {
    ExternalCommand::git(["push", remote, branch])
}

/// `git pull <remote> <branch>`
pub fn pull(remote: &str, branch: &str) -> ExternalCommand {
    ExternalCommand::git(["pull", remote, branch])
}

/// `git fetch <remote>`
pub fn fetch(remote: &str) -> ExternalCommand {
    ExternalCommand::git(["fetch", remote])
}

/// `git reset --<mode> <target>`
pub fn reset(mode: ResetMode, target: &str) -> ExternalCommand {
    ExternalCommand::git(["reset".to_string(), format!("--{}", mode), target.to_string()])
}

/// `git config --global <key> <value>`
pub fn config_global(key: &str, value: &str) -> ExternalCommand {
    ExternalCommand::git(["config", "--global", key, value])
}

/// `git init`
pub fn init() -> ExternalCommand {
    ExternalCommand::git(["init"])
}

/// `git remote add <remote> <url>`
pub fn remote_add(remote: &str, url: &str) -> ExternalCommand {
    ExternalCommand::git(["remote", "add", remote, url])
}

/// `git remote -v`
pub fn remote_verbose() -> ExternalCommand {
    ExternalCommand::git(["remote", "-v"])
}

/// `git remote set-url <remote> <url>` with the URL kept out of all output.
pub fn remote_set_url_secret(remote: &str, url: &str) -> ExternalCommand {
    ExternalCommand::git(["remote", "set-url", remote]).secret_arg(url)
}

/// `sudo apt install git`
pub fn install_git() -> ExternalCommand {
    ExternalCommand::new("sudo").args(["apt", "install", "git"])
}
