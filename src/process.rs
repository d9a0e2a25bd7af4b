//! # Child Process Invocation
//!
//! Every external program this tool drives (git, the bindings generator, the
//! build tool) is described by an [`Invocation`]: an immutable value holding
//! the program, its arguments, the directory it runs in and the variables
//! added on top of the inherited environment. Nothing here mutates the
//! calling process's own working directory or environment.
//!
//! ## Design
//!
//! Execution goes through the [`CommandRunner`] trait so that the rest of the
//! library can be exercised without spawning real processes:
//!
//! - **`SystemRunner`**: the default implementation, backed by
//!   `std::process::Command`. Standard output and error are inherited for
//!   `run` so the user sees git and generator progress live.
//! - In tests, a recording runner captures the sequence of invocations and
//!   returns scripted exit statuses.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// A fully described child process, ready to be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    current_dir: PathBuf,
    env: BTreeMap<String, String>,
}

impl Invocation {
    /// Describe `program`, to be run with `current_dir` as its working
    /// directory.
    pub fn new(program: impl Into<String>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
            env: BTreeMap::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add a variable to the child's environment.
    ///
    /// The child still inherits the full environment of this process; the
    /// variables set here are layered on top.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add several variables to the child's environment.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Variables added on top of the inherited environment.
    pub fn extra_env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Human-readable command line, used in logs and error messages.
    pub fn command_line(&self) -> String {
        self.to_string()
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .current_dir(&self.current_dir)
            .envs(&self.env);
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Exit status plus captured standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub outcome: ExitOutcome,
    pub stdout: String,
}

/// Trait for running child processes - allows mocking in tests
pub trait CommandRunner {
    /// Run the invocation to completion with inherited stdio.
    ///
    /// Returns an error only if the process could not be started; a non-zero
    /// exit is reported through the returned [`ExitOutcome`].
    fn run(&self, invocation: &Invocation) -> Result<ExitOutcome>;

    /// Run the invocation and capture its standard output.
    fn capture(&self, invocation: &Invocation) -> Result<CapturedOutput>;
}

/// The default implementation of `CommandRunner`, which spawns real
/// processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExitOutcome> {
        debug!(
            "Running `{}` in {}",
            invocation,
            invocation.current_dir().display()
        );
        let status = invocation
            .to_command()
            .status()
            .map_err(|source| Error::Spawn {
                command: invocation.command_line(),
                source,
            })?;
        Ok(ExitOutcome {
            code: status.code(),
        })
    }

    fn capture(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        debug!(
            "Capturing `{}` in {}",
            invocation,
            invocation.current_dir().display()
        );
        let output = invocation
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                command: invocation.command_line(),
                source,
            })?;
        Ok(CapturedOutput {
            outcome: ExitOutcome {
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
