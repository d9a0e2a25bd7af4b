//! # Error Handling
//!
//! This module defines the centralized error type for `gdnative-bootstrap`.
//! It uses the `thiserror` library to create an `Error` enum covering every
//! failure mode of the bootstrap pipeline, with enough context (command line,
//! working directory, exit status) to tell the user what went wrong.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to one kind of
//!   failure:
//!   - Configuration parsing errors.
//!   - Git command failures while syncing the documentation mirror.
//!   - Failures to launch a child process at all.
//!   - Non-zero exits of the generator or the build tool.
//!   - I/O and regex errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Cleanup failures have no variant on purpose: the clean stage reports them
//! through `CleanReport` and never aborts a run.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gdnative-bootstrap operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the `.gdnative-bootstrap.yaml` file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A git command exited unsuccessfully.
    #[error("Git command failed in {}: {command} ({})", dir.display(), describe_status(*code))]
    GitCommand {
        command: String,
        dir: PathBuf,
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
    },

    /// A child process could not be started.
    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external bindings generator exited unsuccessfully.
    #[error("Could not generate bindings: `{command}` {}", describe_status(*code))]
    Generator { command: String, code: Option<i32> },

    /// The build or install command exited unsuccessfully.
    #[error("Build command failed: `{command}` {}", describe_status(*code))]
    Build { command: String, code: Option<i32> },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// The process exit code this error should produce.
    ///
    /// Generator and build failures forward the child's own exit code so
    /// that callers scripting around the tool see the same status. Everything
    /// else, including a child killed by a signal, maps to `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Generator { code, .. } | Error::Build { code, .. } => code
                .and_then(|c| u8::try_from(c).ok())
                .filter(|c| *c != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
