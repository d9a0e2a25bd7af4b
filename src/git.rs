//! Git commands used by the documentation mirror and the build metadata.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Any authentication configured in ~/.gitconfig
//!
//! Every command runs in an explicit directory; the process working
//! directory is never changed.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::process::{CommandRunner, Invocation};

/// Build a `git` invocation running in `dir`.
pub fn command<I, S>(dir: &Path, args: I) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Invocation::new("git", dir).args(args)
}

/// Run a git command in `dir`, failing on a non-zero exit.
pub fn run<I, S>(runner: &dyn CommandRunner, dir: &Path, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let invocation = command(dir, args);
    let outcome = runner.run(&invocation)?;
    if !outcome.success() {
        return Err(Error::GitCommand {
            command: invocation.command_line(),
            dir: dir.to_path_buf(),
            code: outcome.code,
        });
    }
    Ok(())
}

/// Run a git command in `dir` and return its trimmed stdout.
///
/// Returns `None` if git could not be started or exited unsuccessfully.
/// Used for optional metadata where a missing value is not an error.
pub fn query<I, S>(runner: &dyn CommandRunner, dir: &Path, args: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let invocation = command(dir, args);
    match runner.capture(&invocation) {
        Ok(captured) if captured.outcome.success() => Some(captured.stdout.trim().to_string()),
        Ok(captured) => {
            log::debug!("`{}` exited with {:?}", invocation, captured.outcome.code);
            None
        }
        Err(e) => {
            log::debug!("{}", e);
            None
        }
    }
}

/// `git init`
pub fn init(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    run(runner, dir, ["init"])
}

/// `git remote add -f <remote> <url>`
pub fn add_remote(runner: &dyn CommandRunner, dir: &Path, remote: &str, url: &str) -> Result<()> {
    run(runner, dir, ["remote", "add", "-f", remote, url])
}

/// `git config core.sparseCheckout true`
pub fn enable_sparse_checkout(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    run(runner, dir, ["config", "core.sparseCheckout", "true"])
}

/// `git pull <remote> <branch>`
pub fn pull(runner: &dyn CommandRunner, dir: &Path, remote: &str, branch: &str) -> Result<()> {
    run(runner, dir, ["pull", remote, branch])
}

/// Location of the sparse-checkout pattern file of the repository in `dir`.
pub fn sparse_checkout_file(dir: &Path) -> PathBuf {
    dir.join(".git").join("info").join("sparse-checkout")
}

/// Append each pattern as its own line to `.git/info/sparse-checkout`.
pub fn append_sparse_patterns(dir: &Path, patterns: &[String]) -> Result<PathBuf> {
    let path = sparse_checkout_file(dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Keep appended patterns on their own lines even if the file lacks a
    // trailing newline.
    let needs_newline = fs::read(&path)
        .map(|bytes| !bytes.is_empty() && !bytes.ends_with(b"\n"))
        .unwrap_or(false);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_newline {
        file.write_all(b"\n")?;
    }
    for pattern in patterns {
        writeln!(file, "{}", pattern)?;
    }
    Ok(path)
}

/// Short hash of `HEAD`.
pub fn short_head(runner: &dyn CommandRunner, dir: &Path) -> Option<String> {
    query(runner, dir, ["rev-parse", "--short", "HEAD"])
}

/// Most recent tag reachable from `HEAD`.
pub fn latest_tag(runner: &dyn CommandRunner, dir: &Path) -> Option<String> {
    query(runner, dir, ["describe", "--tags", "--abbrev=0"])
}

/// Author email of the last commit.
pub fn last_author_email(runner: &dyn CommandRunner, dir: &Path) -> Option<String> {
    query(runner, dir, ["log", "-1", "--pretty=format:%ae"])
}
