//! Invocation of the external bindings generator.
//!
//! The generator inherits the full environment of this process plus one
//! variable (`API_PATH` by default) holding the absolute repository root.
//! It runs in the directory the tool was launched from.
//!
//! Dot-relative paths in the configured program and arguments (`./cmd/generate`,
//! `../tools/gen`) are relative to the repository root, not the launch
//! directory, so `--root` works from anywhere.

use std::path::{Component, Path, PathBuf};

use log::info;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::process::{CommandRunner, Invocation};

/// Describe the generator run for a repository rooted at `repo_root`.
pub fn invocation(config: &GeneratorConfig, repo_root: &Path, launch_dir: &Path) -> Invocation {
    Invocation::new(resolve_in_root(&config.program, repo_root), launch_dir)
        .args(config.args.iter().map(|arg| resolve_in_root(arg, repo_root)))
        .env(
            config.api_path_var.as_str(),
            repo_root.to_string_lossy().into_owned(),
        )
}

/// Anchor a `./` or `../` path at the repository root; other values pass
/// through untouched.
fn resolve_in_root(value: &str, repo_root: &Path) -> String {
    if !(value.starts_with("./") || value.starts_with("../")) {
        return value.to_string();
    }
    let relative: PathBuf = Path::new(value)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    repo_root.join(relative).to_string_lossy().into_owned()
}

/// Run the generator once, failing if it exits unsuccessfully.
pub fn run(runner: &dyn CommandRunner, invocation: &Invocation) -> Result<()> {
    info!("Generating bindings with `{}`", invocation);
    let outcome = runner.run(invocation)?;
    if !outcome.success() {
        return Err(Error::Generator {
            command: invocation.command_line(),
            code: outcome.code,
        });
    }
    Ok(())
}
