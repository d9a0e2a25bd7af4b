//! # Build & Install
//!
//! Builds (or installs) the project's compiler binary with build metadata
//! injected through the environment:
//!
//! | Variable      | Source                                   |
//! |---------------|------------------------------------------|
//! | `COMMIT_HASH` | `git rev-parse --short HEAD`             |
//! | `VERSION_TAG` | `git describe --tags --abbrev=0`         |
//! | `BUILD_TIME`  | current UTC time                         |
//! | `BUILDER`     | `git log -1 --pretty=format:%ae`         |
//!
//! Git failures never abort a build; the value is left empty, and a missing
//! tag falls back to [`DEV_VERSION_TAG`].
//!
//! The child is not run through a shell, so `$NAME` and `${NAME}` references
//! inside the configured arguments (the `-ldflags` string in particular) are
//! expanded here from the same variables the child receives.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use regex::{Captures, Regex};

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::git;
use crate::process::{CommandRunner, Invocation};

/// Version tag used when the repository has no tags.
pub const DEV_VERSION_TAG: &str = "v0.0.0-dev";

const VAR_PATTERN: &str = r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))";

/// Which compiler target to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTarget {
    Build,
    Install,
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildTarget::Build => write!(f, "build"),
            BuildTarget::Install => write!(f, "install"),
        }
    }
}

/// Metadata describing a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub commit_hash: String,
    pub version_tag: String,
    pub build_time: String,
    pub builder: String,
}

impl BuildInfo {
    /// Collect metadata from the repository in `repo_root`.
    pub fn collect(runner: &dyn CommandRunner, repo_root: &Path, now: DateTime<Utc>) -> Self {
        let version_tag = git::latest_tag(runner, repo_root)
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| DEV_VERSION_TAG.to_string());

        Self {
            commit_hash: git::short_head(runner, repo_root).unwrap_or_default(),
            version_tag,
            build_time: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            builder: git::last_author_email(runner, repo_root).unwrap_or_default(),
        }
    }

    /// The metadata as environment variables.
    pub fn env_vars(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("COMMIT_HASH".to_string(), self.commit_hash.clone()),
            ("VERSION_TAG".to_string(), self.version_tag.clone()),
            ("BUILD_TIME".to_string(), self.build_time.clone()),
            ("BUILDER".to_string(), self.builder.clone()),
        ])
    }
}

/// Replace `$NAME` / `${NAME}` references in `input` with values from
/// `vars`. Unknown names expand to the empty string.
pub fn expand_vars(input: &str, vars: &BTreeMap<String, String>) -> Result<String> {
    let regex = Regex::new(VAR_PATTERN).map_err(Error::Regex)?;
    let expanded = regex.replace_all(input, |caps: &Captures| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        vars.get(name).cloned().unwrap_or_default()
    });
    Ok(expanded.into_owned())
}

/// Describe the build or install run.
///
/// The child environment is the configured `env` overlaid with the build
/// metadata; argument references are expanded from that same map.
pub fn invocation(
    config: &BuildConfig,
    target: BuildTarget,
    info: &BuildInfo,
    repo_root: &Path,
) -> Result<Invocation> {
    let mut vars = config.env.clone();
    vars.extend(info.env_vars());

    let raw_args = match target {
        BuildTarget::Build => &config.build_args,
        BuildTarget::Install => &config.install_args,
    };
    let args = raw_args
        .iter()
        .map(|arg| expand_vars(arg, &vars))
        .collect::<Result<Vec<_>>>()?;

    Ok(Invocation::new(config.program.as_str(), repo_root)
        .args(args)
        .envs(vars))
}

/// Run the build or install, failing if it exits unsuccessfully.
pub fn run(runner: &dyn CommandRunner, invocation: &Invocation, target: BuildTarget) -> Result<()> {
    info!("Running {} with `{}`", target, invocation);
    let outcome = runner.run(invocation)?;
    if !outcome.success() {
        return Err(Error::Build {
            command: invocation.command_line(),
            code: outcome.code,
        });
    }
    Ok(())
}
