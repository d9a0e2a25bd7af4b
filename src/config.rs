//! # Configuration
//!
//! This module defines the optional `.gdnative-bootstrap.yaml` file that
//! lives at the repository root, and the [`Environment`] snapshot of the
//! process variables the pipeline reacts to.
//!
//! Every field has a default, so a repository without a config file gets the
//! stock behavior: sparse-checkout `doc/classes` of the Godot engine into
//! `doc/`, clear `gdnative_output/*.gen.*`, then run the Go generator with
//! `API_PATH` pointing at the repository root.
//!
//! ```yaml
//! upstream:
//!   branch: 3.x
//! paths:
//!   output: gdnative
//! generator:
//!   program: ./bin/generate
//!   args: [--verbose]
//! ```

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default config file name, looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = ".gdnative-bootstrap.yaml";

/// Environment variable that disables documentation sync.
pub const NODOC_VAR: &str = "NODOC";

const DEFAULT_LDFLAGS: &str = "-s -w -X main.version=$VERSION_TAG -X main.commit=$COMMIT_HASH -X main.date=$BUILD_TIME -X main.builtBy=$BUILDER";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub paths: PathsConfig,
    pub generator: GeneratorConfig,
    pub build: BuildConfig,
}

/// The engine repository the documentation is mirrored from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Clone URL of the engine repository.
    pub url: String,
    /// Name given to the remote inside the mirror.
    pub remote: String,
    /// Branch pulled on every sync.
    pub branch: String,
    /// Paths written to `.git/info/sparse-checkout`, one per line.
    pub sparse_paths: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://github.com/godotengine/godot.git".to_string(),
            remote: "origin".to_string(),
            branch: "master".to_string(),
            sparse_paths: vec!["doc/classes".to_string()],
        }
    }
}

/// Directory layout, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Documentation mirror root.
    pub docs: PathBuf,
    /// Binding-output directory holding `*.gen.*` files.
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            docs: PathBuf::from("doc"),
            output: PathBuf::from("gdnative_output"),
        }
    }
}

/// The external bindings generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub program: String,
    /// Arguments, including the verbosity flag.
    pub args: Vec<String>,
    /// Variable carrying the absolute repository root to the generator.
    pub api_path_var: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            args: vec!["run".into(), "-v".into(), "./cmd/generate".into()],
            api_path_var: "API_PATH".to_string(),
        }
    }
}

/// Build and install of the project's compiler.
///
/// `$NAME` references in the argument lists are expanded from `env` and
/// the collected build metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub program: String,
    pub build_args: Vec<String>,
    pub install_args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let with_verb = |verb: &str| {
            vec![
                verb.to_string(),
                "-ldflags".to_string(),
                DEFAULT_LDFLAGS.to_string(),
                "-x".to_string(),
                "./cmd/gogdc".to_string(),
            ]
        };
        Self {
            program: "go".to_string(),
            build_args: with_verb("build"),
            install_args: with_verb("install"),
            env: BTreeMap::from([("CGO_ENABLED".to_string(), "1".to_string())]),
        }
    }
}

impl Config {
    /// Mirror root resolved against `root`.
    pub fn docs_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.docs)
    }

    /// Binding-output directory resolved against `root`.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.output)
    }

    fn validate(self) -> Result<Self> {
        if self.upstream.url.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "upstream.url must not be empty".to_string(),
                hint: Some("Set 'upstream.url' to the engine repository clone URL".to_string()),
            });
        }
        if self.upstream.sparse_paths.is_empty() {
            return Err(Error::ConfigParse {
                message: "upstream.sparse_paths must list at least one path".to_string(),
                hint: Some("The default is [doc/classes]".to_string()),
            });
        }
        if self.generator.program.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "generator.program must not be empty".to_string(),
                hint: None,
            });
        }
        if self.generator.api_path_var.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "generator.api_path_var must not be empty".to_string(),
                hint: None,
            });
        }
        Ok(self)
    }
}

/// Parse a configuration from YAML text.
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: None,
    })?;
    config.validate()
}

/// Load a configuration from a file.
pub fn from_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Load the configuration for a repository.
///
/// An explicit path must exist. Otherwise `.gdnative-bootstrap.yaml` in
/// `root` is used when present, and the defaults when not.
pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => from_file(path),
        None => {
            let candidate = root.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                log::debug!("Loading configuration from {}", candidate.display());
                from_file(&candidate)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Snapshot of the process variables the pipeline looks at.
///
/// Captured once at startup and passed down by value, so nothing below the
/// CLI reads or writes the process environment directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Documentation sync is skipped.
    pub nodoc: bool,
}

impl Environment {
    /// Capture the relevant variables of the current process.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Build a snapshot from an explicit variable list.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let nodoc = vars
            .into_iter()
            .find(|(key, _)| key == NODOC_VAR)
            .is_some_and(|(_, value)| is_truthy(&value.to_string_lossy()));
        Self { nodoc }
    }
}

/// Whether an environment flag value counts as set.
///
/// Any non-empty value does, including `0` and `false`.
pub fn is_truthy(value: &str) -> bool {
    !value.is_empty()
}
