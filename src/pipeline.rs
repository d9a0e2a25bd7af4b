//! Orchestrator for the bootstrap run
//!
//! This module coordinates the stages behind the default `generate` command:
//! 1. Skip check (`NODOC` or `--no-doc`)
//! 2. Documentation mirror sync (init + pull, or pull)
//! 3. Clean of previous `*.gen.*` output
//! 4. Generator run with `API_PATH`
//! 5. Optional compiler build
//!
//! Stages run strictly in order and each is attempted once. Only the clean
//! stage swallows its failures.

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;

use crate::build::{self, BuildInfo, BuildTarget};
use crate::clean::{self, CleanReport};
use crate::config::{Config, Environment};
use crate::docs::{DocMirror, SyncOutcome};
use crate::error::Result;
use crate::generate;
use crate::process::CommandRunner;

/// Everything a stage needs to know about where it runs.
pub struct Workspace<'a> {
    pub config: &'a Config,
    /// Absolute repository root, the value handed to the generator.
    pub repo_root: PathBuf,
    /// Directory the tool was launched from; the generator runs here.
    pub launch_dir: PathBuf,
    pub runner: &'a dyn CommandRunner,
}

impl<'a> Workspace<'a> {
    pub fn new(
        config: &'a Config,
        repo_root: impl Into<PathBuf>,
        launch_dir: impl Into<PathBuf>,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            config,
            repo_root: repo_root.into(),
            launch_dir: launch_dir.into(),
            runner,
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn mirror(&self) -> DocMirror {
        DocMirror::from_config(self.config, &self.repo_root)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir(&self.repo_root)
    }
}

/// Options of a generate run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Skip documentation sync regardless of the environment.
    pub skip_docs: bool,
    /// Build the compiler after a successful generation.
    pub build: bool,
}

/// What a generate run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// `None` when documentation sync was skipped.
    pub docs: Option<SyncOutcome>,
    /// Number of generated files removed by the clean stage.
    pub removed: usize,
    pub built: bool,
}

/// Execute the complete generate run.
pub fn execute_generate(
    workspace: &Workspace<'_>,
    env: &Environment,
    options: GenerateOptions,
) -> Result<GenerateReport> {
    let mut report = GenerateReport::default();

    if env.nodoc || options.skip_docs {
        info!("Skipping documentation sync");
    } else {
        report.docs = Some(sync_docs(workspace)?);
    }

    // Best-effort: the report is logged and otherwise ignored.
    let cleaned = clean(workspace);
    report.removed = cleaned.removed.len();

    let invocation = generate::invocation(
        &workspace.config.generator,
        workspace.repo_root(),
        &workspace.launch_dir,
    );
    generate::run(workspace.runner, &invocation)?;

    if options.build {
        build(workspace, BuildTarget::Build)?;
        report.built = true;
    }

    Ok(report)
}

/// Sync the documentation mirror.
pub fn sync_docs(workspace: &Workspace<'_>) -> Result<SyncOutcome> {
    workspace.mirror().sync(workspace.runner)
}

/// Remove previous generator output. Never fails.
pub fn clean(workspace: &Workspace<'_>) -> CleanReport {
    let report = clean::clean_generated(&workspace.output_dir());
    report.log();
    report
}

/// Build or install the compiler with fresh build metadata.
pub fn build(workspace: &Workspace<'_>, target: BuildTarget) -> Result<()> {
    let info = BuildInfo::collect(workspace.runner, workspace.repo_root(), Utc::now());
    let invocation = build::invocation(&workspace.config.build, target, &info, workspace.repo_root())?;
    build::run(workspace.runner, &invocation, target)
}
