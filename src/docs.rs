//! # Documentation Mirror
//!
//! Keeps a local sparse checkout of the engine's class documentation up to
//! date. The mirror is a plain git repository whose working tree only
//! contains the configured sparse paths (`doc/classes` by default).
//!
//! ## Lifecycle
//!
//! - **Absent**: the directory is created and initialized in this order:
//!   `git init`, `git remote add -f`, `git config core.sparseCheckout true`,
//!   sparse patterns appended to `.git/info/sparse-checkout`, `git pull`.
//! - **Present**: only `git pull` runs. The mirror is never re-initialized
//!   or deleted, and nothing outside what git itself updates is touched.
//!
//! Both branches end with the mirror at the tip of the upstream branch.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::{Config, UpstreamConfig};
use crate::error::Result;
use crate::git;
use crate::process::CommandRunner;

/// Which branch of the sync ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The mirror already existed and was pulled.
    Updated,
    /// The mirror was created, configured and pulled.
    Initialized,
}

/// A documentation mirror rooted at a directory.
#[derive(Debug, Clone)]
pub struct DocMirror {
    root: PathBuf,
    upstream: UpstreamConfig,
}

impl DocMirror {
    pub fn new(root: impl Into<PathBuf>, upstream: UpstreamConfig) -> Self {
        Self {
            root: root.into(),
            upstream,
        }
    }

    /// The mirror for a repository rooted at `repo_root`.
    pub fn from_config(config: &Config, repo_root: &Path) -> Self {
        Self::new(config.docs_dir(repo_root), config.upstream.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the mirror directory exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Bring the mirror up to date, initializing it first if needed.
    pub fn sync(&self, runner: &dyn CommandRunner) -> Result<SyncOutcome> {
        if self.exists() {
            info!("Documentation found. Pulling latest changes...");
            self.pull(runner)?;
            return Ok(SyncOutcome::Updated);
        }

        info!("Documentation not found. Cloning the repository...");
        self.initialize(runner)?;
        self.pull(runner)?;
        Ok(SyncOutcome::Initialized)
    }

    fn initialize(&self, runner: &dyn CommandRunner) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        git::init(runner, &self.root)?;
        git::add_remote(runner, &self.root, &self.upstream.remote, &self.upstream.url)?;
        git::enable_sparse_checkout(runner, &self.root)?;
        let file = git::append_sparse_patterns(&self.root, &self.upstream.sparse_paths)?;
        log::debug!("Wrote sparse-checkout patterns to {}", file.display());
        Ok(())
    }

    fn pull(&self, runner: &dyn CommandRunner) -> Result<()> {
        git::pull(
            runner,
            &self.root,
            &self.upstream.remote,
            &self.upstream.branch,
        )
    }
}
