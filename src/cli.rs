//! CLI argument parsing and command dispatch

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use gdnative_bootstrap::build::BuildTarget;
use gdnative_bootstrap::config::{self, Config};
use gdnative_bootstrap::output::OutputConfig;

use crate::commands;

/// Sync engine class documentation and run the bindings generator
#[derive(Parser, Debug)]
#[command(name = "gdnative-bootstrap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `generate`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Repository root (defaults to current directory)
    #[arg(long, global = true, value_name = "DIR", env = "GDNATIVE_BOOTSTRAP_ROOT")]
    root: Option<PathBuf>,

    /// Path to config file (defaults to <root>/.gdnative-bootstrap.yaml)
    #[arg(long, global = true, value_name = "PATH", env = "GDNATIVE_BOOTSTRAP_CONFIG")]
    config: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync documentation, clean previous output and run the generator
    Generate(commands::generate::GenerateArgs),

    /// Create or update the documentation mirror only
    SyncDocs,

    /// Remove previously generated `*.gen.*` files
    Clean,

    /// Build the compiler binary with build metadata
    Build,

    /// Install the compiler binary with build metadata
    Install,

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Resolved settings shared by every command.
pub struct Context {
    pub config: Config,
    /// Absolute repository root.
    pub root: PathBuf,
    /// Directory the tool was started from.
    pub launch_dir: PathBuf,
    pub output: OutputConfig,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level)?;
        let output = OutputConfig::from_env_and_flag(&self.color);

        let context =
            || resolve_context(self.root.as_deref(), self.config.as_deref(), output.clone());

        match self.command {
            None => commands::generate::execute(
                &context()?,
                commands::generate::GenerateArgs::default(),
            ),
            Some(Commands::Generate(args)) => commands::generate::execute(&context()?, args),
            Some(Commands::SyncDocs) => commands::sync_docs::execute(&context()?),
            Some(Commands::Clean) => commands::clean::execute(&context()?),
            Some(Commands::Build) => commands::build::execute(&context()?, BuildTarget::Build),
            Some(Commands::Install) => commands::build::execute(&context()?, BuildTarget::Install),
            Some(Commands::Completions(args)) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter: LevelFilter = level
        .parse()
        .with_context(|| format!("Invalid log level: {}", level))?;

    // RUST_LOG refines the level chosen on the command line.
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

fn resolve_context(root: Option<&Path>, config_path: Option<&Path>, output: OutputConfig) -> Result<Context> {
    let launch_dir = std::env::current_dir().context("Failed to get current directory")?;
    let root = match root {
        Some(root) => launch_dir.join(root),
        None => launch_dir.clone(),
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("Repository root not found: {}", root.display()))?;

    let config = config::load(&root, config_path).with_context(|| match config_path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => format!("Failed to load config for {}", root.display()),
    })?;

    Ok(Context {
        config,
        root,
        launch_dir,
        output,
    })
}
