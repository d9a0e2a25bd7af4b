//! Generate command implementation
//!
//! The default command. Runs the full bootstrap:
//! 1. Documentation sync, unless `NODOC` or `--no-doc`
//! 2. Clean of previous `*.gen.*` output
//! 3. Generator run with `API_PATH`
//! 4. Compiler build, with `--build`

use std::time::Instant;

use anyhow::Result;
use clap::Args;

use gdnative_bootstrap::config::Environment;
use gdnative_bootstrap::docs::SyncOutcome;
use gdnative_bootstrap::pipeline::{self, GenerateOptions, Workspace};
use gdnative_bootstrap::process::SystemRunner;

use crate::cli::Context;

/// Arguments for the generate command
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Skip documentation sync (same as setting NODOC)
    #[arg(long)]
    pub no_doc: bool,

    /// Build the compiler after generating the bindings
    #[arg(long)]
    pub build: bool,
}

/// Execute the generate command
pub fn execute(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let start_time = Instant::now();
    let runner = SystemRunner;
    let workspace = Workspace::new(&ctx.config, &ctx.root, &ctx.launch_dir, &runner);
    let options = GenerateOptions {
        skip_docs: args.no_doc,
        build: args.build,
    };

    match pipeline::execute_generate(&workspace, &Environment::from_process(), options) {
        Ok(report) => {
            let docs = match report.docs {
                Some(SyncOutcome::Initialized) => "documentation cloned",
                Some(SyncOutcome::Updated) => "documentation updated",
                None => "documentation skipped",
            };
            println!(
                "{} Bindings generated in {:.2}s ({}, {} stale files removed{})",
                ctx.output.ok(),
                start_time.elapsed().as_secs_f64(),
                docs,
                report.removed,
                if report.built { ", compiler built" } else { "" }
            );
            Ok(())
        }
        Err(e) => {
            println!("{} Generation failed", ctx.output.failed());
            Err(e.into())
        }
    }
}
