//! Build and install command implementation
//!
//! Both commands collect build metadata from git and hand it to the
//! configured build tool; they differ only in the argument list used.

use anyhow::Result;

use gdnative_bootstrap::build::BuildTarget;
use gdnative_bootstrap::pipeline::{self, Workspace};
use gdnative_bootstrap::process::SystemRunner;

use crate::cli::Context;

/// Execute the build or install command
pub fn execute(ctx: &Context, target: BuildTarget) -> Result<()> {
    let runner = SystemRunner;
    let workspace = Workspace::new(&ctx.config, &ctx.root, &ctx.launch_dir, &runner);

    match pipeline::build(&workspace, target) {
        Ok(()) => {
            let done = match target {
                BuildTarget::Build => "Compiler built",
                BuildTarget::Install => "Compiler installed",
            };
            println!("{} {}", ctx.output.ok(), done);
            Ok(())
        }
        Err(e) => {
            println!("{} {} failed", ctx.output.failed(), target);
            Err(e.into())
        }
    }
}
