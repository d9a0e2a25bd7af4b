//! Clean command implementation
//!
//! Removes previously generated `*.gen.*` files. Like the clean stage of
//! `generate`, it never fails: files that cannot be removed are reported
//! as warnings.

use anyhow::Result;

use gdnative_bootstrap::pipeline::{self, Workspace};
use gdnative_bootstrap::process::SystemRunner;

use crate::cli::Context;

/// Execute the clean command
pub fn execute(ctx: &Context) -> Result<()> {
    let runner = SystemRunner;
    let workspace = Workspace::new(&ctx.config, &ctx.root, &ctx.launch_dir, &runner);

    let report = pipeline::clean(&workspace);
    println!(
        "{} Removed {} generated files from {}",
        ctx.output.ok(),
        report.removed.len(),
        workspace.output_dir().display()
    );
    if !report.failed.is_empty() {
        println!("   {} files could not be removed", report.failed.len());
    }
    Ok(())
}
