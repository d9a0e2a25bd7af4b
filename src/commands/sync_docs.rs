//! Sync-docs command implementation
//!
//! Creates or updates the documentation mirror without touching the
//! binding output. Ignores `NODOC`: asking for a sync explicitly wins.

use anyhow::Result;

use gdnative_bootstrap::docs::SyncOutcome;
use gdnative_bootstrap::pipeline::{self, Workspace};
use gdnative_bootstrap::process::SystemRunner;

use crate::cli::Context;

/// Execute the sync-docs command
pub fn execute(ctx: &Context) -> Result<()> {
    let runner = SystemRunner;
    let workspace = Workspace::new(&ctx.config, &ctx.root, &ctx.launch_dir, &runner);

    let outcome = pipeline::sync_docs(&workspace)?;
    let verb = match outcome {
        SyncOutcome::Initialized => "cloned into",
        SyncOutcome::Updated => "updated in",
    };
    println!(
        "{} Documentation {} {}",
        ctx.output.ok(),
        verb,
        workspace.mirror().root().display()
    );
    Ok(())
}
