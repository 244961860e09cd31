//! Groups command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Print each distinct group on its own line, first-seen order.
pub fn execute(ctx: &CliContext) -> Result<()> {
    for group in ctx.manager.groups() {
        println!("{group}");
    }
    Ok(())
}
