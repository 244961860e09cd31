//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Print resolved paths as `key = value` lines, or as JSON.
pub fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    let paths = ctx.manager.paths();
    if json {
        println!("{}", serde_json::to_string_pretty(paths)?);
    } else {
        println!("{paths}");
        println!(
            "server_binary_present = {}",
            paths.server_binary_exists()
        );
    }
    Ok(())
}
