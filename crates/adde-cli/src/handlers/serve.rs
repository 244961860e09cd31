//! Serve command handler.
//!
//! Runs the local server in the foreground until Ctrl-C or until the server
//! exits on its own, then prints what it wrote.

use std::fmt::Write as _;
use std::time::Duration;

use adde_core::{ServerError, ServerExit};
use anyhow::Result;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let manager = &ctx.manager;

    match manager.start_local_server().await {
        Ok(info) => {
            let pid = info.pid.map_or_else(|| "?".to_string(), |pid| pid.to_string());
            println!("Local server started (pid {pid}, port {})", info.port);
        }
        Err(e) if e.is_informational() => {
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(CliError::from(e).into()),
    }
    println!("Press Ctrl-C to stop.");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut poll = tokio::time::interval(EXIT_POLL_INTERVAL);

    let exit = loop {
        tokio::select! {
            res = &mut ctrl_c => {
                res?;
                println!("Stopping local server...");
                match manager.stop_local_server().await {
                    Ok(exit) => break Some(exit),
                    // Exited between the last poll and the signal
                    Err(ServerError::NotRunning) => break manager.last_server_exit().await,
                    Err(e) => return Err(CliError::from(e).into()),
                }
            }
            _ = poll.tick() => {
                if !manager.is_local_server_running().await {
                    debug!("local server exited on its own");
                    break manager.last_server_exit().await;
                }
            }
        }
    };

    if let Some(exit) = exit {
        print!("{}", format_exit(&exit));
    }
    Ok(())
}

/// Exit summary followed by captured stdout and stderr.
pub fn format_exit(exit: &ServerExit) -> String {
    let mut out = String::new();

    let how = if exit.requested { "stopped" } else { "exited" };
    let _ = match exit.code {
        Some(code) => writeln!(out, "Local server {how} with status {code}"),
        None => writeln!(out, "Local server {how} without a status code"),
    };
    if let Some(reason) = &exit.wait_error {
        let _ = writeln!(out, "Waiting for the server failed: {reason}");
    }

    for (name, text) in [("stdout", &exit.output.stdout), ("stderr", &exit.output.stderr)] {
        if text.is_empty() {
            continue;
        }
        let _ = writeln!(out, "--- {name} ---");
        out.push_str(text);
        if !text.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
