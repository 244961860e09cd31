//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Manage the local McIDAS-V ADDE server and its `RESOLV.SRV` entries.
#[derive(Parser)]
#[command(name = "addemgr")]
#[command(about = "Manage the local ADDE server and its dataset registrations")]
#[command(version)]
pub struct Cli {
    /// Install root holding `bin/` and `data/` (defaults to ./adde)
    #[arg(long = "adde-root", env = "ADDE_ROOT", global = true)]
    pub adde_root: Option<PathBuf>,

    /// Port the local server listens on
    #[arg(long, env = "ADDE_PORT", global = true)]
    pub port: Option<u16>,

    /// How long to wait after SIGTERM before killing the server
    #[arg(long = "stop-grace-ms", global = true)]
    pub stop_grace_ms: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
