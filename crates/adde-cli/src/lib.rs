//! Command-line adapter for the local ADDE server manager.
//!
//! `main.rs` is the composition root; handlers drive `AddeManager` and format
//! its results for the terminal.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by the binary target
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
