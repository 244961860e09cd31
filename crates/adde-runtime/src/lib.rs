//! Process runtime for the local ADDE server.
//!
//! Implements `adde_core::LocalServerPort` on top of tokio child processes:
//! launching `mcservl` with its cleared environment, draining both output
//! streams, and SIGTERM-then-SIGKILL shutdown.

#![deny(unsafe_code)]

pub mod process;
mod runner;

// Re-export the supervisor that implements LocalServerPort
pub use process::{LaunchSpec, ServerSupervisor};

// Re-export output capture primitives
pub use process::{OutputBuffer, OutputBuffers, StreamKind};
