//! Process management for the local `mcservl` server.
//!
//! # Structure
//!
//! - `LaunchSpec` - command line and cleared environment for one launch
//! - `OutputBuffers` - shared stdout/stderr text
//! - `spawn_stream_drain` - per-stream reader tasks
//! - `shutdown_child` - SIGTERM, grace period, then SIGKILL
//! - `ServerSupervisor` - single-instance lifecycle owner

mod launch;
mod output;
pub mod shutdown;
mod stream;
mod supervisor;

pub use launch::{LaunchSpec, SERVER_PATH_VAR};
pub use output::{OutputBuffer, OutputBuffers};
pub use shutdown::shutdown_child;
pub use stream::{StreamKind, spawn_stream_drain};
pub use supervisor::ServerSupervisor;
