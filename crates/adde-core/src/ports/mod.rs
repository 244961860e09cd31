//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define interfaces that the core domain uses without depending on
//! concrete implementations. Process management lives in `adde-runtime`,
//! which implements `LocalServerPort`.

mod core_error;
pub mod local_server;

pub use core_error::CoreError;
pub use local_server::{
    LocalServerPort, ServerError, ServerExit, ServerOutput, ServerProcessInfo, SupervisorState,
};
