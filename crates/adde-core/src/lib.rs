//! Core domain types and port definitions for the local ADDE server manager.
//!
//! - [`paths`]: platform detection and the `adde` install layout
//! - [`resolv`]: `RESOLV.SRV` entries and their file store
//! - [`ports`]: the `LocalServerPort` trait implemented by `adde-runtime`
//! - [`services`]: the `AddeManager` facade
//! - [`settings`]: port, install root, and stop grace configuration

#![deny(unused_crate_dependencies)]

pub mod paths;
pub mod ports;
pub mod resolv;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use paths::{AddePaths, PathError, PlatformFamily, PlatformProfile};
pub use ports::{
    CoreError, LocalServerPort, ServerError, ServerExit, ServerOutput, ServerProcessInfo,
    SupervisorState,
};
pub use resolv::{EntryBody, EntryId, ResolvEntry, ResolvError, ResolvStore, distinct_groups};
pub use services::AddeManager;
pub use settings::{
    DEFAULT_LOCAL_ADDE_PORT, DEFAULT_STOP_GRACE_MS, Settings, SettingsError, validate_settings,
};
