//! Path utilities for the local ADDE installation.
//!
//! This module provides the canonical path resolution for all components:
//! - Platform detection (separator and executable conventions)
//! - The `adde` install root and its `bin` / `data` subdirectories
//! - The `mcservl` server binary and the `RESOLV.SRV` configuration file
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - Platform rules are computed once into an immutable `PlatformProfile`
//! - No interactive/terminal I/O - adapters handle presentation separately

mod ensure;
mod error;
mod platform;
mod resolver;

// Error type
pub use error::PathError;

// Platform detection
pub use platform::{OS_NAME_ENV, PlatformFamily, PlatformProfile};

// Directory operations
pub use ensure::ensure_parent_dir;

// Resolved install layout
pub use resolver::{
    ADDE_DIR_NAME, AddePaths, BIN_DIR_NAME, DATA_DIR_NAME, RESOLV_FILE_NAME, SERVER_BINARY_NAME,
};
