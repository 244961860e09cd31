//! Path-related error types.
//!
//! Provides semantic errors for path operations without exposing
//! implementation details or adapter-specific concerns.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during platform detection and path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// The host operating system could not be identified.
    #[error("Cannot determine host platform: operating system name is unavailable")]
    PlatformUnknown,

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),

    /// Failed to create a directory.
    #[error("Failed to create directory {}: {reason}", path.display())]
    CreateFailed { path: PathBuf, reason: String },
}
