//! Domain-level error aggregating every concern the facade touches.

use thiserror::Error;

use super::local_server::ServerError;
use crate::paths::PathError;
use crate::resolv::ResolvError;
use crate::settings::SettingsError;

/// Error type for facade operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Platform detection or path resolution failed.
    #[error(transparent)]
    Paths(#[from] PathError),

    /// Reading, writing, or editing `RESOLV.SRV` failed.
    #[error(transparent)]
    Resolv(#[from] ResolvError),

    /// A local server lifecycle operation failed.
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
