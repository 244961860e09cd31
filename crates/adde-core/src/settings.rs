//! Settings domain types and validation.
//!
//! These are pure domain types with no infrastructure dependencies. Adapters
//! fill them from flags, environment, or a settings file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Port the local ADDE server listens on unless configured otherwise.
pub const DEFAULT_LOCAL_ADDE_PORT: u16 = 8112;

/// Grace period between SIGTERM and SIGKILL when stopping the server.
pub const DEFAULT_STOP_GRACE_MS: u64 = 5_000;

/// Upper bound accepted for the stop grace period.
const MAX_STOP_GRACE_MS: u64 = 60_000;

/// Manager settings.
///
/// All fields are optional to support partial configuration and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Explicit `adde` install root. Defaults to `<cwd>/adde`.
    pub adde_root: Option<PathBuf>,

    /// Port passed to `mcservl -p`.
    pub port: Option<u16>,

    /// Milliseconds to wait after SIGTERM before killing the server.
    pub stop_grace_ms: Option<u64>,
}

impl Settings {
    /// Create settings with defaults filled in.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            adde_root: None,
            port: Some(DEFAULT_LOCAL_ADDE_PORT),
            stop_grace_ms: Some(DEFAULT_STOP_GRACE_MS),
        }
    }

    /// Get the effective server port (with default fallback).
    #[must_use]
    pub const fn effective_port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None => DEFAULT_LOCAL_ADDE_PORT,
        }
    }

    /// Get the effective stop grace period (with default fallback).
    #[must_use]
    pub const fn effective_stop_grace(&self) -> Duration {
        match self.stop_grace_ms {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_millis(DEFAULT_STOP_GRACE_MS),
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Port must be between 1 and 65535, got {0}")]
    InvalidPort(u16),

    #[error("Stop grace period must be at most {MAX_STOP_GRACE_MS} ms, got {0}")]
    InvalidStopGrace(u64),
}

/// Validate settings values.
pub const fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(0) = settings.port {
        return Err(SettingsError::InvalidPort(0));
    }

    if let Some(ms) = settings.stop_grace_ms {
        if ms > MAX_STOP_GRACE_MS {
            return Err(SettingsError::InvalidStopGrace(ms));
        }
    }

    Ok(())
}
