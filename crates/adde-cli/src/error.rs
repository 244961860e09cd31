//! CLI-specific error types and mappings.
//!
//! Maps core errors to exit codes and user-facing messages.

use adde_core::{CoreError, ResolvError, ServerError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error the parser could not catch.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Reading or writing RESOLV.SRV failed.
    #[error("IO error: {0}")]
    Io(String),

    /// Settings or platform could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The local server could not be started or stopped.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to an exit code (sysexits.h). Errors outside this type exit with 1.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Process(_) => 71,  // EX_OSERR
        }
    }
}

impl From<ResolvError> for CliError {
    fn from(err: ResolvError) -> Self {
        match err {
            ResolvError::Read { .. } | ResolvError::Write { .. } => Self::Io(err.to_string()),
            ResolvError::EntryNotFound(_) | ResolvError::NotKeyValue(_) => {
                Self::Arguments(err.to_string())
            }
        }
    }
}

impl From<ServerError> for CliError {
    fn from(err: ServerError) -> Self {
        Self::Process(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Paths(e) => Self::Config(e.to_string()),
            CoreError::Settings(e) => Self::Config(e.to_string()),
            CoreError::Resolv(e) => e.into(),
            CoreError::Server(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adde_core::{PathError, SettingsError};
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
        assert_eq!(CliError::Io("x".into()).exit_code(), 74);
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
        assert_eq!(CliError::Process("x".into()).exit_code(), 71);
    }

    #[test]
    fn test_core_error_mapping() {
        let err: CliError = CoreError::Paths(PathError::PlatformUnknown).into();
        assert!(matches!(err, CliError::Config(_)));

        let err: CliError = CoreError::Settings(SettingsError::InvalidPort(0)).into();
        assert!(matches!(err, CliError::Config(_)));

        let err: CliError = CoreError::Resolv(ResolvError::Write {
            path: PathBuf::from("/ro/RESOLV.SRV"),
            source: io::Error::other("read-only"),
        })
        .into();
        assert!(matches!(err, CliError::Io(_)));

        let err: CliError = ServerError::SpawnFailed {
            path: PathBuf::from("/x/mcservl"),
            reason: "denied".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 71);
    }
}
