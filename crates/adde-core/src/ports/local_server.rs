//! Local server port definition.
//!
//! This port defines the interface for supervising the local `mcservl`
//! process. Implementations own the whole lifecycle (spawn, output capture,
//! termination) and keep at most one process alive at a time.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Lifecycle state of the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorState {
    Idle,
    Starting,
    Running,
    Stopping,
}

impl SupervisorState {
    /// Whether a process may be alive in this state.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Starting | Self::Running)
    }
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Starting => write!(f, "starting"),
            Self::Running => write!(f, "running"),
            Self::Stopping => write!(f, "stopping"),
        }
    }
}

/// Identity of a freshly started server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerProcessInfo {
    /// OS process id, if the platform reported one.
    pub pid: Option<u32>,
    /// Port passed to `mcservl -p`.
    pub port: u16,
    /// When the process was spawned.
    pub started_at: DateTime<Utc>,
}

/// Captured standard output and standard error text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Outcome of a finished server lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerExit {
    /// Exit code; `None` when killed by a signal or when waiting failed.
    pub code: Option<i32>,
    /// Whether the exit was requested through `stop`.
    pub requested: bool,
    /// Why waiting for the process failed, if it did.
    pub wait_error: Option<String>,
    /// When the lifecycle finished.
    pub finished_at: DateTime<Utc>,
    /// Everything the process wrote.
    pub output: ServerOutput,
}

impl ServerExit {
    /// Whether the process ended on its own with status 0.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self.code, Some(0)) && self.wait_error.is_none()
    }
}

/// Errors from local server operations.
///
/// `BinaryMissing`, `AlreadyRunning` and `NotRunning` are informational: the
/// request was a no-op and nothing changed.
#[derive(Debug, Clone, Error)]
pub enum ServerError {
    /// The server executable is not at its expected path.
    #[error("{} does not exist", .0.display())]
    BinaryMissing(PathBuf),

    /// A supervised server is already alive.
    #[error("local server is already running{}", pid_suffix(*pid))]
    AlreadyRunning { pid: Option<u32> },

    /// No supervised server is alive.
    #[error("local server is not running")]
    NotRunning,

    /// The process could not be created.
    #[error("failed to start {}: {reason}", path.display())]
    SpawnFailed { path: PathBuf, reason: String },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

fn pid_suffix(pid: Option<u32>) -> String {
    pid.map(|pid| format!(" (pid {pid})")).unwrap_or_default()
}

impl ServerError {
    /// Whether this condition is a no-op notice rather than a failure.
    #[must_use]
    pub const fn is_informational(&self) -> bool {
        matches!(
            self,
            Self::BinaryMissing(_) | Self::AlreadyRunning { .. } | Self::NotRunning
        )
    }
}

/// Supervises the single local server process.
#[async_trait]
pub trait LocalServerPort: Send + Sync {
    /// Start the server unless one is already alive.
    async fn start(&self) -> Result<ServerProcessInfo, ServerError>;

    /// Terminate the server and wait until it is fully reaped.
    async fn stop(&self) -> Result<ServerExit, ServerError>;

    /// Whether a server is alive. A server that died on its own reads as idle.
    async fn is_running(&self) -> bool;

    /// Current lifecycle state.
    async fn state(&self) -> SupervisorState;

    /// Output of the live server, or of the last one if none is alive.
    async fn output(&self) -> Option<ServerOutput>;

    /// Outcome of the most recently finished lifecycle.
    async fn last_exit(&self) -> Option<ServerExit>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn informational_conditions() {
        assert!(ServerError::BinaryMissing(PathBuf::from("/x/mcservl")).is_informational());
        assert!(ServerError::AlreadyRunning { pid: Some(1) }.is_informational());
        assert!(ServerError::NotRunning.is_informational());
        assert!(!ServerError::Internal("boom".into()).is_informational());
    }

    #[test]
    fn error_messages_name_the_binary() {
        let err = ServerError::BinaryMissing(PathBuf::from("/opt/adde/bin/mcservl"));
        assert_eq!(err.to_string(), "/opt/adde/bin/mcservl does not exist");

        let err = ServerError::AlreadyRunning { pid: Some(42) };
        assert_eq!(err.to_string(), "local server is already running (pid 42)");
    }

    #[test]
    fn active_states() {
        assert!(SupervisorState::Starting.is_active());
        assert!(SupervisorState::Running.is_active());
        assert!(!SupervisorState::Idle.is_active());
        assert!(!SupervisorState::Stopping.is_active());
    }
}
