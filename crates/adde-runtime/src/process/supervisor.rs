//! Supervisor for the local `mcservl` lifecycle.
//!
//! The supervisor owns the server state internally behind a
//! `tokio::sync::Mutex`. Callers invoke `start` / `stop` / `is_running`
//! without holding handles themselves.
//!
//! Key design decisions:
//! - **Single instance**: at most one child exists; a second `start` is `AlreadyRunning`
//! - **Drains before wait**: both stream drains are spawned right after the
//!   child is created and before the supervisory task starts waiting
//! - **Drains before finish**: the supervisory task joins both drains before
//!   producing the exit, so a finished task means all output was captured. A
//!   drain still open one grace period after the child is reaped is aborted
//! - **Lazy reaping**: a server that exited on its own is noticed on the next
//!   call and the supervisor returns to `Idle`
//! - **Synchronous stop**: `stop` returns only once the child is reaped

use std::fmt;
use std::time::Duration;

use adde_core::{
    AddePaths, ServerError, ServerExit, ServerOutput, ServerProcessInfo, Settings, SupervisorState,
};
use chrono::Utc;
use tokio::process::Child;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::launch::LaunchSpec;
use super::output::OutputBuffers;
use super::shutdown::shutdown_child;
use super::stream::{StreamKind, spawn_stream_drain};

/// Handle to the running server. Owned exclusively by the supervisor.
struct ServerHandle {
    info: ServerProcessInfo,
    output: OutputBuffers,
    /// Cancels the supervisory wait and triggers termination.
    cancel_token: CancellationToken,
    /// Supervisory task; finishes once the child is reaped and drained.
    join_handle: JoinHandle<ServerExit>,
}

struct Inner {
    state: SupervisorState,
    handle: Option<ServerHandle>,
    last_exit: Option<ServerExit>,
}

/// Supervises at most one local server process.
///
/// # Example
///
/// ```ignore
/// let supervisor = ServerSupervisor::new(LaunchSpec::from_paths(&paths, 8112), grace);
/// let info = supervisor.start().await?;
/// assert!(supervisor.is_running().await);
/// let exit = supervisor.stop().await?;
/// ```
pub struct ServerSupervisor {
    launch: LaunchSpec,
    stop_grace: Duration,
    inner: Mutex<Inner>,
}

impl ServerSupervisor {
    #[must_use]
    pub fn new(launch: LaunchSpec, stop_grace: Duration) -> Self {
        Self {
            launch,
            stop_grace,
            inner: Mutex::new(Inner {
                state: SupervisorState::Idle,
                handle: None,
                last_exit: None,
            }),
        }
    }

    /// Build a supervisor for the resolved install, using port and grace from settings.
    #[must_use]
    pub fn from_settings(paths: &AddePaths, settings: &Settings) -> Self {
        Self::new(
            LaunchSpec::from_paths(paths, settings.effective_port()),
            settings.effective_stop_grace(),
        )
    }

    #[must_use]
    pub const fn launch_spec(&self) -> &LaunchSpec {
        &self.launch
    }

    /// Start the server.
    ///
    /// # Errors
    ///
    /// - `AlreadyRunning` if a server is alive (nothing is spawned)
    /// - `BinaryMissing` if the executable is absent (state stays `Idle`)
    /// - `SpawnFailed` if the OS refused to create the process
    pub async fn start(&self) -> Result<ServerProcessInfo, ServerError> {
        let mut inner = self.inner.lock().await;
        reap_finished(&mut inner).await;

        if let Some(handle) = &inner.handle {
            return Err(ServerError::AlreadyRunning {
                pid: handle.info.pid,
            });
        }

        if !self.launch.binary_exists() {
            debug!(path = %self.launch.binary.display(), "server binary missing");
            return Err(ServerError::BinaryMissing(self.launch.binary.clone()));
        }

        inner.state = SupervisorState::Starting;
        let mut child = match self.launch.spawn() {
            Ok(child) => child,
            Err(e) => {
                inner.state = SupervisorState::Idle;
                return Err(ServerError::SpawnFailed {
                    path: self.launch.binary.clone(),
                    reason: e.to_string(),
                });
            }
        };

        let info = ServerProcessInfo {
            pid: child.id(),
            port: self.launch.port,
            started_at: Utc::now(),
        };

        // Drains first, so nothing written before the wait begins is lost
        let output = OutputBuffers::new();
        let mut drains = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            let drain = spawn_stream_drain(stdout, output.stdout.clone(), StreamKind::Stdout);
            drains.push((StreamKind::Stdout, drain));
        }
        if let Some(stderr) = child.stderr.take() {
            let drain = spawn_stream_drain(stderr, output.stderr.clone(), StreamKind::Stderr);
            drains.push((StreamKind::Stderr, drain));
        }

        let cancel_token = CancellationToken::new();
        let join_handle = tokio::spawn(supervise(
            child,
            drains,
            cancel_token.clone(),
            self.stop_grace,
            output.clone(),
        ));

        info!(pid = ?info.pid, port = info.port, binary = %self.launch.binary.display(), "local server spawned");

        inner.handle = Some(ServerHandle {
            info: info.clone(),
            output,
            cancel_token,
            join_handle,
        });
        inner.state = SupervisorState::Running;

        Ok(info)
    }

    /// Stop the server and wait until it is reaped and fully drained.
    ///
    /// # Errors
    ///
    /// - `NotRunning` if no server is alive, including one that already
    ///   exited on its own
    /// - `Internal` if the supervisory task died; the supervisor is still
    ///   left `Idle` with the synthesized exit recorded
    pub async fn stop(&self) -> Result<ServerExit, ServerError> {
        let mut inner = self.inner.lock().await;
        reap_finished(&mut inner).await;

        let Some(handle) = inner.handle.take() else {
            return Err(ServerError::NotRunning);
        };

        inner.state = SupervisorState::Stopping;
        info!(pid = ?handle.info.pid, "stopping local server");

        handle.cancel_token.cancel();
        let (exit, task_failure) = collect_exit(handle).await;

        inner.state = SupervisorState::Idle;
        inner.last_exit = Some(exit.clone());

        match task_failure {
            Some(err) => Err(err),
            None => Ok(exit),
        }
    }

    /// Whether a server is alive. Never fails; a dead server reads as idle.
    pub async fn is_running(&self) -> bool {
        let mut inner = self.inner.lock().await;
        reap_finished(&mut inner).await;
        inner.state.is_active() && inner.handle.is_some()
    }

    pub async fn state(&self) -> SupervisorState {
        let mut inner = self.inner.lock().await;
        reap_finished(&mut inner).await;
        inner.state
    }

    /// Output of the live server, or of the last finished one.
    pub async fn output(&self) -> Option<ServerOutput> {
        let inner = self.inner.lock().await;
        match &inner.handle {
            Some(handle) => Some(handle.output.snapshot()),
            None => inner.last_exit.as_ref().map(|exit| exit.output.clone()),
        }
    }

    pub async fn last_exit(&self) -> Option<ServerExit> {
        let mut inner = self.inner.lock().await;
        reap_finished(&mut inner).await;
        inner.last_exit.clone()
    }
}

/// If the supervisory task has finished, collect its exit and go idle.
async fn reap_finished(inner: &mut Inner) {
    let finished = inner
        .handle
        .as_ref()
        .is_some_and(|handle| handle.join_handle.is_finished());
    if !finished {
        return;
    }

    if let Some(handle) = inner.handle.take() {
        // A failed task is already logged and recorded in `wait_error`
        let (exit, _) = collect_exit(handle).await;
        debug!(code = ?exit.code, "local server exited on its own");
        inner.last_exit = Some(exit);
        inner.state = SupervisorState::Idle;
    }
}

/// Join the supervisory task.
///
/// When the task panicked or was cancelled the exit is synthesized from the
/// captured output, and the failure comes back as `ServerError::Internal`.
async fn collect_exit(handle: ServerHandle) -> (ServerExit, Option<ServerError>) {
    let ServerHandle {
        output,
        cancel_token,
        join_handle,
        ..
    } = handle;

    match join_handle.await {
        Ok(exit) => (exit, None),
        Err(e) => {
            warn!(error = %e, "supervisory task failed");
            let reason = format!("supervisory task failed: {e}");
            let exit = ServerExit {
                code: None,
                requested: cancel_token.is_cancelled(),
                wait_error: Some(reason.clone()),
                finished_at: Utc::now(),
                output: output.snapshot(),
            };
            (exit, Some(ServerError::Internal(reason)))
        }
    }
}

/// Supervisory task: wait for exit (or cancellation), then join both drains.
async fn supervise(
    mut child: Child,
    drains: Vec<(StreamKind, JoinHandle<()>)>,
    cancel_token: CancellationToken,
    grace: Duration,
    output: OutputBuffers,
) -> ServerExit {
    let pid = child.id();

    let exited = tokio::select! {
        status = child.wait() => Some(status),
        () = cancel_token.cancelled() => None,
    };

    let waited = match exited {
        Some(status) => status,
        None => {
            debug!(?pid, "stop requested, terminating local server");
            shutdown_child(&mut child, grace).await
        }
    };

    if waited.is_err() {
        // The child may still hold its pipes open; make sure the drains can end
        let _ = child.start_kill();
    }

    join_drains(drains, &output, grace).await;

    let requested = cancel_token.is_cancelled();
    match waited {
        Ok(status) => {
            debug!(?pid, %status, requested, "local server exited");
            ServerExit {
                code: status.code(),
                requested,
                wait_error: None,
                finished_at: Utc::now(),
                output: output.snapshot(),
            }
        }
        Err(e) => {
            warn!(?pid, error = %e, "failed waiting for local server exit");
            ServerExit {
                code: None,
                requested,
                wait_error: Some(e.to_string()),
                finished_at: Utc::now(),
                output: output.snapshot(),
            }
        }
    }
}

/// Marker appended when a stream was still open after the server was reaped.
pub(crate) const DRAIN_ABORTED_MARKER: &str =
    "\n[output truncated: stream still held open after the server exited]\n";

/// Join both drains, giving them at most `grace` once the child is reaped.
///
/// A descendant that inherited stdout/stderr keeps the pipe open after the
/// server itself is gone; such a drain is aborted and its buffer marked.
async fn join_drains(
    drains: Vec<(StreamKind, JoinHandle<()>)>,
    output: &OutputBuffers,
    grace: Duration,
) {
    let deadline = tokio::time::Instant::now() + grace;

    for (kind, mut drain) in drains {
        match tokio::time::timeout_at(deadline, &mut drain).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(stream = kind.as_str(), error = %e, "stream drain task failed"),
            Err(_) => {
                warn!(stream = kind.as_str(), "stream still open after server exit; aborting drain");
                drain.abort();
                // Wait for the cancellation so nothing lands after the marker
                let _ = drain.await;
                let buffer = match kind {
                    StreamKind::Stdout => &output.stdout,
                    StreamKind::Stderr => &output.stderr,
                };
                buffer.append(DRAIN_ABORTED_MARKER);
            }
        }
    }
}

impl Drop for ServerSupervisor {
    fn drop(&mut self) {
        // The supervisory task terminates and reaps the child once cancelled
        if let Some(handle) = &self.inner.get_mut().handle {
            handle.cancel_token.cancel();
        }
    }
}

impl fmt::Debug for ServerSupervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSupervisor")
            .field("launch", &self.launch)
            .field("stop_grace", &self.stop_grace)
            .finish_non_exhaustive()
    }
}
