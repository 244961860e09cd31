//! Terminating the server child: SIGTERM, a grace period, then SIGKILL.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{Signal, kill};
#[cfg(unix)]
use nix::unistd::Pid;
#[cfg(unix)]
use tracing::debug;

/// Terminate `child` and reap it.
///
/// On Unix the child gets SIGTERM and up to `grace` to exit before it is
/// killed. Windows has no polite termination, so the child is killed at once
/// and `grace` is ignored. Either way the returned status belongs to a reaped
/// process.
pub async fn shutdown_child(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    #[cfg(unix)]
    {
        terminate_then_kill(child, grace).await
    }

    #[cfg(not(unix))]
    {
        let _ = grace;
        kill_now(child).await
    }
}

#[cfg(unix)]
async fn terminate_then_kill(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    // tokio clears the id once the child has been reaped
    let Some(raw_pid) = child.id() else {
        return child.wait().await;
    };
    let pid = Pid::from_raw(i32::try_from(raw_pid).map_err(io::Error::other)?);

    match kill(pid, Signal::SIGTERM) {
        Ok(()) => {}
        Err(Errno::ESRCH) => return child.wait().await,
        Err(e) => return Err(io::Error::other(e)),
    }

    if let Ok(status) = tokio::time::timeout(grace, child.wait()).await {
        return status;
    }

    debug!(pid = raw_pid, grace_ms = grace.as_millis(), "server ignored SIGTERM, sending SIGKILL");
    child.kill().await?;
    child.wait().await
}

#[cfg(not(unix))]
async fn kill_now(child: &mut Child) -> io::Result<ExitStatus> {
    child.kill().await?;
    child.wait().await
}
