//! `LocalServerPort` implementation for `mcservl`.
//!
//! Pure OS/process concerns only; the facade in `adde-core` decides when to
//! start and stop.

use adde_core::{
    LocalServerPort, ServerError, ServerExit, ServerOutput, ServerProcessInfo, SupervisorState,
};
use async_trait::async_trait;
use tracing::debug;

use crate::process::ServerSupervisor;

#[async_trait]
impl LocalServerPort for ServerSupervisor {
    async fn start(&self) -> Result<ServerProcessInfo, ServerError> {
        debug!(binary = %self.launch_spec().binary.display(), "start requested");
        Self::start(self).await
    }

    async fn stop(&self) -> Result<ServerExit, ServerError> {
        debug!("stop requested");
        Self::stop(self).await
    }

    async fn is_running(&self) -> bool {
        Self::is_running(self).await
    }

    async fn state(&self) -> SupervisorState {
        Self::state(self).await
    }

    async fn output(&self) -> Option<ServerOutput> {
        Self::output(self).await
    }

    async fn last_exit(&self) -> Option<ServerExit> {
        Self::last_exit(self).await
    }
}
