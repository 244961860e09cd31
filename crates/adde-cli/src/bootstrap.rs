//! CLI bootstrap - the composition root.
//!
//! The only place where the runtime supervisor is wired into the core facade.
//! Command handlers receive the composed `CliContext`.

use std::sync::Arc;

use adde_core::{AddeManager, LocalServerPort, Settings};
use adde_runtime::ServerSupervisor;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub settings: Settings,
}

impl CliConfig {
    /// Settings from global flags (and their environment fallbacks), over defaults.
    pub fn from_cli(cli: &Cli) -> Self {
        let defaults = Settings::with_defaults();
        Self {
            settings: Settings {
                adde_root: cli.adde_root.clone().or(defaults.adde_root),
                port: cli.port.or(defaults.port),
                stop_grace_ms: cli.stop_grace_ms.or(defaults.stop_grace_ms),
            },
        }
    }
}

/// Fully composed context for command handlers.
#[derive(Debug)]
pub struct CliContext {
    pub manager: AddeManager,
}

/// Resolve paths, build the supervisor, and load entries.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let settings = &config.settings;
    let manager = AddeManager::open(settings, |paths| {
        let supervisor = ServerSupervisor::from_settings(paths, settings);
        debug!(?supervisor, "server supervisor ready");
        Arc::new(supervisor) as Arc<dyn LocalServerPort>
    })?;

    Ok(CliContext { manager })
}
