//! Command handlers that delegate to `AddeManager`.
//!
//! Handlers are thin wrappers that:
//! 1. Validate CLI-specific input
//! 2. Call facade methods
//! 3. Format output for the terminal

pub mod add;
pub mod groups;
pub mod list;
pub mod paths;
pub mod remove;
pub mod serve;

use adde_core::ResolvError;

use crate::error::CliError;

/// Refuse to save over a configuration file that failed to load.
///
/// Takes the facade's `load_warning()`.
pub(crate) fn ensure_safe_to_save(load_warning: Option<&ResolvError>) -> Result<(), CliError> {
    match load_warning {
        Some(warning) => Err(CliError::Io(format!(
            "refusing to overwrite a configuration that could not be read: {warning}"
        ))),
        None => Ok(()),
    }
}
