//! Errors for `RESOLV.SRV` handling.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::entry::EntryId;

/// Errors that can occur while reading, writing, or editing entries.
#[derive(Debug, Error)]
pub enum ResolvError {
    /// Reading an existing configuration file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the configuration file failed. Nothing in memory was changed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No entry with this id is held in memory.
    #[error("No entry with id {0}")]
    EntryNotFound(EntryId),

    /// A `KEY=VALUE` edit was applied to a positional entry.
    #[error("Entry {0} is positional and has no key=value fields")]
    NotKeyValue(EntryId),
}
