//! `RESOLV.SRV` entries and their on-disk store.
//!
//! The local server reads its dataset registrations from a line-oriented
//! file: one entry per line, `#` comments and blank lines ignored. Entries are
//! kept verbatim unless edited, so a load/save cycle never rewrites lines the
//! user did not touch.

mod entry;
mod error;
mod store;

pub use entry::{DESCRIPTOR_KEY, EntryBody, EntryId, GROUP_KEY, ResolvEntry};
pub use error::ResolvError;
pub use store::{ResolvStore, distinct_groups, parse_lines};
