//! Add command handler.

use adde_core::ResolvEntry;
use adde_core::resolv::{DESCRIPTOR_KEY, GROUP_KEY};
use anyhow::Result;

use super::ensure_safe_to_save;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Add one entry from `KEY=VALUE` fields or a raw line, then save.
///
/// An entry that would have no serialized form is rejected before anything
/// is written.
pub fn execute(ctx: &mut CliContext, fields: &[String], line: Option<&str>) -> Result<()> {
    let manager = &mut ctx.manager;
    ensure_safe_to_save(manager.load_warning())?;

    let id = match line {
        Some(line) => {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return Err(CliError::Arguments("line is blank or a comment".to_string()).into());
            }
            manager.add_entry_line(trimmed)
        }
        None => {
            let pairs = parse_fields(fields)?;
            let id = manager.add_entry();
            if let Some(entry) = manager.entry_mut(id) {
                for (key, value) in &pairs {
                    entry.set_field(key, value).map_err(CliError::from)?;
                }
            }
            id
        }
    };

    let Some(saved_line) = manager.entry(id).and_then(ResolvEntry::to_line) else {
        manager.remove_entry(id).map_err(CliError::from)?;
        return Err(CliError::Arguments(format!(
            "entry needs non-empty {GROUP_KEY} and {DESCRIPTOR_KEY} fields"
        ))
        .into());
    };

    let written = manager.persist().map_err(CliError::from)?;
    println!("Added: {saved_line}");
    println!(
        "Saved {written} entries to {}",
        manager.paths().resolv_file.display()
    );
    Ok(())
}

/// Split `KEY=VALUE` arguments. Values may themselves contain `=`.
pub fn parse_fields(fields: &[String]) -> Result<Vec<(String, String)>, CliError> {
    fields
        .iter()
        .map(|field| {
            field
                .split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| CliError::Arguments(format!("expected KEY=VALUE, got '{field}'")))
        })
        .collect()
}
