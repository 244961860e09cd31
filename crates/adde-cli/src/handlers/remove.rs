//! Remove command handler.

use adde_core::ResolvEntry;
use anyhow::Result;

use super::ensure_safe_to_save;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Remove the entry at `index` (as shown by `list`), then save.
pub fn execute(ctx: &mut CliContext, index: usize) -> Result<()> {
    let manager = &mut ctx.manager;
    ensure_safe_to_save(manager.load_warning())?;

    let Some(id) = manager.entries().get(index).map(ResolvEntry::id) else {
        return Err(CliError::Arguments(format!(
            "no entry at index {index} ({} entries)",
            manager.entries().len()
        ))
        .into());
    };

    let removed = manager.remove_entry(id).map_err(CliError::from)?;
    let written = manager.persist().map_err(CliError::from)?;

    println!(
        "Removed: {}",
        removed
            .to_line()
            .unwrap_or_else(|| "(incomplete entry)".to_string())
    );
    println!(
        "Saved {written} entries to {}",
        manager.paths().resolv_file.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use adde_core::Settings;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_remove_by_index() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("adde");
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(
            root.join("data").join("RESOLV.SRV"),
            "# header\nGROUP1 entry-a\nGROUP2 entry-b\nGROUP1 entry-c\n",
        )
        .unwrap();
        let config = CliConfig {
            settings: Settings {
                adde_root: Some(root.clone()),
                ..Settings::default()
            },
        };
        let mut ctx = bootstrap(&config).unwrap();

        execute(&mut ctx, 1).unwrap();

        let saved = fs::read_to_string(root.join("data").join("RESOLV.SRV")).unwrap();
        assert_eq!(saved, "GROUP1 entry-a\nGROUP1 entry-c\n");
        assert_eq!(ctx.manager.groups(), vec!["GROUP1"]);

        let err = execute(&mut ctx, 5).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Arguments(_))
        ));
    }
}
