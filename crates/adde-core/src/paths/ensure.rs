//! Directory creation helpers.

use std::fs;
use std::path::Path;

use super::error::PathError;

/// Make sure the parent directory of `path` exists, creating it if needed.
///
/// Paths without a parent (or with an empty one) are left alone.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PathError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(parent).map_err(|e| PathError::CreateFailed {
        path: parent.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_parent() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("adde").join("data").join("RESOLV.SRV");

        ensure_parent_dir(&target).unwrap();

        assert!(temp.path().join("adde").join("data").is_dir());
        assert!(!target.exists());
    }

    #[test]
    fn bare_file_name_is_a_no_op() {
        assert!(ensure_parent_dir(Path::new("RESOLV.SRV")).is_ok());
    }
}
