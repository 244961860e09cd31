//! File-backed store for `RESOLV.SRV`.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::entry::ResolvEntry;
use super::error::ResolvError;
use crate::paths::ensure_parent_dir;

/// Reads and writes entries at one configuration path.
#[derive(Debug, Clone)]
pub struct ResolvStore {
    path: PathBuf,
}

impl ResolvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load entries in file order.
    ///
    /// A file that is missing, is not a regular file, or cannot be opened for
    /// lack of permission means "no configuration yet" and yields no entries.
    /// Other I/O failures are returned as `ResolvError::Read`.
    pub fn load(&self) -> Result<Vec<ResolvEntry>, ResolvError> {
        if !self.path.is_file() {
            debug!(path = %self.path.display(), "no configuration file, starting empty");
            return Ok(Vec::new());
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                debug!(path = %self.path.display(), "configuration file not readable, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.read_error(source)),
        };

        let entries =
            read_entries(BufReader::new(file)).map_err(|source| self.read_error(source))?;

        debug!(path = %self.path.display(), count = entries.len(), "loaded entries");
        Ok(entries)
    }

    /// Overwrite the file with every serializable entry, in slice order.
    ///
    /// Entries without a serialized form are skipped. Returns the number of
    /// lines written. The entries themselves are never modified, so a failed
    /// save leaves the caller's state exactly as it was.
    pub fn save(&self, entries: &[ResolvEntry]) -> Result<usize, ResolvError> {
        ensure_parent_dir(&self.path).map_err(|e| self.write_error(io::Error::other(e)))?;

        let file = File::create(&self.path).map_err(|source| self.write_error(source))?;
        let mut writer = BufWriter::new(file);
        let written =
            write_entries(&mut writer, entries).map_err(|source| self.write_error(source))?;
        writer
            .into_inner()
            .map_err(|e| self.write_error(e.into_error()))?
            .sync_all()
            .map_err(|source| self.write_error(source))?;

        debug!(path = %self.path.display(), written, skipped = entries.len() - written, "saved entries");
        Ok(written)
    }

    /// Whether a configuration file currently exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.is_file())
    }

    fn read_error(&self, source: io::Error) -> ResolvError {
        ResolvError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> ResolvError {
        ResolvError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Write every serializable entry, one per line, and flush.
fn write_entries(mut out: impl Write, entries: &[ResolvEntry]) -> io::Result<usize> {
    let mut written = 0;
    for line in entries.iter().filter_map(ResolvEntry::to_line) {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

/// Read entries line by line.
///
/// Lines are decoded lossily: hand-edited files are not always UTF-8, and a
/// stray byte in a comment must not make the whole file unreadable.
fn read_entries(mut reader: impl BufRead) -> io::Result<Vec<ResolvEntry>> {
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        entries.extend(parse_line(&String::from_utf8_lossy(&buf)));
    }
    Ok(entries)
}

fn parse_line(line: &str) -> Option<ResolvEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(ResolvEntry::parse(trimmed))
}

/// Parse configuration text the same way `ResolvStore::load` parses a file.
#[must_use]
pub fn parse_lines(text: &str) -> Vec<ResolvEntry> {
    text.lines().filter_map(parse_line).collect()
}

/// Each entry's group once, in first-seen order.
#[must_use]
pub fn distinct_groups(entries: &[ResolvEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(ResolvEntry::group)
        .filter(|group| seen.insert(*group))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_skips_comments_and_blanks() {
        let entries = parse_lines("# comment\n\n   \n  # indented comment\nGROUP1 entry-a\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].group(), Some("GROUP1"));
    }

    #[test]
    fn distinct_groups_first_seen_order() {
        let entries = parse_lines("B x\nA y\nB z\nC w\nA v\n");
        assert_eq!(distinct_groups(&entries), vec!["B", "A", "C"]);
    }

    #[test]
    fn distinct_groups_skips_unfilled_entries() {
        let mut entries = parse_lines("A x\n");
        entries.push(ResolvEntry::empty());
        assert_eq!(distinct_groups(&entries), vec!["A"]);
        assert!(distinct_groups(&[]).is_empty());
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempdir().unwrap();
        let store = ResolvStore::new(temp.path().join("RESOLV.SRV"));

        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn directory_path_loads_empty() {
        let temp = tempdir().unwrap();
        let store = ResolvStore::new(temp.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn non_utf8_comment_does_not_fail_load() {
        let temp = tempdir().unwrap();
        let store = ResolvStore::new(temp.path().join("RESOLV.SRV"));
        fs::write(store.path(), b"# Caf\xe9 comment\nGROUP1 entry-a\n").unwrap();

        let entries = store.load().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].group(), Some("GROUP1"));
    }

    #[test]
    fn non_utf8_value_is_decoded_lossily() {
        let temp = tempdir().unwrap();
        let store = ResolvStore::new(temp.path().join("RESOLV.SRV"));
        fs::write(store.path(), b"N1=GROUP1,N2=Caf\xe9\r\nGROUP2 entry-b").unwrap();

        let entries = store.load().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].group(), Some("GROUP1"));
        assert_eq!(entries[0].descriptor(), Some("Caf\u{FFFD}"));
        assert_eq!(entries[1].descriptor(), Some("entry-b"));
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk went away"))
        }
    }

    #[test]
    fn read_failure_is_propagated() {
        let result = read_entries(BufReader::new(FailingReader));
        assert_eq!(result.unwrap_err().to_string(), "disk went away");
    }

    #[test]
    fn save_skips_unserializable_entries() {
        let temp = tempdir().unwrap();
        let store = ResolvStore::new(temp.path().join("data").join("RESOLV.SRV"));
        let mut entries = parse_lines("GROUP1 entry-a\n");
        entries.push(ResolvEntry::empty());

        let written = store.save(&entries).unwrap();

        assert_eq!(written, 1);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "GROUP1 entry-a\n");
    }

    #[test]
    fn save_into_directory_path_fails_without_touching_entries() {
        let temp = tempdir().unwrap();
        let store = ResolvStore::new(temp.path());
        let entries = parse_lines("GROUP1 entry-a\n");
        let before = entries.clone();

        let result = store.save(&entries);

        assert!(matches!(result, Err(ResolvError::Write { .. })));
        assert_eq!(entries, before);
    }
}
