//! The facade a GUI (or CLI) drives.
//!
//! `AddeManager` owns the resolved install paths, the in-memory `RESOLV.SRV`
//! entries, and a handle to the local server supervisor. Entry edits stay in
//! memory until `persist` is called; server control is delegated to the
//! `LocalServerPort`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::paths::AddePaths;
use crate::ports::{
    CoreError, LocalServerPort, ServerError, ServerExit, ServerOutput, ServerProcessInfo,
};
use crate::resolv::{EntryId, ResolvEntry, ResolvError, ResolvStore, distinct_groups};
use crate::settings::{Settings, validate_settings};

/// Facade over path resolution, the entry store, and the server supervisor.
pub struct AddeManager {
    paths: AddePaths,
    store: ResolvStore,
    entries: Vec<ResolvEntry>,
    dirty: bool,
    load_warning: Option<ResolvError>,
    server: Arc<dyn LocalServerPort>,
}

impl AddeManager {
    /// Resolve paths for this host, build the server from them, and load entries.
    ///
    /// Fails only when settings are invalid or the platform cannot be
    /// determined. A configuration file that cannot be read leaves the entry
    /// list empty and is reported through `load_warning`.
    pub fn open<F>(settings: &Settings, make_server: F) -> Result<Self, CoreError>
    where
        F: FnOnce(&AddePaths) -> Arc<dyn LocalServerPort>,
    {
        validate_settings(settings)?;
        let paths = AddePaths::resolve(settings)?;
        let server = make_server(&paths);
        Ok(Self::with_paths(paths, server))
    }

    /// Build the facade from already-resolved paths.
    pub fn with_paths(paths: AddePaths, server: Arc<dyn LocalServerPort>) -> Self {
        let store = ResolvStore::new(paths.resolv_file.clone());
        let mut manager = Self {
            paths,
            store,
            entries: Vec::new(),
            dirty: false,
            load_warning: None,
            server,
        };
        manager.load_tolerant();
        manager
    }

    fn load_tolerant(&mut self) {
        let loaded = self.store.load();
        self.apply_loaded(loaded);
    }

    fn apply_loaded(&mut self, loaded: Result<Vec<ResolvEntry>, ResolvError>) {
        match loaded {
            Ok(entries) => {
                debug!(count = entries.len(), "entries loaded");
                self.entries = entries;
                self.load_warning = None;
            }
            Err(e) => {
                warn!(error = %e, "could not read configuration, starting with no entries");
                self.entries.clear();
                self.load_warning = Some(e);
            }
        }
        self.dirty = false;
    }

    #[must_use]
    pub const fn paths(&self) -> &AddePaths {
        &self.paths
    }

    /// The read failure hit while loading, if any.
    #[must_use]
    pub const fn load_warning(&self) -> Option<&ResolvError> {
        self.load_warning.as_ref()
    }

    // === Local server ===

    pub async fn start_local_server(&self) -> Result<ServerProcessInfo, ServerError> {
        let result = self.server.start().await;
        match &result {
            Ok(info) => info!(pid = ?info.pid, port = info.port, "local server started"),
            Err(e) if e.is_informational() => info!("{e}"),
            Err(e) => warn!(error = %e, "local server failed to start"),
        }
        result
    }

    pub async fn stop_local_server(&self) -> Result<ServerExit, ServerError> {
        let result = self.server.stop().await;
        match &result {
            Ok(exit) => {
                if let Some(reason) = &exit.wait_error {
                    warn!(reason = %reason, "local server stopped after a wait failure");
                } else {
                    info!(code = ?exit.code, "local server stopped");
                }
            }
            Err(e) if e.is_informational() => info!("{e}"),
            Err(e) => warn!(error = %e, "local server failed to stop"),
        }
        result
    }

    pub async fn is_local_server_running(&self) -> bool {
        self.server.is_running().await
    }

    /// Output of the live server, or of the last one.
    pub async fn server_output(&self) -> Option<ServerOutput> {
        self.server.output().await
    }

    /// Outcome of the last finished server lifecycle.
    pub async fn last_server_exit(&self) -> Option<ServerExit> {
        self.server.last_exit().await
    }

    // === Entries ===

    #[must_use]
    pub fn entries(&self) -> &[ResolvEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&ResolvEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Mutable access for editing. Marks the list as changed.
    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut ResolvEntry> {
        let entry = self.entries.iter_mut().find(|e| e.id() == id)?;
        self.dirty = true;
        Some(entry)
    }

    /// Append a new, unfilled entry and return its id.
    pub fn add_entry(&mut self) -> EntryId {
        let entry = ResolvEntry::empty();
        let id = entry.id();
        self.entries.push(entry);
        self.dirty = true;
        id
    }

    /// Append an entry parsed from a raw line.
    pub fn add_entry_line(&mut self, line: &str) -> EntryId {
        let entry = ResolvEntry::parse(line);
        let id = entry.id();
        self.entries.push(entry);
        self.dirty = true;
        id
    }

    pub fn remove_entry(&mut self, id: EntryId) -> Result<ResolvEntry, ResolvError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id() == id)
            .ok_or(ResolvError::EntryNotFound(id))?;
        self.dirty = true;
        Ok(self.entries.remove(pos))
    }

    /// Distinct groups across all entries, first-seen order.
    #[must_use]
    pub fn groups(&self) -> Vec<String> {
        distinct_groups(&self.entries)
    }

    /// Whether entries changed since the last load or persist.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write entries to `RESOLV.SRV`. The only operation that touches storage.
    ///
    /// On failure the in-memory entries and the dirty flag are left as they were.
    pub fn persist(&mut self) -> Result<usize, ResolvError> {
        let written = self.store.save(&self.entries)?;
        info!(written, path = %self.store.path().display(), "entries saved");
        self.dirty = false;
        Ok(written)
    }

    /// Discard in-memory edits and reload from disk.
    pub fn reload(&mut self) -> Option<&ResolvError> {
        self.load_tolerant();
        self.load_warning.as_ref()
    }
}

impl std::fmt::Debug for AddeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddeManager")
            .field("paths", &self.paths)
            .field("entries", &self.entries.len())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PlatformProfile;
    use crate::ports::SupervisorState;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct MockServer {
        running: Mutex<bool>,
        starts: Mutex<u32>,
    }

    #[async_trait]
    impl LocalServerPort for MockServer {
        async fn start(&self) -> Result<ServerProcessInfo, ServerError> {
            let mut running = self.running.lock().unwrap();
            if *running {
                return Err(ServerError::AlreadyRunning { pid: Some(7) });
            }
            *running = true;
            *self.starts.lock().unwrap() += 1;
            Ok(ServerProcessInfo {
                pid: Some(7),
                port: 8112,
                started_at: Utc::now(),
            })
        }

        async fn stop(&self) -> Result<ServerExit, ServerError> {
            let mut running = self.running.lock().unwrap();
            if !*running {
                return Err(ServerError::NotRunning);
            }
            *running = false;
            Ok(ServerExit {
                code: None,
                requested: true,
                wait_error: None,
                finished_at: Utc::now(),
                output: ServerOutput::default(),
            })
        }

        async fn is_running(&self) -> bool {
            *self.running.lock().unwrap()
        }

        async fn state(&self) -> SupervisorState {
            if *self.running.lock().unwrap() {
                SupervisorState::Running
            } else {
                SupervisorState::Idle
            }
        }

        async fn output(&self) -> Option<ServerOutput> {
            None
        }

        async fn last_exit(&self) -> Option<ServerExit> {
            None
        }
    }

    fn manager_in(root: &std::path::Path) -> (AddeManager, Arc<MockServer>) {
        let paths = AddePaths::for_root(root, &PlatformProfile::unix_like());
        let server = Arc::new(MockServer::default());
        let manager = AddeManager::with_paths(paths, server.clone());
        (manager, server)
    }

    #[test]
    fn read_failure_starts_empty_with_warning() {
        let temp = tempdir().unwrap();
        let (mut manager, _) = manager_in(temp.path());
        let resolv_file = manager.paths().resolv_file.clone();
        fs::create_dir_all(&manager.paths().data_dir).unwrap();
        fs::write(&resolv_file, "GROUP1 entry-a\n").unwrap();
        manager.reload();
        manager.add_entry();

        manager.apply_loaded(Err(ResolvError::Read {
            path: resolv_file,
            source: std::io::Error::other("disk went away"),
        }));

        assert!(manager.entries().is_empty());
        assert!(matches!(manager.load_warning(), Some(ResolvError::Read { .. })));
        assert!(!manager.is_dirty());

        assert!(manager.reload().is_none());
        assert_eq!(manager.groups(), vec!["GROUP1"]);
    }

    #[test]
    fn non_utf8_config_loads_without_warning() {
        let temp = tempdir().unwrap();
        let paths = AddePaths::for_root(temp.path(), &PlatformProfile::unix_like());
        fs::create_dir_all(&paths.data_dir).unwrap();
        fs::write(&paths.resolv_file, b"# Caf\xe9 comment\nGROUP1 entry-a\n").unwrap();

        let manager = AddeManager::with_paths(paths, Arc::new(MockServer::default()));

        assert!(manager.load_warning().is_none());
        assert_eq!(manager.groups(), vec!["GROUP1"]);
    }

    #[test]
    fn missing_config_starts_empty_without_warning() {
        let temp = tempdir().unwrap();
        let (manager, _) = manager_in(temp.path());

        assert!(manager.entries().is_empty());
        assert!(manager.load_warning().is_none());
        assert!(!manager.is_dirty());
    }

    #[test]
    fn add_and_remove_only_touch_memory() {
        let temp = tempdir().unwrap();
        let (mut manager, _) = manager_in(temp.path());

        let id = manager.add_entry();
        assert_eq!(manager.entries().len(), 1);
        assert!(manager.is_dirty());
        assert!(!manager.paths().resolv_file.exists());

        let removed = manager.remove_entry(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(matches!(
            manager.remove_entry(id),
            Err(ResolvError::EntryNotFound(_))
        ));
    }

    #[test]
    fn persist_writes_and_clears_dirty() {
        let temp = tempdir().unwrap();
        let (mut manager, _) = manager_in(temp.path());

        manager.add_entry_line("GROUP1 entry-a");
        let id = manager.add_entry();
        manager.entry_mut(id).unwrap().set_group("GROUP2");

        let written = manager.persist().unwrap();

        assert_eq!(written, 1, "unfinished entry is skipped");
        assert!(!manager.is_dirty());
        assert_eq!(manager.entries().len(), 2, "skipped entry stays in memory");
        let saved = fs::read_to_string(&manager.paths().resolv_file).unwrap();
        assert_eq!(saved, "GROUP1 entry-a\n");
    }

    #[test]
    fn reload_discards_edits() {
        let temp = tempdir().unwrap();
        let data = temp.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("RESOLV.SRV"), "# header\nA x\nB y\n").unwrap();
        let (mut manager, _) = manager_in(temp.path());
        assert_eq!(manager.groups(), vec!["A", "B"]);

        manager.add_entry_line("C z");
        assert!(manager.reload().is_none());

        assert_eq!(manager.entries().len(), 2);
        assert!(!manager.is_dirty());
    }

    #[tokio::test]
    async fn server_calls_are_delegated() {
        let temp = tempdir().unwrap();
        let (manager, server) = manager_in(temp.path());

        manager.start_local_server().await.unwrap();
        assert!(matches!(
            manager.start_local_server().await,
            Err(ServerError::AlreadyRunning { .. })
        ));
        assert_eq!(*server.starts.lock().unwrap(), 1);
        assert!(manager.is_local_server_running().await);

        manager.stop_local_server().await.unwrap();
        assert!(!manager.is_local_server_running().await);
        assert!(matches!(
            manager.stop_local_server().await,
            Err(ServerError::NotRunning)
        ));
    }
}
