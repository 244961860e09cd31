//! Command line and environment for `mcservl`.
//!
//! The server is started with a cleared environment: only the search paths it
//! needs are set, all pointing into the install's `bin` / `data` directories.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use adde_core::AddePaths;
use tokio::process::{Child, Command};

/// Search-path variable `mcservl` reads to locate `RESOLV.SRV` and data.
pub const SERVER_PATH_VAR: &str = "MCPATH";

/// Everything needed to launch one `mcservl` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Path to the server executable
    pub binary: PathBuf,
    /// Directory put on `PATH` and the library search path
    pub bin_dir: PathBuf,
    /// Directory put on `MCPATH`
    pub data_dir: PathBuf,
    /// Port passed with `-p`
    pub port: u16,
    /// Dynamic-library search variable for this platform, if any
    pub library_path_var: Option<&'static str>,
}

impl LaunchSpec {
    pub fn from_paths(paths: &AddePaths, port: u16) -> Self {
        Self {
            binary: paths.server_binary.clone(),
            bin_dir: paths.bin_dir.clone(),
            data_dir: paths.data_dir.clone(),
            port,
            library_path_var: paths.profile.library_path_var(),
        }
    }

    /// Arguments after the program name.
    pub fn args(&self) -> Vec<String> {
        vec!["-p".to_string(), self.port.to_string()]
    }

    /// The complete child environment.
    pub fn envs(&self) -> Vec<(&'static str, OsString)> {
        let mut envs = vec![
            ("PATH", self.bin_dir.clone().into_os_string()),
            (SERVER_PATH_VAR, self.data_dir.clone().into_os_string()),
        ];
        if let Some(var) = self.library_path_var {
            envs.push((var, self.bin_dir.clone().into_os_string()));
        }
        envs
    }

    /// Whether the executable is present.
    pub fn binary_exists(&self) -> bool {
        self.binary.is_file()
    }

    /// Build the command: cleared environment, null stdin, piped stdout/stderr.
    ///
    /// `kill_on_drop` makes sure a dropped handle never leaks a server.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args())
            .env_clear()
            .envs(self.envs())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    pub fn spawn(&self) -> std::io::Result<Child> {
        self.command().spawn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adde_core::PlatformProfile;
    use std::path::Path;

    #[test]
    fn unix_spec_sets_library_path() {
        let paths = AddePaths::for_root(Path::new("/opt/adde"), &PlatformProfile::unix_like());
        let spec = LaunchSpec::from_paths(&paths, 8112);

        assert_eq!(spec.binary, PathBuf::from("/opt/adde/bin/mcservl"));
        assert_eq!(spec.args(), vec!["-p", "8112"]);
        assert_eq!(
            spec.envs(),
            vec![
                ("PATH", OsString::from("/opt/adde/bin")),
                ("MCPATH", OsString::from("/opt/adde/data")),
                ("LD_LIBRARY_PATH", OsString::from("/opt/adde/bin")),
            ]
        );
    }

    #[test]
    fn windows_spec_has_no_library_path() {
        let paths = AddePaths::for_root(Path::new("C:\\adde"), &PlatformProfile::windows());
        let spec = LaunchSpec::from_paths(&paths, 9000);

        assert_eq!(spec.binary.to_string_lossy(), "C:\\adde\\bin\\mcservl.exe");
        assert_eq!(spec.envs().len(), 2);
        assert!(spec.envs().iter().all(|(k, _)| *k != "LD_LIBRARY_PATH"));
    }

    #[test]
    fn missing_binary_is_detected() {
        let paths = AddePaths::for_root(
            Path::new("/definitely/not/here/adde"),
            &PlatformProfile::unix_like(),
        );
        assert!(!LaunchSpec::from_paths(&paths, 8112).binary_exists());
    }
}
