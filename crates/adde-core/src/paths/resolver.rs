//! Resolved layout of the local ADDE installation.
//!
//! Captures every path the manager needs in one struct so callers resolve
//! once and pass the result around instead of re-deriving paths.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::PathError;
use super::platform::PlatformProfile;
use crate::settings::Settings;

/// Name of the install root directory under the base directory.
pub const ADDE_DIR_NAME: &str = "adde";

/// Subdirectory holding the server binary and its shared libraries.
pub const BIN_DIR_NAME: &str = "bin";

/// Subdirectory holding served data and the configuration file.
pub const DATA_DIR_NAME: &str = "data";

/// Server binary name, without the platform executable suffix.
pub const SERVER_BINARY_NAME: &str = "mcservl";

/// Configuration file listing the served datasets.
pub const RESOLV_FILE_NAME: &str = "RESOLV.SRV";

/// All install paths, built with one platform's conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddePaths {
    /// Platform rules the paths were built with
    pub profile: PlatformProfile,
    /// `<base>/adde`
    pub adde_root: PathBuf,
    /// `<adde_root>/bin`
    pub bin_dir: PathBuf,
    /// `<adde_root>/data`
    pub data_dir: PathBuf,
    /// `<bin_dir>/mcservl[.exe]`
    pub server_binary: PathBuf,
    /// `<data_dir>/RESOLV.SRV`
    pub resolv_file: PathBuf,
}

impl AddePaths {
    /// Build paths for an explicit install root.
    #[must_use]
    pub fn for_root(adde_root: &Path, profile: &PlatformProfile) -> Self {
        let root = adde_root.to_string_lossy();
        let bin_dir = profile.join(&root, &[BIN_DIR_NAME]);
        let data_dir = profile.join(&root, &[DATA_DIR_NAME]);
        let binary = profile.executable_name(SERVER_BINARY_NAME);
        let server_binary = profile.join(&bin_dir, &[&binary]);
        let resolv_file = profile.join(&data_dir, &[RESOLV_FILE_NAME]);

        Self {
            profile: profile.clone(),
            adde_root: PathBuf::from(root.trim_end_matches(profile.separator())),
            bin_dir: PathBuf::from(bin_dir),
            data_dir: PathBuf::from(data_dir),
            server_binary: PathBuf::from(server_binary),
            resolv_file: PathBuf::from(resolv_file),
        }
    }

    /// Build paths for an install living at `<base>/adde`.
    #[must_use]
    pub fn build(base: &Path, profile: &PlatformProfile) -> Self {
        let root = profile.join(&base.to_string_lossy(), &[ADDE_DIR_NAME]);
        Self::for_root(Path::new(&root), profile)
    }

    /// Resolve paths for the current host.
    ///
    /// Resolution order for the install root:
    /// 1. `settings.adde_root` (explicit override)
    /// 2. `<current working directory>/adde`
    pub fn resolve(settings: &Settings) -> Result<Self, PathError> {
        let profile = PlatformProfile::resolve()?;
        Self::resolve_with(settings, &profile)
    }

    /// Resolve paths with an already-computed platform profile.
    pub fn resolve_with(settings: &Settings, profile: &PlatformProfile) -> Result<Self, PathError> {
        if let Some(root) = settings.adde_root.as_deref() {
            return Ok(Self::for_root(root, profile));
        }

        let cwd = env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;
        Ok(Self::build(&cwd, profile))
    }

    /// Whether the server binary is present.
    #[must_use]
    pub fn server_binary_exists(&self) -> bool {
        self.server_binary.is_file()
    }
}

impl fmt::Display for AddePaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "platform = {}", self.profile.family())?;
        writeln!(f, "adde_root = {}", self.adde_root.display())?;
        writeln!(f, "bin_dir = {}", self.bin_dir.display())?;
        writeln!(f, "data_dir = {}", self.data_dir.display())?;
        writeln!(f, "server_binary = {}", self.server_binary.display())?;
        write!(f, "resolv_file = {}", self.resolv_file.display())
    }
}
