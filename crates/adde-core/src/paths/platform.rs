//! Platform detection.
//!
//! The host is identified by its operating system name. Only two families
//! matter for the local server: Windows, and everything Unix-like. The family
//! decides how install paths are joined, whether the server binary carries an
//! `.exe` suffix, and which dynamic-library search variable the child needs.

use std::env;
use std::fmt;

use serde::Serialize;

use super::error::PathError;

/// Environment variable that overrides the detected operating system name.
pub const OS_NAME_ENV: &str = "ADDE_OS_NAME";

/// Prefix matched against the operating system name to detect Windows.
const WINDOWS_ID: &str = "Windows";

/// Operating system family relevant to path construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFamily {
    Windows,
    UnixLike,
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::UnixLike => write!(f, "unix-like"),
        }
    }
}

/// Immutable path-construction rules for one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformProfile {
    family: PlatformFamily,
    separator: char,
    exe_suffix: &'static str,
    library_path_var: Option<&'static str>,
}

impl PlatformProfile {
    /// Profile for Windows hosts.
    #[must_use]
    pub const fn windows() -> Self {
        Self {
            family: PlatformFamily::Windows,
            separator: '\\',
            exe_suffix: ".exe",
            library_path_var: None,
        }
    }

    /// Profile for Unix-like hosts (Linux, macOS, BSDs).
    #[must_use]
    pub const fn unix_like() -> Self {
        Self {
            family: PlatformFamily::UnixLike,
            separator: '/',
            exe_suffix: "",
            library_path_var: Some("LD_LIBRARY_PATH"),
        }
    }

    /// Build a profile from an operating system name.
    ///
    /// A missing or blank name is `PathError::PlatformUnknown`. Names starting
    /// with `Windows` (as reported by JVM-style `os.name`) or equal to
    /// `windows` in any case (as reported by Rust) select Windows; everything
    /// else is treated as Unix-like.
    pub fn from_os_name(os_name: Option<&str>) -> Result<Self, PathError> {
        let name = os_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(PathError::PlatformUnknown)?;

        if name.starts_with(WINDOWS_ID) || name.eq_ignore_ascii_case("windows") {
            Ok(Self::windows())
        } else {
            Ok(Self::unix_like())
        }
    }

    /// Resolve the profile for the current host.
    ///
    /// Reads `ADDE_OS_NAME` if set, otherwise the compile-time target OS.
    pub fn resolve() -> Result<Self, PathError> {
        let override_name = env::var(OS_NAME_ENV).ok();
        let os_name = override_name.as_deref().unwrap_or(env::consts::OS);
        Self::from_os_name(Some(os_name))
    }

    #[must_use]
    pub const fn family(&self) -> PlatformFamily {
        self.family
    }

    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self.family, PlatformFamily::Windows)
    }

    /// Directory separator used when joining install paths.
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Suffix appended to executable names (`.exe` or empty).
    #[must_use]
    pub const fn exe_suffix(&self) -> &'static str {
        self.exe_suffix
    }

    /// Dynamic-library search variable the server needs, if any.
    #[must_use]
    pub const fn library_path_var(&self) -> Option<&'static str> {
        self.library_path_var
    }

    /// Append an executable suffix to a bare program name.
    #[must_use]
    pub fn executable_name(&self, program: &str) -> String {
        format!("{program}{}", self.exe_suffix)
    }

    /// Join path segments with this profile's separator.
    ///
    /// A trailing separator on `base` is not doubled.
    #[must_use]
    pub fn join(&self, base: &str, segments: &[&str]) -> String {
        let mut joined = base.trim_end_matches(self.separator).to_string();
        for segment in segments {
            joined.push(self.separator);
            joined.push_str(segment);
        }
        joined
    }
}
