//! Core types for toolchain installation.
//!
//! This module holds the platform variants and the acquisition strategy each
//! one carries, plus the options and outcome types used by [`crate::Client`].

use crate::verify::Verification;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// AutoDock suite release installed by this crate.
pub const SUITE_VERSION: &str = "4.2.6";

/// Executables shipped in the suite archive, in install order.
pub const BINARIES: &[&str] = &["autodock4", "autogrid4"];

/// Download page for platforms without an automated install.
pub const MANUAL_DOWNLOAD_URL: &str = "https://autodock.scripps.edu/download-autodock4/";

const MACOS_ARCHIVE_URL: &str =
    "https://autodock.scripps.edu/download-autodock4/autodocksuite-4.2.6-MacOSX.tar";
const LINUX_ARCHIVE_URL: &str =
    "https://autodock.scripps.edu/download-autodock4/autodocksuite-4.2.6-Linux_x64.tar.gz";

/// Host platform, selected once at startup.
///
/// Each variant knows how the suite is acquired on it; see
/// [`Platform::strategy`].
///
/// # Example
///
/// ```
/// use toolchain::Platform;
///
/// assert_eq!(Platform::from_os("Darwin"), Platform::MacOs);
/// assert_eq!(Platform::from_os("linux"), Platform::Linux);
/// assert_eq!(Platform::from_os("Windows_NT"), Platform::Windows);
/// assert!(matches!(Platform::from_os("freebsd"), Platform::Unsupported(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple macOS.
    MacOs,
    /// Linux (x86_64 binaries).
    Linux,
    /// Any Windows-family system.
    Windows,
    /// Anything else, carrying the raw OS identifier.
    Unsupported(String),
}

impl Platform {
    /// Map an OS identifier to a platform.
    ///
    /// Accepts both Rust's `std::env::consts::OS` values and `uname`-style
    /// names. Matching is case-insensitive.
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        let lower = os.trim().to_lowercase();
        match lower.as_str() {
            "macos" | "darwin" | "osx" => Self::MacOs,
            "linux" => Self::Linux,
            s if s.starts_with("windows") => Self::Windows,
            _ => Self::Unsupported(os.trim().to_string()),
        }
    }

    /// How the suite is acquired on this platform.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::MacOs => Strategy::Archive(ArchiveSource {
                url: MACOS_ARCHIVE_URL,
                file_name: "autodock_mac.tar",
                binary_subdir: Some("MacOSX"),
                binaries: BINARIES,
            }),
            Self::Linux => Strategy::Archive(ArchiveSource {
                url: LINUX_ARCHIVE_URL,
                file_name: "autodock_linux.tar.gz",
                binary_subdir: None,
                binaries: BINARIES,
            }),
            Self::Windows => Strategy::Manual {
                url: MANUAL_DOWNLOAD_URL,
            },
            Self::Unsupported(_) => Strategy::Unsupported,
        }
    }

    /// Check if this platform is Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macOS"),
            Self::Linux => write!(f, "Linux"),
            Self::Windows => write!(f, "Windows"),
            Self::Unsupported(os) => write!(f, "{}", os),
        }
    }
}

/// Where a prebuilt archive lives and how it is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchiveSource {
    /// Download URL.
    pub url: &'static str,
    /// File name the archive is saved under. Its suffix selects the extractor.
    pub file_name: &'static str,
    /// Directory inside the extraction root holding the binaries, if any.
    pub binary_subdir: Option<&'static str>,
    /// Binaries to install, in order.
    pub binaries: &'static [&'static str],
}

/// Acquisition strategy for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Strategy {
    /// Download an archive, extract it and install its binaries.
    Archive(ArchiveSource),
    /// No automated install; point the user at a download page.
    Manual {
        /// Page to open.
        url: &'static str,
    },
    /// Automatic installation is not offered.
    Unsupported,
}

/// Options for installing the toolchain.
///
/// # Example
///
/// ```
/// use toolchain::InstallOptions;
///
/// let options = InstallOptions::new()
///     .install_dir("/opt/autodock/bin")
///     .keep_temp(true);
/// assert!(options.keep_temp);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Destination directory. Uses [`crate::platform::default_install_dir`] if `None`.
    pub install_dir: Option<PathBuf>,
    /// Keep the temporary download directory instead of removing it.
    pub keep_temp: bool,
    /// Verify installed binaries afterwards.
    pub verify: bool,
}

impl InstallOptions {
    /// Create new install options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the install directory.
    #[must_use]
    pub fn install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }

    /// Keep the temporary directory after installation.
    #[must_use]
    pub fn keep_temp(mut self, keep: bool) -> Self {
        self.keep_temp = keep;
        self
    }

    /// Verify installed binaries.
    #[must_use]
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// Result of a toolchain installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InstallOutcome {
    /// Binaries were placed into the install directory.
    Installed {
        /// Installed binary paths, in install order.
        binaries: Vec<PathBuf>,
        /// Directory the binaries were installed into.
        install_dir: PathBuf,
        /// Temporary directory left on disk, when requested.
        kept_temp: Option<PathBuf>,
        /// Post-install check results, when requested.
        verification: Option<Verification>,
    },
    /// The user has to install manually.
    Manual {
        /// Download page.
        url: String,
        /// Whether the default browser was launched.
        browser_opened: bool,
    },
    /// Automatic installation is not offered on this OS.
    Unsupported {
        /// Raw OS identifier.
        os: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_rust_os_names() {
        assert_eq!(Platform::from_os("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
    }

    #[test]
    fn test_platform_from_uname_names() {
        assert_eq!(Platform::from_os("Darwin"), Platform::MacOs);
        assert_eq!(Platform::from_os("Linux"), Platform::Linux);
        assert_eq!(Platform::from_os("Windows"), Platform::Windows);
        assert_eq!(Platform::from_os("Windows_NT"), Platform::Windows);
    }

    #[test]
    fn test_platform_unsupported_keeps_name() {
        assert_eq!(
            Platform::from_os("FreeBSD"),
            Platform::Unsupported("FreeBSD".to_string())
        );
        assert_eq!(Platform::from_os("FreeBSD").to_string(), "FreeBSD");
    }

    #[test]
    fn test_macos_strategy() {
        match Platform::MacOs.strategy() {
            Strategy::Archive(src) => {
                assert!(src.url.ends_with("autodocksuite-4.2.6-MacOSX.tar"));
                assert_eq!(src.file_name, "autodock_mac.tar");
                assert_eq!(src.binary_subdir, Some("MacOSX"));
                assert_eq!(src.binaries, &["autodock4", "autogrid4"]);
            }
            other => panic!("Expected archive strategy, got {:?}", other),
        }
    }

    #[test]
    fn test_linux_strategy() {
        match Platform::Linux.strategy() {
            Strategy::Archive(src) => {
                assert!(src.url.ends_with("autodocksuite-4.2.6-Linux_x64.tar.gz"));
                assert_eq!(src.file_name, "autodock_linux.tar.gz");
                assert_eq!(src.binary_subdir, None);
            }
            other => panic!("Expected archive strategy, got {:?}", other),
        }
    }

    #[test]
    fn test_windows_and_unsupported_strategies() {
        assert_eq!(
            Platform::Windows.strategy(),
            Strategy::Manual {
                url: MANUAL_DOWNLOAD_URL
            }
        );
        assert_eq!(
            Platform::Unsupported("plan9".to_string()).strategy(),
            Strategy::Unsupported
        );
    }

    #[test]
    fn test_install_options_builder() {
        let options = InstallOptions::new()
            .install_dir("/opt/bin")
            .keep_temp(true)
            .verify(true);
        assert_eq!(options.install_dir, Some(PathBuf::from("/opt/bin")));
        assert!(options.keep_temp);
        assert!(options.verify);

        let defaults = InstallOptions::default();
        assert!(defaults.install_dir.is_none());
        assert!(!defaults.keep_temp);
    }

    #[test]
    fn test_strategy_serializes_with_kind() {
        let json = serde_json::to_value(Platform::Windows.strategy()).unwrap();
        assert_eq!(json["kind"], "manual");
        assert_eq!(json["url"], MANUAL_DOWNLOAD_URL);
    }
}
