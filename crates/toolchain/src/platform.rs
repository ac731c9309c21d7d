//! Host platform detection and install-location defaults.
//!
//! # Example
//!
//! ```
//! use toolchain::platform;
//!
//! let platform = platform::detect();
//! println!("Running on: {}", platform);
//! ```

use crate::types::Platform;
use std::path::{Path, PathBuf};

/// Detect the current platform from the compile-time target OS.
#[must_use]
pub fn detect() -> Platform {
    Platform::from_os(std::env::consts::OS)
}

/// Default directory for installed binaries.
///
/// Prefers `~/.local/bin` (XDG-compliant, no elevated rights needed) and
/// falls back to `/usr/local/bin` when the home directory is unknown.
#[must_use]
pub fn default_install_dir() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        return home.join(".local").join("bin");
    }

    PathBuf::from("/usr/local/bin")
}

/// Check whether `dir` is one of the entries of the `PATH` variable.
#[must_use]
pub fn is_on_path(dir: &Path) -> bool {
    std::env::var_os("PATH")
        .is_some_and(|paths| std::env::split_paths(&paths).any(|p| p == dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_build_target() {
        let platform = detect();
        #[cfg(target_os = "linux")]
        assert_eq!(platform, Platform::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(platform, Platform::MacOs);
        #[cfg(windows)]
        assert_eq!(platform, Platform::Windows);
        let _ = platform;
    }

    #[test]
    fn test_default_install_dir_contains_local_bin() {
        let dir = default_install_dir();
        let path_str = dir.to_string_lossy();
        assert!(
            path_str.contains(".local/bin") || path_str.contains("local/bin"),
            "Expected path to contain 'local/bin', got: {}",
            path_str
        );
    }

    #[test]
    fn test_is_on_path_rejects_unknown_dir() {
        assert!(!is_on_path(Path::new("/definitely/not/on/path/docksetup")));
    }
}
