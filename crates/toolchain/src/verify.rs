//! Optional post-install checks.
//!
//! Verification is not part of the default install flow; it runs only when
//! [`crate::InstallOptions::verify`] is set.

use crate::error::{Error, Result};
use crate::platform;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// Binaries that passed.
    pub binaries: Vec<PathBuf>,
    /// Whether the install directory is on `PATH`.
    pub dir_on_path: bool,
    /// Binaries that resolve through `PATH` to a different file.
    pub shadowed: Vec<String>,
}

/// Check that every installed binary is a regular, executable file.
///
/// Also reports whether the binaries are reachable through `PATH`.
pub fn verify_binaries(install_dir: &Path, binaries: &[PathBuf]) -> Result<Verification> {
    let mut shadowed = Vec::new();

    for path in binaries {
        check_executable(path)?;

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            match which::which(name) {
                Ok(found) if found != *path => shadowed.push(name.to_string()),
                _ => {}
            }
        }
    }

    Ok(Verification {
        binaries: binaries.to_vec(),
        dir_on_path: platform::is_on_path(install_dir),
        shadowed,
    })
}

fn check_executable(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| Error::VerificationFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if !metadata.is_file() {
        return Err(Error::VerificationFailed {
            path: path.to_path_buf(),
            message: "not a regular file".to_string(),
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::VerificationFailed {
                path: path.to_path_buf(),
                message: "file is not executable".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_verify_missing_binary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("autodock4");

        let result = verify_binaries(temp.path(), &[path]);
        assert!(matches!(result, Err(Error::VerificationFailed { .. })));
    }

    #[test]
    fn test_verify_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("autodock4");
        fs::create_dir(&path).unwrap();

        let err = verify_binaries(temp.path(), &[path]).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_verify_executable_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let good = temp.path().join("autodock4");
        let bad = temp.path().join("autogrid4");
        fs::write(&good, b"#!/bin/sh\n").unwrap();
        fs::write(&bad, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&good, fs::Permissions::from_mode(0o755)).unwrap();
        fs::set_permissions(&bad, fs::Permissions::from_mode(0o644)).unwrap();

        let report = verify_binaries(temp.path(), &[good.clone()]).unwrap();
        assert_eq!(report.binaries, vec![good]);
        assert!(!report.dir_on_path);

        let err = verify_binaries(temp.path(), &[bad]).unwrap_err();
        assert!(err.to_string().contains("not executable"));
    }
}
