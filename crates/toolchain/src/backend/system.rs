//! Real backend: HTTP downloads, archive extraction, file moves and the
//! desktop's URL opener.

use crate::archive;
use crate::backend::Backend;
use crate::download;
use crate::error::{Error, Result};
use crate::install;
use crate::report::Reporter;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Backend that performs real side effects.
pub struct SystemBackend {
    /// HTTP agent for downloads.
    agent: ureq::Agent,
}

impl SystemBackend {
    /// Create a new system backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for SystemBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SystemBackend {
    fn download(&self, url: &str, dest: &Path, reporter: &dyn Reporter) -> Result<u64> {
        download::download_file(&self.agent, url, dest, reporter)
    }

    fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        archive::extract(archive, dest).map(|_| ())
    }

    fn install_binaries(
        &self,
        src_dir: &Path,
        dst_dir: &Path,
        binaries: &[&str],
        reporter: &dyn Reporter,
    ) -> Result<Vec<PathBuf>> {
        install::install_binaries(src_dir, dst_dir, binaries, |from, to| {
            reporter.binary_moved(from, to);
        })
    }

    fn open_url(&self, url: &str) -> Result<()> {
        let mut command = opener_command(url);
        log::debug!("opening {} with {:?}", url, command);

        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| Error::BrowserLaunch {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(windows)]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", windows)))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Silent;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_system_backend_default() {
        let _backend = SystemBackend::default();
    }

    #[test]
    fn test_extract_then_install_from_real_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("autodock_linux.tar.gz");
        {
            let file = fs::File::create(&archive).unwrap();
            let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            let mut builder = tar::Builder::new(encoder);
            for name in ["autodock4", "autogrid4"] {
                let data = b"#!/bin/sh\n";
                let mut header = tar::Header::new_gnu();
                header.set_size(data.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();
                builder.append_data(&mut header, name, &data[..]).unwrap();
            }
            builder.into_inner().unwrap().finish().unwrap();
        }

        let backend = SystemBackend::new();
        let extracted = temp.path().join("autodock_extracted");
        backend.extract(&archive, &extracted).unwrap();

        let dst = temp.path().join("bin");
        let installed = backend
            .install_binaries(&extracted, &dst, &["autodock4", "autogrid4"], &Silent)
            .unwrap();
        assert_eq!(installed.len(), 2);
        assert!(installed.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_opener_command_includes_url() {
        let command = opener_command("https://example.com/page");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args.last().map(String::as_str), Some("https://example.com/page"));
    }
}
