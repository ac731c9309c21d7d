//! # toolchain
//!
//! Pure Rust library for installing the AutoDock suite (`autodock4` and
//! `autogrid4`).
//!
//! This crate provides functionality for:
//! - Platform detection and a per-platform acquisition strategy
//! - Downloading the prebuilt suite archive
//! - Extracting zip and tar-family archives
//! - Placing the executables into a binary directory
//!
//! ## Example
//!
//! ```no_run
//! use toolchain::{Client, InstallOptions, InstallOutcome, Silent, platform};
//!
//! let client = Client::new();
//! let platform = platform::detect();
//!
//! let outcome = client
//!     .install(&platform, &InstallOptions::new().install_dir("/opt/autodock/bin"), &Silent)
//!     .expect("installation failed");
//!
//! if let InstallOutcome::Installed { binaries, .. } = outcome {
//!     for path in binaries {
//!         println!("Installed {}", path.display());
//!     }
//! }
//! ```
//!
//! ## Supported Platforms
//!
//! | Platform | Strategy                                      |
//! |----------|-----------------------------------------------|
//! | macOS    | `autodocksuite-4.2.6-MacOSX.tar`, `MacOSX/`   |
//! | Linux    | `autodocksuite-4.2.6-Linux_x64.tar.gz`        |
//! | Windows  | manual download page                          |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod backend;
pub mod download;
pub mod error;
pub mod install;
pub mod platform;
pub mod report;
pub mod types;
pub mod verify;

pub use error::{Error, ErrorCategory, Result};
pub use report::{Reporter, Silent};
pub use types::{
    ArchiveSource, BINARIES, InstallOptions, InstallOutcome, MANUAL_DOWNLOAD_URL, Platform,
    SUITE_VERSION, Strategy,
};

use backend::Backend;
pub use backend::MockBackend;
use backend::system::SystemBackend;
use std::path::Path;

/// Name of the directory archives are extracted into, inside the temp dir.
const EXTRACT_DIR: &str = "autodock_extracted";

/// High-level client for toolchain installation.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Create a new Client with the system backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: Box::new(SystemBackend::new()),
        }
    }

    /// Create a client with a custom backend (useful for testing).
    #[must_use]
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Install the suite for `platform`.
    ///
    /// Archive platforms download, extract and install into
    /// `options.install_dir` (or [`platform::default_install_dir`]). The
    /// temp directory is removed on every exit path unless
    /// `options.keep_temp` is set.
    ///
    /// Windows only opens the manual download page; a browser that fails to
    /// launch is not an error.
    ///
    /// # Errors
    ///
    /// Download, extraction and install errors are returned unchanged.
    pub fn install(
        &self,
        platform: &Platform,
        options: &InstallOptions,
        reporter: &dyn Reporter,
    ) -> Result<InstallOutcome> {
        match platform.strategy() {
            Strategy::Archive(source) => self.install_archive(&source, options, reporter),
            Strategy::Manual { url } => {
                reporter.manual_install(url);
                let browser_opened = match self.backend.open_url(url) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("{}", e);
                        false
                    }
                };
                Ok(InstallOutcome::Manual {
                    url: url.to_string(),
                    browser_opened,
                })
            }
            Strategy::Unsupported => {
                let os = platform.to_string();
                reporter.unsupported(&os);
                Ok(InstallOutcome::Unsupported { os })
            }
        }
    }

    fn install_archive(
        &self,
        source: &ArchiveSource,
        options: &InstallOptions,
        reporter: &dyn Reporter,
    ) -> Result<InstallOutcome> {
        let install_dir = options
            .install_dir
            .clone()
            .unwrap_or_else(platform::default_install_dir);

        let temp = tempfile::Builder::new()
            .prefix("docksetup-")
            .tempdir()
            .map_err(|e| Error::io(std::env::temp_dir(), e))?;
        log::debug!("working in {}", temp.path().display());

        let archive_path = temp.path().join(source.file_name);
        reporter.download_started(source.url, &archive_path);
        let bytes = self.backend.download(source.url, &archive_path, reporter)?;
        reporter.download_finished(&archive_path, bytes);

        let extract_dir = temp.path().join(EXTRACT_DIR);
        reporter.extracting(&archive_path, &extract_dir);
        self.backend.extract(&archive_path, &extract_dir)?;

        let src_dir = match source.binary_subdir {
            Some(subdir) => extract_dir.join(subdir),
            None => extract_dir,
        };
        let binaries =
            self.backend
                .install_binaries(&src_dir, &install_dir, source.binaries, reporter)?;

        let verification = if options.verify {
            let report = verify::verify_binaries(&install_dir, &binaries)?;
            if !report.dir_on_path {
                log::warn!("{} is not on PATH", install_dir.display());
            }
            Some(report)
        } else {
            None
        };

        let kept_temp = if options.keep_temp {
            Some(temp.keep())
        } else {
            None
        };

        Ok(InstallOutcome::Installed {
            binaries,
            install_dir,
            kept_temp,
            verification,
        })
    }

    /// Check that installed binaries in `install_dir` are usable.
    pub fn verify(&self, install_dir: &Path) -> Result<verify::Verification> {
        let binaries: Vec<_> = BINARIES.iter().map(|b| install_dir.join(b)).collect();
        verify::verify_binaries(install_dir, &binaries)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
