//! Backend trait for the side effects of an installation.
//!
//! [`system::SystemBackend`] talks to the network, the filesystem and the
//! desktop. [`MockBackend`] records every call instead, so the install flow
//! can be tested without network access:
//!
//! ```
//! use toolchain::backend::{Call, MockBackend};
//! use toolchain::{Client, InstallOptions, Platform};
//!
//! let mock = MockBackend::new();
//! let client = Client::with_backend(Box::new(mock.clone()));
//!
//! client
//!     .install(&Platform::Windows, &InstallOptions::default(), &toolchain::Silent)
//!     .unwrap();
//!
//! assert!(matches!(mock.calls().as_slice(), [Call::OpenUrl(_)]));
//! ```

pub mod system;

use crate::error::{Error, Result};
use crate::report::Reporter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Side effects needed to install the toolchain.
pub trait Backend: Send + Sync {
    /// Download `url` into `dest`, returning the byte count.
    fn download(&self, url: &str, dest: &Path, reporter: &dyn Reporter) -> Result<u64>;

    /// Expand `archive` into `dest`.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()>;

    /// Move `binaries` from `src_dir` into `dst_dir`.
    fn install_binaries(
        &self,
        src_dir: &Path,
        dst_dir: &Path,
        binaries: &[&str],
        reporter: &dyn Reporter,
    ) -> Result<Vec<PathBuf>>;

    /// Open `url` in the default browser.
    fn open_url(&self, url: &str) -> Result<()>;
}

/// A call recorded by [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `download(url, dest)`
    Download {
        /// Requested URL.
        url: String,
        /// Destination file.
        dest: PathBuf,
    },
    /// `extract(archive, dest)`
    Extract {
        /// Archive path.
        archive: PathBuf,
        /// Extraction directory.
        dest: PathBuf,
    },
    /// `install_binaries(src_dir, dst_dir, binaries)`
    InstallBinaries {
        /// Source directory.
        src_dir: PathBuf,
        /// Destination directory.
        dst_dir: PathBuf,
        /// Binary names, in order.
        binaries: Vec<String>,
    },
    /// `open_url(url)`
    OpenUrl(String),
}

/// Mock backend for testing without network or filesystem effects.
///
/// Clones share the same call log, so a test can keep one handle and give
/// another to the client.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    calls: Arc<Mutex<Vec<Call>>>,
    download_error: Arc<Mutex<Option<String>>>,
    browser_error: Arc<Mutex<Option<String>>>,
}

impl MockBackend {
    /// Create a new mock backend where every operation succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every download fail with a network error.
    pub fn fail_downloads(&self, message: impl Into<String>) {
        *self
            .download_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    /// Make opening the browser fail.
    pub fn fail_browser(&self, message: impl Into<String>) {
        *self
            .browser_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    /// Calls recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl Backend for MockBackend {
    fn download(&self, url: &str, dest: &Path, reporter: &dyn Reporter) -> Result<u64> {
        self.record(Call::Download {
            url: url.to_string(),
            dest: dest.to_path_buf(),
        });

        let error = self
            .download_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(message) = error {
            return Err(Error::http(message, None));
        }

        reporter.download_progress(0, Some(0));
        Ok(0)
    }

    fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        self.record(Call::Extract {
            archive: archive.to_path_buf(),
            dest: dest.to_path_buf(),
        });
        Ok(())
    }

    fn install_binaries(
        &self,
        src_dir: &Path,
        dst_dir: &Path,
        binaries: &[&str],
        reporter: &dyn Reporter,
    ) -> Result<Vec<PathBuf>> {
        self.record(Call::InstallBinaries {
            src_dir: src_dir.to_path_buf(),
            dst_dir: dst_dir.to_path_buf(),
            binaries: binaries.iter().map(|b| (*b).to_string()).collect(),
        });

        Ok(binaries
            .iter()
            .map(|name| {
                let to = dst_dir.join(name);
                reporter.binary_moved(&src_dir.join(name), &to);
                to
            })
            .collect())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.record(Call::OpenUrl(url.to_string()));

        let error = self
            .browser_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match error {
            Some(message) => Err(Error::BrowserLaunch {
                url: url.to_string(),
                message,
            }),
            None => Ok(()),
        }
    }
}
