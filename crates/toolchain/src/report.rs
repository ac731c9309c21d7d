//! Progress notifications for installation steps.
//!
//! The library never prints. Callers that want console output implement
//! [`Reporter`]; every method has an empty default.

use std::path::Path;

/// Callback trait for installation progress.
pub trait Reporter {
    /// A download is about to start.
    fn download_started(&self, _url: &str, _dest: &Path) {}

    /// Bytes received so far, with the total if the server sent one.
    fn download_progress(&self, _downloaded: u64, _total: Option<u64>) {}

    /// A download finished.
    fn download_finished(&self, _dest: &Path, _bytes: u64) {}

    /// An archive is about to be extracted.
    fn extracting(&self, _archive: &Path, _dest: &Path) {}

    /// A binary is about to be moved into the install directory.
    fn binary_moved(&self, _from: &Path, _to: &Path) {}

    /// No automated install exists; the user should download from `url`.
    fn manual_install(&self, _url: &str) {}

    /// Automatic installation is not offered for this OS.
    fn unsupported(&self, _os: &str) {}
}

/// Reporter that ignores every notification.
pub struct Silent;

impl Reporter for Silent {}
