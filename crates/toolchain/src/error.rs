//! Error types for toolchain operations.
//!
//! Errors are categorized so the CLI can give the user a short description
//! of what went wrong and a hint about how to fix it.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for toolchain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of toolchain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network-related errors (connection, HTTP status, truncated body).
    Network,
    /// Archive format not recognized or archive is corrupt.
    Format,
    /// An expected binary is missing from the extracted archive.
    NotFound,
    /// Permission denied while writing the install directory.
    Permission,
    /// Installed binaries failed post-install verification.
    Verification,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Whether this error category is typically transient.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::Format => "Invalid archive",
            Self::NotFound => "Binary not found in archive",
            Self::Permission => "Permission denied",
            Self::Verification => "Installed binaries failed verification",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check your internet connection and run the installer again",
            Self::Format => "The downloaded archive may be corrupted, run the installer again",
            Self::NotFound => "The archive layout may have changed; rerun with --keep-temp and inspect it",
            Self::Permission => "Choose a writable directory with --install-dir or run with elevated rights",
            Self::Verification => "Check the install directory and file permissions",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur during toolchain operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP request failed: {message}")]
    HttpError {
        /// Error message.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// Failed to download an archive.
    #[error("download failed for {url}: {message}")]
    DownloadFailed {
        /// URL being downloaded.
        url: String,
        /// Error message.
        message: String,
    },

    /// The archive suffix is not one of the supported formats.
    #[error("unsupported archive format: {}", .0.display())]
    UnsupportedArchive(PathBuf),

    /// Failed to expand an archive.
    #[error("failed to extract {}: {message}", path.display())]
    ExtractionFailed {
        /// Archive path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// IO error during file operations.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Expected binary missing from the source directory.
    #[error("binary {name} not found in {}", dir.display())]
    BinaryNotFound {
        /// Binary file name.
        name: String,
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// Post-install verification failed.
    #[error("verification failed for {}: {message}", path.display())]
    VerificationFailed {
        /// Installed binary path.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },

    /// The default browser could not be launched.
    #[error("failed to open {url}: {message}")]
    BrowserLaunch {
        /// URL that was being opened.
        url: String,
        /// Error message.
        message: String,
    },

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an HTTP error.
    pub fn http(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::HttpError {
            message: message.into(),
            status,
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::HttpError { .. } => ErrorCategory::Network,
            Error::DownloadFailed { .. } => ErrorCategory::Network,
            Error::UnsupportedArchive(_) => ErrorCategory::Format,
            Error::ExtractionFailed { .. } => ErrorCategory::Format,
            Error::Io { source, .. } => {
                if source.kind() == io::ErrorKind::PermissionDenied {
                    ErrorCategory::Permission
                } else {
                    ErrorCategory::Other
                }
            }
            Error::BinaryNotFound { .. } => ErrorCategory::NotFound,
            Error::VerificationFailed { .. } => ErrorCategory::Verification,
            Error::BrowserLaunch { .. } => ErrorCategory::Other,
            Error::Other(_) => ErrorCategory::Other,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::HttpError {
                message: format!("HTTP {}", code),
                status: Some(code),
            },
            other => Self::HttpError {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_transient() {
        assert!(ErrorCategory::Network.is_transient());
        assert!(!ErrorCategory::Format.is_transient());
        assert!(!ErrorCategory::NotFound.is_transient());
        assert!(!ErrorCategory::Permission.is_transient());
        assert!(!ErrorCategory::Verification.is_transient());
        assert!(!ErrorCategory::Other.is_transient());
    }

    #[test]
    fn test_error_category_advice() {
        assert!(!ErrorCategory::Network.advice().is_empty());
        assert!(ErrorCategory::Permission.advice().contains("--install-dir"));
        assert!(ErrorCategory::NotFound.advice().contains("--keep-temp"));
    }

    #[test]
    fn test_error_category_display() {
        let display = format!("{}", ErrorCategory::Network);
        assert!(display.contains("Network"));
    }

    #[test]
    fn test_error_http_category() {
        let err = Error::http("connection failed", Some(503));
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_error_unsupported_archive_display() {
        let err = Error::UnsupportedArchive(PathBuf::from("pkg.rar"));
        assert_eq!(err.category(), ErrorCategory::Format);
        assert!(err.to_string().contains("pkg.rar"));
    }

    #[test]
    fn test_error_io_permission_denied_category() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let err = Error::io("/usr/local/bin", io_err);
        assert_eq!(err.category(), ErrorCategory::Permission);
    }

    #[test]
    fn test_error_io_other_category() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err = Error::io("/some/path", io_err);
        assert_eq!(err.category(), ErrorCategory::Other);
    }

    #[test]
    fn test_error_binary_not_found() {
        let err = Error::BinaryNotFound {
            name: "autodock4".to_string(),
            dir: PathBuf::from("/tmp/extracted"),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        let display = err.to_string();
        assert!(display.contains("autodock4"));
        assert!(display.contains("/tmp/extracted"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err: Error = io_err.into();
        match err {
            Error::Io { path, .. } => assert_eq!(path, PathBuf::new()),
            _ => panic!("Expected Error::Io"),
        }
    }
}
