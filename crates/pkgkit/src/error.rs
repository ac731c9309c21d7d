//! Error types for package installation.
//!
//! Each error maps to an [`ErrorCategory`] so the caller can show a short
//! description and a hint for fixing it.

use thiserror::Error;

/// Categories of package installation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The installer program could not be found or launched
    ProgramNotFound,
    /// The installer ran and reported failure
    InstallFailed,
    /// The package is not present after installation
    Verification,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ProgramNotFound => "Installer not found",
            Self::InstallFailed => "Installation failed",
            Self::Verification => "Package not found after install",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::ProgramNotFound => "Install conda or Python, or point --package-manager/--python at them",
            Self::InstallFailed => "Check the installer output above for the cause",
            Self::Verification => "Activate the environment the package was installed into",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur while installing a package.
#[derive(Debug, Error)]
pub enum Error {
    /// The program could not be started (missing, not executable, ...)
    #[error("failed to run {program}: {message}")]
    ProgramNotFound {
        /// Program that was invoked
        program: String,
        /// Launch error
        message: String,
    },

    /// The program exited with a failure status
    #[error("{command} exited with {}", status.map_or_else(|| "a signal".to_string(), |c| format!("status {}", c)))]
    CommandFailed {
        /// Full command line, for display
        command: String,
        /// Exit code, `None` if killed by a signal
        status: Option<i32>,
    },

    /// No usable Python interpreter for the fallback installer
    #[error("no Python interpreter found on PATH (tried python3, python)")]
    PythonNotFound,

    /// Post-install check did not find the package
    #[error("{package} not found after installing via {backend}")]
    NotInstalled {
        /// Package name
        package: String,
        /// Backend that ran the install
        backend: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ProgramNotFound { .. } | Error::PythonNotFound => ErrorCategory::ProgramNotFound,
            Error::CommandFailed { .. } => ErrorCategory::InstallFailed,
            Error::NotInstalled { .. } => ErrorCategory::Verification,
            _ => ErrorCategory::Other,
        }
    }
}

/// Result type alias for package operations.
pub type Result<T> = std::result::Result<T, Error>;
