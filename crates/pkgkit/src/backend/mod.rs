//! Backend abstraction for package installers.
//!
//! The [`Backend`] trait defines the interface for one installer program,
//! allowing for different implementations:
//! - [`conda::CondaBackend`] for the package manager
//! - [`pip::PipBackend`] for the Python fallback
//! - [`MockBackend`] for testing

pub mod conda;
pub mod pip;

use crate::error::{Error, Result};
use crate::types::Package;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex, PoisonError};

/// One installer program.
pub trait Backend: Send + Sync {
    /// Short name shown to the user (e.g., "conda").
    fn name(&self) -> &str;

    /// Check if the installer can be invoked.
    fn is_available(&self) -> bool;

    /// Install a package. Output is shown to the user as it runs.
    fn install(&self, package: &Package) -> Result<()>;

    /// Check that the package is present after installation.
    fn verify(&self, package: &Package) -> Result<()>;
}

/// Run a command with inherited stdio and fail on a non-zero exit.
pub(crate) fn run_visible(program: &str, args: &[&str]) -> Result<()> {
    let command_line = format!("{} {}", program, args.join(" "));
    log::info!("running {}", command_line);

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::ProgramNotFound {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::CommandFailed {
            command: command_line,
            status: status.code(),
        })
    }
}

/// Run a command silently and return its stdout, or `None` on failure.
pub(crate) fn run_capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        None
    }
}

/// A call recorded by [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `is_available()`
    Probe,
    /// `install(package)`
    Install(Package),
    /// `verify(package)`
    Verify(Package),
}

/// Mock backend for testing without running real installers.
///
/// Clones share state, so a test can keep one handle and give another to
/// the client.
#[derive(Debug, Clone)]
pub struct MockBackend {
    name: String,
    available: bool,
    install_error: Option<String>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockBackend {
    /// Create an available mock whose installs succeed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            install_error: None,
            calls: Arc::default(),
        }
    }

    /// Set whether the probe succeeds.
    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Make installs fail with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.install_error = Some(message.into());
        self
    }

    /// Calls recorded so far, in order.
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
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.record(Call::Probe);
        self.available
    }

    fn install(&self, package: &Package) -> Result<()> {
        self.record(Call::Install(package.clone()));
        match &self.install_error {
            Some(message) => Err(Error::Other(message.clone())),
            None => Ok(()),
        }
    }

    fn verify(&self, package: &Package) -> Result<()> {
        self.record(Call::Verify(package.clone()));
        match &self.install_error {
            Some(_) => Err(Error::NotInstalled {
                package: package.name.clone(),
                backend: self.name.clone(),
            }),
            None => Ok(()),
        }
    }
}
