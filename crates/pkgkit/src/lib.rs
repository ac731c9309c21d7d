//! # pkgkit
//!
//! Pure Rust library for installing a Python package through a package
//! manager, with the Python installer as a fallback.
//!
//! The two strategies are mutually exclusive: the package manager is probed
//! once, and exactly one installer runs. Failures are returned as an
//! [`Outcome`] instead of an error, since installing the package is best
//! effort.
//!
//! ## Example
//!
//! ```no_run
//! use pkgkit::{Client, Package};
//!
//! let client = Client::new("conda", None);
//! let pymol = Package::new("pymol").with_channel("schrodinger");
//!
//! let outcome = client.install(&pymol);
//! if !outcome.is_installed() {
//!     eprintln!("PyMOL was not installed via {}", outcome.backend());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod probe;
pub mod types;

pub use error::{Error, ErrorCategory, Result};
pub use types::{Outcome, Package, Strategy};

use backend::Backend;
use backend::conda::CondaBackend;
use backend::pip::PipBackend;
use std::path::PathBuf;

/// High-level client choosing between the package manager and the fallback.
pub struct Client {
    manager: Box<dyn Backend>,
    fallback: Box<dyn Backend>,
}

impl Client {
    /// Create a client for the `manager` program, falling back to pip.
    ///
    /// `python` selects the fallback interpreter; `None` searches PATH.
    pub fn new(manager: &str, python: Option<PathBuf>) -> Self {
        let fallback = match python {
            Some(python) => PipBackend::with_python(python),
            None => PipBackend::detect(),
        };
        Self {
            manager: Box::new(CondaBackend::new(manager)),
            fallback: Box::new(fallback),
        }
    }

    /// Create a client with custom backends (useful for testing).
    pub fn with_backends(manager: Box<dyn Backend>, fallback: Box<dyn Backend>) -> Self {
        Self { manager, fallback }
    }

    /// Name of the package manager backend.
    pub fn manager_name(&self) -> &str {
        self.manager.name()
    }

    /// Name of the fallback backend.
    pub fn fallback_name(&self) -> &str {
        self.fallback.name()
    }

    /// Probe the package manager and pick a strategy.
    pub fn select_strategy(&self) -> Strategy {
        if self.manager.is_available() {
            Strategy::Manager
        } else {
            log::info!("{} not available, using {}", self.manager.name(), self.fallback.name());
            Strategy::Fallback
        }
    }

    /// Whether the fallback installer can run.
    pub fn is_fallback_available(&self) -> bool {
        self.fallback.is_available()
    }

    /// Install `package` with the given strategy only.
    ///
    /// A failure does not trigger the other strategy.
    pub fn install_with(&self, strategy: Strategy, package: &Package) -> Outcome {
        let backend = self.backend(strategy);
        match backend.install(package) {
            Ok(()) => Outcome::Installed {
                strategy,
                backend: backend.name().to_string(),
            },
            Err(error) => Outcome::Failed {
                strategy,
                backend: backend.name().to_string(),
                error,
            },
        }
    }

    /// Probe, then install with the selected strategy.
    pub fn install(&self, package: &Package) -> Outcome {
        self.install_with(self.select_strategy(), package)
    }

    /// Check that `package` is present, using the backend that installed it.
    ///
    /// An `Installed` outcome whose check fails becomes `Failed`.
    pub fn verify(&self, outcome: Outcome, package: &Package) -> Outcome {
        match outcome {
            Outcome::Installed { strategy, backend } => {
                match self.backend(strategy).verify(package) {
                    Ok(()) => Outcome::Installed { strategy, backend },
                    Err(error) => Outcome::Failed {
                        strategy,
                        backend,
                        error,
                    },
                }
            }
            failed => failed,
        }
    }

    fn backend(&self, strategy: Strategy) -> &dyn Backend {
        match strategy {
            Strategy::Manager => self.manager.as_ref(),
            Strategy::Fallback => self.fallback.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::{Call, MockBackend};

    fn pymol() -> Package {
        Package::new("pymol").with_channel("schrodinger")
    }

    #[test]
    fn test_manager_available_uses_manager_only() {
        let manager = MockBackend::new("conda");
        let fallback = MockBackend::new("pip");
        let client = Client::with_backends(Box::new(manager.clone()), Box::new(fallback.clone()));

        let outcome = client.install(&pymol());

        assert!(outcome.is_installed());
        assert_eq!(outcome.strategy(), Strategy::Manager);
        assert_eq!(manager.calls(), vec![Call::Probe, Call::Install(pymol())]);
        assert!(fallback.calls().is_empty());
    }

    #[test]
    fn test_manager_unavailable_uses_fallback() {
        let manager = MockBackend::new("conda").available(false);
        let fallback = MockBackend::new("pip");
        let client = Client::with_backends(Box::new(manager.clone()), Box::new(fallback.clone()));

        let outcome = client.install(&pymol());

        assert!(outcome.is_installed());
        assert_eq!(outcome.strategy(), Strategy::Fallback);
        assert_eq!(outcome.backend(), "pip");
        assert_eq!(manager.calls(), vec![Call::Probe]);
        assert_eq!(fallback.calls(), vec![Call::Install(pymol())]);
    }

    #[test]
    fn test_manager_failure_does_not_chain_fallback() {
        let manager = MockBackend::new("conda").failing("solver failed");
        let fallback = MockBackend::new("pip");
        let client = Client::with_backends(Box::new(manager.clone()), Box::new(fallback.clone()));

        let outcome = client.install(&pymol());

        match outcome {
            Outcome::Failed {
                strategy, error, ..
            } => {
                assert_eq!(strategy, Strategy::Manager);
                assert_eq!(error.to_string(), "solver failed");
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert!(fallback.calls().is_empty());
    }

    #[test]
    fn test_fallback_failure_is_reported() {
        let manager = MockBackend::new("conda").available(false);
        let fallback = MockBackend::new("pip").failing("no matching distribution");
        let client = Client::with_backends(Box::new(manager), Box::new(fallback));

        let outcome = client.install(&pymol());
        assert!(!outcome.is_installed());
        assert_eq!(outcome.strategy(), Strategy::Fallback);
    }

    #[test]
    fn test_verify_uses_installing_backend() {
        let manager = MockBackend::new("conda");
        let fallback = MockBackend::new("pip");
        let client = Client::with_backends(Box::new(manager.clone()), Box::new(fallback.clone()));

        let outcome = client.install_with(Strategy::Manager, &pymol());
        let verified = client.verify(outcome, &pymol());

        assert!(verified.is_installed());
        assert_eq!(manager.calls(), vec![Call::Install(pymol()), Call::Verify(pymol())]);
        assert!(fallback.calls().is_empty());
    }

    #[test]
    fn test_verify_skips_failed_outcome() {
        let manager = MockBackend::new("conda").failing("boom");
        let client =
            Client::with_backends(Box::new(manager.clone()), Box::new(MockBackend::new("pip")));

        let outcome = client.install_with(Strategy::Manager, &pymol());
        let verified = client.verify(outcome, &pymol());

        assert!(!verified.is_installed());
        assert_eq!(manager.calls(), vec![Call::Install(pymol())]);
    }

    #[test]
    fn test_client_names() {
        let client = Client::new("mamba", Some(PathBuf::from("/usr/bin/python3")));
        assert_eq!(client.manager_name(), "mamba");
        assert_eq!(client.fallback_name(), "pip");
    }
}
