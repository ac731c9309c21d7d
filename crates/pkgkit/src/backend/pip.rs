//! Python `pip` fallback backend.

use crate::backend::{Backend, run_capture, run_visible};
use crate::error::{Error, Result};
use crate::probe;
use crate::types::Package;
use std::path::PathBuf;

/// Interpreter names tried on PATH, in order.
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Backend that runs `<python> -m pip`.
pub struct PipBackend {
    /// Interpreter to use; `None` if none was configured or found.
    python: Option<PathBuf>,
}

impl PipBackend {
    /// Use an explicit interpreter.
    pub fn with_python(python: impl Into<PathBuf>) -> Self {
        Self {
            python: Some(python.into()),
        }
    }

    /// Use the first of `python3`/`python` found on PATH.
    pub fn detect() -> Self {
        Self {
            python: find_python(),
        }
    }

    /// The interpreter this backend runs, if any.
    pub fn python(&self) -> Option<&PathBuf> {
        self.python.as_ref()
    }

    fn python_program(&self) -> Result<String> {
        self.python
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .ok_or(Error::PythonNotFound)
    }
}

impl Backend for PipBackend {
    fn name(&self) -> &str {
        "pip"
    }

    fn is_available(&self) -> bool {
        self.python_program()
            .is_ok_and(|python| probe::is_invocable(&python, &["-m", "pip", "--version"]))
    }

    fn install(&self, package: &Package) -> Result<()> {
        let python = self.python_program()?;
        run_visible(&python, &["-m", "pip", "install", &package.name])
    }

    fn verify(&self, package: &Package) -> Result<()> {
        let python = self.python_program()?;
        match run_capture(&python, &["-m", "pip", "show", &package.name]) {
            Some(_) => Ok(()),
            None => Err(Error::NotInstalled {
                package: package.name.clone(),
                backend: "pip".to_string(),
            }),
        }
    }
}

fn find_python() -> Option<PathBuf> {
    PYTHON_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}
