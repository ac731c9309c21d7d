//! conda CLI backend.

use crate::backend::{Backend, run_capture, run_visible};
use crate::error::{Error, Result};
use crate::probe;
use crate::types::Package;

/// Default package manager program.
pub const DEFAULT_PROGRAM: &str = "conda";

/// Backend that executes real `conda` commands.
pub struct CondaBackend {
    /// Program name or path (e.g., "conda", "mamba", "/opt/conda/bin/conda")
    program: String,
}

impl CondaBackend {
    /// Create a backend for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for installing `package`, auto-confirmed.
    fn install_args(package: &Package) -> Vec<&str> {
        let mut args = vec!["install", "-y"];
        if let Some(channel) = &package.channel {
            args.extend(["-c", channel.as_str()]);
        }
        args.push(package.name.as_str());
        args
    }
}

impl Default for CondaBackend {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Backend for CondaBackend {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        probe::has_version(&self.program)
    }

    fn install(&self, package: &Package) -> Result<()> {
        run_visible(&self.program, &Self::install_args(package))
    }

    fn verify(&self, package: &Package) -> Result<()> {
        let listed = run_capture(&self.program, &["list", "--full-name", &package.name])
            .is_some_and(|out| {
                out.lines()
                    .filter(|line| !line.starts_with('#'))
                    .any(|line| line.split_whitespace().next() == Some(package.name.as_str()))
            });

        if listed {
            Ok(())
        } else {
            Err(Error::NotInstalled {
                package: package.name.clone(),
                backend: self.program.clone(),
            })
        }
    }
}
