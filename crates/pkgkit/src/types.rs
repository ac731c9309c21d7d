//! Core types for package installation.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A package to install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name (e.g., "pymol")
    pub name: String,
    /// Channel for package managers that have one (e.g., "schrodinger")
    pub channel: Option<String>,
}

impl Package {
    /// Create a package with no channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channel: None,
        }
    }

    /// Set the channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.channel {
            Some(channel) => write!(f, "{}::{}", channel, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Which of the two mutually exclusive installers runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// The package manager (conda) was found
    Manager,
    /// The package manager is unavailable; use the Python installer
    Fallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Manager => write!(f, "package manager"),
            Strategy::Fallback => write!(f, "fallback installer"),
        }
    }
}

/// Outcome of a best-effort package installation.
///
/// Installation failures are never fatal to the caller; they are reported
/// through this type instead of an `Err`.
#[derive(Debug)]
pub enum Outcome {
    /// The installer exited successfully.
    Installed {
        /// Strategy that ran
        strategy: Strategy,
        /// Backend name (e.g., "conda")
        backend: String,
    },
    /// The installer failed.
    Failed {
        /// Strategy that ran
        strategy: Strategy,
        /// Backend name (e.g., "pip")
        backend: String,
        /// What went wrong
        error: Error,
    },
}

impl Outcome {
    /// Whether the package was installed.
    pub fn is_installed(&self) -> bool {
        matches!(self, Outcome::Installed { .. })
    }

    /// Strategy that ran.
    pub fn strategy(&self) -> Strategy {
        match self {
            Outcome::Installed { strategy, .. } | Outcome::Failed { strategy, .. } => *strategy,
        }
    }

    /// Backend that ran.
    pub fn backend(&self) -> &str {
        match self {
            Outcome::Installed { backend, .. } | Outcome::Failed { backend, .. } => backend,
        }
    }
}
