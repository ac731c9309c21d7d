use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::InstallArgs;

/// Package manager probed for the viewer install
pub const DEFAULT_PACKAGE_MANAGER: &str = "conda";

/// Channel the viewer is installed from
pub const DEFAULT_CHANNEL: &str = "schrodinger";

/// Viewer package name
pub const VIEWER_PACKAGE: &str = "pymol";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("docksetup"))
}

/// Get the config file path
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

// ============================================================================
// Settings
// ============================================================================

/// Optional settings read from `config.toml`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub install_dir: Option<String>,
    pub keep_temp: Option<bool>,
    pub verify: Option<bool>,
    pub package_manager: Option<String>,
    pub channel: Option<String>,
    pub python: Option<String>,
}

/// Settings after merging CLI, config file and defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSettings {
    pub install_dir: PathBuf,
    pub keep_temp: bool,
    pub verify: bool,
    pub package_manager: String,
    pub channel: String,
    pub python: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the default config file, or defaults if it is absent
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load settings from `path`, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Merge with CLI arguments. CLI wins over the file, the file over defaults.
    pub fn resolve(&self, args: &InstallArgs) -> ResolvedSettings {
        let install_dir = args
            .install_dir
            .clone()
            .or_else(|| self.install_dir.as_deref().map(expand))
            .unwrap_or_else(toolchain::platform::default_install_dir);

        ResolvedSettings {
            install_dir,
            keep_temp: args.keep_temp || self.keep_temp.unwrap_or(false),
            verify: args.verify || self.verify.unwrap_or(false),
            package_manager: args
                .package_manager
                .clone()
                .or_else(|| self.package_manager.clone())
                .unwrap_or_else(|| DEFAULT_PACKAGE_MANAGER.to_string()),
            channel: args
                .channel
                .clone()
                .or_else(|| self.channel.clone())
                .unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            python: args
                .python
                .clone()
                .or_else(|| self.python.as_deref().map(expand)),
        }
    }
}

impl ResolvedSettings {
    /// The viewer package to install
    pub fn viewer_package(&self) -> pkgkit::Package {
        pkgkit::Package::new(VIEWER_PACKAGE).with_channel(&self.channel)
    }
}

/// Expand a leading `~` in a configured path
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
