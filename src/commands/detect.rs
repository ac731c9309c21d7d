//! Report what an install would do on this machine.

use crate::Context;
use crate::cli::{DetectArgs, InstallArgs};
use crate::config::{ResolvedSettings, Settings};
use crate::ui;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use toolchain::{Platform, Strategy};

#[derive(Debug, Serialize)]
pub struct Detection {
    pub platform: Platform,
    pub strategy: Strategy,
    pub install_dir: PathBuf,
    pub install_dir_on_path: bool,
    pub package_manager: String,
    pub package_manager_available: bool,
    pub fallback: String,
    pub fallback_available: bool,
}

impl Detection {
    pub fn gather(platform: Platform, settings: &ResolvedSettings, viewer: &pkgkit::Client) -> Self {
        let package_manager_available =
            matches!(viewer.select_strategy(), pkgkit::Strategy::Manager);
        Self {
            strategy: platform.strategy(),
            platform,
            install_dir_on_path: toolchain::platform::is_on_path(&settings.install_dir),
            install_dir: settings.install_dir.clone(),
            package_manager: viewer.manager_name().to_string(),
            package_manager_available,
            fallback: viewer.fallback_name().to_string(),
            fallback_available: viewer.is_fallback_available(),
        }
    }
}

pub fn run(_ctx: &Context, args: DetectArgs) -> Result<()> {
    let settings = Settings::load()?.resolve(&InstallArgs::default());
    let platform = match args.os.as_deref() {
        Some(os) => Platform::from_os(os),
        None => toolchain::platform::detect(),
    };
    let viewer = pkgkit::Client::new(&settings.package_manager, settings.python.clone());
    let detection = Detection::gather(platform, &settings, &viewer);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detection)?);
    } else {
        print_detection(&detection);
    }
    Ok(())
}

fn print_detection(d: &Detection) {
    ui::header("AutoDock");
    ui::kv("OS", &d.platform.to_string());
    match d.strategy {
        Strategy::Archive(source) => {
            ui::kv("Archive", source.url);
            ui::kv("Binaries", &source.binaries.join(", "));
            ui::kv("Install dir", &d.install_dir.display().to_string());
            ui::kv("On PATH", &ui::yes_no(d.install_dir_on_path));
        }
        Strategy::Manual { url } => ui::kv("Manual download", url),
        Strategy::Unsupported => ui::kv("Install", "not supported on this OS"),
    }

    ui::header("PyMOL");
    ui::kv(&d.package_manager, &ui::yes_no(d.package_manager_available));
    ui::kv(&d.fallback, &ui::yes_no(d.fallback_available));
}
