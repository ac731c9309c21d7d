//! Example: Install AutoDock into a scratch directory
//!
//! Run with: cargo run -p toolchain --example install_autodock -- /tmp/autodock-bin

use std::path::PathBuf;
use toolchain::{Client, InstallOptions, InstallOutcome, Silent, platform};

fn main() {
    println!("AutoDock {} Installer", toolchain::SUITE_VERSION);
    println!("=======================\n");

    let install_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(platform::default_install_dir);

    let platform = platform::detect();
    println!("Detected OS: {}", platform);

    let client = Client::new();
    let options = InstallOptions::new().install_dir(&install_dir).verify(true);

    match client.install(&platform, &options, &Silent) {
        Ok(InstallOutcome::Installed { binaries, .. }) => {
            println!("\nInstallation successful!");
            for path in binaries {
                println!("  {}", path.display());
            }
        }
        Ok(InstallOutcome::Manual { url, .. }) => {
            println!("\nInstall manually from {}", url);
        }
        Ok(InstallOutcome::Unsupported { os }) => {
            println!("\nNo automatic installation for {}", os);
        }
        Err(e) => {
            eprintln!("\nInstallation failed: {}", e);
            std::process::exit(1);
        }
    }
}
