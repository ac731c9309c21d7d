//! The install flow: toolchain first, then the viewer.
//!
//! The toolchain phase is fatal on error and stops the run before the viewer
//! is attempted. The viewer phase is best effort; its outcome is printed and
//! never turns into an error.

use crate::Context;
use crate::cli::InstallArgs;
use crate::config::{ResolvedSettings, Settings};
use crate::progress::ConsoleReporter;
use crate::ui;
use anyhow::{Context as _, Result};
use toolchain::{InstallOptions, InstallOutcome, Platform, Reporter};

/// Which phases of the flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phases {
    pub toolchain: bool,
    pub viewer: bool,
}

impl Phases {
    pub fn from_args(args: &InstallArgs) -> Self {
        Self {
            toolchain: !args.skip_toolchain,
            viewer: !args.skip_viewer,
        }
    }
}

impl Default for Phases {
    fn default() -> Self {
        Self {
            toolchain: true,
            viewer: true,
        }
    }
}

/// What each phase produced. `None` means the phase was skipped.
#[derive(Debug)]
pub struct Summary {
    pub toolchain: Option<InstallOutcome>,
    pub viewer: Option<pkgkit::Outcome>,
}

/// Run the install command with the real backends.
pub fn run(ctx: &Context, args: InstallArgs) -> Result<()> {
    let settings = Settings::load()?.resolve(&args);
    let platform = match args.os.as_deref() {
        Some(os) => Platform::from_os(os),
        None => toolchain::platform::detect(),
    };
    log::debug!("resolved settings: {:?}", settings);

    let toolchain = toolchain::Client::new();
    let viewer = pkgkit::Client::new(&settings.package_manager, settings.python.clone());
    let reporter = ConsoleReporter::new(ctx.quiet);

    execute(
        ctx,
        &settings,
        &platform,
        Phases::from_args(&args),
        &toolchain,
        &viewer,
        &reporter,
    )?;
    Ok(())
}

/// Run both phases against the given clients.
pub fn execute(
    ctx: &Context,
    settings: &ResolvedSettings,
    platform: &Platform,
    phases: Phases,
    toolchain: &toolchain::Client,
    viewer: &pkgkit::Client,
    reporter: &dyn Reporter,
) -> Result<Summary> {
    if !ctx.quiet {
        ui::info(&format!("Detected OS: {}", platform));
    }

    let toolchain_outcome = if phases.toolchain {
        Some(install_toolchain(ctx, settings, platform, toolchain, reporter)?)
    } else {
        log::info!("skipping AutoDock installation");
        None
    };

    let viewer_outcome = if phases.viewer {
        Some(install_viewer(ctx, settings, viewer))
    } else {
        log::info!("skipping PyMOL installation");
        None
    };

    Ok(Summary {
        toolchain: toolchain_outcome,
        viewer: viewer_outcome,
    })
}

fn install_toolchain(
    ctx: &Context,
    settings: &ResolvedSettings,
    platform: &Platform,
    client: &toolchain::Client,
    reporter: &dyn Reporter,
) -> Result<InstallOutcome> {
    if !ctx.quiet {
        ui::header(&format!("AutoDock {}", toolchain::SUITE_VERSION));
    }

    let options = InstallOptions::new()
        .install_dir(&settings.install_dir)
        .keep_temp(settings.keep_temp)
        .verify(settings.verify);

    let outcome = match client.install(platform, &options, reporter) {
        Ok(outcome) => outcome,
        Err(e) => {
            let category = e.category();
            ui::error(&format!("{}: {}", category.description(), e));
            ui::dim(category.advice());
            return Err(e).context("AutoDock installation failed");
        }
    };

    if let InstallOutcome::Installed {
        binaries,
        install_dir,
        kept_temp,
        verification,
    } = &outcome
    {
        if !ctx.quiet {
            for path in binaries {
                ui::success(&format!("Installed {}", path.display()));
            }
        }
        if let Some(dir) = kept_temp {
            ui::info(&format!("Kept downloaded files in {}", dir.display()));
        }
        match verification {
            Some(report) => {
                ui::success("Binaries verified");
                for name in &report.shadowed {
                    ui::warn(&format!(
                        "Another {} appears earlier on PATH and will be used instead",
                        name
                    ));
                }
                if !report.dir_on_path {
                    ui::warn(&format!("{} is not on PATH", install_dir.display()));
                }
            }
            None if !toolchain::platform::is_on_path(install_dir) => {
                ui::warn(&format!(
                    "{} is not on PATH; add it to run autodock4 and autogrid4",
                    install_dir.display()
                ));
            }
            None => {}
        }
    }

    Ok(outcome)
}

fn install_viewer(
    ctx: &Context,
    settings: &ResolvedSettings,
    client: &pkgkit::Client,
) -> pkgkit::Outcome {
    let package = settings.viewer_package();
    if !ctx.quiet {
        ui::header("PyMOL");
    }

    let strategy = client.select_strategy();
    match strategy {
        pkgkit::Strategy::Manager => {
            ui::info(&format!("Installing PyMOL via {}...", client.manager_name()));
        }
        pkgkit::Strategy::Fallback => {
            ui::warn(&format!(
                "{} not found. Installing PyMOL via {} instead.",
                client.manager_name(),
                client.fallback_name()
            ));
            ui::dim("The pip build of PyMOL may need extra system libraries.");
        }
    }

    let mut outcome = client.install_with(strategy, &package);
    if settings.verify {
        outcome = client.verify(outcome, &package);
    }

    match &outcome {
        pkgkit::Outcome::Installed { backend, .. } => {
            ui::success(&format!("PyMOL installed via {}", backend));
        }
        pkgkit::Outcome::Failed { backend, error, .. } => {
            ui::error(&format!("Failed to install PyMOL via {}: {}", backend, error));
            ui::dim(error.category().advice());
        }
    }

    outcome
}
