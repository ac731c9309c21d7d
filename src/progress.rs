//! Console progress for the toolchain phase.
//!
//! Bridges [`toolchain::Reporter`] notifications to `ui` messages and an
//! `indicatif` download bar.

use crate::ui;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::Path;
use toolchain::Reporter;

/// Reporter that prints to the terminal.
pub struct ConsoleReporter {
    quiet: bool,
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            bar: RefCell::new(None),
        }
    }

    fn download_bar(total: Option<u64>) -> ProgressBar {
        match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("  {spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                {
                    pb.set_style(style.progress_chars("=>-"));
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.green} {bytes}")
                {
                    pb.set_style(style);
                }
                pb
            }
        }
    }

    fn clear_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn download_started(&self, url: &str, _dest: &Path) {
        if !self.quiet {
            ui::info(&format!("Downloading {}", url));
        }
    }

    fn download_progress(&self, downloaded: u64, total: Option<u64>) {
        if self.quiet {
            return;
        }
        let mut bar = self.bar.borrow_mut();
        let pb = bar.get_or_insert_with(|| Self::download_bar(total));
        pb.set_position(downloaded);
    }

    fn download_finished(&self, _dest: &Path, bytes: u64) {
        self.clear_bar();
        if !self.quiet {
            ui::success(&format!("Downloaded {}", ui::format_size(bytes)));
        }
    }

    fn extracting(&self, archive: &Path, dest: &Path) {
        if !self.quiet {
            let name = archive.file_name().unwrap_or(archive.as_os_str());
            ui::info(&format!(
                "Extracting {} to {}",
                name.to_string_lossy(),
                dest.display()
            ));
        }
    }

    fn binary_moved(&self, from: &Path, to: &Path) {
        if !self.quiet {
            ui::dim(&format!("Moving {} to {}", from.display(), to.display()));
        }
    }

    fn manual_install(&self, url: &str) {
        ui::warn("AutoDock has no automated install on Windows.");
        ui::info(&format!(
            "Download and install it from {} (opening in your browser)",
            url
        ));
    }

    fn unsupported(&self, os: &str) {
        ui::warn(&format!(
            "Unsupported OS for automatic AutoDock installation: {}",
            os
        ));
    }
}

impl Drop for ConsoleReporter {
    fn drop(&mut self) {
        self.clear_bar();
    }
}
