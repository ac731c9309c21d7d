//! Checking whether an installer program can be invoked.

use std::process::{Command, Stdio};

/// Run `program args...` with output discarded and report whether it exited
/// successfully.
///
/// A missing executable, a launch failure and a non-zero exit status all
/// count as "not available".
pub fn is_invocable(program: &str, args: &[&str]) -> bool {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) => {
            log::debug!("{} {} -> {}", program, args.join(" "), status);
            status.success()
        }
        Err(e) => {
            log::debug!("{} {} could not run: {}", program, args.join(" "), e);
            false
        }
    }
}

/// Probe a package manager with its version subcommand.
pub fn has_version(program: &str) -> bool {
    is_invocable(program, &["--version"])
}
