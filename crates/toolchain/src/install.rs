//! Moving extracted binaries into the install directory.

use crate::error::{Error, Result};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Permission bits applied to installed binaries on Unix.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Move `binaries` from `src_dir` into `dst_dir`, in order.
///
/// `dst_dir` is created (with parents) first. `on_move` is called once per
/// file before it is moved. The first missing binary aborts the rest of the
/// list; binaries already moved stay in place.
///
/// On Unix each moved file gets mode `0o755`.
///
/// Returns the installed paths in order.
pub fn install_binaries(
    src_dir: &Path,
    dst_dir: &Path,
    binaries: &[&str],
    mut on_move: impl FnMut(&Path, &Path),
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dst_dir).map_err(|e| Error::io(dst_dir, e))?;

    let mut installed = Vec::with_capacity(binaries.len());
    for name in binaries {
        let src = src_dir.join(name);
        let dst = dst_dir.join(name);

        if !src.is_file() {
            return Err(Error::BinaryNotFound {
                name: (*name).to_string(),
                dir: src_dir.to_path_buf(),
            });
        }

        on_move(&src, &dst);
        move_file(&src, &dst)?;

        #[cfg(unix)]
        fs::set_permissions(&dst, fs::Permissions::from_mode(EXECUTABLE_MODE))
            .map_err(|e| Error::io(&dst, e))?;

        installed.push(dst);
    }

    Ok(installed)
}

/// Rename `src` to `dst`, falling back to copy + remove when a rename is not
/// possible (e.g. the temp dir is on another filesystem).
fn move_file(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            log::debug!(
                "rename {} -> {} failed ({}), copying instead",
                src.display(),
                dst.display(),
                rename_err
            );
            fs::copy(src, dst).map_err(|e| Error::io(dst, e))?;
            fs::remove_file(src).map_err(|e| Error::io(src, e))
        }
    }
}
