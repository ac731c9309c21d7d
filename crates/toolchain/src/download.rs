//! Streaming HTTP downloads.

use crate::error::{Error, Result};
use crate::report::Reporter;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Maximum download size (500 MB).
pub const MAX_DOWNLOAD_SIZE: u64 = 500 * 1024 * 1024;

const USER_AGENT: &str = concat!("docksetup/", env!("CARGO_PKG_VERSION"));

const CHUNK_SIZE: usize = 64 * 1024;

/// Fetch `url` and write the body to `dest`, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn download_file(
    agent: &ureq::Agent,
    url: &str,
    dest: &Path,
    reporter: &dyn Reporter,
) -> Result<u64> {
    log::debug!("GET {}", url);
    let mut response = agent.get(url).header("User-Agent", USER_AGENT).call()?;

    let total = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let mut reader = response
        .body_mut()
        .with_config()
        .limit(MAX_DOWNLOAD_SIZE)
        .reader();

    let file = File::create(dest).map_err(|e| Error::io(dest, e))?;
    let mut writer = BufWriter::new(file);

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut downloaded = 0u64;
    loop {
        let n = reader.read(&mut buf).map_err(|e| Error::DownloadFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if n == 0 {
            break;
        }
        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::io(dest, e))?;
        downloaded += n as u64;
        reporter.download_progress(downloaded, total);
    }
    writer.flush().map_err(|e| Error::io(dest, e))?;

    log::debug!("wrote {} bytes to {}", downloaded, dest.display());
    Ok(downloaded)
}
