//! Archive extraction.
//!
//! The format is chosen from the archive's file name. Tar archives are
//! opened with transparent gzip detection, so a compressed `.tar` or a plain
//! `.tar.gz` still unpacks.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// `.zip`
    Zip,
    /// `.tar`
    Tar,
    /// `.tar.gz` / `.tgz`
    TarGz,
}

impl ArchiveFormat {
    /// Select the format from the file name suffix.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedArchive` for any other suffix.
    ///
    /// # Example
    ///
    /// ```
    /// use toolchain::archive::ArchiveFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ArchiveFormat::from_path(Path::new("pkg.tgz")).unwrap(), ArchiveFormat::TarGz);
    /// assert!(ArchiveFormat::from_path(Path::new("pkg.rar")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if name.ends_with(".zip") {
            Ok(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(Self::TarGz)
        } else if name.ends_with(".tar") {
            Ok(Self::Tar)
        } else {
            Err(Error::UnsupportedArchive(path.to_path_buf()))
        }
    }

    /// Whether this is a tar-family format.
    #[must_use]
    pub fn is_tar(&self) -> bool {
        matches!(self, Self::Tar | Self::TarGz)
    }
}

/// Expand every entry of `archive` into `dest`, creating `dest` if needed.
pub fn extract(archive: &Path, dest: &Path) -> Result<ArchiveFormat> {
    let format = ArchiveFormat::from_path(archive)?;
    log::debug!("extracting {} as {:?}", archive.display(), format);

    fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;

    match format {
        ArchiveFormat::Zip => extract_zip(archive, dest)?,
        ArchiveFormat::Tar | ArchiveFormat::TarGz => extract_tar(archive, dest)?,
    }

    Ok(format)
}

fn extract_tar(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    let mut reader = BufReader::new(file);

    let gzipped = reader
        .fill_buf()
        .map_err(|e| Error::io(archive, e))?
        .starts_with(&GZIP_MAGIC);

    let unpacked = if gzipped {
        tar::Archive::new(GzDecoder::new(reader)).unpack(dest)
    } else {
        tar::Archive::new(reader).unpack(dest)
    };

    unpacked.map_err(|e| Error::ExtractionFailed {
        path: archive.to_path_buf(),
        message: e.to_string(),
    })
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    let to_error = |e: zip::result::ZipError| Error::ExtractionFailed {
        path: archive.to_path_buf(),
        message: e.to_string(),
    };

    let mut zip = zip::ZipArchive::new(BufReader::new(file)).map_err(to_error)?;
    zip.extract(dest).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap()
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_format_from_supported_suffixes() {
        let cases = [
            ("pkg.zip", ArchiveFormat::Zip),
            ("pkg.tar", ArchiveFormat::Tar),
            ("pkg.tar.gz", ArchiveFormat::TarGz),
            ("pkg.tgz", ArchiveFormat::TarGz),
            ("/tmp/x/autodock_linux.tar.gz", ArchiveFormat::TarGz),
        ];
        for (name, expected) in cases {
            assert_eq!(ArchiveFormat::from_path(Path::new(name)).unwrap(), expected);
        }
        assert!(ArchiveFormat::TarGz.is_tar());
        assert!(!ArchiveFormat::Zip.is_tar());
    }

    #[test]
    fn test_format_rejects_other_suffixes() {
        for name in ["pkg.rar", "pkg.7z", "pkg.gz", "pkg", "zip"] {
            let result = ArchiveFormat::from_path(Path::new(name));
            assert!(
                matches!(result, Err(Error::UnsupportedArchive(_))),
                "{} should be unsupported",
                name
            );
        }
    }

    #[test]
    fn test_extract_unsupported_does_not_touch_dest() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("pkg.rar");
        fs::write(&archive, b"not an archive").unwrap();
        let dest = temp.path().join("out");

        assert!(extract(&archive, &dest).is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_extract_targz_creates_dest() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("suite.tgz");
        fs::write(
            &archive,
            gzip(&tar_bytes(&[("autodock4", b"dock"), ("autogrid4", b"grid")])),
        )
        .unwrap();
        let dest = temp.path().join("nested").join("out");

        let format = extract(&archive, &dest).unwrap();
        assert_eq!(format, ArchiveFormat::TarGz);
        assert_eq!(fs::read(dest.join("autodock4")).unwrap(), b"dock");
        assert_eq!(fs::read(dest.join("autogrid4")).unwrap(), b"grid");
    }

    #[test]
    fn test_extract_plain_tar_with_subdir() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("autodock_mac.tar");
        fs::write(&archive, tar_bytes(&[("MacOSX/autodock4", b"mac dock")])).unwrap();
        let dest = temp.path().join("out");

        extract(&archive, &dest).unwrap();
        assert_eq!(
            fs::read(dest.join("MacOSX").join("autodock4")).unwrap(),
            b"mac dock"
        );
    }

    #[test]
    fn test_extract_gzipped_content_named_tar() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("compressed.tar");
        fs::write(&archive, gzip(&tar_bytes(&[("autogrid4", b"grid")]))).unwrap();
        let dest = temp.path().join("out");

        let format = extract(&archive, &dest).unwrap();
        assert_eq!(format, ArchiveFormat::Tar);
        assert_eq!(fs::read(dest.join("autogrid4")).unwrap(), b"grid");
    }

    #[test]
    fn test_extract_zip() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("suite.zip");
        {
            let file = File::create(&archive).unwrap();
            let mut zip = zip::ZipWriter::new(file);
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            zip.start_file("bin/autodock4", options).unwrap();
            zip.write_all(b"zip dock").unwrap();
            zip.finish().unwrap();
        }
        let dest = temp.path().join("out");

        let format = extract(&archive, &dest).unwrap();
        assert_eq!(format, ArchiveFormat::Zip);
        assert_eq!(fs::read(dest.join("bin").join("autodock4")).unwrap(), b"zip dock");
    }

    #[test]
    fn test_extract_corrupt_targz() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.tar.gz");
        fs::write(&archive, [0x1f, 0x8b, 0x00, 0x01, 0x02]).unwrap();

        let result = extract(&archive, &temp.path().join("out"));
        assert!(matches!(result, Err(Error::ExtractionFailed { .. })));
    }
}
