//! Identity and filesystem metadata for a theme package.

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// File extension that marks a theme package.
pub const PACKAGE_EXTENSION: &str = "zip";

/// Identity and filesystem metadata for one theme package.
///
/// The `file_name` (including extension) is the unique key a package is
/// cataloged under; everything else can be re-derived from the path. Obtained
/// via [`PackFile::stat`], which does not open the archive - freshness checks
/// against the catalog only need the modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackFile {
    /// File name of the archive, e.g. `oceanic.zip`
    pub file_name: String,
    /// Absolute path to the archive on disk
    pub path: PathBuf,
    /// Archive size in bytes
    pub size: u64,
    /// Filesystem modification time
    pub modified: OffsetDateTime,
}

impl PackFile {
    /// Collect identity and metadata for the package at `path` without
    /// opening the archive.
    pub fn stat(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = file_name_of(path)?;
        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(e, path))?;
        if !metadata.is_file() {
            exn::bail!(ErrorKind::InvalidPath(path.to_path_buf()));
        }
        let modified = metadata.modified().map_err(ErrorKind::Io)?.into();
        Ok(Self {
            file_name,
            path: path.to_path_buf(),
            size: metadata.len(),
            modified,
        })
    }

    /// The file name without its extension, used to name per-theme staging
    /// directories.
    pub fn stem(&self) -> &str {
        self.file_name.rsplit_once('.').map_or(self.file_name.as_str(), |(stem, _)| stem)
    }
}

/// Returns `true` if `path` looks like a theme package by extension.
pub fn is_package(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PACKAGE_EXTENSION))
}

pub(crate) fn file_name_of(path: &Path) -> Result<String> {
    Ok(path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_raise(|| ErrorKind::InvalidPath(path.to_path_buf()))?
        .to_string())
}

pub(crate) fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
    match e.kind() {
        std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
        _ => ErrorKind::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_stat_collects_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oceanic.zip");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"stat does not care about content").unwrap();
        let pack = PackFile::stat(&path).unwrap();
        assert_eq!(pack.file_name, "oceanic.zip");
        assert_eq!(pack.path, path);
        assert_eq!(pack.size, 32);
        assert_eq!(pack.stem(), "oceanic");
    }

    #[test]
    fn test_stat_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PackFile::stat(dir.path().join("gone.zip")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_stat_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = PackFile::stat(dir.path()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_is_package() {
        assert!(is_package("themes/oceanic.zip"));
        assert!(is_package("themes/OCEANIC.ZIP"));
        assert!(!is_package("themes/oceanic.tar"));
        assert!(!is_package("themes/oceanic"));
    }

    #[test]
    fn test_stem_without_extension() {
        let pack = PackFile {
            file_name: "bare".to_string(),
            path: PathBuf::from("/themes/bare"),
            size: 0,
            modified: OffsetDateTime::UNIX_EPOCH,
        };
        assert_eq!(pack.stem(), "bare");
    }
}
