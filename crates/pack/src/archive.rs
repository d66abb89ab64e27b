//! Opened theme-package archives.

use crate::error::{ErrorKind, Result};
use crate::file::{PackFile, map_io_error};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::instrument;
use zip::ZipArchive;
use zip::result::ZipError;

/// An opened theme package.
///
/// Wraps the zip archive together with the [`PackFile`] identity it was
/// opened from. Entry names are captured once at open time (central-directory
/// order), so probing never touches the reader - only [`read_entry`] and
/// [`extract_entry`] do I/O.
///
/// [`read_entry`]: Self::read_entry
/// [`extract_entry`]: Self::extract_entry
pub struct ThemePackage {
    meta: PackFile,
    names: Vec<String>,
    archive: ZipArchive<File>,
}

impl ThemePackage {
    /// Open the package at `path` and parse its central directory.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let meta = PackFile::stat(path)?;
        let file = File::open(path).map_err(|e| map_io_error(e, path))?;
        let archive = ZipArchive::new(file).map_err(|e| Self::map_zip_error(e, None))?;
        let names = archive.file_names().map(str::to_string).collect();
        Ok(Self { meta, names, archive })
    }

    /// Identity and filesystem metadata of the backing archive.
    pub fn meta(&self) -> &PackFile {
        &self.meta
    }

    /// Every entry name in the archive, central-directory order.
    pub fn entry_names(&self) -> &[String] {
        &self.names
    }

    /// Returns `true` if the archive contains an entry with exactly `name`.
    pub fn has_entry(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Read the full contents of one entry.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|e| Self::map_zip_error(e, Some(name)))?;
        let mut buffer = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut buffer).map_err(ErrorKind::Io)?;
        Ok(buffer)
    }

    /// Read one entry, or `None` if the archive has no entry with that name.
    ///
    /// Probe-style counterpart to [`read_entry`](Self::read_entry): absence
    /// is an expected answer, every other failure still raises.
    pub fn read_entry_opt(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        if !self.has_entry(name) {
            return Ok(None);
        }
        self.read_entry(name).map(Some)
    }

    /// Stream one entry to `dest` on the filesystem, creating parent
    /// directories as needed.
    #[instrument(skip(self, dest), fields(package = %self.meta.file_name, dest = %dest.as_ref().display()))]
    pub fn extract_entry(&mut self, name: &str, dest: impl AsRef<Path>) -> Result<()> {
        let dest = dest.as_ref();
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|e| Self::map_zip_error(e, Some(name)))?;
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(ErrorKind::Io)?;
        }
        let mut out = File::create(dest).map_err(|e| map_io_error(e, dest))?;
        std::io::copy(&mut entry, &mut out).map_err(ErrorKind::Io)?;
        Ok(())
    }

    fn map_zip_error(e: ZipError, entry: Option<&str>) -> ErrorKind {
        match e {
            ZipError::FileNotFound => ErrorKind::MissingEntry(entry.unwrap_or("<unnamed>").to_string()),
            ZipError::Io(io) => ErrorKind::Io(io),
            other => ErrorKind::InvalidArchive(other.to_string()),
        }
    }
}

impl std::fmt::Debug for ThemePackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePackage")
            .field("meta", &self.meta)
            .field("entries", &self.names.len())
            .finish()
    }
}
