//! Extracted-asset staging.
//!
//! Some elements are consumed from the filesystem rather than straight out
//! of the archive - ringtones most of all. The [`Stage`] owns a directory
//! where those assets are unpacked: sounds at the root, everything else in
//! per-theme subdirectories named by the package file stem.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use veneer_extract::consts::{NOTIFICATION_ENTRY, RINGTONE_ENTRY};
use veneer_pack::ThemePackage;

/// File name the call ringtone is staged under.
pub const STAGED_RINGTONE: &str = "ringtone.mp3";
/// File name the notification sound is staged under.
pub const STAGED_NOTIFICATION: &str = "notification.mp3";

/// A staging directory for extracted theme assets.
#[derive(Debug, Clone)]
pub struct Stage {
    root: PathBuf,
}

impl Stage {
    /// Create a stage rooted at `root`. The directory itself is created
    /// lazily by the operations that write into it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The staging root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The staging directory for one theme, named by its package file stem.
    pub fn dir_for(&self, stem: &str) -> PathBuf {
        self.root.join(stem)
    }

    /// Create the staging directory for one theme if it doesn't exist yet.
    pub async fn ensure_dir(&self, stem: &str) -> Result<PathBuf> {
        let dir = self.dir_for(stem);
        if !dir.exists() {
            debug!(dir = %dir.display(), "creating theme staging directory");
            tokio::fs::create_dir_all(&dir).await.map_err(ErrorKind::Io)?;
        }
        Ok(dir)
    }

    /// Remove the staging directory for one theme, if present.
    pub async fn remove_dir(&self, stem: &str) -> Result<()> {
        let dir = self.dir_for(stem);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                debug!(dir = %dir.display(), "removed theme staging directory");
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(exn::Exn::from(ErrorKind::Io(err))),
        }
    }

    /// Remove the entire staging root and everything under it.
    pub async fn remove_all(&self) -> Result<()> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(exn::Exn::from(ErrorKind::Io(err))),
        }
    }

    /// Extract a package's sounds into the staging root.
    ///
    /// Stages whichever of the call ringtone and notification sound entries
    /// the archive carries, under their fixed staged names, and returns the
    /// paths written. A package without sounds stages nothing. Runs on a
    /// blocking worker; zip extraction is synchronous.
    #[instrument(skip(self, package_path), fields(path = %package_path.as_ref().display()))]
    pub async fn stage_ringtones(&self, package_path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let package_path = package_path.as_ref().to_path_buf();
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
            let mut package = ThemePackage::open(&package_path).or_raise(|| ErrorKind::Package)?;
            let mut staged = Vec::new();
            for (entry, staged_name) in [(RINGTONE_ENTRY, STAGED_RINGTONE), (NOTIFICATION_ENTRY, STAGED_NOTIFICATION)] {
                if !package.has_entry(entry) {
                    continue;
                }
                let dest = root.join(staged_name);
                package.extract_entry(entry, &dest).or_raise(|| ErrorKind::Stage)?;
                staged.push(dest);
            }
            Ok(staged)
        })
        .await
        .or_raise(|| ErrorKind::Task)?
    }
}
