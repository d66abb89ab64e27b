use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use std::path::Path;
use tracing::{debug, info, instrument};
use veneer_cache::{Entry, Repository};
use veneer_extract::consts::DESCRIPTOR_ENTRY;
use veneer_pack::{PackFile, ThemePackage};

/// Indicates how much work was required to produce an [`Ingest`] result.
///
/// Distinguishes freshness-gate hits from actual archive work, which is what
/// progress reporting cares about on large theme directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effort {
    /// The catalog record was at least as new as the archive on disk - no
    /// archive I/O or parsing was performed.
    Cached,
    /// The archive was opened, its metadata extracted, and the catalog
    /// record written.
    Processed,
}

/// The result of ingesting a single package.
#[derive(Debug)]
pub struct Ingest {
    /// The stored catalog record for the package.
    pub entry: Entry,
    /// Whether the record came from the freshness gate or a full extraction.
    pub effort: Effort,
}

/// Ingest one theme package into the catalog.
///
/// The freshness gate comes first: if a record already exists for the
/// package's file name and the archive's mtime is not newer than the stored
/// one, the cached record is returned without touching the archive. Otherwise
/// the archive is opened and parsed on a blocking worker (zip and XML are
/// synchronous), and the record is written through
/// [`Repository::upsert`] - replacing any stale one in place.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn ingest_file(repo: &Repository, path: impl AsRef<Path>) -> Result<Ingest> {
    let path = path.as_ref();
    // A bare metadata syscall; not worth a worker thread.
    let file = PackFile::stat(path).or_raise(|| ErrorKind::Package)?;

    if !repo.needs_refresh(&file.file_name, file.modified).await.or_raise(|| ErrorKind::Catalog)? {
        let entry = repo
            .get_by_file_name(&file.file_name)
            .await
            .or_raise(|| ErrorKind::Catalog)?
            .ok_or_raise(|| ErrorKind::MissingRecord)?;
        debug!(file_name = %file.file_name, "catalog record is current; skipping extraction");
        return Ok(Ingest { entry, effort: Effort::Cached });
    }

    let archive_path = file.path.clone();
    let (file, manifest) = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut package = ThemePackage::open(&archive_path).or_raise(|| ErrorKind::Package)?;
        let descriptor = package.read_entry_opt(DESCRIPTOR_ENTRY).or_raise(|| ErrorKind::Package)?;
        let manifest =
            veneer_extract::extract(descriptor.as_deref(), package.entry_names()).or_raise(|| ErrorKind::Extract)?;
        Ok((package.meta().clone(), manifest))
    })
    .await
    .or_raise(|| ErrorKind::Task)??;

    repo.upsert(&file, &manifest).await.or_raise(|| ErrorKind::Catalog)?;
    let entry = repo
        .get_by_file_name(&file.file_name)
        .await
        .or_raise(|| ErrorKind::Catalog)?
        .ok_or_raise(|| ErrorKind::MissingRecord)?;
    info!(file_name = %file.file_name, title = entry.title(), "ingested theme package");
    Ok(Ingest { entry, effort: Effort::Processed })
}
