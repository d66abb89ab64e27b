//! Theme removal and catalog pruning.

use crate::error::{ErrorKind, Result};
use crate::stage::Stage;
use exn::ResultExt;
use tracing::{info, instrument, warn};
use veneer_cache::{Entry, Repository};

/// Remove a theme: catalog record, backing archive, staged assets.
///
/// The record goes first so a half-failed removal leaves an uncataloged file
/// rather than a record pointing at nothing. A backing file that is already
/// gone is fine; any other filesystem failure surfaces as an error - but the
/// record stays deleted either way.
#[instrument(skip_all, fields(file_name = %entry.file.file_name))]
pub async fn remove(repo: &Repository, stage: &Stage, entry: &Entry) -> Result<()> {
    repo.delete_by_file_name(&entry.file.file_name).await.or_raise(|| ErrorKind::Catalog)?;
    match tokio::fs::remove_file(&entry.file.path).await {
        Ok(()) => {},
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %entry.file.path.display(), "backing archive was already gone");
        },
        Err(err) => return Err(exn::Exn::from(ErrorKind::Io(err))),
    }
    stage.remove_dir(entry.file.stem()).await?;
    info!(file_name = %entry.file.file_name, "removed theme");
    Ok(())
}

/// Drop catalog records whose backing archive no longer exists.
///
/// Returns the file names removed. Only a definite "not there" counts;
/// an archive that merely can't be inspected right now is left cataloged.
#[instrument(skip_all)]
pub async fn prune(repo: &Repository) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for file_name in repo.list_file_names().await.or_raise(|| ErrorKind::Catalog)? {
        let Some(entry) = repo.get_by_file_name(&file_name).await.or_raise(|| ErrorKind::Catalog)? else {
            continue;
        };
        if matches!(tokio::fs::try_exists(&entry.file.path).await, Ok(false)) {
            repo.delete_by_file_name(&file_name).await.or_raise(|| ErrorKind::Catalog)?;
            info!(file_name = %file_name, "pruned record for missing archive");
            removed.push(file_name);
        }
    }
    Ok(removed)
}
