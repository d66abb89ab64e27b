use crate::error::{ErrorKind, Result};
use crate::scan::file::{Ingest, ingest_file};
use async_stream::stream;
use futures::Stream;
use std::path::{Path, PathBuf};
use tracing::warn;
use veneer_cache::Repository;

/// Progress events yielded by [`scan`].
#[derive(Debug)]
pub enum ScanEvent {
    Started,
    /// A package file was found in the themes directory.
    Discovered { path: PathBuf },
    /// The package was ingested (or confirmed current).
    Ingested(Box<Ingest>),
    /// The package could not be ingested and was skipped.
    Rejected { path: PathBuf, reason: String },
    /// The scan finished; counts cover this run only.
    Complete { ingested: u64, rejected: u64 },
}

/// Scan a themes directory, ingesting every package in it.
///
/// Looks at regular files with the package extension directly inside
/// `themes_dir` (packages don't nest). Individually broken packages - a
/// corrupt archive, a missing or malformed descriptor - are reported as
/// [`ScanEvent::Rejected`] and skipped; the scan itself keeps going. Only
/// infrastructure failures (catalog unavailable, worker loss) end the stream
/// with an error. A themes directory that doesn't exist yet yields an empty,
/// successful scan.
pub fn scan<'a>(repo: &'a Repository, themes_dir: impl AsRef<Path> + 'a) -> impl Stream<Item = Result<ScanEvent>> + 'a {
    stream! {
        yield Ok(ScanEvent::Started);
        let dir = themes_dir.as_ref();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                yield Ok(ScanEvent::Complete { ingested: 0, rejected: 0 });
                return;
            },
            Err(err) => {
                yield Err(exn::Exn::from(ErrorKind::Io(err)));
                return;
            },
        };

        let mut ingested = 0u64;
        let mut rejected = 0u64;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    yield Err(exn::Exn::from(ErrorKind::Io(err)));
                    return;
                },
            };
            let path = entry.path();
            if !veneer_pack::is_package(&path) {
                continue;
            }
            match entry.file_type().await {
                Ok(file_type) if file_type.is_file() => {},
                // Directories named like packages, broken symlinks: not ours.
                _ => continue,
            }
            yield Ok(ScanEvent::Discovered { path: path.clone() });
            match ingest_file(repo, &path).await {
                Ok(ingest) => {
                    ingested += 1;
                    yield Ok(ScanEvent::Ingested(Box::new(ingest)));
                },
                // Catalog and worker failures would hit every remaining
                // package too; stop instead of spamming rejections.
                Err(err) if matches!(&*err, ErrorKind::Catalog | ErrorKind::Task | ErrorKind::MissingRecord) => {
                    yield Err(err);
                    return;
                },
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping package");
                    rejected += 1;
                    yield Ok(ScanEvent::Rejected { path, reason: err.to_string() });
                },
            }
        }
        yield Ok(ScanEvent::Complete { ingested, rejected });
    }
}
