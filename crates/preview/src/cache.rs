//! The weak-referenced thumbnail cache.

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use image::DynamicImage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::oneshot;
use tracing::{debug, instrument};
use veneer_cache::Entry;
use veneer_extract::consts::DEFAULT_THUMBNAIL_ENTRY;
use veneer_pack::ThemePackage;

/// The decoded, downscaled preview image for one theme.
#[derive(Debug)]
pub struct Thumbnail {
    image: DynamicImage,
}

impl Thumbnail {
    /// The decoded image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// In-memory thumbnail cache keyed by package file name.
///
/// Values are held as [`Weak`] references: the cache memoizes thumbnails for
/// as long as *someone else* is using them, but never keeps one alive by
/// itself. A grid that drops its images drops the memory too; the next fetch
/// decodes afresh.
#[derive(Debug, Default)]
pub struct PreviewCache {
    map: Mutex<HashMap<String, Weak<Thumbnail>>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the thumbnail for a cataloged theme, decoding it on a miss.
    ///
    /// Synchronous and blocking (archive reads plus image decoding) - call it
    /// from a worker thread, or use [`fetch_detached`](Self::fetch_detached)
    /// from async code.
    ///
    /// The preview entry is the conventional launcher preview when the
    /// archive carries one, otherwise the first name in the record's preview
    /// list. The decoded image is downscaled to half its dimensions; grid
    /// cells don't need more.
    #[instrument(skip_all, fields(file_name = %entry.file.file_name))]
    pub fn fetch(&self, entry: &Entry) -> Result<Arc<Thumbnail>> {
        let key = &entry.file.file_name;
        if let Some(thumbnail) = self.lookup(key) {
            debug!("thumbnail cache hit");
            return Ok(thumbnail);
        }

        let mut package = ThemePackage::open(&entry.file.path).or_raise(|| ErrorKind::Package)?;
        let name = select_entry(&package, entry).ok_or_raise(|| ErrorKind::NoPreview(key.clone()))?;
        let bytes = package.read_entry(&name).or_raise(|| ErrorKind::Package)?;
        let image = image::load_from_memory(&bytes).map_err(|e| ErrorKind::Decode(e.to_string()))?;
        let image = image.thumbnail((image.width() / 2).max(1), (image.height() / 2).max(1));
        debug!(entry = %name, width = image.width(), height = image.height(), "decoded thumbnail");

        let thumbnail = Arc::new(Thumbnail { image });
        self.lock().insert(key.clone(), Arc::downgrade(&thumbnail));
        Ok(thumbnail)
    }

    /// Fetch on a blocking worker, delivering the result over a channel.
    ///
    /// The caller gets the receiver immediately; a dropped receiver simply
    /// discards the result. This is the path UI-side consumers use to fill a
    /// grid without stalling on archive I/O.
    pub fn fetch_detached(self: &Arc<Self>, entry: Entry) -> oneshot::Receiver<Result<Arc<Thumbnail>>> {
        let (tx, rx) = oneshot::channel();
        let cache = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            // Nobody listening is not an error.
            _ = tx.send(cache.fetch(&entry));
        });
        rx
    }

    /// Number of map slots, live or dead.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop slots whose thumbnails have been deallocated; returns the live
    /// count. Dead [`Weak`]s otherwise accumulate until the same theme is
    /// fetched again.
    pub fn purge(&self) -> usize {
        let mut map = self.lock();
        map.retain(|_, weak| weak.strong_count() > 0);
        map.len()
    }

    fn lookup(&self, key: &str) -> Option<Arc<Thumbnail>> {
        self.lock().get(key).and_then(Weak::upgrade)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Weak<Thumbnail>>> {
        // A poisoned map only means another fetch panicked mid-insert; the
        // cached weak references themselves are still sound.
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pick the archive entry to thumbnail: the conventional launcher preview if
/// present, else the record's first preview name.
fn select_entry(package: &ThemePackage, entry: &Entry) -> Option<String> {
    if package.has_entry(DEFAULT_THUMBNAIL_ENTRY) {
        return Some(DEFAULT_THUMBNAIL_ENTRY.to_string());
    }
    entry.manifest.previews.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use time::{OffsetDateTime, UtcDateTime};
    use veneer_extract::{Descriptor, Elements, Manifest};
    use veneer_pack::PackFile;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([40, 80, 120, 255]),
        ));
        let mut cursor = std::io::Cursor::new(Vec::new());
        img.write_to(&mut cursor, image::ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    fn write_package(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join(name);
        let mut writer = ZipWriter::new(std::fs::File::create(&path).unwrap());
        let options = SimpleFileOptions::default();
        for (entry_name, data) in entries {
            writer.start_file(*entry_name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    fn make_entry(path: &Path, previews: &[&str]) -> Entry {
        Entry {
            id: 1,
            file: PackFile {
                file_name: path.file_name().unwrap().to_str().unwrap().to_string(),
                path: path.to_path_buf(),
                size: 0,
                modified: OffsetDateTime::UNIX_EPOCH,
            },
            manifest: Manifest {
                descriptor: Descriptor::default(),
                elements: Elements::default(),
                previews: previews.iter().map(|p| p.to_string()).collect(),
                extracted_at: UtcDateTime::from_unix_timestamp(0).unwrap(),
            },
        }
    }

    #[test]
    fn test_fetch_decodes_and_downscales() {
        let dir = tempfile::tempdir().unwrap();
        let png = png_bytes(8, 6);
        let path = write_package(dir.path(), "oceanic.zip", &[("preview/preview_launcher_0.png", &png)]);
        let entry = make_entry(&path, &["preview/preview_launcher_0.png"]);
        let cache = PreviewCache::new();
        let thumbnail = cache.fetch(&entry).unwrap();
        assert_eq!((thumbnail.width(), thumbnail.height()), (4, 3));
    }

    #[test]
    fn test_fetch_memoizes_while_alive() {
        let dir = tempfile::tempdir().unwrap();
        let png = png_bytes(8, 8);
        let path = write_package(dir.path(), "oceanic.zip", &[("preview/preview_launcher_0.png", &png)]);
        let entry = make_entry(&path, &[]);
        let cache = PreviewCache::new();
        let first = cache.fetch(&entry).unwrap();
        let second = cache.fetch(&entry).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.purge(), 1);
    }

    #[test]
    fn test_cache_holds_nothing_alive() {
        let dir = tempfile::tempdir().unwrap();
        let png = png_bytes(8, 8);
        let path = write_package(dir.path(), "oceanic.zip", &[("preview/preview_launcher_0.png", &png)]);
        let entry = make_entry(&path, &[]);
        let cache = PreviewCache::new();
        let first = cache.fetch(&entry).unwrap();
        drop(first);
        // Slot is still there, but dead
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge(), 0);
        // A refetch decodes a fresh thumbnail
        let again = cache.fetch(&entry).unwrap();
        assert_eq!(again.width(), 4);
    }

    #[test]
    fn test_fetch_falls_back_to_preview_list() {
        let dir = tempfile::tempdir().unwrap();
        let png = png_bytes(6, 6);
        let path = write_package(dir.path(), "oceanic.zip", &[("art/preview_home_0.png", &png)]);
        let entry = make_entry(&path, &["art/preview_home_0.png"]);
        let cache = PreviewCache::new();
        let thumbnail = cache.fetch(&entry).unwrap();
        assert_eq!(thumbnail.width(), 3);
    }

    #[test]
    fn test_fetch_no_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_package(dir.path(), "plain.zip", &[("description.xml", b"<veneer-theme/>")]);
        let entry = make_entry(&path, &[]);
        let cache = PreviewCache::new();
        let err = cache.fetch(&entry).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NoPreview(name) if name == "plain.zip"));
    }

    #[test]
    fn test_fetch_undecodable_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_package(dir.path(), "bad.zip", &[("preview/preview_launcher_0.png", b"not a png")]);
        let entry = make_entry(&path, &["preview/preview_launcher_0.png"]);
        let cache = PreviewCache::new();
        let err = cache.fetch(&entry).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_detached() {
        let dir = tempfile::tempdir().unwrap();
        let png = png_bytes(10, 4);
        let path = write_package(dir.path(), "oceanic.zip", &[("preview/preview_launcher_0.png", &png)]);
        let entry = make_entry(&path, &[]);
        let cache = Arc::new(PreviewCache::new());
        let thumbnail = cache.fetch_detached(entry).await.unwrap().unwrap();
        assert_eq!((thumbnail.width(), thumbnail.height()), (5, 2));
        assert_eq!(cache.purge(), 1);
    }
}
