mod theme;

pub(crate) use self::theme::ThemeRow;

use veneer_extract::Manifest;
use veneer_pack::PackFile;

/// One catalog record: a package file and the manifest extracted from it.
///
/// `id` is the stable row identifier; `file.file_name` is the unique key
/// records are ingested and deleted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub file: PackFile,
    pub manifest: Manifest,
}

impl Entry {
    /// Display title for listings: the descriptor title, falling back to the
    /// package file name.
    pub fn title(&self) -> &str {
        self.manifest.descriptor.title.as_deref().unwrap_or(&self.file.file_name)
    }
}
