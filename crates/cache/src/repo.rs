//! Repository for theme catalog records.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{Entry, ThemeRow};
use exn::ResultExt;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::instrument;
use veneer_extract::{Element, Manifest};
use veneer_pack::PackFile;

/// Repository for catalog records.
///
/// One row per package file name. A record is replaced wholesale on
/// re-ingest; partial updates don't exist because every field is re-derived
/// from the archive anyway.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}

impl Repository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace the record for a package file.
    ///
    /// Conflict target is `file_name`: re-ingesting an existing package
    /// updates its row in place, keeping the row id stable.
    #[instrument(skip_all, fields(file_name = %file.file_name))]
    pub async fn upsert(&self, file: &PackFile, manifest: &Manifest) -> Result<()> {
        let row = ThemeRow::compose(file, manifest)?;
        sqlx::query(include_str!("../queries/upsert_theme.sql"))
            .bind(row.file_name)
            .bind(row.path)
            .bind(row.title)
            .bind(row.author)
            .bind(row.designer)
            .bind(row.version)
            .bind(row.ui_version)
            .bind(row.is_native)
            .bind(row.has_wallpaper)
            .bind(row.has_lockscreen)
            .bind(row.has_icons)
            .bind(row.has_contacts)
            .bind(row.has_dialer)
            .bind(row.has_systemui)
            .bind(row.has_framework)
            .bind(row.has_ringtone)
            .bind(row.has_notification)
            .bind(row.has_bootanimation)
            .bind(row.has_mms)
            .bind(row.has_fonts)
            .bind(row.is_complete)
            .bind(row.file_size)
            .bind(row.last_modified)
            .bind(row.previews)
            .bind(row.ingested_at)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    /// Whether the package needs (re-)ingesting.
    ///
    /// `true` when no record exists for `file_name`, or when the stored
    /// modification time is strictly older than `modified`. Equal timestamps
    /// are a cache hit; the archive has not changed.
    pub async fn needs_refresh(&self, file_name: impl AsRef<str>, modified: OffsetDateTime) -> Result<bool> {
        let stored: Option<i64> = sqlx::query_scalar(include_str!("../queries/last_modified.sql"))
            .bind(file_name.as_ref())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(match stored {
            None => true,
            Some(stored) => stored < modified.unix_timestamp(),
        })
    }

    /// Fetch one record by package file name.
    pub async fn get_by_file_name(&self, file_name: impl AsRef<str>) -> Result<Option<Entry>> {
        let row: Option<ThemeRow> = sqlx::query_as(include_str!("../queries/get_by_file_name.sql"))
            .bind(file_name.as_ref())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(Entry::try_from).transpose()
    }

    /// Fetch one record by row id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Entry>> {
        let row: Option<ThemeRow> = sqlx::query_as(include_str!("../queries/get_by_id.sql"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(Entry::try_from).transpose()
    }

    /// Every record, ordered by display title then file name.
    pub async fn list_all(&self) -> Result<Vec<Entry>> {
        let rows: Vec<ThemeRow> = sqlx::query_as(include_str!("../queries/list_all.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(Entry::try_from).collect()
    }

    /// Records providing one element category, same ordering as
    /// [`list_all`](Self::list_all).
    pub async fn list_with_element(&self, element: Element) -> Result<Vec<Entry>> {
        let sql = format!(include_str!("../queries/list_with_element.sql"), predicate = predicate(element));
        let rows: Vec<ThemeRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(Entry::try_from).collect()
    }

    /// Every cataloged package file name, sorted.
    pub async fn list_file_names(&self) -> Result<Vec<String>> {
        sqlx::query_scalar(include_str!("../queries/list_file_names.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)
    }

    /// Delete the record for a package file name.
    ///
    /// Returns `true` if a row was deleted. Only the catalog row: removing
    /// the backing archive is the caller's concern.
    #[instrument(skip_all, fields(file_name = file_name.as_ref()))]
    pub async fn delete_by_file_name(&self, file_name: impl AsRef<str>) -> Result<bool> {
        let result = sqlx::query(include_str!("../queries/delete_by_file_name.sql"))
            .bind(file_name.as_ref())
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of cataloged packages.
    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(include_str!("../queries/count_themes.sql"))
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        u64::try_from(count).or_raise(|| ErrorKind::InvalidData("count"))
    }
}

/// SQL predicate selecting rows that provide one element category.
///
/// The ringtones category is satisfied by either sound flag; every other
/// category maps to a single column.
fn predicate(element: Element) -> &'static str {
    match element {
        Element::Icons => "has_icons = 1",
        Element::Wallpaper => "has_wallpaper = 1",
        Element::SystemUi => "has_systemui = 1",
        Element::Framework => "has_framework = 1",
        Element::Lockscreen => "has_lockscreen = 1",
        Element::Ringtones => "(has_ringtone = 1 OR has_notification = 1)",
        Element::BootAnimation => "has_bootanimation = 1",
        Element::Mms => "has_mms = 1",
    }
}
