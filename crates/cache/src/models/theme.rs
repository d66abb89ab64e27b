use crate::error::{Error, ErrorKind};
use crate::models::Entry;
use exn::{OptionExt, ResultExt};
use time::{OffsetDateTime, UtcDateTime};
use veneer_extract::{Descriptor, Elements, Manifest};
use veneer_pack::PackFile;

#[derive(sqlx::FromRow)]
pub(crate) struct ThemeRow {
    pub(crate) id: i64,
    pub(crate) file_name: String,
    pub(crate) path: String,
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) designer: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) ui_version: Option<String>,
    pub(crate) is_native: bool,
    pub(crate) has_wallpaper: bool,
    pub(crate) has_lockscreen: bool,
    pub(crate) has_icons: bool,
    pub(crate) has_contacts: bool,
    pub(crate) has_dialer: bool,
    pub(crate) has_systemui: bool,
    pub(crate) has_framework: bool,
    pub(crate) has_ringtone: bool,
    pub(crate) has_notification: bool,
    pub(crate) has_bootanimation: bool,
    pub(crate) has_mms: bool,
    pub(crate) has_fonts: bool,
    pub(crate) is_complete: bool,
    pub(crate) file_size: i64,
    pub(crate) last_modified: i64,
    pub(crate) previews: String,
    pub(crate) ingested_at: i64,
}

impl ThemeRow {
    /// Build a row for insertion from a package file and its manifest.
    ///
    /// `id` is a placeholder; inserts never bind it. `is_complete` is always
    /// re-derived from the flags here, whatever the caller did upstream.
    pub(crate) fn compose(file: &PackFile, manifest: &Manifest) -> Result<Self, Error> {
        let path = file
            .path
            .to_str()
            .ok_or_raise(|| ErrorKind::InvalidData("path"))?
            .to_string();
        Ok(Self {
            id: 0,
            file_name: file.file_name.clone(),
            path,
            title: manifest.descriptor.title.clone(),
            author: manifest.descriptor.author.clone(),
            designer: manifest.descriptor.designer.clone(),
            version: manifest.descriptor.version.clone(),
            ui_version: manifest.descriptor.ui_version.clone(),
            is_native: manifest.descriptor.native,
            has_wallpaper: manifest.elements.wallpaper,
            has_lockscreen: manifest.elements.lockscreen,
            has_icons: manifest.elements.icons,
            has_contacts: manifest.elements.contacts,
            has_dialer: manifest.elements.dialer,
            has_systemui: manifest.elements.system_ui,
            has_framework: manifest.elements.framework,
            has_ringtone: manifest.elements.ringtone,
            has_notification: manifest.elements.notification,
            has_bootanimation: manifest.elements.boot_animation,
            has_mms: manifest.elements.mms,
            has_fonts: manifest.elements.fonts,
            is_complete: manifest.elements.is_complete(),
            file_size: i64::try_from(file.size).or_raise(|| ErrorKind::InvalidData("file size"))?,
            last_modified: file.modified.unix_timestamp(),
            previews: serde_json::to_string(&manifest.previews).or_raise(|| ErrorKind::InvalidData("previews"))?,
            ingested_at: manifest.extracted_at.unix_timestamp(),
        })
    }
}

impl TryFrom<ThemeRow> for Entry {
    type Error = Error;
    fn try_from(row: ThemeRow) -> Result<Self, Self::Error> {
        let file = PackFile {
            file_name: row.file_name,
            path: row.path.into(),
            size: u64::try_from(row.file_size).or_raise(|| ErrorKind::InvalidData("file size"))?,
            modified: OffsetDateTime::from_unix_timestamp(row.last_modified)
                .or_raise(|| ErrorKind::InvalidData("last modified"))?,
        };
        let manifest = Manifest {
            descriptor: Descriptor {
                title: row.title,
                author: row.author,
                designer: row.designer,
                version: row.version,
                ui_version: row.ui_version,
                native: row.is_native,
            },
            elements: Elements {
                wallpaper: row.has_wallpaper,
                lockscreen: row.has_lockscreen,
                icons: row.has_icons,
                contacts: row.has_contacts,
                dialer: row.has_dialer,
                system_ui: row.has_systemui,
                framework: row.has_framework,
                ringtone: row.has_ringtone,
                notification: row.has_notification,
                boot_animation: row.has_bootanimation,
                mms: row.has_mms,
                fonts: row.has_fonts,
            },
            previews: serde_json::from_str(&row.previews).or_raise(|| ErrorKind::InvalidData("previews"))?,
            extracted_at: UtcDateTime::from_unix_timestamp(row.ingested_at)
                .or_raise(|| ErrorKind::InvalidData("ingested at"))?,
        };
        Ok(Entry { id: row.id, file, manifest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcDateTime;

    fn sample_row() -> ThemeRow {
        ThemeRow {
            id: 7,
            file_name: "oceanic.zip".to_string(),
            path: "/themes/oceanic.zip".to_string(),
            title: Some("Oceanic".to_string()),
            author: Some("driftworks".to_string()),
            designer: None,
            version: Some("1.4".to_string()),
            ui_version: None,
            is_native: true,
            has_wallpaper: true,
            has_lockscreen: false,
            has_icons: true,
            has_contacts: true,
            has_dialer: false,
            has_systemui: true,
            has_framework: true,
            has_ringtone: false,
            has_notification: false,
            has_bootanimation: false,
            has_mms: true,
            has_fonts: false,
            is_complete: true,
            file_size: 4096,
            last_modified: 1_700_000_000,
            previews: r#"["preview/preview_launcher_0.png","wallpaper/default_wallpaper.jpg"]"#.to_string(),
            ingested_at: 1_700_000_100,
        }
    }

    #[test]
    fn test_row_to_model() {
        let entry = Entry::try_from(sample_row()).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.file.file_name, "oceanic.zip");
        assert_eq!(entry.file.size, 4096);
        assert_eq!(entry.manifest.descriptor.title.as_deref(), Some("Oceanic"));
        assert!(entry.manifest.elements.is_complete());
        assert_eq!(entry.manifest.previews.len(), 2);
        assert_eq!(entry.file.modified.unix_timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_row_rejects_bad_previews_json() {
        let mut row = sample_row();
        row.previews = "not json".to_string();
        let err = Entry::try_from(row).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidData("previews")));
    }

    #[test]
    fn test_compose_derives_completeness() {
        let file = PackFile {
            file_name: "oceanic.zip".to_string(),
            path: "/themes/oceanic.zip".into(),
            size: 4096,
            modified: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        };
        let names = [
            "com.android.systemui/",
            "framework-res/",
            "com.android.mms/",
            "com.android.contacts/",
        ];
        let manifest = Manifest {
            descriptor: Descriptor::default(),
            elements: Elements::classify(&names),
            previews: vec![],
            extracted_at: UtcDateTime::now(),
        };
        let row = ThemeRow::compose(&file, &manifest).unwrap();
        assert!(row.is_complete);
        assert_eq!(row.last_modified, 1_700_000_000);
        assert_eq!(row.previews, "[]");
    }
}
