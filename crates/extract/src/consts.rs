//! Archive layout of a theme package.
//!
//! Entry names are fixed by the package format: a descriptor at the root and
//! one well-known folder or file per themeable element. Classification in
//! [`crate::Elements::classify`] probes exactly these names.

/// Metadata descriptor at the archive root.
pub const DESCRIPTOR_ENTRY: &str = "description.xml";

/// Root element of descriptors authored for this manager. Anything else is
/// treated as a foreign/legacy package.
pub const NATIVE_ROOT: &str = "veneer-theme";

/// Home screen wallpaper, either encoding.
pub const WALLPAPER_ENTRIES: [&str; 2] = ["wallpaper/default_wallpaper.jpg", "wallpaper/default_wallpaper.png"];
/// Lock screen wallpaper, either encoding.
pub const LOCKSCREEN_ENTRIES: [&str; 2] =
    ["wallpaper/default_lock_wallpaper.jpg", "wallpaper/default_lock_wallpaper.png"];

/// Launcher icon pack folder.
pub const ICONS_DIR: &str = "icons";
/// Contacts app skin folder.
pub const CONTACTS_DIR: &str = "com.android.contacts";
/// Dialer app skin folder.
pub const DIALER_DIR: &str = "com.android.dialer";
/// System UI skin folder.
pub const SYSTEM_UI_DIR: &str = "com.android.systemui";
/// Framework resource overlay folder.
pub const FRAMEWORK_DIR: &str = "framework-res";
/// Messaging app skin folder.
pub const MMS_DIR: &str = "com.android.mms";
/// Boot animation folder.
pub const BOOT_ANIMATION_DIR: &str = "boots";
/// Font replacement folder.
pub const FONTS_DIR: &str = "fonts";

/// Call ringtone audio entry.
pub const RINGTONE_ENTRY: &str = "ringtones/ringtone.mp3";
/// Notification sound audio entry.
pub const NOTIFICATION_ENTRY: &str = "ringtones/notification.mp3";

/// Substring that marks an entry as a preview image.
pub const PREVIEW_MARKER: &str = "preview_";
/// Preferred thumbnail entry for the catalog grid.
pub const DEFAULT_THUMBNAIL_ENTRY: &str = "preview/preview_launcher_0.png";
