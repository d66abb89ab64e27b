//! Element classification from an archive's entry table.

use crate::consts::{
    BOOT_ANIMATION_DIR, CONTACTS_DIR, DIALER_DIR, FONTS_DIR, FRAMEWORK_DIR, ICONS_DIR, LOCKSCREEN_ENTRIES, MMS_DIR,
    NOTIFICATION_ENTRY, RINGTONE_ENTRY, SYSTEM_UI_DIR, WALLPAPER_ENTRIES,
};
use derive_more::{Display, Error};
use std::str::FromStr;

/// Which themeable assets a package provides, one flag per capability.
///
/// Classified purely from the archive's entry names; no entry contents are
/// read. The flags are stored denormalized in the catalog so that per-element
/// browsing is a plain column filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Elements {
    /// Home screen wallpaper image
    pub wallpaper: bool,
    /// Lock screen wallpaper image
    pub lockscreen: bool,
    /// Launcher icon pack
    pub icons: bool,
    /// Contacts app skin
    pub contacts: bool,
    /// Dialer app skin
    pub dialer: bool,
    /// System UI skin
    pub system_ui: bool,
    /// Framework resource overlay
    pub framework: bool,
    /// Call ringtone audio
    pub ringtone: bool,
    /// Notification sound audio
    pub notification: bool,
    /// Boot animation
    pub boot_animation: bool,
    /// Messaging app skin
    pub mms: bool,
    /// Font replacements
    pub fonts: bool,
}

impl Elements {
    /// Classify a package from its entry names.
    pub fn classify<S: AsRef<str>>(entry_names: &[S]) -> Self {
        Self {
            wallpaper: WALLPAPER_ENTRIES.iter().any(|e| has_entry(entry_names, e)),
            lockscreen: LOCKSCREEN_ENTRIES.iter().any(|e| has_entry(entry_names, e)),
            icons: has_dir(entry_names, ICONS_DIR),
            contacts: has_dir(entry_names, CONTACTS_DIR),
            dialer: has_dir(entry_names, DIALER_DIR),
            system_ui: has_dir(entry_names, SYSTEM_UI_DIR),
            framework: has_dir(entry_names, FRAMEWORK_DIR),
            ringtone: has_entry(entry_names, RINGTONE_ENTRY),
            notification: has_entry(entry_names, NOTIFICATION_ENTRY),
            boot_animation: has_dir(entry_names, BOOT_ANIMATION_DIR),
            mms: has_dir(entry_names, MMS_DIR),
            fonts: has_dir(entry_names, FONTS_DIR),
        }
    }

    /// A package is complete when it can reskin the whole system surface:
    /// system UI, framework resources, messaging, and contacts.
    pub fn is_complete(&self) -> bool {
        self.system_ui && self.framework && self.mms && self.contacts
    }

    /// Whether this package provides the given element category.
    pub fn provides(&self, element: Element) -> bool {
        match element {
            Element::Icons => self.icons,
            Element::Wallpaper => self.wallpaper,
            Element::SystemUi => self.system_ui,
            Element::Framework => self.framework,
            Element::Lockscreen => self.lockscreen,
            Element::Ringtones => self.ringtone || self.notification,
            Element::BootAnimation => self.boot_animation,
            Element::Mms => self.mms,
        }
    }

    /// Element categories this package provides, in canonical order.
    pub fn provided(&self) -> Vec<Element> {
        Element::ALL.into_iter().filter(|e| self.provides(*e)).collect()
    }
}

/// User-facing element categories a catalog can be browsed by.
///
/// Narrower than the full flag set: the dialer and font capabilities have no
/// browse category of their own, and both sound flags fold into
/// [`Ringtones`](Self::Ringtones).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    #[display("icons")]
    Icons,
    #[display("wallpaper")]
    Wallpaper,
    #[display("systemui")]
    SystemUi,
    #[display("framework")]
    Framework,
    #[display("lockscreen")]
    Lockscreen,
    #[display("ringtones")]
    Ringtones,
    #[display("bootanimation")]
    BootAnimation,
    #[display("mms")]
    Mms,
}

impl Element {
    /// Every category, canonical order.
    pub const ALL: [Element; 8] = [
        Element::Icons,
        Element::Wallpaper,
        Element::SystemUi,
        Element::Framework,
        Element::Lockscreen,
        Element::Ringtones,
        Element::BootAnimation,
        Element::Mms,
    ];

    /// Human-readable label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Element::Icons => "Icons",
            Element::Wallpaper => "Wallpaper",
            Element::SystemUi => "System UI",
            Element::Framework => "Framework",
            Element::Lockscreen => "Lock screen",
            Element::Ringtones => "Ringtones",
            Element::BootAnimation => "Boot animation",
            Element::Mms => "Messaging",
        }
    }
}

/// Parse failure for [`Element::from_str`].
#[derive(Debug, Display, Error)]
#[display("unknown element category: {_0}")]
pub struct UnknownElement(#[error(not(source))] String);

impl FromStr for Element {
    type Err = UnknownElement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "icons" => Ok(Element::Icons),
            "wallpaper" => Ok(Element::Wallpaper),
            "systemui" => Ok(Element::SystemUi),
            "framework" => Ok(Element::Framework),
            "lockscreen" => Ok(Element::Lockscreen),
            "ringtones" => Ok(Element::Ringtones),
            "bootanimation" => Ok(Element::BootAnimation),
            "mms" => Ok(Element::Mms),
            other => Err(UnknownElement(other.to_string())),
        }
    }
}

fn has_entry<S: AsRef<str>>(names: &[S], name: &str) -> bool {
    names.iter().any(|n| n.as_ref() == name)
}

/// Directory presence: an explicit directory entry (`name/`), an exact entry,
/// or anything nested under `name/`. Archives written without explicit
/// directory entries still classify through the nested match.
fn has_dir<S: AsRef<str>>(names: &[S], name: &str) -> bool {
    let prefix = format!("{name}/");
    names.iter().any(|n| {
        let n = n.as_ref();
        n == name || n.starts_with(&prefix)
    })
}
