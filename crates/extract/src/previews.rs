//! Preview image enumeration.

use crate::consts::{LOCKSCREEN_ENTRIES, PREVIEW_MARKER, WALLPAPER_ENTRIES};
use crate::elements::Elements;

/// Collect the ordered preview entry list for a package.
///
/// Every entry whose name contains the preview marker, in archive order,
/// followed by the default wallpaper and lock screen wallpaper entries when
/// those elements are present. The appended names are the entries that
/// actually exist in the archive, whichever encoding they use.
pub fn previews<S: AsRef<str>>(entry_names: &[S], elements: &Elements) -> Vec<String> {
    let mut list: Vec<String> = entry_names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| name.contains(PREVIEW_MARKER) && !name.ends_with('/'))
        .map(str::to_string)
        .collect();
    if elements.wallpaper
        && let Some(entry) = first_present(entry_names, &WALLPAPER_ENTRIES)
    {
        list.push(entry);
    }
    if elements.lockscreen
        && let Some(entry) = first_present(entry_names, &LOCKSCREEN_ENTRIES)
    {
        list.push(entry);
    }
    list
}

fn first_present<S: AsRef<str>>(entry_names: &[S], candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|c| entry_names.iter().any(|n| n.as_ref() == **c))
        .map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previews_archive_order() {
        let names = [
            "preview/preview_launcher_1.png",
            "description.xml",
            "preview/preview_launcher_0.png",
            "preview/preview_statusbar_0.png",
        ];
        let elements = Elements::classify(&names);
        assert_eq!(
            previews(&names, &elements),
            vec![
                "preview/preview_launcher_1.png",
                "preview/preview_launcher_0.png",
                "preview/preview_statusbar_0.png",
            ],
        );
    }

    #[test]
    fn test_previews_appends_existing_wallpapers() {
        let names = [
            "preview/preview_launcher_0.png",
            "wallpaper/default_wallpaper.png",
            "wallpaper/default_lock_wallpaper.jpg",
        ];
        let elements = Elements::classify(&names);
        assert_eq!(
            previews(&names, &elements),
            vec![
                "preview/preview_launcher_0.png",
                "wallpaper/default_wallpaper.png",
                "wallpaper/default_lock_wallpaper.jpg",
            ],
        );
    }

    #[test]
    fn test_previews_no_wallpaper_nothing_appended() {
        let names = ["preview/preview_launcher_0.png", "wallpaper/something_else.jpg"];
        let elements = Elements::classify(&names);
        assert_eq!(previews(&names, &elements), vec!["preview/preview_launcher_0.png"]);
    }

    #[test]
    fn test_previews_skips_directory_entries() {
        let names = ["preview_pack/", "preview_pack/preview_home_0.png"];
        let elements = Elements::classify(&names);
        assert_eq!(previews(&names, &elements), vec!["preview_pack/preview_home_0.png"]);
    }

    #[test]
    fn test_previews_empty() {
        let names = ["description.xml", "icons/com.example.png"];
        let elements = Elements::classify(&names);
        assert!(previews(&names, &elements).is_empty());
    }
}
