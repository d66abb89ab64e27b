//! Metadata extraction for theme packages.
//!
//! Pure functions over descriptor bytes and archive entry names - no I/O
//! happens here. The caller (normally `veneer-library`) reads the archive and
//! hands over:
//!
//! - the raw bytes of the `description.xml` descriptor, parsed into a
//!   [`Descriptor`], and
//! - the entry name table, classified into [`Elements`] capability flags and
//!   a preview image list.
//!
//! The combined result is a [`Manifest`], the unit the catalog stores.

pub mod consts;
mod descriptor;
mod elements;
pub mod error;
mod manifest;
mod previews;

use exn::OptionExt;
use time::UtcDateTime;
use tracing::instrument;

pub use crate::descriptor::Descriptor;
pub use crate::elements::{Element, Elements, UnknownElement};
pub use crate::manifest::Manifest;
pub use crate::previews::previews;

use crate::error::{ErrorKind, Result};

/// Extract a [`Manifest`] from a package's descriptor bytes and entry names.
///
/// `descriptor` is `None` when the archive has no descriptor entry at all;
/// that package is not ingestible ([`ErrorKind::MissingDescriptor`]) - the
/// catalog would have nothing to display for it. Descriptor parse failures
/// propagate as [`ErrorKind::MalformedDescriptor`].
#[instrument(skip_all, fields(entries = entry_names.len(), has_descriptor = descriptor.is_some()))]
pub fn extract<S: AsRef<str>>(descriptor: Option<&[u8]>, entry_names: &[S]) -> Result<Manifest> {
    let descriptor = descriptor.ok_or_raise(|| ErrorKind::MissingDescriptor)?;
    let descriptor = Descriptor::parse(descriptor)?;
    let elements = Elements::classify(entry_names);
    let previews = previews(entry_names, &elements);
    Ok(Manifest {
        descriptor,
        elements,
        previews,
        extracted_at: UtcDateTime::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_combines_descriptor_and_entries() {
        let xml = b"<veneer-theme><title>Oceanic</title></veneer-theme>";
        let names = [
            "description.xml",
            "preview/preview_launcher_0.png",
            "com.android.systemui/",
            "framework-res/",
            "com.android.mms/",
            "com.android.contacts/",
        ];
        let manifest = extract(Some(xml.as_slice()), &names).unwrap();
        assert_eq!(manifest.descriptor.title.as_deref(), Some("Oceanic"));
        assert!(manifest.elements.is_complete());
        assert_eq!(manifest.previews, vec!["preview/preview_launcher_0.png"]);
    }

    #[test]
    fn test_extract_requires_descriptor() {
        let names = ["icons/com.example.png"];
        let err = extract::<&str>(None, &names).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingDescriptor));
    }

    #[test]
    fn test_extract_propagates_parse_failure() {
        let err = extract(Some(b"<!-- no root -->".as_slice()), &["a"]).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedDescriptor(_)));
    }
}
