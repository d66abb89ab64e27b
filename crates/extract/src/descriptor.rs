//! Descriptor (`description.xml`) parsing.

use crate::consts::NATIVE_ROOT;
use crate::error::{ErrorKind, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::instrument;

/// Display metadata parsed from a package descriptor.
///
/// Every field is optional: foreign packages routinely omit some of them and
/// the catalog stores whatever was present. [`native`](Self::native) records
/// whether the descriptor's root element identifies a package authored for
/// this manager, as opposed to a converted or legacy one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub title: Option<String>,
    pub designer: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub ui_version: Option<String>,
    pub native: bool,
}

impl Descriptor {
    /// Parse a descriptor from raw bytes.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected;
    /// descriptors in the wild are not reliably well-encoded. A document with
    /// no start tag at all (or XML the parser chokes on) is
    /// [`ErrorKind::MalformedDescriptor`].
    ///
    /// Recognized child elements may appear anywhere below the root; unknown
    /// elements are skipped. Elements with blank text leave their field
    /// `None`.
    #[instrument(skip(bytes), fields(size = bytes.as_ref().len()))]
    pub fn parse(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let text = String::from_utf8_lossy(bytes.as_ref());
        let mut reader = Reader::from_str(&text);
        reader.config_mut().trim_text(true);

        let mut descriptor = Self::default();
        let mut root_seen = false;
        loop {
            match reader.read_event() {
                // An empty element (`<veneer-theme/>`) still counts as the
                // document's start tag; as a child it has no text to capture.
                Ok(Event::Empty(start)) => {
                    if !root_seen {
                        root_seen = true;
                        descriptor.native = start.name().as_ref() == NATIVE_ROOT.as_bytes();
                    }
                },
                Ok(Event::Start(start)) => {
                    if !root_seen {
                        root_seen = true;
                        descriptor.native = start.name().as_ref() == NATIVE_ROOT.as_bytes();
                        continue;
                    }
                    let name = start.name();
                    let slot = match name.as_ref() {
                        b"title" => &mut descriptor.title,
                        b"designer" => &mut descriptor.designer,
                        b"author" => &mut descriptor.author,
                        b"version" => &mut descriptor.version,
                        b"uiVersion" => &mut descriptor.ui_version,
                        _ => continue,
                    };
                    let value = reader
                        .read_text(name)
                        .map_err(|e| ErrorKind::MalformedDescriptor(e.to_string()))?;
                    let value = value.trim();
                    if !value.is_empty() {
                        *slot = Some(value.to_string());
                    }
                },
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => exn::bail!(ErrorKind::MalformedDescriptor(e.to_string())),
            }
        }
        if !root_seen {
            exn::bail!(ErrorKind::MalformedDescriptor("no start tag found".to_string()));
        }
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FULL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <veneer-theme>
            <title>Oceanic</title>
            <designer>Mira Voss</designer>
            <author>driftworks</author>
            <version>1.4</version>
            <uiVersion>5</uiVersion>
        </veneer-theme>"#;

    #[test]
    fn test_parse_full_descriptor() {
        let descriptor = Descriptor::parse(FULL.as_bytes()).unwrap();
        assert_eq!(descriptor.title.as_deref(), Some("Oceanic"));
        assert_eq!(descriptor.designer.as_deref(), Some("Mira Voss"));
        assert_eq!(descriptor.author.as_deref(), Some("driftworks"));
        assert_eq!(descriptor.version.as_deref(), Some("1.4"));
        assert_eq!(descriptor.ui_version.as_deref(), Some("5"));
        assert!(descriptor.native);
    }

    #[test]
    fn test_parse_foreign_root() {
        let xml = "<some-other-format><title>Imported</title></some-other-format>";
        let descriptor = Descriptor::parse(xml.as_bytes()).unwrap();
        assert!(!descriptor.native);
        assert_eq!(descriptor.title.as_deref(), Some("Imported"));
    }

    #[test]
    fn test_parse_missing_fields_stay_none() {
        let xml = "<veneer-theme><title>Minimal</title></veneer-theme>";
        let descriptor = Descriptor::parse(xml.as_bytes()).unwrap();
        assert_eq!(descriptor.title.as_deref(), Some("Minimal"));
        assert_eq!(descriptor.designer, None);
        assert_eq!(descriptor.author, None);
        assert_eq!(descriptor.version, None);
        assert_eq!(descriptor.ui_version, None);
    }

    #[test]
    fn test_parse_unknown_elements_ignored() {
        let xml = r#"<veneer-theme>
            <screenshots><item>a.png</item></screenshots>
            <title>Nested</title>
        </veneer-theme>"#;
        let descriptor = Descriptor::parse(xml.as_bytes()).unwrap();
        assert_eq!(descriptor.title.as_deref(), Some("Nested"));
    }

    #[test]
    fn test_parse_blank_text_is_none() {
        let xml = "<veneer-theme><title>   </title><author></author></veneer-theme>";
        let descriptor = Descriptor::parse(xml.as_bytes()).unwrap();
        assert_eq!(descriptor.title, None);
        assert_eq!(descriptor.author, None);
    }

    #[test]
    fn test_parse_invalid_utf8_replaced() {
        let mut bytes = b"<veneer-theme><title>Oce".to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(b"nic</title></veneer-theme>");
        let descriptor = Descriptor::parse(&bytes).unwrap();
        assert_eq!(descriptor.title.as_deref(), Some("Oce\u{FFFD}nic"));
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::whitespace(b"   \n  ".as_slice())]
    #[case::comment_only(b"<!-- nothing here -->".as_slice())]
    fn test_parse_no_start_tag(#[case] bytes: &[u8]) {
        let err = Descriptor::parse(bytes).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedDescriptor(_)));
    }

    #[test]
    fn test_parse_empty_element_root() {
        let descriptor = Descriptor::parse(b"<veneer-theme/>").unwrap();
        assert!(descriptor.native);
        assert_eq!(descriptor.title, None);
    }

    #[test]
    fn test_parse_truncated_document() {
        let err = Descriptor::parse(b"<veneer-theme><title>Oceanic").unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedDescriptor(_)));
    }
}
