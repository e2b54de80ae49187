//! Heading style catalog.
//!
//! The fixed character and paragraph attributes of heading levels 1 to 5.

use crate::ooxml::docx::enums::WdParagraphAlignment;
use serde::Serialize;

/// UI names of heading styles start with this prefix.
pub const HEADING_PREFIX: &str = "Heading ";

/// Formatting of one heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleCatalogEntry {
    pub level: u8,
    pub bold: bool,
    pub italic: bool,
    pub alignment: WdParagraphAlignment,
}

impl StyleCatalogEntry {
    /// UI name of the style, e.g. "Heading 3".
    pub fn style_name(&self) -> String {
        heading_style_name(u32::from(self.level))
    }
}

/// Catalog entries, ordered by level.
pub static HEADING_CATALOG: [StyleCatalogEntry; 5] = [
    StyleCatalogEntry {
        level: 1,
        bold: true,
        italic: false,
        alignment: WdParagraphAlignment::Center,
    },
    StyleCatalogEntry {
        level: 2,
        bold: true,
        italic: false,
        alignment: WdParagraphAlignment::Left,
    },
    StyleCatalogEntry {
        level: 3,
        bold: true,
        italic: true,
        alignment: WdParagraphAlignment::Left,
    },
    StyleCatalogEntry {
        level: 4,
        bold: false,
        italic: true,
        alignment: WdParagraphAlignment::Left,
    },
    StyleCatalogEntry {
        level: 5,
        bold: false,
        italic: true,
        alignment: WdParagraphAlignment::Left,
    },
];

/// Look up the formatting of a heading level. Levels outside 1..=5 have
/// no entry.
pub fn lookup(level: u8) -> Option<&'static StyleCatalogEntry> {
    HEADING_CATALOG.iter().find(|entry| entry.level == level)
}

#[inline]
pub fn entries() -> impl Iterator<Item = &'static StyleCatalogEntry> {
    HEADING_CATALOG.iter()
}

pub fn heading_style_name(level: u32) -> String {
    format!("{HEADING_PREFIX}{level}")
}

/// Level of a heading style that may be created on demand: `"Heading "`
/// followed by a positive decimal number and nothing else.
pub fn creatable_heading_level(style_name: &str) -> Option<u32> {
    let digits = style_name.strip_prefix(HEADING_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|level| *level > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let levels: Vec<u8> = entries().map(|e| e.level).collect();
        assert_eq!(levels, [1, 2, 3, 4, 5]);

        let h1 = lookup(1).unwrap();
        assert!(h1.bold && !h1.italic);
        assert_eq!(h1.alignment, WdParagraphAlignment::Center);
        let h3 = lookup(3).unwrap();
        assert!(h3.bold && h3.italic);
        let h5 = lookup(5).unwrap();
        assert!(!h5.bold && h5.italic);
        assert_eq!(h5.alignment, WdParagraphAlignment::Left);

        assert!(lookup(0).is_none());
        assert!(lookup(6).is_none());
        assert_eq!(h3.style_name(), "Heading 3");
    }

    #[test]
    fn test_creatable_heading_level() {
        assert_eq!(creatable_heading_level("Heading 9"), Some(9));
        assert_eq!(creatable_heading_level("Heading 12"), Some(12));
        assert_eq!(creatable_heading_level("Heading 0"), None);
        assert_eq!(creatable_heading_level("Heading +3"), None);
        assert_eq!(creatable_heading_level("Heading Custom"), None);
        assert_eq!(creatable_heading_level("Heading "), None);
        assert_eq!(creatable_heading_level("heading 3"), None);
        assert_eq!(creatable_heading_level("Nonexistent"), None);
    }
}
