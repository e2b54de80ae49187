/// Enumerations for Word document elements.
///
/// The variants mirror the VBA `Wd*` enumerations that python-docx exposes,
/// restricted to the values this crate reads and writes.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Specifies the type of a style.
///
/// Corresponds to the VBA `WdStyleType` enumeration.
///
/// # Examples
///
/// ```rust
/// use restyle::ooxml::docx::enums::WdStyleType;
///
/// let style_type = WdStyleType::Paragraph;
/// assert_eq!(style_type.to_xml(), "paragraph");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WdStyleType {
    /// Paragraph style.
    Paragraph = 1,
    /// Character style.
    Character = 2,
    /// Table style.
    Table = 3,
    /// List (numbering) style.
    List = 4,
}

impl WdStyleType {
    /// Convert the style type to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::List => "numbering",
        }
    }

    /// Parse style type from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::List),
            _ => None,
        }
    }
}

impl Default for WdStyleType {
    /// A `w:style` without `w:type` is a paragraph style.
    #[inline]
    fn default() -> Self {
        Self::Paragraph
    }
}

impl fmt::Display for WdStyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph => write!(f, "paragraph"),
            Self::Character => write!(f, "character"),
            Self::Table => write!(f, "table"),
            Self::List => write!(f, "numbering"),
        }
    }
}

/// Paragraph alignment, the value of `w:jc`.
///
/// Corresponds to the VBA `WdParagraphAlignment` enumeration. `Justify` is
/// written as `both`, the transitional spelling Word itself emits.
///
/// ```rust
/// use restyle::ooxml::docx::enums::WdParagraphAlignment;
///
/// assert_eq!(WdParagraphAlignment::Justify.to_xml(), "both");
/// assert_eq!(WdParagraphAlignment::from_xml("start"), Some(WdParagraphAlignment::Left));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WdParagraphAlignment {
    Left,
    Center,
    Right,
    Justify,
    Distribute,
}

impl WdParagraphAlignment {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
            Self::Distribute => "distribute",
        }
    }

    /// Parse a `w:jc/@w:val`. Strict (`start`/`end`) and transitional
    /// spellings are both accepted.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" | "justify" => Some(Self::Justify),
            "distribute" => Some(Self::Distribute),
            _ => None,
        }
    }
}

impl fmt::Display for WdParagraphAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Left => "LEFT",
            Self::Center => "CENTER",
            Self::Right => "RIGHT",
            Self::Justify => "JUSTIFY",
            Self::Distribute => "DISTRIBUTE",
        };
        f.write_str(label)
    }
}
