//! Formatting template configuration.
//!
//! Every field defaults to the house style (Times New Roman 14 pt body,
//! 13 pt headings, A4 with 2/2/3/2 cm margins, 1.5 line spacing, 1.27 cm
//! first-line indent), so a YAML file only names what it changes:
//!
//! ```yaml
//! font_name: Georgia
//! margin_left_cm: 2.5
//! ```

use crate::common::Emu;
use crate::editor::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_FONT_NAME: &str = "Times New Roman";
pub const DEFAULT_BODY_SIZE_PT: f64 = 14.0;
pub const DEFAULT_HEADING_SIZE_PT: f64 = 13.0;
pub const A4_WIDTH_CM: f64 = 21.0;
pub const A4_HEIGHT_CM: f64 = 29.7;
pub const DEFAULT_LINE_SPACING: f64 = 1.5;
pub const DEFAULT_FIRST_LINE_INDENT_CM: f64 = 1.27;

/// Document-wide typography applied by the formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatTemplate {
    pub font_name: String,
    pub body_size_pt: f64,
    pub heading_size_pt: f64,
    pub page_width_cm: f64,
    pub page_height_cm: f64,
    pub margin_top_cm: f64,
    pub margin_bottom_cm: f64,
    pub margin_left_cm: f64,
    pub margin_right_cm: f64,
    /// Multiple of single line spacing
    pub line_spacing: f64,
    pub first_line_indent_cm: f64,
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self {
            font_name: DEFAULT_FONT_NAME.to_string(),
            body_size_pt: DEFAULT_BODY_SIZE_PT,
            heading_size_pt: DEFAULT_HEADING_SIZE_PT,
            page_width_cm: A4_WIDTH_CM,
            page_height_cm: A4_HEIGHT_CM,
            margin_top_cm: 2.0,
            margin_bottom_cm: 2.0,
            margin_left_cm: 3.0,
            margin_right_cm: 2.0,
            line_spacing: DEFAULT_LINE_SPACING,
            first_line_indent_cm: DEFAULT_FIRST_LINE_INDENT_CM,
        }
    }
}

impl FormatTemplate {
    /// Parse and validate a YAML template.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let template: FormatTemplate =
            serde_saphyr::from_str(yaml).map_err(|e| EditorError::Config(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    /// Load a template file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no template file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents).map_err(|e| match e {
            EditorError::Config(message) => {
                EditorError::Config(format!("{}: {}", path.display(), message))
            },
            other => other,
        })
    }

    /// Reject templates Word could not honour.
    pub fn validate(&self) -> Result<()> {
        if self.font_name.trim().is_empty() {
            return Err(EditorError::Config("font_name must not be empty".to_string()));
        }
        let positive = [
            ("body_size_pt", self.body_size_pt),
            ("heading_size_pt", self.heading_size_pt),
            ("page_width_cm", self.page_width_cm),
            ("page_height_cm", self.page_height_cm),
            ("line_spacing", self.line_spacing),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EditorError::Config(format!("{field} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("margin_top_cm", self.margin_top_cm),
            ("margin_bottom_cm", self.margin_bottom_cm),
            ("margin_left_cm", self.margin_left_cm),
            ("margin_right_cm", self.margin_right_cm),
            ("first_line_indent_cm", self.first_line_indent_cm),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EditorError::Config(format!(
                    "{field} must not be negative, got {value}"
                )));
            }
        }
        if self.margin_left_cm + self.margin_right_cm >= self.page_width_cm
            || self.margin_top_cm + self.margin_bottom_cm >= self.page_height_cm
        {
            return Err(EditorError::Config(
                "margins leave no room for text on the page".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn body_size(&self) -> Emu {
        Emu::from_pt(self.body_size_pt)
    }

    #[inline]
    pub fn heading_size(&self) -> Emu {
        Emu::from_pt(self.heading_size_pt)
    }

    #[inline]
    pub fn page_width(&self) -> Emu {
        Emu::from_cm(self.page_width_cm)
    }

    #[inline]
    pub fn page_height(&self) -> Emu {
        Emu::from_cm(self.page_height_cm)
    }

    #[inline]
    pub fn margin_top(&self) -> Emu {
        Emu::from_cm(self.margin_top_cm)
    }

    #[inline]
    pub fn margin_bottom(&self) -> Emu {
        Emu::from_cm(self.margin_bottom_cm)
    }

    #[inline]
    pub fn margin_left(&self) -> Emu {
        Emu::from_cm(self.margin_left_cm)
    }

    #[inline]
    pub fn margin_right(&self) -> Emu {
        Emu::from_cm(self.margin_right_cm)
    }

    #[inline]
    pub fn first_line_indent(&self) -> Emu {
        Emu::from_cm(self.first_line_indent_cm)
    }
}
