//! Reassigning paragraph styles.

use crate::editor::catalog::{self, heading_style_name};
use crate::editor::error::{EditorError, Result};
use crate::editor::formatter::NORMAL_STYLE;
use crate::ooxml::docx::enums::WdStyleType;
use crate::ooxml::docx::{Document, StyleLookup, Styles};
use tracing::{debug, warn};

/// Set the style of the paragraph at `index` to the style named
/// `style_name`.
///
/// A missing "Heading N" style is created on the fly, based on "Normal".
/// Assigning the default paragraph style removes the paragraph's explicit
/// style reference.
///
/// # Errors
///
/// - `NotFound` if `index` is out of range, or "Normal" is requested but
///   the document has no such style.
/// - `Unsupported` if the named style is not a paragraph style, or is
///   absent and not a "Heading N" name.
pub fn set_paragraph_style(document: &mut Document, index: usize, style_name: &str) -> Result<()> {
    let count = document.paragraph_count();
    if index >= count {
        return Err(EditorError::NotFound(format!(
            "paragraph index {} out of range ({} paragraphs)",
            index, count
        )));
    }

    let style_id = resolve_paragraph_style(document.styles_mut(), style_name)?;

    document
        .paragraph_mut(index)
        .ok_or_else(|| EditorError::NotFound(format!("paragraph index {} out of range", index)))?
        .set_style_id(style_id.as_deref());
    debug!(index, style = style_name, "paragraph style set");
    Ok(())
}

/// Make the paragraph at `index` a heading of the given level.
pub fn set_heading_level(document: &mut Document, index: usize, level: u32) -> Result<()> {
    set_paragraph_style(document, index, &heading_style_name(level))
}

/// Assign "Normal" to every body paragraph. Returns the number of
/// paragraphs touched.
pub fn reset_to_normal(document: &mut Document) -> Result<usize> {
    let style_id = resolve_paragraph_style(document.styles_mut(), NORMAL_STYLE)?;
    let mut count = 0;
    for mut paragraph in document.paragraphs_mut() {
        paragraph.set_style_id(style_id.as_deref());
        count += 1;
    }
    debug!(paragraphs = count, "reset paragraphs to Normal");
    Ok(count)
}

/// Resolve `style_name` to the value for `w:pStyle`, creating heading
/// styles when needed. `None` stands for the default paragraph style.
fn resolve_paragraph_style(styles: &mut Styles, style_name: &str) -> Result<Option<String>> {
    match styles.lookup(style_name, WdStyleType::Paragraph) {
        StyleLookup::Found(style) => {
            let style_id = style.style_id().ok_or_else(|| {
                EditorError::Malformed(format!("style '{}' has no style id", style_name))
            })?;
            let is_default = styles
                .default_style(WdStyleType::Paragraph)
                .and_then(|default| default.style_id())
                == Some(style_id);
            Ok((!is_default).then(|| style_id.to_string()))
        },
        StyleLookup::WrongType(style) => Err(EditorError::Unsupported(format!(
            "'{}' is a {} style, not a paragraph style",
            style_name,
            style.style_type()
        ))),
        StyleLookup::Missing => {
            if catalog::creatable_heading_level(style_name).is_some() {
                create_heading_style(styles, style_name).map(Some)
            } else if style_name == NORMAL_STYLE {
                Err(EditorError::NotFound(format!("style '{}'", NORMAL_STYLE)))
            } else {
                Err(EditorError::Unsupported(format!(
                    "style '{}' not found and cannot be created",
                    style_name
                )))
            }
        },
    }
}

fn create_heading_style(styles: &mut Styles, style_name: &str) -> Result<String> {
    let normal_id = styles
        .get_by_name(NORMAL_STYLE)
        .filter(|style| style.style_type() == WdStyleType::Paragraph)
        .and_then(|style| style.style_id())
        .map(str::to_owned);
    if normal_id.is_none() {
        warn!(style = style_name, "no Normal style to base the new heading on");
    }

    let (mut style, _) = styles.resolve_or_create(style_name, WdStyleType::Paragraph)?;
    style.set_based_on(normal_id.as_deref());
    let style_id = style
        .get()
        .style_id()
        .map(str::to_owned)
        .ok_or_else(|| EditorError::Malformed(format!("style '{}' has no style id", style_name)))?;
    debug!(style = style_name, style_id = %style_id, "created heading style");
    Ok(style_id)
}
