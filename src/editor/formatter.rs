//! Document-wide formatting.
//!
//! Every operation here overwrites a fixed set of attributes with values
//! from a [`FormatTemplate`], so applying it again changes nothing.

use crate::common::Emu;
use crate::editor::catalog::{self, StyleCatalogEntry};
use crate::editor::config::FormatTemplate;
use crate::editor::error::{EditorError, Result};
use crate::ooxml::docx::enums::{WdParagraphAlignment, WdStyleType};
use crate::ooxml::docx::{Document, LineSpacing, StyleLookup, StyleMut};
use tracing::debug;

/// UI name of the base paragraph style.
pub const NORMAL_STYLE: &str = "Normal";

/// Apply the template to body paragraphs, their runs and every section.
///
/// Runs get the template font and body size; paragraphs are justified with
/// the template line spacing and first-line indent (replacing any hanging
/// indent); sections get the page size and margins.
pub fn apply_document_format(document: &mut Document, template: &FormatTemplate) -> Result<()> {
    template.validate()?;

    let line_spacing = LineSpacing::Multiple(template.line_spacing);
    let indent = template.first_line_indent();
    let mut paragraphs = 0usize;
    let mut runs = 0usize;

    for mut paragraph in document.paragraphs_mut() {
        for mut run in paragraph.runs_mut() {
            let mut font = run.font_mut();
            font.set_name(&template.font_name);
            font.set_size(template.body_size());
            runs += 1;
        }
        let mut format = paragraph.format_mut();
        format.set_alignment(Some(WdParagraphAlignment::Justify));
        format.set_line_spacing(line_spacing);
        format.set_first_line_indent(Some(indent));
        paragraphs += 1;
    }

    let mut sections = 0usize;
    for mut section in document.sections_mut() {
        section.set_page_height(template.page_height());
        section.set_page_width(template.page_width());
        section.set_top_margin(template.margin_top());
        section.set_bottom_margin(template.margin_bottom());
        section.set_left_margin(template.margin_left());
        section.set_right_margin(template.margin_right());
        sections += 1;
    }

    debug!(paragraphs, runs, sections, "applied document format");
    Ok(())
}

/// Give the "Normal" style the template font, body size, line spacing and
/// justification. A document without "Normal" gets one; it becomes the
/// default paragraph style unless the document already has a default.
pub fn ensure_normal_style(document: &mut Document, template: &FormatTemplate) -> Result<()> {
    template.validate()?;
    let styles = document.styles_mut();

    let missing = match styles.lookup(NORMAL_STYLE, WdStyleType::Paragraph) {
        StyleLookup::Found(_) => false,
        StyleLookup::Missing => true,
        StyleLookup::WrongType(style) => {
            return Err(EditorError::Malformed(format!(
                "'{}' is a {} style",
                NORMAL_STYLE,
                style.style_type()
            )));
        },
    };

    let mut normal = if missing {
        let make_default = styles.default_style(WdStyleType::Paragraph).is_none();
        let mut created = styles.add_style(NORMAL_STYLE, WdStyleType::Paragraph, true)?;
        created.set_default(make_default);
        created.set_quick_style(true);
        debug!(default = make_default, "created Normal style");
        created
    } else {
        styles
            .get_by_name_mut(NORMAL_STYLE)
            .ok_or_else(|| EditorError::NotFound(format!("style '{}'", NORMAL_STYLE)))?
    };

    let mut font = normal.font_mut();
    font.set_name(&template.font_name);
    font.set_size(template.body_size());
    let mut format = normal.paragraph_format_mut();
    format.set_line_spacing(LineSpacing::Multiple(template.line_spacing));
    format.set_alignment(Some(WdParagraphAlignment::Justify));
    Ok(())
}

/// Create or update "Heading 1" to "Heading 5" from the catalog.
///
/// Each style is based on "Normal", shown in the style gallery, loses any
/// explicit colour and gets the catalog's weight, slant and alignment with
/// the template font and heading size. Levels 1 and 2 have no first-line
/// indent; deeper levels use the template indent.
///
/// # Errors
///
/// `NotFound` when the document has no "Normal" paragraph style and
/// `Unsupported` when a heading name is taken by a non-paragraph style.
pub fn ensure_heading_styles(document: &mut Document, template: &FormatTemplate) -> Result<()> {
    template.validate()?;
    let styles = document.styles_mut();

    let normal_id = match styles.lookup(NORMAL_STYLE, WdStyleType::Paragraph) {
        StyleLookup::Found(style) => style.style_id().map(str::to_owned),
        _ => None,
    }
    .ok_or_else(|| EditorError::NotFound(format!("paragraph style '{}'", NORMAL_STYLE)))?;

    for entry in catalog::entries() {
        let name = entry.style_name();
        if let StyleLookup::WrongType(style) = styles.lookup(&name, WdStyleType::Paragraph) {
            return Err(EditorError::Unsupported(format!(
                "'{}' is a {} style, not a paragraph style",
                name,
                style.style_type()
            )));
        }

        let (mut style, created) = styles.resolve_or_create(&name, WdStyleType::Paragraph)?;
        apply_heading_entry(&mut style, entry, &normal_id, template);
        if created {
            debug!(style = %name, "created heading style");
        }
    }
    Ok(())
}

fn apply_heading_entry(
    style: &mut StyleMut<'_>,
    entry: &StyleCatalogEntry,
    normal_id: &str,
    template: &FormatTemplate,
) {
    style.set_based_on(Some(normal_id));
    style.set_quick_style(true);

    let mut font = style.font_mut();
    font.clear_color();
    font.set_bold(Some(entry.bold));
    font.set_italic(Some(entry.italic));
    font.set_name(&template.font_name);
    font.set_size(template.heading_size());

    let indent = if entry.level <= 2 {
        Emu::ZERO
    } else {
        template.first_line_indent()
    };
    let mut format = style.paragraph_format_mut();
    format.set_alignment(Some(entry.alignment));
    format.set_line_spacing(LineSpacing::Multiple(template.line_spacing));
    format.set_first_line_indent(Some(indent));
}

/// Apply the whole template: document format, then "Normal", then the
/// heading styles.
pub fn apply_template(document: &mut Document, template: &FormatTemplate) -> Result<()> {
    apply_document_format(document, template)?;
    ensure_normal_style(document, template)?;
    ensure_heading_styles(document, template)?;
    Ok(())
}
