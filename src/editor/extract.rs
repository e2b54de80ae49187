//! Paragraph and heading extraction.

use crate::editor::catalog::HEADING_PREFIX;
use crate::editor::formatter::NORMAL_STYLE;
use crate::ooxml::docx::{Document, Paragraph};
use serde::Serialize;
use tracing::{debug, warn};

/// Horizontal offset per heading level, for rendering an outline.
pub const INDENT_PER_LEVEL: i64 = 20;

/// Snapshot of one body paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphView {
    pub index: usize,
    pub text: String,
    #[serde(rename = "style")]
    pub style_name: String,
}

/// A paragraph whose style is a heading style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingView {
    pub index: usize,
    pub text: String,
    pub level: i64,
    pub indent: i64,
}

/// Walk the body paragraphs once, in order, and describe each one. Those
/// styled "Heading ..." are also reported as headings.
pub fn extract_paragraphs_and_headings(document: &Document) -> (Vec<ParagraphView>, Vec<HeadingView>) {
    let mut paragraphs = Vec::new();
    let mut headings = Vec::new();

    for (index, paragraph) in document.paragraphs().enumerate() {
        let text = paragraph.text();
        let style_name = style_name_of(document, &paragraph);

        if let Some(level) = heading_level(&style_name) {
            headings.push(HeadingView {
                index,
                text: text.clone(),
                level,
                indent: level.saturating_sub(1).saturating_mul(INDENT_PER_LEVEL),
            });
        }
        paragraphs.push(ParagraphView {
            index,
            text,
            style_name,
        });
    }

    debug!(
        paragraphs = paragraphs.len(),
        headings = headings.len(),
        "extracted paragraphs"
    );
    (paragraphs, headings)
}

/// Only the paragraph views.
pub fn extract_paragraphs(document: &Document) -> Vec<ParagraphView> {
    extract_paragraphs_and_headings(document).0
}

/// UI name of the paragraph style in effect for `paragraph`.
///
/// Falls back to the default paragraph style when the paragraph names no
/// style or a style that does not exist, and to "Normal" when the document
/// has no default either.
pub fn style_name_of(document: &Document, paragraph: &Paragraph<'_>) -> String {
    if let Some(id) = paragraph.style_id()
        && document.styles().get_by_id(id).is_none()
    {
        warn!(style_id = id, "paragraph references a missing style");
    }

    match document.paragraph_style(paragraph) {
        Some(style) => style
            .name()
            .or_else(|| style.style_id())
            .unwrap_or(NORMAL_STYLE)
            .to_string(),
        None => NORMAL_STYLE.to_string(),
    }
}

/// Heading level encoded in a style name.
///
/// Returns `None` unless the name starts with `"Heading "`. A suffix that
/// is not a number yields level 1, so "Heading Custom" counts as a top
/// level heading.
pub fn heading_level(style_name: &str) -> Option<i64> {
    let suffix = style_name.strip_prefix(HEADING_PREFIX)?;
    match suffix.trim().parse::<i64>() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!(style = style_name, "unparsable heading level, using 1");
            Some(1)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style><w:style w:type="paragraph" w:styleId="Custom"><w:name w:val="Heading Custom"/></w:style></w:styles>"#;

    fn document(body: &str) -> Document {
        let xml = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        Document::from_xml(xml.as_bytes(), STYLES.as_bytes()).unwrap()
    }

    fn para(style: Option<&str>, text: &str) -> String {
        let ppr = style
            .map(|id| format!(r#"<w:pPr><w:pStyle w:val="{id}"/></w:pPr>"#))
            .unwrap_or_default();
        format!("<w:p>{ppr}<w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    #[test]
    fn test_headings_among_body_text() {
        let body = [
            para(None, "intro"),
            para(Some("Heading1"), "Chapter"),
            para(Some("Heading2"), "Section"),
            para(Some("Normal"), "text"),
        ]
        .concat();
        let (paragraphs, headings) = extract_paragraphs_and_headings(&document(&body));

        assert_eq!(paragraphs.len(), 4);
        let styles: Vec<&str> = paragraphs.iter().map(|p| p.style_name.as_str()).collect();
        assert_eq!(styles, ["Normal", "Heading 1", "Heading 2", "Normal"]);

        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].index, 1);
        assert_eq!(headings[0].text, "Chapter");
        assert_eq!(headings.iter().map(|h| h.level).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(headings.iter().map(|h| h.indent).collect::<Vec<_>>(), [0, 20]);
    }

    #[test]
    fn test_lenient_heading_level() {
        let body = [para(Some("Custom"), "odd"), para(Some("Dangling"), "lost")].concat();
        let (paragraphs, headings) = extract_paragraphs_and_headings(&document(&body));
        assert_eq!(paragraphs[1].style_name, "Normal");
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].indent, 0);
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("Heading 9"), Some(9));
        assert_eq!(heading_level("Heading  4 "), Some(4));
        assert_eq!(heading_level("Heading x"), Some(1));
        assert_eq!(heading_level("Heading"), None);
        assert_eq!(heading_level("Title"), None);
    }

    #[test]
    fn test_view_json() {
        let view = ParagraphView {
            index: 0,
            text: "Hi".to_string(),
            style_name: "Normal".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&view).unwrap(),
            r#"{"index":0,"text":"Hi","style":"Normal"}"#
        );
    }
}
