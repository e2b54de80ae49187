/// Document - the main API for working with Word document content.
use crate::common::xml::XmlDocument;
use crate::ooxml::docx::enums::WdStyleType;
use crate::ooxml::docx::paragraph::{Paragraph, ParagraphMut};
use crate::ooxml::docx::section::{Section, SectionMut};
use crate::ooxml::docx::styles::{Style, Styles};
use crate::ooxml::error::{OoxmlError, Result};

/// A Word document: the main document part together with its styles.
///
/// Paragraphs are the `w:p` children of `w:body`, in document order;
/// paragraphs nested in tables, text boxes or content controls are not
/// part of this sequence.
///
/// # Examples
///
/// ```rust,no_run
/// use restyle::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// let doc = pkg.document();
/// println!("Number of paragraphs: {}", doc.paragraph_count());
/// for para in doc.paragraphs() {
///     println!("{}", para.text());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    part: XmlDocument,
    styles: Styles,
}

impl Document {
    /// Create a document from a parsed main part and its styles.
    ///
    /// # Errors
    ///
    /// Fails if the part is not a `w:document` with a `w:body`.
    pub fn new(part: XmlDocument, styles: Styles) -> Result<Self> {
        let root = part.root();
        if !root.is("document") {
            return Err(OoxmlError::InvalidFormat(format!(
                "main part has root <{}>, expected <w:document>",
                root.name()
            )));
        }
        if root.child("body").is_none() {
            return Err(OoxmlError::InvalidFormat("document has no <w:body>".to_string()));
        }
        Ok(Self { part, styles })
    }

    /// Parse a document from the bytes of `document.xml` and `styles.xml`.
    pub fn from_xml(document_xml: &[u8], styles_xml: &[u8]) -> Result<Self> {
        Self::new(XmlDocument::parse(document_xml)?, Styles::from_xml(styles_xml)?)
    }

    /// Body paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<'_>> {
        self.part
            .root()
            .child("body")
            .into_iter()
            .flat_map(|body| body.children_named("p"))
            .map(Paragraph::new)
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = ParagraphMut<'_>> {
        self.part
            .root_mut()
            .child_mut("body")
            .into_iter()
            .flat_map(|body| body.elements_mut())
            .filter(|element| element.is("p"))
            .map(ParagraphMut::new)
    }

    #[inline]
    pub fn paragraph(&self, index: usize) -> Option<Paragraph<'_>> {
        self.paragraphs().nth(index)
    }

    #[inline]
    pub fn paragraph_mut(&mut self, index: usize) -> Option<ParagraphMut<'_>> {
        self.paragraphs_mut().nth(index)
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Text of all body paragraphs, one per line.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|para| para.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Sections in document order: section breaks carried by paragraphs,
    /// then the body-level `w:sectPr`.
    pub fn sections(&self) -> impl Iterator<Item = Section<'_>> {
        self.part
            .root()
            .child("body")
            .into_iter()
            .flat_map(|body| body.elements())
            .filter_map(|element| {
                if element.is("sectPr") {
                    Some(element)
                } else if element.is("p") {
                    element.child("pPr").and_then(|ppr| ppr.child("sectPr"))
                } else {
                    None
                }
            })
            .map(Section::new)
    }

    pub fn sections_mut(&mut self) -> impl Iterator<Item = SectionMut<'_>> {
        self.part
            .root_mut()
            .child_mut("body")
            .into_iter()
            .flat_map(|body| body.elements_mut())
            .filter_map(|element| {
                if element.is("sectPr") {
                    Some(element)
                } else if element.is("p") {
                    element
                        .child_mut("pPr")
                        .and_then(|ppr| ppr.child_mut("sectPr"))
                } else {
                    None
                }
            })
            .map(SectionMut::new)
    }

    #[inline]
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    #[inline]
    pub fn styles_mut(&mut self) -> &mut Styles {
        &mut self.styles
    }

    /// The paragraph style that applies to `paragraph`.
    ///
    /// A missing or dangling `w:pStyle`, or one that names a non-paragraph
    /// style, falls back to the default paragraph style.
    pub fn paragraph_style(&self, paragraph: &Paragraph<'_>) -> Option<Style<'_>> {
        let referenced = paragraph
            .style_id()
            .and_then(|id| self.styles.get_by_id(id))
            .filter(|style| style.style_type() == WdStyleType::Paragraph);
        referenced.or_else(|| self.styles.default_style(WdStyleType::Paragraph))
    }

    /// Serialize the main document part.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.part.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:pPr><w:pStyle w:val="Heading1"/><w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:pPr><w:r><w:t>Title</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:pPr><w:pStyle w:val="Missing"/></w:pPr><w:r><w:t>Body</w:t></w:r></w:p><w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body></w:document>"#;

    const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style></w:styles>"#;

    fn document() -> Document {
        Document::from_xml(DOCUMENT.as_bytes(), STYLES.as_bytes()).unwrap()
    }

    #[test]
    fn test_body_paragraphs_only() {
        let doc = document();
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.text(), "Title\nBody");
        assert_eq!(doc.paragraph(1).map(|p| p.text()).as_deref(), Some("Body"));
        assert!(doc.paragraph(2).is_none());
    }

    #[test]
    fn test_paragraph_style_fallback() {
        let doc = document();
        let names: Vec<Option<&str>> = doc
            .paragraphs()
            .map(|p| doc.paragraph_style(&p).and_then(|s| s.name()))
            .collect();
        assert_eq!(names, [Some("Heading 1"), Some("Normal")]);
    }

    #[test]
    fn test_sections_in_document_order() {
        let mut doc = document();
        let widths: Vec<_> = doc.sections().map(|s| s.page_width()).collect();
        assert_eq!(widths.len(), 2);
        assert_eq!(widths[0].map(|w| w.to_twips()), Some(12240));

        for mut section in doc.sections_mut() {
            section.set_page_width(crate::common::Emu::from_cm(21.0));
        }
        assert!(doc.sections().all(|s| s.page_width().map(|w| w.to_twips()) == Some(11906)));
    }

    #[test]
    fn test_rejects_document_without_body() {
        let result = Document::from_xml(
            br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#,
            STYLES.as_bytes(),
        );
        assert!(matches!(result, Err(OoxmlError::InvalidFormat(_))));
    }
}
