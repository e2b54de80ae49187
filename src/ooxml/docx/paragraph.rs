/// Paragraph and Run views over `w:p` and `w:r` elements.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::format::{Font, FontMut, ParagraphFormat, ParagraphFormatMut};
use crate::ooxml::docx::schema::{self, successors};

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element. Paragraphs contain runs which in turn
/// contain the actual text and formatting.
///
/// # Example
///
/// ```rust,ignore
/// for para in document.paragraphs() {
///     println!("{:?}: {}", para.style_id(), para.text());
///     for run in para.runs() {
///         println!("  Run: {} (bold: {:?})", run.text(), run.font().bold());
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    element: &'a XmlElement,
}

impl<'a> Paragraph<'a> {
    pub(crate) fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Get the text content of this paragraph.
    ///
    /// Concatenates the text of the paragraph's runs, including runs nested
    /// in hyperlinks.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for child in self.element.elements() {
            if child.is("r") {
                push_run_text(child, &mut result);
            } else if child.is("hyperlink") {
                for run in child.children_named("r") {
                    push_run_text(run, &mut result);
                }
            }
        }
        result
    }

    /// The id of the paragraph style (`w:pStyle/@w:val`). `None` means the
    /// document's default paragraph style applies.
    pub fn style_id(&self) -> Option<&'a str> {
        self.element.child("pPr")?.child("pStyle")?.attr("val")
    }

    /// Runs that are direct children of the paragraph.
    pub fn runs(&self) -> impl Iterator<Item = Run<'a>> + use<'a> {
        self.element.children_named("r").map(Run::new)
    }

    pub fn format(&self) -> ParagraphFormat<'a> {
        ParagraphFormat::new(self.element.child("pPr"))
    }
}

/// Mutable access to a `<w:p>` element.
#[derive(Debug)]
pub struct ParagraphMut<'a> {
    element: &'a mut XmlElement,
}

impl<'a> ParagraphMut<'a> {
    pub(crate) fn new(element: &'a mut XmlElement) -> Self {
        Self { element }
    }

    pub fn get(&self) -> Paragraph<'_> {
        Paragraph::new(&*self.element)
    }

    /// Point the paragraph at a style id, or remove the reference so the
    /// default paragraph style applies.
    pub fn set_style_id(&mut self, style_id: Option<&str>) {
        match style_id {
            Some(id) => self
                .ppr()
                .get_or_insert_child("pStyle", successors(schema::PPR, "pStyle"))
                .set_attr("val", id),
            None => {
                if let Some(ppr) = self.element.child_mut("pPr") {
                    ppr.remove_children("pStyle");
                }
            },
        }
    }

    /// Paragraph properties, creating `w:pPr` when needed.
    pub fn format_mut(&mut self) -> ParagraphFormatMut<'_> {
        ParagraphFormatMut::new(self.ppr())
    }

    pub fn runs_mut(&mut self) -> impl Iterator<Item = RunMut<'_>> {
        self.element
            .elements_mut()
            .filter(|child| child.is("r"))
            .map(RunMut::new)
    }

    fn ppr(&mut self) -> &mut XmlElement {
        self.element.get_or_prepend_child("pPr")
    }
}

/// A run of text with uniform character formatting (`<w:r>`).
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    element: &'a XmlElement,
}

impl<'a> Run<'a> {
    pub(crate) fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Get the text content of this run.
    ///
    /// `<w:tab/>` becomes a tab, line breaks become newlines and
    /// non-breaking hyphens become `-`. Page and column breaks add nothing.
    pub fn text(&self) -> String {
        let mut result = String::new();
        push_run_text(self.element, &mut result);
        result
    }

    pub fn font(&self) -> Font<'a> {
        Font::new(self.element.child("rPr"))
    }
}

/// Mutable access to a `<w:r>` element.
#[derive(Debug)]
pub struct RunMut<'a> {
    element: &'a mut XmlElement,
}

impl<'a> RunMut<'a> {
    pub(crate) fn new(element: &'a mut XmlElement) -> Self {
        Self { element }
    }

    pub fn get(&self) -> Run<'_> {
        Run::new(&*self.element)
    }

    /// Character properties, creating `w:rPr` when needed.
    pub fn font_mut(&mut self) -> FontMut<'_> {
        FontMut::new(self.element.get_or_prepend_child("rPr"))
    }
}

fn push_run_text(run: &XmlElement, out: &mut String) {
    for child in run.elements() {
        match child.local_name() {
            "t" => out.push_str(&child.text()),
            "tab" | "ptab" => out.push('\t'),
            "cr" => out.push('\n'),
            "br" => match child.attr("type") {
                None | Some("textWrapping") => out.push('\n'),
                Some(_) => {},
            },
            "noBreakHyphen" => out.push('-'),
            _ => {},
        }
    }
}
