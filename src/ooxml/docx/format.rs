//! Paragraph and character formatting shared by paragraphs, runs and styles.
//!
//! `w:pPr` and `w:rPr` look the same whether they sit inside a paragraph,
//! a run or a style definition, so one set of views serves all three. Read
//! views tolerate a missing container; write views are created on demand by
//! their owner, which also decides where the container is inserted.
use crate::common::Emu;
use crate::common::xml::XmlElement;
use crate::ooxml::docx::enums::WdParagraphAlignment;
use crate::ooxml::docx::schema::{self, successors};

/// Twips per line for single spacing in `w:spacing/@w:line`.
const SINGLE_LINE: f64 = 240.0;

/// Line spacing options for paragraphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSpacing {
    /// Multiple of single spacing (1.0, 1.5, 2.0, ...), `lineRule="auto"`
    Multiple(f64),
    /// Exact line height
    Exact(Emu),
    /// Minimum line height
    AtLeast(Emu),
}

impl LineSpacing {
    pub const ONE_AND_HALF: LineSpacing = LineSpacing::Multiple(1.5);
}

/// Read access to paragraph properties (`w:pPr`).
#[derive(Debug, Clone, Copy)]
pub struct ParagraphFormat<'a> {
    ppr: Option<&'a XmlElement>,
}

impl<'a> ParagraphFormat<'a> {
    pub(crate) fn new(ppr: Option<&'a XmlElement>) -> Self {
        Self { ppr }
    }

    /// Explicit alignment, `None` when inherited.
    pub fn alignment(&self) -> Option<WdParagraphAlignment> {
        self.ppr?
            .child("jc")?
            .attr("val")
            .and_then(WdParagraphAlignment::from_xml)
    }

    pub fn line_spacing(&self) -> Option<LineSpacing> {
        let spacing = self.ppr?.child("spacing")?;
        let line: i64 = spacing.attr("line")?.trim().parse().ok()?;
        match spacing.attr("lineRule").unwrap_or("auto") {
            "exact" => Some(LineSpacing::Exact(Emu::from_twips(line))),
            "atLeast" => Some(LineSpacing::AtLeast(Emu::from_twips(line))),
            _ => Some(LineSpacing::Multiple(line as f64 / SINGLE_LINE)),
        }
    }

    /// First-line indent; a hanging indent is reported as a negative length.
    pub fn first_line_indent(&self) -> Option<Emu> {
        let ind = self.ppr?.child("ind")?;
        if let Some(hanging) = ind.attr("hanging").and_then(Emu::parse_twips) {
            return Some(Emu(-hanging.0));
        }
        ind.attr("firstLine").and_then(Emu::parse_twips)
    }
}

/// Write access to paragraph properties (`w:pPr`).
#[derive(Debug)]
pub struct ParagraphFormatMut<'a> {
    ppr: &'a mut XmlElement,
}

impl<'a> ParagraphFormatMut<'a> {
    pub(crate) fn new(ppr: &'a mut XmlElement) -> Self {
        Self { ppr }
    }

    pub fn get(&self) -> ParagraphFormat<'_> {
        ParagraphFormat::new(Some(&*self.ppr))
    }

    /// Set or clear (`None`) the paragraph alignment.
    pub fn set_alignment(&mut self, alignment: Option<WdParagraphAlignment>) {
        match alignment {
            Some(alignment) => self.child("jc").set_attr("val", alignment.to_xml()),
            None => {
                self.ppr.remove_children("jc");
            },
        }
    }

    pub fn set_line_spacing(&mut self, spacing: LineSpacing) {
        let (line, rule) = match spacing {
            LineSpacing::Multiple(multiple) => ((multiple * SINGLE_LINE).round() as i64, "auto"),
            LineSpacing::Exact(height) => (height.to_twips(), "exact"),
            LineSpacing::AtLeast(height) => (height.to_twips(), "atLeast"),
        };
        let element = self.child("spacing");
        element.set_attr("line", line.to_string());
        element.set_attr("lineRule", rule);
    }

    /// Set the first-line indent. Negative values become a hanging indent,
    /// `None` removes both.
    pub fn set_first_line_indent(&mut self, indent: Option<Emu>) {
        let ind = self.child("ind");
        ind.remove_attr("firstLine");
        ind.remove_attr("hanging");
        match indent {
            Some(Emu(value)) if value < 0 => {
                ind.set_attr("hanging", Emu(-value).to_twips().to_string())
            },
            Some(value) => ind.set_attr("firstLine", value.to_twips().to_string()),
            None => {},
        }
    }

    fn child(&mut self, local: &str) -> &mut XmlElement {
        self.ppr.get_or_insert_child(local, successors(schema::PPR, local))
    }
}

/// Read access to character properties (`w:rPr`).
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    rpr: Option<&'a XmlElement>,
}

impl<'a> Font<'a> {
    pub(crate) fn new(rpr: Option<&'a XmlElement>) -> Self {
        Self { rpr }
    }

    /// The Latin typeface (`w:rFonts/@w:ascii`).
    pub fn name(&self) -> Option<&'a str> {
        self.rpr?.child("rFonts")?.attr("ascii")
    }

    pub fn size(&self) -> Option<Emu> {
        let half_points: i64 = self.rpr?.child("sz")?.attr("val")?.trim().parse().ok()?;
        Some(Emu::from_half_points(half_points))
    }

    pub fn bold(&self) -> Option<bool> {
        self.toggle("b")
    }

    pub fn italic(&self) -> Option<bool> {
        self.toggle("i")
    }

    /// Explicit RGB colour such as `"FF0000"` or `"auto"`.
    pub fn color(&self) -> Option<&'a str> {
        self.rpr?.child("color")?.attr("val")
    }

    fn toggle(&self, local: &str) -> Option<bool> {
        let element = self.rpr?.child(local)?;
        Some(element.attr("val").is_none_or(parse_on_off))
    }
}

/// Write access to character properties (`w:rPr`).
#[derive(Debug)]
pub struct FontMut<'a> {
    rpr: &'a mut XmlElement,
}

impl<'a> FontMut<'a> {
    pub(crate) fn new(rpr: &'a mut XmlElement) -> Self {
        Self { rpr }
    }

    pub fn get(&self) -> Font<'_> {
        Font::new(Some(&*self.rpr))
    }

    /// Set the typeface for Latin text (`ascii` and `hAnsi` slots).
    pub fn set_name(&mut self, name: &str) {
        let fonts = self.child("rFonts");
        fonts.set_attr("ascii", name);
        fonts.set_attr("hAnsi", name);
    }

    pub fn set_size(&mut self, size: Emu) {
        self.child("sz")
            .set_attr("val", size.to_half_points().to_string());
    }

    pub fn set_bold(&mut self, bold: Option<bool>) {
        self.set_toggle("b", bold);
    }

    pub fn set_italic(&mut self, italic: Option<bool>) {
        self.set_toggle("i", italic);
    }

    /// Drop any explicit colour so the text inherits it again.
    pub fn clear_color(&mut self) {
        self.rpr.remove_children("color");
    }

    /// `Some(true)` writes `<w:b/>`, `Some(false)` writes `<w:b w:val="0"/>`
    /// and `None` removes the element.
    fn set_toggle(&mut self, local: &str, value: Option<bool>) {
        match value {
            None => {
                self.rpr.remove_children(local);
            },
            Some(true) => {
                self.child(local).remove_attr("val");
            },
            Some(false) => self.child(local).set_attr("val", "0"),
        }
    }

    fn child(&mut self, local: &str) -> &mut XmlElement {
        self.rpr.get_or_insert_child(local, successors(schema::RPR, local))
    }
}

/// `ST_OnOff`: everything except the explicit false spellings is on.
pub(crate) fn parse_on_off(value: &str) -> bool {
    !matches!(value, "0" | "false" | "off")
}
