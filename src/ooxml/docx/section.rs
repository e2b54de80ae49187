/// Section - page setup of a document section (`w:sectPr`).
use crate::common::Emu;
use crate::common::xml::XmlElement;
use crate::ooxml::docx::schema::{self, successors};

/// Page dimensions and margins of one section.
///
/// A document has one section per `w:sectPr`: every paragraph that ends a
/// section carries one in its `w:pPr`, and the last section's properties sit
/// at the end of `w:body`. All lengths are stored in twips.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    element: &'a XmlElement,
}

impl<'a> Section<'a> {
    pub(crate) fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    #[inline]
    pub fn page_width(&self) -> Option<Emu> {
        self.length("pgSz", "w")
    }

    #[inline]
    pub fn page_height(&self) -> Option<Emu> {
        self.length("pgSz", "h")
    }

    #[inline]
    pub fn top_margin(&self) -> Option<Emu> {
        self.length("pgMar", "top")
    }

    #[inline]
    pub fn bottom_margin(&self) -> Option<Emu> {
        self.length("pgMar", "bottom")
    }

    #[inline]
    pub fn left_margin(&self) -> Option<Emu> {
        self.length("pgMar", "left")
    }

    #[inline]
    pub fn right_margin(&self) -> Option<Emu> {
        self.length("pgMar", "right")
    }

    fn length(&self, container: &str, attr: &str) -> Option<Emu> {
        self.element
            .child(container)?
            .attr(attr)
            .and_then(Emu::parse_twips)
    }
}

/// Mutable page setup of one section.
#[derive(Debug)]
pub struct SectionMut<'a> {
    element: &'a mut XmlElement,
}

impl<'a> SectionMut<'a> {
    pub(crate) fn new(element: &'a mut XmlElement) -> Self {
        Self { element }
    }

    pub fn get(&self) -> Section<'_> {
        Section::new(&*self.element)
    }

    pub fn set_page_width(&mut self, width: Emu) {
        self.set_length("pgSz", "w", width);
    }

    pub fn set_page_height(&mut self, height: Emu) {
        self.set_length("pgSz", "h", height);
    }

    pub fn set_top_margin(&mut self, margin: Emu) {
        self.set_length("pgMar", "top", margin);
    }

    pub fn set_bottom_margin(&mut self, margin: Emu) {
        self.set_length("pgMar", "bottom", margin);
    }

    pub fn set_left_margin(&mut self, margin: Emu) {
        self.set_length("pgMar", "left", margin);
    }

    pub fn set_right_margin(&mut self, margin: Emu) {
        self.set_length("pgMar", "right", margin);
    }

    fn set_length(&mut self, container: &str, attr: &str, value: Emu) {
        self.element
            .get_or_insert_child(container, successors(schema::SECT_PR, container))
            .set_attr(attr, value.to_twips().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_setup_round_trip() {
        let mut sect_pr = XmlElement::new("w:sectPr")
            .with_child(XmlElement::new("w:pgSz").with_attr("w:w", "12240").with_attr("w:h", "15840"))
            .with_child(XmlElement::new("w:cols").with_attr("w:space", "720"));

        let letter = Section::new(&sect_pr);
        assert_eq!(letter.page_width(), Some(Emu::from_twips(12240)));
        assert_eq!(letter.top_margin(), None);

        let mut section = SectionMut::new(&mut sect_pr);
        section.set_page_width(Emu::from_cm(21.0));
        section.set_page_height(Emu::from_cm(29.7));
        section.set_top_margin(Emu::from_cm(2.0));
        section.set_left_margin(Emu::from_cm(3.0));

        let names: Vec<&str> = sect_pr.elements().map(XmlElement::local_name).collect();
        assert_eq!(names, ["pgSz", "pgMar", "cols"]);

        let pg_sz = sect_pr.child("pgSz").unwrap();
        assert_eq!(pg_sz.attr("w"), Some("11906"));
        assert_eq!(pg_sz.attr("h"), Some("16838"));
        let pg_mar = sect_pr.child("pgMar").unwrap();
        assert_eq!(pg_mar.attr("top"), Some("1134"));
        assert_eq!(pg_mar.attr("left"), Some("1701"));
    }
}
