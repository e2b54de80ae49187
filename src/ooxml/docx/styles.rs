/// Styles - document styles and formatting definitions.
use crate::common::xml::{XmlDocument, XmlElement};
use crate::ooxml::docx::enums::WdStyleType;
use crate::ooxml::docx::format::{Font, FontMut, ParagraphFormat, ParagraphFormatMut, parse_on_off};
use crate::ooxml::docx::schema::{self, successors};
use crate::ooxml::docx::template::DEFAULT_STYLES_XML;
use crate::ooxml::error::{OoxmlError, Result};
use phf::phf_map;

/// Built-in styles whose stored name differs from the name Word shows.
///
/// Word stores `heading 1` in `w:name` but presents it as "Heading 1".
/// Lookups translate UI names to stored names, and `Style::name` goes the
/// other way.
static UI_TO_INTERNAL: phf::Map<&'static str, &'static str> = phf_map! {
    "Caption" => "caption",
    "Footer" => "footer",
    "Header" => "header",
    "Heading 1" => "heading 1",
    "Heading 2" => "heading 2",
    "Heading 3" => "heading 3",
    "Heading 4" => "heading 4",
    "Heading 5" => "heading 5",
    "Heading 6" => "heading 6",
    "Heading 7" => "heading 7",
    "Heading 8" => "heading 8",
    "Heading 9" => "heading 9",
};

static INTERNAL_TO_UI: phf::Map<&'static str, &'static str> = phf_map! {
    "caption" => "Caption",
    "footer" => "Footer",
    "header" => "Header",
    "heading 1" => "Heading 1",
    "heading 2" => "Heading 2",
    "heading 3" => "Heading 3",
    "heading 4" => "Heading 4",
    "heading 5" => "Heading 5",
    "heading 6" => "Heading 6",
    "heading 7" => "Heading 7",
    "heading 8" => "Heading 8",
    "heading 9" => "Heading 9",
};

/// Translate a UI style name to the name stored in `w:name`.
#[inline]
pub fn ui_to_internal(name: &str) -> &str {
    UI_TO_INTERNAL.get(name).copied().unwrap_or(name)
}

/// Translate a stored style name to the name shown in the UI.
#[inline]
pub fn internal_to_ui(name: &str) -> &str {
    INTERNAL_TO_UI.get(name).copied().unwrap_or(name)
}

/// Style id Word derives from a stored name: built-in captions and
/// headings keep their capitalised id, everything else drops its spaces.
fn style_id_from_name(internal: &str) -> String {
    match internal {
        "caption" => "Caption".to_string(),
        name if name.starts_with("heading ") && INTERNAL_TO_UI.contains_key(name) => {
            name.replacen("heading ", "Heading", 1)
        },
        name => name.replace(' ', ""),
    }
}

fn stored_name(element: &XmlElement) -> Option<&str> {
    element.child("name")?.attr("val")
}

/// A style answers to its stored name and to the UI form of that name, so
/// `Heading 1` stored either way is found by "Heading 1".
fn has_name(element: &XmlElement, name: &str) -> bool {
    stored_name(element)
        .is_some_and(|stored| stored == ui_to_internal(name) || internal_to_ui(stored) == name)
}

/// Result of looking up a style by name for a given use.
#[derive(Debug, Clone, Copy)]
pub enum StyleLookup<'a> {
    /// A style with the name and the requested type exists.
    Found(Style<'a>),
    /// No style has the name.
    Missing,
    /// A style has the name but is of another type.
    WrongType(Style<'a>),
}

/// The styles part (`word/styles.xml`) of a document.
///
/// Styles are reached by name or id; `w:basedOn` is an id reference that
/// callers resolve through [`Styles::get_by_id`].
///
/// # Examples
///
/// ```rust
/// use restyle::ooxml::docx::Styles;
/// use restyle::ooxml::docx::enums::WdStyleType;
///
/// let mut styles = Styles::default_template()?;
/// let (heading, created) = styles.resolve_or_create("Heading 1", WdStyleType::Paragraph)?;
/// assert!(created);
/// assert_eq!(heading.get().style_id(), Some("Heading1"));
/// assert_eq!(styles.get_by_name("Heading 1").and_then(|s| s.name()), Some("Heading 1"));
/// # Ok::<(), restyle::ooxml::OoxmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Styles {
    xml: XmlDocument,
}

impl Styles {
    /// Parse a styles part.
    pub fn from_xml(bytes: &[u8]) -> Result<Self> {
        let xml = XmlDocument::parse(bytes)?;
        if !xml.root().is("styles") {
            return Err(OoxmlError::InvalidFormat(format!(
                "styles part has root <{}>",
                xml.root().name()
            )));
        }
        Ok(Self { xml })
    }

    /// The built-in styles part used for documents that have none.
    pub fn default_template() -> Result<Self> {
        Self::from_xml(DEFAULT_STYLES_XML.as_bytes())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.xml.to_bytes()
    }

    /// Iterate over all style definitions in document order.
    pub fn iter(&self) -> impl Iterator<Item = Style<'_>> {
        self.xml.root().children_named("style").map(Style::new)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Get a style by its id.
    pub fn get_by_id(&self, style_id: &str) -> Option<Style<'_>> {
        self.iter().find(|style| style.style_id() == Some(style_id))
    }

    /// Get a style by its UI name ("Heading 1" finds `heading 1`).
    pub fn get_by_name(&self, name: &str) -> Option<Style<'_>> {
        self.iter().find(|style| has_name(style.element, name))
    }

    pub fn get_by_name_mut(&mut self, name: &str) -> Option<StyleMut<'_>> {
        self.xml
            .root_mut()
            .elements_mut()
            .find(|element| element.is("style") && has_name(element, name))
            .map(StyleMut::new)
    }

    pub fn get_by_id_mut(&mut self, style_id: &str) -> Option<StyleMut<'_>> {
        self.xml
            .root_mut()
            .elements_mut()
            .find(|element| element.is("style") && element.attr("styleId") == Some(style_id))
            .map(StyleMut::new)
    }

    /// Check whether a style with the UI name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get_by_name(name).is_some()
    }

    /// The default style for a type. When several claim to be the default,
    /// the last one wins, as in Word.
    pub fn default_style(&self, style_type: WdStyleType) -> Option<Style<'_>> {
        self.iter()
            .filter(|style| style.style_type() == style_type && style.is_default())
            .last()
    }

    /// Look up a style by UI name, telling an absent style apart from one
    /// of the wrong type.
    pub fn lookup(&self, name: &str, style_type: WdStyleType) -> StyleLookup<'_> {
        match self.get_by_name(name) {
            None => StyleLookup::Missing,
            Some(style) if style.style_type() == style_type => StyleLookup::Found(style),
            Some(style) => StyleLookup::WrongType(style),
        }
    }

    /// Add a new style definition at the end of the part.
    ///
    /// The id is derived from the name and made unique. Non-builtin styles
    /// are marked with `w:customStyle`.
    ///
    /// # Errors
    ///
    /// Fails if a style with the same name already exists.
    pub fn add_style(
        &mut self,
        name: &str,
        style_type: WdStyleType,
        builtin: bool,
    ) -> Result<StyleMut<'_>> {
        if self.contains(name) {
            return Err(OoxmlError::InvalidFormat(format!(
                "document already contains style '{}'",
                name
            )));
        }

        let internal = ui_to_internal(name);
        let style_id = self.unique_style_id(&style_id_from_name(internal));

        let root = self.xml.root_mut();
        let mut element =
            XmlElement::new(root.qualify("style")).with_attr(root.qualify("type"), style_type.to_xml());
        if !builtin {
            element = element.with_attr(root.qualify("customStyle"), "1");
        }
        element = element
            .with_attr(root.qualify("styleId"), style_id)
            .with_child(XmlElement::new(root.qualify("name")).with_attr(root.qualify("val"), internal));
        root.push_child(element);

        root.elements_mut()
            .last()
            .map(StyleMut::new)
            .ok_or_else(|| OoxmlError::InvalidFormat("style was not inserted".to_string()))
    }

    /// Resolve a style by UI name, creating it when absent. The flag tells
    /// whether the style was created. Existing styles are never duplicated.
    ///
    /// # Errors
    ///
    /// Fails if a style with the name exists with another type.
    pub fn resolve_or_create(
        &mut self,
        name: &str,
        style_type: WdStyleType,
    ) -> Result<(StyleMut<'_>, bool)> {
        match self.get_by_name(name).map(|style| style.style_type()) {
            Some(found) if found != style_type => Err(OoxmlError::InvalidFormat(format!(
                "style '{}' is a {} style, not a {} style",
                name, found, style_type
            ))),
            Some(_) => self
                .get_by_name_mut(name)
                .map(|style| (style, false))
                .ok_or_else(|| OoxmlError::InvalidFormat(format!("style '{}' vanished", name))),
            None => self.add_style(name, style_type, false).map(|style| (style, true)),
        }
    }

    fn unique_style_id(&self, base: &str) -> String {
        if self.get_by_id(base).is_none() {
            return base.to_string();
        }
        let mut suffix = 1u32;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if self.get_by_id(&candidate).is_none() {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// A style definition (`w:style`).
#[derive(Debug, Clone, Copy)]
pub struct Style<'a> {
    element: &'a XmlElement,
}

impl<'a> Style<'a> {
    pub(crate) fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    #[inline]
    pub fn style_id(&self) -> Option<&'a str> {
        self.element.attr("styleId")
    }

    /// The name as shown in the UI ("Heading 1", not `heading 1`).
    pub fn name(&self) -> Option<&'a str> {
        self.internal_name().map(internal_to_ui)
    }

    /// The name exactly as stored in `w:name`.
    #[inline]
    pub fn internal_name(&self) -> Option<&'a str> {
        stored_name(self.element)
    }

    /// The style type; a missing `w:type` means paragraph.
    pub fn style_type(&self) -> WdStyleType {
        self.element
            .attr("type")
            .and_then(WdStyleType::from_xml)
            .unwrap_or_default()
    }

    pub fn is_default(&self) -> bool {
        self.element.attr("default").is_some_and(parse_on_off)
    }

    /// Whether the style was defined by the user rather than built in.
    pub fn is_custom(&self) -> bool {
        self.element.attr("customStyle").is_some_and(parse_on_off)
    }

    /// Id of the parent style.
    pub fn based_on(&self) -> Option<&'a str> {
        self.element.child("basedOn")?.attr("val")
    }

    /// Whether the style is shown in the quick style gallery (`w:qFormat`).
    pub fn is_quick_style(&self) -> bool {
        self.element
            .child("qFormat")
            .is_some_and(|q| q.attr("val").is_none_or(parse_on_off))
    }

    pub fn paragraph_format(&self) -> ParagraphFormat<'a> {
        ParagraphFormat::new(self.element.child("pPr"))
    }

    pub fn font(&self) -> Font<'a> {
        Font::new(self.element.child("rPr"))
    }
}

/// Mutable access to a style definition.
#[derive(Debug)]
pub struct StyleMut<'a> {
    element: &'a mut XmlElement,
}

impl<'a> StyleMut<'a> {
    pub(crate) fn new(element: &'a mut XmlElement) -> Self {
        Self { element }
    }

    pub fn get(&self) -> Style<'_> {
        Style::new(&*self.element)
    }

    /// Set or clear the parent style by id.
    pub fn set_based_on(&mut self, style_id: Option<&str>) {
        match style_id {
            Some(id) => self.child("basedOn").set_attr("val", id),
            None => {
                self.element.remove_children("basedOn");
            },
        }
    }

    pub fn set_quick_style(&mut self, quick: bool) {
        if quick {
            self.child("qFormat").remove_attr("val");
        } else {
            self.element.remove_children("qFormat");
        }
    }

    /// Mark the style as the default of its type.
    pub fn set_default(&mut self, default: bool) {
        if default {
            self.element.set_attr("default", "1");
        } else {
            self.element.remove_attr("default");
        }
    }

    pub fn paragraph_format_mut(&mut self) -> ParagraphFormatMut<'_> {
        ParagraphFormatMut::new(self.child("pPr"))
    }

    pub fn font_mut(&mut self) -> FontMut<'_> {
        FontMut::new(self.child("rPr"))
    }

    fn child(&mut self, local: &str) -> &mut XmlElement {
        self.element
            .get_or_insert_child(local, successors(schema::STYLE, local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Emu;
    use crate::ooxml::docx::enums::WdParagraphAlignment;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:rPr><w:color w:val="2F5496"/></w:rPr></w:style><w:style w:type="character" w:styleId="Strong"><w:name w:val="Strong"/></w:style><w:style w:type="paragraph" w:customStyle="1" w:styleId="Heading3"><w:name w:val="Fancy"/></w:style></w:styles>"#;

    fn styles() -> Styles {
        Styles::from_xml(STYLES.as_bytes()).unwrap()
    }

    #[test]
    fn test_name_aliases() {
        let styles = styles();
        let heading = styles.get_by_name("Heading 1").unwrap();
        assert_eq!(heading.style_id(), Some("Heading1"));
        assert_eq!(heading.name(), Some("Heading 1"));
        assert_eq!(heading.internal_name(), Some("heading 1"));
        assert_eq!(heading.based_on(), Some("Normal"));
        assert!(heading.is_quick_style());
        assert!(styles.get_by_name("heading 1").is_some());
        assert!(styles.get_by_name("Heading 2").is_none());
    }

    #[test]
    fn test_default_and_lookup() {
        let styles = styles();
        assert_eq!(
            styles
                .default_style(WdStyleType::Paragraph)
                .and_then(|s| s.style_id()),
            Some("Normal")
        );
        assert!(styles.default_style(WdStyleType::Character).is_none());
        assert!(matches!(styles.lookup("Normal", WdStyleType::Paragraph), StyleLookup::Found(_)));
        assert!(matches!(styles.lookup("Strong", WdStyleType::Paragraph), StyleLookup::WrongType(_)));
        assert!(matches!(styles.lookup("Quote", WdStyleType::Paragraph), StyleLookup::Missing));
    }

    #[test]
    fn test_add_style_derives_unique_id() {
        let mut styles = styles();
        let created = styles.add_style("Heading 3", WdStyleType::Paragraph, false).unwrap();
        let created = created.get();
        // `Heading3` is taken by the custom "Fancy" style.
        assert_eq!(created.style_id(), Some("Heading31"));
        assert_eq!(created.internal_name(), Some("heading 3"));
        assert!(created.is_custom());

        let id = styles
            .add_style("My Body Text", WdStyleType::Paragraph, false)
            .unwrap()
            .get()
            .style_id()
            .map(str::to_string);
        assert_eq!(id.as_deref(), Some("MyBodyText"));

        assert!(styles.add_style("Heading 3", WdStyleType::Paragraph, false).is_err());
        assert_eq!(styles.len(), 6);
    }

    #[test]
    fn test_resolve_or_create_never_duplicates() {
        let mut styles = styles();
        let (_, created) = styles.resolve_or_create("Heading 2", WdStyleType::Paragraph).unwrap();
        assert!(created);
        let (_, created) = styles.resolve_or_create("Heading 2", WdStyleType::Paragraph).unwrap();
        assert!(!created);
        assert_eq!(styles.iter().filter(|s| s.name() == Some("Heading 2")).count(), 1);
        assert!(styles.resolve_or_create("Strong", WdStyleType::Paragraph).is_err());
    }

    #[test]
    fn test_capitalised_stored_heading_name() {
        let xml = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="Heading 1"/></w:style></w:styles>"#;
        let mut styles = Styles::from_xml(xml.as_bytes()).unwrap();
        assert_eq!(styles.get_by_name("Heading 1").and_then(|s| s.style_id()), Some("Heading1"));
        assert!(styles.get_by_name("heading 1").is_some());
        assert!(styles.get_by_name_mut("Heading 1").is_some());

        let (style, created) = styles.resolve_or_create("Heading 1", WdStyleType::Paragraph).unwrap();
        assert!(!created);
        assert_eq!(style.get().style_id(), Some("Heading1"));
        assert_eq!(styles.len(), 1);
        assert!(styles.add_style("Heading 1", WdStyleType::Paragraph, false).is_err());
    }

    #[test]
    fn test_style_formatting() {
        let mut styles = styles();
        let mut heading = styles.get_by_name_mut("Heading 1").unwrap();
        heading.set_based_on(Some("Normal"));
        heading.set_quick_style(true);
        {
            let mut font = heading.font_mut();
            font.clear_color();
            font.set_bold(Some(true));
            font.set_size(Emu::from_pt(13.0));
        }
        heading
            .paragraph_format_mut()
            .set_alignment(Some(WdParagraphAlignment::Center));

        let heading = styles.get_by_name("Heading 1").unwrap();
        assert_eq!(heading.font().color(), None);
        assert_eq!(heading.font().bold(), Some(true));
        assert_eq!(
            heading.paragraph_format().alignment(),
            Some(WdParagraphAlignment::Center)
        );
        let element = styles
            .xml
            .root()
            .children_named("style")
            .nth(1)
            .unwrap();
        let names: Vec<&str> = element.elements().map(XmlElement::local_name).collect();
        assert_eq!(names, ["name", "basedOn", "next", "qFormat", "pPr", "rPr"]);
    }

    #[test]
    fn test_default_template() {
        let styles = Styles::default_template().unwrap();
        let normal = styles.default_style(WdStyleType::Paragraph).unwrap();
        assert_eq!(normal.name(), Some("Normal"));
        assert!(!normal.is_custom());
    }

    #[test]
    fn test_rejects_foreign_root() {
        assert!(Styles::from_xml(b"<w:document/>").is_err());
    }
}
