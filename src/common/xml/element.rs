//! Lossless XML element tree for editing package parts in place.
//!
//! Parts are parsed once into [`XmlDocument`], edited through
//! [`XmlElement`] accessors and serialized back. Anything the editors do
//! not touch (unknown elements, namespace declarations, comments, CDATA)
//! is carried through unchanged. Attribute values and text are stored
//! unescaped and escaped again on write.

use super::escape::{escape_attr, escape_text};
use super::{Result, XmlError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// The declaration written in front of every serialized part.
pub const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A node inside an element: a child element, character data, or markup
/// kept verbatim (comments and CDATA sections).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    Raw(String),
}

impl XmlNode {
    #[inline]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// An XML element with its qualified name, attributes in document order
/// and child nodes.
///
/// Lookups match on *local* names (`"p"` matches `<w:p>`), the same way the
/// readers in this crate compare `local_name()` of quick-xml events. New
/// children and attributes reuse the prefix of the element they are added
/// to, so a `<w:pPr>` gains `<w:jc w:val=".."/>` rather than a bare `<jc>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: SmallVec<[(String, String); 4]>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element with a qualified name such as `"w:p"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter, used when assembling new elements.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Builder-style child setter.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Qualified name, e.g. `"w:style"`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace prefix, if the name has one.
    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Name without its namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Check the local name of this element.
    #[inline]
    pub fn is(&self, local: &str) -> bool {
        self.local_name() == local
    }

    /// Qualify `local` with this element's prefix.
    pub fn qualify(&self, local: &str) -> String {
        match self.prefix() {
            Some(prefix) => format!("{prefix}:{local}"),
            None => local.to_string(),
        }
    }

    /// Get an attribute value by local name. Namespace declarations are
    /// never matched.
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| !is_namespace_decl(key) && local_part(key) == local)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute by local name, replacing the value in place when the
    /// attribute already exists.
    pub fn set_attr(&mut self, local: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self
            .attributes
            .iter_mut()
            .find(|(key, _)| !is_namespace_decl(key) && local_part(key) == local)
        {
            slot.1 = value;
            return;
        }
        let key = self.qualify(local);
        self.attributes.push((key, value));
    }

    /// Remove an attribute by local name. Returns whether it was present.
    pub fn remove_attr(&mut self, local: &str) -> bool {
        let before = self.attributes.len();
        self.attributes
            .retain(|(key, _)| is_namespace_decl(key) || local_part(key) != local);
        before != self.attributes.len()
    }

    /// Iterate over `(qualified key, value)` pairs.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<XmlNode> {
        &mut self.children
    }

    /// Iterate over child elements, skipping text and raw nodes.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Iterate mutably over child elements.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// Iterate over child elements with the given local name.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |element| element.is(local))
    }

    /// First child element with the given local name.
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.is(local))
    }

    /// First child element with the given local name, mutably.
    pub fn child_mut(&mut self, local: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|element| element.is(local))
    }

    /// Get the child with the given local name, inserting an empty one when
    /// it does not exist yet.
    ///
    /// `successors` lists the local names that must come *after* the child
    /// according to the schema; the new element is inserted in front of
    /// the first of them that is present, or appended otherwise.
    pub fn get_or_insert_child(&mut self, local: &str, successors: &[&str]) -> &mut XmlElement {
        let existing = self
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.is(local)));

        let index = match existing {
            Some(index) => index,
            None => {
                let at = self
                    .children
                    .iter()
                    .position(|node| {
                        matches!(node, XmlNode::Element(e) if successors.contains(&e.local_name()))
                    })
                    .unwrap_or(self.children.len());
                let child = XmlElement::new(self.qualify(local));
                self.children.insert(at, XmlNode::Element(child));
                at
            },
        };

        match &mut self.children[index] {
            XmlNode::Element(element) => element,
            _ => unreachable!("index was selected from an element node"),
        }
    }

    /// Get the child with the given local name, inserting an empty one in
    /// front of all other children when it does not exist yet. Property
    /// containers such as `w:pPr` and `w:rPr` always come first.
    pub fn get_or_prepend_child(&mut self, local: &str) -> &mut XmlElement {
        let index = match self
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.is(local)))
        {
            Some(index) => index,
            None => {
                let child = XmlElement::new(self.qualify(local));
                self.children.insert(0, XmlNode::Element(child));
                0
            },
        };

        match &mut self.children[index] {
            XmlNode::Element(element) => element,
            _ => unreachable!("index was selected from an element node"),
        }
    }

    /// Remove every child element with the given local name. Returns the
    /// number of removed elements.
    pub fn remove_children(&mut self, local: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, XmlNode::Element(e) if e.is(local)));
        before - self.children.len()
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append character data, merging with a trailing text node.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
        } else {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Concatenated character data of this element and all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
                XmlNode::Raw(_) => {},
            }
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for node in &self.children {
            write_node(node, out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// A parsed XML part: optional leading comments and a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    prolog: Vec<XmlNode>,
    root: XmlElement,
}

impl XmlDocument {
    /// Wrap a root element.
    pub fn new(root: XmlElement) -> Self {
        Self {
            prolog: Vec::new(),
            root,
        }
    }

    /// Parse a complete XML part.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = Reader::from_reader(bytes);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut prolog = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(element_from_start(&e)?),
                Ok(Event::Empty(e)) => {
                    let element = element_from_start(&e)?;
                    attach(&mut stack, &mut root, element)?;
                },
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or(XmlError::UnbalancedEnd)?;
                    attach(&mut stack, &mut root, element)?;
                },
                Ok(Event::Text(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = std::str::from_utf8(&e)?;
                        let text = quick_xml::escape::unescape(raw)
                            .map_err(|err| XmlError::Parse(err.to_string()))?;
                        parent.push_text(text.into_owned());
                    }
                },
                Ok(Event::GeneralRef(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = format!("&{};", std::str::from_utf8(&e)?);
                        let text = quick_xml::escape::unescape(&raw)
                            .map_err(|err| XmlError::Parse(err.to_string()))?;
                        parent.push_text(text.into_owned());
                    }
                },
                Ok(Event::CData(e)) => {
                    let raw = format!("<![CDATA[{}]]>", std::str::from_utf8(&e)?);
                    push_raw(&mut stack, &mut prolog, root.is_some(), raw);
                },
                Ok(Event::Comment(e)) => {
                    let raw = format!("<!--{}-->", std::str::from_utf8(&e)?);
                    push_raw(&mut stack, &mut prolog, root.is_some(), raw);
                },
                Ok(Event::PI(e)) => {
                    let raw = format!("<?{}?>", std::str::from_utf8(&e)?);
                    push_raw(&mut stack, &mut prolog, root.is_some(), raw);
                },
                Ok(Event::DocType(e)) => {
                    let raw = format!("<!DOCTYPE {}>", std::str::from_utf8(&e)?);
                    push_raw(&mut stack, &mut prolog, root.is_some(), raw);
                },
                Ok(Event::Eof) => break,
                // The declaration is rewritten on output.
                Ok(_) => {},
                Err(e) => {
                    return Err(XmlError::Parse(format!(
                        "at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                },
            }
        }

        if !stack.is_empty() {
            return Err(XmlError::Parse(format!(
                "unclosed element <{}>",
                stack.last().map(XmlElement::name).unwrap_or_default()
            )));
        }
        let root = root.ok_or(XmlError::MissingRoot)?;
        Ok(Self { prolog, root })
    }

    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// Serialize the part with a standalone UTF-8 declaration.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(XML_DECLARATION);
        for node in &self.prolog {
            write_node(node, &mut out);
        }
        self.root.write_to(&mut out);
        out
    }

    /// Serialize the part to bytes.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml_string().into_bytes()
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Parse(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Parse(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(element);
            Ok(())
        },
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        },
        None => Err(XmlError::Parse(format!(
            "second root element <{}>",
            element.name()
        ))),
    }
}

fn push_raw(stack: &mut [XmlElement], prolog: &mut Vec<XmlNode>, after_root: bool, raw: String) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Raw(raw)),
        // Trailing comments after the root element are dropped.
        None if !after_root => prolog.push(XmlNode::Raw(raw)),
        None => {},
    }
}

fn write_node(node: &XmlNode, out: &mut String) {
    match node {
        XmlNode::Element(element) => element.write_to(out),
        XmlNode::Text(text) => out.push_str(&escape_text(text)),
        XmlNode::Raw(raw) => out.push_str(raw),
    }
}

#[inline]
fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

#[inline]
fn is_namespace_decl(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}
