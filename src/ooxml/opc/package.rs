/// Objects that implement reading and writing OPC packages.
///
/// `OpcPackage` keeps every part as raw bytes in archive order together
/// with the parsed `[Content_Types].xml`. Format layers read the parts they
/// understand, replace their blobs after editing, and the package writes
/// everything back. Parts nobody touched are written unchanged.
use crate::common::xml::{XmlDocument, XmlElement};
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{PhysMember, PhysPkgReader, PhysPkgWriter};
use crate::ooxml::opc::rel::Relationships;
use std::io::{Read, Seek};
use std::path::Path;

/// Main API class for working with OPC packages.
#[derive(Debug)]
pub struct OpcPackage {
    /// All parts except `[Content_Types].xml`, in archive order
    parts: Vec<PhysMember>,

    content_types: ContentTypes,
}

impl OpcPackage {
    /// Open an OPC package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::open(path)?)
    }

    /// Load an OPC package from an in-memory archive.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::from_bytes(data)?)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::from_reader(reader)?)
    }

    fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        let content_types_uri =
            PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;

        let mut content_types = None;
        let mut parts = Vec::with_capacity(phys_reader.len());
        for member in phys_reader.into_members() {
            if member.uri.as_str().eq_ignore_ascii_case(content_types_uri.as_str()) {
                content_types = Some(ContentTypes::from_xml(&member.blob)?);
            } else {
                parts.push(member);
            }
        }

        let content_types = content_types
            .ok_or_else(|| OpcError::PartNotFound(CONTENT_TYPES_URI.to_string()))?;

        Ok(Self {
            parts,
            content_types,
        })
    }

    /// Get the raw content of a part.
    pub fn blob(&self, partname: &PackURI) -> Result<&[u8]> {
        self.find(partname)
            .map(|index| self.parts[index].blob.as_slice())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Check whether a part exists.
    pub fn contains(&self, partname: &PackURI) -> bool {
        self.find(partname).is_some()
    }

    /// Replace the content of a part, appending a new part when it does
    /// not exist yet.
    pub fn set_blob(&mut self, partname: &PackURI, blob: Vec<u8>) {
        match self.find(partname) {
            Some(index) => self.parts[index].blob = blob,
            None => self.parts.push(PhysMember {
                uri: partname.clone(),
                blob,
            }),
        }
    }

    /// Add a new part with an explicit content type override.
    pub fn add_part(&mut self, partname: &PackURI, content_type: &str, blob: Vec<u8>) {
        self.content_types.add_override(partname, content_type);
        self.set_blob(partname, blob);
    }

    /// Content type of a part, from its override or its extension default.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        self.content_types
            .lookup(partname)
            .ok_or_else(|| OpcError::ContentTypeNotFound(partname.to_string()))
    }

    /// Relationships whose source is `source` (use [`PackURI::package`]
    /// for package-level relationships). Missing `.rels` parts yield an
    /// empty collection.
    pub fn rels_for(&self, source: &PackURI) -> Result<Relationships> {
        let rels_uri = source.rels_uri();
        match self.find(&rels_uri) {
            Some(index) => Relationships::from_xml(source.base_uri(), &self.parts[index].blob),
            None => Ok(Relationships::new(source.base_uri())),
        }
    }

    /// Replace the relationships of `source`.
    pub fn set_rels(&mut self, source: &PackURI, rels: &Relationships) {
        self.set_blob(&source.rels_uri(), rels.to_xml());
    }

    /// Partname of the main document part, reached through the package
    /// `officeDocument` relationship.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        let rels = self.rels_for(&PackURI::package())?;
        rels.part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    /// Iterate over partnames in archive order.
    pub fn partnames(&self) -> impl Iterator<Item = &PackURI> {
        self.parts.iter().map(|member| &member.uri)
    }

    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Serialize the package to ZIP bytes, content types first.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = PhysPkgWriter::new();
        let content_types_uri =
            PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        writer.write(&content_types_uri, &self.content_types.to_xml())?;
        for member in &self.parts {
            writer.write(&member.uri, &member.blob)?;
        }
        writer.finish()
    }

    fn find(&self, partname: &PackURI) -> Option<usize> {
        self.parts
            .iter()
            .position(|member| member.uri.as_str().eq_ignore_ascii_case(partname.as_str()))
    }
}

/// The `[Content_Types].xml` part.
#[derive(Debug, Clone)]
struct ContentTypes {
    xml: XmlDocument,
}

impl ContentTypes {
    fn from_xml(bytes: &[u8]) -> Result<Self> {
        let xml = XmlDocument::parse(bytes).map_err(|e| OpcError::xml(CONTENT_TYPES_URI, e))?;
        Ok(Self { xml })
    }

    /// Overrides win over extension defaults; both compare case-insensitively.
    fn lookup(&self, partname: &PackURI) -> Option<&str> {
        let root = self.xml.root();
        let by_override = root
            .children_named("Override")
            .find(|o| {
                o.attr("PartName")
                    .is_some_and(|name| name.eq_ignore_ascii_case(partname.as_str()))
            })
            .and_then(|o| o.attr("ContentType"));
        by_override.or_else(|| {
            root.children_named("Default")
                .find(|d| {
                    d.attr("Extension")
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(partname.ext()))
                })
                .and_then(|d| d.attr("ContentType"))
        })
    }

    fn add_override(&mut self, partname: &PackURI, content_type: &str) {
        let root = self.xml.root_mut();
        if let Some(existing) = root.elements_mut().find(|o| {
            o.is("Override")
                && o.attr("PartName")
                    .is_some_and(|name| name.eq_ignore_ascii_case(partname.as_str()))
        }) {
            existing.set_attr("ContentType", content_type);
            return;
        }
        root.push_child(
            XmlElement::new("Override")
                .with_attr("PartName", partname.as_str())
                .with_attr("ContentType", content_type),
        );
    }

    fn to_xml(&self) -> Vec<u8> {
        self.xml.to_bytes()
    }
}
