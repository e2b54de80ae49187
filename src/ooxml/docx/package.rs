/// Package implementation for Word documents.
use crate::common::xml::XmlDocument;
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::styles::Styles;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, PackURI};
use std::io::{Read, Seek, Write};
use std::path::Path;

/// Main part content types this crate edits.
const MAIN_CONTENT_TYPES: [&str; 4] = [
    ct::WML_DOCUMENT_MAIN,
    ct::WML_TEMPLATE_MAIN,
    ct::WML_DOCUMENT_MACRO_MAIN,
    ct::WML_TEMPLATE_MACRO_MAIN,
];

/// A Word (.docx) package.
///
/// This is the main entry point for working with Word documents. It wraps
/// an OPC package, keeps the main document and styles parts parsed for
/// editing and writes them back on save. Every other part is carried
/// through untouched.
///
/// # Examples
///
/// ```rust,no_run
/// use restyle::ooxml::docx::Package;
///
/// let mut pkg = Package::open("document.docx")?;
/// println!("{} paragraphs", pkg.document().paragraph_count());
/// pkg.save("copy.docx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
    document_partname: PackURI,
    styles_partname: PackURI,
    document: Document,
}

impl Package {
    /// Open a .docx package from a file path.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or unreadable, is not a ZIP archive, has
    /// no WordprocessingML main part, or its XML is not well-formed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Load a .docx package from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    /// Create a .docx package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    fn from_opc(mut opc: OpcPackage) -> Result<Self> {
        // Verify it's a Word document by checking the main part's content type
        let document_partname = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main document part: {}", e)))?;

        let content_type = opc.content_type(&document_partname)?;
        if !MAIN_CONTENT_TYPES.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::WML_DOCUMENT_MAIN.to_string(),
                got: content_type.to_string(),
            });
        }

        let part = XmlDocument::parse(opc.blob(&document_partname)?)?;
        let (styles_partname, styles) = Self::load_styles(&mut opc, &document_partname)?;
        let document = Document::new(part, styles)?;

        Ok(Self {
            opc,
            document_partname,
            styles_partname,
            document,
        })
    }

    /// Find the styles part of the main document, adding one from the
    /// built-in template when the document has none.
    fn load_styles(opc: &mut OpcPackage, document_partname: &PackURI) -> Result<(PackURI, Styles)> {
        let mut rels = opc.rels_for(document_partname)?;
        let existing = match rels.find_reltype(rt::STYLES)? {
            Some(rel) => Some(rel.target_partname()?),
            None => None,
        };

        if let Some(partname) = existing {
            if opc.contains(&partname) {
                let styles = Styles::from_xml(opc.blob(&partname)?)?;
                return Ok((partname, styles));
            }
            // Dangling relationship: recreate the part where it points.
            let styles = Styles::default_template()?;
            opc.add_part(&partname, ct::WML_STYLES, styles.to_bytes());
            return Ok((partname, styles));
        }

        let partname = PackURI::from_rel_ref(document_partname.base_uri(), "styles.xml")
            .map_err(OoxmlError::InvalidFormat)?;
        let styles = Styles::default_template()?;
        rels.get_or_add(rt::STYLES, &partname.relative_ref(document_partname.base_uri()));
        opc.set_rels(document_partname, &rels);
        opc.add_part(&partname, ct::WML_STYLES, styles.to_bytes());
        Ok((partname, styles))
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Partname of the main document part, usually `/word/document.xml`.
    #[inline]
    pub fn document_partname(&self) -> &PackURI {
        &self.document_partname
    }

    #[inline]
    pub fn styles_partname(&self) -> &PackURI {
        &self.styles_partname
    }

    /// Write the edited parts back into the package and serialize it.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.opc
            .set_blob(&self.document_partname, self.document.to_bytes());
        self.opc
            .set_blob(&self.styles_partname, self.document.styles().to_bytes());
        Ok(self.opc.to_bytes()?)
    }

    /// Save the package to a file.
    ///
    /// The archive is written to a temporary file next to `path` and then
    /// renamed over it, so a failed save leaves an existing file intact.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        // The temporary file is private; an overwritten file keeps its mode.
        if let Ok(metadata) = std::fs::metadata(path) {
            file.as_file().set_permissions(metadata.permissions())?;
        }
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| OoxmlError::Io(e.error))?;
        Ok(())
    }
}
