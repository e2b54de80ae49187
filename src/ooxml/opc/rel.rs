use crate::common::xml::{XmlDocument, XmlElement};
use crate::ooxml::opc::constants::{namespace, target_mode};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
/// Relationship-related objects for OPC packages.
///
/// A `.rels` part lists the relationships from one source (a part or the
/// package itself) to its targets. Relationships keep their document order
/// so that a part written back lists them the way it was read.

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Base URI for resolving relative references
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// For internal relationships, this is a relative part reference.
    /// For external relationships, this is an absolute URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} points outside the package",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Collection of relationships from a single source.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection for a source whose
    /// targets resolve against `base_uri`.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: Vec::new(),
        }
    }

    /// Parse a `.rels` part.
    pub fn from_xml(base_uri: impl Into<String>, xml: &[u8]) -> Result<Self> {
        let mut rels = Self::new(base_uri);
        let doc = XmlDocument::parse(xml).map_err(|e| OpcError::xml("relationships", e))?;

        for element in doc.root().children_named("Relationship") {
            let (Some(r_id), Some(reltype), Some(target)) =
                (element.attr("Id"), element.attr("Type"), element.attr("Target"))
            else {
                return Err(OpcError::InvalidRelationship(
                    "Relationship element without Id, Type or Target".to_string(),
                ));
            };
            let is_external = element.attr("TargetMode") == Some(target_mode::EXTERNAL);
            rels.add_relationship(reltype, target, r_id, is_external);
        }

        Ok(rels)
    }

    /// Add a relationship to the collection.
    pub fn add_relationship(
        &mut self,
        reltype: impl Into<String>,
        target_ref: impl Into<String>,
        r_id: impl Into<String>,
        is_external: bool,
    ) -> &Relationship {
        self.rels.push(Relationship {
            r_id: r_id.into(),
            reltype: reltype.into(),
            target_ref: target_ref.into(),
            base_uri: self.base_uri.clone(),
            is_external,
        });
        &self.rels[self.rels.len() - 1]
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Get or add an internal relationship to a target part.
    ///
    /// If a relationship of the given type to the target already exists,
    /// returns that relationship. Otherwise, creates a new one with the
    /// next available rId.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> &Relationship {
        let existing = self.rels.iter().position(|rel| {
            rel.reltype == reltype && rel.target_ref == target_ref && !rel.is_external
        });
        match existing {
            Some(index) => &self.rels[index],
            None => {
                let r_id = self.next_r_id();
                self.add_relationship(reltype, target_ref, r_id, false)
            },
        }
    }

    /// Get the next available relationship ID, filling gaps first.
    fn next_r_id(&self) -> String {
        let mut used_numbers: Vec<u32> = self
            .rels
            .iter()
            .filter_map(|rel| rel.r_id.strip_prefix("rId"))
            .filter_map(|digits| digits.parse::<u32>().ok())
            .collect();
        used_numbers.sort_unstable();

        let mut next_num = 1u32;
        for &num in &used_numbers {
            match num.cmp(&next_num) {
                std::cmp::Ordering::Equal => next_num += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }

        format!("rId{}", next_num)
    }

    /// Get the relationship of a specific type.
    ///
    /// Returns an error if no relationship of the type is found,
    /// or if multiple relationships of the type exist.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.iter().filter(|rel| rel.reltype == reltype);
        match (matching.next(), matching.next()) {
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(rel), None) => Ok(rel),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    /// Like [`part_with_reltype`](Self::part_with_reltype) but returns
    /// `None` when the relationship is absent.
    pub fn find_reltype(&self, reltype: &str) -> Result<Option<&Relationship>> {
        match self.part_with_reltype(reltype) {
            Ok(rel) => Ok(Some(rel)),
            Err(OpcError::RelationshipNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to a `.rels` part.
    pub fn to_xml(&self) -> Vec<u8> {
        let mut root =
            XmlElement::new("Relationships").with_attr("xmlns", namespace::OPC_RELATIONSHIPS);
        for rel in &self.rels {
            let mut element = XmlElement::new("Relationship")
                .with_attr("Id", rel.r_id.as_str())
                .with_attr("Type", rel.reltype.as_str())
                .with_attr("Target", rel.target_ref.as_str());
            if rel.is_external {
                element = element.with_attr("TargetMode", target_mode::EXTERNAL);
            }
            root.push_child(element);
        }
        XmlDocument::new(root).to_bytes()
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/")
    }
}
