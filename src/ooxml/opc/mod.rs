/// Open Packaging Conventions (OPC) implementation.
///
/// This module provides the parts of the OPC specification that an editor
/// of WordprocessingML packages needs:
///
/// - ZIP-based physical packaging that keeps member order
/// - `[Content_Types].xml` lookups and overrides
/// - Relationship parts (`.rels`) and pack URI resolution
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use error::OpcError;
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
