//! Office Open XML (OOXML) support for Word documents.
//!
//! The implementation follows the layering of the python-docx object model,
//! adapted for Rust:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, content types, relationships)
//! 2. **WordprocessingML** (`docx`): documents, paragraphs, sections and styles
//!
//! # Example
//!
//! ```rust,no_run
//! use restyle::ooxml::docx::Package;
//!
//! let mut pkg = Package::open("document.docx")?;
//! for para in pkg.document().paragraphs() {
//!     println!("{}", para.text());
//! }
//! pkg.save("document.docx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
