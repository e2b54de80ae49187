//! Restyle - reformat Word (.docx) documents.
//!
//! This library reads and rewrites the main document and styles parts of
//! a WordprocessingML package while carrying every other part through
//! unchanged.
//!
//! # Features
//!
//! - **Paragraph extraction**: text and effective style name of every body
//!   paragraph, plus a heading outline with levels and indents
//! - **Style reassignment**: set a paragraph's style by name, creating
//!   missing "Heading N" styles on the fly
//! - **Document formatting**: apply a fixed typographic template (font,
//!   sizes, justification, line spacing, indents, page size and margins)
//!   and normalise the "Normal" and heading styles
//!
//! # Example
//!
//! ```no_run
//! use restyle::ooxml::docx::Package;
//! use restyle::editor::{FormatTemplate, apply_template, extract_paragraphs_and_headings, set_paragraph_style};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("report.docx")?;
//!
//! set_paragraph_style(pkg.document_mut(), 0, "Heading 1")?;
//! apply_template(pkg.document_mut(), &FormatTemplate::default())?;
//!
//! let (_, headings) = extract_paragraphs_and_headings(pkg.document());
//! for heading in &headings {
//!     println!("{:indent$}{}", "", heading.text, indent = heading.indent as usize / 10);
//! }
//!
//! pkg.save("report.docx")?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod editor;
pub mod ooxml;

pub use editor::{EditorError, ErrorKind, FormatTemplate, StyleUpdateReport};
pub use ooxml::docx::Package;
