//! Style editing on top of the WordprocessingML object model.
//!
//! - [`catalog`]: the fixed heading levels and their emphasis/alignment
//! - [`formatter`]: document-wide formatting and the "Normal"/heading styles
//! - [`extract`]: paragraph and heading views
//! - [`mutator`]: reassigning a paragraph's style
//! - [`session`]: the above as open-edit-save operations on a file path
//!
//! The in-memory operations work on a [`Document`](crate::ooxml::docx::Document)
//! and never touch the file system.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod formatter;
pub mod mutator;
pub mod session;

pub use catalog::{HEADING_CATALOG, StyleCatalogEntry};
pub use config::FormatTemplate;
pub use error::{EditorError, ErrorKind, ReportStatus, Result, StyleUpdateReport};
pub use extract::{HeadingView, ParagraphView, extract_paragraphs_and_headings};
pub use formatter::{apply_document_format, apply_template, ensure_heading_styles, ensure_normal_style};
pub use mutator::{reset_to_normal, set_heading_level, set_paragraph_style};
