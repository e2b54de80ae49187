/// Word (.docx) document support.
///
/// This module provides reading and in-place editing of Microsoft Word
/// documents in the Office Open XML (OOXML) format (.docx files).
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `Package`: The overall .docx file package
/// - `Document`: The main document content and its styles
/// - `Paragraph` / `Run`: Paragraph text, style reference and formatting
/// - `Section`: Page size and margins
/// - `Styles` / `Style`: Style definitions reached by name or id
///
/// Every view borrows the parsed part; the `*Mut` variants edit it in
/// place and `Package::save` writes the result.
///
/// # Example
///
/// ```rust,no_run
/// use restyle::ooxml::docx::Package;
/// use restyle::ooxml::docx::enums::WdParagraphAlignment;
///
/// let mut package = Package::open("document.docx")?;
/// for mut para in package.document_mut().paragraphs_mut() {
///     para.format_mut().set_alignment(Some(WdParagraphAlignment::Justify));
/// }
/// package.save("document.docx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod document;
pub mod enums;
pub mod format;
pub mod package;
pub mod paragraph;
mod schema;
pub mod section;
pub mod styles;
pub mod template;

pub use document::Document;
pub use format::{Font, FontMut, LineSpacing, ParagraphFormat, ParagraphFormatMut};
pub use package::Package;
pub use paragraph::{Paragraph, ParagraphMut, Run, RunMut};
pub use section::{Section, SectionMut};
pub use styles::{Style, StyleLookup, StyleMut, Styles};
