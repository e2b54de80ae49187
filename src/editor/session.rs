//! Path-scoped units of work.
//!
//! Each operation opens a package, does one thing and, when it changed
//! anything, saves the package back to disk. Nothing is kept between
//! calls.

use crate::editor::config::FormatTemplate;
use crate::editor::error::{EditorError, ErrorKind, Result, StyleUpdateReport};
use crate::editor::extract::{self, HeadingView, ParagraphView};
use crate::editor::{formatter, mutator};
use crate::ooxml::docx::Package;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Prefix of the file name written by [`export_copy`].
pub const EXPORT_PREFIX: &str = "Modified_";

/// All body paragraphs of the document at `path`.
pub fn list_paragraphs(path: &Path) -> Result<Vec<ParagraphView>> {
    let package = Package::open(path)?;
    let paragraphs = extract::extract_paragraphs(package.document());
    info!(path = %path.display(), paragraphs = paragraphs.len(), "listed paragraphs");
    Ok(paragraphs)
}

/// The heading outline of the document at `path`.
pub fn list_headings(path: &Path) -> Result<Vec<HeadingView>> {
    let package = Package::open(path)?;
    let (_, headings) = extract::extract_paragraphs_and_headings(package.document());
    info!(path = %path.display(), headings = headings.len(), "listed headings");
    Ok(headings)
}

/// Restyle one paragraph and save the document.
///
/// Never fails: missing paragraphs, unusable styles and broken documents
/// come back as an error report of that kind. Anything else is logged and
/// reported without detail.
pub fn update_paragraph_style(path: &Path, index: usize, style_name: &str) -> StyleUpdateReport {
    report(path, try_update(path, |package| {
        mutator::set_paragraph_style(package.document_mut(), index, style_name)
    }))
}

/// Turn one paragraph into a heading of `level` and save the document.
pub fn update_heading_level(path: &Path, index: usize, level: u32) -> StyleUpdateReport {
    report(path, try_update(path, |package| {
        mutator::set_heading_level(package.document_mut(), index, level)
    }))
}

/// Apply `template` to the whole document and save it to `output`, or back
/// to `path` when no output is given. Returns where it was written.
pub fn apply_format(path: &Path, template: &FormatTemplate, output: Option<&Path>) -> Result<PathBuf> {
    let mut package = Package::open(path)?;
    formatter::apply_template(package.document_mut(), template)?;

    let target = output.unwrap_or(path);
    package.save(target)?;
    info!(path = %path.display(), output = %target.display(), "applied document format");
    Ok(target.to_path_buf())
}

/// Set every paragraph to "Normal" and save. Returns the number of
/// paragraphs reset.
pub fn reset_to_normal(path: &Path) -> Result<usize> {
    let mut package = Package::open(path)?;
    let count = mutator::reset_to_normal(package.document_mut())?;
    package.save(path)?;
    info!(path = %path.display(), paragraphs = count, "reset paragraph styles");
    Ok(count)
}

/// Write a copy of the document into `out_dir` as `Modified_<name>`.
///
/// The document is loaded first, so only a readable package is exported.
pub fn export_copy(path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| EditorError::NotFound(format!("document {}", path.display())))?;
    let mut package = Package::open(path)?;

    fs::create_dir_all(out_dir)?;
    let mut name = std::ffi::OsString::from(EXPORT_PREFIX);
    name.push(file_name);
    let target = out_dir.join(name);
    package.save(&target)?;
    info!(path = %path.display(), output = %target.display(), "exported copy");
    Ok(target)
}

fn try_update<F>(path: &Path, edit: F) -> Result<()>
where
    F: FnOnce(&mut Package) -> Result<()>,
{
    let mut package = Package::open(path)?;
    edit(&mut package)?;
    package.save(path)?;
    Ok(())
}

fn report(path: &Path, result: Result<()>) -> StyleUpdateReport {
    match result {
        Ok(()) => {
            info!(path = %path.display(), "updated paragraph style");
            StyleUpdateReport::success()
        },
        Err(e) => match e.kind() {
            kind @ (ErrorKind::NotFound | ErrorKind::Unsupported | ErrorKind::Malformed) => {
                info!(path = %path.display(), kind = %kind, "style update rejected: {}", e);
                StyleUpdateReport::failure(kind, e.to_string())
            },
            _ => {
                error!(path = %path.display(), "style update failed: {}", e);
                StyleUpdateReport::generic_failure()
            },
        },
    }
}
