//! End-to-end tests: build .docx files on disk and drive the session
//! operations and in-memory editors against them.

use proptest::prelude::*;
use restyle::common::Emu;
use restyle::editor::{
    self, EditorError, ErrorKind, FormatTemplate, extract_paragraphs_and_headings, session,
};
use restyle::ooxml::docx::enums::WdParagraphAlignment;
use restyle::ooxml::docx::{LineSpacing, Package};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const APP_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>Test</Application></Properties>"#;

fn styles_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:qFormat/><w:rPr><w:color w:val="2F5496"/><w:sz w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:qFormat/></w:style><w:style w:type="character" w:default="1" w:styleId="DefaultParagraphFont"><w:name w:val="Default Paragraph Font"/></w:style></w:styles>"#
    )
}

/// Body with one paragraph per `(style id, text)`; `None` leaves the
/// paragraph on the default style.
fn document_xml(paragraphs: &[(Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (style, text) in paragraphs {
        body.push_str("<w:p>");
        if let Some(style) = style {
            body.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#));
        }
        body.push_str(&format!("<w:r><w:t>{text}</w:t></w:r></w:p>"));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn build_docx(paragraphs: &[(Option<&str>, &str)], with_styles: bool) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let mut add = |name: &str, data: &[u8]| {
        zip.start_file(name, options).unwrap();
        zip.write_all(data).unwrap();
    };
    add("[Content_Types].xml", CONTENT_TYPES.as_bytes());
    add("_rels/.rels", PACKAGE_RELS.as_bytes());
    add("docProps/app.xml", APP_XML);
    add("word/document.xml", document_xml(paragraphs).as_bytes());
    if with_styles {
        add("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes());
        add("word/styles.xml", styles_xml().as_bytes());
    }
    zip.finish().unwrap().into_inner()
}

fn write_docx(dir: &Path, name: &str, paragraphs: &[(Option<&str>, &str)]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_docx(paragraphs, true)).unwrap();
    path
}

const MIXED: [(Option<&str>, &str); 4] = [
    (None, "Intro"),
    (Some("Heading1"), "Chapter"),
    (Some("Heading2"), "Section"),
    (Some("Normal"), "Body"),
];

const PLAIN: [(Option<&str>, &str); 3] = [(None, "a"), (None, "b"), (None, "c")];

#[test]
fn test_extract_mixed_document() {
    let package = Package::from_bytes(&build_docx(&MIXED, true)).unwrap();
    let (paragraphs, headings) = extract_paragraphs_and_headings(package.document());

    assert_eq!(paragraphs.len(), 4);
    let styles: Vec<_> = paragraphs.iter().map(|p| p.style_name.as_str()).collect();
    assert_eq!(styles, ["Normal", "Heading 1", "Heading 2", "Normal"]);

    assert_eq!(headings.len(), 2);
    assert_eq!(headings.iter().map(|h| h.level).collect::<Vec<_>>(), [1, 2]);
    assert_eq!(headings.iter().map(|h| h.indent).collect::<Vec<_>>(), [0, 20]);
    assert_eq!(headings[1].index, 2);
    assert_eq!(headings[1].text, "Section");
}

#[test]
fn test_session_listing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "mixed.docx", &MIXED);

    let paragraphs = session::list_paragraphs(&path).unwrap();
    assert_eq!(paragraphs.len(), 4);
    let headings = session::list_headings(&path).unwrap();
    assert_eq!(headings.len(), 2);

    let json = serde_json::to_value(&paragraphs[1]).unwrap();
    assert_eq!(json["style"], "Heading 1");
    assert_eq!(json["text"], "Chapter");
}

#[test]
fn test_update_out_of_range_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "plain.docx", &PLAIN);
    let before = std::fs::read(&path).unwrap();

    let report = session::update_paragraph_style(&path, 5, "Heading 1");
    assert!(!report.is_success());
    assert_eq!(report.kind, Some(ErrorKind::NotFound));
    assert!(report.message.unwrap().contains("out of range"));
    // A rejected update leaves the file alone.
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_update_creates_heading_style() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "plain.docx", &PLAIN);

    let report = session::update_paragraph_style(&path, 1, "Heading 9");
    assert!(report.is_success());
    assert_eq!(serde_json::to_string(&report).unwrap(), r#"{"status":"success"}"#);

    let package = Package::open(&path).unwrap();
    let style = package.document().styles().get_by_name("Heading 9").unwrap();
    assert_eq!(style.based_on(), Some("Normal"));

    let headings = session::list_headings(&path).unwrap();
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].index, 1);
    assert_eq!(headings[0].level, 9);
    assert_eq!(headings[0].indent, 160);
}

#[test]
fn test_update_unknown_style() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "plain.docx", &PLAIN);

    let report = session::update_paragraph_style(&path, 0, "Nonexistent");
    assert_eq!(report.kind, Some(ErrorKind::Unsupported));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["kind"], "unsupported");
}

#[test]
fn test_heading_level_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "plain.docx", &PLAIN);

    assert!(session::update_heading_level(&path, 0, 1).is_success());
    assert!(session::update_heading_level(&path, 2, 3).is_success());
    let levels: Vec<_> = session::list_headings(&path)
        .unwrap()
        .into_iter()
        .map(|h| (h.index, h.level))
        .collect();
    assert_eq!(levels, [(0, 1), (2, 3)]);

    assert_eq!(session::reset_to_normal(&path).unwrap(), 3);
    assert!(session::list_headings(&path).unwrap().is_empty());
    assert!(
        session::list_paragraphs(&path)
            .unwrap()
            .iter()
            .all(|p| p.style_name == "Normal")
    );
}

#[test]
fn test_missing_styles_part_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.docx");
    std::fs::write(&path, build_docx(&PLAIN, false)).unwrap();

    let paragraphs = session::list_paragraphs(&path).unwrap();
    assert!(paragraphs.iter().all(|p| p.style_name == "Normal"));

    assert!(session::update_paragraph_style(&path, 0, "Heading 2").is_success());
    let package = Package::open(&path).unwrap();
    assert!(package.document().styles().contains("Heading 2"));
    assert_eq!(session::list_headings(&path).unwrap()[0].level, 2);
}

#[test]
fn test_apply_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "mixed.docx", &MIXED);
    let output = dir.path().join("formatted.docx");
    let before = std::fs::read(&path).unwrap();

    let template = FormatTemplate::default();
    let written = session::apply_format(&path, &template, Some(&output)).unwrap();
    assert_eq!(written, output);
    assert_eq!(std::fs::read(&path).unwrap(), before);

    let package = Package::open(&output).unwrap();
    let document = package.document();
    for paragraph in document.paragraphs() {
        let format = paragraph.format();
        assert_eq!(format.alignment(), Some(WdParagraphAlignment::Justify));
        assert_eq!(format.line_spacing(), Some(LineSpacing::Multiple(1.5)));
        assert_eq!(format.first_line_indent().map(Emu::to_twips), Some(720));
        for run in paragraph.runs() {
            assert_eq!(run.font().name(), Some("Times New Roman"));
            assert_eq!(run.font().size().map(Emu::to_half_points), Some(28));
        }
    }

    let section = document.sections().next().unwrap();
    assert_eq!(section.page_width().map(Emu::to_twips), Some(11906));
    assert_eq!(section.page_height().map(Emu::to_twips), Some(16838));
    assert_eq!(section.left_margin().map(Emu::to_twips), Some(1701));
    assert_eq!(section.top_margin().map(Emu::to_twips), Some(1134));

    let styles = document.styles();
    for entry in editor::catalog::entries() {
        let style = styles.get_by_name(&entry.style_name()).unwrap();
        assert_eq!(style.based_on(), Some("Normal"));
        assert_eq!(style.font().bold(), Some(entry.bold));
        assert_eq!(style.font().italic(), Some(entry.italic));
        assert_eq!(style.font().color(), None);
        assert_eq!(style.font().size().map(Emu::to_half_points), Some(26));
        assert_eq!(style.paragraph_format().alignment(), Some(entry.alignment));
    }

    // Parts the editor does not understand survive unchanged.
    let mut archive = zip::ZipArchive::new(std::fs::File::open(&output).unwrap()).unwrap();
    let mut app = Vec::new();
    std::io::Read::read_to_end(&mut archive.by_name("docProps/app.xml").unwrap(), &mut app)
        .unwrap();
    assert_eq!(app, APP_XML);
}

#[test]
fn test_apply_format_twice_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "mixed.docx", &MIXED);
    let template = FormatTemplate::default();

    session::apply_format(&path, &template, None).unwrap();
    let once = Package::open(&path).unwrap();
    session::apply_format(&path, &template, None).unwrap();
    let twice = Package::open(&path).unwrap();

    assert_eq!(once.document().to_bytes(), twice.document().to_bytes());
    assert_eq!(
        once.document().styles().to_bytes(),
        twice.document().styles().to_bytes()
    );
}

#[test]
fn test_format_with_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "plain.docx", &PLAIN);
    let config = dir.path().join("template.yaml");
    std::fs::write(&config, "font_name: Georgia\nbody_size_pt: 12\n").unwrap();

    let template = FormatTemplate::load(&config).unwrap();
    session::apply_format(&path, &template, None).unwrap();

    let package = Package::open(&path).unwrap();
    let run = package.document().paragraph(0).unwrap().runs().next().unwrap();
    assert_eq!(run.font().name(), Some("Georgia"));
    assert_eq!(run.font().size().map(Emu::to_half_points), Some(24));
}

#[test]
fn test_invalid_template_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "plain.docx", &PLAIN);
    let before = std::fs::read(&path).unwrap();

    let template = FormatTemplate {
        line_spacing: 0.0,
        ..FormatTemplate::default()
    };
    assert!(matches!(
        session::apply_format(&path, &template, None),
        Err(EditorError::Config(_))
    ));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_export_copy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "report.docx", &MIXED);
    let out_dir = dir.path().join("out");

    let written = session::export_copy(&path, &out_dir).unwrap();
    assert_eq!(written, out_dir.join("Modified_report.docx"));
    assert_eq!(
        session::list_paragraphs(&written).unwrap(),
        session::list_paragraphs(&path).unwrap()
    );

    assert!(matches!(
        session::export_copy(&dir.path().join("missing.docx"), &out_dir),
        Err(EditorError::NotFound(_))
    ));
}

fn template_strategy() -> impl Strategy<Value = FormatTemplate> {
    (
        prop::sample::select(vec!["Times New Roman", "Arial", "Georgia"]),
        8.0f64..30.0,
        8.0f64..30.0,
        1.0f64..3.0,
        0.0f64..3.0,
    )
        .prop_map(|(font, body, heading, spacing, indent)| FormatTemplate {
            font_name: font.to_string(),
            body_size_pt: body,
            heading_size_pt: heading,
            line_spacing: spacing,
            first_line_indent_cm: indent,
            ..FormatTemplate::default()
        })
}

proptest! {
    #[test]
    fn prop_format_is_idempotent(template in template_strategy()) {
        let mut package = Package::from_bytes(&build_docx(&MIXED, true)).unwrap();
        let document = package.document_mut();

        editor::apply_template(document, &template).unwrap();
        let body = document.to_bytes();
        let styles = document.styles().to_bytes();

        editor::apply_template(document, &template).unwrap();
        prop_assert_eq!(document.to_bytes(), body);
        prop_assert_eq!(document.styles().to_bytes(), styles);

        for entry in editor::catalog::entries() {
            let name = entry.style_name();
            let count = document.styles().iter().filter(|s| s.name() == Some(name.as_str())).count();
            prop_assert_eq!(count, 1);
        }
    }

    #[test]
    fn prop_heading_level_round_trips(level in 1u32..60, index in 0usize..3) {
        let mut package = Package::from_bytes(&build_docx(&PLAIN, true)).unwrap();
        editor::set_heading_level(package.document_mut(), index, level).unwrap();

        let (_, headings) = extract_paragraphs_and_headings(package.document());
        prop_assert_eq!(headings.len(), 1);
        prop_assert_eq!(headings[0].index, index);
        prop_assert_eq!(headings[0].level, i64::from(level));
        prop_assert_eq!(headings[0].indent, (i64::from(level) - 1) * 20);
    }
}
