//! Integration tests for docx-core
//!
//! These tests verify end-to-end archive handling with real zip data.

use docx_core::{plain_text_lines, DocxDocument, DocxError, MAIN_DOCUMENT_PART};
use pretty_assertions::assert_eq;
use std::io::{Cursor, Write};

/// Create a minimal valid DOCX package for testing
///
/// Built directly with the zip crate so the reader is tested against an
/// archive it did not write itself.
fn create_test_docx(body: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
        )
        .unwrap();

    writer.add_directory("word/", options).unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    writer.write_all(document.as_bytes()).unwrap();

    writer.finish().unwrap().into_inner()
}

#[test]
fn test_open_and_read_document() {
    let bytes = create_test_docx("<w:p><w:r><w:t>校外学習</w:t></w:r></w:p>");
    let doc = DocxDocument::open_from_bytes(&bytes).unwrap();

    let xml = doc.part_text(MAIN_DOCUMENT_PART).unwrap();
    assert_eq!(plain_text_lines(xml), vec!["校外学習"]);
    assert_eq!(doc.text_parts(), vec![MAIN_DOCUMENT_PART.to_string()]);
}

#[test]
fn test_modify_and_save_is_deflated_zip() {
    let bytes = create_test_docx("<w:p><w:r><w:t>before</w:t></w:r></w:p>");
    let mut doc = DocxDocument::open_from_bytes(&bytes).unwrap();

    let xml = doc.part_text(MAIN_DOCUMENT_PART).unwrap().replace("before", "after");
    doc.set_part_text(MAIN_DOCUMENT_PART, xml);
    let output = doc.to_bytes().unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(output.as_slice())).unwrap();
    {
        let file = archive.by_name("word/document.xml").unwrap();
        assert_eq!(file.compression(), zip::CompressionMethod::Deflated);
    }

    let reopened = DocxDocument::open_from_bytes(&output).unwrap();
    let lines = plain_text_lines(reopened.part_text(MAIN_DOCUMENT_PART).unwrap());
    assert_eq!(lines, vec!["after"]);
}

#[test]
fn test_save_and_open_from_path() {
    let bytes = create_test_docx("<w:p><w:r><w:t>disk</w:t></w:r></w:p>");
    let doc = DocxDocument::open_from_bytes(&bytes).unwrap();

    let path = std::env::temp_dir().join(format!("docx-core-test-{}.docx", std::process::id()));
    doc.save(&path).unwrap();

    let reopened = DocxDocument::open(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(reopened.has_part("[Content_Types].xml"));
    assert!(reopened.has_part(MAIN_DOCUMENT_PART));
}

#[test]
fn test_open_missing_file() {
    let result = DocxDocument::open("/nonexistent/path/fieldtrip.docx");
    assert!(matches!(result, Err(DocxError::IoError(_))));
}
