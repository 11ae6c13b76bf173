//! End-to-end CLI tests: DOCX in, CSS out.

use std::fs;
use std::io::{Cursor, Write};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use cascadoc_cli::{convert_command, dump_styles_command};
use cascadoc_css::SerializerPreferences;

/// Create a minimal valid DOCX for testing
fn create_test_docx() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#).unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440"/>
    </w:sectPr>
  </w:body>
</w:document>"#).unwrap();

    zip.start_file("word/styles.xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:styleId="Normal" w:default="1">
    <w:name w:val="Normal"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:rPr><w:b/><w:sz w:val="32"/></w:rPr>
  </w:style>
  <w:style w:type="character" w:styleId="Emphasis">
    <w:name w:val="Emphasis"/>
    <w:rPr><w:i/></w:rPr>
  </w:style>
</w:styles>"#).unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

fn write_test_docx(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("input.docx");
    fs::write(&path, create_test_docx()).unwrap();
    path
}

#[test]
fn test_convert_writes_css_file() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let output = dir.path().join("styles.css");

    convert_command(&input, Some(&output), SerializerPreferences::default()).unwrap();

    let css = fs::read_to_string(&output).unwrap();
    assert!(css.contains("@page {"));
    assert!(css.contains("h1 {"));
    assert!(css.contains("font-weight: bold"));
    assert!(css.contains("span.Emphasis {"));
}

#[test]
fn test_convert_without_page_rule() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let output = dir.path().join("styles.css");

    let preferences = SerializerPreferences {
        include_page_rule: false,
        ..Default::default()
    };
    convert_command(&input, Some(&output), preferences).unwrap();

    let css = fs::read_to_string(&output).unwrap();
    assert!(!css.contains("@page"));
    assert!(css.contains("span.Emphasis {"));
}

#[test]
fn test_convert_with_simulated_page() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let output = dir.path().join("styles.css");

    let preferences = SerializerPreferences {
        simulate_printed_page: true,
        ..Default::default()
    };
    convert_command(&input, Some(&output), preferences).unwrap();

    let css = fs::read_to_string(&output).unwrap();
    assert!(css.contains("@media screen {"));
    assert!(css.contains("max-width: 6.5in"));
}

#[test]
fn test_dump_styles_produces_json() {
    let dir = TempDir::new().unwrap();
    let input = write_test_docx(&dir);
    let output = dir.path().join("styles.json");

    dump_styles_command(&input, Some(&output)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["page"]["page_width"].as_i64(), Some(7772400));
    assert!(json["paragraph_styles"]["entries"].is_array());
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.docx");
    let err = convert_command(&missing, None, SerializerPreferences::default()).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
