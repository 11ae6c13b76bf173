//! End-to-end package tests over a docx archive built in memory.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use cascadoc_ooxml::{DocxPackage, OoxmlError};

const CONTENT_TYPES: &str = r#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Override PartName="/word/document.xml"
        ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
    <Override PartName="/word/styles.xml"
        ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
    <Override PartName="/word/numbering.xml"
        ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
    <Override PartName="/word/theme/theme1.xml"
        ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
</Types>"#;

const DOCUMENT: &str = r#"<w:document xmlns:w="x"><w:body>
    <w:sectPr>
        <w:pgSz w:w="12240" w:h="15840"/>
        <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440"/>
    </w:sectPr>
</w:body></w:document>"#;

const STYLES: &str = r#"<w:styles xmlns:w="x">
    <w:docDefaults>
        <w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault>
    </w:docDefaults>
    <w:style w:type="paragraph" w:styleId="Normal" w:default="1">
        <w:name w:val="Normal"/>
    </w:style>
    <w:style w:type="paragraph" w:styleId="ListParagraph">
        <w:name w:val="List Paragraph"/>
        <w:basedOn w:val="Normal"/>
        <w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr>
    </w:style>
    <w:style w:type="character" w:styleId="Strong">
        <w:name w:val="Strong"/>
        <w:rPr><w:b/><w:color w:themeColor="accent1"/></w:rPr>
    </w:style>
</w:styles>"#;

const NUMBERING: &str = r#"<w:numbering xmlns:w="x">
    <w:abstractNum w:abstractNumId="0">
        <w:name w:val="Chapters"/>
        <w:lvl w:ilvl="0">
            <w:start w:val="1"/>
            <w:numFmt w:val="decimal"/>
            <w:lvlText w:val="%1."/>
        </w:lvl>
    </w:abstractNum>
    <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

const THEME: &str = r#"<a:theme xmlns:a="x">
    <a:clrScheme><a:accent1><a:srgbClr a:val="4472C4"/></a:accent1></a:clrScheme>
</a:theme>"#;

fn build_docx(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (path, contents) in entries {
        writer.start_file(*path, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn full_docx() -> Vec<u8> {
    build_docx(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", DOCUMENT),
        ("word/styles.xml", STYLES),
        ("word/numbering.xml", NUMBERING),
        ("word/theme/theme1.xml", THEME),
    ])
}

#[test]
fn test_open_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.docx");
    std::fs::write(&path, full_docx()).unwrap();

    let package = DocxPackage::open(&path).unwrap();
    assert!(package.stylesheet.paragraph_styles.contains("ListParagraph"));
}

#[test]
fn test_page_geometry_from_last_section() {
    let package = DocxPackage::from_reader(Cursor::new(full_docx())).unwrap();
    let page = package.stylesheet.page.unwrap();
    assert_eq!(page.page_width.inches(), 8.5);
    assert_eq!(page.page_height.inches(), 11.0);
    assert_eq!(page.margin_left.inches(), 1.0);
}

#[test]
fn test_theme_color_resolved_into_span_style() {
    let package = DocxPackage::from_reader(Cursor::new(full_docx())).unwrap();
    let strong = package.stylesheet.span_styles.get("Strong").unwrap();
    assert_eq!(strong.text.bold, Some(true));
    assert_eq!(strong.text.font_color.as_ref().unwrap().css(), "#4472C4");
}

#[test]
fn test_numbering_attached_through_num_pr() {
    let package = DocxPackage::from_reader(Cursor::new(full_docx())).unwrap();
    assert_eq!(package.stylesheet.counter_lists.len(), 1);
    let style = package.stylesheet.paragraph_styles.get("ListParagraph").unwrap();
    assert_eq!(style.counter.as_ref().unwrap().name, "Chapters-L0");
}

#[test]
fn test_doc_defaults_reach_the_body_style() {
    let package = DocxPackage::from_reader(Cursor::new(full_docx())).unwrap();
    assert_eq!(package.stylesheet.body.text.font_size.unwrap().pt(), 11.0);
}

#[test]
fn test_missing_styles_part_is_an_error() {
    let bytes = build_docx(&[
        (
            "[Content_Types].xml",
            r#"<Types xmlns="x"><Override PartName="/word/document.xml"
                ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
        ),
        ("word/document.xml", DOCUMENT),
    ]);
    let err = DocxPackage::from_reader(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, OoxmlError::MissingPart(_)));
}

#[test]
fn test_not_a_zip_is_an_archive_error() {
    let err = DocxPackage::from_reader(Cursor::new(b"plain text".to_vec())).unwrap_err();
    assert!(matches!(err, OoxmlError::Archive(_)));
}
