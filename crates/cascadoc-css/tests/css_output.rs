//! End-to-end CSS generation over programmatically built stylesheets.

use cascadoc_css::{CssStylesheetSerializer, SerializerPreferences};
use cascadoc_model::{
    Border, BorderStyle, Counter, CounterSegment, CssColor, CssUnit, ParagraphFormatting,
    ParagraphStyle, SpanStyle, Stylesheet, TableProperties, TableStyle,
    TableConditionalFormatting, TextFormatting,
};

fn serialize(sheet: &Stylesheet) -> String {
    CssStylesheetSerializer::new().serialize(sheet).unwrap()
}

#[test]
fn test_span_style_rule() {
    let mut sheet = Stylesheet::new();
    sheet.add_span_style(SpanStyle {
        id: "Emphasis".to_string(),
        name: "Emphasis".to_string(),
        text: TextFormatting {
            italics: Some(true),
            font_color: Some(CssColor::from_hex("4472C4").unwrap()),
            ..Default::default()
        },
        ..Default::default()
    });
    assert_eq!(
        serialize(&sheet),
        "span.Emphasis {\n    font-style: italic;\n    color: #4472C4\n}"
    );
}

#[test]
fn test_heading_selector_covers_children() {
    let mut sheet = Stylesheet::new();
    sheet.add_paragraph_style(ParagraphStyle {
        id: String::new(),
        name: "Normal".to_string(),
        text: TextFormatting {
            font_size: Some(CssUnit::new(11.0, "pt").unwrap()),
            ..Default::default()
        },
        ..Default::default()
    });
    sheet.add_paragraph_style(ParagraphStyle {
        id: "Heading1".to_string(),
        name: "Heading 1".to_string(),
        parent_id: Some(String::new()),
        text: TextFormatting {
            bold: Some(true),
            ..Default::default()
        },
        ..Default::default()
    });
    sheet.add_paragraph_style(ParagraphStyle {
        id: "Body".to_string(),
        name: "Body Text".to_string(),
        parent_id: Some(String::new()),
        ..Default::default()
    });
    sheet.link_children();

    let css = serialize(&sheet);
    // The root style covers plain paragraphs and headings; styled
    // non-heading children keep their own class rules.
    assert!(css.contains("p, h1 {\n    font-size: 11pt\n}"));
    assert!(css.contains("h1 {\n    font-weight: bold\n}"));
}

#[test]
fn test_odd_row_banding_selectors() {
    let mut sheet = Stylesheet::new();
    sheet.add_table_style(TableStyle {
        id: "Banded".to_string(),
        name: "Banded".to_string(),
        table: TableProperties {
            row_band_size: Some(2),
            odd_rows: Some(TableConditionalFormatting {
                text: TextFormatting {
                    bold: Some(true),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    });

    assert_eq!(
        serialize(&sheet),
        "table.Banded tr:nth-child(4n+1) td, table.Banded tr:nth-child(4n+2) td {\n\
         \x20   font-weight: bold\n}"
    );
}

#[test]
fn test_inside_borders_hide_table_border_model() {
    let mut sheet = Stylesheet::new();
    sheet.add_table_style(TableStyle {
        id: "Grid".to_string(),
        name: "Grid".to_string(),
        table: TableProperties {
            border_inside_horizontal: Some(Border {
                style: Some(BorderStyle::Solid),
                width: Some(CssUnit::new(0.5, "pt").unwrap()),
                color: Some(CssColor::from_hex("000000").unwrap()),
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    });

    let css = serialize(&sheet);
    assert!(css.contains(
        "table.Grid {\n    border-style: hidden;\n    border-collapse: collapse\n}"
    ));
    assert!(css.contains(
        "table.Grid td {\n\
         \x20   border-bottom-style: solid;\n\
         \x20   border-bottom-width: 0.50pt;\n\
         \x20   border-bottom-color: #000000\n}"
    ));
}

#[test]
fn test_counter_rules_and_body_reset() {
    let mut sheet = Stylesheet::new();
    let counter = Counter {
        name: "items-L0".to_string(),
        style: "decimal".to_string(),
        start: 1,
        text: vec![
            CounterSegment::Reference("items-L0".to_string()),
            CounterSegment::Literal(".".to_string()),
        ],
        paragraph_formatting: ParagraphFormatting {
            indent_left: Some(CssUnit::new(36.0, "pt").unwrap()),
            text_indent: Some(CssUnit::new(-18.0, "pt").unwrap()),
            ..Default::default()
        },
        ..Default::default()
    };
    sheet.counter_lists.push(cascadoc_model::CounterList {
        id: 1,
        name: "items".to_string(),
        counters: vec![counter.clone()],
    });
    sheet.add_paragraph_style(ParagraphStyle {
        id: "ListItem".to_string(),
        name: "List Item".to_string(),
        counter: Some(counter),
        ..Default::default()
    });

    let css = serialize(&sheet);
    assert!(css.contains("body {\n    counter-reset: items-L0\n}"));
    assert!(css.contains("p.ListItem {\n    margin-left: 36pt\n}"));
    let before = css
        .split("p.ListItem:before {\n")
        .nth(1)
        .expect("marker rule present");
    assert!(before.contains("counter-increment: items-L0"));
    assert!(before.contains("content: counter(items-L0, decimal) \".\""));
    assert!(before.contains("display: inline-block"));
    assert!(before.contains("width: 18pt"));
}

#[test]
fn test_paragraph_indents_win_over_counter_level() {
    let mut sheet = Stylesheet::new();
    let counter = Counter {
        name: "steps-L0".to_string(),
        style: "decimal".to_string(),
        start: 1,
        text: vec![
            CounterSegment::Reference("steps-L0".to_string()),
            CounterSegment::Literal(".".to_string()),
        ],
        paragraph_formatting: ParagraphFormatting {
            indent_left: Some(CssUnit::new(36.0, "pt").unwrap()),
            text_indent: Some(CssUnit::new(-18.0, "pt").unwrap()),
            ..Default::default()
        },
        ..Default::default()
    };
    sheet.add_paragraph_style(ParagraphStyle {
        id: "Step".to_string(),
        name: "Step".to_string(),
        paragraph: ParagraphFormatting {
            indent_left: Some(CssUnit::new(72.0, "pt").unwrap()),
            ..Default::default()
        },
        counter: Some(counter),
        ..Default::default()
    });

    let css = serialize(&sheet);
    assert!(css.contains("p.Step {\n    margin-left: 72pt\n}"));
    assert!(!css.contains("margin-left: 36pt"));
    // the level's hanging indent still sizes the marker
    assert!(css.contains("width: 18pt"));
}

#[test]
fn test_document_order_is_preserved() {
    let mut sheet = Stylesheet::new();
    sheet.add_table_style(TableStyle {
        id: "First".to_string(),
        name: "First".to_string(),
        table: TableProperties {
            layout: Some("fixed".to_string()),
            ..Default::default()
        },
        ..Default::default()
    });
    sheet.add_span_style(SpanStyle {
        id: "Second".to_string(),
        name: "Second".to_string(),
        text: TextFormatting {
            bold: Some(true),
            ..Default::default()
        },
        ..Default::default()
    });

    let css = serialize(&sheet);
    let table_pos = css.find("table.First").unwrap();
    let span_pos = css.find("span.Second").unwrap();
    assert!(table_pos < span_pos);
}

#[test]
fn test_simulated_page_block() {
    let mut sheet = Stylesheet::new();
    sheet.page = Some(cascadoc_model::PageStyle {
        page_width: CssUnit::new(8.5, "in").unwrap(),
        page_height: CssUnit::new(11.0, "in").unwrap(),
        margin_top: CssUnit::new(1.0, "in").unwrap(),
        margin_right: CssUnit::new(0.75, "in").unwrap(),
        margin_bottom: CssUnit::new(1.0, "in").unwrap(),
        margin_left: CssUnit::new(0.75, "in").unwrap(),
    });
    let serializer = CssStylesheetSerializer::with_preferences(SerializerPreferences {
        simulate_printed_page: true,
        ..Default::default()
    });
    let css = serializer.serialize(&sheet).unwrap();
    assert!(css.starts_with("@page {\n    size: 8.5in 11in;\n    margin: 1in 0.75in 1in 0.75in\n}"));
    assert!(css.contains("@media screen {"));
    assert!(css.contains("max-width: 7in"));
}
