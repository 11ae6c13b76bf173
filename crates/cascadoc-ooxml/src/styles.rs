//! `styles.xml` parsing: document defaults and the style forest.

use cascadoc_model::{
    ParagraphStyle, SpanStyle, Stylesheet, TableConditionalFormatting, TableStyle,
};

use crate::error::Result;
use crate::fonts::FontTable;
use crate::numbering::Numbering;
use crate::properties::{
    parse_cell_properties, parse_paragraph_properties, parse_row_properties,
    parse_run_properties, parse_table_properties,
};
use crate::theme::Theme;
use crate::xml::XmlEl;

/// Word's built-in character style that carries no formatting of its own
const DEFAULT_CHARACTER_STYLE: &str = "Default Paragraph Font";

/// Parse a `w:styles` root into the stylesheet. Numbering must already
/// be parsed so paragraph styles can pick up their counters.
pub fn parse_styles(
    root: &XmlEl,
    theme: &Theme,
    fonts: &FontTable,
    numbering: &Numbering,
    sheet: &mut Stylesheet,
) -> Result<()> {
    if let Some(defaults) = root.find("docDefaults") {
        parse_doc_defaults(defaults, theme, fonts, sheet)?;
    }

    // The root paragraph and table styles normalize to the empty id so
    // they serialize as bare `p` and `table` selectors
    let normalized = NormalizedIds::collect(root);

    for el in root.find_all("style") {
        let Some(id) = el.attr("styleId") else {
            continue;
        };
        let name = el.child_val("name").unwrap_or(id).to_string();
        if name == DEFAULT_CHARACTER_STYLE {
            continue;
        }
        let id = normalized.resolve(id).to_string();
        let parent_id = el
            .child_val("basedOn")
            .map(|p| normalized.resolve(p).to_string());

        match el.attr("type") {
            Some("character") => {
                let mut style = SpanStyle {
                    id,
                    name,
                    parent_id,
                    ..Default::default()
                };
                if let Some(rpr) = el.find("rPr") {
                    style.text = parse_run_properties(rpr, theme, fonts)?;
                }
                sheet.add_span_style(style);
            }
            Some("paragraph") => {
                let mut style = ParagraphStyle {
                    parent_id,
                    ..Default::default()
                };
                if let Some(rpr) = el.find("rPr") {
                    style.text = parse_run_properties(rpr, theme, fonts)?;
                }
                if let Some(ppr) = el.find("pPr") {
                    style.paragraph = parse_paragraph_properties(ppr, theme)?;
                    style.counter = counter_from_num_pr(ppr, numbering);
                }
                if style.counter.is_none() {
                    if let Some(counter) = numbering.style_counters.get(el.attr("styleId").unwrap_or("")) {
                        style.counter = Some(counter.clone());
                    }
                }
                style.id = id;
                style.name = name;
                sheet.add_paragraph_style(style);
            }
            Some("table") => {
                let mut style = TableStyle {
                    id,
                    name,
                    parent_id,
                    ..Default::default()
                };
                if let Some(rpr) = el.find("rPr") {
                    style.text = parse_run_properties(rpr, theme, fonts)?;
                }
                if let Some(ppr) = el.find("pPr") {
                    style.paragraph = parse_paragraph_properties(ppr, theme)?;
                }
                if let Some(tblpr) = el.find("tblPr") {
                    style.table = parse_table_properties(tblpr, theme)?;
                }
                if let Some(trpr) = el.find("trPr") {
                    style.table.default_row = Some(parse_row_properties(trpr)?);
                }
                if let Some(tcpr) = el.find("tcPr") {
                    style.table.default_cell = Some(parse_cell_properties(tcpr, theme)?);
                }
                for block in el.find_all("tblStylePr") {
                    parse_conditional_block(block, theme, fonts, &mut style)?;
                }
                sheet.add_table_style(style);
            }
            // Numbering styles are consumed during numbering resolution
            _ => {}
        }
    }
    sheet.link_children();
    Ok(())
}

fn parse_doc_defaults(
    defaults: &XmlEl,
    theme: &Theme,
    fonts: &FontTable,
    sheet: &mut Stylesheet,
) -> Result<()> {
    if let Some(rpr) = defaults.find("rPrDefault").and_then(|d| d.find("rPr")) {
        sheet.body.text = parse_run_properties(rpr, theme, fonts)?;
    }
    if let Some(ppr) = defaults.find("pPrDefault").and_then(|d| d.find("pPr")) {
        sheet.body.paragraph = parse_paragraph_properties(ppr, theme)?;
    }
    Ok(())
}

/// Counter attached directly through `w:pPr/w:numPr`
fn counter_from_num_pr(ppr: &XmlEl, numbering: &Numbering) -> Option<cascadoc_model::Counter> {
    let num_pr = ppr.find("numPr")?;
    let num_id: i64 = num_pr.find("numId")?.val()?.parse().ok()?;
    let level: usize = num_pr
        .find("ilvl")
        .and_then(XmlEl::val)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    numbering.counter(num_id, level).cloned()
}

fn parse_conditional_block(
    block: &XmlEl,
    theme: &Theme,
    fonts: &FontTable,
    style: &mut TableStyle,
) -> Result<()> {
    let mut formatting = TableConditionalFormatting::default();
    if let Some(rpr) = block.find("rPr") {
        formatting.text = parse_run_properties(rpr, theme, fonts)?;
    }
    if let Some(ppr) = block.find("pPr") {
        formatting.paragraph = parse_paragraph_properties(ppr, theme)?;
    }
    if let Some(tcpr) = block.find("tcPr") {
        formatting.cell = parse_cell_properties(tcpr, theme)?;
    }
    if let Some(trpr) = block.find("trPr") {
        formatting.row = parse_row_properties(trpr)?;
    }
    let formatting = Some(formatting);
    match block.attr("type") {
        Some("wholeTable") => style.table.whole_table = formatting,
        Some("band1Horz") => style.table.odd_rows = formatting,
        Some("band2Horz") => style.table.even_rows = formatting,
        Some("band1Vert") => style.table.odd_columns = formatting,
        Some("band2Vert") => style.table.even_columns = formatting,
        Some("firstCol") => style.table.first_column = formatting,
        Some("lastCol") => style.table.last_column = formatting,
        Some("firstRow") => style.table.first_row = formatting,
        Some("lastRow") => style.table.last_row = formatting,
        Some("nwCell") => style.table.top_left_cell = formatting,
        Some("neCell") => style.table.top_right_cell = formatting,
        Some("swCell") => style.table.bottom_left_cell = formatting,
        Some("seCell") => style.table.bottom_right_cell = formatting,
        _ => {}
    }
    Ok(())
}

/// Ids of the root paragraph and table styles, normalized to ""
#[derive(Debug, Default)]
struct NormalizedIds {
    paragraph_root: Option<String>,
    table_root: Option<String>,
}

impl NormalizedIds {
    fn collect(root: &XmlEl) -> Self {
        let mut ids = NormalizedIds::default();
        for el in root.find_all("style") {
            let name = el.child_val("name").unwrap_or_default();
            match el.attr("type") {
                Some("paragraph") if name == "Normal" => {
                    ids.paragraph_root = el.attr("styleId").map(String::from);
                }
                Some("table") if name == "Normal Table" || name == "Table Normal" => {
                    ids.table_root = el.attr("styleId").map(String::from);
                }
                _ => {}
            }
        }
        ids
    }

    fn resolve<'a>(&self, id: &'a str) -> &'a str {
        let is_root = self.paragraph_root.as_deref() == Some(id)
            || self.table_root.as_deref() == Some(id);
        if is_root {
            ""
        } else {
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascadoc_model::StyleKind;

    const STYLES: &[u8] = br#"<w:styles xmlns:w="x">
        <w:docDefaults>
            <w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault>
        </w:docDefaults>
        <w:style w:type="paragraph" w:styleId="Normal" w:default="1">
            <w:name w:val="Normal"/>
        </w:style>
        <w:style w:type="character" w:styleId="DefaultParagraphFont">
            <w:name w:val="Default Paragraph Font"/>
        </w:style>
        <w:style w:type="character" w:styleId="Emphasis">
            <w:name w:val="Emphasis"/>
            <w:rPr><w:i/></w:rPr>
        </w:style>
        <w:style w:type="paragraph" w:styleId="Heading1">
            <w:name w:val="heading 1"/>
            <w:basedOn w:val="Normal"/>
            <w:rPr><w:b/></w:rPr>
        </w:style>
        <w:style w:type="table" w:styleId="TableGrid">
            <w:name w:val="Table Grid"/>
            <w:tblPr>
                <w:tblBorders>
                    <w:insideH w:val="single" w:sz="4"/>
                </w:tblBorders>
            </w:tblPr>
            <w:tblStylePr w:type="firstRow">
                <w:rPr><w:b/></w:rPr>
            </w:tblStylePr>
        </w:style>
    </w:styles>"#;

    fn parse_fixture() -> Stylesheet {
        let root = XmlEl::parse(STYLES).unwrap();
        let mut sheet = Stylesheet::new();
        parse_styles(
            &root,
            &Theme::default(),
            &FontTable::default(),
            &Numbering::default(),
            &mut sheet,
        )
        .unwrap();
        sheet
    }

    #[test]
    fn test_doc_defaults_into_body() {
        let sheet = parse_fixture();
        assert_eq!(sheet.body.text.font_size.unwrap().pt(), 11.0);
    }

    #[test]
    fn test_normal_id_is_normalized() {
        let sheet = parse_fixture();
        assert!(sheet.paragraph_styles.contains(""));
        let heading = sheet.paragraph_styles.get("Heading1").unwrap();
        assert_eq!(heading.parent_id.as_deref(), Some(""));
        assert_eq!(heading.heading_level(), Some(1));
        // link_children hooked the heading up to the root
        let root = sheet.paragraph_styles.get("").unwrap();
        assert_eq!(root.children, vec!["Heading1".to_string()]);
    }

    #[test]
    fn test_default_character_style_is_skipped() {
        let sheet = parse_fixture();
        assert!(!sheet.span_styles.contains("DefaultParagraphFont"));
        assert!(sheet.span_styles.contains("Emphasis"));
    }

    #[test]
    fn test_table_style_with_conditional_block() {
        let sheet = parse_fixture();
        let table = sheet.table_styles.get("TableGrid").unwrap();
        assert!(table.table.border_inside_horizontal.is_some());
        let first_row = table.table.first_row.as_ref().unwrap();
        assert_eq!(first_row.text.bold, Some(true));
    }

    #[test]
    fn test_document_order() {
        let sheet = parse_fixture();
        let order = sheet.order();
        assert_eq!(order[0], (StyleKind::Paragraph, String::new()));
        assert_eq!(order[1], (StyleKind::Span, "Emphasis".to_string()));
    }

    #[test]
    fn test_paragraph_style_counter_attachment() {
        let root = XmlEl::parse(
            br#"<w:styles xmlns:w="x">
                <w:style w:type="paragraph" w:styleId="ListParagraph">
                    <w:name w:val="List Paragraph"/>
                    <w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr></w:pPr>
                </w:style>
            </w:styles>"#,
        )
        .unwrap();
        let mut numbering = Numbering::default();
        numbering.counter_lists.push(cascadoc_model::CounterList {
            id: 3,
            name: "List".to_string(),
            counters: vec![cascadoc_model::Counter {
                name: "List-L0".to_string(),
                style: "decimal".to_string(),
                start: 1,
                ..Default::default()
            }],
        });
        let mut sheet = Stylesheet::new();
        parse_styles(
            &root,
            &Theme::default(),
            &FontTable::default(),
            &numbering,
            &mut sheet,
        )
        .unwrap();
        let style = sheet.paragraph_styles.get("ListParagraph").unwrap();
        assert_eq!(style.counter.as_ref().unwrap().name, "List-L0");
    }
}
