//! Property adapters: WordprocessingML property containers
//! (`rPr`, `pPr`, `tblPr`, `trPr`, `tcPr`) to model formatting bags.

use cascadoc_model::{
    Border, BorderStyle, CssColor, CssUnit, HeightRule, LineHeight, Measure, ParagraphFormatting,
    Percentage, RowHeight, TableCellProperties, TableProperties, TableRowProperties,
    TextDecoration, TextFormatting,
};

use crate::error::{OoxmlError, Result};
use crate::fonts::FontTable;
use crate::theme::Theme;
use crate::xml::XmlEl;

// ---------------------------------------------------------------------------
// Attribute helpers
// ---------------------------------------------------------------------------

/// Toggle property value: present without `w:val` means on
pub(crate) fn toggle(el: &XmlEl) -> bool {
    match el.val() {
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "false" | "0" | "off"),
        None => true,
    }
}

fn int_attr(el: &XmlEl, name: &str) -> Option<i64> {
    el.attr(name).and_then(|v| v.parse::<i64>().ok())
}

fn twips_attr(el: &XmlEl, name: &str) -> Option<CssUnit> {
    int_attr(el, name).map(CssUnit::from_twips)
}

fn half_points_val(el: &XmlEl) -> Option<CssUnit> {
    el.val()
        .and_then(|v| v.parse::<f64>().ok())
        .and_then(|v| CssUnit::new(v / 2.0, "pt").ok())
}

// ---------------------------------------------------------------------------
// Simple type maps
// ---------------------------------------------------------------------------

/// `ST_Border` to a CSS line style. Art borders and the fancier line
/// styles degrade to their closest CSS equivalent; unknown values fall
/// back to solid.
pub(crate) fn st_border(value: &str) -> BorderStyle {
    match value {
        "nil" | "none" => BorderStyle::None,
        "dotted" | "dotDash" | "dotDotDash" => BorderStyle::Dotted,
        "dashed" | "dashDotStroked" | "dashSmallGap" => BorderStyle::Dashed,
        "double" | "triple" | "thickThinLargeGap" | "thickThinMediumGap"
        | "thickThinSmallGap" | "thinThickLargeGap" | "thinThickMediumGap"
        | "thinThickSmallGap" | "thinThickThinLargeGap" | "thinThickThinMediumGap"
        | "thinThickThinSmallGap" => BorderStyle::Double,
        "inset" => BorderStyle::Inset,
        "outset" => BorderStyle::Outset,
        "threeDEmboss" => BorderStyle::Ridge,
        "threeDEngrave" => BorderStyle::Groove,
        _ => BorderStyle::Solid,
    }
}

/// `ST_Jc` to a CSS text-align keyword
pub(crate) fn st_jc(value: &str) -> Option<&'static str> {
    match value {
        "left" | "start" => Some("start"),
        "right" | "end" => Some("end"),
        "both" | "distribute" | "justify" => Some("justify"),
        "center" => Some("center"),
        _ => None,
    }
}

/// `ST_Underline` to a text-decoration style
fn st_underline(value: &str) -> &'static str {
    match value {
        "none" => "none",
        "dash" | "dashDotDotHeavy" | "dashDotHeavy" | "dashedHeavy" | "dashLong"
        | "dashLongHeavy" => "dashed",
        "dotted" | "dotDash" | "dotDotDash" | "dottedHeavy" => "dotted",
        "double" => "double",
        "wave" | "wavyDouble" | "wavyHeavy" => "wavy",
        _ => "solid",
    }
}

/// `ST_NumberFormat` to a CSS counter style; bullet maps to the empty
/// string, unsupported formats approximate with decimal.
pub(crate) fn st_number_format(value: &str) -> &'static str {
    match value {
        "none" => "none",
        "bullet" => "",
        "decimalZero" => "decimal-leading-zero",
        "upperRoman" => "upper-roman",
        "lowerRoman" => "lower-roman",
        "upperLetter" => "upper-alpha",
        "lowerLetter" => "lower-alpha",
        _ => "decimal",
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

struct ColorAttrs {
    color: &'static str,
    theme_color: &'static str,
    theme_shade: &'static str,
    theme_tint: &'static str,
}

const DIRECT_COLOR: ColorAttrs = ColorAttrs {
    color: "val",
    theme_color: "themeColor",
    theme_shade: "themeShade",
    theme_tint: "themeTint",
};

const BORDER_COLOR: ColorAttrs = ColorAttrs {
    color: "color",
    theme_color: "themeColor",
    theme_shade: "themeShade",
    theme_tint: "themeTint",
};

const FILL_COLOR: ColorAttrs = ColorAttrs {
    color: "fill",
    theme_color: "themeFill",
    theme_shade: "themeFillShade",
    theme_tint: "themeFillTint",
};

/// Resolve a color from an element carrying either a direct hex value
/// or a theme reference with optional shade/tint. A theme color takes
/// precedence; `auto` resolves to no color.
fn parse_color(el: &XmlEl, theme: &Theme, attrs: &ColorAttrs) -> Result<Option<CssColor>> {
    if let Some(name) = el.attr(attrs.theme_color) {
        let Some(hex) = theme.color(name) else {
            return Ok(None);
        };
        let mut color = CssColor::from_hex(hex)?;
        if let Some(shade) = el.attr(attrs.theme_shade) {
            color.apply_hsl_shade(shade)?;
        }
        if let Some(tint) = el.attr(attrs.theme_tint) {
            color.apply_rgb_tint(tint)?;
        }
        return Ok(Some(color));
    }
    match el.attr(attrs.color) {
        Some("auto") | None => Ok(None),
        Some(hex) => Ok(Some(CssColor::from_hex(hex)?)),
    }
}

// ---------------------------------------------------------------------------
// Borders and measures
// ---------------------------------------------------------------------------

/// Parse one border edge element (`w:top`, `w:bdr`, `w:insideH`, ...)
pub(crate) fn parse_border(el: &XmlEl, theme: &Theme) -> Result<Border> {
    // The 'sz' attribute is in 8ths of a pt
    let width = el
        .attr("sz")
        .and_then(|v| v.parse::<f64>().ok())
        .and_then(|v| CssUnit::new(v / 8.0, "pt").ok());
    let padding = el
        .attr("space")
        .and_then(|v| v.parse::<f64>().ok())
        .and_then(|v| CssUnit::new(v, "pt").ok());
    let shadow = el
        .attr("shadow")
        .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "false" | "0"));
    Ok(Border {
        color: parse_color(el, theme, &BORDER_COLOR)?,
        padding,
        shadow,
        style: el.val().map(st_border),
        width,
    })
}

/// Parse a `CT_TblWidth` element (`w:tblW`, `w:tcW`, cell margins)
pub(crate) fn parse_measure(el: &XmlEl) -> Result<Measure> {
    let value = int_attr(el, "w").unwrap_or(0);
    match el.attr("type") {
        Some("auto") => Ok(Measure::Auto),
        Some("dxa") => Ok(Measure::Length(CssUnit::from_twips(value))),
        Some("nil") => Ok(Measure::Length(CssUnit::from_twips(0))),
        // Percentage values are in 50ths of a percent
        Some("pct") => Ok(Measure::Percentage(Percentage::from_fiftieths(value))),
        other => Err(OoxmlError::InvalidUnit(
            other.unwrap_or("<missing>").to_string(),
        )),
    }
}

fn measure_length(el: &XmlEl) -> Result<Option<CssUnit>> {
    match parse_measure(el)? {
        Measure::Length(unit) => Ok(Some(unit)),
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Run properties
// ---------------------------------------------------------------------------

/// Parse `w:rPr` into run-level formatting
pub fn parse_run_properties(
    rpr: &XmlEl,
    theme: &Theme,
    fonts: &FontTable,
) -> Result<TextFormatting> {
    let mut text = TextFormatting::default();
    for el in &rpr.children {
        match el.name.as_str() {
            "b" => text.bold = Some(toggle(el)),
            "i" => text.italics = Some(toggle(el)),
            "caps" => text.all_caps = Some(toggle(el)),
            "smallCaps" => text.small_caps = Some(toggle(el)),
            "strike" => text.strike = Some(toggle(el)),
            "dstrike" => text.double_strike = Some(toggle(el)),
            "emboss" => text.emboss = Some(toggle(el)),
            "imprint" => text.imprint = Some(toggle(el)),
            "outline" => text.outline = Some(toggle(el)),
            "shadow" => text.shadow = Some(toggle(el)),
            "vanish" => text.vanish = Some(toggle(el)),
            // Kerning threshold in half-points; 0 disables
            "kern" => {
                if let Some(v) = el.val().and_then(|v| v.parse::<i64>().ok()) {
                    text.font_kerning = Some(v != 0);
                }
            }
            "rFonts" => text.font_family = parse_font_family(el, theme, fonts),
            "sz" => text.font_size = half_points_val(el),
            "color" => text.font_color = parse_color(el, theme, &DIRECT_COLOR)?,
            "highlight" => text.highlight = el.val().map(|v| v.to_ascii_lowercase()),
            "shd" => text.background_color = parse_color(el, theme, &FILL_COLOR)?,
            // Letter spacing in twips
            "spacing" => text.letter_spacing = twips_attr(el, "val"),
            "position" => text.position = half_points_val(el),
            "vertAlign" => text.vertical_align = el.val().map(String::from),
            "u" => text.underline = Some(parse_underline(el, theme)?),
            "bdr" => text.border = Some(parse_border(el, theme)?),
            _ => {}
        }
    }
    Ok(text)
}

fn parse_underline(el: &XmlEl, theme: &Theme) -> Result<TextDecoration> {
    let mut decoration = TextDecoration::new();
    decoration.color = parse_color(el, theme, &BORDER_COLOR)?;
    let style = st_underline(el.val().unwrap_or("single"));
    if style != "none" {
        decoration.style = Some(style.to_string());
        decoration.add_line("underline");
    } else {
        decoration.style = Some("none".to_string());
    }
    Ok(decoration)
}

/// Build a `font-family` fallback list. Theme slots take precedence
/// over explicit names; the font table supplies alternate names and
/// generic families, which are pushed to the end of the list.
fn parse_font_family(el: &XmlEl, theme: &Theme, fonts: &FontTable) -> Option<String> {
    let slots = [
        el.attr("hAnsiTheme").or_else(|| el.attr("hAnsi")),
        el.attr("asciiTheme").or_else(|| el.attr("ascii")),
        el.attr("eastAsiaTheme").or_else(|| el.attr("eastAsia")),
        el.attr("cstheme").or_else(|| el.attr("cs")),
    ];
    let mut names: Vec<String> = Vec::new();
    let mut generics: Vec<String> = Vec::new();
    for slot in slots.into_iter().flatten() {
        let name = theme.font(slot).unwrap_or(slot);
        let family = match fonts.get(name) {
            Some(font) => font.css_family(),
            None => vec![name.to_string()],
        };
        for entry in family {
            let is_generic = matches!(
                entry.as_str(),
                "fantasy" | "monospace" | "serif" | "cursive" | "sans-serif"
            );
            let quoted = if entry.contains(' ') {
                format!("\"{}\"", entry)
            } else {
                entry
            };
            let bucket = if is_generic { &mut generics } else { &mut names };
            if !bucket.contains(&quoted) {
                bucket.push(quoted);
            }
        }
    }
    names.extend(generics);
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Paragraph properties
// ---------------------------------------------------------------------------

/// Parse `w:pPr` into paragraph-level formatting
pub fn parse_paragraph_properties(ppr: &XmlEl, theme: &Theme) -> Result<ParagraphFormatting> {
    let mut paragraph = ParagraphFormatting::default();
    for el in &ppr.children {
        match el.name.as_str() {
            "jc" => paragraph.alignment = el.val().and_then(st_jc).map(String::from),
            "ind" => parse_indents(el, &mut paragraph),
            "spacing" => parse_spacing(el, &mut paragraph),
            "keepLines" => paragraph.keep_together = Some(toggle(el)),
            "keepNext" => paragraph.keep_with_next = Some(toggle(el)),
            "pageBreakBefore" => paragraph.page_break_before = Some(toggle(el)),
            "widowControl" => paragraph.widows_control = Some(toggle(el)),
            "pBdr" => {
                for edge in &el.children {
                    let border = Some(parse_border(edge, theme)?);
                    match edge.name.as_str() {
                        "top" => paragraph.border_top = border,
                        "right" => paragraph.border_right = border,
                        "bottom" => paragraph.border_bottom = border,
                        "left" => paragraph.border_left = border,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    Ok(paragraph)
}

fn parse_indents(el: &XmlEl, paragraph: &mut ParagraphFormatting) {
    paragraph.indent_left = twips_attr(el, "start").or_else(|| twips_attr(el, "left"));
    paragraph.indent_right = twips_attr(el, "end").or_else(|| twips_attr(el, "right"));
    // A first-line indent wins over a hanging indent; hanging is a
    // negative text-indent
    paragraph.text_indent = twips_attr(el, "firstLine")
        .or_else(|| twips_attr(el, "hanging").map(|v| -v));
}

fn parse_spacing(el: &XmlEl, paragraph: &mut ParagraphFormatting) {
    let before_auto = el.attr("beforeAutospacing").map(toggle_value).unwrap_or(false);
    let after_auto = el.attr("afterAutospacing").map(toggle_value).unwrap_or(false);
    if !before_auto {
        paragraph.margin_top = twips_attr(el, "before");
    }
    if !after_auto {
        paragraph.margin_bottom = twips_attr(el, "after");
    }
    if let Some(line) = int_attr(el, "line") {
        paragraph.line_height = match el.attr("lineRule") {
            // 240ths of a line
            Some("auto") | None => Some(LineHeight::Multiple(line as f64 / 240.0)),
            Some("atLeast") | Some("exact") => {
                Some(LineHeight::Length(CssUnit::from_twips(line)))
            }
            Some(_) => None,
        };
    }
}

fn toggle_value(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "false" | "0" | "off")
}

// ---------------------------------------------------------------------------
// Table, row and cell properties
// ---------------------------------------------------------------------------

/// Parse `w:tblPr` into table-level formatting. Conditional slot
/// blocks (`w:tblStylePr`) live on the style element, not here.
pub fn parse_table_properties(tblpr: &XmlEl, theme: &Theme) -> Result<TableProperties> {
    let mut table = TableProperties::default();
    for el in &tblpr.children {
        match el.name.as_str() {
            "tblW" => table.width = Some(parse_measure(el)?),
            "jc" => table.alignment = el.val().and_then(st_jc).map(String::from),
            "tblInd" => table.indent = measure_length(el)?,
            "tblLayout" => {
                let layout = el.attr("type").unwrap_or("auto");
                table.layout = Some(if layout == "fixed" { "fixed" } else { "auto" }.to_string());
            }
            "tblCellSpacing" => table.cell_spacing = measure_length(el)?,
            "tblCellMar" => {
                for margin in &el.children {
                    let value = measure_length(margin)?;
                    match margin.name.as_str() {
                        "top" => table.cell_padding_top = value,
                        "right" => table.cell_padding_right = value,
                        "bottom" => table.cell_padding_bottom = value,
                        "left" => table.cell_padding_left = value,
                        _ => {}
                    }
                }
            }
            "shd" => table.background_color = parse_color(el, theme, &FILL_COLOR)?,
            "tblBorders" => {
                for edge in &el.children {
                    let border = Some(parse_border(edge, theme)?);
                    match edge.name.as_str() {
                        "top" => table.border_top = border,
                        "right" => table.border_right = border,
                        "bottom" => table.border_bottom = border,
                        "left" => table.border_left = border,
                        "insideH" => table.border_inside_horizontal = border,
                        "insideV" => table.border_inside_vertical = border,
                        _ => {}
                    }
                }
            }
            "tblStyleRowBandSize" => {
                table.row_band_size = el.val().and_then(|v| v.parse().ok());
            }
            "tblStyleColBandSize" => {
                table.col_band_size = el.val().and_then(|v| v.parse().ok());
            }
            _ => {}
        }
    }
    Ok(table)
}

/// Parse `w:trPr` into row-level formatting
pub fn parse_row_properties(trpr: &XmlEl) -> Result<TableRowProperties> {
    let mut row = TableRowProperties::default();
    for el in &trpr.children {
        match el.name.as_str() {
            "trHeight" => {
                if let Some(value) = twips_attr(el, "val") {
                    // Absent hRule means atLeast
                    let rule = match el.attr("hRule") {
                        Some("exact") => HeightRule::Exact,
                        Some("auto") => HeightRule::Auto,
                        _ => HeightRule::AtLeast,
                    };
                    row.height = Some(RowHeight { value, rule });
                }
            }
            "cantSplit" => row.split = Some(!toggle(el)),
            "tblHeader" => row.is_header = Some(toggle(el)),
            "jc" => row.alignment = el.val().and_then(st_jc).map(String::from),
            "tblCellSpacing" => row.cell_spacing = measure_length(el)?,
            _ => {}
        }
    }
    Ok(row)
}

/// Parse `w:tcPr` into cell-level formatting
pub fn parse_cell_properties(tcpr: &XmlEl, theme: &Theme) -> Result<TableCellProperties> {
    let mut cell = TableCellProperties::default();
    for el in &tcpr.children {
        match el.name.as_str() {
            "tcW" => cell.width = Some(parse_measure(el)?),
            "tcMar" => {
                for margin in &el.children {
                    let value = measure_length(margin)?;
                    match margin.name.as_str() {
                        "top" => cell.padding_top = value,
                        "right" => cell.padding_right = value,
                        "bottom" => cell.padding_bottom = value,
                        "left" => cell.padding_left = value,
                        _ => {}
                    }
                }
            }
            "shd" => cell.background_color = parse_color(el, theme, &FILL_COLOR)?,
            "vAlign" => {
                cell.valign = el.val().map(|v| {
                    if v == "center" { "middle" } else { v }.to_string()
                });
            }
            "noWrap" => cell.wrap_text = Some(!toggle(el)),
            "tcFitText" => cell.fit_text = Some(toggle(el)),
            "tcBorders" => {
                for edge in &el.children {
                    let border = Some(parse_border(edge, theme)?);
                    match edge.name.as_str() {
                        "top" => cell.border_top = border,
                        "right" => cell.border_right = border,
                        "bottom" => cell.border_bottom = border,
                        "left" => cell.border_left = border,
                        "insideH" => cell.border_inside_horizontal = border,
                        "insideV" => cell.border_inside_vertical = border,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &[u8]) -> XmlEl {
        XmlEl::parse(xml).unwrap()
    }

    #[test]
    fn test_toggle_values() {
        let on = parse(br#"<w:b xmlns:w="x"/>"#);
        assert!(toggle(&on));
        let off = parse(br#"<w:b xmlns:w="x" w:val="0"/>"#);
        assert!(!toggle(&off));
        let explicit = parse(br#"<w:b xmlns:w="x" w:val="true"/>"#);
        assert!(toggle(&explicit));
    }

    #[test]
    fn test_run_properties() {
        let xml = br#"<w:rPr xmlns:w="x">
            <w:b/>
            <w:sz w:val="21"/>
            <w:color w:val="FF0000"/>
            <w:highlight w:val="Yellow"/>
            <w:position w:val="-6"/>
        </w:rPr>"#;
        let theme = Theme::default();
        let fonts = FontTable::default();
        let text = parse_run_properties(&parse(xml), &theme, &fonts).unwrap();
        assert_eq!(text.bold, Some(true));
        assert_eq!(text.font_size.unwrap().pt(), 10.5);
        assert_eq!(text.font_color.unwrap().css(), "#FF0000");
        assert_eq!(text.highlight.as_deref(), Some("yellow"));
        assert_eq!(text.position.unwrap().pt(), -3.0);
    }

    #[test]
    fn test_auto_color_is_dropped() {
        let xml = br#"<w:rPr xmlns:w="x"><w:color w:val="auto"/></w:rPr>"#;
        let text =
            parse_run_properties(&parse(xml), &Theme::default(), &FontTable::default()).unwrap();
        assert!(text.font_color.is_none());
    }

    #[test]
    fn test_paragraph_indents_and_spacing() {
        let xml = br#"<w:pPr xmlns:w="x">
            <w:jc w:val="both"/>
            <w:ind w:start="720" w:hanging="360"/>
            <w:spacing w:before="240" w:after="120" w:line="276" w:lineRule="auto"/>
        </w:pPr>"#;
        let paragraph = parse_paragraph_properties(&parse(xml), &Theme::default()).unwrap();
        assert_eq!(paragraph.alignment.as_deref(), Some("justify"));
        assert_eq!(paragraph.indent_left.unwrap().pt(), 36.0);
        assert_eq!(paragraph.text_indent.unwrap().pt(), -18.0);
        assert_eq!(paragraph.margin_top.unwrap().pt(), 12.0);
        assert_eq!(paragraph.margin_bottom.unwrap().pt(), 6.0);
        assert_eq!(paragraph.line_height, Some(LineHeight::Multiple(1.15)));
    }

    #[test]
    fn test_border_edge() {
        let xml = br#"<w:top xmlns:w="x" w:val="single" w:sz="4" w:space="1" w:color="auto"/>"#;
        let border = parse_border(&parse(xml), &Theme::default()).unwrap();
        assert_eq!(border.style, Some(BorderStyle::Solid));
        assert_eq!(border.width.unwrap().pt(), 0.5);
        assert_eq!(border.padding.unwrap().pt(), 1.0);
        assert!(border.color.is_none());
    }

    #[test]
    fn test_unknown_border_style_falls_back_to_solid() {
        assert_eq!(st_border("zigZagStitch"), BorderStyle::Solid);
        assert_eq!(st_border("nil"), BorderStyle::None);
        assert_eq!(st_border("wave"), BorderStyle::Solid);
        assert_eq!(st_border("triple"), BorderStyle::Double);
    }

    #[test]
    fn test_measure_units() {
        let pct = parse(br#"<w:tblW xmlns:w="x" w:w="2500" w:type="pct"/>"#);
        assert_eq!(parse_measure(&pct).unwrap().css(), "50.00%");
        let dxa = parse(br#"<w:tblW xmlns:w="x" w:w="1440" w:type="dxa"/>"#);
        assert_eq!(parse_measure(&dxa).unwrap().css(), "1.00in");
        let auto = parse(br#"<w:tblW xmlns:w="x" w:type="auto"/>"#);
        assert_eq!(parse_measure(&auto).unwrap().css(), "auto");
        let bad = parse(br#"<w:tblW xmlns:w="x" w:w="5" w:type="emu"/>"#);
        assert!(parse_measure(&bad).is_err());
    }

    #[test]
    fn test_row_height_rules() {
        let xml = br#"<w:trPr xmlns:w="x"><w:trHeight w:val="400"/><w:cantSplit/></w:trPr>"#;
        let row = parse_row_properties(&parse(xml)).unwrap();
        let height = row.height.unwrap();
        assert_eq!(height.rule, HeightRule::AtLeast);
        assert_eq!(height.value.pt(), 20.0);
        assert_eq!(row.split, Some(false));
    }

    #[test]
    fn test_cell_valign_and_wrap() {
        let xml = br#"<w:tcPr xmlns:w="x"><w:vAlign w:val="center"/><w:noWrap/></w:tcPr>"#;
        let cell = parse_cell_properties(&parse(xml), &Theme::default()).unwrap();
        assert_eq!(cell.valign.as_deref(), Some("middle"));
        assert_eq!(cell.wrap_text, Some(false));
    }

    #[test]
    fn test_theme_color_with_shade() {
        let theme_xml = br#"<a:theme xmlns:a="x"><a:clrScheme>
            <a:accent1><a:srgbClr a:val="808080"/></a:accent1>
        </a:clrScheme></a:theme>"#;
        let theme = Theme::parse(&parse(theme_xml));
        let color_xml = br#"<w:color xmlns:w="x" w:themeColor="accent1" w:themeShade="80"/>"#;
        let color = parse_color(&parse(color_xml), &theme, &DIRECT_COLOR)
            .unwrap()
            .unwrap();
        // HSL shade halves the lightness
        assert!((color.red as i16 - 64).abs() <= 2);
    }
}
