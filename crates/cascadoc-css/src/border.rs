//! Border serialization shared by paragraphs, tables and cells.

use cascadoc_model::Border;

use crate::context::StyleContext;

/// Write one border edge to `selector`. A `none` style short-circuits:
/// only the style declaration is emitted. Any border written while a
/// table selector is active forces `border-collapse: collapse` on the
/// table's own rule.
pub(crate) fn serialize_border_value(
    ctx: &mut StyleContext<'_>,
    direction: Option<&str>,
    border: &Border,
    selector: &str,
) {
    let seg = direction.map(|d| format!("-{}", d)).unwrap_or_default();
    {
        let block = ctx.rules.get_or_create(selector);
        if let Some(style) = border.style {
            block.set(format!("border{}-style", seg), style.as_str());
        }
        if !border.is_none_style() {
            if let Some(width) = border.width {
                block.set(
                    format!("border{}-width", seg),
                    format!("{:.2}pt", width.pt()),
                );
            }
            if let Some(color) = border.color {
                block.set(format!("border{}-color", seg), color.css());
            }
            if let Some(padding) = border.padding {
                let name = match direction {
                    Some(d) => format!("padding-{}", d),
                    None => "padding".to_string(),
                };
                block.set(name, padding.css_pt());
            }
            if border.shadow == Some(true) {
                if let Some(width) = border.width {
                    let w = format!("{:.2}pt", width.pt());
                    block.set("box-shadow", format!("{} {}", w, w));
                }
            }
        }
    }
    if let Some(table) = ctx.table_selector.clone() {
        ctx.rules
            .get_or_create(&table)
            .set("border-collapse", "collapse");
    }
}

/// Inside borders additionally hide the outer border model of the
/// table: `border-style: hidden` is forced to the front of the
/// table's own rule so cell borders win under collapsing.
pub(crate) fn apply_hidden_trick(ctx: &mut StyleContext<'_>) {
    if let Some(table) = ctx.table_selector.clone() {
        let block = ctx.rules.get_or_create(&table);
        block.set("border-collapse", "collapse");
        block.insert_front("border-style", "hidden");
    }
}
