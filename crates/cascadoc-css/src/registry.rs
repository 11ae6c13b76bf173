//! Property serializer registry.
//!
//! Serialization dispatches on the property name alone. The registry
//! is an explicit map; a property arriving with no registration is an
//! error so that new model fields cannot be dropped silently.

use std::collections::HashMap;

use cascadoc_model::Property;

use crate::context::StyleContext;
use crate::error::{CssError, Result};
use crate::{counter, paragraph, table, text};

/// A property serializer. Receives the registry for recursive
/// dispatch (conditional table slots re-enter serialization).
pub type SerializerFn =
    fn(&SerializerRegistry, &mut StyleContext<'_>, &Property) -> Result<()>;

/// Registered no-op: the property is understood but has no CSS
/// counterpart of its own.
fn noop(_: &SerializerRegistry, _: &mut StyleContext<'_>, _: &Property) -> Result<()> {
    Ok(())
}

pub struct SerializerRegistry {
    map: HashMap<&'static str, SerializerFn>,
}

impl SerializerRegistry {
    /// The standard registry covering every model property
    pub fn standard() -> Self {
        let mut registry = SerializerRegistry {
            map: HashMap::new(),
        };

        // Run-level formatting
        registry.register("bold", text::bold);
        registry.register("italics", text::italics);
        registry.register("all_caps", text::all_caps);
        registry.register("small_caps", text::small_caps);
        registry.register("strike", text::strike);
        registry.register("double_strike", text::double_strike);
        registry.register("underline", text::underline);
        registry.register("emboss", text::emboss);
        registry.register("imprint", text::imprint);
        registry.register("outline", text::outline);
        registry.register("shadow", text::shadow);
        registry.register("vanish", text::vanish);
        registry.register("font_kerning", text::font_kerning);
        registry.register("font_family", text::font_family);
        registry.register("font_size", text::font_size);
        registry.register("font_color", text::font_color);
        registry.register("highlight", text::highlight);
        registry.register("background_color", text::background_color);
        registry.register("letter_spacing", text::letter_spacing);
        registry.register("position", text::position);
        registry.register("vertical_align", text::vertical_align);
        registry.register("text_border", text::text_border);

        // Paragraph formatting
        registry.register("alignment", paragraph::alignment);
        registry.register("indent_left", paragraph::indent_left);
        registry.register("indent_right", paragraph::indent_right);
        registry.register("text_indent", paragraph::text_indent);
        registry.register("margin_top", paragraph::margin_top);
        registry.register("margin_bottom", paragraph::margin_bottom);
        registry.register("line_height", paragraph::line_height);
        registry.register("keep_together", paragraph::keep_together);
        registry.register("keep_with_next", paragraph::keep_with_next);
        registry.register("page_break_before", paragraph::page_break_before);
        registry.register("widows_control", paragraph::widows_control);
        registry.register("counter", counter::counter);

        // Borders (paragraph, cell and table level share these names)
        registry.register("border_top", table::border_top);
        registry.register("border_right", table::border_right);
        registry.register("border_bottom", table::border_bottom);
        registry.register("border_left", table::border_left);
        registry.register(
            "border_inside_horizontal",
            table::border_inside_horizontal,
        );
        registry.register("border_inside_vertical", table::border_inside_vertical);

        // Table formatting
        registry.register("table_width", table::table_width);
        registry.register("table_alignment", table::table_alignment);
        registry.register("table_indent", table::table_indent);
        registry.register("table_layout", table::table_layout);
        registry.register("cell_spacing", table::cell_spacing);
        registry.register("cell_padding_top", table::cell_padding_top);
        registry.register("cell_padding_right", table::cell_padding_right);
        registry.register("cell_padding_bottom", table::cell_padding_bottom);
        registry.register("cell_padding_left", table::cell_padding_left);
        registry.register("row_band_size", noop);
        registry.register("col_band_size", noop);
        registry.register("default_row", noop);
        registry.register("default_cell", noop);

        // Rows and cells
        registry.register("row_height", table::row_height);
        registry.register("row_split", table::row_split);
        registry.register("is_header", noop);
        registry.register("cell_width", table::cell_width);
        registry.register("padding_top", table::padding_top);
        registry.register("padding_right", table::padding_right);
        registry.register("padding_bottom", table::padding_bottom);
        registry.register("padding_left", table::padding_left);
        registry.register("valign", table::valign);
        registry.register("wrap_text", table::wrap_text);
        registry.register("fit_text", noop);

        // Conditional formatting slots
        registry.register("whole_table", table::whole_table);
        registry.register("odd_rows", table::odd_rows);
        registry.register("even_rows", table::even_rows);
        registry.register("odd_columns", table::odd_columns);
        registry.register("even_columns", table::even_columns);
        registry.register("first_row", table::first_row);
        registry.register("last_row", table::last_row);
        registry.register("first_column", table::first_column);
        registry.register("last_column", table::last_column);
        registry.register("top_left_cell", table::top_left_cell);
        registry.register("top_right_cell", table::top_right_cell);
        registry.register("bottom_left_cell", table::bottom_left_cell);
        registry.register("bottom_right_cell", table::bottom_right_cell);

        registry
    }

    pub fn register(&mut self, name: &'static str, serializer: SerializerFn) {
        self.map.insert(name, serializer);
    }

    /// Dispatch one property; unknown names are a hard error
    pub fn serialize(&self, ctx: &mut StyleContext<'_>, prop: &Property) -> Result<()> {
        match self.map.get(prop.name) {
            Some(serializer) => serializer(self, ctx, prop),
            None => Err(CssError::NoSerializer(prop.name.to_string())),
        }
    }

    pub fn serialize_all(&self, ctx: &mut StyleContext<'_>, props: &[Property]) -> Result<()> {
        for prop in props {
            self.serialize(ctx, prop)?;
        }
        Ok(())
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SelectorParts;
    use cascadoc_model::{Stylesheet, Value};

    #[test]
    fn test_unknown_property_is_an_error() {
        let sheet = Stylesheet::new();
        let registry = SerializerRegistry::standard();
        let mut ctx = StyleContext::new(&sheet, SelectorParts::single("p"));
        let prop = Property::new("glitter", Value::Bool(true));
        let err = registry.serialize(&mut ctx, &prop).unwrap_err();
        assert!(matches!(err, CssError::NoSerializer(name) if name == "glitter"));
    }

    #[test]
    fn test_noop_properties_emit_nothing() {
        let sheet = Stylesheet::new();
        let registry = SerializerRegistry::standard();
        let mut ctx = StyleContext::new(&sheet, SelectorParts::single("tr"));
        registry
            .serialize(&mut ctx, &Property::new("is_header", Value::Bool(true)))
            .unwrap();
        assert!(ctx.rules.is_empty());
    }
}
