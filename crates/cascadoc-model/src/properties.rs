//! Formatting property bags.
//!
//! Every field is an `Option`: an unset property means "inherit from
//! the parent style" and is never serialized. Each bag can list its
//! set fields as [`Property`] values in declaration order; the CSS
//! engine dispatches on the property name alone.

use serde::Serialize;

use crate::border::{Border, TextDecoration};
use crate::color::CssColor;
use crate::counter::Counter;
use crate::unit::{CssUnit, Measure};

/// Paragraph line spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LineHeight {
    /// An absolute line height (`exact` and `atLeast` rules)
    Length(CssUnit),
    /// A unitless multiple of the font size (`auto` rule, 240ths)
    Multiple(f64),
}

/// Row height rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeightRule {
    Auto,
    AtLeast,
    Exact,
}

/// Table row height
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowHeight {
    pub value: CssUnit,
    pub rule: HeightRule,
}

/// A property payload. Closed set: the serializer registry matches on
/// the property name and unwraps the expected variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Str(String),
    Unit(CssUnit),
    Measure(Measure),
    Color(CssColor),
    Border(Border),
    Decoration(TextDecoration),
    LineHeight(LineHeight),
    RowHeight(RowHeight),
    Counter(Box<Counter>),
    Conditional(Box<TableConditionalFormatting>),
    Cell(Box<TableCellProperties>),
    Row(Box<TableRowProperties>),
    Int(u32),
}

/// A named, set property ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: &'static str,
    pub value: Value,
}

impl Property {
    pub fn new(name: &'static str, value: Value) -> Self {
        Property { name, value }
    }
}

macro_rules! push_prop {
    ($out:ident, $self:ident, $field:ident, $name:literal, $variant:ident) => {
        if let Some(v) = &$self.$field {
            $out.push(Property::new($name, Value::$variant(v.clone())));
        }
    };
    ($out:ident, $self:ident, $field:ident, $name:literal, boxed $variant:ident) => {
        if let Some(v) = &$self.$field {
            $out.push(Property::new($name, Value::$variant(Box::new(v.clone()))));
        }
    };
}

/// Run-level (character) formatting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextFormatting {
    pub bold: Option<bool>,
    pub italics: Option<bool>,
    pub all_caps: Option<bool>,
    pub small_caps: Option<bool>,
    pub strike: Option<bool>,
    pub double_strike: Option<bool>,
    pub underline: Option<TextDecoration>,
    pub emboss: Option<bool>,
    pub imprint: Option<bool>,
    pub outline: Option<bool>,
    pub shadow: Option<bool>,
    pub vanish: Option<bool>,
    pub font_kerning: Option<bool>,
    pub font_family: Option<String>,
    pub font_size: Option<CssUnit>,
    pub font_color: Option<CssColor>,
    /// Named highlight color; wins over `background_color`
    pub highlight: Option<String>,
    pub background_color: Option<CssColor>,
    pub letter_spacing: Option<CssUnit>,
    /// Raised (positive) or lowered (negative) text
    pub position: Option<CssUnit>,
    /// `super`, `sub` or `baseline`
    pub vertical_align: Option<String>,
    /// Directionless run border
    pub border: Option<Border>,
}

impl TextFormatting {
    pub fn is_empty(&self) -> bool {
        self.properties().is_empty()
    }

    pub fn properties(&self) -> Vec<Property> {
        let mut out = Vec::new();
        push_prop!(out, self, bold, "bold", Bool);
        push_prop!(out, self, italics, "italics", Bool);
        push_prop!(out, self, all_caps, "all_caps", Bool);
        push_prop!(out, self, small_caps, "small_caps", Bool);
        push_prop!(out, self, strike, "strike", Bool);
        push_prop!(out, self, double_strike, "double_strike", Bool);
        push_prop!(out, self, underline, "underline", Decoration);
        push_prop!(out, self, emboss, "emboss", Bool);
        push_prop!(out, self, imprint, "imprint", Bool);
        push_prop!(out, self, outline, "outline", Bool);
        push_prop!(out, self, shadow, "shadow", Bool);
        push_prop!(out, self, vanish, "vanish", Bool);
        push_prop!(out, self, font_kerning, "font_kerning", Bool);
        push_prop!(out, self, font_family, "font_family", Str);
        push_prop!(out, self, font_size, "font_size", Unit);
        push_prop!(out, self, font_color, "font_color", Color);
        // Highlight first so an explicit highlight wins over cell or
        // run shading writing to the same CSS property.
        push_prop!(out, self, highlight, "highlight", Str);
        push_prop!(out, self, background_color, "background_color", Color);
        push_prop!(out, self, letter_spacing, "letter_spacing", Unit);
        push_prop!(out, self, position, "position", Unit);
        push_prop!(out, self, vertical_align, "vertical_align", Str);
        push_prop!(out, self, border, "text_border", Border);
        out
    }
}

/// Paragraph-level formatting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParagraphFormatting {
    pub alignment: Option<String>,
    pub indent_left: Option<CssUnit>,
    pub indent_right: Option<CssUnit>,
    /// Negative for hanging indents
    pub text_indent: Option<CssUnit>,
    pub margin_top: Option<CssUnit>,
    pub margin_bottom: Option<CssUnit>,
    pub line_height: Option<LineHeight>,
    pub keep_together: Option<bool>,
    pub keep_with_next: Option<bool>,
    pub page_break_before: Option<bool>,
    pub widows_control: Option<bool>,
    pub border_top: Option<Border>,
    pub border_right: Option<Border>,
    pub border_bottom: Option<Border>,
    pub border_left: Option<Border>,
}

impl ParagraphFormatting {
    pub fn is_empty(&self) -> bool {
        self.properties().is_empty()
    }

    pub fn properties(&self) -> Vec<Property> {
        let mut out = Vec::new();
        push_prop!(out, self, alignment, "alignment", Str);
        push_prop!(out, self, indent_left, "indent_left", Unit);
        push_prop!(out, self, indent_right, "indent_right", Unit);
        push_prop!(out, self, text_indent, "text_indent", Unit);
        push_prop!(out, self, margin_top, "margin_top", Unit);
        push_prop!(out, self, margin_bottom, "margin_bottom", Unit);
        push_prop!(out, self, line_height, "line_height", LineHeight);
        push_prop!(out, self, keep_together, "keep_together", Bool);
        push_prop!(out, self, keep_with_next, "keep_with_next", Bool);
        push_prop!(out, self, page_break_before, "page_break_before", Bool);
        push_prop!(out, self, widows_control, "widows_control", Bool);
        push_prop!(out, self, border_top, "border_top", Border);
        push_prop!(out, self, border_right, "border_right", Border);
        push_prop!(out, self, border_bottom, "border_bottom", Border);
        push_prop!(out, self, border_left, "border_left", Border);
        out
    }
}

/// Table-level properties, including the conditional formatting slots
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableProperties {
    pub width: Option<Measure>,
    pub alignment: Option<String>,
    pub indent: Option<CssUnit>,
    pub layout: Option<String>,
    pub cell_spacing: Option<CssUnit>,
    pub cell_padding_top: Option<CssUnit>,
    pub cell_padding_right: Option<CssUnit>,
    pub cell_padding_bottom: Option<CssUnit>,
    pub cell_padding_left: Option<CssUnit>,
    pub background_color: Option<CssColor>,
    pub border_top: Option<Border>,
    pub border_right: Option<Border>,
    pub border_bottom: Option<Border>,
    pub border_left: Option<Border>,
    pub border_inside_horizontal: Option<Border>,
    pub border_inside_vertical: Option<Border>,
    pub row_band_size: Option<u32>,
    pub col_band_size: Option<u32>,
    pub default_row: Option<TableRowProperties>,
    pub default_cell: Option<TableCellProperties>,
    pub whole_table: Option<TableConditionalFormatting>,
    pub odd_columns: Option<TableConditionalFormatting>,
    pub even_columns: Option<TableConditionalFormatting>,
    pub odd_rows: Option<TableConditionalFormatting>,
    pub even_rows: Option<TableConditionalFormatting>,
    pub first_column: Option<TableConditionalFormatting>,
    pub last_column: Option<TableConditionalFormatting>,
    pub first_row: Option<TableConditionalFormatting>,
    pub last_row: Option<TableConditionalFormatting>,
    pub top_left_cell: Option<TableConditionalFormatting>,
    pub top_right_cell: Option<TableConditionalFormatting>,
    pub bottom_left_cell: Option<TableConditionalFormatting>,
    pub bottom_right_cell: Option<TableConditionalFormatting>,
}

impl TableProperties {
    /// Effective row band size (unset and 0 mean single-row bands)
    pub fn row_band(&self) -> u32 {
        self.row_band_size.unwrap_or(1).max(1)
    }

    /// Effective column band size
    pub fn col_band(&self) -> u32 {
        self.col_band_size.unwrap_or(1).max(1)
    }

    pub fn properties(&self) -> Vec<Property> {
        let mut out = Vec::new();
        push_prop!(out, self, width, "table_width", Measure);
        push_prop!(out, self, alignment, "table_alignment", Str);
        push_prop!(out, self, indent, "table_indent", Unit);
        push_prop!(out, self, layout, "table_layout", Str);
        push_prop!(out, self, cell_spacing, "cell_spacing", Unit);
        push_prop!(out, self, cell_padding_top, "cell_padding_top", Unit);
        push_prop!(out, self, cell_padding_right, "cell_padding_right", Unit);
        push_prop!(out, self, cell_padding_bottom, "cell_padding_bottom", Unit);
        push_prop!(out, self, cell_padding_left, "cell_padding_left", Unit);
        push_prop!(out, self, background_color, "background_color", Color);
        push_prop!(out, self, border_top, "border_top", Border);
        push_prop!(out, self, border_right, "border_right", Border);
        push_prop!(out, self, border_bottom, "border_bottom", Border);
        push_prop!(out, self, border_left, "border_left", Border);
        push_prop!(
            out,
            self,
            border_inside_horizontal,
            "border_inside_horizontal",
            Border
        );
        push_prop!(
            out,
            self,
            border_inside_vertical,
            "border_inside_vertical",
            Border
        );
        push_prop!(out, self, row_band_size, "row_band_size", Int);
        push_prop!(out, self, col_band_size, "col_band_size", Int);
        push_prop!(out, self, default_row, "default_row", boxed Row);
        push_prop!(out, self, default_cell, "default_cell", boxed Cell);
        push_prop!(out, self, whole_table, "whole_table", boxed Conditional);
        push_prop!(out, self, odd_columns, "odd_columns", boxed Conditional);
        push_prop!(out, self, even_columns, "even_columns", boxed Conditional);
        push_prop!(out, self, odd_rows, "odd_rows", boxed Conditional);
        push_prop!(out, self, even_rows, "even_rows", boxed Conditional);
        push_prop!(out, self, first_column, "first_column", boxed Conditional);
        push_prop!(out, self, last_column, "last_column", boxed Conditional);
        push_prop!(out, self, first_row, "first_row", boxed Conditional);
        push_prop!(out, self, last_row, "last_row", boxed Conditional);
        push_prop!(out, self, top_left_cell, "top_left_cell", boxed Conditional);
        push_prop!(out, self, top_right_cell, "top_right_cell", boxed Conditional);
        push_prop!(
            out,
            self,
            bottom_left_cell,
            "bottom_left_cell",
            boxed Conditional
        );
        push_prop!(
            out,
            self,
            bottom_right_cell,
            "bottom_right_cell",
            boxed Conditional
        );
        out
    }
}

/// Row-level properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRowProperties {
    pub height: Option<RowHeight>,
    pub is_header: Option<bool>,
    /// Inverted `cantSplit`: false forbids breaking inside the row
    pub split: Option<bool>,
    pub alignment: Option<String>,
    pub cell_spacing: Option<CssUnit>,
}

impl TableRowProperties {
    pub fn is_empty(&self) -> bool {
        self.properties().is_empty()
    }

    pub fn properties(&self) -> Vec<Property> {
        let mut out = Vec::new();
        push_prop!(out, self, height, "row_height", RowHeight);
        push_prop!(out, self, is_header, "is_header", Bool);
        push_prop!(out, self, split, "row_split", Bool);
        push_prop!(out, self, alignment, "alignment", Str);
        push_prop!(out, self, cell_spacing, "cell_spacing", Unit);
        out
    }
}

/// Cell-level properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableCellProperties {
    pub width: Option<Measure>,
    pub padding_top: Option<CssUnit>,
    pub padding_right: Option<CssUnit>,
    pub padding_bottom: Option<CssUnit>,
    pub padding_left: Option<CssUnit>,
    pub background_color: Option<CssColor>,
    pub valign: Option<String>,
    /// Inverted `noWrap`
    pub wrap_text: Option<bool>,
    pub fit_text: Option<bool>,
    pub border_top: Option<Border>,
    pub border_right: Option<Border>,
    pub border_bottom: Option<Border>,
    pub border_left: Option<Border>,
    pub border_inside_horizontal: Option<Border>,
    pub border_inside_vertical: Option<Border>,
}

impl TableCellProperties {
    pub fn is_empty(&self) -> bool {
        self.properties().is_empty() && self.border_properties().is_empty()
    }

    /// Non-border cell properties
    pub fn properties(&self) -> Vec<Property> {
        let mut out = Vec::new();
        push_prop!(out, self, width, "cell_width", Measure);
        push_prop!(out, self, padding_top, "padding_top", Unit);
        push_prop!(out, self, padding_right, "padding_right", Unit);
        push_prop!(out, self, padding_bottom, "padding_bottom", Unit);
        push_prop!(out, self, padding_left, "padding_left", Unit);
        push_prop!(out, self, background_color, "background_color", Color);
        push_prop!(out, self, valign, "valign", Str);
        push_prop!(out, self, wrap_text, "wrap_text", Bool);
        push_prop!(out, self, fit_text, "fit_text", Bool);
        out
    }

    /// Border properties, routed through direction-specific selectors
    /// in table contexts
    pub fn border_properties(&self) -> Vec<Property> {
        let mut out = Vec::new();
        push_prop!(out, self, border_top, "border_top", Border);
        push_prop!(out, self, border_right, "border_right", Border);
        push_prop!(out, self, border_bottom, "border_bottom", Border);
        push_prop!(out, self, border_left, "border_left", Border);
        push_prop!(
            out,
            self,
            border_inside_horizontal,
            "border_inside_horizontal",
            Border
        );
        push_prop!(
            out,
            self,
            border_inside_vertical,
            "border_inside_vertical",
            Border
        );
        out
    }
}

/// One conditional formatting block (`w:tblStylePr`)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableConditionalFormatting {
    pub text: TextFormatting,
    pub paragraph: ParagraphFormatting,
    pub cell: TableCellProperties,
    pub row: TableRowProperties,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_yield_no_properties() {
        let fmt = TextFormatting::default();
        assert!(fmt.properties().is_empty());
    }

    #[test]
    fn test_set_fields_appear_in_order() {
        let fmt = TextFormatting {
            bold: Some(true),
            font_size: Some(CssUnit::new(12.0, "pt").unwrap()),
            ..Default::default()
        };
        let names: Vec<&str> = fmt.properties().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["bold", "font_size"]);
    }

    #[test]
    fn test_highlight_precedes_shading() {
        let fmt = TextFormatting {
            background_color: Some(CssColor::new(0, 0, 0)),
            highlight: Some("yellow".to_string()),
            ..Default::default()
        };
        let names: Vec<&str> = fmt.properties().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["highlight", "background_color"]);
    }

    #[test]
    fn test_band_sizes_default_to_one() {
        let table = TableProperties::default();
        assert_eq!(table.row_band(), 1);
        let zero = TableProperties {
            row_band_size: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.row_band(), 1);
    }

    #[test]
    fn test_false_is_still_a_set_property() {
        let fmt = ParagraphFormatting {
            keep_together: Some(false),
            ..Default::default()
        };
        let props = fmt.properties();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].value, Value::Bool(false));
    }
}
