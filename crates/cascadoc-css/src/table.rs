//! Table property serializers: widths, spacing, borders, banding and
//! the conditional formatting slots.
//!
//! Banding turns `tblStyleRowBandSize`/`tblStyleColBandSize` into
//! `nth-child` selector families. For band size N the period is 2N;
//! odd bands cover children 1..=N of each period, even bands N+1..=2N.

use cascadoc_model::{HeightRule, Property, TableConditionalFormatting, Value};

use crate::border::{apply_hidden_trick, serialize_border_value};
use crate::context::{BorderTargets, StyleContext};
use crate::error::Result;
use crate::registry::SerializerRegistry;

// ---------------------------------------------------------------------------
// Band selector math
// ---------------------------------------------------------------------------

fn band_range(band: u32, odd: bool) -> std::ops::RangeInclusive<u32> {
    let band = band.max(1);
    if odd {
        1..=band
    } else {
        band + 1..=2 * band
    }
}

/// Row selectors of one band family: `tr:nth-child(2Nn+k)`
pub fn row_band_suffixes(band: u32, odd: bool) -> Vec<String> {
    let period = 2 * band.max(1);
    band_range(band, odd)
        .map(|k| format!("tr:nth-child({}n+{})", period, k))
        .collect()
}

/// Column selectors of one band family, `row_prefix td:nth-child(...)`
pub fn col_band_suffixes(band: u32, odd: bool, row_prefix: &str) -> Vec<String> {
    let period = 2 * band.max(1);
    band_range(band, odd)
        .map(|k| format!("{} td:nth-child({}n+{})", row_prefix, period, k))
        .collect()
}

/// Adjacent-cell pairs within one column band, for inside-vertical
/// borders. Empty for band size 1: a single-column band has no inside.
pub fn col_inside_vertical_suffixes(band: u32, odd: bool) -> Vec<String> {
    let band = band.max(1);
    let period = 2 * band;
    let start = if odd { 1 } else { band + 1 };
    (start..start + band - 1)
        .map(|k| {
            format!(
                "tr td:nth-child({}n+{}) + td:nth-child({}n+{})",
                period,
                k,
                period,
                k + 1
            )
        })
        .collect()
}

/// All rows of one band except the last, for inside-horizontal borders
pub fn row_inside_horizontal_suffixes(band: u32, odd: bool) -> Vec<String> {
    let mut rows = row_band_suffixes(band, odd);
    rows.pop();
    rows.iter().map(|r| format!("{} td", r)).collect()
}

// ---------------------------------------------------------------------------
// Plain table properties
// ---------------------------------------------------------------------------

pub(crate) fn table_width(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Measure(m) = &prop.value {
        ctx.set("width", m.css());
    }
    Ok(())
}

pub(crate) fn table_alignment(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Str(v) = &prop.value {
        match v.as_str() {
            "center" => {
                ctx.set("margin-left", "auto");
                ctx.set("margin-right", "auto");
            }
            "end" => ctx.set("margin-left", "auto"),
            _ => ctx.set("margin-right", "auto"),
        }
    }
    Ok(())
}

pub(crate) fn table_indent(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Unit(v) = &prop.value {
        ctx.set("margin-left", v.css_pt());
    }
    Ok(())
}

pub(crate) fn table_layout(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Str(v) = &prop.value {
        let value = if v == "fixed" { "fixed" } else { "auto" };
        ctx.set("table-layout", value);
    }
    Ok(())
}

pub(crate) fn cell_spacing(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Unit(v) = &prop.value {
        if v.is_zero() {
            ctx.set("border-spacing", "unset");
        } else {
            ctx.set("border-spacing", v.css_pt());
        }
    }
    Ok(())
}

macro_rules! cell_margin_serializer {
    ($fn_name:ident, $css:literal) => {
        /// Table-level default cell padding (`w:tblCellMar`)
        pub(crate) fn $fn_name(
            _registry: &SerializerRegistry,
            ctx: &mut StyleContext<'_>,
            prop: &Property,
        ) -> Result<()> {
            if let Value::Unit(v) = &prop.value {
                let selector = ctx.parts.with_suffix("td");
                ctx.set_at(&selector, $css, v.css_pt());
            }
            Ok(())
        }
    };
}

cell_margin_serializer!(cell_padding_top, "padding-top");
cell_margin_serializer!(cell_padding_right, "padding-right");
cell_margin_serializer!(cell_padding_bottom, "padding-bottom");
cell_margin_serializer!(cell_padding_left, "padding-left");

// ---------------------------------------------------------------------------
// Row and cell properties
// ---------------------------------------------------------------------------

pub(crate) fn row_height(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::RowHeight(h) = &prop.value {
        match h.rule {
            HeightRule::AtLeast => ctx.set("min-height", h.value.css_pt()),
            HeightRule::Exact => ctx.set("height", h.value.css_pt()),
            HeightRule::Auto => {}
        }
    }
    Ok(())
}

pub(crate) fn row_split(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Bool(v) = prop.value {
        ctx.set("break-inside", if v { "auto" } else { "avoid" });
    }
    Ok(())
}

pub(crate) fn cell_width(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Measure(m) = &prop.value {
        ctx.set("width", m.css());
    }
    Ok(())
}

macro_rules! padding_serializer {
    ($fn_name:ident, $css:literal) => {
        pub(crate) fn $fn_name(
            _registry: &SerializerRegistry,
            ctx: &mut StyleContext<'_>,
            prop: &Property,
        ) -> Result<()> {
            if let Value::Unit(v) = &prop.value {
                ctx.set($css, v.css_pt());
            }
            Ok(())
        }
    };
}

padding_serializer!(padding_top, "padding-top");
padding_serializer!(padding_right, "padding-right");
padding_serializer!(padding_bottom, "padding-bottom");
padding_serializer!(padding_left, "padding-left");

pub(crate) fn valign(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Str(v) = &prop.value {
        ctx.set("vertical-align", v.clone());
    }
    Ok(())
}

pub(crate) fn wrap_text(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Bool(v) = prop.value {
        ctx.set("white-space", if v { "normal" } else { "nowrap" });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Directional and inside borders
// ---------------------------------------------------------------------------

macro_rules! border_direction_serializer {
    ($fn_name:ident, $direction:literal) => {
        pub(crate) fn $fn_name(
            _registry: &SerializerRegistry,
            ctx: &mut StyleContext<'_>,
            prop: &Property,
        ) -> Result<()> {
            if let Value::Border(border) = &prop.value {
                let selector = ctx
                    .border_targets
                    .for_direction($direction)
                    .map(String::from)
                    .unwrap_or_else(|| ctx.target.clone());
                serialize_border_value(ctx, Some($direction), border, &selector);
            }
            Ok(())
        }
    };
}

border_direction_serializer!(border_top, "top");
border_direction_serializer!(border_right, "right");
border_direction_serializer!(border_bottom, "bottom");
border_direction_serializer!(border_left, "left");

/// Inside horizontal borders render as the bottom border of every
/// non-final row cell. Disabled (`None` selector) in single-row
/// regions.
pub(crate) fn border_inside_horizontal(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    let Value::Border(border) = &prop.value else {
        return Ok(());
    };
    let Some(selector) = ctx.inside_horizontal.clone() else {
        return Ok(());
    };
    serialize_border_value(ctx, Some("bottom"), border, &selector);
    apply_hidden_trick(ctx);
    Ok(())
}

/// Inside vertical borders render as the left border of every cell
/// that follows another cell. Disabled in single-column regions.
pub(crate) fn border_inside_vertical(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    let Value::Border(border) = &prop.value else {
        return Ok(());
    };
    let Some(selector) = ctx.inside_vertical.clone() else {
        return Ok(());
    };
    serialize_border_value(ctx, Some("left"), border, &selector);
    apply_hidden_trick(ctx);
    Ok(())
}

// ---------------------------------------------------------------------------
// Conditional formatting slots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    WholeTable,
    OddRows,
    EvenRows,
    OddColumns,
    EvenColumns,
    FirstRow,
    LastRow,
    FirstColumn,
    LastColumn,
    TopLeftCell,
    TopRightCell,
    BottomLeftCell,
    BottomRightCell,
}

struct SlotSelectors {
    cell: String,
    row: String,
    top: String,
    bottom: String,
    left: String,
    right: String,
    inside_horizontal: Option<String>,
    inside_vertical: Option<String>,
}

fn row_band_slot(ctx: &StyleContext<'_>, odd: bool) -> SlotSelectors {
    let parts = &ctx.parts;
    let rows = row_band_suffixes(ctx.row_band, odd);
    let cells: Vec<String> = rows.iter().map(|r| format!("{} td", r)).collect();
    let first: Vec<String> = rows.iter().map(|r| format!("{} td:first-of-type", r)).collect();
    let last: Vec<String> = rows.iter().map(|r| format!("{} td:last-of-type", r)).collect();
    let inside_h = row_inside_horizontal_suffixes(ctx.row_band, odd);
    let inside_v: Vec<String> = rows.iter().map(|r| format!("{} td + td", r)).collect();
    SlotSelectors {
        cell: parts.with_suffixes(&cells),
        row: parts.with_suffixes(&rows),
        top: parts.with_suffix(&cells[0]),
        bottom: parts.with_suffix(&cells[cells.len() - 1]),
        left: parts.with_suffixes(&first),
        right: parts.with_suffixes(&last),
        inside_horizontal: if inside_h.is_empty() {
            None
        } else {
            Some(parts.with_suffixes(&inside_h))
        },
        inside_vertical: Some(parts.with_suffixes(&inside_v)),
    }
}

fn col_band_slot(ctx: &StyleContext<'_>, odd: bool) -> SlotSelectors {
    let parts = &ctx.parts;
    let cols = col_band_suffixes(ctx.col_band, odd, "tr");
    let top = col_band_suffixes(ctx.col_band, odd, "tr:first-of-type");
    let bottom = col_band_suffixes(ctx.col_band, odd, "tr:last-of-type");
    let inside_h = col_band_suffixes(ctx.col_band, odd, "tr:not(:last-of-type)");
    let inside_v = col_inside_vertical_suffixes(ctx.col_band, odd);
    SlotSelectors {
        cell: parts.with_suffixes(&cols),
        row: parts.with_suffixes(&cols),
        top: parts.with_suffixes(&top),
        bottom: parts.with_suffixes(&bottom),
        left: parts.with_suffix(&cols[0]),
        right: parts.with_suffix(&cols[cols.len() - 1]),
        inside_horizontal: Some(parts.with_suffixes(&inside_h)),
        inside_vertical: if inside_v.is_empty() {
            None
        } else {
            Some(parts.with_suffixes(&inside_v))
        },
    }
}

fn edge_row_slot(ctx: &StyleContext<'_>, first: bool) -> SlotSelectors {
    let parts = &ctx.parts;
    let row = if first {
        "tr:first-of-type"
    } else {
        "tr:last-of-type"
    };
    let cell = format!("{} td", row);
    SlotSelectors {
        cell: parts.with_suffix(&cell),
        row: parts.with_suffix(row),
        top: parts.with_suffix(&cell),
        bottom: parts.with_suffix(&cell),
        left: parts.with_suffix(&format!("{} td:first-of-type", row)),
        right: parts.with_suffix(&format!("{} td:last-of-type", row)),
        // A single row has no inside-horizontal borders
        inside_horizontal: None,
        inside_vertical: Some(parts.with_suffix(&format!("{} td + td", row))),
    }
}

fn edge_column_slot(ctx: &StyleContext<'_>, first: bool) -> SlotSelectors {
    let parts = &ctx.parts;
    let col = if first {
        "td:first-of-type"
    } else {
        "td:last-of-type"
    };
    let cell = format!("tr {}", col);
    SlotSelectors {
        cell: parts.with_suffix(&cell),
        row: parts.with_suffix(&cell),
        top: parts.with_suffix(&format!("tr:first-of-type {}", col)),
        bottom: parts.with_suffix(&format!("tr:last-of-type {}", col)),
        left: parts.with_suffix(&cell),
        right: parts.with_suffix(&cell),
        inside_horizontal: Some(parts.with_suffix(&format!("tr:not(:last-of-type) {}", col))),
        // A single column has no inside-vertical borders
        inside_vertical: None,
    }
}

fn corner_slot(ctx: &StyleContext<'_>, top: bool, left: bool) -> SlotSelectors {
    let parts = &ctx.parts;
    let row = if top { "tr:first-of-type" } else { "tr:last-of-type" };
    let col = if left { "td:first-of-type" } else { "td:last-of-type" };
    let cell = parts.with_suffix(&format!("{} {}", row, col));
    // A single cell: every border direction collapses onto the cell
    SlotSelectors {
        row: cell.clone(),
        top: cell.clone(),
        bottom: cell.clone(),
        left: cell.clone(),
        right: cell.clone(),
        inside_horizontal: None,
        inside_vertical: None,
        cell,
    }
}

fn whole_table_slot(ctx: &StyleContext<'_>) -> SlotSelectors {
    let parts = &ctx.parts;
    SlotSelectors {
        cell: parts.with_suffix("td"),
        row: parts.with_suffix("tr"),
        top: parts.with_suffix("tr:first-of-type td"),
        bottom: parts.with_suffix("tr:last-of-type td"),
        left: parts.with_suffix("tr td:first-of-type"),
        right: parts.with_suffix("tr td:last-of-type"),
        inside_horizontal: Some(parts.with_suffix("tr:not(:last-of-type) td")),
        inside_vertical: Some(parts.with_suffix("td + td")),
    }
}

fn slot_selectors(kind: SlotKind, ctx: &StyleContext<'_>) -> SlotSelectors {
    match kind {
        SlotKind::WholeTable => whole_table_slot(ctx),
        SlotKind::OddRows => row_band_slot(ctx, true),
        SlotKind::EvenRows => row_band_slot(ctx, false),
        SlotKind::OddColumns => col_band_slot(ctx, true),
        SlotKind::EvenColumns => col_band_slot(ctx, false),
        SlotKind::FirstRow => edge_row_slot(ctx, true),
        SlotKind::LastRow => edge_row_slot(ctx, false),
        SlotKind::FirstColumn => edge_column_slot(ctx, true),
        SlotKind::LastColumn => edge_column_slot(ctx, false),
        SlotKind::TopLeftCell => corner_slot(ctx, true, true),
        SlotKind::TopRightCell => corner_slot(ctx, true, false),
        SlotKind::BottomLeftCell => corner_slot(ctx, false, true),
        SlotKind::BottomRightCell => corner_slot(ctx, false, false),
    }
}

/// Serialize one conditional slot: run/paragraph/cell formatting goes
/// to the slot's cell selector, row formatting to its row selector,
/// and borders are routed through the slot's edge selectors.
fn serialize_conditional(
    registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    kind: SlotKind,
    cond: &TableConditionalFormatting,
) -> Result<()> {
    let selectors = slot_selectors(kind, ctx);

    let saved_target = ctx.target.clone();
    let saved_borders = ctx.border_targets.clone();
    let saved_inside_h = ctx.inside_horizontal.clone();
    let saved_inside_v = ctx.inside_vertical.clone();

    ctx.target = selectors.cell.clone();
    ctx.border_targets = BorderTargets {
        top: Some(selectors.top),
        right: Some(selectors.right),
        bottom: Some(selectors.bottom),
        left: Some(selectors.left),
    };
    ctx.inside_horizontal = selectors.inside_horizontal;
    ctx.inside_vertical = selectors.inside_vertical;

    registry.serialize_all(ctx, &cond.text.properties())?;
    registry.serialize_all(ctx, &cond.paragraph.properties())?;
    registry.serialize_all(ctx, &cond.cell.properties())?;
    registry.serialize_all(ctx, &cond.cell.border_properties())?;

    ctx.target = selectors.row;
    registry.serialize_all(ctx, &cond.row.properties())?;

    ctx.target = saved_target;
    ctx.border_targets = saved_borders;
    ctx.inside_horizontal = saved_inside_h;
    ctx.inside_vertical = saved_inside_v;
    Ok(())
}

macro_rules! slot_serializer {
    ($fn_name:ident, $kind:expr) => {
        pub(crate) fn $fn_name(
            registry: &SerializerRegistry,
            ctx: &mut StyleContext<'_>,
            prop: &Property,
        ) -> Result<()> {
            if let Value::Conditional(cond) = &prop.value {
                serialize_conditional(registry, ctx, $kind, cond)?;
            }
            Ok(())
        }
    };
}

slot_serializer!(whole_table, SlotKind::WholeTable);
slot_serializer!(odd_rows, SlotKind::OddRows);
slot_serializer!(even_rows, SlotKind::EvenRows);
slot_serializer!(odd_columns, SlotKind::OddColumns);
slot_serializer!(even_columns, SlotKind::EvenColumns);
slot_serializer!(first_row, SlotKind::FirstRow);
slot_serializer!(last_row, SlotKind::LastRow);
slot_serializer!(first_column, SlotKind::FirstColumn);
slot_serializer!(last_column, SlotKind::LastColumn);
slot_serializer!(top_left_cell, SlotKind::TopLeftCell);
slot_serializer!(top_right_cell, SlotKind::TopRightCell);
slot_serializer!(bottom_left_cell, SlotKind::BottomLeftCell);
slot_serializer!(bottom_right_cell, SlotKind::BottomRightCell);
