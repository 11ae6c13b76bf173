//! Run-level property serializers.
//!
//! Word toggles map to (property, on, off) pairs. Strike-through and
//! underline both feed `text-decoration-line`, so they merge into the
//! existing declaration instead of overwriting it.

use cascadoc_model::{Property, Value};

use crate::border::serialize_border_value;
use crate::context::StyleContext;
use crate::error::Result;
use crate::registry::SerializerRegistry;

fn toggle(ctx: &mut StyleContext<'_>, prop: &Property, name: &str, on: &str, off: &str) {
    if let Value::Bool(v) = prop.value {
        ctx.set(name, if v { on } else { off });
    }
}

macro_rules! toggle_serializer {
    ($fn_name:ident, $css:literal, $on:literal, $off:literal) => {
        pub(crate) fn $fn_name(
            _registry: &SerializerRegistry,
            ctx: &mut StyleContext<'_>,
            prop: &Property,
        ) -> Result<()> {
            toggle(ctx, prop, $css, $on, $off);
            Ok(())
        }
    };
}

toggle_serializer!(bold, "font-weight", "bold", "normal");
toggle_serializer!(italics, "font-style", "italic", "normal");
toggle_serializer!(all_caps, "text-transform", "uppercase", "none");
toggle_serializer!(small_caps, "font-variant", "small-caps", "normal");
toggle_serializer!(vanish, "visibility", "hidden", "visible");
toggle_serializer!(font_kerning, "font-kerning", "normal", "none");
// No native CSS for embossed/engraved/outlined text; conventional
// text-shadow and text-stroke stand-ins.
toggle_serializer!(emboss, "text-shadow", "-1px -1px 0 white", "none");
toggle_serializer!(imprint, "text-shadow", "1px 1px 0 white", "none");
toggle_serializer!(shadow, "text-shadow", "1px 1px 2px", "none");
toggle_serializer!(outline, "-webkit-text-stroke", "1px", "0");

/// Add or remove one line in `text-decoration-line`, keeping the value
/// sorted and backing it with a solid default style
fn merge_decoration_line(ctx: &mut StyleContext<'_>, line: &str, add: bool) {
    let block = ctx.block();
    let mut lines: Vec<String> = block
        .get("text-decoration-line")
        .map(|v| {
            v.split_whitespace()
                .filter(|s| *s != "none")
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    if add {
        if !lines.iter().any(|l| l == line) {
            lines.push(line.to_string());
            lines.sort();
        }
    } else {
        lines.retain(|l| l != line);
    }
    let value = if lines.is_empty() {
        "none".to_string()
    } else {
        lines.join(" ")
    };
    block.set("text-decoration-line", value);
    if block.get("text-decoration-style").is_none() {
        block.set("text-decoration-style", "solid");
    }
}

pub(crate) fn strike(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Bool(v) = prop.value {
        merge_decoration_line(ctx, "line-through", v);
    }
    Ok(())
}

pub(crate) fn double_strike(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Bool(v) = prop.value {
        merge_decoration_line(ctx, "line-through", v);
        if v {
            ctx.set("text-decoration-style", "double");
        }
    }
    Ok(())
}

pub(crate) fn underline(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    let Value::Decoration(deco) = &prop.value else {
        return Ok(());
    };
    if deco.lines().is_empty() {
        // w:u w:val="none" removes an inherited underline
        merge_decoration_line(ctx, "underline", false);
    } else {
        for line in deco.lines() {
            merge_decoration_line(ctx, line, true);
        }
    }
    if let Some(style) = &deco.style {
        ctx.set("text-decoration-style", style);
    }
    if let Some(color) = &deco.color {
        ctx.set("text-decoration-color", color.css());
    }
    Ok(())
}

pub(crate) fn font_family(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Str(v) = &prop.value {
        ctx.set("font-family", v.clone());
    }
    Ok(())
}

pub(crate) fn font_size(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Unit(v) = &prop.value {
        ctx.set("font-size", v.css_pt());
    }
    Ok(())
}

pub(crate) fn font_color(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Color(v) = &prop.value {
        ctx.set("color", v.css());
    }
    Ok(())
}

pub(crate) fn highlight(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Str(v) = &prop.value {
        ctx.set("background-color", v.clone());
    }
    Ok(())
}

/// Shading loses to an already written highlight
pub(crate) fn background_color(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Color(v) = &prop.value {
        if ctx.block().get("background-color").is_none() {
            ctx.set("background-color", v.css());
        }
    }
    Ok(())
}

pub(crate) fn letter_spacing(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Unit(v) = &prop.value {
        ctx.set("letter-spacing", v.css_pt());
    }
    Ok(())
}

/// Raised/lowered text. Rendered through relative positioning so it
/// can coexist with `vertical-align: super/sub` from `w:vertAlign`.
pub(crate) fn position(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Unit(v) = &prop.value {
        ctx.set("position", "relative");
        ctx.set("top", (-*v).css_pt());
    }
    Ok(())
}

pub(crate) fn vertical_align(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Str(v) = &prop.value {
        ctx.set("vertical-align", v.clone());
    }
    Ok(())
}

/// Directionless run border (`w:bdr`)
pub(crate) fn text_border(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Border(border) = &prop.value {
        let target = ctx.target.clone();
        serialize_border_value(ctx, None, border, &target);
    }
    Ok(())
}
