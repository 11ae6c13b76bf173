//! Counter serialization: list markers become `:before` rules with
//! `counter-increment`/`content`, resets land on the paragraph rule.

use cascadoc_model::{Counter, CounterSegment, CssUnit, LevelSuffix, Property, Value};

use crate::context::StyleContext;
use crate::error::Result;
use crate::registry::SerializerRegistry;

/// Marker gap for a tab suffix when the level carries no first-line
/// indent to derive the gap from
const TAB_GAP: CssUnit = CssUnit::from_emu(228600);

/// The CSS `content` value of one level. Bullets emit the escaped
/// codepoint of their glyph; numeric levels interleave quoted literals
/// with `counter()` references. A `space` suffix appends a no-break
/// space. Empty templates produce no content value.
pub fn counter_content(counter: &Counter) -> Option<String> {
    let mut pieces: Vec<String> = Vec::new();
    if counter.is_bullet() {
        if let Some(CounterSegment::Literal(text)) = counter.text.first() {
            if let Some(glyph) = text.chars().next() {
                pieces.push(format!("\"\\005C {:04x}\"", glyph as u32));
            }
        }
    } else {
        for segment in &counter.text {
            match segment {
                CounterSegment::Literal(text) => pieces.push(format!("\"{}\"", text)),
                CounterSegment::Reference(name) => {
                    pieces.push(format!("counter({}, {})", name, counter.style_of(name)))
                }
            }
        }
    }
    if pieces.is_empty() {
        return None;
    }
    if counter.suffix == LevelSuffix::Space {
        pieces.push("\"\\00a0\"".to_string());
    }
    Some(pieces.join(" "))
}

pub(crate) fn counter(
    registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    let Value::Counter(counter) = &prop.value else {
        return Ok(());
    };
    let paragraph_selector = ctx.target.clone();
    let before = ctx.parts.with_pseudo(":before");

    if !counter.restart.is_empty() {
        ctx.set("counter-reset", counter.restart.join(" "));
    }

    ctx.target = before;
    ctx.set("counter-increment", counter.name.clone());
    if let Some(content) = counter_content(counter) {
        ctx.set("content", content);
    }
    if let Some(justification) = &counter.justification {
        ctx.set("text-align", justification.clone());
    }

    registry.serialize_all(ctx, &counter.text_formatting.properties())?;
    let marker_props: Vec<Property> = counter
        .paragraph_formatting
        .properties()
        .into_iter()
        .filter(|p| p.name != "indent_left" && p.name != "text_indent")
        .collect();
    registry.serialize_all(ctx, &marker_props)?;

    serialize_indents(ctx, counter, &paragraph_selector);

    ctx.target = paragraph_selector;
    Ok(())
}

/// Reconcile the level's hanging/first-line indent with the suffix.
///
/// A tab suffix turns a hanging indent into an inline-block marker
/// exactly as wide as the hang, so the first text line starts flush
/// with the wrapped lines. A first-line (non-negative) indent with a
/// tab suffix becomes a `margin-right` on the marker equal to the
/// indent; the paragraph itself carries no `text-indent` in that case.
/// Any other suffix keeps the shift as a plain `text-indent` on the
/// paragraph.
fn serialize_indents(ctx: &mut StyleContext<'_>, counter: &Counter, paragraph_selector: &str) {
    let formatting = &counter.paragraph_formatting;
    if let Some(text_indent) = formatting.text_indent {
        match counter.suffix {
            LevelSuffix::Tab if text_indent.is_negative() => {
                ctx.set("display", "inline-block");
                ctx.set("width", (-text_indent).css_pt());
            }
            LevelSuffix::Tab => {
                ctx.set("display", "inline-block");
                ctx.set("margin-right", text_indent.css_pt());
            }
            _ => {
                if !text_indent.is_zero() {
                    ctx.set_at(paragraph_selector, "text-indent", text_indent.css_pt());
                }
            }
        }
    } else if counter.suffix == LevelSuffix::Tab {
        ctx.set("margin-right", TAB_GAP.css_pt());
    }
    if let Some(indent_left) = formatting.indent_left {
        ctx.set_at(paragraph_selector, "margin-left", indent_left.css_pt());
    }
}
