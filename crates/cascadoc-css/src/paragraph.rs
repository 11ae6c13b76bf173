//! Paragraph-level property serializers.

use cascadoc_model::{fmt_number, LineHeight, Property, Value};

use crate::context::StyleContext;
use crate::error::Result;
use crate::registry::SerializerRegistry;

macro_rules! length_serializer {
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

length_serializer!(indent_left, "margin-left");
length_serializer!(indent_right, "margin-right");
length_serializer!(text_indent, "text-indent");
length_serializer!(margin_top, "margin-top");
length_serializer!(margin_bottom, "margin-bottom");

pub(crate) fn alignment(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Str(v) = &prop.value {
        ctx.set("text-align", v.clone());
    }
    Ok(())
}

pub(crate) fn line_height(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::LineHeight(v) = &prop.value {
        let value = match v {
            LineHeight::Length(unit) => unit.css_pt(),
            LineHeight::Multiple(m) => fmt_number(*m),
        };
        ctx.set("line-height", value);
    }
    Ok(())
}

pub(crate) fn keep_together(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Bool(v) = prop.value {
        ctx.set("break-inside", if v { "avoid" } else { "auto" });
    }
    Ok(())
}

pub(crate) fn keep_with_next(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Bool(v) = prop.value {
        ctx.set("break-after", if v { "avoid" } else { "auto" });
    }
    Ok(())
}

pub(crate) fn page_break_before(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Bool(v) = prop.value {
        ctx.set("break-before", if v { "page" } else { "auto" });
    }
    Ok(())
}

pub(crate) fn widows_control(
    _registry: &SerializerRegistry,
    ctx: &mut StyleContext<'_>,
    prop: &Property,
) -> Result<()> {
    if let Value::Bool(v) = prop.value {
        let value = if v { "2" } else { "unset" };
        ctx.set("widows", value);
        ctx.set("orphans", value);
    }
    Ok(())
}
