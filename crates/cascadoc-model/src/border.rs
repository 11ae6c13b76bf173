//! Borders and text decorations

use std::fmt;

use serde::Serialize;

use crate::color::CssColor;
use crate::unit::CssUnit;

/// CSS border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BorderStyle {
    None,
    Hidden,
    Dotted,
    Dashed,
    Solid,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Hidden => "hidden",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Solid => "solid",
            BorderStyle::Double => "double",
            BorderStyle::Groove => "groove",
            BorderStyle::Ridge => "ridge",
            BorderStyle::Inset => "inset",
            BorderStyle::Outset => "outset",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One border edge. Unset fields inherit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Border {
    pub color: Option<CssColor>,
    pub padding: Option<CssUnit>,
    pub shadow: Option<bool>,
    pub style: Option<BorderStyle>,
    pub width: Option<CssUnit>,
}

impl Border {
    /// A `none` style border suppresses every other edge property
    pub fn is_none_style(&self) -> bool {
        self.style == Some(BorderStyle::None)
    }
}

/// Merged `text-decoration-*` state for a run.
///
/// Word expresses strike-through and underline as independent flags;
/// CSS wants a single space-separated `text-decoration-line` list, so
/// lines merge here and render sorted for a stable output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextDecoration {
    lines: Vec<String>,
    pub style: Option<String>,
    pub color: Option<CssColor>,
}

impl TextDecoration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decoration line; duplicates are ignored and the list is
    /// kept sorted so `line-through underline` is canonical
    pub fn add_line(&mut self, line: &str) {
        if !self.lines.iter().any(|l| l == line) {
            self.lines.push(line.to_string());
            self.lines.sort();
        }
    }

    pub fn remove_line(&mut self, line: &str) {
        self.lines.retain(|l| l != line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Value for `text-decoration-line`, `none` when no line is set
    pub fn line_value(&self) -> String {
        if self.lines.is_empty() {
            "none".to_string()
        } else {
            self.lines.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoration_lines_merge_sorted() {
        let mut deco = TextDecoration::new();
        deco.add_line("underline");
        deco.add_line("line-through");
        deco.add_line("underline");
        assert_eq!(deco.line_value(), "line-through underline");
    }

    #[test]
    fn test_decoration_empty_is_none() {
        let mut deco = TextDecoration::new();
        assert_eq!(deco.line_value(), "none");
        deco.add_line("underline");
        deco.remove_line("underline");
        assert_eq!(deco.line_value(), "none");
    }

    #[test]
    fn test_none_style_border() {
        let border = Border {
            style: Some(BorderStyle::None),
            width: Some(CssUnit::new(1.0, "pt").unwrap()),
            ..Default::default()
        };
        assert!(border.is_none_style());
    }
}
