//! Selector synthesis and the mutable serialization context.

use cascadoc_model::{heading_level, StyleKind, Stylesheet};

use crate::declarations::{CssDeclarationBlock, CssRuleSet};

/// The selector components of one style: its own selector followed by
/// the recursively computed selectors of its children. Suffixes are
/// distributed over every part, so `table.x, table.y` with suffix
/// `tr` becomes `table.x tr, table.y tr`.
#[derive(Debug, Clone)]
pub struct SelectorParts(Vec<String>);

impl SelectorParts {
    pub fn new(parts: Vec<String>) -> Self {
        SelectorParts(parts)
    }

    pub fn single(part: impl Into<String>) -> Self {
        SelectorParts(vec![part.into()])
    }

    /// Compute the selector parts for a style, including children.
    ///
    /// The root paragraph style skips children that are plain `p.{id}`
    /// selectors: they already match the bare `p` of the root. Heading
    /// children keep their own `h1..h6` selectors and are kept.
    pub fn for_style(sheet: &Stylesheet, kind: StyleKind, id: &str) -> Self {
        SelectorParts(collect_parts(sheet, kind, id))
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined selector without suffix
    pub fn plain(&self) -> String {
        self.0.join(", ")
    }

    /// Comma-joined selector with a descendant suffix on every part
    pub fn with_suffix(&self, suffix: &str) -> String {
        self.0
            .iter()
            .map(|p| {
                if suffix.is_empty() {
                    p.clone()
                } else {
                    format!("{} {}", p, suffix)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Comma-joined over several suffixes, suffix-major order
    pub fn with_suffixes(&self, suffixes: &[String]) -> String {
        suffixes
            .iter()
            .map(|s| self.with_suffix(s))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Append a pseudo-element to every part (no space)
    pub fn with_pseudo(&self, pseudo: &str) -> String {
        self.0
            .iter()
            .map(|p| format!("{}{}", p, pseudo))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn own_selector(sheet: &Stylesheet, kind: StyleKind, id: &str) -> String {
    match kind {
        StyleKind::Span => format!("span.{}", id),
        StyleKind::Paragraph => {
            if id.is_empty() {
                "p".to_string()
            } else {
                match sheet
                    .paragraph_styles
                    .get(id)
                    .and_then(|s| heading_level(&s.name))
                {
                    Some(level) => format!("h{}", level),
                    None => format!("p.{}", id),
                }
            }
        }
        StyleKind::Table => {
            if id.is_empty() {
                "table".to_string()
            } else {
                format!("table.{}", id)
            }
        }
    }
}

fn collect_parts(sheet: &Stylesheet, kind: StyleKind, id: &str) -> Vec<String> {
    let mut parts = vec![own_selector(sheet, kind, id)];
    let children: Vec<String> = match kind {
        StyleKind::Span => sheet
            .span_styles
            .get(id)
            .map(|s| s.children.clone())
            .unwrap_or_default(),
        StyleKind::Paragraph => sheet
            .paragraph_styles
            .get(id)
            .map(|s| s.children.clone())
            .unwrap_or_default(),
        StyleKind::Table => sheet
            .table_styles
            .get(id)
            .map(|s| s.children.clone())
            .unwrap_or_default(),
    };
    let skip_plain = kind == StyleKind::Paragraph && id.is_empty();
    for child in children {
        if skip_plain {
            let is_heading = sheet
                .paragraph_styles
                .get(&child)
                .and_then(|s| heading_level(&s.name))
                .is_some();
            if !is_heading {
                continue;
            }
        }
        parts.extend(collect_parts(sheet, kind, &child));
    }
    parts
}

/// Selector overrides for directional borders. `None` falls back to
/// the context target; conditional table slots point each direction at
/// the edge cells of their region.
#[derive(Debug, Clone, Default)]
pub struct BorderTargets {
    pub top: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
}

impl BorderTargets {
    pub fn for_direction(&self, direction: &str) -> Option<&str> {
        match direction {
            "top" => self.top.as_deref(),
            "right" => self.right.as_deref(),
            "bottom" => self.bottom.as_deref(),
            "left" => self.left.as_deref(),
            _ => None,
        }
    }
}

/// Mutable state threaded through property serialization of one style
#[derive(Debug)]
pub struct StyleContext<'a> {
    pub stylesheet: &'a Stylesheet,
    pub rules: CssRuleSet,
    pub parts: SelectorParts,
    /// Selector plain properties are written to
    pub target: String,
    /// Set during table serialization; any border write forces
    /// `border-collapse: collapse` here
    pub table_selector: Option<String>,
    pub border_targets: BorderTargets,
    /// `None` disables inside-horizontal borders (single-row regions)
    pub inside_horizontal: Option<String>,
    /// `None` disables inside-vertical borders (single-column regions)
    pub inside_vertical: Option<String>,
    pub row_band: u32,
    pub col_band: u32,
}

impl<'a> StyleContext<'a> {
    pub fn new(stylesheet: &'a Stylesheet, parts: SelectorParts) -> Self {
        let target = parts.plain();
        StyleContext {
            stylesheet,
            rules: CssRuleSet::new(),
            parts,
            target,
            table_selector: None,
            border_targets: BorderTargets::default(),
            inside_horizontal: None,
            inside_vertical: None,
            row_band: 1,
            col_band: 1,
        }
    }

    /// The declaration block of the current target selector
    pub fn block(&mut self) -> &mut CssDeclarationBlock {
        let target = self.target.clone();
        self.rules.get_or_create(&target)
    }

    /// Set a declaration on the current target
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.block().set(name, value);
    }

    /// Set a declaration on an explicit selector
    pub fn set_at(&mut self, selector: &str, name: &str, value: impl Into<String>) {
        self.rules.get_or_create(selector).set(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascadoc_model::ParagraphStyle;

    fn sheet_with_headings() -> Stylesheet {
        let mut sheet = Stylesheet::new();
        sheet.add_paragraph_style(ParagraphStyle {
            id: String::new(),
            name: "Normal".to_string(),
            ..Default::default()
        });
        for (id, name) in [
            ("Heading1", "Heading 1"),
            ("Heading2", "Heading 2"),
            ("Heading3", "Heading 3"),
            ("BodyText", "Body Text"),
        ] {
            sheet.add_paragraph_style(ParagraphStyle {
                id: id.to_string(),
                name: name.to_string(),
                parent_id: Some(String::new()),
                ..Default::default()
            });
        }
        sheet.link_children();
        sheet
    }

    #[test]
    fn test_root_paragraph_selector_keeps_headings_only() {
        let sheet = sheet_with_headings();
        let parts = SelectorParts::for_style(&sheet, StyleKind::Paragraph, "");
        assert_eq!(parts.plain(), "p, h1, h2, h3");
    }

    #[test]
    fn test_non_root_children_are_kept() {
        let mut sheet = sheet_with_headings();
        sheet.add_paragraph_style(ParagraphStyle {
            id: "Quote".to_string(),
            name: "Quote".to_string(),
            parent_id: Some("BodyText".to_string()),
            ..Default::default()
        });
        sheet.link_children();
        let parts = SelectorParts::for_style(&sheet, StyleKind::Paragraph, "BodyText");
        assert_eq!(parts.plain(), "p.BodyText, p.Quote");
    }

    #[test]
    fn test_suffix_distribution() {
        let parts = SelectorParts::new(vec!["table.a".to_string(), "table.b".to_string()]);
        assert_eq!(parts.with_suffix("td"), "table.a td, table.b td");
        assert_eq!(parts.with_pseudo(":before"), "table.a:before, table.b:before");
        let suffixes = vec!["tr:nth-child(2n+1)".to_string(), "tr:nth-child(2n+2)".to_string()];
        assert_eq!(
            parts.with_suffixes(&suffixes),
            "table.a tr:nth-child(2n+1), table.b tr:nth-child(2n+1), \
             table.a tr:nth-child(2n+2), table.b tr:nth-child(2n+2)"
        );
    }

    #[test]
    fn test_heading_own_selector_has_no_class() {
        let sheet = sheet_with_headings();
        let parts = SelectorParts::for_style(&sheet, StyleKind::Paragraph, "Heading2");
        assert_eq!(parts.plain(), "h2");
    }
}
