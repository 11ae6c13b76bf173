//! Whole-stylesheet serialization: `@page`, the screen simulation
//! block, the `body` rule and one rule group per style in document
//! order.

use std::collections::HashSet;

use cascadoc_model::{
    Counter, PageStyle, ParagraphFormatting, ParagraphStyle, Property, SpanStyle, StyleKind,
    Stylesheet, TableStyle, Value,
};

use crate::context::{BorderTargets, SelectorParts, StyleContext};
use crate::declarations::{rule_text, CssDeclarationBlock};
use crate::error::Result;
use crate::registry::SerializerRegistry;

/// Output knobs, all additive to the plain stylesheet
#[derive(Debug, Clone)]
pub struct SerializerPreferences {
    /// Emit an `@page` rule from the document section
    pub include_page_rule: bool,
    /// Emit an `@media screen` block styling `body` as a printed sheet
    pub simulate_printed_page: bool,
    /// Reset every attached counter in `body`, not only root counters
    pub initialize_counters_in_body: bool,
}

impl Default for SerializerPreferences {
    fn default() -> Self {
        SerializerPreferences {
            include_page_rule: true,
            simulate_printed_page: false,
            initialize_counters_in_body: false,
        }
    }
}

/// Serializes a [`Stylesheet`] to CSS text
#[derive(Default)]
pub struct CssStylesheetSerializer {
    registry: SerializerRegistry,
    preferences: SerializerPreferences,
}

impl CssStylesheetSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: SerializerPreferences) -> Self {
        CssStylesheetSerializer {
            registry: SerializerRegistry::standard(),
            preferences,
        }
    }

    pub fn serialize(&self, sheet: &Stylesheet) -> Result<String> {
        let mut sections: Vec<String> = Vec::new();
        if let Some(page) = &sheet.page {
            if self.preferences.include_page_rule {
                sections.push(page_rule(page));
            }
            if self.preferences.simulate_printed_page {
                sections.push(media_screen_rule(page));
            }
        }
        let body = self.body_rule(sheet)?;
        if !body.is_empty() {
            sections.push(body);
        }
        for (kind, id) in sheet.order() {
            let css = match kind {
                StyleKind::Span => match sheet.span_styles.get(id) {
                    Some(style) => self.span_rules(sheet, style)?,
                    None => continue,
                },
                StyleKind::Paragraph => match sheet.paragraph_styles.get(id) {
                    Some(style) => self.paragraph_rules(sheet, style)?,
                    None => continue,
                },
                StyleKind::Table => match sheet.table_styles.get(id) {
                    Some(style) => self.table_rules(sheet, style)?,
                    None => continue,
                },
            };
            if !css.is_empty() {
                sections.push(css);
            }
        }
        log::debug!("serialized {} CSS sections", sections.len());
        Ok(sections.join("\n"))
    }

    fn body_rule(&self, sheet: &Stylesheet) -> Result<String> {
        let mut ctx = StyleContext::new(sheet, SelectorParts::single("body"));
        self.registry.serialize_all(&mut ctx, &sheet.body.text.properties())?;
        self.registry
            .serialize_all(&mut ctx, &sheet.body.paragraph.properties())?;
        let resets = self.body_counter_resets(sheet);
        if !resets.is_empty() {
            ctx.set("counter-reset", resets.join(" "));
        }
        Ok(ctx.rules.css_text(0))
    }

    /// Counters reset on `body`. By default only root counters, those
    /// never restarted when another counter increments; the preference
    /// widens this to every attached counter.
    fn body_counter_resets(&self, sheet: &Stylesheet) -> Vec<String> {
        let restarted: HashSet<&str> = sheet
            .counter_lists
            .iter()
            .flat_map(|list| list.counters.iter())
            .flat_map(|c| c.restart.iter())
            .filter_map(|entry| entry.split(' ').next())
            .collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut resets = Vec::new();
        for counter in sheet.attached_counters() {
            if !seen.insert(counter.name.as_str()) {
                continue;
            }
            if self.preferences.initialize_counters_in_body
                || !restarted.contains(counter.name.as_str())
            {
                resets.push(counter.reset_entry());
            }
        }
        resets
    }

    fn span_rules(&self, sheet: &Stylesheet, style: &SpanStyle) -> Result<String> {
        let parts = SelectorParts::for_style(sheet, StyleKind::Span, &style.id);
        let mut ctx = StyleContext::new(sheet, parts);
        self.registry.serialize_all(&mut ctx, &style.text.properties())?;
        Ok(ctx.rules.css_text(0))
    }

    fn paragraph_rules(&self, sheet: &Stylesheet, style: &ParagraphStyle) -> Result<String> {
        let parts = SelectorParts::for_style(sheet, StyleKind::Paragraph, &style.id);
        let mut ctx = StyleContext::new(sheet, parts);
        let mut props = style.paragraph.properties();
        props.extend(style.text.properties());
        if let Some(counter) = &style.counter {
            // The style's own indents take precedence over the level's.
            // Both go through the counter serializer so the marker
            // policy sees the resolved values and writes each once.
            props.retain(|p| p.name != "indent_left" && p.name != "text_indent");
            props.push(counter_property(resolve_indents(counter, &style.paragraph)));
        }
        self.registry.serialize_all(&mut ctx, &props)?;
        Ok(ctx.rules.css_text(0))
    }

    fn table_rules(&self, sheet: &Stylesheet, style: &TableStyle) -> Result<String> {
        let parts = SelectorParts::for_style(sheet, StyleKind::Table, &style.id);
        let mut ctx = StyleContext::new(sheet, parts);
        ctx.table_selector = Some(ctx.target.clone());
        ctx.row_band = style.table.row_band();
        ctx.col_band = style.table.col_band();
        ctx.inside_horizontal = Some(ctx.parts.with_suffix("td"));
        ctx.inside_vertical = Some(ctx.parts.with_suffix("td + td"));

        let mut props = style.text.properties();
        props.extend(style.paragraph.properties());
        props.extend(style.table.properties());
        self.registry.serialize_all(&mut ctx, &props)?;

        if let Some(row) = &style.table.default_row {
            ctx.target = ctx.parts.with_suffix("tr");
            self.registry.serialize_all(&mut ctx, &row.properties())?;
        }
        if let Some(cell) = &style.table.default_cell {
            ctx.target = ctx.parts.with_suffix("td");
            ctx.border_targets = BorderTargets::default();
            self.registry.serialize_all(&mut ctx, &cell.properties())?;
            self.registry
                .serialize_all(&mut ctx, &cell.border_properties())?;
        }
        Ok(ctx.rules.css_text(0))
    }
}

fn counter_property(counter: Counter) -> Property {
    Property {
        name: "counter",
        value: Value::Counter(Box::new(counter)),
    }
}

fn resolve_indents(counter: &Counter, paragraph: &ParagraphFormatting) -> Counter {
    let mut resolved = counter.clone();
    let level = &counter.paragraph_formatting;
    resolved.paragraph_formatting.indent_left = paragraph.indent_left.or(level.indent_left);
    resolved.paragraph_formatting.text_indent = paragraph.text_indent.or(level.text_indent);
    resolved
}

fn page_rule(page: &PageStyle) -> String {
    let mut block = CssDeclarationBlock::new();
    block.set(
        "size",
        format!("{} {}", page.page_width.css_in(), page.page_height.css_in()),
    );
    block.set("margin", page_margins(page));
    rule_text("@page", &block, 0)
}

fn page_margins(page: &PageStyle) -> String {
    format!(
        "{} {} {} {}",
        page.margin_top.css_in(),
        page.margin_right.css_in(),
        page.margin_bottom.css_in(),
        page.margin_left.css_in()
    )
}

/// On screen, draw the body as a white sheet on a gray desk with the
/// page margins as padding
fn media_screen_rule(page: &PageStyle) -> String {
    let mut html = CssDeclarationBlock::new();
    html.set("background-color", "gainsboro");

    let mut body = CssDeclarationBlock::new();
    body.set("background-color", "white");
    body.set("border", "1px darkgray solid");
    body.set("box-shadow", "1rem 0.5rem 1rem rgba(0,0,0,0.15)");
    body.set("margin", "1em auto");
    let width = page.page_width - page.margin_left - page.margin_right;
    body.set("max-width", width.css_in());
    body.set("padding", page_margins(page));

    format!(
        "@media screen {{\n{}\n{}\n}}",
        rule_text("html", &html, 1),
        rule_text("body", &body, 1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascadoc_model::{CssUnit, ParagraphFormatting, TextFormatting};

    fn letter_page() -> PageStyle {
        PageStyle {
            page_width: CssUnit::new(8.5, "in").unwrap(),
            page_height: CssUnit::new(11.0, "in").unwrap(),
            margin_top: CssUnit::new(1.0, "in").unwrap(),
            margin_right: CssUnit::new(1.0, "in").unwrap(),
            margin_bottom: CssUnit::new(1.0, "in").unwrap(),
            margin_left: CssUnit::new(1.0, "in").unwrap(),
        }
    }

    #[test]
    fn test_page_rule() {
        assert_eq!(
            page_rule(&letter_page()),
            "@page {\n    size: 8.5in 11in;\n    margin: 1in 1in 1in 1in\n}"
        );
    }

    #[test]
    fn test_media_screen_rule_width() {
        let css = media_screen_rule(&letter_page());
        assert!(css.starts_with("@media screen {\n    html {"));
        assert!(css.contains("max-width: 6.5in"));
        assert!(css.contains("padding: 1in 1in 1in 1in"));
    }

    #[test]
    fn test_body_rule_with_defaults() {
        let mut sheet = Stylesheet::new();
        sheet.body.text = TextFormatting {
            font_size: Some(CssUnit::new(12.0, "pt").unwrap()),
            ..Default::default()
        };
        sheet.body.paragraph = ParagraphFormatting {
            margin_bottom: Some(CssUnit::new(8.0, "pt").unwrap()),
            ..Default::default()
        };
        let serializer = CssStylesheetSerializer::new();
        let css = serializer.serialize(&sheet).unwrap();
        assert_eq!(css, "body {\n    font-size: 12pt;\n    margin-bottom: 8pt\n}");
    }

    #[test]
    fn test_page_rule_respects_preference() {
        let mut sheet = Stylesheet::new();
        sheet.page = Some(letter_page());
        let off = CssStylesheetSerializer::with_preferences(SerializerPreferences {
            include_page_rule: false,
            ..Default::default()
        });
        assert!(!off.serialize(&sheet).unwrap().contains("@page"));
        let on = CssStylesheetSerializer::new();
        assert!(on.serialize(&sheet).unwrap().contains("@page"));
    }

    #[test]
    fn test_root_counters_only_by_default() {
        use cascadoc_model::CounterList;
        let mut sheet = Stylesheet::new();
        let root = Counter {
            name: "claims-L0".to_string(),
            style: "decimal".to_string(),
            start: 1,
            restart: vec!["claims-L1".to_string()],
            ..Default::default()
        };
        let child = Counter {
            name: "claims-L1".to_string(),
            style: "decimal".to_string(),
            start: 5,
            ..Default::default()
        };
        sheet.counter_lists.push(CounterList {
            id: 1,
            name: "claims".to_string(),
            counters: vec![root.clone(), child.clone()],
        });
        sheet.add_paragraph_style(ParagraphStyle {
            id: "ClaimHead".to_string(),
            name: "Claim Head".to_string(),
            counter: Some(root),
            ..Default::default()
        });
        sheet.add_paragraph_style(ParagraphStyle {
            id: "ClaimItem".to_string(),
            name: "Claim Item".to_string(),
            counter: Some(child),
            ..Default::default()
        });

        let default = CssStylesheetSerializer::new();
        assert_eq!(default.body_counter_resets(&sheet), vec!["claims-L0"]);

        let all = CssStylesheetSerializer::with_preferences(SerializerPreferences {
            initialize_counters_in_body: true,
            ..Default::default()
        });
        assert_eq!(
            all.body_counter_resets(&sheet),
            vec!["claims-L0", "claims-L1 4"]
        );
    }
}
