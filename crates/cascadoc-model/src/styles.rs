//! Style forest and stylesheet.
//!
//! Styles form a forest per kind: `parent_id`/`children` hold style
//! ids resolved through the owning [`Stylesheet`], never direct
//! references. The root paragraph style (Word's `Normal`) and the root
//! table style (`TableNormal`) are normalized to the empty id.

use std::collections::HashMap;

use serde::Serialize;

use crate::counter::{Counter, CounterList};
use crate::properties::{ParagraphFormatting, TableProperties, TextFormatting};
use crate::unit::CssUnit;

/// Style kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StyleKind {
    Span,
    Paragraph,
    Table,
}

/// A character style (`w:style w:type="character"`)
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpanStyle {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub children: Vec<String>,
    pub text: TextFormatting,
}

/// A paragraph style
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParagraphStyle {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub children: Vec<String>,
    pub text: TextFormatting,
    pub paragraph: ParagraphFormatting,
    /// Counter attached through numbering (directly or via `pStyle`)
    pub counter: Option<Counter>,
}

impl ParagraphStyle {
    /// Heading level when the style name normalizes to `heading1..6`
    pub fn heading_level(&self) -> Option<u8> {
        heading_level(&self.name)
    }
}

/// A table style
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableStyle {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub children: Vec<String>,
    pub text: TextFormatting,
    pub paragraph: ParagraphFormatting,
    pub table: TableProperties,
}

/// Document defaults (`w:docDefaults`), serialized to the `body` rule
#[derive(Debug, Clone, Default, Serialize)]
pub struct BodyStyle {
    pub text: TextFormatting,
    pub paragraph: ParagraphFormatting,
}

/// Page geometry from the last section of the document
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageStyle {
    pub page_width: CssUnit,
    pub page_height: CssUnit,
    pub margin_top: CssUnit,
    pub margin_right: CssUnit,
    pub margin_bottom: CssUnit,
    pub margin_left: CssUnit,
}

/// Lookup into a [`StyleMap`]
pub trait HasId {
    fn id(&self) -> &str;
    fn children_mut(&mut self) -> &mut Vec<String>;
}

macro_rules! impl_has_id {
    ($ty:ty) => {
        impl HasId for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn children_mut(&mut self) -> &mut Vec<String> {
                &mut self.children
            }
        }
    };
}

impl_has_id!(SpanStyle);
impl_has_id!(ParagraphStyle);
impl_has_id!(TableStyle);

/// Insertion-ordered style collection with id lookup
#[derive(Debug, Clone, Serialize)]
pub struct StyleMap<T> {
    entries: Vec<T>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl<T> Default for StyleMap<T> {
    fn default() -> Self {
        StyleMap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: HasId> StyleMap<T> {
    pub fn insert(&mut self, style: T) {
        match self.index.get(style.id()) {
            Some(&i) => self.entries[i] = style,
            None => {
                self.index.insert(style.id().to_string(), self.entries.len());
                self.entries.push(style);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.index.get(id).map(|&i| &mut self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything cascadoc knows about one document's styles
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stylesheet {
    pub span_styles: StyleMap<SpanStyle>,
    pub paragraph_styles: StyleMap<ParagraphStyle>,
    pub table_styles: StyleMap<TableStyle>,
    pub body: BodyStyle,
    pub page: Option<PageStyle>,
    pub counter_lists: Vec<CounterList>,
    /// Document order across kinds, for output ordering
    order: Vec<(StyleKind, String)>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_span_style(&mut self, style: SpanStyle) {
        self.push_order(StyleKind::Span, &style.id);
        self.span_styles.insert(style);
    }

    pub fn add_paragraph_style(&mut self, style: ParagraphStyle) {
        self.push_order(StyleKind::Paragraph, &style.id);
        self.paragraph_styles.insert(style);
    }

    pub fn add_table_style(&mut self, style: TableStyle) {
        self.push_order(StyleKind::Table, &style.id);
        self.table_styles.insert(style);
    }

    fn push_order(&mut self, kind: StyleKind, id: &str) {
        if !self.order.iter().any(|(k, i)| *k == kind && i == id) {
            self.order.push((kind, id.to_string()));
        }
    }

    /// Styles in document order
    pub fn order(&self) -> &[(StyleKind, String)] {
        &self.order
    }

    /// Resolve parent links into children lists. Idempotent; called
    /// once all styles are inserted.
    pub fn link_children(&mut self) {
        link_kind(&mut self.span_styles, |s| s.parent_id.clone(), |s| s.id.clone());
        link_kind(
            &mut self.paragraph_styles,
            |s| s.parent_id.clone(),
            |s| s.id.clone(),
        );
        link_kind(&mut self.table_styles, |s| s.parent_id.clone(), |s| s.id.clone());
    }

    /// Counters attached to paragraph styles, in document order
    pub fn attached_counters(&self) -> Vec<&Counter> {
        self.paragraph_styles
            .iter()
            .filter_map(|s| s.counter.as_ref())
            .collect()
    }
}

fn link_kind<T: HasId>(
    map: &mut StyleMap<T>,
    parent_of: impl Fn(&T) -> Option<String>,
    id_of: impl Fn(&T) -> String,
) {
    let links: Vec<(String, String)> = map
        .iter()
        .filter_map(|s| parent_of(s).map(|p| (p, id_of(s))))
        .collect();
    for (parent, child) in links {
        if let Some(parent_style) = map.get_mut(&parent) {
            let children = parent_style.children_mut();
            if !children.contains(&child) {
                children.push(child);
            }
        }
    }
}

/// `Heading 3` / `heading3` -> 3
pub fn heading_level(name: &str) -> Option<u8> {
    let normalized: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let digit = normalized.strip_prefix("heading")?;
    match digit.parse::<u8>() {
        Ok(n) if (1..=6).contains(&n) => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_normalization() {
        assert_eq!(heading_level("Heading 1"), Some(1));
        assert_eq!(heading_level("heading6"), Some(6));
        assert_eq!(heading_level("Heading 7"), None);
        assert_eq!(heading_level("Headline"), None);
        assert_eq!(heading_level("Normal"), None);
    }

    #[test]
    fn test_style_map_keeps_insertion_order() {
        let mut map = StyleMap::default();
        for id in ["b", "a", "c"] {
            map.insert(SpanStyle {
                id: id.to_string(),
                ..Default::default()
            });
        }
        let ids: Vec<&str> = map.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(map.contains("a"));
    }

    #[test]
    fn test_link_children() {
        let mut sheet = Stylesheet::new();
        sheet.add_paragraph_style(ParagraphStyle {
            id: String::new(),
            name: "Normal".to_string(),
            ..Default::default()
        });
        sheet.add_paragraph_style(ParagraphStyle {
            id: "Heading1".to_string(),
            name: "Heading 1".to_string(),
            parent_id: Some(String::new()),
            ..Default::default()
        });
        sheet.link_children();

        let root = sheet.paragraph_styles.get("").unwrap();
        assert_eq!(root.children, vec!["Heading1".to_string()]);
    }

    #[test]
    fn test_document_order_spans_kinds() {
        let mut sheet = Stylesheet::new();
        sheet.add_paragraph_style(ParagraphStyle {
            id: "P1".to_string(),
            ..Default::default()
        });
        sheet.add_span_style(SpanStyle {
            id: "S1".to_string(),
            ..Default::default()
        });
        let order = sheet.order();
        assert_eq!(order[0], (StyleKind::Paragraph, "P1".to_string()));
        assert_eq!(order[1], (StyleKind::Span, "S1".to_string()));
    }
}
