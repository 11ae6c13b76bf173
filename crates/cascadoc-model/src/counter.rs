//! CSS counter model for Word multilevel numbering.
//!
//! Each abstract numbering level becomes one [`Counter`] named
//! `{definition-name}-L{level}`. The level text template is stored as
//! segments so the CSS engine can emit `counter(...)` references
//! without re-parsing `%N` placeholders.

use std::collections::HashMap;

use serde::Serialize;

use crate::properties::{ParagraphFormatting, TextFormatting};

/// What follows the number in Word (`w:suff`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LevelSuffix {
    #[default]
    Tab,
    Space,
    Nothing,
}

/// One piece of a level text template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CounterSegment {
    /// Literal text, quoted in the CSS `content` value
    Literal(String),
    /// A reference to a counter of the same list, by counter name
    Reference(String),
}

/// One numbering level as a CSS counter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Counter {
    /// `{definition-name}-L{level}`
    pub name: String,
    /// CSS counter style (`decimal`, `upper-roman`, ...); empty for bullets
    pub style: String,
    pub start: i32,
    pub text: Vec<CounterSegment>,
    pub suffix: LevelSuffix,
    pub justification: Option<String>,
    /// Counter-reset entries fired when this counter increments.
    /// Each entry is `name` or `name {start-1}` for a non-1 start.
    pub restart: Vec<String>,
    pub text_formatting: TextFormatting,
    pub paragraph_formatting: ParagraphFormatting,
    /// Counter style per sibling name, for `counter(ref, style)` content
    pub sibling_styles: HashMap<String, String>,
}

impl Counter {
    /// Bullet levels carry no counter style
    pub fn is_bullet(&self) -> bool {
        self.style.is_empty()
    }

    /// Style of a referenced sibling counter, `decimal` when unknown
    pub fn style_of(&self, name: &str) -> &str {
        if name == self.name {
            return &self.style;
        }
        self.sibling_styles
            .get(name)
            .map(|s| s.as_str())
            .unwrap_or("decimal")
    }

    /// The body/paragraph `counter-reset` entry for this counter
    pub fn reset_entry(&self) -> String {
        if self.start == 1 {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.start - 1)
        }
    }
}

/// All counters produced by one numbering definition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CounterList {
    /// Numbering instance id (`w:num`)
    pub id: i64,
    /// Definition name with whitespace removed
    pub name: String,
    pub counters: Vec<Counter>,
}

impl CounterList {
    pub fn get(&self, name: &str) -> Option<&Counter> {
        self.counters.iter().find(|c| c.name == name)
    }

    pub fn level(&self, level: usize) -> Option<&Counter> {
        self.counters.get(level)
    }
}
