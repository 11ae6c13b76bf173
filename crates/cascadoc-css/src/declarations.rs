//! Declaration blocks and rule sets.
//!
//! Both structures preserve insertion order: the output convention
//! puts one declaration per line, a semicolon after every declaration
//! except the last, and the closing brace unindented.

use std::collections::HashMap;

/// An ordered list of CSS declarations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssDeclarationBlock {
    decls: Vec<(String, String)>,
}

impl CssDeclarationBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a declaration. An existing declaration keeps its position
    /// and gets the new value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.decls.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.decls.push((name, value)),
        }
    }

    /// Set a declaration and move it to the front of the block
    pub fn insert_front(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.decls.retain(|(n, _)| *n != name);
        self.decls.insert(0, (name, value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Render one rule at the given indent level
pub fn rule_text(selector: &str, block: &CssDeclarationBlock, level: usize) -> String {
    let pad = "    ".repeat(level);
    let inner = "    ".repeat(level + 1);
    let decls: Vec<String> = block
        .iter()
        .map(|(name, value)| format!("{}{}: {}", inner, name, value))
        .collect();
    format!("{}{} {{\n{}\n{}}}", pad, selector, decls.join(";\n"), pad)
}

/// An ordered selector -> declaration block map
#[derive(Debug, Clone, Default)]
pub struct CssRuleSet {
    rules: Vec<(String, CssDeclarationBlock)>,
    index: HashMap<String, usize>,
}

impl CssRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, selector: &str) -> &mut CssDeclarationBlock {
        let i = match self.index.get(selector) {
            Some(&i) => i,
            None => {
                self.index.insert(selector.to_string(), self.rules.len());
                self.rules
                    .push((selector.to_string(), CssDeclarationBlock::new()));
                self.rules.len() - 1
            }
        };
        &mut self.rules[i].1
    }

    pub fn get(&self, selector: &str) -> Option<&CssDeclarationBlock> {
        self.index.get(selector).map(|&i| &self.rules[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CssDeclarationBlock)> {
        self.rules.iter().map(|(s, b)| (s.as_str(), b))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(|(_, b)| b.is_empty())
    }

    /// Render all non-empty rules, one per line group
    pub fn css_text(&self, level: usize) -> String {
        let rules: Vec<String> = self
            .rules
            .iter()
            .filter(|(_, block)| !block.is_empty())
            .map(|(selector, block)| rule_text(selector, block, level))
            .collect();
        rules.join("\n")
    }
}
