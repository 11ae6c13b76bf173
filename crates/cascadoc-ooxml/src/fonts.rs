//! Font table part (word/fontTable.xml)

use std::collections::HashMap;

use crate::xml::XmlEl;

/// One font declaration
#[derive(Debug, Clone, Default)]
pub struct Font {
    pub name: String,
    pub alt_name: Option<String>,
    /// Word font family (`roman`, `swiss`, ...)
    pub family: Option<String>,
}

impl Font {
    /// Generic CSS family for the Word family classification
    pub fn generic_family(&self) -> Option<&'static str> {
        match self.family.as_deref() {
            Some("decorative") => Some("fantasy"),
            Some("modern") => Some("monospace"),
            Some("roman") => Some("serif"),
            Some("script") => Some("cursive"),
            Some("swiss") => Some("sans-serif"),
            _ => None,
        }
    }

    /// Font names usable in a `font-family` list: the name, the
    /// alternate name and the generic family, in that order.
    pub fn css_family(&self) -> Vec<String> {
        let mut names = vec![self.name.clone()];
        if let Some(alt) = &self.alt_name {
            names.push(alt.clone());
        }
        if let Some(generic) = self.generic_family() {
            names.push(generic.to_string());
        }
        names
    }
}

/// All fonts of the package, keyed by name
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    fonts: HashMap<String, Font>,
}

impl FontTable {
    pub fn parse(root: &XmlEl) -> Self {
        let mut table = FontTable::default();
        for el in root.find_all("font") {
            let Some(name) = el.attr("name") else {
                continue;
            };
            let font = Font {
                name: name.to_string(),
                alt_name: el.child_val("altName").map(String::from),
                family: el.child_val("family").map(String::from),
            };
            table.fonts.insert(font.name.clone(), font);
        }
        table
    }

    pub fn get(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_css_family() {
        let xml = br#"<w:fonts xmlns:w="x">
            <w:font w:name="Symbol">
                <w:altName w:val="Symbol Std"/>
                <w:family w:val="decorative"/>
            </w:font>
            <w:font w:name="Calibri"><w:family w:val="swiss"/></w:font>
        </w:fonts>"#;
        let table = FontTable::parse(&XmlEl::parse(xml).unwrap());
        let symbol = table.get("Symbol").unwrap();
        assert_eq!(
            symbol.css_family(),
            vec!["Symbol", "Symbol Std", "fantasy"]
        );
        assert_eq!(table.get("Calibri").unwrap().generic_family(), Some("sans-serif"));
        assert!(table.get("Papyrus").is_none());
    }
}
