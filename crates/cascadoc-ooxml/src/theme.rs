//! Theme part: color scheme and font scheme (word/theme/theme1.xml)

use std::collections::HashMap;

use crate::xml::XmlEl;

/// Parsed theme colors and fonts. A theme is optional in the package;
/// an empty default resolves nothing.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Hex colors keyed by scheme slot name (`dk1`, `accent1`, ...)
    colors: HashMap<String, String>,
    /// Font names keyed by theme font slot (`majorAscii`, ...)
    fonts: HashMap<String, String>,
}

impl Theme {
    pub fn parse(root: &XmlEl) -> Self {
        let mut theme = Theme::default();
        if let Some(scheme) = root.find_deep("clrScheme") {
            for slot in &scheme.children {
                let value = slot
                    .find("srgbClr")
                    .and_then(|c| c.val())
                    .or_else(|| slot.find("sysClr").and_then(|c| c.attr("lastClr")));
                if let Some(hex) = value {
                    theme.colors.insert(slot.name.clone(), hex.to_string());
                }
            }
        }
        if let Some(scheme) = root.find_deep("fontScheme") {
            for main_type in ["major", "minor"] {
                let Some(el) = scheme.find(&format!("{}Font", main_type)) else {
                    continue;
                };
                let latin = el.find("latin").and_then(|f| f.attr("typeface"));
                let ea = el.find("ea").and_then(|f| f.attr("typeface"));
                let cs = el.find("cs").and_then(|f| f.attr("typeface"));
                let slots = [
                    ("Ascii", latin),
                    ("HAnsi", latin),
                    ("EastAsia", ea),
                    ("Bidi", cs),
                ];
                for (suffix, font) in slots {
                    if let Some(name) = font.filter(|n| !n.is_empty()) {
                        theme
                            .fonts
                            .insert(format!("{}{}", main_type, suffix), name.to_string());
                    }
                }
            }
        }
        theme
    }

    /// Hex color for a `themeColor` attribute value. WordprocessingML
    /// uses alias names (`dark1`, `text1`) for the scheme slots.
    pub fn color(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "dark1" | "text1" => "dk1",
            "light1" | "background1" => "lt1",
            "dark2" | "text2" => "dk2",
            "light2" | "background2" => "lt2",
            "hyperlink" => "hlink",
            "followedHyperlink" => "folHlink",
            other => other,
        };
        self.colors.get(slot).map(|s| s.as_str())
    }

    /// Font for a theme font slot (`minorHAnsi`, `majorBidi`, ...)
    pub fn font(&self, slot: &str) -> Option<&str> {
        self.fonts.get(slot).map(|s| s.as_str())
    }
}
