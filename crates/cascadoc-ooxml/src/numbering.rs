//! `numbering.xml` parsing: abstract numbering definitions and their
//! instances become [`CounterList`]s, one CSS counter per level.

use std::collections::HashMap;

use cascadoc_model::{Counter, CounterList, CounterSegment, LevelSuffix};

use crate::error::Result;
use crate::fonts::FontTable;
use crate::properties::{
    parse_paragraph_properties, parse_run_properties, st_jc, st_number_format,
};
use crate::theme::Theme;
use crate::xml::XmlEl;

/// Parsed numbering part: counter lists per instance id plus counters
/// attached to paragraph styles through `w:lvl/w:pStyle`.
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    pub counter_lists: Vec<CounterList>,
    pub style_counters: HashMap<String, Counter>,
}

impl Numbering {
    /// Parse a `w:numbering` root. The styles root is consulted to
    /// resolve `w:numStyleLink` indirection through numbering styles.
    pub fn parse(
        root: &XmlEl,
        styles_root: Option<&XmlEl>,
        theme: &Theme,
        fonts: &FontTable,
    ) -> Result<Numbering> {
        let mut abstracts: HashMap<i64, AbstractDefinition> = HashMap::new();
        for el in root.find_all("abstractNum") {
            if let Some(id) = el.attr("abstractNumId").and_then(|v| v.parse().ok()) {
                abstracts.insert(id, AbstractDefinition::parse(id, el, theme, fonts)?);
            }
        }

        // Instance id to abstract id, in document order
        let instances: Vec<(i64, i64)> = root
            .find_all("num")
            .filter_map(|el| {
                let num_id = el.attr("numId")?.parse().ok()?;
                let abstract_id = el.find("abstractNumId")?.val()?.parse().ok()?;
                Some((num_id, abstract_id))
            })
            .collect();

        let mut numbering = Numbering::default();
        for (num_id, abstract_id) in &instances {
            let Some(definition) = abstracts.get(abstract_id) else {
                log::debug!("num {} references missing abstractNum {}", num_id, abstract_id);
                continue;
            };
            let definition = match &definition.num_style_link {
                Some(style_id) => {
                    match resolve_style_link(style_id, styles_root, &instances, &abstracts) {
                        Some(linked) => linked,
                        None => {
                            log::debug!("unresolved numStyleLink {:?} for num {}", style_id, num_id);
                            continue;
                        }
                    }
                }
                None => definition,
            };
            numbering.counter_lists.push(CounterList {
                id: *num_id,
                name: definition.name.clone(),
                counters: definition.counters.clone(),
            });
        }
        for definition in abstracts.values() {
            for (style_id, level) in &definition.style_links {
                if let Some(counter) = definition.counters.get(*level) {
                    numbering
                        .style_counters
                        .insert(style_id.clone(), counter.clone());
                }
            }
        }
        Ok(numbering)
    }

    /// Counter for a direct `w:numPr` reference
    pub fn counter(&self, num_id: i64, level: usize) -> Option<&Counter> {
        self.counter_lists
            .iter()
            .find(|list| list.id == num_id)
            .and_then(|list| list.level(level))
    }
}

/// Follow `w:numStyleLink`: the named numbering style carries a
/// `w:numPr` whose instance points at the real abstract definition.
fn resolve_style_link<'a>(
    style_id: &str,
    styles_root: Option<&XmlEl>,
    instances: &[(i64, i64)],
    abstracts: &'a HashMap<i64, AbstractDefinition>,
) -> Option<&'a AbstractDefinition> {
    let styles = styles_root?;
    let style = styles
        .find_all("style")
        .find(|el| el.attr("styleId") == Some(style_id))?;
    let num_id: i64 = style
        .find("pPr")?
        .find("numPr")?
        .find("numId")?
        .val()?
        .parse()
        .ok()?;
    let (_, abstract_id) = instances.iter().find(|(id, _)| *id == num_id)?;
    abstracts.get(abstract_id)
}

#[derive(Debug, Clone, Default)]
struct AbstractDefinition {
    name: String,
    counters: Vec<Counter>,
    /// `w:lvl/w:pStyle` attachments: style id and level index
    style_links: Vec<(String, usize)>,
    num_style_link: Option<String>,
}

impl AbstractDefinition {
    fn parse(id: i64, el: &XmlEl, theme: &Theme, fonts: &FontTable) -> Result<Self> {
        let name = el
            .find("name")
            .and_then(XmlEl::val)
            .or_else(|| el.find("styleLink").and_then(XmlEl::val))
            .map(|n| n.split_whitespace().collect::<String>())
            .unwrap_or_else(|| format!("counter{}", id));

        let mut definition = AbstractDefinition {
            name: name.clone(),
            num_style_link: el.find("numStyleLink").and_then(XmlEl::val).map(String::from),
            ..Default::default()
        };

        let mut restarts: Vec<Option<i64>> = Vec::new();
        for lvl in el.find_all("lvl") {
            let level = definition.counters.len();
            if let Some(style_id) = lvl.find("pStyle").and_then(XmlEl::val) {
                definition.style_links.push((style_id.to_string(), level));
            }
            restarts.push(
                lvl.find("lvlRestart")
                    .and_then(XmlEl::val)
                    .and_then(|v| v.parse().ok()),
            );
            definition
                .counters
                .push(parse_level(lvl, &name, level, theme, fonts)?);
        }

        // Wire counter-reset entries onto the level whose increment
        // restarts each deeper level. lvlRestart 0 means never restart;
        // absent means the immediately shallower level.
        for (level, restart) in restarts.iter().enumerate() {
            let trigger = match restart {
                Some(0) => None,
                Some(v) => usize::try_from(v - 1).ok(),
                None => level.checked_sub(1),
            };
            let Some(trigger) = trigger else {
                continue;
            };
            if trigger == level {
                continue;
            }
            let entry = definition.counters[level].reset_entry();
            if let Some(counter) = definition.counters.get_mut(trigger) {
                counter.restart.push(entry);
            }
        }

        let sibling_styles: HashMap<String, String> = definition
            .counters
            .iter()
            .map(|c| (c.name.clone(), c.style.clone()))
            .collect();
        for counter in &mut definition.counters {
            counter.sibling_styles = sibling_styles.clone();
        }
        Ok(definition)
    }
}

fn parse_level(
    lvl: &XmlEl,
    definition_name: &str,
    level: usize,
    theme: &Theme,
    fonts: &FontTable,
) -> Result<Counter> {
    let mut counter = Counter {
        name: format!("{}-L{}", definition_name, level),
        style: lvl
            .find("numFmt")
            .and_then(XmlEl::val)
            .map(st_number_format)
            .unwrap_or("decimal")
            .to_string(),
        start: lvl
            .find("start")
            .and_then(XmlEl::val)
            .and_then(|v| v.parse().ok())
            .unwrap_or(1),
        justification: Some(
            lvl.find("lvlJc")
                .and_then(XmlEl::val)
                .and_then(st_jc)
                .unwrap_or("start")
                .to_string(),
        ),
        ..Default::default()
    };
    // isLgl forces arabic numbering regardless of numFmt
    if lvl.find("isLgl").map(crate::properties::toggle).unwrap_or(false) {
        counter.style = "decimal".to_string();
    }
    if let Some(template) = lvl.find("lvlText").and_then(XmlEl::val) {
        counter.text = parse_level_text(template, definition_name);
    }
    counter.suffix = match lvl.find("suff").and_then(XmlEl::val) {
        Some("space") => LevelSuffix::Space,
        Some("nothing") => LevelSuffix::Nothing,
        _ => LevelSuffix::Tab,
    };
    if let Some(rpr) = lvl.find("rPr") {
        counter.text_formatting = parse_run_properties(rpr, theme, fonts)?;
    }
    if let Some(ppr) = lvl.find("pPr") {
        counter.paragraph_formatting = parse_paragraph_properties(ppr, theme)?;
    }
    Ok(counter)
}

/// Split a `w:lvlText` template into literal and `%N` reference
/// segments. `%N` refers to level N-1 of the same definition.
fn parse_level_text(template: &str, definition_name: &str) -> Vec<CounterSegment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some(digit) = chars.peek().and_then(|d| d.to_digit(10)) {
                chars.next();
                if !literal.is_empty() {
                    segments.push(CounterSegment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(CounterSegment::Reference(format!(
                    "{}-L{}",
                    definition_name,
                    digit.saturating_sub(1)
                )));
                continue;
            }
        }
        literal.push(c);
    }
    if !literal.is_empty() {
        segments.push(CounterSegment::Literal(literal));
    }
    segments
}
