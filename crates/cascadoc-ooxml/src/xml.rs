//! Lightweight XML tree over quick-xml events.
//!
//! WordprocessingML parts are small and read once, so the whole part
//! is materialized into an [`XmlEl`] tree. Element and attribute names
//! are matched by local name, ignoring namespace prefixes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// One XML element with its attributes and child elements
#[derive(Debug, Clone, Default)]
pub struct XmlEl {
    /// Local element name without prefix
    pub name: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<XmlEl>,
}

impl XmlEl {
    /// Parse the root element of an XML part
    pub fn parse(xml: &[u8]) -> Result<XmlEl> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<XmlEl> = Vec::new();
        let mut root: Option<XmlEl> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => stack.push(element_from(e)?),
                Ok(Event::Empty(ref e)) => {
                    let el = element_from(e)?;
                    attach(&mut stack, &mut root, el);
                }
                Ok(Event::End(_)) => {
                    if let Some(el) = stack.pop() {
                        attach(&mut stack, &mut root, el);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(e.into()),
            }
            buf.clear();
        }

        root.ok_or_else(|| OoxmlError::InvalidStructure("part has no root element".to_string()))
    }

    /// First direct child with the given local name
    pub fn find(&self, name: &str) -> Option<&XmlEl> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlEl> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First descendant with the given local name, depth first
    pub fn find_deep(&self, name: &str) -> Option<&XmlEl> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_deep(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given local name, document order
    pub fn find_all_deep<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlEl>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.find_all_deep(name, out);
        }
    }

    /// Attribute value by local name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The ubiquitous `w:val` attribute
    pub fn val(&self) -> Option<&str> {
        self.attr("val")
    }

    /// `w:val` of a direct child element
    pub fn child_val(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(|c| c.val())
    }
}

fn element_from(e: &BytesStart) -> Result<XmlEl> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }
    Ok(XmlEl {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn attach(stack: &mut Vec<XmlEl>, root: &mut Option<XmlEl>, el: XmlEl) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}
