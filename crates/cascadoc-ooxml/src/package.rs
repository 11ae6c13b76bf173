//! Top-level package reader: opens a docx archive and assembles the
//! full [`Stylesheet`] from its parts.

use std::io::{Read, Seek};
use std::path::Path;

use cascadoc_model::Stylesheet;
use log::debug;

use crate::archive::{DocxArchive, CT_DOCUMENT, CT_FONTS, CT_NUMBERING, CT_THEME};
use crate::error::Result;
use crate::fonts::FontTable;
use crate::numbering::Numbering;
use crate::sections::parse_page_style;
use crate::styles::parse_styles;
use crate::theme::Theme;
use crate::xml::XmlEl;

/// A parsed docx package. Only the style-bearing parts are read; the
/// document body is consulted solely for page geometry.
#[derive(Debug, Clone)]
pub struct DocxPackage {
    pub theme: Theme,
    pub fonts: FontTable,
    pub stylesheet: Stylesheet,
}

impl DocxPackage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_archive(DocxArchive::open(path)?)
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_archive(DocxArchive::from_reader(reader)?)
    }

    fn from_archive(archive: DocxArchive) -> Result<Self> {
        let theme = match archive.part_xml(CT_THEME)? {
            Some(root) => Theme::parse(&root),
            None => Theme::default(),
        };
        let fonts = match archive.part_xml(CT_FONTS)? {
            Some(root) => FontTable::parse(&root),
            None => FontTable::default(),
        };
        let styles_root = archive.styles_xml()?;

        let mut stylesheet = Stylesheet::new();
        if let Some(document) = archive.part_xml(CT_DOCUMENT)? {
            stylesheet.page = parse_page_style(&document);
        }

        let numbering = match archive.part_xml(CT_NUMBERING)? {
            Some(root) => Numbering::parse(&root, Some(&styles_root), &theme, &fonts)?,
            None => Numbering::default(),
        };
        stylesheet.counter_lists = numbering.counter_lists.clone();

        parse_styles(&styles_root, &theme, &fonts, &numbering, &mut stylesheet)?;
        debug!(
            "parsed package: {} span, {} paragraph, {} table styles, {} counter lists",
            stylesheet.span_styles.len(),
            stylesheet.paragraph_styles.len(),
            stylesheet.table_styles.len(),
            stylesheet.counter_lists.len()
        );

        Ok(DocxPackage {
            theme,
            fonts,
            stylesheet,
        })
    }
}
