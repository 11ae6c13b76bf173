//! Archive handling for DOCX files
//!
//! A DOCX file is a ZIP archive of XML parts. Parts are located
//! through the `[Content_Types].xml` manifest rather than by path.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::read::ZipArchive;

use crate::error::{OoxmlError, Result};
use crate::xml::XmlEl;

/// Main document part content type
pub const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
/// Font table part content type
pub const CT_FONTS: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.fontTable+xml";
/// Numbering definitions part content type
pub const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
/// Style definitions part content type
pub const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
/// Theme part content type
pub const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";

/// An unpacked DOCX package
#[derive(Debug)]
pub struct DocxArchive {
    /// All files in the archive, keyed by path
    files: HashMap<String, Vec<u8>>,
    /// Part path per content type, from `[Content_Types].xml`
    parts: HashMap<String, String>,
}

impl DocxArchive {
    /// Open and unpack a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        let mut result = Self {
            files,
            parts: HashMap::new(),
        };
        result.read_content_types()?;
        Ok(result)
    }

    fn read_content_types(&mut self) -> Result<()> {
        let manifest = self
            .files
            .get("[Content_Types].xml")
            .ok_or_else(|| OoxmlError::MissingPart("[Content_Types].xml".to_string()))?;
        let root = XmlEl::parse(manifest)?;
        for entry in root.find_all("Override") {
            if let (Some(content_type), Some(part_name)) =
                (entry.attr("ContentType"), entry.attr("PartName"))
            {
                let location = part_name.trim_start_matches('/').to_string();
                self.parts.insert(content_type.to_string(), location);
            }
        }
        Ok(())
    }

    /// Get a part's contents by content type
    pub fn part(&self, content_type: &str) -> Option<&[u8]> {
        self.parts
            .get(content_type)
            .and_then(|location| self.files.get(location))
            .map(|v| v.as_slice())
    }

    /// Get a part's parsed root element by content type
    pub fn part_xml(&self, content_type: &str) -> Result<Option<XmlEl>> {
        match self.part(content_type) {
            Some(bytes) => Ok(Some(XmlEl::parse(bytes)?)),
            None => Ok(None),
        }
    }

    /// The style definitions part. Without one there is nothing to
    /// convert, so its absence is an error.
    pub fn styles_xml(&self) -> Result<XmlEl> {
        match self.part_xml(CT_STYLES)? {
            Some(root) => Ok(root),
            None => Err(OoxmlError::MissingPart("styles".to_string())),
        }
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Check if a file exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// List all files in the archive
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_str())
    }
}
