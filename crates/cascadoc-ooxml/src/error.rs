//! Error types for DOCX parsing

use thiserror::Error;

/// Errors that can occur while reading a DOCX package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error reading XML attributes
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Required part not found in the package
    #[error("Required part not found: {0}")]
    MissingPart(String),

    /// Measure with an unusable unit type
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// Invalid part structure
    #[error("Invalid part structure: {0}")]
    InvalidStructure(String),

    /// Invalid model value (color, length)
    #[error(transparent)]
    Model(#[from] cascadoc_model::ModelError),
}

/// Result type for DOCX parsing
pub type Result<T> = std::result::Result<T, OoxmlError>;
