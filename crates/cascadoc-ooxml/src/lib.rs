//! OOXML (docx) package reader for cascadoc.
//!
//! Opens a Word document archive, parses the style-bearing parts
//! (`styles.xml`, `numbering.xml`, theme and font table) and produces
//! the [`Stylesheet`] model the CSS engine serializes.

pub mod archive;
pub mod error;
pub mod fonts;
pub mod numbering;
pub mod package;
pub mod properties;
pub mod sections;
pub mod styles;
pub mod theme;
pub mod xml;

pub use archive::{DocxArchive, CT_DOCUMENT, CT_FONTS, CT_NUMBERING, CT_STYLES, CT_THEME};
pub use error::{OoxmlError, Result};
pub use fonts::{Font, FontTable};
pub use numbering::Numbering;
pub use package::DocxPackage;
pub use theme::Theme;
pub use xml::XmlEl;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
