//! # cascadoc-model
//!
//! Data model shared by the cascadoc crates: CSS value primitives
//! (lengths, colors, borders), formatting property bags, the style
//! forest and the counter model for Word multilevel numbering.
//!
//! The model is deliberately inert: parsing lives in
//! `cascadoc-ooxml`, CSS generation in `cascadoc-css`.

pub mod border;
pub mod color;
pub mod counter;
pub mod error;
pub mod properties;
pub mod styles;
pub mod unit;

pub use border::{Border, BorderStyle, TextDecoration};
pub use color::CssColor;
pub use counter::{Counter, CounterList, CounterSegment, LevelSuffix};
pub use error::ModelError;
pub use properties::{
    HeightRule, LineHeight, ParagraphFormatting, Property, RowHeight, TableCellProperties,
    TableConditionalFormatting, TableProperties, TableRowProperties, TextFormatting, Value,
};
pub use styles::{
    heading_level, BodyStyle, PageStyle, ParagraphStyle, SpanStyle, StyleKind, StyleMap,
    Stylesheet, TableStyle,
};
pub use unit::{fmt_number, CssUnit, Measure, Percentage, Unit};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
