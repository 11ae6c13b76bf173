//! # cascadoc-css
//!
//! CSS generation for the cascadoc style model: a property serializer
//! registry, selector synthesis over the style forest, table banding
//! and conditional formatting, counter rules and the whole-stylesheet
//! driver with its page rules.

pub mod border;
pub mod context;
pub mod counter;
pub mod declarations;
pub mod error;
pub mod paragraph;
pub mod registry;
pub mod stylesheet;
pub mod table;
pub mod text;

pub use context::{BorderTargets, SelectorParts, StyleContext};
pub use declarations::{rule_text, CssDeclarationBlock, CssRuleSet};
pub use error::CssError;
pub use registry::{SerializerFn, SerializerRegistry};
pub use stylesheet::{CssStylesheetSerializer, SerializerPreferences};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
