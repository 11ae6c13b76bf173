//! cascadoc CLI library.
//!
//! Provides the `cascadoc` command-line interface:
//! - Convert: extract a DOCX file's styles as a CSS stylesheet
//! - DumpStyles: dump the parsed style model as JSON
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert docx styles to CSS
//! cascadoc convert document.docx --output styles.css
//!
//! # Inspect the parsed style model
//! cascadoc dump-styles document.docx
//! ```

pub mod app;

pub use app::{convert_command, dump_styles_command, run_cli};
