//! Error types for the model crate

use thiserror::Error;

/// Errors raised when constructing model values
#[derive(Debug, Error)]
pub enum ModelError {
    /// A length was given with a unit the model does not know
    #[error("unknown measurement unit '{0}'")]
    UnknownUnit(String),

    /// A color string could not be parsed as 6-digit hex
    #[error("invalid color value '{0}'")]
    InvalidColor(String),
}

/// Result alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
