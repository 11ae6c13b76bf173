//! Error types for CSS generation

use thiserror::Error;

/// Errors raised while serializing a stylesheet
#[derive(Debug, Error)]
pub enum CssError {
    /// A property reached the registry with no serializer registered
    /// for its name. Unknown properties are a bug, not something to
    /// drop silently.
    #[error("no serializer registered for property '{0}'")]
    NoSerializer(String),

    /// A style id referenced during selector synthesis does not exist
    #[error("style not found: {0}")]
    StyleNotFound(String),

    #[error(transparent)]
    Model(#[from] cascadoc_model::ModelError),
}

/// Result alias for CSS operations
pub type Result<T> = std::result::Result<T, CssError>;
