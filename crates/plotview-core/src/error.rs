//! Error types for view lookup, view construction and configuration.

use thiserror::Error;

/// Errors raised by the view query surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A `get_one*` lookup matched no view. Carries a description of what was looked up.
    #[error("cannot find a view for {0}")]
    NotFound(String),
}

/// Result type for view queries.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised while constructing views.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No constructor is registered for the model's type.
    #[error("no view is registered for {0}")]
    UnknownModel(String),
    /// A constructor rejected the model.
    #[error("failed to build a view for {model}: {reason}")]
    Failed { model: String, reason: String },
}

/// Result type for view construction.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
