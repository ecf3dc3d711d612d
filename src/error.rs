//! Error types for the terracolor pipeline.
//!
//! Every failure is either a configuration problem caught before any
//! rendering starts, or an output problem raised while writing figures.

use thiserror::Error;

/// The main error type for terracolor operations.
#[derive(Error, Debug)]
pub enum TerraError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// A color string that is not a valid hex/CSS color
    #[error("Invalid color '{value}': {message}")]
    InvalidColor { value: String, message: String },

    /// Gradient construction errors
    #[error("Gradient error: {message}")]
    Gradient { message: String },

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with TerraError
pub type Result<T> = std::result::Result<T, TerraError>;
