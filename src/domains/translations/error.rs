//! Translation-specific error types.

use thiserror::Error;

/// Errors that can occur while loading or exporting translations.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Reading or writing the translation file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The translation map could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
