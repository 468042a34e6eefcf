use thiserror::Error;

use crate::codec::CodecError;

/// Reasons a translation file is rejected from an import batch.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Translation file must contain a JSON object at the top level")]
    NotAnObject,

    #[error("Invalid translation key: {0}")]
    Codec(#[from] CodecError),

    #[error("Cannot determine the language from the file name")]
    NoLanguage,
}
