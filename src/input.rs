//! Translation file input definitions.

mod error;
pub mod translation;

pub use error::ImportError;
pub use translation::{
    LanguageFile,
    detect_language,
    is_translation_file,
    load_translation_file,
    parse_translation_text,
};
