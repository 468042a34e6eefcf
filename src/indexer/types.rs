//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::input::{
    ImportError,
    LanguageFile,
};

#[derive(Error, Debug)]
pub enum IndexerError {
    /// Error when the translation file pattern is not a valid glob
    #[error("Invalid translation file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    /// Error when an input path does not exist
    #[error("Input path does not exist: {0}")]
    InvalidPath(PathBuf),
}

/// A file that was read and flattened successfully.
#[derive(Debug, Clone)]
pub struct ImportedFile {
    pub path: PathBuf,
    pub file: LanguageFile,
}

/// A file excluded from the batch, with the reason.
#[derive(Debug)]
pub struct RejectedFile {
    pub path: PathBuf,
    pub error: ImportError,
}

/// Outcome of reading one import batch, in selection order.
#[derive(Debug, Default)]
pub struct ImportBatch {
    pub files: Vec<ImportedFile>,
    pub rejected: Vec<RejectedFile>,
}

impl ImportBatch {
    /// Accepted files in selection order, ready for merging.
    pub fn language_files(&self) -> impl Iterator<Item = &LanguageFile> {
        self.files.iter().map(|imported| &imported.file)
    }

    /// Number of keys contributed by each accepted file.
    pub fn key_counts(&self) -> impl Iterator<Item = (&PathBuf, usize)> {
        self.files.iter().map(|imported| (&imported.path, imported.file.keys.len()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
