//! Rebuilding nested per-language documents from the translation table.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::codec::{
    CodecError,
    unflatten,
};
use crate::store::TranslationCollection;
use crate::types::{
    KeyPath,
    LanguageId,
};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot export '{language}': {source}")]
    Conflict {
        language: LanguageId,
        #[source]
        source: CodecError,
    },

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize export document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Nested documents keyed by language, in language order.
pub type ExportDocuments = BTreeMap<LanguageId, Value>;

/// Build one nested document per requested language.
///
/// Every key of the collection appears in every document. A key without a
/// value for that language is exported as an empty string, so all exported
/// files share the same key set. Imported numbers, booleans, arrays and
/// `null` keep their JSON type until the cell is edited.
///
/// # Errors
/// Returns [`ExportError::Conflict`] if a key would have to be both a value
/// and an object. Nothing is produced for that language or the ones after it.
pub fn build_export(
    languages: &BTreeSet<LanguageId>,
    collection: &TranslationCollection,
) -> Result<ExportDocuments, ExportError> {
    languages
        .iter()
        .map(|language| {
            let document = build_document(language, collection)
                .map_err(|source| ExportError::Conflict { language: language.clone(), source })?;
            Ok((language.clone(), document))
        })
        .collect()
}

fn build_document(
    language: &LanguageId,
    collection: &TranslationCollection,
) -> Result<Value, CodecError> {
    let restricted: Vec<(&KeyPath, Value)> = collection
        .iter()
        .map(|entry| (&entry.key, entry.export_value(language)))
        .collect();

    unflatten(restricted.iter().map(|(key, value)| (*key, value)))
}

/// Serialize a document the way export files are written: UTF-8, two-space
/// indentation and a trailing newline.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render_document(document: &Value) -> Result<String, ExportError> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

/// Write `<language>.json` for every document into `dir`.
///
/// # Errors
/// Returns error if the directory cannot be created or a file cannot be
/// written.
pub async fn write_export(
    dir: &Path,
    documents: &ExportDocuments,
) -> Result<Vec<PathBuf>, ExportError> {
    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(documents.len());
    for (language, document) in documents {
        let path = dir.join(format!("{language}.json"));
        tokio::fs::write(&path, render_document(document)?).await?;
        tracing::info!(path = %path.display(), %language, "Wrote export file");
        written.push(path);
    }
    Ok(written)
}
