//! Merging single-language files into one translation table.

use crate::input::LanguageFile;
use crate::store::TranslationCollection;

/// Merge flattened single-language files into a new collection.
///
/// Files are applied in the order given. Entries appear in the order their
/// key was first seen across that sequence. When two files supply the same
/// key for the same language, the later file wins.
///
/// The result is meant to replace the session's table, not to be added to it.
pub fn merge<'a, I>(files: I) -> TranslationCollection
where
    I: IntoIterator<Item = &'a LanguageFile>,
{
    let mut collection = TranslationCollection::new();

    for file in files {
        tracing::debug!(language = %file.language, keys = file.keys.len(), "Merging file");
        for (path, value) in &file.keys {
            let entry = collection.entry(path.clone());
            if let Some(previous) = entry.set_imported(&file.language, value) {
                tracing::debug!(
                    key = %path,
                    language = %file.language,
                    %previous,
                    "Overriding value from an earlier file"
                );
            }
        }
    }

    collection
}
