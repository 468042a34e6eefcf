//! In-memory translation table edited during a session.

use std::collections::{
    BTreeSet,
    HashMap,
};

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::codec::leaf_text;
use crate::types::{
    KeyPath,
    LanguageId,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Translation key '{0}' does not exist")]
    UnknownKey(KeyPath),
}

/// One translation key and its per-language values.
///
/// A language without a value for this key is absent from `values`, which
/// is different from an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub key: KeyPath,
    values: HashMap<LanguageId, String>,
    /// Imported leaves that are not JSON strings, kept until the cell is edited.
    originals: HashMap<LanguageId, Value>,
}

impl TranslationEntry {
    #[must_use]
    pub fn new(key: KeyPath) -> Self {
        Self { key, values: HashMap::new(), originals: HashMap::new() }
    }

    #[must_use]
    pub fn value(&self, language: &LanguageId) -> Option<&str> {
        self.values.get(language).map(String::as_str)
    }

    /// Every language that has a value, with its text.
    pub fn values(&self) -> impl Iterator<Item = (&LanguageId, &str)> {
        self.values.iter().map(|(language, text)| (language, text.as_str()))
    }

    /// Store an imported leaf, returning the text it replaced.
    ///
    /// The cell shows [`leaf_text`]; a non-string leaf is also remembered
    /// as-is so it is exported with its JSON type.
    pub fn set_imported(&mut self, language: &LanguageId, leaf: &Value) -> Option<String> {
        if leaf.is_string() {
            self.originals.remove(language);
        } else {
            self.originals.insert(language.clone(), leaf.clone());
        }
        self.values.insert(language.clone(), leaf_text(leaf))
    }

    /// Overwrite a cell with edited text. The cell becomes a plain string.
    pub fn set_text(&mut self, language: &LanguageId, text: String) {
        self.originals.remove(language);
        self.values.insert(language.clone(), text);
    }

    /// Value written for `language` on export: the imported leaf when the
    /// cell is unedited, the text otherwise, `""` when there is none.
    #[must_use]
    pub fn export_value(&self, language: &LanguageId) -> Value {
        self.originals.get(language).cloned().unwrap_or_else(|| {
            Value::String(self.value(language).unwrap_or_default().to_string())
        })
    }

    /// Case-insensitive match on the key or any present value.
    ///
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.key.as_str().to_lowercase().contains(needle)
            || self.values.values().any(|value| value.to_lowercase().contains(needle))
    }
}

/// Translation entries keyed by path, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationCollection {
    entries: IndexMap<KeyPath, TranslationEntry>,
}

impl TranslationCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `key`, appending an empty one if it is new.
    pub fn entry(&mut self, key: KeyPath) -> &mut TranslationEntry {
        self.entries.entry(key).or_insert_with_key(|key| TranslationEntry::new(key.clone()))
    }

    #[must_use]
    pub fn get(&self, key: &KeyPath) -> Option<&TranslationEntry> {
        self.entries.get(key)
    }

    fn get_mut(&mut self, key: &KeyPath) -> Option<&mut TranslationEntry> {
        self.entries.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a TranslationCollection {
    type Item = &'a TranslationEntry;
    type IntoIter = indexmap::map::Values<'a, KeyPath, TranslationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Owner of the session's translation table.
///
/// Import replaces the whole collection; afterwards it only changes through
/// [`TranslationStore::set_value`].
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    collection: TranslationCollection,
}

impl TranslationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole table, e.g. with the result of an import.
    pub fn replace(&mut self, collection: TranslationCollection) {
        tracing::debug!(
            previous = self.collection.len(),
            entries = collection.len(),
            "Replacing translation table"
        );
        self.collection = collection;
    }

    /// Set one language's value for an existing key.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownKey`] if no entry exists for `key`; the
    /// table is left untouched.
    pub fn set_value(
        &mut self,
        key: &KeyPath,
        language: &LanguageId,
        value: impl Into<String>,
    ) -> Result<(), StoreError> {
        let entry =
            self.collection.get_mut(key).ok_or_else(|| StoreError::UnknownKey(key.clone()))?;
        entry.set_text(language, value.into());
        Ok(())
    }

    /// Entries whose key or any value contains `query`, ignoring case.
    ///
    /// An empty query matches every entry.
    pub fn filter(&self, query: &str) -> impl Iterator<Item = &TranslationEntry> {
        let needle = query.to_lowercase();
        self.collection.iter().filter(move |entry| entry.matches(&needle))
    }

    #[must_use]
    pub const fn collection(&self) -> &TranslationCollection {
        &self.collection
    }

    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.collection.iter()
    }

    #[must_use]
    pub fn get(&self, key: &KeyPath) -> Option<&TranslationEntry> {
        self.collection.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Every language that has at least one value.
    #[must_use]
    pub fn languages(&self) -> BTreeSet<&LanguageId> {
        self.collection.iter().flat_map(|entry| entry.values.keys()).collect()
    }

    /// Table rows restricted to `languages`, one cell per requested language.
    pub fn project<'a>(
        &'a self,
        languages: &'a [LanguageId],
    ) -> impl Iterator<Item = (&'a KeyPath, Vec<Option<&'a str>>)> {
        self.collection.iter().map(move |entry| {
            let cells = languages.iter().map(|language| entry.value(language)).collect();
            (&entry.key, cells)
        })
    }

    /// Keys whose value for `language` is absent or empty.
    pub fn missing<'a>(&'a self, language: &'a LanguageId) -> impl Iterator<Item = &'a KeyPath> {
        self.collection
            .iter()
            .filter(move |entry| entry.value(language).is_none_or(str::is_empty))
            .map(|entry| &entry.key)
    }
}
