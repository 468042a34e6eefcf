//! Known project languages and their display names.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::types::LanguageId;

/// A language the project offers, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageInfo {
    pub id: LanguageId,
    pub name: String,
}

impl LanguageInfo {
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self { id: LanguageId::from(id), name: name.to_string() }
    }
}

/// Languages a project can show and export, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    languages: IndexMap<LanguageId, String>,
}

impl LanguageRegistry {
    /// Built-in languages offered when the project does not configure any.
    #[must_use]
    pub fn defaults() -> Vec<LanguageInfo> {
        vec![
            LanguageInfo::new("en-US", "English (US)"),
            LanguageInfo::new("fr-FR", "French (France)"),
            LanguageInfo::new("it-IT", "Italian (Italy)"),
            LanguageInfo::new("de-DE", "Deutsch (Germany)"),
            LanguageInfo::new("ja-JP", "Japanese (Japan)"),
        ]
    }

    /// Later duplicates of an id replace the earlier display name.
    pub fn new(languages: impl IntoIterator<Item = LanguageInfo>) -> Self {
        Self { languages: languages.into_iter().map(|info| (info.id, info.name)).collect() }
    }

    #[must_use]
    pub fn contains(&self, id: &LanguageId) -> bool {
        self.languages.contains_key(id)
    }

    /// Display name for `id`, or the id itself when it is not registered.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a LanguageId) -> &'a str {
        self.languages.get(id).map_or(id.as_str(), String::as_str)
    }

    /// Register a language found in imported files but missing from the
    /// registry, using its id as the name. Returns `true` if it was added.
    pub fn ensure(&mut self, id: &LanguageId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.languages.insert(id.clone(), id.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageId, &str)> {
        self.languages.iter().map(|(id, name)| (id, name.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new(Self::defaults())
    }
}
