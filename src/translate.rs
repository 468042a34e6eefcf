//! Filling missing translations through a pluggable provider.

use thiserror::Error;

use crate::store::TranslationStore;
use crate::types::{
    KeyPath,
    LanguageId,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Translation from '{source_lang}' to '{target}' is not supported")]
    Unsupported { source_lang: LanguageId, target: LanguageId },

    #[error("Translation provider failed: {0}")]
    Provider(String),
}

/// Machine translation backend.
pub trait TranslationProvider {
    /// Translate `text` from `source` to `target`.
    ///
    /// # Errors
    /// Returns [`TranslateError`] if the provider cannot translate the text.
    fn translate(
        &self,
        text: &str,
        source: &LanguageId,
        target: &LanguageId,
    ) -> Result<String, TranslateError>;
}

/// Copies the source text unchanged, to seed a new language for manual
/// translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughProvider;

impl TranslationProvider for PassthroughProvider {
    fn translate(
        &self,
        text: &str,
        _source: &LanguageId,
        _target: &LanguageId,
    ) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

/// A value the provider could not produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillFailure {
    pub key: KeyPath,
    pub language: LanguageId,
    pub error: TranslateError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub filled: usize,
    pub failures: Vec<FillFailure>,
}

/// Ask `provider` for every value missing in `targets` that `source` has.
///
/// A value is missing when it is absent or empty. Failures are collected in
/// the report and do not stop the fill.
pub fn fill_missing<P>(
    store: &mut TranslationStore,
    provider: &P,
    source: &LanguageId,
    targets: &[LanguageId],
) -> FillReport
where
    P: TranslationProvider + ?Sized,
{
    let mut report = FillReport::default();
    let mut updates = Vec::new();

    for entry in store.entries() {
        let Some(text) = entry.value(source).filter(|text| !text.is_empty()) else {
            continue;
        };
        for target in targets.iter().filter(|target| *target != source) {
            if entry.value(target).is_some_and(|value| !value.is_empty()) {
                continue;
            }
            match provider.translate(text, source, target) {
                Ok(translated) => updates.push((entry.key.clone(), target.clone(), translated)),
                Err(error) => {
                    tracing::warn!(key = %entry.key, %target, %error, "Translation failed");
                    report.failures.push(FillFailure {
                        key: entry.key.clone(),
                        language: target.clone(),
                        error,
                    });
                }
            }
        }
    }

    for (key, language, value) in updates {
        match store.set_value(&key, &language, value) {
            Ok(()) => report.filled += 1,
            Err(error) => tracing::warn!(%key, %language, %error, "Failed to store translation"),
        }
    }

    tracing::debug!(filled = report.filled, failed = report.failures.len(), "Fill finished");
    report
}
