use std::collections::HashSet;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::indexer::default_concurrency;
use crate::registry::{
    LanguageInfo,
    LanguageRegistry,
};
use crate::types::LanguageId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0].id")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableSettings {
    pub translation_files: TranslationFilesConfig,

    pub import: ImportConfig,

    pub export: ExportConfig,

    /// Language whose text seeds missing translations.
    pub source_language: LanguageId,

    /// Project languages with display names.
    /// If unset, the built-in list is used.
    pub languages: Option<Vec<LanguageInfo>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    /// Glob, relative to an imported directory, selecting translation files.
    pub file_pattern: String,
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/*.json".to_string() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportConfig {
    /// Files read at once during an import.
    /// Default: 80% of CPU cores (minimum 1).
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("exports") }
    }
}

impl TableSettings {
    /// # Errors
    /// - Invalid or empty glob pattern
    /// - Zero import concurrency
    /// - Empty output directory or source language
    /// - Empty or duplicate language ids
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        if self.import.concurrency == Some(0) {
            errors.push(ValidationError::new(
                "import.concurrency",
                "Must be at least 1, or remove this field to use the default",
            ));
        }

        if self.export.output_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "export.outputDir",
                "The output directory cannot be empty. Example: \"exports\"",
            ));
        }

        if self.source_language.as_str().is_empty() {
            errors.push(ValidationError::new(
                "sourceLanguage",
                "The source language cannot be empty. Example: \"en-US\"",
            ));
        }

        if let Some(languages) = &self.languages {
            let mut seen = HashSet::new();
            for (index, language) in languages.iter().enumerate() {
                if language.id.as_str().is_empty() {
                    errors.push(ValidationError::new(
                        format!("languages[{index}].id"),
                        "The language id cannot be empty",
                    ));
                } else if !seen.insert(&language.id) {
                    errors.push(ValidationError::new(
                        format!("languages[{index}].id"),
                        format!("Duplicate language id '{}'", language.id),
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Language registry built from `languages`, or the built-in list.
    #[must_use]
    pub fn registry(&self) -> LanguageRegistry {
        self.languages.clone().map_or_else(LanguageRegistry::default, LanguageRegistry::new)
    }

    #[must_use]
    pub fn import_concurrency(&self) -> usize {
        self.import.concurrency.unwrap_or_else(default_concurrency)
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            translation_files: TranslationFilesConfig::default(),
            import: ImportConfig::default(),
            export: ExportConfig::default(),
            source_language: LanguageId::from("en-US"),
            languages: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = TableSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"sourceLanguage": "fr-FR", "import": {"concurrency": 2}}"#;

        let settings: TableSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.source_language.as_str(), eq("fr-FR"));
        assert_that!(settings.import_concurrency(), eq(2));
        assert_that!(settings.translation_files.file_pattern, eq("**/*.json"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: TableSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.source_language.as_str(), eq("en-US"));
        assert_that!(settings.export.output_dir, eq(&PathBuf::from("exports")));
        assert_that!(settings.languages, none());
        assert_that!(settings.import_concurrency(), ge(1));
    }

    #[rstest]
    fn deserialize_languages_builds_registry() {
        let json = r#"{"languages": [{"id": "pt-BR", "name": "Português"}]}"#;

        let settings: TableSettings = serde_json::from_str(json).unwrap();
        let registry = settings.registry();

        assert_that!(registry.len(), eq(1));
        assert_that!(registry.display_name(&LanguageId::from("pt-BR")), eq("Português"));
    }

    #[rstest]
    fn default_settings_use_builtin_registry() {
        let registry = TableSettings::default().registry();

        assert_that!(registry.len(), eq(5));
    }

    #[rstest]
    fn validate_invalid_translation_file_pattern_empty() {
        let settings = TableSettings {
            translation_files: TranslationFilesConfig { file_pattern: String::new() },
            ..TableSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationFiles.filePattern")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_translation_file_pattern_invalid_glob() {
        let settings = TableSettings {
            translation_files: TranslationFilesConfig {
                file_pattern: "**/{locales,messages/*.json".to_string(),
            },
            ..TableSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationFiles.filePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_zero_concurrency() {
        let settings = TableSettings {
            import: ImportConfig { concurrency: Some(0) },
            ..TableSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("import.concurrency"))])
        );
    }

    #[rstest]
    fn validate_duplicate_and_empty_language_ids() {
        let settings = TableSettings {
            languages: Some(vec![
                LanguageInfo::new("en-US", "English"),
                LanguageInfo::new("", "Nothing"),
                LanguageInfo::new("en-US", "English again"),
            ]),
            ..TableSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![
                all![
                    field!(ValidationError.field_path, eq("languages[1].id")),
                    field!(ValidationError.message, contains_substring("cannot be empty"))
                ],
                all![
                    field!(ValidationError.field_path, eq("languages[2].id")),
                    field!(ValidationError.message, contains_substring("Duplicate"))
                ]
            ])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = TableSettings {
            source_language: LanguageId::from(""),
            export: ExportConfig { output_dir: PathBuf::new() },
            ..TableSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. export.outputDir"));
        assert_that!(error_message, contains_substring("2. sourceLanguage"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}
