//! Translation file input definitions

use std::path::Path;

use serde_json::Value;

use super::ImportError;
use crate::codec::{
    FlatMap,
    flatten,
};
use crate::types::LanguageId;

/// One imported single-language file, already flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    pub language: LanguageId,

    /// Flattened translation key map (e.g., "home.title" -> "Hello").
    pub keys: FlatMap,
}

/// Extension accepted for translation files.
pub const TRANSLATION_EXTENSION: &str = "json";

/// Whether `path` looks like a translation file (`*.json`).
#[must_use]
pub fn is_translation_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TRANSLATION_EXTENSION))
}

/// Detect language from the file name.
///
/// The file name without its extension is the language.
///
/// # Examples
/// - `locales/en-US.json` → `en-US`
/// - `fr-FR.json` → `fr-FR`
#[must_use]
pub fn detect_language(file_path: &Path) -> Option<LanguageId> {
    let stem = file_path.file_stem()?.to_str()?;
    (!stem.is_empty()).then(|| LanguageId::from(stem))
}

/// Parse the text of a translation file.
///
/// # Errors
/// - [`ImportError::Parse`] if the text is not valid JSON
/// - [`ImportError::NotAnObject`] if the top-level value is not an object
/// - [`ImportError::Codec`] if a key cannot be used as a key path segment
pub fn parse_translation_text(language: LanguageId, text: &str) -> Result<LanguageFile, ImportError> {
    let json: Value = serde_json::from_str(text)?;
    if !json.is_object() {
        return Err(ImportError::NotAnObject);
    }
    let keys = flatten(&json)?;
    Ok(LanguageFile { language, keys })
}

/// Load translation file and flatten its keys.
///
/// # Errors
/// Returns error if the language cannot be derived from the file name, the
/// file cannot be read, or its content is rejected by
/// [`parse_translation_text`].
pub async fn load_translation_file(file_path: &Path) -> Result<LanguageFile, ImportError> {
    let language = detect_language(file_path).ok_or(ImportError::NoLanguage)?;
    let content = tokio::fs::read_to_string(file_path).await?;
    let file = parse_translation_text(language, &content)?;
    tracing::debug!(
        path = %file_path.display(),
        language = %file.language,
        keys = file.keys.len(),
        "Loaded translation file"
    );
    Ok(file)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::{
        key,
        lang,
    };

    #[rstest]
    #[case("/path/to/locales/en-US.json", Some("en-US"))]
    #[case("fr-FR.json", Some("fr-FR"))]
    #[case("/path/to/ja.json", Some("ja"))]
    #[case("/path/to/common", Some("common"))]
    #[case("/", None)]
    fn test_detect_language(#[case] path: &str, #[case] expected: Option<&str>) {
        let result = detect_language(Path::new(path));
        assert_eq!(result.as_ref().map(LanguageId::as_str), expected);
    }

    #[rstest]
    #[case("en.json", true)]
    #[case("EN.JSON", true)]
    #[case("en.yaml", false)]
    #[case("json", false)]
    fn test_is_translation_file(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_translation_file(Path::new(path)), expected);
    }

    #[googletest::test]
    fn parse_flattens_nested_keys() {
        let text = r#"{ "home": { "title": "Hi" }, "items": ["a"] }"#;

        let file = parse_translation_text(lang("en-US"), text).unwrap();

        expect_that!(file.language, eq(&lang("en-US")));
        expect_that!(file.keys.get(&key("home.title")), some(eq(&json!("Hi"))));
        expect_that!(file.keys.get(&key("items")), some(eq(&json!(["a"]))));
    }

    #[rstest]
    #[case::invalid_json("{ not json")]
    #[case::truncated(r#"{"a": "#)]
    fn parse_rejects_invalid_json(#[case] text: &str) {
        let result = parse_translation_text(lang("en-US"), text);
        assert!(matches!(result, Err(ImportError::Parse(_))));
    }

    #[rstest]
    #[case::array(r#"["a", "b"]"#)]
    #[case::string(r#""hello""#)]
    #[case::number("42")]
    fn parse_rejects_non_object_documents(#[case] text: &str) {
        let result = parse_translation_text(lang("en-US"), text);
        assert!(matches!(result, Err(ImportError::NotAnObject)));
    }

    #[googletest::test]
    fn parse_rejects_dotted_keys() {
        let result = parse_translation_text(lang("en-US"), r#"{"a.b": "x"}"#);
        expect_that!(matches!(result, Err(ImportError::Codec(_))), eq(true));
    }

    #[tokio::test]
    async fn load_uses_file_stem_as_language() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr-FR.json");
        tokio::fs::write(&path, r#"{"home": {"title": "Bonjour"}}"#).await.unwrap();

        let file = load_translation_file(&path).await.unwrap();

        assert_eq!(file.language, lang("fr-FR"));
        assert_eq!(file.keys.get(&key("home.title")), Some(&json!("Bonjour")));
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_translation_file(&temp_dir.path().join("de-DE.json")).await;

        assert!(matches!(result, Err(ImportError::Io(_))));
    }
}
