//! Discovery and batch reading of translation files.
use std::path::{
    Path,
    PathBuf,
};

use futures::StreamExt;
use globset::Glob;
use ignore::WalkBuilder;

use crate::indexer::types::{
    ImportBatch,
    ImportedFile,
    IndexerError,
    RejectedFile,
};
use crate::input::{
    is_translation_file,
    load_translation_file,
};

/// Default number of files read at once: 80% of CPU cores, at least 1.
#[must_use]
pub fn default_concurrency() -> usize {
    (num_cpus::get() * 4 / 5).max(1)
}

/// 翻訳ファイルを検索
///
/// `root` 以下を `.gitignore` を尊重して走査し、`file_pattern` に一致する
/// JSON ファイルをパス順で返す（ディレクトリ取り込み時の選択順を安定させる）。
///
/// # Errors
/// `file_pattern` が不正な glob の場合
pub fn find_translation_files(root: &Path, file_pattern: &str) -> Result<Vec<PathBuf>, IndexerError> {
    let matcher = Glob::new(file_pattern)
        .map_err(|e| IndexerError::InvalidPattern {
            pattern: file_pattern.to_string(),
            message: e.to_string(),
        })?
        .compile_matcher();

    let mut found_files = Vec::new();
    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(root) else {
            continue;
        };
        if !matcher.is_match(relative_path) || !is_translation_file(path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    tracing::debug!(root = %root.display(), count = found_files.len(), "Found translation files");
    Ok(found_files)
}

/// Resolve command-line inputs into an ordered file selection.
///
/// Files are kept in the order given; each directory is replaced by the
/// translation files found beneath it.
///
/// # Errors
/// - an input does not exist
/// - `file_pattern` is not a valid glob
pub fn expand_inputs(inputs: &[PathBuf], file_pattern: &str) -> Result<Vec<PathBuf>, IndexerError> {
    let mut selection = Vec::new();
    for input in inputs {
        if input.is_dir() {
            selection.extend(find_translation_files(input, file_pattern)?);
        } else if input.is_file() {
            selection.push(input.clone());
        } else {
            return Err(IndexerError::InvalidPath(input.clone()));
        }
    }
    Ok(selection)
}

/// Read every file of an import batch.
///
/// Up to `concurrency` reads run at once, but results are reported in the
/// order of `paths`, never in completion order. Files that cannot be read or
/// parsed are moved to [`ImportBatch::rejected`] and the rest of the batch
/// continues.
pub async fn read_batch(paths: &[PathBuf], concurrency: usize) -> ImportBatch {
    tracing::debug!(files = paths.len(), concurrency, "Reading import batch");

    let results: Vec<_> = futures::stream::iter(paths)
        .map(|path| async move { (path, load_translation_file(path).await) })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut batch = ImportBatch::default();
    for (path, result) in results {
        match result {
            Ok(file) => batch.files.push(ImportedFile { path: path.clone(), file }),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Rejected translation file");
                batch.rejected.push(RejectedFile { path: path.clone(), error });
            }
        }
    }
    batch
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::input::ImportError;
    use crate::test_utils::lang;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[rstest]
    fn find_returns_json_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "locales/fr-FR.json", "{}");
        write(root, "locales/en-US.json", "{}");
        write(root, "locales/readme.md", "");
        write(root, "other/de-DE.json", "{}");

        let found = find_translation_files(root, "locales/*.json").unwrap();

        assert_eq!(names(&found, root), vec!["locales/en-US.json", "locales/fr-FR.json"]);
    }

    #[rstest]
    fn find_skips_non_json_matches() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "en-US.json", "{}");
        write(root, "notes.txt", "");

        let found = find_translation_files(root, "**/*").unwrap();

        assert_eq!(names(&found, root), vec!["en-US.json"]);
    }

    #[rstest]
    fn find_rejects_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();

        let result = find_translation_files(temp_dir.path(), "**/{locales");

        assert!(matches!(result, Err(IndexerError::InvalidPattern { .. })));
    }

    #[rstest]
    fn expand_keeps_file_order_and_expands_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let zh = write(root, "zh.json", "{}");
        write(root, "dir/b.json", "{}");
        write(root, "dir/a.json", "{}");

        let selection = expand_inputs(&[zh, root.join("dir")], "**/*.json").unwrap();

        assert_eq!(names(&selection, root), vec!["zh.json", "dir/a.json", "dir/b.json"]);
    }

    #[rstest]
    fn expand_rejects_missing_inputs() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.json");

        let result = expand_inputs(&[missing], "**/*.json");

        assert!(matches!(result, Err(IndexerError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn read_batch_keeps_selection_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let paths: Vec<_> = ["ja-JP", "en-US", "de-DE", "fr-FR"]
            .iter()
            .map(|code| write(root, &format!("{code}.json"), r#"{"a": "x"}"#))
            .collect();

        let batch = read_batch(&paths, 4).await;

        let languages: Vec<_> = batch.language_files().map(|f| f.language.clone()).collect();
        assert_eq!(
            languages,
            vec![lang("ja-JP"), lang("en-US"), lang("de-DE"), lang("fr-FR")]
        );
        assert!(batch.rejected.is_empty());
    }

    #[tokio::test]
    async fn read_batch_rejects_bad_files_and_continues() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let paths = vec![
            write(root, "en-US.json", r#"{"a": "1", "b": {"c": "2"}}"#),
            write(root, "fr-FR.json", "{ broken"),
            write(root, "de-DE.json", r#"["not", "an", "object"]"#),
            root.join("it-IT.json"),
            write(root, "ja-JP.json", r#"{"a": "一"}"#),
        ];

        let batch = read_batch(&paths, 2).await;

        let counts: Vec<_> = batch.key_counts().map(|(_, count)| count).collect();
        assert_eq!(counts, vec![2, 1]);
        assert_eq!(batch.rejected.len(), 3);
        assert!(matches!(batch.rejected[0].error, ImportError::Parse(_)));
        assert!(matches!(batch.rejected[1].error, ImportError::NotAnObject));
        assert!(matches!(batch.rejected[2].error, ImportError::Io(_)));
        assert_that!(batch.rejected[2].path, eq(&paths[3]));
    }

    #[tokio::test]
    async fn read_batch_of_nothing_is_empty() {
        let batch = read_batch(&[], 0).await;
        assert!(batch.is_empty());
    }

    #[googletest::test]
    fn default_concurrency_is_positive() {
        expect_that!(default_concurrency(), ge(1));
    }
}
