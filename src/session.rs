//! 編集セッションの状態
//!
//! セッション開始時に空のテーブルで作成され、インポートで丸ごと置き換えられ、
//! 編集で 1 セルずつ更新され、セッション終了（`drop`）で破棄される。
//! セッション間で共有される暗黙のグローバル状態は持たない。

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::export::{
    ExportDocuments,
    ExportError,
    build_export,
};
use crate::indexer::{
    ImportBatch,
    read_batch,
};
use crate::merge::merge;
use crate::registry::LanguageRegistry;
use crate::store::{
    StoreError,
    TranslationEntry,
    TranslationStore,
};
use crate::translate::{
    FillReport,
    TranslationProvider,
    fill_missing,
};
use crate::types::{
    KeyPath,
    LanguageId,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Language '{0}' is not registered for this project")]
    UnknownLanguage(LanguageId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 1 つの編集セッション
///
/// テーブル（`TranslationStore`）はこのセッションが排他的に所有する。
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// プロジェクトの言語一覧
    registry: LanguageRegistry,
    /// 翻訳テーブル
    store: TranslationStore,
    /// 表示・エクスポート対象の言語（選択順）
    selected: Vec<LanguageId>,
}

impl Session {
    /// 空のテーブルでセッションを開始する
    #[must_use]
    pub fn new(registry: LanguageRegistry) -> Self {
        Self { registry, store: TranslationStore::new(), selected: Vec::new() }
    }

    /// ファイル群をインポートしてテーブルを置き換える
    ///
    /// 全ファイルの読み込みが終わるまでマージしない。マージは `paths` の順序で
    /// 行うため、同じキー・言語の値は後のファイルが優先される。
    /// 読み込み途中で future が破棄された場合、テーブルは変更されない。
    pub async fn import(&mut self, paths: &[PathBuf], concurrency: usize) -> ImportBatch {
        let batch = read_batch(paths, concurrency).await;
        self.apply_import(&batch);
        batch
    }

    /// 読み込み済みのバッチをマージしてテーブルを置き換える
    ///
    /// 有効なファイルが 1 つもない場合は現在のテーブルを維持し、`false` を返す。
    pub fn apply_import(&mut self, batch: &ImportBatch) -> bool {
        if batch.is_empty() {
            tracing::warn!(rejected = batch.rejected.len(), "No valid translation files to import");
            return false;
        }

        let collection = merge(batch.language_files());
        for file in batch.language_files() {
            if self.registry.ensure(&file.language) {
                tracing::info!(language = %file.language, "Registered language from import");
            }
        }
        tracing::info!(
            files = batch.files.len(),
            rejected = batch.rejected.len(),
            entries = collection.len(),
            "Imported translations"
        );
        self.store.replace(collection);
        true
    }

    /// セルを編集する
    ///
    /// # Errors
    /// キーが存在しない場合 `SessionError::Store`（テーブルは変更されない）
    pub fn set_value(
        &mut self,
        key: &KeyPath,
        language: &LanguageId,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        Ok(self.store.set_value(key, language, value)?)
    }

    /// 検索（キーまたは値の部分一致、大文字小文字を区別しない）
    pub fn filter(&self, query: &str) -> impl Iterator<Item = &TranslationEntry> {
        self.store.filter(query)
    }

    /// 言語の選択を切り替える。選択された状態になれば `true`
    ///
    /// # Errors
    /// 未登録の言語の場合 `SessionError::UnknownLanguage`
    pub fn toggle_language(&mut self, language: &LanguageId) -> Result<bool, SessionError> {
        if !self.registry.contains(language) {
            return Err(SessionError::UnknownLanguage(language.clone()));
        }
        if self.remove_language(language) {
            Ok(false)
        } else {
            self.selected.push(language.clone());
            Ok(true)
        }
    }

    /// 言語を選択から外す。外した場合は `true`
    pub fn remove_language(&mut self, language: &LanguageId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|selected| selected != language);
        self.selected.len() != before
    }

    #[must_use]
    pub fn selected(&self) -> &[LanguageId] {
        &self.selected
    }

    /// 選択中の言語の列だけを持つテーブル行
    pub fn rows(&self) -> impl Iterator<Item = (&KeyPath, Vec<Option<&str>>)> {
        self.store.project(&self.selected)
    }

    /// 選択中の言語ごとにエクスポート用ドキュメントを作る
    ///
    /// # Errors
    /// キーの衝突でドキュメントを組み立てられない場合
    pub fn export_selected(&self) -> Result<ExportDocuments, ExportError> {
        let languages: BTreeSet<LanguageId> = self.selected.iter().cloned().collect();
        build_export(&languages, self.store.collection())
    }

    /// 選択中の言語の未翻訳セルを `source` の値から埋める
    pub fn fill_missing<P>(&mut self, provider: &P, source: &LanguageId) -> FillReport
    where
        P: TranslationProvider + ?Sized,
    {
        fill_missing(&mut self.store, provider, source, &self.selected)
    }

    #[must_use]
    pub const fn store(&self) -> &TranslationStore {
        &self.store
    }

    #[must_use]
    pub const fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }
}
