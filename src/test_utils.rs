//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use crate::store::{
    TranslationCollection,
    TranslationStore,
};
use crate::types::{
    KeyPath,
    LanguageId,
};

/// 文字列から `KeyPath` を作成する（不正なキーはパニック）
pub(crate) fn key(text: &str) -> KeyPath {
    KeyPath::parse(text).unwrap()
}

/// 文字列から `LanguageId` を作成する
pub(crate) fn lang(id: &str) -> LanguageId {
    LanguageId::from(id)
}

/// テスト用の `TranslationCollection` を作成する
///
/// # Arguments
/// * `rows` - キーと (言語, 値) のリスト。順序はそのまま保持される
pub(crate) fn collection_with(rows: &[(&str, &[(&str, &str)])]) -> TranslationCollection {
    let mut collection = TranslationCollection::new();
    for (path, values) in rows {
        let entry = collection.entry(key(path));
        for (language, value) in *values {
            entry.set_text(&lang(language), (*value).to_string());
        }
    }
    collection
}

/// テスト用の `TranslationStore` を作成する
pub(crate) fn store_with(rows: &[(&str, &[(&str, &str)])]) -> TranslationStore {
    let mut store = TranslationStore::new();
    store.replace(collection_with(rows));
    store
}
