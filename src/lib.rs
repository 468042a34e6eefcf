//! i18n-table
//!
//! 言語ごとの JSON 翻訳ファイルを 1 つのテーブルに取り込み、編集し、
//! 言語ごとの JSON に書き戻すためのライブラリ
//!
//! 取り込み: ファイル → [`codec::flatten`] → [`merge::merge`] → [`store::TranslationStore`]
//! 書き出し: [`store::TranslationStore`] → [`export::build_export`] → ファイル

pub mod codec;
pub mod config;
pub mod export;
pub mod indexer;
pub mod input;
pub mod merge;
pub mod registry;
pub mod session;
pub mod store;
#[cfg(test)]
mod test_utils;
pub mod translate;
pub mod types;

pub use session::Session;
pub use types::{
    KeyPath,
    LanguageId,
};
