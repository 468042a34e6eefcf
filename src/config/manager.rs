//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    TableSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: TableSettings,

    /// 読み込んだ設定ファイルのパス（デフォルト設定の場合は `None`）
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定で作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `dir` の `.i18n-table.json` から設定を読み込む
    ///
    /// ファイルがなければデフォルト設定を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, dir: &Path) -> Result<(), ConfigError> {
        match loader::load_from_dir(dir)? {
            Some(settings) => self.apply(settings, Some(dir.join(loader::CONFIG_FILE_NAME))),
            None => self.apply(TableSettings::default(), None),
        }
    }

    /// 明示されたファイルから設定を読み込む
    ///
    /// # Errors
    /// - ファイルが存在しない・読み込めない
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(path)?;
        self.apply(settings, Some(path.to_path_buf()))
    }

    /// 設定を差し替える（検証に失敗した場合は現在の設定を維持）
    ///
    /// # Errors
    /// バリデーションエラー
    pub fn update_settings(&mut self, new_settings: TableSettings) -> Result<(), ConfigError> {
        self.apply(new_settings, self.source.clone())
    }

    fn apply(&mut self, settings: TableSettings, source: Option<PathBuf>) -> Result<(), ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(?source, ?settings, "Settings loaded");
        self.current_settings = settings;
        self.source = source;
        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &TableSettings {
        &self.current_settings
    }

    /// 設定ファイルのパスを取得
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
