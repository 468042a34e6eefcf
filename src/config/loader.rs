//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    TableSettings,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".i18n-table.json";

/// ディレクトリから設定を読み込む
///
/// `dir` 直下の `.i18n-table.json` を探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_dir(dir: &Path) -> Result<Option<TableSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "Configuration file not found");
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 指定されたファイルから設定を読み込む（`--config` 用）
///
/// # Errors
/// - ファイルが存在しない・読み込めない
/// - JSON パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<TableSettings, ConfigError> {
    tracing::debug!(path = %config_path.display(), "Loading configuration");

    let content = std::fs::read_to_string(config_path)?;
    let settings: TableSettings = serde_json::from_str(&content)?;

    Ok(settings)
}
