//! Settings loaded from `.i18n-table.json`.
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    ExportConfig,
    ImportConfig,
    TableSettings,
    TranslationFilesConfig,
    ValidationError,
};
