//! 設定ファイルの読み込み

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    EngineSettings,
};

/// ワークスペースのルートで探す設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".po-catalog-merge.json";

/// ワークスペースの設定を読み込み、バリデーション済みの設定を返す
///
/// 設定ファイルがなければデフォルト設定を使う。
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー（全件まとめて返す）
pub fn load_settings(workspace_root: &Path) -> Result<EngineSettings, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);
    let settings = read_config_file(&config_path)?.unwrap_or_default();

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!(
        fields = settings.metadata_template.fields().len(),
        check_for_duplicates = settings.check_for_duplicates,
        strip_extracted_comments = settings.strip_extracted_comments,
        "Settings loaded"
    );

    Ok(settings)
}

/// 設定ファイルを読む。存在しなければ `None`
fn read_config_file(config_path: &Path) -> Result<Option<EngineSettings>, ConfigError> {
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!("Configuration file not found: {:?}", config_path);
            return Ok(None);
        }
        Err(error) => return Err(error.into()),
    };

    tracing::debug!("Loading configuration from: {:?}", config_path);
    Ok(Some(serde_json::from_str(&content)?))
}
