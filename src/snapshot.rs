//! カタログの JSON スナップショット
//!
//! スナップショットは [`Catalog`] の serde 表現（`{"metadata": {...}, "records": [...]}`）。

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::catalog::Catalog;

/// スナップショットの読み書きエラー。いずれも対象ファイルのパスを持つ
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// ファイルの読み書きに失敗
    #[error("Failed to access catalog snapshot {}: {source}", path.display())]
    Io {
        /// 対象ファイル
        path: PathBuf,
        /// 元の I/O エラー
        #[source]
        source: std::io::Error,
    },

    /// JSON として読めない、またはカタログの形をしていない
    #[error("Invalid catalog snapshot {}: {source}", path.display())]
    Parse {
        /// 対象ファイル
        path: PathBuf,
        /// 元のパースエラー
        #[source]
        source: serde_json::Error,
    },

    /// カタログを JSON に変換できない
    #[error("Failed to serialize catalog for {}: {source}", path.display())]
    Serialize {
        /// 書き込み先ファイル
        path: PathBuf,
        /// 元のシリアライズエラー
        #[source]
        source: serde_json::Error,
    },
}

/// スナップショットを読み込む
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub fn load_catalog(path: &Path) -> Result<Catalog, SnapshotError> {
    tracing::debug!("Loading catalog snapshot from: {:?}", path);

    let content = fs::read_to_string(path)
        .map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })?;
    let catalog: Catalog = serde_json::from_str(&content)
        .map_err(|source| SnapshotError::Parse { path: path.to_path_buf(), source })?;

    tracing::debug!(records = catalog.len(), "Catalog snapshot loaded");
    Ok(catalog)
}

/// `catalog` を整形済み JSON で書き出す。既存のファイルは上書きする
///
/// # Errors
/// - シリアライズエラー
/// - ファイル書き込みエラー
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), SnapshotError> {
    let mut content = serde_json::to_string_pretty(catalog)
        .map_err(|source| SnapshotError::Serialize { path: path.to_path_buf(), source })?;
    content.push('\n');

    fs::write(path, content)
        .map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })?;

    tracing::debug!(records = catalog.len(), "Catalog snapshot written to {:?}", path);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::catalog_of;

    #[rstest]
    fn test_save_then_load_keeps_order_and_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("de.json");
        let mut catalog = catalog_of(&[("menu:", "Open", "Öffnen"), ("dlg.title", "About", "")]);
        catalog.metadata_mut().insert("Language".to_string(), "de".to_string());

        save_catalog(&path, &catalog).unwrap();
        let loaded = load_catalog(&path).unwrap();

        assert_eq!(loaded, catalog);
        assert!(loaded.check_for_duplicates());
    }

    #[rstest]
    fn test_load_missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let error = load_catalog(&path).unwrap_err();

        assert!(matches!(error, SnapshotError::Io { .. }));
        assert!(error.to_string().contains("missing.json"));
    }

    #[rstest]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, r#"{"records": [{"translation": 1}]}"#).unwrap();

        let result = load_catalog(&path);

        assert!(matches!(result, Err(SnapshotError::Parse { .. })));
    }

    #[rstest]
    fn test_serialize_error_is_not_reported_as_invalid_snapshot() {
        let source = serde_json::from_str::<u8>("not json").unwrap_err();
        let error = SnapshotError::Serialize { path: PathBuf::from("out/de.json"), source };

        let message = error.to_string();

        assert!(message.starts_with("Failed to serialize catalog for out/de.json"));
        assert!(!message.contains("Invalid catalog snapshot"));
    }

    #[rstest]
    fn test_load_minimal_record_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("min.json");
        fs::write(&path, r#"{"records": [{"sourceText": "Hi"}]}"#).unwrap();

        let catalog = load_catalog(&path).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.metadata().is_empty());
        assert_eq!(catalog.find("", "Hi").map(|record| record.translation.as_str()), Some(""));
    }
}
