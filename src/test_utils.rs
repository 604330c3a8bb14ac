//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使うレコード・カタログの生成ヘルパー。
#![cfg(test)]

use crate::catalog::{
    Catalog,
    Metadata,
};
use crate::types::CatalogRecord;

/// 行番号付きのレコードを作成する
pub(crate) fn record_at(line: usize, context_key: &str, source_text: &str) -> CatalogRecord {
    CatalogRecord { line_number: Some(line), ..CatalogRecord::new(context_key, source_text, "") }
}

/// `(context_key, source_text, translation)` の組から順にカタログを作成する
///
/// 追加時の重複チェックを通さないので、キーが衝突するカタログも作れる。
pub(crate) fn catalog_of(entries: &[(&str, &str, &str)]) -> Catalog {
    let records = entries
        .iter()
        .map(|(context_key, source_text, translation)| {
            CatalogRecord::new(*context_key, *source_text, *translation)
        })
        .collect();
    Catalog::from_parts(records, Metadata::new())
}

/// カタログのコンテキストキー（現在の順序）
pub(crate) fn context_keys(catalog: &Catalog) -> Vec<&str> {
    catalog.iter().map(|record| record.context_key.as_str()).collect()
}
