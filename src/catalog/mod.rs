//! メモリ上の翻訳カタログ
//!
//! [`Catalog`] は PO/POT ファイル 1 つ分のレコード列とヘッダーメタデータを持つ。
//! レコードの順序はファイル上の順序で、明示的なソート以外では変わらない。

mod error;
pub mod metadata;
mod stats;

use std::cmp::Reverse;

use serde::{
    Deserialize,
    Serialize,
};

pub use error::CatalogError;
pub use metadata::{
    Metadata,
    MetadataField,
    MetadataTemplate,
};
pub use stats::CatalogStats;

use crate::duplicates::{
    DuplicateEntry,
    check_duplicates,
};
use crate::identity::{
    self,
    IdentityKey,
    RawKey,
};
use crate::notation::NotationError;
use crate::sort_key::sort_key;
use crate::types::CatalogRecord;

/// ヘッダーメタデータ付きの順序付き翻訳レコード集合
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// ヘッダーのフィールド（挿入順）
    #[serde(default)]
    metadata: Metadata,
    /// レコード（ファイル上の順序）
    #[serde(default)]
    records: Vec<CatalogRecord>,
    /// 有効なレコードと同じ生キーの追加を拒否するか
    #[serde(skip, default = "default_check_for_duplicates")]
    check_for_duplicates: bool,
}

/// 読み込んだカタログは重複チェック有効で始まる
const fn default_check_for_duplicates() -> bool {
    true
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// 空のカタログを作成
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Metadata::new())
    }

    /// パーサーから受け取ったレコードとメタデータをそのまま包む
    ///
    /// 重複チェックは行わない。
    #[must_use]
    pub const fn from_parts(records: Vec<CatalogRecord>, metadata: Metadata) -> Self {
        Self { metadata, records, check_for_duplicates: true }
    }

    /// レコードとメタデータに分解する
    #[must_use]
    pub fn into_parts(self) -> (Vec<CatalogRecord>, Metadata) {
        (self.records, self.metadata)
    }

    /// 全レコード
    #[must_use]
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// レコードの可変イテレータ
    ///
    /// レコード列の追加は [`Catalog::append`] 経由のみ。
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut CatalogRecord> {
        self.records.iter_mut()
    }

    /// レコードのイテレータ
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogRecord> {
        self.records.iter()
    }

    /// レコード数（廃止済みを含む）
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// レコードがなければ `true`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 位置 `position` のレコード
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&CatalogRecord> {
        self.records.get(position)
    }

    /// 位置 `position` のレコード（可変）
    pub fn get_mut(&mut self, position: usize) -> Option<&mut CatalogRecord> {
        self.records.get_mut(position)
    }

    /// ヘッダーメタデータ
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// ヘッダーメタデータ（可変）
    pub const fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// 追加時の重複チェックが有効か
    #[must_use]
    pub const fn check_for_duplicates(&self) -> bool {
        self.check_for_duplicates
    }

    /// 追加時の重複チェックを切り替える
    pub const fn set_check_for_duplicates(&mut self, enabled: bool) {
        self.check_for_duplicates = enabled;
    }

    /// 末尾にレコードを追加する
    ///
    /// # Errors
    /// 重複チェックが有効で、同じ生キーの有効なレコードが既にある場合は
    /// [`CatalogError::DuplicateEntry`]
    pub fn append(&mut self, record: CatalogRecord) -> Result<(), CatalogError> {
        if self.check_for_duplicates && self.contains_active_raw(&identity::raw_key(&record)) {
            return Err(CatalogError::DuplicateEntry {
                context_key: record.context_key,
                source_text: record.source_text,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// 全レコードを削除する。メタデータは残す
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// `key` を持つ有効なレコードがあるか
    fn contains_active_raw(&self, key: &RawKey) -> bool {
        self.records.iter().any(|record| {
            !record.obsolete
                && record.context_key == key.context_key
                && record.source_text == key.source_text
        })
    }

    /// `(context_key, source_text)` で最初に一致するレコードの位置
    ///
    /// 一致規則は [`identity::matches`] を参照。コンテキストキーが `:` で終わらない
    /// レコードに対しては `source_text` を無視する。
    #[must_use]
    pub fn position(&self, context_key: &str, source_text: &str) -> Option<usize> {
        self.records.iter().position(|record| identity::matches(record, context_key, source_text))
    }

    /// `(context_key, source_text)` で最初に一致するレコード
    #[must_use]
    pub fn find(&self, context_key: &str, source_text: &str) -> Option<&CatalogRecord> {
        self.position(context_key, source_text).and_then(|position| self.records.get(position))
    }

    /// [`Catalog::find`] の可変版
    pub fn find_mut(&mut self, context_key: &str, source_text: &str) -> Option<&mut CatalogRecord> {
        self.position(context_key, source_text).and_then(|position| self.records.get_mut(position))
    }

    /// 全レコードの識別キー（カタログ順）
    #[must_use]
    pub fn id_keys(&self) -> Vec<IdentityKey> {
        identity::id_keys(&self.records)
    }

    /// デフォルトのソートキーで並べ替える
    pub fn sort(&mut self) {
        self.sort_by_key_fn(sort_key, false);
    }

    /// 任意のキーで安定ソートする
    ///
    /// 昇順・降順どちらでも、キーが等しいレコードの相対順序は保たれる。
    pub fn sort_by_key_fn<K, F>(&mut self, key_fn: F, reverse: bool)
    where
        K: Ord,
        F: Fn(&CatalogRecord) -> K,
    {
        if reverse {
            self.records.sort_by_cached_key(|record| Reverse(key_fn(record)));
        } else {
            self.records.sort_by_cached_key(|record| key_fn(record));
        }
    }

    /// ヘッダーを標準テンプレートに揃え、レコードをソートする
    pub fn format(&mut self) {
        self.format_with(&MetadataTemplate::default());
    }

    /// 設定されたヘッダーテンプレートで [`Catalog::format`] を行う
    pub fn format_with(&mut self, template: &MetadataTemplate) {
        self.metadata = template.apply(&self.metadata);
        self.sort();
        tracing::debug!(records = self.records.len(), "Catalog formatted");
    }

    /// 抽出コメント（エクスポートされたカタログのアクティビティログ等）を消す
    pub fn delete_extracted_comments(&mut self) {
        for record in &mut self.records {
            record.comment = None;
        }
    }

    /// 圧縮表記を展開すると衝突するレコードの組を返す
    ///
    /// # Errors
    /// 比較対象のコンテキストキーに閉じていないグループがあれば [`NotationError`]
    pub fn check_duplicates(&self) -> Result<Vec<DuplicateEntry>, NotationError> {
        check_duplicates(&self.records)
    }

    /// 翻訳の進捗統計
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::collect(&self.records)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogRecord;
    type IntoIter = std::slice::Iter<'a, CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
