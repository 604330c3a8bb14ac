//! 手編集カタログのコンテキスト重複検出

use std::collections::{
    HashMap,
    HashSet,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::notation::{
    NotationError,
    expand,
};
use crate::types::CatalogRecord;

/// 圧縮表記を展開すると衝突する 2 つのレコード
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateEntry {
    /// 前のレコードの行番号
    pub line1: Option<usize>,
    /// 後のレコードの行番号
    pub line2: Option<usize>,
    /// 共通のソーステキスト
    pub source_text: String,
    /// 前のレコードのコンテキストキー（展開前）
    pub context_key1: String,
    /// 後のレコードのコンテキストキー（展開前）
    pub context_key2: String,
}

/// 展開結果のキャッシュ（キーは展開前の文字列）
#[derive(Debug, Default)]
struct ExpansionCache<'a> {
    /// コンテキストキーごとの展開結果
    expanded: HashMap<&'a str, HashSet<String>>,
}

impl<'a> ExpansionCache<'a> {
    /// 未展開なら `context` を展開してキャッシュする
    fn ensure(&mut self, context: &'a str) -> Result<(), NotationError> {
        if !self.expanded.contains_key(context) {
            let variants = expand(context)?.into_iter().collect();
            self.expanded.insert(context, variants);
        }
        Ok(())
    }

    /// 2 つのコンテキストキーの展開結果が交わるか
    fn overlaps(&mut self, first: &'a str, second: &'a str) -> Result<bool, NotationError> {
        self.ensure(first)?;
        self.ensure(second)?;
        Ok(match (self.expanded.get(first), self.expanded.get(second)) {
            (Some(a), Some(b)) => !a.is_disjoint(b),
            _ => false,
        })
    }
}

/// ソーステキストが同じで、展開後のコンテキストキーが交わるレコードの組を探す
///
/// 組はカタログ順（`i < j`）で返す。展開するのはソーステキストが他のレコードと
/// 一致するレコードのコンテキストキーだけ。
///
/// # Errors
/// 比較対象のコンテキストキーに閉じていないグループがあれば [`NotationError`]
pub fn check_duplicates(records: &[CatalogRecord]) -> Result<Vec<DuplicateEntry>, NotationError> {
    let mut cache = ExpansionCache::default();
    let mut duplicates = Vec::new();

    for (i, first) in records.iter().enumerate() {
        for second in records.iter().skip(i + 1) {
            if first.source_text != second.source_text {
                continue;
            }
            if cache.overlaps(&first.context_key, &second.context_key)? {
                tracing::debug!(
                    first = %first.context_key,
                    second = %second.context_key,
                    "Duplicate context detected"
                );
                duplicates.push(DuplicateEntry {
                    line1: first.line_number,
                    line2: second.line_number,
                    source_text: first.source_text.clone(),
                    context_key1: first.context_key.clone(),
                    context_key2: second.context_key.clone(),
                });
            }
        }
    }

    Ok(duplicates)
}
