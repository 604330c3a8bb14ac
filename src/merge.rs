//! カタログを別のカタログに取り込むインポート処理
//!
//! インポート全体が失敗することはない。追加を拒否されたレコードはログに出し、
//! [`ImportReport`] に記録してスキップし、残りの処理を続ける。

use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};

use crate::catalog::{
    Catalog,
    CatalogError,
};
use crate::identity::{
    IdentityIndex,
    IdentityKey,
};
use crate::types::{
    CatalogRecord,
    FUZZY_FLAG,
};

/// インポート中に追加できなかったレコード
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    /// 対象レコードのコンテキストキー
    pub context_key: String,
    /// 対象レコードのソーステキスト
    pub source_text: String,
    /// 拒否された理由
    pub reason: String,
}

/// インポート 1 回分の集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// 追加したレコード数
    pub added: usize,
    /// ソーステキストを置き換えた既存レコード数
    pub modified: usize,
    /// 廃止済みにしたレコード数
    pub obsoleted: usize,
    /// 識別キーが既にあるため取り込まなかったレコード数
    pub skipped: usize,
    /// 追加に失敗したレコード
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    /// 拒否された追加をログに出して記録する
    fn record_failure(&mut self, error: &CatalogError, record: &CatalogRecord) {
        tracing::warn!(
            context_key = %record.context_key,
            source_text = %record.source_text,
            "{error} (skipped)"
        );
        self.failures.push(ImportFailure {
            context_key: record.context_key.clone(),
            source_text: record.source_text.clone(),
            reason: error.to_string(),
        });
    }
}

/// 識別キーが一致してソーステキストが異なるときの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceConflict {
    /// 既存レコードをそのまま残す
    Skip,
    /// 既存レコードのソーステキストを置き換える
    Rename,
}

impl Catalog {
    /// `record` を追加し、成功したら `index` に登録する
    fn append_indexed(
        &mut self,
        record: CatalogRecord,
        index: &mut IdentityIndex,
        report: &mut ImportReport,
    ) -> bool {
        let position = self.len();
        let snapshot = record.clone();
        match self.append(record) {
            Ok(()) => {
                index.insert(&snapshot, position);
                report.added += 1;
                true
            }
            Err(error) => {
                report.record_failure(&error, &snapshot);
                false
            }
        }
    }

    /// [`Catalog::import_unknown`] と [`Catalog::import_mismatch`] の共通処理
    fn import_records(&mut self, source: &Catalog, conflict: SourceConflict) -> ImportReport {
        let mut report = ImportReport::default();
        let mut index = IdentityIndex::build(self.records());

        for incoming in source {
            let existing = index.position(&incoming.context_key, &incoming.source_text);
            let Some(existing) = existing.and_then(|position| self.get_mut(position)) else {
                if self.append_indexed(incoming.clone(), &mut index, &mut report) {
                    tracing::info!(
                        context_key = %incoming.context_key,
                        source_text = %incoming.source_text,
                        "New entry added"
                    );
                }
                continue;
            };

            if existing.source_text == incoming.source_text {
                tracing::info!(
                    context_key = %incoming.context_key,
                    source_text = %incoming.source_text,
                    "Already exists (skipped)"
                );
                report.skipped += 1;
                continue;
            }

            match conflict {
                SourceConflict::Skip => {
                    tracing::info!(
                        context_key = %incoming.context_key,
                        previous = %existing.source_text,
                        source_text = %incoming.source_text,
                        "Already exists, but source text has changed (skipped)"
                    );
                    report.skipped += 1;
                }
                SourceConflict::Rename => {
                    tracing::info!(
                        context_key = %incoming.context_key,
                        previous = %existing.source_text,
                        source_text = %incoming.source_text,
                        "Source text has changed"
                    );
                    let previous =
                        std::mem::replace(&mut existing.source_text, incoming.source_text.clone());
                    existing.previous_source_text = Some(previous);
                    report.modified += 1;
                }
            }
        }

        report
    }

    /// 識別キーが未知の `source` のレコードを追加する。既存レコードは上書きしない
    ///
    /// 識別キーが一致してソーステキストが異なるレコードはログに出してスキップする。
    pub fn import_unknown(&mut self, source: &Catalog) -> ImportReport {
        tracing::info!(incoming = source.len(), "Importing unknown entries");
        let report = self.import_records(source, SourceConflict::Skip);
        tracing::info!(added = report.added, "{} entries added", report.added);
        report
    }

    /// [`Catalog::import_unknown`] に加え、ソーステキストが変わったレコードを置き換える
    ///
    /// 旧ソーステキストは `previous_source_text` に移し、翻訳は残す。
    pub fn import_mismatch(&mut self, source: &Catalog) -> ImportReport {
        tracing::info!(incoming = source.len(), "Importing mismatched entries");
        let report = self.import_records(source, SourceConflict::Rename);
        tracing::info!(
            added = report.added,
            modified = report.modified,
            "{} entries added, {} entries modified",
            report.added,
            report.modified
        );
        report
    }

    /// テンプレート（POT）とカタログを同期する
    ///
    /// 1. `pot` にだけある識別キーのレコードを追加する
    /// 2. カタログにだけある識別キーのレコード（最初の一致）を廃止済みにする
    /// 3. コンテキストキーだけで識別されるレコードのソーステキストがテンプレートと
    ///    異なれば置き換え、フラグを `fuzzy` のみにする（既存フラグは残さない）
    pub fn import_pot(&mut self, pot: &Catalog) -> ImportReport {
        let mut report = ImportReport::default();
        let own_keys: HashSet<IdentityKey> = self.id_keys().into_iter().collect();
        let pot_keys: HashSet<IdentityKey> = pot.id_keys().into_iter().collect();
        let pot_index = IdentityIndex::build(pot.records());
        let mut index = IdentityIndex::build(self.records());

        let pot_only = unique_in_order(pot.id_keys(), |key| !own_keys.contains(key));
        let own_only = unique_in_order(self.id_keys(), |key| !pot_keys.contains(key));

        tracing::info!(count = pot_only.len(), "Template only entries");
        for key in &pot_only {
            tracing::info!(
                context_key = %key.context_key,
                source_text = %key.source_text,
                "Adding"
            );
            let template_record = pot_index
                .position(&key.context_key, &key.source_text)
                .and_then(|position| pot.get(position));
            if let Some(template_record) = template_record {
                self.append_indexed(template_record.clone(), &mut index, &mut report);
            }
        }

        tracing::info!(count = own_only.len(), "Catalog only entries");
        for key in &own_only {
            let record = index
                .position(&key.context_key, &key.source_text)
                .and_then(|position| self.get_mut(position));
            if let Some(record) = record {
                tracing::info!(
                    context_key = %key.context_key,
                    source_text = %key.source_text,
                    "Marking obsolete"
                );
                record.obsolete = true;
                report.obsoleted += 1;
            }
        }

        for record in self.records_mut() {
            if record.is_pair_keyed() {
                continue;
            }
            let template_record =
                pot_index.position(&record.context_key, "").and_then(|position| pot.get(position));
            let Some(template_record) = template_record else {
                continue;
            };
            if template_record.source_text == record.source_text {
                continue;
            }

            tracing::info!(
                context_key = %record.context_key,
                previous = %record.source_text,
                source_text = %template_record.source_text,
                "Source text changed, marking fuzzy"
            );
            let previous =
                std::mem::replace(&mut record.source_text, template_record.source_text.clone());
            record.previous_source_text = Some(previous);
            record.flags = std::iter::once(FUZZY_FLAG.to_string()).collect();
            report.modified += 1;
        }

        tracing::info!(
            added = report.added,
            modified = report.modified,
            obsoleted = report.obsoleted,
            "Template import finished"
        );
        report
    }
}

/// `keep` を満たすキーを元の順序で、重複を除いて返す
fn unique_in_order(
    keys: Vec<IdentityKey>,
    keep: impl Fn(&IdentityKey) -> bool,
) -> Vec<IdentityKey> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|key| keep(key) && seen.insert(key.clone())).collect()
}
