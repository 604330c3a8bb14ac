//! Structural comparison of two catalog snapshots.
//!
//! Records are paired by their raw `(context, source)` key, not by the colon-aware
//! identity used for lookups and imports.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::catalog::Catalog;
use crate::identity::{
    RawKey,
    raw_key,
};
use crate::types::CatalogRecord;

/// How a raw key differs between the two catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    /// Only in the newer catalog.
    New,
    /// Only in the older catalog.
    Removed,
    /// In both, with a different translation.
    Modified,
}

/// One changed raw key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffEntry {
    /// Raw pair the entry is about.
    pub key: RawKey,
    /// Kind of change.
    pub status: DiffStatus,
    /// Translation in the older catalog; `None` for new entries.
    pub old_value: Option<String>,
    /// Translation in the newer catalog; `None` for removed entries.
    pub new_value: Option<String>,
}

/// Changes between two catalogs, grouped by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Keys only in the newer catalog, in its order.
    pub new_entries: Vec<DiffEntry>,
    /// Keys only in the older catalog, in its order.
    pub removed_entries: Vec<DiffEntry>,
    /// Keys in both with different translations, in the older catalog's order.
    pub modified_entries: Vec<DiffEntry>,
}

impl DiffResult {
    /// Returns true if any list is non-empty.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.is_empty()
    }

    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_entries.is_empty()
            && self.removed_entries.is_empty()
            && self.modified_entries.is_empty()
    }

    /// Total number of entries across all three lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.new_entries.len() + self.removed_entries.len() + self.modified_entries.len()
    }
}

/// Raw key map of a catalog. A repeated key keeps its first position and last record.
fn by_raw_key(catalog: &Catalog) -> IndexMap<RawKey, &CatalogRecord> {
    catalog.iter().map(|record| (raw_key(record), record)).collect()
}

/// Compares `old` against `new`.
///
/// New entries follow `new`'s order; removed and modified entries follow `old`'s.
/// Translations are compared exactly and case-sensitively.
#[must_use]
pub fn diff(old: &Catalog, new: &Catalog) -> DiffResult {
    let old_records = by_raw_key(old);
    let new_records = by_raw_key(new);
    let mut result = DiffResult::default();

    for (key, record) in &new_records {
        if !old_records.contains_key(key) {
            result.new_entries.push(DiffEntry {
                key: key.clone(),
                status: DiffStatus::New,
                old_value: None,
                new_value: Some(record.translation.clone()),
            });
        }
    }

    for (key, old_record) in &old_records {
        match new_records.get(key) {
            None => result.removed_entries.push(DiffEntry {
                key: key.clone(),
                status: DiffStatus::Removed,
                old_value: Some(old_record.translation.clone()),
                new_value: None,
            }),
            Some(new_record) if new_record.translation != old_record.translation => {
                result.modified_entries.push(DiffEntry {
                    key: key.clone(),
                    status: DiffStatus::Modified,
                    old_value: Some(old_record.translation.clone()),
                    new_value: Some(new_record.translation.clone()),
                });
            }
            Some(_) => {}
        }
    }

    tracing::debug!(
        new = result.new_entries.len(),
        removed = result.removed_entries.len(),
        modified = result.modified_entries.len(),
        "Catalog diff computed"
    );
    result
}

impl Catalog {
    /// Compares this catalog (older) against `other` (newer). See [`diff`].
    #[must_use]
    pub fn diff(&self, other: &Self) -> DiffResult {
        diff(self, other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::catalog_of;

    fn sample() -> Catalog {
        catalog_of(&[("menu:", "Open", "Öffnen"), ("dlg.title", "About", "Über"), ("", "Hi", "")])
    }

    #[googletest::test]
    fn test_diff_with_itself_is_empty() {
        let catalog = sample();

        let result = catalog.diff(&catalog);

        expect_that!(result.has_changes(), eq(false));
        expect_that!(diff(&catalog, &catalog.clone()).is_empty(), eq(true));
    }

    #[googletest::test]
    fn test_diff_empty_catalogs() {
        let result = diff(&Catalog::new(), &Catalog::new());
        expect_that!(result.len(), eq(0));
    }

    #[googletest::test]
    fn test_diff_new_entry() {
        let old = sample();
        let mut new = sample();
        new.append(CatalogRecord::new("menu:", "Save", "Speichern")).unwrap();

        let result = diff(&old, &new);

        expect_that!(result.removed_entries.is_empty(), eq(true));
        expect_that!(result.modified_entries.is_empty(), eq(true));
        assert_eq!(
            result.new_entries,
            vec![DiffEntry {
                key: RawKey { context_key: "menu:".to_string(), source_text: "Save".to_string() },
                status: DiffStatus::New,
                old_value: None,
                new_value: Some("Speichern".to_string()),
            }]
        );
    }

    #[googletest::test]
    fn test_diff_removed_entry() {
        let old = sample();
        let new = catalog_of(&[("menu:", "Open", "Öffnen"), ("", "Hi", "")]);

        let result = diff(&old, &new);

        expect_that!(result.new_entries.is_empty(), eq(true));
        expect_that!(result.removed_entries.len(), eq(1));
        expect_that!(result.modified_entries.is_empty(), eq(true));
        let removed = &result.removed_entries[0];
        expect_that!(removed.status, eq(DiffStatus::Removed));
        assert_eq!(removed.old_value.as_deref(), Some("Über"));
    }

    #[googletest::test]
    fn test_diff_modified_translation_is_case_sensitive() {
        let old = sample();
        let new =
            catalog_of(&[("menu:", "Open", "öffnen"), ("dlg.title", "About", "Über"), ("", "Hi", "")]);

        let result = diff(&old, &new);

        expect_that!(result.len(), eq(1));
        let modified = &result.modified_entries[0];
        expect_that!(modified.status, eq(DiffStatus::Modified));
        assert_eq!(modified.old_value.as_deref(), Some("Öffnen"));
        assert_eq!(modified.new_value.as_deref(), Some("öffnen"));
    }

    #[googletest::test]
    fn test_diff_uses_raw_pair_not_identity() {
        // same identity ("dlg.title", ""), different raw pair
        let old = catalog_of(&[("dlg.title", "About", "Über")]);
        let new = catalog_of(&[("dlg.title", "About us", "Über")]);

        let result = diff(&old, &new);

        expect_that!(result.new_entries.len(), eq(1));
        expect_that!(result.removed_entries.len(), eq(1));
    }

    #[googletest::test]
    fn test_diff_status_serializes_lowercase() {
        let json = serde_json::to_string(&DiffStatus::Modified).unwrap();
        assert_eq!(json, "\"modified\"");
    }
}
