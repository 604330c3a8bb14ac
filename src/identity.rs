//! Record identity.
//!
//! Two distinct keys exist and must not be confused:
//!
//! - [`IdentityKey`] is the logical identity used by lookups and imports. A context
//!   key ending in `:` makes the source text part of the identity; any other context
//!   key must be unique on its own.
//! - [`RawKey`] is the plain `(context, source)` pair used by diffing and by the
//!   append uniqueness check.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::CatalogRecord;

/// Logical identity of a record: `(context_key, source_text)` or `(context_key, "")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityKey {
    /// Context key as written.
    pub context_key: String,
    /// Source text, or empty when the context key alone identifies the record.
    pub source_text: String,
}

impl IdentityKey {
    /// Builds the identity a lookup for `(context_key, source_text)` resolves to.
    #[must_use]
    pub fn for_query(context_key: &str, source_text: &str) -> Self {
        let source_text = if context_key.ends_with(':') { source_text } else { "" };
        Self { context_key: context_key.to_string(), source_text: source_text.to_string() }
    }
}

/// Raw `(context_key, source_text)` pair of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKey {
    /// Context key as written.
    pub context_key: String,
    /// Source text as written.
    pub source_text: String,
}

/// Resolves the logical identity of a record.
#[must_use]
pub fn resolve(record: &CatalogRecord) -> IdentityKey {
    IdentityKey::for_query(&record.context_key, &record.source_text)
}

/// Returns the raw pair of a record, ignoring the colon rule.
#[must_use]
pub fn raw_key(record: &CatalogRecord) -> RawKey {
    RawKey {
        context_key: record.context_key.clone(),
        source_text: record.source_text.clone(),
    }
}

/// Returns true if `record` is what a lookup for `(context_key, source_text)` matches.
///
/// The candidate's own context key decides the rule: colon-suffixed candidates need
/// both values to match, others only the context key.
#[must_use]
pub fn matches(record: &CatalogRecord, context_key: &str, source_text: &str) -> bool {
    if record.is_pair_keyed() {
        record.context_key == context_key && record.source_text == source_text
    } else {
        record.context_key == context_key
    }
}

/// Identity keys of `records` in order. Colliding identities are kept.
#[must_use]
pub fn id_keys<'a>(records: impl IntoIterator<Item = &'a CatalogRecord>) -> Vec<IdentityKey> {
    records.into_iter().map(resolve).collect()
}

/// First-occurrence index from identity key to record position.
///
/// Answers the same question as a linear [`matches`] scan: a query whose context key
/// ends in `:` can only match colon-keyed records and vice versa, so looking up
/// [`IdentityKey::for_query`] finds the first matching record.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    /// Position of the first record holding each identity.
    positions: HashMap<IdentityKey, usize>,
}

impl IdentityIndex {
    /// Indexes `records` by position.
    #[must_use]
    pub fn build(records: &[CatalogRecord]) -> Self {
        let mut index = Self::default();
        for (position, record) in records.iter().enumerate() {
            index.insert(record, position);
        }
        index
    }

    /// Registers `record` at `position` unless its identity is already indexed.
    pub fn insert(&mut self, record: &CatalogRecord, position: usize) {
        self.positions.entry(resolve(record)).or_insert(position);
    }

    /// Position of the first record a lookup for `(context_key, source_text)` matches.
    #[must_use]
    pub fn position(&self, context_key: &str, source_text: &str) -> Option<usize> {
        self.positions.get(&IdentityKey::for_query(context_key, source_text)).copied()
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::pair_keyed("wndLog.:", "Continue", "Continue")]
    #[case::context_only("dlgAbout.title", "About", "")]
    #[case::empty_context("", "Hello", "")]
    fn test_resolve(#[case] context_key: &str, #[case] source: &str, #[case] expected: &str) {
        let record = CatalogRecord::new(context_key, source, "x");
        let key = resolve(&record);

        assert_eq!(key.context_key, context_key);
        assert_eq!(key.source_text, expected);
    }

    #[googletest::test]
    fn test_resolve_is_deterministic() {
        let a = CatalogRecord::new("menu:", "Open", "Öffnen");
        let b = CatalogRecord::new("menu:", "Open", "Ouvrir");

        expect_that!(resolve(&a) == resolve(&a), eq(true));
        expect_that!(resolve(&a) == resolve(&b), eq(true));
    }

    #[googletest::test]
    fn test_raw_key_keeps_source_for_plain_context() {
        let record = CatalogRecord::new("dlgAbout.title", "About", "");

        assert_eq!(raw_key(&record).source_text, "About");
        expect_that!(resolve(&record).source_text.is_empty(), eq(true));
    }

    #[rstest]
    #[case::pair_same("menu:", "Open", "menu:", "Open", true)]
    #[case::pair_other_source("menu:", "Open", "menu:", "Close", false)]
    #[case::plain_ignores_source("menu.open", "Open", "menu.open", "anything", true)]
    #[case::plain_other_context("menu.open", "Open", "menu.close", "Open", false)]
    fn test_matches(
        #[case] context_key: &str,
        #[case] source: &str,
        #[case] query_context: &str,
        #[case] query_source: &str,
        #[case] expected: bool,
    ) {
        let record = CatalogRecord::new(context_key, source, "");
        assert_that!(matches(&record, query_context, query_source), eq(expected));
    }

    #[googletest::test]
    fn test_index_agrees_with_linear_scan() {
        let records = vec![
            CatalogRecord::new("menu:", "Open", ""),
            CatalogRecord::new("menu:", "Close", ""),
            CatalogRecord::new("title", "Main", ""),
            CatalogRecord::new("title", "Second", ""),
        ];
        let index = IdentityIndex::build(&records);

        for (context_key, source) in
            [("menu:", "Open"), ("menu:", "Close"), ("menu:", "Quit"), ("title", "x"), ("nope", "")]
        {
            let linear = records.iter().position(|r| matches(r, context_key, source));
            expect_that!(index.position(context_key, source), eq(linear));
        }
    }

    #[googletest::test]
    fn test_id_keys_keep_collisions() {
        let records = [CatalogRecord::new("a", "x", ""), CatalogRecord::new("a", "y", "")];
        let keys = id_keys(&records);

        expect_that!(keys.len(), eq(2));
        expect_that!(keys.first() == keys.get(1), eq(true));
    }
}
