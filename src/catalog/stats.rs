//! Translation progress counters.

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::CatalogRecord;

/// Record counts of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// All records, obsolete ones included.
    pub total: usize,
    /// Not fuzzy, with a non-blank translation.
    pub translated: usize,
    /// Not fuzzy, with a blank translation.
    pub untranslated: usize,
    /// Carrying the `fuzzy` flag, whatever the translation.
    pub fuzzy: usize,
    /// Soft-deleted records; each is also counted in one progress bucket.
    pub obsolete: usize,
    /// Whole percent of translated records, rounded down. Zero for an empty catalog.
    pub percent_translated: usize,
}

impl CatalogStats {
    /// Counts `records`. Each record lands in exactly one of fuzzy, translated and
    /// untranslated, checked in that order.
    #[must_use]
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a CatalogRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            if record.is_fuzzy() {
                stats.fuzzy += 1;
            } else if record.is_translated() {
                stats.translated += 1;
            } else {
                stats.untranslated += 1;
            }
            if record.obsolete {
                stats.obsolete += 1;
            }
        }
        stats.percent_translated =
            stats.translated.saturating_mul(100).checked_div(stats.total).unwrap_or(0);
        stats
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::types::FUZZY_FLAG;

    #[googletest::test]
    fn test_collect_counts() {
        let mut fuzzy = CatalogRecord::new("a", "A", "Ä");
        fuzzy.flags.insert(FUZZY_FLAG.to_string());
        let mut obsolete = CatalogRecord::new("b", "B", "");
        obsolete.obsolete = true;
        let records = [fuzzy, obsolete, CatalogRecord::new("c", "C", "Ç")];

        let stats = CatalogStats::collect(&records);

        expect_that!(stats.total, eq(3));
        expect_that!(stats.translated, eq(1));
        expect_that!(stats.untranslated, eq(1));
        expect_that!(stats.fuzzy, eq(1));
        expect_that!(stats.obsolete, eq(1));
        expect_that!(stats.percent_translated, eq(33));
    }

    #[googletest::test]
    fn test_fuzzy_and_blank_translations_are_not_translated() {
        let mut fuzzy = CatalogRecord::new("a", "A", "Ä");
        fuzzy.flags.insert(FUZZY_FLAG.to_string());
        let records = [fuzzy, CatalogRecord::new("b", "B", "   ")];

        let stats = CatalogStats::collect(&records);

        expect_that!(stats.translated, eq(0));
        expect_that!(stats.fuzzy, eq(1));
        expect_that!(stats.untranslated, eq(1));
        expect_that!(stats.percent_translated, eq(0));
        expect_that!(stats.fuzzy + stats.translated + stats.untranslated, eq(stats.total));
    }

    #[googletest::test]
    fn test_collect_empty() {
        let stats = CatalogStats::collect(&[]);
        expect_that!(stats == CatalogStats::default(), eq(true));
    }
}
