//! Sort keys reproducing the ordering of the upstream locale tooling.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::CatalogRecord;

/// Prefix that moves `*` contexts in front of everything else.
const FIRST_MARKER: char = '\u{1}';

/// Replaces a group's parentheses so grouped keys sort after their plain siblings.
const GROUP_MARKER: &str = "ZZZ";

/// A parenthesized run with non-empty content. Escapes are checked by the caller
/// since `regex` has no lookaround.
#[allow(clippy::expect_used)]
static GROUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("group pattern is valid"));

/// `context` without its trailing colon + `"source"` for pair-keyed records, else `context`.
#[must_use]
pub fn legacy_key(record: &CatalogRecord) -> String {
    if record.is_pair_keyed() {
        format!("{}\"{}\"", record.context_key.trim_end_matches(':'), record.source_text)
    } else {
        record.context_key.clone()
    }
}

/// Rewrites every unescaped `(content)` into `ZZZcontent`.
///
/// A group is skipped when its `(` directly follows a backslash or its `)` is directly
/// followed by one. Only a single backslash is inspected, so doubled escapes are not
/// recognized.
///
/// # Examples
/// ```
/// use po_catalog_merge::sort_key::grouping_transform;
///
/// assert_eq!(grouping_transform("foo(bar)baz"), "fooZZZbarbaz");
/// assert_eq!(grouping_transform(r"foo\(bar)baz"), r"foo\(bar)baz");
/// ```
#[must_use]
pub fn grouping_transform(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut copied_up_to = 0;
    let mut search_from = 0;

    while let Some(captures) = GROUP_PATTERN.captures_at(text, search_from) {
        let (Some(whole), Some(content)) = (captures.get(0), captures.get(1)) else {
            break;
        };

        let escaped_open = text.get(..whole.start()).is_some_and(|before| before.ends_with('\\'));
        let escaped_close = text.get(whole.end()..).is_some_and(|after| after.starts_with('\\'));
        if escaped_open || escaped_close {
            // `(` is one byte, so the next candidate starts right after it.
            search_from = whole.start() + 1;
            continue;
        }

        result.push_str(text.get(copied_up_to..whole.start()).unwrap_or_default());
        result.push_str(GROUP_MARKER);
        result.push_str(content.as_str());
        copied_up_to = whole.end();
        search_from = whole.end();
    }

    result.push_str(text.get(copied_up_to..).unwrap_or_default());
    result
}

/// Default ordering key of a record.
///
/// Records whose context starts with `*` sort before every other record.
#[must_use]
pub fn sort_key(record: &CatalogRecord) -> String {
    if record.context_key.starts_with('*') {
        let mut key = String::from(FIRST_MARKER);
        key.push_str(&legacy_key(record));
        key
    } else {
        grouping_transform(&legacy_key(record))
    }
}
