//! Compressed context notation.
//!
//! Hand-edited catalogs abbreviate several context keys sharing a prefix and suffix
//! as `prefix(a|b|c)suffix`. Only the first parenthesized group is expanded; anything
//! after its closing `)` is literal suffix, nested or further groups included.

use thiserror::Error;

/// Errors raised while expanding a compressed context key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// A `(` without a `)` after it.
    #[error("Unclosed group in context '{context}': '(' at byte {position} has no matching ')'")]
    UnclosedGroup {
        /// The whole context key.
        context: String,
        /// Byte offset of the unclosed `(`.
        position: usize,
    },
}

/// Expands a compressed context key into its literal variants.
///
/// Empty alternatives are dropped, so `a(|)b` expands to nothing. The group closes at
/// the first `)` of the key, so a `)` in front of the `(` leaves the group empty.
///
/// # Examples
/// ```
/// use po_catalog_merge::notation::expand;
///
/// let expanded = expand("wnd(Log|Project).:").unwrap_or_default();
/// assert_eq!(expanded, vec!["wndLog.:".to_string(), "wndProject.:".to_string()]);
/// assert_eq!(expand("plain").unwrap_or_default(), vec!["plain".to_string()]);
/// ```
///
/// # Errors
/// Returns [`NotationError::UnclosedGroup`] if the first `(` is never closed.
pub fn expand(context: &str) -> Result<Vec<String>, NotationError> {
    let Some((prefix, rest)) = context.split_once('(') else {
        return Ok(vec![context.to_string()]);
    };
    let Some((compressed, suffix)) = rest.split_once(')') else {
        return Err(NotationError::UnclosedGroup {
            context: context.to_string(),
            position: prefix.len(),
        });
    };

    // The group ends at the first `)` of the whole key; one before the `(` leaves it empty.
    if prefix.contains(')') {
        return Ok(Vec::new());
    }

    Ok(compressed
        .split('|')
        .filter(|part| !part.is_empty())
        .map(|part| format!("{prefix}{part}{suffix}"))
        .collect())
}
