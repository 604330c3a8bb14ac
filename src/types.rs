//! Core types used throughout the project.

use std::collections::BTreeSet;

use serde::{
    Deserialize,
    Serialize,
};

/// Flag set on records whose source text changed under them.
pub const FUZZY_FLAG: &str = "fuzzy";

/// A `(file, line)` reference from a `#:` comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Occurrence {
    /// Source file path as written in the catalog.
    pub file: String,
    /// Line in that file, if given.
    pub line: Option<u32>,
}

impl Occurrence {
    /// Creates an occurrence.
    #[must_use]
    pub fn new(file: impl Into<String>, line: Option<u32>) -> Self {
        Self { file: file.into(), line }
    }
}

/// One translation unit of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogRecord {
    /// `msgid`
    pub source_text: String,
    /// `msgstr`
    pub translation: String,
    /// `msgctxt`, empty when absent.
    pub context_key: String,
    /// `#,` flags such as `fuzzy`.
    pub flags: BTreeSet<String>,
    /// Soft-delete marker; obsolete records stay in the catalog.
    pub obsolete: bool,
    /// Extracted (`#.`) comment.
    pub comment: Option<String>,
    /// Translator (`# `) comment.
    pub translator_comment: Option<String>,
    /// `#| msgid`, the source text before the last rename.
    pub previous_source_text: Option<String>,
    /// `#| msgctxt`
    pub previous_context_key: Option<String>,
    /// `#:` references.
    pub occurrences: Vec<Occurrence>,
    /// Line in the source file this record was parsed from.
    pub line_number: Option<usize>,
}

impl CatalogRecord {
    /// Creates an active record without flags or comments.
    #[must_use]
    pub fn new(
        context_key: impl Into<String>,
        source_text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            context_key: context_key.into(),
            source_text: source_text.into(),
            translation: translation.into(),
            ..Self::default()
        }
    }

    /// Returns true if the context key makes the source text part of the identity.
    #[must_use]
    pub fn is_pair_keyed(&self) -> bool {
        self.context_key.ends_with(':')
    }

    /// Returns true if the record carries the `fuzzy` flag.
    #[must_use]
    pub fn is_fuzzy(&self) -> bool {
        self.flags.contains(FUZZY_FLAG)
    }

    /// Returns true if the translation has non-whitespace content.
    #[must_use]
    pub fn is_translated(&self) -> bool {
        !self.translation.trim().is_empty()
    }
}
