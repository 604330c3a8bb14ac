//! Canonical catalog header fields.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

/// Ordered header metadata of a catalog.
pub type Metadata = IndexMap<String, String>;

/// Canonical header fields and their defaults, in output order.
const CANONICAL_FIELDS: &[(&str, &str)] = &[
    ("Project-Id-Version", "SmartGit"),
    ("Report-Msgid-Bugs-To", "https://github.com/syntevo/smartgit-translations"),
    ("POT-Creation-Date", ""),
    ("PO-Revision-Date", ""),
    ("Last-Translator", ""),
    ("Language-Team", ""),
    ("Language", ""),
    ("MIME-Version", "1.0"),
    ("Content-Type", "text/plain; charset=UTF-8"),
    ("Content-Transfer-Encoding", "8bit"),
    ("Plural-Forms", "nplurals=1; plural=0;"),
];

/// One header field of the template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetadataField {
    /// Header name, e.g. `Language`.
    pub name: String,
    /// Empty means "keep whatever the catalog already has".
    #[serde(default)]
    pub default: String,
}

impl MetadataField {
    /// Creates a field with a default value.
    #[must_use]
    pub fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self { name: name.into(), default: default.into() }
    }
}

/// Ordered list of header fields a formatted catalog carries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MetadataTemplate {
    /// Fields in output order.
    fields: Vec<MetadataField>,
}

impl Default for MetadataTemplate {
    fn default() -> Self {
        Self::new(
            CANONICAL_FIELDS
                .iter()
                .map(|(name, default)| MetadataField::new(*name, *default))
                .collect(),
        )
    }
}

impl MetadataTemplate {
    /// Creates a template with the given fields in output order.
    #[must_use]
    pub const fn new(fields: Vec<MetadataField>) -> Self {
        Self { fields }
    }

    /// Fields in output order.
    #[must_use]
    pub fn fields(&self) -> &[MetadataField] {
        &self.fields
    }

    /// Returns true if the template has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rebuilds `existing` into the template's shape.
    ///
    /// Non-empty defaults overwrite, empty defaults keep the existing value (or `""`),
    /// and fields outside the template are dropped.
    #[must_use]
    pub fn apply(&self, existing: &Metadata) -> Metadata {
        self.fields
            .iter()
            .map(|field| {
                let value = if field.default.is_empty() {
                    existing.get(&field.name).cloned().unwrap_or_default()
                } else {
                    field.default.clone()
                };
                (field.name.clone(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn metadata(pairs: &[(&str, &str)]) -> Metadata {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[googletest::test]
    fn test_apply_overwrites_non_empty_defaults() {
        let existing = metadata(&[("Project-Id-Version", "Other 1.0"), ("MIME-Version", "2.0")]);

        let result = MetadataTemplate::default().apply(&existing);

        expect_that!(result.get("Project-Id-Version").map(String::as_str), some(eq("SmartGit")));
        expect_that!(result.get("MIME-Version").map(String::as_str), some(eq("1.0")));
    }

    #[googletest::test]
    fn test_apply_keeps_existing_for_empty_defaults() {
        let existing = metadata(&[("Language", "de"), ("Last-Translator", "Jo <jo@example.com>")]);

        let result = MetadataTemplate::default().apply(&existing);

        expect_that!(result.get("Language").map(String::as_str), some(eq("de")));
        expect_that!(
            result.get("Last-Translator").map(String::as_str),
            some(eq("Jo <jo@example.com>"))
        );
        expect_that!(result.get("PO-Revision-Date").map(String::as_str), some(eq("")));
    }

    #[googletest::test]
    fn test_apply_drops_unknown_fields_and_keeps_order() {
        let existing = metadata(&[("X-Generator", "Poedit 3.4"), ("Language", "ja")]);

        let result = MetadataTemplate::default().apply(&existing);
        let names: Vec<&str> = result.keys().map(String::as_str).collect();
        let expected: Vec<&str> = CANONICAL_FIELDS.iter().map(|(name, _)| *name).collect();

        expect_that!(result.contains_key("X-Generator"), eq(false));
        assert_eq!(names, expected);
    }

    #[googletest::test]
    fn test_custom_template() {
        let template = MetadataTemplate::new(vec![
            MetadataField::new("Project-Id-Version", "MyApp"),
            MetadataField::new("Language", ""),
        ]);
        let existing = metadata(&[("Language", "fr"), ("MIME-Version", "1.0")]);

        let result = template.apply(&existing);

        expect_that!(result.len(), eq(2));
        expect_that!(result.get("Language").map(String::as_str), some(eq("fr")));
    }
}
