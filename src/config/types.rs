use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::catalog::MetadataTemplate;

/// One invalid settings field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "metadataTemplate[0].name")
    pub field_path: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Every invalid field, in template order.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The config file exists but cannot be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The config file is not valid settings JSON.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list of validation errors, one per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings read from `.po-catalog-merge.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Header fields a formatted catalog carries, in order.
    pub metadata_template: MetadataTemplate,

    /// Reject appending a record whose context and source text are already present
    /// on an active record.
    pub check_for_duplicates: bool,

    /// Clear extracted comments of unknown/mismatch exports before importing them.
    pub strip_extracted_comments: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            metadata_template: MetadataTemplate::default(),
            check_for_duplicates: true,
            strip_extracted_comments: false,
        }
    }
}

impl EngineSettings {
    /// Checks every field and reports all problems at once.
    ///
    /// # Errors
    /// - Empty metadata template
    /// - Empty, malformed or repeated header field name
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.metadata_template.is_empty() {
            errors.push(ValidationError::new(
                "metadataTemplate",
                "At least one header field is required. Example: [{\"name\": \"Language\", \"default\": \"\"}]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, field) in self.metadata_template.fields().iter().enumerate() {
            let path = format!("metadataTemplate[{index}].name");
            if field.name.trim().is_empty() {
                errors.push(ValidationError::new(path, "The field name cannot be empty"));
            } else if field.name.contains(':') || field.name.contains('\n') {
                errors.push(ValidationError::new(
                    path,
                    format!("Invalid header field name '{}': must not contain ':' or line breaks", field.name),
                ));
            } else if !seen.insert(field.name.as_str()) {
                errors.push(ValidationError::new(
                    path,
                    format!("Duplicate header field '{}'", field.name),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::catalog::MetadataField;

    fn with_fields(fields: &[(&str, &str)]) -> EngineSettings {
        EngineSettings {
            metadata_template: MetadataTemplate::new(
                fields.iter().map(|(name, default)| MetadataField::new(*name, *default)).collect(),
            ),
            ..EngineSettings::default()
        }
    }

    #[rstest]
    fn validate_default_settings() {
        assert_that!(EngineSettings::default().validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings_uses_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{"stripExtractedComments": true}"#).unwrap();

        assert_that!(settings.strip_extracted_comments, eq(true));
        assert_that!(settings.check_for_duplicates, eq(true));
        assert_that!(settings.metadata_template == MetadataTemplate::default(), eq(true));
    }

    #[rstest]
    fn deserialize_metadata_template() {
        let settings: EngineSettings = serde_json::from_str(
            r#"{"metadataTemplate": [{"name": "Project-Id-Version", "default": "MyApp"}, {"name": "Language"}]}"#,
        )
        .unwrap();

        assert_that!(settings.metadata_template.fields().len(), eq(2));
        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn validate_empty_template() {
        let result = with_fields(&[]).validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("metadataTemplate")),
                field!(ValidationError.message, contains_substring("At least one header field"))
            ]])
        );
    }

    #[rstest]
    #[case::empty_name("  ", "cannot be empty")]
    #[case::colon("Language:", "must not contain")]
    #[case::newline("Lang\nuage", "must not contain")]
    fn validate_invalid_field_name(#[case] name: &str, #[case] message: &str) {
        let result = with_fields(&[("Language", ""), (name, "")]).validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("metadataTemplate[1].name")),
                field!(ValidationError.message, contains_substring(message))
            ]])
        );
    }

    #[rstest]
    fn validate_duplicate_field_name() {
        let result = with_fields(&[("Language", ""), ("MIME-Version", "1.0"), ("Language", "de")])
            .validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("metadataTemplate[2].name")),
                field!(ValidationError.message, contains_substring("Duplicate header field"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let errors = with_fields(&[("", ""), ("A:B", "")]).validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. metadataTemplate[0].name"));
        assert_that!(error_message, contains_substring("2. metadataTemplate[1].name"));
    }
}
