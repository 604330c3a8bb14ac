use thiserror::Error;

/// Errors raised by catalog mutation primitives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// An active record with the same context and source text already exists
    #[error("Entry already exists: msgctxt \"{context_key}\", msgid \"{source_text}\"")]
    DuplicateEntry {
        /// Context key of the rejected record.
        context_key: String,
        /// Source text of the rejected record.
        source_text: String,
    },
}
