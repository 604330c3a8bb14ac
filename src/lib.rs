//! po-catalog-merge
//!
//! gettext PO/POT 翻訳カタログの識別・比較・マージエンジン

pub mod catalog;
pub mod config;
pub mod diff;
pub mod duplicates;
pub mod identity;
pub mod merge;
pub mod notation;
pub mod snapshot;
pub mod sort_key;
pub mod types;

mod test_utils;

pub use catalog::{
    Catalog,
    CatalogError,
};
pub use diff::DiffResult;
pub use merge::ImportReport;
pub use types::CatalogRecord;
