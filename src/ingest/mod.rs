//! Administrative catalog ingestion.

pub mod catalog_csv;

pub use catalog_csv::{parse_catalog_csv, upload_checksum, ImportError};
