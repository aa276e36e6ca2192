//! Library side of the `fieldmap` CLI: logging setup, field input loading
//! and the file-backed history store.

pub mod input;
pub mod logging;
pub mod store;

pub use input::{load_extracted_fields, parse_json_fields, read_csv_fields};
pub use store::{HistoryMetadata, HistoryRepository, StoredHistory};
