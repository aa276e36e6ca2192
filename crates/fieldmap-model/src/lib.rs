#![deny(unsafe_code)]

//! Data model for mapping document form fields onto canonical order data.

pub mod document;
pub mod error;
pub mod field;
pub mod history;
pub mod ids;
pub mod normalize;
pub mod suggestion;

pub use document::DocumentField;
pub use error::{MappingError, Result};
pub use field::{CanonicalField, FieldCategory, ValueType};
pub use history::{HistoricalMapping, HistoryScope};
pub use ids::{ManufacturerId, TemplateId};
pub use normalize::{compact, normalize, normalize_to_string, normalized_text};
pub use suggestion::{MappingResult, MatchMethod, Suggestion};
