use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ManufacturerId;

/// Scope historical mappings are learned and looked up in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HistoryScope {
    pub manufacturer: ManufacturerId,
    pub document_type: String,
}

impl HistoryScope {
    pub fn new(manufacturer: ManufacturerId, document_type: impl Into<String>) -> Self {
        Self {
            manufacturer,
            document_type: document_type.into(),
        }
    }

    /// True if both the manufacturer and the document type match.
    pub fn matches(&self, manufacturer: &ManufacturerId, document_type: &str) -> bool {
        &self.manufacturer == manufacturer && self.document_type.eq_ignore_ascii_case(document_type)
    }
}

/// Durable record of a previously accepted suggestion.
///
/// Append-only: created by the resolver, persisted by the caller and fed back
/// into later sessions as read-only history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalMapping {
    #[serde(flatten)]
    pub scope: HistoryScope,
    /// Document field name the mapping was accepted for.
    pub raw_name: String,
    /// Canonical field key.
    pub target: String,
    pub accepted_confidence: f32,
    /// Supplied by the caller; the engine never reads the clock.
    pub accepted_at: DateTime<Utc>,
}
