#![deny(unsafe_code)]

//! Suggestion engine mapping document form fields onto canonical fields.
//!
//! Four candidate generators (patterns, token similarity, document-type
//! context, history) feed an aggregator that keeps one suggestion per
//! target and ranks them. Everything here is pure computation over the
//! standards and the history slice supplied by the caller.

pub mod aggregate;
pub mod confidence;
pub mod context;
pub mod discovery;
pub mod engine;
pub mod generator;
pub mod history;
pub mod patterns;
pub mod resolver;
pub mod search;
pub mod session;
pub mod similarity;

pub use aggregate::{aggregate, filter_and_rank};
pub use confidence::{ConfidenceLevel, ConfidenceThresholds};
pub use context::ContextMatcher;
pub use discovery::{
    DiscoveredField, ExtractedField, FieldConstraints, FieldGroup, FieldRelationship,
    ValidationHints, clean_field_name, detect_group, detect_relationships, discover_fields,
    document_fields, field_constraints, format_hint, infer_value_type, overall_confidence,
    validation_hints,
};
pub use engine::MappingEngine;
pub use generator::{CandidateGenerator, MatchContext};
pub use history::{HistoricalMatcher, historical_confidence};
pub use patterns::{CONTEXT_TEXT_FACTOR, PatternMatcher};
pub use resolver::MappingResolver;
pub use search::{CatalogMatch, search_catalog};
pub use session::{MappingSession, SessionOptions, SessionReport, SessionSummary};
pub use similarity::{SimilarityMatcher, TokenProfile, name_similarity, similarity};
