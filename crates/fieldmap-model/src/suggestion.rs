//! Suggestion and per-field mapping result types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::DocumentField;
use crate::field::ValueType;

/// Strategy that produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Regex rule on the normalized field name.
    Pattern,
    /// Token overlap with a catalog key or label.
    Similarity,
    /// Document-type specific keyword table.
    Context,
    /// Previously accepted mappings on similar templates.
    Historical,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Pattern => "pattern",
            MatchMethod::Similarity => "similarity",
            MatchMethod::Context => "context",
            MatchMethod::Historical => "historical",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed mapping from one document field to one canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Canonical field key.
    pub target: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f32,
    /// Strategies that contributed. Empty only for manual mappings.
    pub methods: BTreeSet<MatchMethod>,
    /// Justification per contributing strategy, in contribution order.
    pub reasons: Vec<String>,
    pub value_type_hint: ValueType,
}

impl Suggestion {
    /// Creates a single-method suggestion as emitted by a candidate generator.
    pub fn new(
        target: impl Into<String>,
        confidence: f32,
        method: MatchMethod,
        reason: impl Into<String>,
        value_type_hint: ValueType,
    ) -> Self {
        Self {
            target: target.into(),
            confidence: confidence.clamp(0.0, 1.0),
            methods: BTreeSet::from([method]),
            reasons: vec![reason.into()],
            value_type_hint,
        }
    }

    /// Combined human-readable reason.
    pub fn reason(&self) -> String {
        self.reasons.join(" + ")
    }

    /// Number of distinct strategies backing this suggestion.
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn has_method(&self, method: MatchMethod) -> bool {
        self.methods.contains(&method)
    }
}

/// Per-field outcome of a mapping session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    pub field: DocumentField,
    /// Descending by confidence, at most `max_results` entries.
    pub ranked_suggestions: Vec<Suggestion>,
    /// Set only by the resolver.
    pub accepted: Option<Suggestion>,
}

impl MappingResult {
    pub fn new(field: DocumentField, ranked_suggestions: Vec<Suggestion>) -> Self {
        Self {
            field,
            ranked_suggestions,
            accepted: None,
        }
    }

    /// Highest-ranked suggestion, if any.
    pub fn top(&self) -> Option<&Suggestion> {
        self.ranked_suggestions.first()
    }

    /// Ranked suggestion for a canonical key.
    pub fn suggestion_for(&self, target: &str) -> Option<&Suggestion> {
        self.ranked_suggestions.iter().find(|s| s.target == target)
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted.is_some()
    }

    /// True when no generator produced a suggestion above the threshold.
    pub fn is_unmappable(&self) -> bool {
        self.ranked_suggestions.is_empty()
    }
}
