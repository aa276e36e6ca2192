//! Token-overlap similarity and the Token-Similarity Matcher.

use std::collections::BTreeSet;

use fieldmap_model::{DocumentField, MatchMethod, Suggestion, compact, normalize};
use fieldmap_standards::CanonicalCatalog;

use crate::generator::{CandidateGenerator, MatchContext};

/// Added when one compacted name contains the other.
pub const SUBSTRING_BOOST: f32 = 0.3;

/// Similarity must exceed this for the matcher to emit a suggestion.
pub const SIMILARITY_THRESHOLD: f32 = 0.5;

/// Token set and compacted form of one name, computed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenProfile {
    tokens: BTreeSet<String>,
    compact: String,
}

impl TokenProfile {
    pub fn from_raw(raw: &str) -> Self {
        Self {
            tokens: normalize(raw).into_iter().collect(),
            compact: compact(raw),
        }
    }

    pub fn from_field(field: &DocumentField) -> Self {
        Self {
            tokens: field.normalized_tokens.iter().cloned().collect(),
            compact: field.compact_name(),
        }
    }

    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Similarity of a field against a key and a label.
///
/// The best overlap with either side is divided by the size of the union of
/// all three token sets. No overlap scores zero. Otherwise the score gains
/// [`SUBSTRING_BOOST`], capped at 1.0, when the compacted field and the
/// compacted key or label contain one another.
pub fn similarity(field: &TokenProfile, key: &TokenProfile, label: &TokenProfile) -> f32 {
    let overlap = field
        .tokens
        .intersection(&key.tokens)
        .count()
        .max(field.tokens.intersection(&label.tokens).count());
    if overlap == 0 {
        return 0.0;
    }

    let union: BTreeSet<&String> = field
        .tokens
        .iter()
        .chain(&key.tokens)
        .chain(&label.tokens)
        .collect();
    let mut score = overlap as f32 / union.len() as f32;

    if substring_related(&field.compact, &key.compact)
        || substring_related(&field.compact, &label.compact)
    {
        score = (score + SUBSTRING_BOOST).min(1.0);
    }
    score
}

/// Similarity between two names, as used for history lookups.
pub fn name_similarity(a: &TokenProfile, b: &TokenProfile) -> f32 {
    similarity(a, b, b)
}

fn substring_related(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

struct CatalogEntry {
    key: String,
    label: String,
    key_profile: TokenProfile,
    label_profile: TokenProfile,
    value_type: fieldmap_model::ValueType,
}

/// Scores a field against every catalog entry's key and label.
pub struct SimilarityMatcher {
    entries: Vec<CatalogEntry>,
}

impl SimilarityMatcher {
    pub fn new(catalog: &CanonicalCatalog) -> Self {
        let entries = catalog
            .iter()
            .map(|field| CatalogEntry {
                key: field.key.clone(),
                label: field.label.clone(),
                key_profile: TokenProfile::from_raw(&field.key),
                label_profile: TokenProfile::from_raw(&field.label),
                value_type: field.value_type,
            })
            .collect();
        Self { entries }
    }

    pub fn match_name(&self, raw_name: &str) -> Vec<Suggestion> {
        self.match_profile(&TokenProfile::from_raw(raw_name))
    }

    fn match_profile(&self, profile: &TokenProfile) -> Vec<Suggestion> {
        if profile.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter_map(|entry| {
                let score = similarity(profile, &entry.key_profile, &entry.label_profile);
                (score > SIMILARITY_THRESHOLD).then(|| {
                    Suggestion::new(
                        entry.key.clone(),
                        score,
                        MatchMethod::Similarity,
                        format!("Semantic similarity with '{}'", entry.label),
                        entry.value_type,
                    )
                })
            })
            .collect()
    }
}

impl CandidateGenerator for SimilarityMatcher {
    fn method(&self) -> MatchMethod {
        MatchMethod::Similarity
    }

    fn candidates(&self, field: &DocumentField, _context: &MatchContext<'_>) -> Vec<Suggestion> {
        self.match_profile(&TokenProfile::from_field(field))
    }
}
