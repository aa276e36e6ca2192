//! Historical Matcher: learns from previously accepted mappings.

use std::collections::BTreeMap;

use fieldmap_model::{
    DocumentField, HistoricalMapping, ManufacturerId, MatchMethod, Suggestion,
};
use fieldmap_standards::CanonicalCatalog;

use crate::generator::{CandidateGenerator, MatchContext};
use crate::similarity::{TokenProfile, name_similarity};

/// A history entry counts only when its name is more similar than this.
pub const HISTORY_SIMILARITY_THRESHOLD: f32 = 0.7;

/// Number of corroborating entries at which confidence stops being damped.
pub const HISTORY_DAMPING_COUNT: f32 = 10.0;

/// Upper bound for any history-derived confidence.
pub const HISTORY_CONFIDENCE_CAP: f32 = 0.9;

/// Damped confidence for `count` similar entries averaging `avg_similarity`.
pub fn historical_confidence(avg_similarity: f32, count: usize) -> f32 {
    (avg_similarity * (count as f32 / HISTORY_DAMPING_COUNT)).min(HISTORY_CONFIDENCE_CAP)
}

#[derive(Default)]
struct Tally {
    count: usize,
    similarity_sum: f32,
}

pub struct HistoricalMatcher<'a> {
    catalog: &'a CanonicalCatalog,
}

impl<'a> HistoricalMatcher<'a> {
    pub fn new(catalog: &'a CanonicalCatalog) -> Self {
        Self { catalog }
    }

    /// One suggestion per target that similar names in scope were mapped to.
    pub fn match_name(
        &self,
        raw_name: &str,
        manufacturer: &ManufacturerId,
        document_type: &str,
        history: &[HistoricalMapping],
    ) -> Vec<Suggestion> {
        self.match_profile(
            &TokenProfile::from_raw(raw_name),
            manufacturer,
            document_type,
            history,
        )
    }

    fn match_profile(
        &self,
        profile: &TokenProfile,
        manufacturer: &ManufacturerId,
        document_type: &str,
        history: &[HistoricalMapping],
    ) -> Vec<Suggestion> {
        if profile.is_empty() || history.is_empty() {
            return Vec::new();
        }

        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
        for mapping in history
            .iter()
            .filter(|m| m.scope.matches(manufacturer, document_type))
        {
            let score = name_similarity(profile, &TokenProfile::from_raw(&mapping.raw_name));
            if score > HISTORY_SIMILARITY_THRESHOLD {
                let tally = tallies.entry(mapping.target.as_str()).or_default();
                tally.count += 1;
                tally.similarity_sum += score;
            }
        }

        tallies
            .into_iter()
            .filter_map(|(target, tally)| {
                let Some(field) = self.catalog.get(target) else {
                    tracing::debug!(key = target, "history references unknown canonical field");
                    return None;
                };
                let avg = tally.similarity_sum / tally.count as f32;
                Some(Suggestion::new(
                    field.key.clone(),
                    historical_confidence(avg, tally.count),
                    MatchMethod::Historical,
                    format!("Used in {} similar templates", tally.count),
                    field.value_type,
                ))
            })
            .collect()
    }
}

impl CandidateGenerator for HistoricalMatcher<'_> {
    fn method(&self) -> MatchMethod {
        MatchMethod::Historical
    }

    fn candidates(&self, field: &DocumentField, context: &MatchContext<'_>) -> Vec<Suggestion> {
        self.match_profile(
            &TokenProfile::from_field(field),
            context.manufacturer,
            context.document_type,
            context.history,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use fieldmap_model::{CanonicalField, FieldCategory, HistoryScope, ValueType};

    use super::*;

    fn catalog() -> CanonicalCatalog {
        CanonicalCatalog::new(vec![CanonicalField::new(
            "wound_location",
            FieldCategory::Clinical,
            "Wound Location",
            ValueType::Text,
        )])
        .expect("catalog")
    }

    fn entry(manufacturer: &str, document_type: &str, raw_name: &str, target: &str) -> HistoricalMapping {
        HistoricalMapping {
            scope: HistoryScope::new(ManufacturerId::new(manufacturer), document_type),
            raw_name: raw_name.to_string(),
            target: target.to_string(),
            accepted_confidence: 0.9,
            accepted_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn confidence_is_damped_and_capped() {
        assert!((historical_confidence(0.8, 3) - 0.24).abs() < 1e-6);
        assert!((historical_confidence(1.0, 1) - 0.1).abs() < 1e-6);
        assert_eq!(historical_confidence(1.0, 10), HISTORY_CONFIDENCE_CAP);
        assert_eq!(historical_confidence(1.0, 500), HISTORY_CONFIDENCE_CAP);
    }

    #[test]
    fn only_in_scope_entries_count() {
        let catalog = catalog();
        let matcher = HistoricalMatcher::new(&catalog);
        let history = vec![
            entry("ACME", "ivr", "Wound Loc", "wound_location"),
            entry("ACME", "order_form", "Wound Loc", "wound_location"),
            entry("Other", "ivr", "Wound Loc", "wound_location"),
        ];
        let suggestions =
            matcher.match_name("Wound Loc", &ManufacturerId::new("ACME"), "ivr", &history);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].reasons, vec!["Used in 1 similar templates"]);
        assert!((suggestions[0].confidence - 0.1).abs() < 1e-6);
    }

    #[test]
    fn dissimilar_names_and_unknown_targets_are_ignored() {
        let catalog = catalog();
        let matcher = HistoricalMatcher::new(&catalog);
        let history = vec![
            entry("ACME", "ivr", "Shipping Carrier", "wound_location"),
            entry("ACME", "ivr", "Wound Loc", "wound_site"),
        ];
        let suggestions =
            matcher.match_name("Wound Loc", &ManufacturerId::new("ACME"), "ivr", &history);
        assert!(suggestions.is_empty());
    }
}
