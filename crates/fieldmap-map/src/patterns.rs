//! Pattern Matcher: ordered regex rules over the normalized field name.
//!
//! Rules that miss the name but hit the field's context text (a nearby label
//! or section heading) still contribute, scaled by [`CONTEXT_TEXT_FACTOR`].

use fieldmap_model::{DocumentField, MatchMethod, Suggestion, normalized_text};
use fieldmap_standards::{CanonicalCatalog, PatternRule};

use crate::generator::{CandidateGenerator, MatchContext};

/// Scale applied to rules matched by context text instead of the name.
pub const CONTEXT_TEXT_FACTOR: f32 = 0.6;

pub struct PatternMatcher<'a> {
    rules: &'a [PatternRule],
    catalog: &'a CanonicalCatalog,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(rules: &'a [PatternRule], catalog: &'a CanonicalCatalog) -> Self {
        Self { rules, catalog }
    }

    /// Emits one suggestion per matching rule, in rule order.
    pub fn match_name(&self, raw_name: &str) -> Vec<Suggestion> {
        self.match_normalized(&normalized_text(raw_name))
    }

    /// Name matches first, then context-only matches at reduced confidence.
    pub fn match_name_with_context(&self, raw_name: &str, context: &str) -> Vec<Suggestion> {
        let normalized = normalized_text(raw_name);
        let mut suggestions = self.match_normalized(&normalized);
        suggestions.extend(self.match_context(&normalized, context));
        suggestions
    }

    fn match_context(&self, normalized_name: &str, context: &str) -> Vec<Suggestion> {
        let normalized_context = normalized_text(context);
        if normalized_context.is_empty() {
            return Vec::new();
        }
        self.rules
            .iter()
            .filter(|rule| !rule.is_match(normalized_name) && rule.is_match(&normalized_context))
            .filter_map(|rule| {
                let target = self.catalog.get(&rule.target)?;
                Some(Suggestion::new(
                    target.key.clone(),
                    rule.confidence * CONTEXT_TEXT_FACTOR,
                    MatchMethod::Pattern,
                    format!("Field context matches pattern: {}", rule.pattern),
                    target.value_type,
                ))
            })
            .collect()
    }

    fn match_normalized(&self, normalized: &str) -> Vec<Suggestion> {
        if normalized.is_empty() {
            return Vec::new();
        }
        self.rules
            .iter()
            .filter(|rule| rule.is_match(normalized))
            .filter_map(|rule| {
                // Targets missing from the catalog are dropped.
                let target = self.catalog.get(&rule.target)?;
                Some(Suggestion::new(
                    target.key.clone(),
                    rule.confidence,
                    MatchMethod::Pattern,
                    format!("Field name matches pattern: {}", rule.pattern),
                    target.value_type,
                ))
            })
            .collect()
    }
}

impl CandidateGenerator for PatternMatcher<'_> {
    fn method(&self) -> MatchMethod {
        MatchMethod::Pattern
    }

    fn candidates(&self, field: &DocumentField, _context: &MatchContext<'_>) -> Vec<Suggestion> {
        let normalized = field.normalized_name();
        let mut suggestions = self.match_normalized(&normalized);
        suggestions.extend(self.match_context(&normalized, &field.context));
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use fieldmap_model::{CanonicalField, FieldCategory, ValueType};

    use super::*;

    fn catalog() -> CanonicalCatalog {
        CanonicalCatalog::new(vec![
            CanonicalField::new("patient_name", FieldCategory::Patient, "Patient Name", ValueType::Text),
            CanonicalField::new("patient_phone", FieldCategory::Patient, "Patient Phone", ValueType::Phone),
        ])
        .expect("catalog")
    }

    #[test]
    fn every_matching_rule_contributes() {
        let catalog = catalog();
        let rules = vec![
            PatternRule::new(r"^patient[_\s]?name$", "patient_name", 0.95).expect("rule"),
            PatternRule::new("name", "patient_name", 0.5).expect("rule"),
            PatternRule::new("phone", "patient_phone", 0.6).expect("rule"),
        ];
        let matcher = PatternMatcher::new(&rules, &catalog);

        let suggestions = matcher.match_name("patientName");
        let confidences: Vec<f32> = suggestions.iter().map(|s| s.confidence).collect();
        assert_eq!(confidences, vec![0.95, 0.5]);
        assert_eq!(
            suggestions[0].reasons,
            vec![r"Field name matches pattern: ^patient[_\s]?name$"]
        );
        assert!(suggestions.iter().all(|s| s.has_method(MatchMethod::Pattern)));
    }

    #[test]
    fn unknown_targets_are_dropped() {
        let catalog = catalog();
        let rules = vec![PatternRule::new("fax", "patient_fax", 0.7).expect("rule")];
        let matcher = PatternMatcher::new(&rules, &catalog);
        assert!(matcher.match_name("Fax Number").is_empty());
    }

    #[test]
    fn context_text_matches_at_reduced_confidence() {
        let catalog = catalog();
        let rules = vec![
            PatternRule::new(r"^patient[_\s]?name$", "patient_name", 0.95).expect("rule"),
            PatternRule::new("phone", "patient_phone", 0.6).expect("rule"),
        ];
        let matcher = PatternMatcher::new(&rules, &catalog);

        let suggestions = matcher.match_name_with_context("fld_12", "Patient Name");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].target, "patient_name");
        assert!((suggestions[0].confidence - 0.95 * CONTEXT_TEXT_FACTOR).abs() < 1e-6);
        assert_eq!(
            suggestions[0].reasons,
            vec![r"Field context matches pattern: ^patient[_\s]?name$"]
        );

        // A rule already matched by the name is not counted again.
        let suggestions = matcher.match_name_with_context("Home Phone", "Call this phone");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].confidence, 0.6);

        assert!(matcher.match_name_with_context("fld_12", "").is_empty());
    }

    #[test]
    fn value_type_hint_comes_from_catalog() {
        let catalog = catalog();
        let rules = vec![PatternRule::new("phone", "patient_phone", 0.6).expect("rule")];
        let matcher = PatternMatcher::new(&rules, &catalog);
        let suggestions = matcher.match_name("Home Phone");
        assert_eq!(suggestions[0].value_type_hint, ValueType::Phone);
    }
}
