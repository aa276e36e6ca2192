//! Context-Aware Matcher: document-type specific keyword tables.

use fieldmap_model::{DocumentField, MatchMethod, Suggestion, compact};
use fieldmap_standards::{CanonicalCatalog, ContextTables};

use crate::generator::{CandidateGenerator, MatchContext};

pub struct ContextMatcher<'a> {
    tables: &'a ContextTables,
    catalog: &'a CanonicalCatalog,
}

impl<'a> ContextMatcher<'a> {
    pub fn new(tables: &'a ContextTables, catalog: &'a CanonicalCatalog) -> Self {
        Self { tables, catalog }
    }

    /// Document types without a table contribute nothing.
    pub fn match_name(&self, raw_name: &str, document_type: &str) -> Vec<Suggestion> {
        self.match_compact(&compact(raw_name), document_type)
    }

    fn match_compact(&self, compact_name: &str, document_type: &str) -> Vec<Suggestion> {
        let Some(rules) = self.tables.rules_for(document_type) else {
            tracing::trace!(document_type, "no context table");
            return Vec::new();
        };
        rules
            .iter()
            .filter(|rule| rule.applies_to(compact_name))
            .filter_map(|rule| {
                let target = self.catalog.get(&rule.target)?;
                Some(Suggestion::new(
                    target.key.clone(),
                    rule.confidence,
                    MatchMethod::Context,
                    format!("Common field for {document_type} documents"),
                    target.value_type,
                ))
            })
            .collect()
    }
}

impl CandidateGenerator for ContextMatcher<'_> {
    fn method(&self) -> MatchMethod {
        MatchMethod::Context
    }

    fn candidates(&self, field: &DocumentField, context: &MatchContext<'_>) -> Vec<Suggestion> {
        self.match_compact(&field.compact_name(), context.document_type)
    }
}

#[cfg(test)]
mod tests {
    use fieldmap_standards::MatchingStandards;

    use super::*;

    #[test]
    fn ivr_icd10_maps_to_diagnosis_code() {
        let standards = MatchingStandards::embedded().expect("standards");
        let matcher = ContextMatcher::new(standards.context(), standards.catalog());

        let suggestions = matcher.match_name("ICD-10 Code", "ivr");
        let icd = suggestions
            .iter()
            .find(|s| s.target == "primary_diagnosis_code")
            .expect("diagnosis suggestion");
        assert_eq!(icd.confidence, 0.9);
        assert_eq!(icd.reasons, vec!["Common field for ivr documents"]);
    }

    #[test]
    fn unknown_document_type_contributes_nothing() {
        let standards = MatchingStandards::embedded().expect("standards");
        let matcher = ContextMatcher::new(standards.context(), standards.catalog());
        assert!(matcher.match_name("ICD-10 Code", "invoice").is_empty());
    }

    #[test]
    fn tables_are_scoped_to_their_document_type() {
        let standards = MatchingStandards::embedded().expect("standards");
        let matcher = ContextMatcher::new(standards.context(), standards.catalog());
        assert!(!matcher.match_name("Quantity", "order_form").is_empty());
        assert!(matcher.match_name("Quantity", "shipping_label").is_empty());
    }
}
