//! Mapping Resolver: the apply step turning choices into history records.

use chrono::{DateTime, Utc};
use fieldmap_model::{
    HistoricalMapping, HistoryScope, ManufacturerId, MappingError, MappingResult, Result,
    Suggestion,
};
use fieldmap_standards::CanonicalCatalog;

use crate::confidence::{ConfidenceLevel, ConfidenceThresholds};

/// Reason recorded on manually chosen mappings.
pub const MANUAL_REASON: &str = "Manually mapped";

/// Sets `accepted` on mapping results and emits the matching
/// [`HistoricalMapping`] for the caller to persist. Performs no I/O.
#[derive(Debug, Clone)]
pub struct MappingResolver {
    manufacturer: ManufacturerId,
}

impl MappingResolver {
    pub fn new(manufacturer: ManufacturerId) -> Self {
        Self { manufacturer }
    }

    pub fn manufacturer(&self) -> &ManufacturerId {
        &self.manufacturer
    }

    /// Accepts one of the field's ranked suggestions.
    ///
    /// Fails with [`MappingError::InvalidChoice`] and leaves `result`
    /// untouched if `chosen` is not in the ranked list.
    pub fn accept(
        &self,
        result: &mut MappingResult,
        chosen: &Suggestion,
        accepted_at: DateTime<Utc>,
    ) -> Result<HistoricalMapping> {
        if !result.ranked_suggestions.contains(chosen) {
            return Err(MappingError::InvalidChoice {
                field: result.field.raw_name.clone(),
                target: chosen.target.clone(),
            });
        }
        Ok(self.record(result, chosen.clone(), accepted_at))
    }

    /// Accepts the ranked suggestion for `target`.
    pub fn accept_target(
        &self,
        result: &mut MappingResult,
        target: &str,
        accepted_at: DateTime<Utc>,
    ) -> Result<HistoricalMapping> {
        let Some(chosen) = result.suggestion_for(target).cloned() else {
            return Err(MappingError::InvalidChoice {
                field: result.field.raw_name.clone(),
                target: target.to_string(),
            });
        };
        Ok(self.record(result, chosen, accepted_at))
    }

    /// Clears any accepted suggestion.
    pub fn reject(&self, result: &mut MappingResult) {
        result.accepted = None;
    }

    /// Maps a field to any catalog key, ranked or not, at confidence 1.0.
    pub fn accept_manual(
        &self,
        result: &mut MappingResult,
        target: &str,
        catalog: &CanonicalCatalog,
        accepted_at: DateTime<Utc>,
    ) -> Result<HistoricalMapping> {
        let field = catalog
            .get(target)
            .ok_or_else(|| MappingError::UnknownTarget(target.to_string()))?;
        let manual = Suggestion {
            target: field.key.clone(),
            confidence: 1.0,
            methods: Default::default(),
            reasons: vec![MANUAL_REASON.to_string()],
            value_type_hint: field.value_type,
        };
        Ok(self.record(result, manual, accepted_at))
    }

    /// Accepts the top suggestion of every unaccepted result whose level is
    /// [`ConfidenceLevel::High`]. Callers opt into this; the engine never does.
    pub fn auto_accept(
        &self,
        results: &mut [MappingResult],
        thresholds: &ConfidenceThresholds,
        accepted_at: DateTime<Utc>,
    ) -> Vec<HistoricalMapping> {
        let mut accepted = Vec::new();
        for result in results.iter_mut().filter(|r| !r.is_accepted()) {
            let Some(top) = result.top().cloned() else {
                continue;
            };
            if thresholds.categorize(top.confidence) == Some(ConfidenceLevel::High) {
                tracing::debug!(
                    field = %result.field.raw_name,
                    target = %top.target,
                    confidence = top.confidence,
                    "auto-accepted"
                );
                accepted.push(self.record(result, top, accepted_at));
            }
        }
        accepted
    }

    fn record(
        &self,
        result: &mut MappingResult,
        chosen: Suggestion,
        accepted_at: DateTime<Utc>,
    ) -> HistoricalMapping {
        let mapping = HistoricalMapping {
            scope: HistoryScope::new(self.manufacturer.clone(), result.field.document_type.clone()),
            raw_name: result.field.raw_name.clone(),
            target: chosen.target.clone(),
            accepted_confidence: chosen.confidence,
            accepted_at,
        };
        result.accepted = Some(chosen);
        mapping
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use fieldmap_model::{DocumentField, MatchMethod, TemplateId, ValueType};

    use super::*;

    fn result() -> MappingResult {
        let field = DocumentField::new("Patient DOB", "", "ivr", TemplateId::new("tpl"));
        MappingResult::new(
            field,
            vec![
                Suggestion::new("patient_dob", 0.96, MatchMethod::Pattern, "p", ValueType::Date),
                Suggestion::new("signature_date", 0.5, MatchMethod::Pattern, "p", ValueType::Date),
            ],
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap()
    }

    #[test]
    fn reject_clears_acceptance() {
        let resolver = MappingResolver::new(ManufacturerId::new("ACME"));
        let mut result = result();
        resolver.accept_target(&mut result, "patient_dob", now()).expect("accept");
        assert!(result.is_accepted());
        resolver.reject(&mut result);
        assert!(!result.is_accepted());
    }

    #[test]
    fn accept_target_requires_a_ranked_suggestion() {
        let resolver = MappingResolver::new(ManufacturerId::new("ACME"));
        let mut result = result();
        let err = resolver.accept_target(&mut result, "provider_npi", now()).unwrap_err();
        assert_eq!(err.target(), "provider_npi");
        assert!(!result.is_accepted());
    }

    #[test]
    fn auto_accept_only_takes_high_confidence() {
        let resolver = MappingResolver::new(ManufacturerId::new("ACME"));
        let low = MappingResult::new(
            DocumentField::new("Name", "", "ivr", TemplateId::new("tpl")),
            vec![Suggestion::new("patient_name", 0.5, MatchMethod::Pattern, "p", ValueType::Text)],
        );
        let mut results = vec![result(), low];
        let accepted = resolver.auto_accept(&mut results, &ConfidenceThresholds::default(), now());
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].target, "patient_dob");
        assert!(results[0].is_accepted());
        assert!(!results[1].is_accepted());
    }
}
