//! Mapping session: orchestrates the engine over one document's fields.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use fieldmap_model::{DocumentField, HistoricalMapping, ManufacturerId, MappingResult};
use serde::{Deserialize, Serialize};

use crate::confidence::{ConfidenceLevel, ConfidenceThresholds};
use crate::engine::MappingEngine;
use crate::generator::MatchContext;

/// Default minimum confidence for a suggestion to be kept.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Default number of ranked suggestions per field.
pub const DEFAULT_MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub min_confidence: f32,
    pub max_results: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SessionOptions {
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_fields: usize,
    pub already_mapped_count: usize,
    /// Results carrying at least one ranked suggestion.
    pub newly_suggested_count: usize,
    pub confidence_threshold_used: f32,
}

/// Results of one session plus summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub results: Vec<MappingResult>,
    pub summary: SessionSummary,
}

impl SessionReport {
    /// Results with no ranked suggestion.
    pub fn unmappable(&self) -> impl Iterator<Item = &MappingResult> {
        self.results.iter().filter(|r| r.is_unmappable())
    }

    pub fn result_for(&self, raw_name: &str) -> Option<&MappingResult> {
        self.results.iter().find(|r| r.field.raw_name == raw_name)
    }

    pub fn result_for_mut(&mut self, raw_name: &str) -> Option<&mut MappingResult> {
        self.results.iter_mut().find(|r| r.field.raw_name == raw_name)
    }

    fn top_confidences(&self) -> impl Iterator<Item = f32> + '_ {
        self.results
            .iter()
            .filter_map(|r| r.top().map(|s| s.confidence))
    }

    /// Count of top suggestions at each confidence level.
    ///
    /// Uses default thresholds. For custom thresholds, use [`Self::count_by_level_with`].
    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<ConfidenceLevel, usize> {
        self.count_by_level_with(&ConfidenceThresholds::default())
    }

    #[must_use]
    pub fn count_by_level_with(
        &self,
        thresholds: &ConfidenceThresholds,
    ) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for confidence in self.top_confidences() {
            if let Some(level) = thresholds.categorize(confidence) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }

    #[must_use]
    pub fn min_confidence(&self) -> Option<f32> {
        self.top_confidences()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    #[must_use]
    pub fn max_confidence(&self) -> Option<f32> {
        self.top_confidences()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    #[must_use]
    pub fn mean_confidence(&self) -> Option<f32> {
        let (sum, count) = self
            .top_confidences()
            .fold((0.0_f32, 0_usize), |(sum, count), c| (sum + c, count + 1));
        (count > 0).then(|| sum / count as f32)
    }
}

/// One document's mapping pass.
///
/// Read-only over the engine and the history it is given; fields named in
/// the already-mapped set are skipped.
pub struct MappingSession<'e, 'a> {
    engine: &'e MappingEngine<'a>,
    document_type: String,
    options: SessionOptions,
    already_mapped: BTreeSet<String>,
}

impl<'e, 'a> MappingSession<'e, 'a> {
    pub fn new(engine: &'e MappingEngine<'a>, document_type: impl Into<String>) -> Self {
        Self {
            engine,
            document_type: document_type.into(),
            options: SessionOptions::default(),
            already_mapped: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Raw names of fields that already carry an accepted mapping.
    #[must_use]
    pub fn with_already_mapped<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.already_mapped
            .extend(names.into_iter().map(|name| name.into().trim().to_string()));
        self
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn is_already_mapped(&self, field: &DocumentField) -> bool {
        self.already_mapped.contains(field.raw_name.trim())
    }

    pub fn run(
        &self,
        fields: &[DocumentField],
        manufacturer: &ManufacturerId,
        history: &[HistoricalMapping],
    ) -> SessionReport {
        let span = tracing::info_span!(
            "mapping_session",
            document_type = %self.document_type,
            manufacturer = %manufacturer,
            fields = fields.len(),
        );
        let _guard = span.enter();

        let context = MatchContext::new(&self.document_type, manufacturer, history);
        let mut results = Vec::new();
        let mut already_mapped_count = 0;
        for field in fields {
            if self.is_already_mapped(field) {
                already_mapped_count += 1;
                tracing::debug!(field = %field.raw_name, "skipping already mapped field");
                continue;
            }
            let ranked = self.engine.rank_field(field, &context, &self.options);
            tracing::debug!(
                field = %field.raw_name,
                suggestions = ranked.len(),
                top = ranked.first().map(|s| s.target.as_str()),
                "ranked field"
            );
            results.push(MappingResult::new(field.clone(), ranked));
        }

        let summary = SessionSummary {
            total_fields: fields.len(),
            already_mapped_count,
            newly_suggested_count: results.iter().filter(|r| !r.is_unmappable()).count(),
            confidence_threshold_used: self.options.min_confidence,
        };
        tracing::info!(
            total = summary.total_fields,
            already_mapped = summary.already_mapped_count,
            suggested = summary.newly_suggested_count,
            "mapping session complete"
        );
        SessionReport { results, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_and_builders() {
        let options = SessionOptions::default();
        assert_eq!(options.min_confidence, 0.5);
        assert_eq!(options.max_results, 5);

        let options = options.with_min_confidence(1.7).with_max_results(3);
        assert_eq!(options.min_confidence, 1.0);
        assert_eq!(options.max_results, 3);
    }
}
