//! Mapping engine: runs the four candidate generators and the aggregator.

use fieldmap_model::{DocumentField, HistoricalMapping, ManufacturerId, MappingResult, Suggestion};
use fieldmap_standards::{CanonicalCatalog, MatchingStandards};

use crate::aggregate::{aggregate, filter_and_rank};
use crate::context::ContextMatcher;
use crate::generator::{CandidateGenerator, MatchContext};
use crate::history::HistoricalMatcher;
use crate::patterns::PatternMatcher;
use crate::session::SessionOptions;
use crate::similarity::SimilarityMatcher;

/// Engine for suggesting canonical fields for document fields.
///
/// Holds only read-only state derived from the standards; any number of
/// sessions may share one engine.
///
/// # Example
///
/// ```ignore
/// let standards = MatchingStandards::embedded()?;
/// let engine = MappingEngine::new(standards);
/// let results = engine.suggest(&fields, "ivr", &manufacturer, &history, &SessionOptions::default());
/// ```
pub struct MappingEngine<'a> {
    catalog: &'a CanonicalCatalog,
    patterns: PatternMatcher<'a>,
    similarity: SimilarityMatcher,
    context: ContextMatcher<'a>,
    historical: HistoricalMatcher<'a>,
}

impl<'a> MappingEngine<'a> {
    pub fn new(standards: &'a MatchingStandards) -> Self {
        let catalog = standards.catalog();
        Self {
            catalog,
            patterns: PatternMatcher::new(standards.patterns(), catalog),
            similarity: SimilarityMatcher::new(catalog),
            context: ContextMatcher::new(standards.context(), catalog),
            historical: HistoricalMatcher::new(catalog),
        }
    }

    pub fn catalog(&self) -> &CanonicalCatalog {
        self.catalog
    }

    fn generators(&self) -> [&dyn CandidateGenerator; 4] {
        [
            &self.patterns,
            &self.similarity,
            &self.context,
            &self.historical,
        ]
    }

    /// Raw output of every generator, concatenated in a fixed order.
    pub fn candidates(&self, field: &DocumentField, context: &MatchContext<'_>) -> Vec<Suggestion> {
        let mut all = Vec::new();
        for generator in self.generators() {
            let produced = generator.candidates(field, context);
            tracing::trace!(
                field = %field.raw_name,
                method = %generator.method(),
                count = produced.len(),
                "candidates generated"
            );
            all.extend(produced);
        }
        all
    }

    /// Aggregated, filtered and ranked suggestions for one field.
    pub fn rank_field(
        &self,
        field: &DocumentField,
        context: &MatchContext<'_>,
        options: &SessionOptions,
    ) -> Vec<Suggestion> {
        let aggregated = aggregate(self.candidates(field, context));
        filter_and_rank(
            aggregated,
            options.min_confidence,
            options.max_results,
            self.catalog,
        )
    }

    /// One [`MappingResult`] per field, in input order, none accepted.
    pub fn suggest(
        &self,
        fields: &[DocumentField],
        document_type: &str,
        manufacturer: &ManufacturerId,
        history: &[HistoricalMapping],
        options: &SessionOptions,
    ) -> Vec<MappingResult> {
        let context = MatchContext::new(document_type, manufacturer, history);
        fields
            .iter()
            .map(|field| {
                MappingResult::new(field.clone(), self.rank_field(field, &context, options))
            })
            .collect()
    }
}
