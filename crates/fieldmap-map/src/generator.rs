//! Seam shared by the candidate generators.

use fieldmap_model::{DocumentField, HistoricalMapping, ManufacturerId, MatchMethod, Suggestion};

/// Per-session inputs a generator may consult besides the field itself.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub document_type: &'a str,
    pub manufacturer: &'a ManufacturerId,
    pub history: &'a [HistoricalMapping],
}

impl<'a> MatchContext<'a> {
    pub fn new(
        document_type: &'a str,
        manufacturer: &'a ManufacturerId,
        history: &'a [HistoricalMapping],
    ) -> Self {
        Self {
            document_type,
            manufacturer,
            history,
        }
    }
}

/// One independent strategy proposing canonical targets for a field.
///
/// Generators never fail: a field with no plausible target yields an empty
/// vector. Every emitted suggestion carries exactly one method, the
/// generator's own.
pub trait CandidateGenerator {
    fn method(&self) -> MatchMethod;

    fn candidates(&self, field: &DocumentField, context: &MatchContext<'_>) -> Vec<Suggestion>;
}
