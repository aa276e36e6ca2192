//! Fuzzy catalog search for manual mapping pickers.

use std::cmp::Ordering;

use fieldmap_standards::CanonicalCatalog;
use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;

/// Scores below this are not returned.
const MIN_SEARCH_SCORE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogMatch {
    pub key: String,
    pub label: String,
    pub score: f64,
}

/// Ranks catalog entries by Jaro-Winkler similarity of the query to their
/// key or label, whichever is closer. Substring hits score 1.0.
pub fn search_catalog(query: &str, catalog: &CanonicalCatalog, limit: usize) -> Vec<CatalogMatch> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let needle_key = needle.replace(' ', "_");

    let mut matches: Vec<(usize, CatalogMatch)> = catalog
        .iter()
        .enumerate()
        .filter_map(|(position, field)| {
            let label = field.label.to_lowercase();
            let score = if field.key.contains(&needle_key) || label.contains(&needle) {
                1.0
            } else {
                let by_key = jaro_winkler::similarity(needle_key.chars(), field.key.chars());
                let by_label = jaro_winkler::similarity(needle.chars(), label.chars());
                by_key.max(by_label)
            };
            (score >= MIN_SEARCH_SCORE).then(|| {
                (
                    position,
                    CatalogMatch {
                        key: field.key.clone(),
                        label: field.label.clone(),
                        score,
                    },
                )
            })
        })
        .collect();

    matches.sort_by(|(pa, a), (pb, b)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| pa.cmp(pb))
    });
    matches.truncate(limit);
    matches.into_iter().map(|(_, m)| m).collect()
}
