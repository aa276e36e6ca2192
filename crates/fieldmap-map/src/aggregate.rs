//! Suggestion Aggregator: merge per target, filter, rank.

use std::cmp::Ordering;

use fieldmap_model::Suggestion;
use fieldmap_standards::CanonicalCatalog;

/// Merges suggestions that share a target.
///
/// Groups keep first-seen order. A group's confidence is the maximum of its
/// members, its methods the union and its reasons the order-preserving
/// de-duplicated concatenation.
pub fn aggregate(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut combined: Vec<Suggestion> = Vec::new();
    for suggestion in suggestions {
        match combined.iter_mut().find(|s| s.target == suggestion.target) {
            Some(existing) => merge_into(existing, suggestion),
            None => combined.push(suggestion),
        }
    }
    combined
}

fn merge_into(existing: &mut Suggestion, incoming: Suggestion) {
    if incoming.confidence > existing.confidence {
        existing.confidence = incoming.confidence;
    }
    existing.methods.extend(incoming.methods);
    for reason in incoming.reasons {
        if !existing.reasons.contains(&reason) {
            existing.reasons.push(reason);
        }
    }
}

/// Drops suggestions below `min_confidence`, ranks and truncates.
///
/// Ranking is descending confidence, then more contributing methods, then
/// catalog insertion order, then target key.
pub fn filter_and_rank(
    aggregated: Vec<Suggestion>,
    min_confidence: f32,
    max_results: usize,
    catalog: &CanonicalCatalog,
) -> Vec<Suggestion> {
    let mut ranked: Vec<Suggestion> = aggregated
        .into_iter()
        .filter(|s| s.confidence >= min_confidence)
        .collect();
    ranked.sort_by(|a, b| compare_ranked(a, b, catalog));
    ranked.truncate(max_results);
    ranked
}

fn compare_ranked(a: &Suggestion, b: &Suggestion, catalog: &CanonicalCatalog) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.method_count().cmp(&a.method_count()))
        .then_with(|| {
            let pa = catalog.position(&a.target).unwrap_or(usize::MAX);
            let pb = catalog.position(&b.target).unwrap_or(usize::MAX);
            pa.cmp(&pb)
        })
        .then_with(|| a.target.cmp(&b.target))
}

#[cfg(test)]
mod tests {
    use fieldmap_model::{CanonicalField, FieldCategory, MatchMethod, ValueType};

    use super::*;

    fn suggestion(target: &str, confidence: f32, method: MatchMethod, reason: &str) -> Suggestion {
        Suggestion::new(target, confidence, method, reason, ValueType::Text)
    }

    fn catalog() -> CanonicalCatalog {
        let field = |key: &str| CanonicalField::new(key, FieldCategory::Patient, key, ValueType::Text);
        CanonicalCatalog::new(vec![field("a"), field("b"), field("c")]).expect("catalog")
    }

    #[test]
    fn merges_by_target_with_max_confidence() {
        let merged = aggregate(vec![
            suggestion("a", 0.6, MatchMethod::Pattern, "pattern"),
            suggestion("b", 0.7, MatchMethod::Similarity, "similar"),
            suggestion("a", 0.85, MatchMethod::Context, "context"),
            suggestion("a", 0.5, MatchMethod::Pattern, "pattern"),
        ]);
        assert_eq!(merged.len(), 2);
        let a = &merged[0];
        assert_eq!(a.target, "a");
        assert_eq!(a.confidence, 0.85);
        assert_eq!(a.method_count(), 2);
        assert_eq!(a.reason(), "pattern + context");
    }

    #[test]
    fn no_bonus_for_multiple_methods() {
        let merged = aggregate(vec![
            suggestion("a", 0.6, MatchMethod::Pattern, "p"),
            suggestion("a", 0.6, MatchMethod::Similarity, "s"),
        ]);
        assert_eq!(merged[0].confidence, 0.6);
    }

    #[test]
    fn filters_below_threshold_inclusive() {
        let ranked = filter_and_rank(
            vec![
                suggestion("a", 0.5, MatchMethod::Pattern, "p"),
                suggestion("b", 0.49, MatchMethod::Pattern, "p"),
            ],
            0.5,
            5,
            &catalog(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].target, "a");
    }

    #[test]
    fn ties_break_on_methods_then_catalog_order() {
        let mut corroborated = suggestion("c", 0.7, MatchMethod::Pattern, "p");
        corroborated.methods.insert(MatchMethod::Context);
        let ranked = filter_and_rank(
            vec![
                suggestion("b", 0.7, MatchMethod::Pattern, "p"),
                suggestion("a", 0.7, MatchMethod::Pattern, "p"),
                corroborated,
            ],
            0.0,
            10,
            &catalog(),
        );
        let order: Vec<&str> = ranked.iter().map(|s| s.target.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn truncates_to_max_results() {
        let ranked = filter_and_rank(
            vec![
                suggestion("a", 0.9, MatchMethod::Pattern, "p"),
                suggestion("b", 0.8, MatchMethod::Pattern, "p"),
                suggestion("c", 0.7, MatchMethod::Pattern, "p"),
            ],
            0.0,
            2,
            &catalog(),
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].target, "b");
    }
}
