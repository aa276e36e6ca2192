use std::collections::BTreeMap;

use fieldmap_model::FieldCategory;

use crate::registry::{MatchingStandards, SourceFingerprint};

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub sources: Vec<SourceFingerprint>,
    pub counts: DoctorCounts,
    pub document_types: Vec<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub canonical_fields: usize,
    /// Fields per category, only categories that have fields.
    pub categories: BTreeMap<String, usize>,
    pub pattern_rules: usize,
    pub context_tables: usize,
    pub context_rules: usize,
}

impl DoctorReport {
    pub fn from_standards(standards: &MatchingStandards) -> Self {
        let catalog = standards.catalog();
        let categories = FieldCategory::ALL
            .iter()
            .map(|category| (category.to_string(), catalog.by_category(*category).count()))
            .filter(|(_, count)| *count > 0)
            .collect();
        let context = standards.context();
        Self {
            schema: "fieldmap.standards-doctor".to_string(),
            schema_version: 1,
            sources: standards.sources().to_vec(),
            counts: DoctorCounts {
                canonical_fields: catalog.len(),
                categories,
                pattern_rules: standards.patterns().len(),
                context_tables: context.len(),
                context_rules: context.iter().map(|(_, rules)| rules.len()).sum(),
            },
            document_types: context.document_types().map(str::to_string).collect(),
        }
    }
}
