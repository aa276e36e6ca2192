//! Pattern and document-type context tables.
//!
//! Both tables are plain lists of immutable records. They are parsed from
//! TOML, checked for well-formed confidences and compiled once; references to
//! the catalog are checked by [`crate::MatchingStandards`].

use std::collections::BTreeMap;

use fieldmap_model::compact;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{Result, StandardsError};

/// Regex rule over the normalized field name.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Source text of the pattern, echoed in suggestion reasons.
    pub pattern: String,
    pub target: String,
    pub confidence: f32,
    regex: Regex,
}

impl PatternRule {
    /// Compiles a rule; patterns are case-insensitive.
    pub fn new(pattern: impl Into<String>, target: impl Into<String>, confidence: f32) -> Result<Self> {
        let pattern = pattern.into();
        let target = target.into();
        check_confidence("patterns", &target, confidence)?;
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| StandardsError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            pattern,
            target,
            confidence,
            regex,
        })
    }

    pub fn is_match(&self, normalized_name: &str) -> bool {
        self.regex.is_match(normalized_name)
    }
}

/// Substring rule that applies within one document type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContextRule {
    pub contains: String,
    pub target: String,
    pub confidence: f32,
}

impl ContextRule {
    /// True if the compacted field name contains the compacted rule text.
    pub fn applies_to(&self, compact_name: &str) -> bool {
        let needle = compact(&self.contains);
        !needle.is_empty() && compact_name.contains(&needle)
    }
}

/// Context rules keyed by lowercase document type.
#[derive(Debug, Clone, Default)]
pub struct ContextTables {
    tables: BTreeMap<String, Vec<ContextRule>>,
}

impl ContextTables {
    pub fn new(tables: BTreeMap<String, Vec<ContextRule>>) -> Result<Self> {
        let mut normalized = BTreeMap::new();
        for (document_type, rules) in tables {
            let key = document_type.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(StandardsError::InvalidContextTable {
                    message: "document_type must not be empty".to_string(),
                });
            }
            for rule in &rules {
                check_confidence(&format!("context[{key}]"), &rule.target, rule.confidence)?;
                if compact(&rule.contains).is_empty() {
                    return Err(StandardsError::InvalidContextTable {
                        message: format!("rule for '{}' in {key} has no alphanumeric text", rule.target),
                    });
                }
            }
            if normalized.insert(key.clone(), rules).is_some() {
                return Err(StandardsError::InvalidContextTable {
                    message: format!("duplicate document_type: {key}"),
                });
            }
        }
        Ok(Self { tables: normalized })
    }

    /// Rules for a document type; `None` when the type has no table.
    pub fn rules_for(&self, document_type: &str) -> Option<&[ContextRule]> {
        self.tables
            .get(&document_type.trim().to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    pub fn document_types(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ContextRule])> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    #[serde(default, rename = "rule")]
    rules: Vec<PatternRuleDef>,
}

#[derive(Debug, Deserialize)]
struct PatternRuleDef {
    pattern: String,
    target: String,
    confidence: f32,
}

#[derive(Debug, Deserialize)]
struct ContextFile {
    #[serde(default, rename = "table")]
    tables: Vec<ContextTableDef>,
}

#[derive(Debug, Deserialize)]
struct ContextTableDef {
    document_type: String,
    #[serde(default, rename = "rule")]
    rules: Vec<ContextRule>,
}

/// Parses and compiles a `patterns.toml` document, preserving rule order.
pub fn parse_pattern_table(source: &str) -> Result<Vec<PatternRule>> {
    let file: PatternFile =
        toml::from_str(source).map_err(|e| StandardsError::toml("patterns", e))?;
    file.rules
        .into_iter()
        .map(|def| PatternRule::new(def.pattern, def.target, def.confidence))
        .collect()
}

/// Parses a `context.toml` document.
pub fn parse_context_tables(source: &str) -> Result<ContextTables> {
    let file: ContextFile =
        toml::from_str(source).map_err(|e| StandardsError::toml("context", e))?;
    let mut tables = BTreeMap::new();
    for def in file.tables {
        let key = def.document_type.trim().to_ascii_lowercase();
        if tables.insert(key.clone(), def.rules).is_some() {
            return Err(StandardsError::InvalidContextTable {
                message: format!("duplicate document_type: {key}"),
            });
        }
    }
    ContextTables::new(tables)
}

fn check_confidence(table: &str, target: &str, confidence: f32) -> Result<()> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(StandardsError::InvalidConfidence {
            table: table.to_string(),
            target: target.to_string(),
            confidence,
        })
    }
}
