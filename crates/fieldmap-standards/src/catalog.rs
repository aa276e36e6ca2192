//! Canonical field catalog.
//!
//! An ordered, immutable registry of the data slots documents are mapped
//! onto. Insertion order is preserved and exposed through [`CanonicalCatalog::position`]
//! so rankings can break ties deterministically.

use std::collections::HashMap;

use fieldmap_model::{CanonicalField, FieldCategory};
use serde::Deserialize;

use crate::error::{Result, StandardsError};

#[derive(Debug, Clone, Default)]
pub struct CanonicalCatalog {
    fields: Vec<CanonicalField>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "field")]
    fields: Vec<CanonicalField>,
}

impl CanonicalCatalog {
    /// Builds a catalog, rejecting empty and duplicate keys.
    pub fn new(fields: Vec<CanonicalField>) -> Result<Self> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            let key = field.key.trim();
            if key.is_empty() {
                return Err(StandardsError::InvalidField {
                    key: field.key.clone(),
                    message: "key must not be empty".to_string(),
                });
            }
            if key != field.key {
                return Err(StandardsError::InvalidField {
                    key: field.key.clone(),
                    message: "key must not carry surrounding whitespace".to_string(),
                });
            }
            if index.insert(field.key.clone(), position).is_some() {
                return Err(StandardsError::DuplicateField {
                    key: field.key.clone(),
                });
            }
        }
        Ok(Self { fields, index })
    }

    /// Parses a `catalog.toml` document (`[[field]]` entries).
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(source).map_err(|e| StandardsError::toml("catalog", e))?;
        Self::new(file.fields)
    }

    pub fn get(&self, key: &str) -> Option<&CanonicalField> {
        self.index.get(key).map(|&idx| &self.fields[idx])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insertion position of a key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalField> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &[CanonicalField] {
        &self.fields
    }

    pub fn by_category(&self, category: FieldCategory) -> impl Iterator<Item = &CanonicalField> {
        self.fields.iter().filter(move |f| f.category == category)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
