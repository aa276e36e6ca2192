//! File-backed history of accepted mappings.
//!
//! Each `(manufacturer, document type)` scope is stored as one JSON file
//! named `{manufacturer}_{document_type}.json` under the base directory.
//! Both components are percent-escaped so distinct scopes never share a file,
//! even on case-insensitive file systems. The store is append-only: accepted
//! mappings are added, never rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldmap_model::{HistoricalMapping, HistoryScope, ManufacturerId};

const STORE_VERSION: &str = "1.0";

/// On-disk layout of one scope file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredHistory {
    pub manufacturer: ManufacturerId,
    pub document_type: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mappings: Vec<HistoricalMapping>,
}

fn default_version() -> String {
    STORE_VERSION.to_string()
}

impl StoredHistory {
    fn empty(scope: &HistoryScope) -> Self {
        Self {
            manufacturer: scope.manufacturer.clone(),
            document_type: scope.document_type.clone(),
            version: default_version(),
            updated_at: None,
            mappings: Vec::new(),
        }
    }
}

/// Summary of one stored scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMetadata {
    pub manufacturer: ManufacturerId,
    pub document_type: String,
    pub file_path: PathBuf,
    pub mapping_count: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct HistoryRepository {
    base_dir: PathBuf,
}

impl HistoryRepository {
    /// Opens a repository, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("Failed to create history directory: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Mappings recorded for the scope. A missing file is an empty history.
    pub fn load(&self, scope: &HistoryScope) -> Result<Vec<HistoricalMapping>> {
        Ok(self
            .load_stored(scope)?
            .map(|stored| stored.mappings)
            .unwrap_or_default())
    }

    pub fn load_stored(&self, scope: &HistoryScope) -> Result<Option<StoredHistory>> {
        let path = self.scope_path(scope);
        if !path.exists() {
            return Ok(None);
        }
        let stored = read_stored(&path)?;
        if !scope.matches(&stored.manufacturer, &stored.document_type) {
            anyhow::bail!(
                "history file {} holds {}/{}, expected {}/{}",
                path.display(),
                stored.manufacturer,
                stored.document_type,
                scope.manufacturer,
                scope.document_type
            );
        }
        Ok(Some(stored))
    }

    /// Appends one mapping to its scope file and returns the file path.
    pub fn append(&self, mapping: HistoricalMapping) -> Result<PathBuf> {
        self.append_all(vec![mapping])
    }

    /// Appends mappings that all share one scope.
    pub fn append_all(&self, mappings: Vec<HistoricalMapping>) -> Result<PathBuf> {
        let Some(first) = mappings.first() else {
            anyhow::bail!("no mappings to append");
        };
        let scope = first.scope.clone();
        if let Some(other) = mappings.iter().find(|m| !same_scope(&m.scope, &scope)) {
            anyhow::bail!(
                "mapping for '{}' belongs to {}/{}, expected {}/{}",
                other.raw_name,
                other.scope.manufacturer,
                other.scope.document_type,
                scope.manufacturer,
                scope.document_type
            );
        }

        let path = self.scope_path(&scope);
        let mut stored = self
            .load_stored(&scope)?
            .unwrap_or_else(|| StoredHistory::empty(&scope));
        let added = mappings.len();
        stored.mappings.extend(mappings);
        stored.updated_at = Some(Utc::now());

        let json = serde_json::to_string_pretty(&stored)
            .with_context(|| format!("Failed to serialize history for {}", path.display()))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            added,
            total = stored.mappings.len(),
            "appended history"
        );
        Ok(path)
    }

    /// All stored scopes, sorted by manufacturer then document type.
    ///
    /// Files that do not parse as history are skipped with a warning.
    pub fn list(&self) -> Result<Vec<HistoryMetadata>> {
        let mut metadata = Vec::new();
        let entries = fs::read_dir(&self.base_dir).with_context(|| {
            format!("Failed to read history directory: {}", self.base_dir.display())
        })?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_stored(&path) {
                Ok(stored) => metadata.push(HistoryMetadata {
                    manufacturer: stored.manufacturer,
                    document_type: stored.document_type,
                    mapping_count: stored.mappings.len(),
                    updated_at: stored.updated_at,
                    file_path: path,
                }),
                Err(error) => tracing::warn!(%error, "skipping unreadable history file"),
            }
        }
        metadata.sort_by(|a, b| {
            a.manufacturer
                .cmp(&b.manufacturer)
                .then_with(|| a.document_type.cmp(&b.document_type))
        });
        Ok(metadata)
    }

    pub fn exists(&self, scope: &HistoryScope) -> bool {
        self.scope_path(scope).exists()
    }

    fn scope_path(&self, scope: &HistoryScope) -> PathBuf {
        self.base_dir.join(format!(
            "{}_{}.json",
            escape_component(scope.manufacturer.as_str()),
            escape_component(&scope.document_type.to_ascii_lowercase())
        ))
    }
}

fn read_stored(path: &Path) -> Result<StoredHistory> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse history from {}", path.display()))
}

fn same_scope(a: &HistoryScope, b: &HistoryScope) -> bool {
    a.matches(&b.manufacturer, &b.document_type)
}

/// Percent-escapes every byte outside `[a-z0-9-]`, so `_` can separate
/// components and names differing only in case stay distinct.
fn escape_component(id: &str) -> String {
    let mut escaped = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}
