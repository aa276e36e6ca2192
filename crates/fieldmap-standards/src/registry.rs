use std::path::Path;
use std::sync::LazyLock;

use serde::Serialize;

use crate::catalog::CanonicalCatalog;
use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::hash::sha256_hex;
use crate::paths::{CATALOG_FILE, CONTEXT_FILE, PATTERNS_FILE, standards_dir_override};
use crate::tables::{ContextTables, PatternRule, parse_context_tables, parse_pattern_table};

static EMBEDDED: LazyLock<std::result::Result<MatchingStandards, String>> = LazyLock::new(|| {
    MatchingStandards::from_sources(
        "embedded",
        embedded::CATALOG_TOML,
        embedded::PATTERNS_TOML,
        embedded::CONTEXT_TOML,
    )
    .map_err(|e| e.to_string())
});

/// Where one table came from and what it hashed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFingerprint {
    pub name: String,
    pub origin: String,
    pub sha256: String,
}

/// Catalog plus pattern and context tables, cross-validated.
///
/// Built once and shared read-only; every pattern and context target is
/// guaranteed to name a catalog key.
#[derive(Debug, Clone)]
pub struct MatchingStandards {
    catalog: CanonicalCatalog,
    patterns: Vec<PatternRule>,
    context: ContextTables,
    sources: Vec<SourceFingerprint>,
}

impl MatchingStandards {
    /// Assembles standards from already-parsed parts.
    pub fn new(
        catalog: CanonicalCatalog,
        patterns: Vec<PatternRule>,
        context: ContextTables,
    ) -> Result<Self> {
        if catalog.is_empty() {
            tracing::warn!("canonical catalog has no fields");
        }
        for rule in &patterns {
            ensure_target(&catalog, "patterns", &rule.target)?;
        }
        for (document_type, rules) in context.iter() {
            for rule in rules {
                ensure_target(&catalog, &format!("context[{document_type}]"), &rule.target)?;
            }
        }
        Ok(Self {
            catalog,
            patterns,
            context,
            sources: Vec::new(),
        })
    }

    /// Parses the three TOML documents and validates them together.
    pub fn from_sources(
        origin: &str,
        catalog: &str,
        patterns: &str,
        context: &str,
    ) -> Result<Self> {
        let mut standards = Self::new(
            CanonicalCatalog::from_toml_str(catalog)?,
            parse_pattern_table(patterns)?,
            parse_context_tables(context)?,
        )?;
        standards.sources = [
            (CATALOG_FILE, catalog),
            (PATTERNS_FILE, patterns),
            (CONTEXT_FILE, context),
        ]
        .into_iter()
        .map(|(name, contents)| SourceFingerprint {
            name: name.to_string(),
            origin: origin.to_string(),
            sha256: sha256_hex(contents.as_bytes()),
        })
        .collect();
        Ok(standards)
    }

    /// Loads `catalog.toml`, `patterns.toml` and `context.toml` from a directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| StandardsError::io(path, e))
        };
        let catalog = read(CATALOG_FILE)?;
        let patterns = read(PATTERNS_FILE)?;
        let context = read(CONTEXT_FILE)?;
        let standards =
            Self::from_sources(&dir.display().to_string(), &catalog, &patterns, &context)?;
        tracing::info!(
            dir = %dir.display(),
            fields = standards.catalog.len(),
            patterns = standards.patterns.len(),
            document_types = standards.context.len(),
            "loaded matching standards"
        );
        Ok(standards)
    }

    /// Tables compiled into the binary, parsed once per process.
    pub fn embedded() -> Result<&'static Self> {
        EMBEDDED.as_ref().map_err(|message| StandardsError::Embedded {
            message: message.clone(),
        })
    }

    /// Directory named by `FIELDMAP_STANDARDS_DIR` if set, embedded tables
    /// otherwise.
    pub fn load_default() -> Result<Self> {
        match standards_dir_override() {
            Some(dir) => Self::from_dir(&dir),
            None => {
                let standards = Self::embedded()?;
                tracing::debug!(
                    fields = standards.catalog.len(),
                    patterns = standards.patterns.len(),
                    "using embedded matching standards"
                );
                Ok(standards.clone())
            }
        }
    }

    pub fn catalog(&self) -> &CanonicalCatalog {
        &self.catalog
    }

    /// Pattern rules in declaration order.
    pub fn patterns(&self) -> &[PatternRule] {
        &self.patterns
    }

    pub fn context(&self) -> &ContextTables {
        &self.context
    }

    /// Fingerprints of the tables this instance was parsed from; empty when
    /// built with [`MatchingStandards::new`].
    pub fn sources(&self) -> &[SourceFingerprint] {
        &self.sources
    }
}

fn ensure_target(catalog: &CanonicalCatalog, table: &str, target: &str) -> Result<()> {
    if catalog.contains(target) {
        Ok(())
    } else {
        Err(StandardsError::UnknownTarget {
            table: table.to_string(),
            target: target.to_string(),
        })
    }
}
