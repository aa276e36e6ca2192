//! Standards directory resolution.

use std::path::PathBuf;

/// Environment variable pointing at a directory that overrides the embedded
/// tables.
pub const STANDARDS_ENV_VAR: &str = "FIELDMAP_STANDARDS_DIR";

pub const CATALOG_FILE: &str = "catalog.toml";
pub const PATTERNS_FILE: &str = "patterns.toml";
pub const CONTEXT_FILE: &str = "context.toml";

/// Override directory from [`STANDARDS_ENV_VAR`], if set and non-empty.
pub fn standards_dir_override() -> Option<PathBuf> {
    std::env::var_os(STANDARDS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
