//! Tables compiled into the binary.

pub const CATALOG_TOML: &str = include_str!("../data/catalog.toml");
pub const PATTERNS_TOML: &str = include_str!("../data/patterns.toml");
pub const CONTEXT_TOML: &str = include_str!("../data/context.toml");
