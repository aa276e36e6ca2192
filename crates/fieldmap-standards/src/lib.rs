#![deny(unsafe_code)]

//! Canonical field catalog and the pattern/context tables matched against it.

pub mod catalog;
pub mod doctor;
pub mod embedded;
pub mod error;
pub mod hash;
pub mod paths;
pub mod registry;
pub mod tables;

pub use crate::catalog::CanonicalCatalog;
pub use crate::doctor::{DoctorCounts, DoctorReport};
pub use crate::error::StandardsError;
pub use crate::paths::STANDARDS_ENV_VAR;
pub use crate::registry::{MatchingStandards, SourceFingerprint};
pub use crate::tables::{ContextRule, ContextTables, PatternRule};
