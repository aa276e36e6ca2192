//! Confidence levels for reviewing ranked suggestions.

use serde::{Deserialize, Serialize};

/// Confidence level categories for suggestion quality.
///
/// - `High`: near-certain matches, candidates for caller auto-accept
/// - `Medium`: good matches that should be verified
/// - `Low`: weak matches requiring manual confirmation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boundaries between confidence levels.
///
/// - below `low`: no level
/// - `low` to `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - at or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for high-quality matches (default: 0.95).
    pub high: f32,
    /// Minimum confidence for medium-quality matches (default: 0.80).
    pub medium: f32,
    /// Minimum confidence for any level (default: 0.60).
    pub low: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.80,
            low: 0.60,
        }
    }
}

impl ConfidenceThresholds {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            high: 0.98,
            medium: 0.90,
            low: 0.75,
        }
    }

    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            high: 0.90,
            medium: 0.70,
            low: 0.50,
        }
    }

    /// Returns `None` if the score is below the low threshold.
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}
