use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Knobs for the scoring function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// When false, preferred (`required = false`) skills still add to the
    /// numerator if held but never to the denominator.
    pub preferred_in_denominator: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            preferred_in_denominator: true,
        }
    }
}

/// Threshold pairing that decides when a held skill counts as underleveled.
///
/// A skill is underleveled when `skill_value < max_skill_value` AND the
/// requirement's `importance >= min_importance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapPolicy {
    pub max_skill_value: f64,
    pub min_importance: f64,
}

impl Default for GapPolicy {
    fn default() -> Self {
        Self {
            max_skill_value: 0.5,
            min_importance: 0.5,
        }
    }
}

/// Everything the orchestrator needs, handed over at construction.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub scoring: ScoringPolicy,
    pub gap: GapPolicy,
    /// Upper bound on each profile/job store call.
    pub fetch_timeout: Duration,
    pub default_limit: usize,
    pub max_limit: usize,
    pub default_min_score: f64,
    /// Fail ComputeScore with `DegenerateInput` instead of returning a flagged zero.
    pub reject_degenerate: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringPolicy::default(),
            gap: GapPolicy::default(),
            fetch_timeout: Duration::from_millis(5_000),
            default_limit: 50,
            max_limit: 500,
            default_min_score: 0.3,
            reject_degenerate: false,
        }
    }
}
