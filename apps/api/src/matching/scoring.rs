//! Scoring function — weighted skill overlap between one profile and one job.
//!
//! `skill_value = level_weight(level) + ln(1 + years) * 0.15`, uncapped, so an
//! expert with long experience can push the final score slightly above 1.0.
//! That bound is intentional and must not be clamped here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::policy::ScoringPolicy;
use crate::matching::validation::{validate_profile, validate_requirements};
use crate::models::skill::{CandidateSkill, JobRequirementSet, ProficiencyLevel, SkillProfile};

/// Multiplier on `ln(1 + years_experience)`.
pub const EXPERIENCE_FACTOR: f64 = 0.15;

/// Numeric anchor for each proficiency level. These values are part of the
/// published scoring contract.
pub fn level_weight(level: ProficiencyLevel) -> f64 {
    match level {
        ProficiencyLevel::Beginner => 0.25,
        ProficiencyLevel::Intermediate => 0.5,
        ProficiencyLevel::Advanced => 0.75,
        ProficiencyLevel::Expert => 1.0,
    }
}

/// Derived value of one held skill. Monotone non-decreasing in `years_experience`.
pub fn skill_value(level: ProficiencyLevel, years_experience: f64) -> f64 {
    level_weight(level) + years_experience.ln_1p() * EXPERIENCE_FACTOR
}

/// Score of one profile against one job, before ids are attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    pub score: f64,
    /// Requirements (required or preferred) the candidate holds.
    pub matched_skill_count: usize,
    /// Requirements flagged `required = true`.
    pub total_required_count: usize,
    /// Required requirements the candidate holds.
    pub required_matched_count: usize,
    /// The job carried zero total importance; `score` is 0 by definition.
    pub degenerate: bool,
}

impl PairScore {
    pub fn into_result(self, subject_id: i64, target_id: i64) -> MatchResult {
        MatchResult {
            subject_id,
            target_id,
            score: self.score,
            matched_skill_count: self.matched_skill_count,
            total_required_count: self.total_required_count,
            required_matched_count: self.required_matched_count,
            degenerate: self.degenerate,
        }
    }
}

/// Immutable, explainable result for one subject/target pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub subject_id: i64,
    pub target_id: i64,
    pub score: f64,
    pub matched_skill_count: usize,
    pub total_required_count: usize,
    pub required_matched_count: usize,
    pub degenerate: bool,
}

impl MatchResult {
    pub fn has_all_required(&self) -> bool {
        self.required_matched_count == self.total_required_count
    }
}

/// Validates both inputs, then scores. Duplicate skill ids on either side are
/// rejected rather than summed.
pub fn score(
    profile: &SkillProfile,
    requirements: &JobRequirementSet,
    policy: &ScoringPolicy,
) -> Result<PairScore, AppError> {
    validate_requirements(requirements)?;
    validate_profile(profile)?;
    Ok(compute_score(&index_profile(profile), requirements, policy))
}

/// Indexes a profile by skill id for O(1) lookups per requirement.
pub(crate) fn index_profile(profile: &SkillProfile) -> HashMap<&str, &CandidateSkill> {
    profile
        .skills
        .iter()
        .map(|s| (s.skill_id.as_str(), s))
        .collect()
}

/// Arithmetic core. Inputs must already be validated.
pub(crate) fn compute_score(
    skills: &HashMap<&str, &CandidateSkill>,
    requirements: &JobRequirementSet,
    policy: &ScoringPolicy,
) -> PairScore {
    let mut numerator = 0.0_f64;
    let mut denominator = 0.0_f64;
    let mut matched_skill_count = 0;
    let mut required_matched_count = 0;

    for req in &requirements.requirements {
        if req.required || policy.preferred_in_denominator {
            denominator += req.importance;
        }

        if let Some(held) = skills.get(req.skill_id.as_str()) {
            numerator += req.importance * skill_value(held.proficiency_level, held.years_experience);
            matched_skill_count += 1;
            if req.required {
                required_matched_count += 1;
            }
        }
    }

    let total_required_count = requirements.required_count();

    if denominator <= 0.0 {
        return PairScore {
            score: 0.0,
            matched_skill_count,
            total_required_count,
            required_matched_count,
            degenerate: true,
        };
    }

    PairScore {
        score: numerator / denominator,
        matched_skill_count,
        total_required_count,
        required_matched_count,
        degenerate: false,
    }
}
