//! Input shape checks. Every failure names the offending field so callers can
//! surface it unchanged.

use std::collections::HashSet;

use crate::errors::AppError;
use crate::models::skill::{JobRequirementSet, SkillProfile};

/// Rejects empty ids, importance outside (0, 1], and duplicate skill ids.
pub fn validate_requirements(requirements: &JobRequirementSet) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(requirements.requirements.len());

    for req in &requirements.requirements {
        if req.skill_id.trim().is_empty() {
            return Err(AppError::validation("skill_id", "skill_id cannot be empty"));
        }
        if !req.importance.is_finite() || req.importance <= 0.0 || req.importance > 1.0 {
            return Err(AppError::validation(
                "importance",
                format!(
                    "importance for '{}' must be in (0, 1], got {}",
                    req.skill_id, req.importance
                ),
            ));
        }
        if !seen.insert(req.skill_id.as_str()) {
            return Err(AppError::validation(
                "skill_id",
                format!("duplicate requirement for skill '{}'", req.skill_id),
            ));
        }
    }

    Ok(())
}

/// Rejects empty ids, negative or non-finite experience, and duplicate skill ids.
///
/// Proficiency levels are already constrained by `ProficiencyLevel`; unknown
/// strings are rejected where rows are converted.
pub fn validate_profile(profile: &SkillProfile) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(profile.skills.len());

    for skill in &profile.skills {
        if skill.skill_id.trim().is_empty() {
            return Err(AppError::validation("skill_id", "skill_id cannot be empty"));
        }
        if !skill.years_experience.is_finite() || skill.years_experience < 0.0 {
            return Err(AppError::validation(
                "years_experience",
                format!(
                    "years_experience for '{}' must be >= 0, got {}",
                    skill.skill_id, skill.years_experience
                ),
            ));
        }
        if !seen.insert(skill.skill_id.as_str()) {
            return Err(AppError::validation(
                "skill_id",
                format!("duplicate profile entry for skill '{}'", skill.skill_id),
            ));
        }
    }

    Ok(())
}
