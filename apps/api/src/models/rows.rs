use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::skill::{CandidateSkill, ProficiencyLevel, SkillRequirement};

/// `profile_skills` joined with `skills.slug`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileSkillRow {
    pub profile_id: i64,
    pub skill_slug: String,
    pub level: String,
    pub years_experience: f64,
}

/// `job_skills` joined with `skills.slug`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSkillRow {
    pub job_id: i64,
    pub skill_slug: String,
    pub importance: f64,
    pub is_required: bool,
}

impl TryFrom<ProfileSkillRow> for CandidateSkill {
    type Error = AppError;

    fn try_from(row: ProfileSkillRow) -> Result<Self, Self::Error> {
        let proficiency_level = row.level.parse::<ProficiencyLevel>().map_err(|_| {
            AppError::validation(
                "proficiency_level",
                format!(
                    "profile {} skill '{}' has unknown level '{}'",
                    row.profile_id, row.skill_slug, row.level
                ),
            )
        })?;
        Ok(CandidateSkill {
            skill_id: row.skill_slug,
            proficiency_level,
            years_experience: row.years_experience,
        })
    }
}

impl From<JobSkillRow> for SkillRequirement {
    fn from(row: JobSkillRow) -> Self {
        SkillRequirement {
            skill_id: row.skill_slug,
            importance: row.importance,
            required: row.is_required,
        }
    }
}
