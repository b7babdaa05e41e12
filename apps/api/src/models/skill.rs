use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub type CandidateId = i64;
pub type JobId = i64;

/// Ordinal proficiency rating. Variant order is significant: `Beginner < Expert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 4] = [
        ProficiencyLevel::Beginner,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
        ProficiencyLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "beginner",
            ProficiencyLevel::Intermediate => "intermediate",
            ProficiencyLevel::Advanced => "advanced",
            ProficiencyLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ProficiencyLevel::Beginner),
            "intermediate" => Ok(ProficiencyLevel::Intermediate),
            "advanced" => Ok(ProficiencyLevel::Advanced),
            "expert" => Ok(ProficiencyLevel::Expert),
            other => Err(AppError::validation(
                "proficiency_level",
                format!("unknown proficiency level '{other}'"),
            )),
        }
    }
}

/// One skill a job asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill_id: String,
    /// Weight in (0.0, 1.0]. Not a probability; need not sum to 1 across a job.
    pub importance: f64,
    pub required: bool,
}

/// One skill a candidate holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub skill_id: String,
    pub proficiency_level: ProficiencyLevel,
    pub years_experience: f64,
}

/// Read-only snapshot of a candidate's skills. Order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub skills: Vec<CandidateSkill>,
}

impl SkillProfile {
    pub fn new(skills: Vec<CandidateSkill>) -> Self {
        Self { skills }
    }
}

/// Read-only snapshot of a job's skill requirements. Order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirementSet {
    pub requirements: Vec<SkillRequirement>,
}

impl JobRequirementSet {
    pub fn new(requirements: Vec<SkillRequirement>) -> Self {
        Self { requirements }
    }

    pub fn required_count(&self) -> usize {
        self.requirements.iter().filter(|r| r.required).count()
    }
}
