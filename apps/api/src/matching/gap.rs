//! Gap analyzer — what a candidate lacks, or holds too weakly, for one job.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::policy::{GapPolicy, ScoringPolicy};
use crate::matching::scoring::{compute_score, index_profile, level_weight, skill_value};
use crate::matching::validation::{validate_profile, validate_requirements};
use crate::models::skill::{CandidateId, JobId, JobRequirementSet, ProficiencyLevel, SkillProfile};

/// A held skill whose value falls below the gap threshold on an important requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderleveledSkill {
    pub skill_id: String,
    /// Lowest level that would clear the threshold at the candidate's current years.
    pub required_level_hint: ProficiencyLevel,
    pub actual_level: ProficiencyLevel,
    pub years_experience: f64,
    pub skill_value: f64,
    /// Skill value still needed to reach the threshold.
    pub value_delta: f64,
}

/// A requirement the candidate holds, with the value it contributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub skill_id: String,
    pub importance: f64,
    pub required: bool,
    pub candidate_level: ProficiencyLevel,
    pub years_experience: f64,
    pub skill_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    /// Required skills absent from the profile.
    pub missing: BTreeSet<String>,
    /// Preferred skills absent from the profile. Never part of `missing`.
    pub missing_preferred: BTreeSet<String>,
    pub underleveled: Vec<UnderleveledSkill>,
    pub matched: Vec<MatchedSkill>,
    pub match_score: f64,
    /// The job's total importance is zero, so `match_score` carries no signal.
    pub degenerate: bool,
}

pub fn analyze_gap(
    candidate_id: CandidateId,
    profile: &SkillProfile,
    job_id: JobId,
    requirements: &JobRequirementSet,
    gap_policy: &GapPolicy,
    scoring_policy: &ScoringPolicy,
) -> Result<GapReport, AppError> {
    validate_requirements(requirements)?;
    validate_profile(profile)?;

    let skills = index_profile(profile);

    let mut missing = BTreeSet::new();
    let mut missing_preferred = BTreeSet::new();
    let mut underleveled = Vec::new();
    let mut matched = Vec::new();

    for req in &requirements.requirements {
        let Some(held) = skills.get(req.skill_id.as_str()) else {
            if req.required {
                missing.insert(req.skill_id.clone());
            } else {
                missing_preferred.insert(req.skill_id.clone());
            }
            continue;
        };

        let value = skill_value(held.proficiency_level, held.years_experience);
        matched.push(MatchedSkill {
            skill_id: req.skill_id.clone(),
            importance: req.importance,
            required: req.required,
            candidate_level: held.proficiency_level,
            years_experience: held.years_experience,
            skill_value: value,
        });

        if value < gap_policy.max_skill_value && req.importance >= gap_policy.min_importance {
            underleveled.push(UnderleveledSkill {
                skill_id: req.skill_id.clone(),
                required_level_hint: level_hint(held.years_experience, gap_policy.max_skill_value),
                actual_level: held.proficiency_level,
                years_experience: held.years_experience,
                skill_value: value,
                value_delta: gap_policy.max_skill_value - value,
            });
        }
    }

    underleveled.sort_by(|a, b| a.skill_id.cmp(&b.skill_id));
    matched.sort_by(|a, b| a.skill_id.cmp(&b.skill_id));

    let pair = compute_score(&skills, requirements, scoring_policy);

    Ok(GapReport {
        job_id,
        candidate_id,
        missing,
        missing_preferred,
        underleveled,
        matched,
        match_score: pair.score,
        degenerate: pair.degenerate,
    })
}

/// Lowest level whose value, at `years_experience`, reaches `threshold`.
/// Falls back to `Expert` when no level does.
fn level_hint(years_experience: f64, threshold: f64) -> ProficiencyLevel {
    let bonus = skill_value(ProficiencyLevel::Beginner, years_experience)
        - level_weight(ProficiencyLevel::Beginner);
    ProficiencyLevel::ALL
        .into_iter()
        .find(|level| level_weight(*level) + bonus >= threshold)
        .unwrap_or(ProficiencyLevel::Expert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skill::{CandidateSkill, SkillRequirement};

    fn req(id: &str, importance: f64, required: bool) -> SkillRequirement {
        SkillRequirement {
            skill_id: id.to_string(),
            importance,
            required,
        }
    }

    fn held(id: &str, level: ProficiencyLevel, years: f64) -> CandidateSkill {
        CandidateSkill {
            skill_id: id.to_string(),
            proficiency_level: level,
            years_experience: years,
        }
    }

    fn run(profile: &SkillProfile, requirements: &JobRequirementSet) -> GapReport {
        analyze_gap(
            1,
            profile,
            2,
            requirements,
            &GapPolicy::default(),
            &ScoringPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_preferred_not_reported_as_missing() {
        let requirements =
            JobRequirementSet::new(vec![req("a", 1.0, true), req("b", 0.5, false)]);
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Advanced, 3.0)]);

        let report = run(&profile, &requirements);
        assert!(report.missing.is_empty());
        assert!(report.underleveled.is_empty());
        assert!(report.missing_preferred.contains("b"));
        assert!((report.match_score - 0.639).abs() < 0.001);
    }

    #[test]
    fn test_missing_required_reported() {
        let requirements = JobRequirementSet::new(vec![req("a", 1.0, true), req("c", 0.2, true)]);
        let report = run(&SkillProfile::default(), &requirements);
        let missing: Vec<&str> = report.missing.iter().map(String::as_str).collect();
        assert_eq!(missing, vec!["a", "c"]);
        assert_eq!(report.match_score, 0.0);
    }

    #[test]
    fn test_beginner_on_important_skill_is_underleveled() {
        let requirements = JobRequirementSet::new(vec![req("a", 0.8, true)]);
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Beginner, 0.0)]);

        let report = run(&profile, &requirements);
        assert_eq!(report.underleveled.len(), 1);
        let gap = &report.underleveled[0];
        assert_eq!(gap.actual_level, ProficiencyLevel::Beginner);
        assert_eq!(gap.required_level_hint, ProficiencyLevel::Intermediate);
        assert!((gap.value_delta - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_low_importance_skill_never_underleveled() {
        let requirements = JobRequirementSet::new(vec![req("a", 0.49, true)]);
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Beginner, 0.0)]);
        assert!(run(&profile, &requirements).underleveled.is_empty());
    }

    #[test]
    fn test_importance_threshold_is_inclusive() {
        let requirements = JobRequirementSet::new(vec![req("a", 0.5, false)]);
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Beginner, 0.0)]);
        assert_eq!(run(&profile, &requirements).underleveled.len(), 1);
    }

    #[test]
    fn test_preferred_skill_can_be_underleveled() {
        let requirements = JobRequirementSet::new(vec![req("a", 0.9, false)]);
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Beginner, 0.5)]);
        let report = run(&profile, &requirements);
        assert!(report.missing.is_empty());
        assert_eq!(report.underleveled.len(), 1);
    }

    #[test]
    fn test_experience_lifts_beginner_out_of_gap() {
        // 0.25 + ln(6) * 0.15 ≈ 0.519
        let requirements = JobRequirementSet::new(vec![req("a", 1.0, true)]);
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Beginner, 5.0)]);
        assert!(run(&profile, &requirements).underleveled.is_empty());
    }

    #[test]
    fn test_custom_policy_threshold() {
        let requirements = JobRequirementSet::new(vec![req("a", 1.0, true)]);
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Intermediate, 0.0)]);
        let policy = GapPolicy {
            max_skill_value: 0.8,
            min_importance: 0.5,
        };
        let report = analyze_gap(
            1,
            &profile,
            2,
            &requirements,
            &policy,
            &ScoringPolicy::default(),
        )
        .unwrap();
        assert_eq!(report.underleveled.len(), 1);
        assert_eq!(report.underleveled[0].required_level_hint, ProficiencyLevel::Expert);
    }

    #[test]
    fn test_expert_everywhere_has_no_gaps() {
        let requirements = JobRequirementSet::new(vec![
            req("a", 1.0, true),
            req("b", 0.7, true),
            req("c", 0.5, false),
        ]);
        let profile = SkillProfile::new(vec![
            held("a", ProficiencyLevel::Expert, 8.0),
            held("b", ProficiencyLevel::Expert, 8.0),
            held("c", ProficiencyLevel::Expert, 8.0),
        ]);
        let report = run(&profile, &requirements);
        assert!(report.missing.is_empty());
        assert!(report.underleveled.is_empty());
        assert_eq!(report.matched.len(), 3);
    }

    #[test]
    fn test_duplicate_requirement_rejected() {
        let requirements = JobRequirementSet::new(vec![req("a", 1.0, true), req("a", 1.0, true)]);
        let err = analyze_gap(
            1,
            &SkillProfile::default(),
            2,
            &requirements,
            &GapPolicy::default(),
            &ScoringPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_empty_job_report_is_flagged_degenerate() {
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Expert, 4.0)]);
        let report = run(&profile, &JobRequirementSet::default());
        assert!(report.degenerate);
        assert_eq!(report.match_score, 0.0);
        assert!(report.matched.is_empty());
    }

    #[test]
    fn test_scored_job_report_is_not_degenerate() {
        let requirements = JobRequirementSet::new(vec![req("a", 1.0, true)]);
        let profile = SkillProfile::new(vec![held("a", ProficiencyLevel::Expert, 0.0)]);
        let report = run(&profile, &requirements);
        assert!(!report.degenerate);
        assert_eq!(report.match_score, 1.0);
    }

    #[test]
    fn test_level_hint_falls_back_to_expert() {
        assert_eq!(level_hint(0.0, 5.0), ProficiencyLevel::Expert);
        assert_eq!(level_hint(0.0, 0.1), ProficiencyLevel::Beginner);
    }
}
