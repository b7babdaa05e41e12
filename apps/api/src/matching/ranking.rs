//! Ranking engine — scores every subject against one fixed target, filters,
//! sorts under a deterministic total order, and paginates.
//!
//! Order: score desc → matched_skill_count desc → subject_id asc.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::policy::ScoringPolicy;
use crate::matching::scoring::{compute_score, index_profile, MatchResult};
use crate::matching::validation::{validate_profile, validate_requirements};
use crate::models::skill::{CandidateId, JobId, JobRequirementSet, SkillProfile};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankFilters {
    /// Inclusive lower bound on score.
    pub min_score: Option<f64>,
    /// Drop subjects lacking any `required = true` skill entirely.
    pub require_all_mandatory: bool,
    pub limit: Option<usize>,
    pub offset: usize,
}

/// One page of ranked results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatches {
    /// Results that passed the filters, before pagination.
    pub total_matches: usize,
    pub results: Vec<MatchResult>,
}

/// Ranks candidate profiles against one job.
pub fn rank_candidates(
    job_id: JobId,
    requirements: &JobRequirementSet,
    candidates: &[(CandidateId, SkillProfile)],
    filters: &RankFilters,
    policy: &ScoringPolicy,
) -> Result<RankedMatches, AppError> {
    validate_requirements(requirements).map_err(|e| tag_subject(e, "job", job_id))?;
    for (id, profile) in candidates {
        validate_profile(profile).map_err(|e| tag_subject(e, "candidate", *id))?;
    }

    let results = candidates
        .iter()
        .map(|(id, profile)| {
            compute_score(&index_profile(profile), requirements, policy).into_result(*id, job_id)
        })
        .collect();

    Ok(order_and_page(results, filters))
}

/// Ranks jobs against one candidate profile.
pub fn rank_jobs(
    candidate_id: CandidateId,
    profile: &SkillProfile,
    jobs: &[(JobId, JobRequirementSet)],
    filters: &RankFilters,
    policy: &ScoringPolicy,
) -> Result<RankedMatches, AppError> {
    validate_profile(profile).map_err(|e| tag_subject(e, "candidate", candidate_id))?;
    for (id, requirements) in jobs {
        validate_requirements(requirements).map_err(|e| tag_subject(e, "job", *id))?;
    }

    let skills = index_profile(profile);
    let results = jobs
        .iter()
        .map(|(id, requirements)| {
            compute_score(&skills, requirements, policy).into_result(*id, candidate_id)
        })
        .collect();

    Ok(order_and_page(results, filters))
}

/// Deterministic total order over results for one target.
pub fn compare_matches(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.matched_skill_count.cmp(&a.matched_skill_count))
        .then_with(|| a.subject_id.cmp(&b.subject_id))
}

pub(crate) fn order_and_page(mut results: Vec<MatchResult>, filters: &RankFilters) -> RankedMatches {
    results.retain(|r| {
        let above_floor = filters.min_score.map_or(true, |min| r.score >= min);
        let mandatory_ok = !filters.require_all_mandatory || r.has_all_required();
        above_floor && mandatory_ok
    });
    results.sort_by(compare_matches);

    let total_matches = results.len();
    let results = results
        .into_iter()
        .skip(filters.offset)
        .take(filters.limit.unwrap_or(usize::MAX))
        .collect();

    RankedMatches {
        total_matches,
        results,
    }
}

fn tag_subject(err: AppError, kind: &str, id: i64) -> AppError {
    match err {
        AppError::Validation { field, message } => AppError::Validation {
            field,
            message: format!("{kind} {id}: {message}"),
        },
        other => other,
    }
}
