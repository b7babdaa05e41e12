//! Axum route handlers for the Matching API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::gap::GapReport;
use crate::matching::orchestrator::RankQuery;
use crate::matching::scoring::MatchResult;
use crate::models::skill::{CandidateId, JobId};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CandidateMatchesResponse {
    pub job_id: JobId,
    pub total_matches: usize,
    pub candidates: Vec<MatchResult>,
}

#[derive(Debug, Serialize)]
pub struct JobMatchesResponse {
    pub candidate_id: CandidateId,
    pub total_matches: usize,
    pub jobs: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapQuery {
    pub candidate_id: CandidateId,
}

#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    pub job_id: JobId,
    pub analysis: GapReport,
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub match_result: MatchResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/matching/candidates/:job_id
///
/// Ranks eligible candidates for a job.
pub async fn handle_matching_candidates(
    State(state): State<AppState>,
    path: Result<Path<JobId>, PathRejection>,
    query: Result<Query<RankQuery>, QueryRejection>,
) -> Result<Json<CandidateMatchesResponse>, AppError> {
    let Path(job_id) = path?;
    let Query(query) = query?;
    let ranked = state.orchestrator.rank_candidates(job_id, query).await?;

    Ok(Json(CandidateMatchesResponse {
        job_id,
        total_matches: ranked.total_matches,
        candidates: ranked.results,
    }))
}

/// GET /api/matching/jobs/:candidate_id
///
/// Ranks active jobs for a candidate.
pub async fn handle_matching_jobs(
    State(state): State<AppState>,
    path: Result<Path<CandidateId>, PathRejection>,
    query: Result<Query<RankQuery>, QueryRejection>,
) -> Result<Json<JobMatchesResponse>, AppError> {
    let Path(candidate_id) = path?;
    let Query(query) = query?;
    let ranked = state.orchestrator.rank_jobs(candidate_id, query).await?;

    Ok(Json(JobMatchesResponse {
        candidate_id,
        total_matches: ranked.total_matches,
        jobs: ranked.results,
    }))
}

/// GET /api/matching/skill-gap/:job_id?candidate_id=
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    path: Result<Path<JobId>, PathRejection>,
    query: Result<Query<SkillGapQuery>, QueryRejection>,
) -> Result<Json<SkillGapResponse>, AppError> {
    let Path(job_id) = path?;
    let Query(query) = query?;
    let analysis = state
        .orchestrator
        .analyze_gap(query.candidate_id, job_id)
        .await?;

    Ok(Json(SkillGapResponse { job_id, analysis }))
}

/// POST /api/matching/calculate
pub async fn handle_calculate(
    State(state): State<AppState>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(request) = body?;
    let match_result = state
        .orchestrator
        .compute_score(request.candidate_id, request.job_id)
        .await?;

    Ok(Json(CalculateResponse {
        job_id: request.job_id,
        candidate_id: request.candidate_id,
        match_result,
    }))
}
