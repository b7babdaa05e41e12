//! Match request orchestrator — the only matching component that touches the
//! profile/job stores.
//!
//! Each operation fetches snapshots (bounded by `fetch_timeout`), hands them to
//! the pure scoring/ranking/gap functions, and returns the assembled result.
//! Nothing is cached and nothing is written back.

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::matching::gap::{analyze_gap, GapReport};
use crate::matching::policy::MatchingConfig;
use crate::matching::ranking::{rank_candidates, rank_jobs, RankFilters, RankedMatches};
use crate::matching::scoring::{score, MatchResult};
use crate::models::skill::{CandidateId, JobId};
use crate::store::{JobStore, ProfileStore};

/// Filter options as supplied by a caller; omitted values take configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub min_score: Option<f64>,
    pub require_all_mandatory: Option<bool>,
}

pub struct MatchOrchestrator {
    profiles: Arc<dyn ProfileStore>,
    jobs: Arc<dyn JobStore>,
    config: MatchingConfig,
}

impl MatchOrchestrator {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        jobs: Arc<dyn JobStore>,
        config: MatchingConfig,
    ) -> Self {
        Self {
            profiles,
            jobs,
            config,
        }
    }

    /// ComputeScore(candidateId, jobId)
    pub async fn compute_score(
        &self,
        candidate_id: CandidateId,
        job_id: JobId,
    ) -> Result<MatchResult, AppError> {
        let (profile, requirements) = tokio::try_join!(
            self.bounded("profile", self.profiles.fetch_profile(candidate_id)),
            self.bounded("job", self.jobs.fetch_job(job_id)),
        )?;

        let pair = score(&profile, &requirements, &self.config.scoring)?;
        if pair.degenerate && self.config.reject_degenerate {
            return Err(AppError::DegenerateInput(format!(
                "Job {job_id} has zero total importance"
            )));
        }

        debug!(
            "Scored candidate {candidate_id} vs job {job_id}: {:.3} ({} matched)",
            pair.score, pair.matched_skill_count
        );
        Ok(pair.into_result(candidate_id, job_id))
    }

    /// RankCandidates(jobId, filters)
    pub async fn rank_candidates(
        &self,
        job_id: JobId,
        query: RankQuery,
    ) -> Result<RankedMatches, AppError> {
        let filters = self.resolve_filters(query)?;
        let (requirements, candidates) = tokio::try_join!(
            self.bounded("job", self.jobs.fetch_job(job_id)),
            self.bounded("candidate pool", self.profiles.list_candidates()),
        )?;

        let pool_size = candidates.len();
        let policy = self.config.scoring;
        let ranked = tokio::task::spawn_blocking(move || {
            rank_candidates(job_id, &requirements, &candidates, &filters, &policy)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("ranking task failed: {e}")))??;

        info!(
            "Ranked {pool_size} candidates for job {job_id}: {} matched, {} returned",
            ranked.total_matches,
            ranked.results.len()
        );
        Ok(ranked)
    }

    /// RankJobs(candidateId, filters)
    pub async fn rank_jobs(
        &self,
        candidate_id: CandidateId,
        query: RankQuery,
    ) -> Result<RankedMatches, AppError> {
        let filters = self.resolve_filters(query)?;
        let (profile, jobs) = tokio::try_join!(
            self.bounded("profile", self.profiles.fetch_profile(candidate_id)),
            self.bounded("job pool", self.jobs.list_jobs()),
        )?;

        let pool_size = jobs.len();
        let policy = self.config.scoring;
        let ranked = tokio::task::spawn_blocking(move || {
            rank_jobs(candidate_id, &profile, &jobs, &filters, &policy)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("ranking task failed: {e}")))??;

        info!(
            "Ranked {pool_size} jobs for candidate {candidate_id}: {} matched, {} returned",
            ranked.total_matches,
            ranked.results.len()
        );
        Ok(ranked)
    }

    /// AnalyzeGap(candidateId, jobId). The job must be active.
    pub async fn analyze_gap(
        &self,
        candidate_id: CandidateId,
        job_id: JobId,
    ) -> Result<GapReport, AppError> {
        let (profile, requirements) = tokio::try_join!(
            self.bounded("profile", self.profiles.fetch_profile(candidate_id)),
            self.bounded("job", self.jobs.fetch_active_job(job_id)),
        )?;

        let report = analyze_gap(
            candidate_id,
            &profile,
            job_id,
            &requirements,
            &self.config.gap,
            &self.config.scoring,
        )?;

        debug!(
            "Gap for candidate {candidate_id} vs job {job_id}: {} missing, {} underleveled",
            report.missing.len(),
            report.underleveled.len()
        );
        Ok(report)
    }

    fn resolve_filters(&self, query: RankQuery) -> Result<RankFilters, AppError> {
        let limit = query.limit.unwrap_or(self.config.default_limit);
        if limit == 0 || limit > self.config.max_limit {
            return Err(AppError::validation(
                "limit",
                format!("limit must be between 1 and {}", self.config.max_limit),
            ));
        }

        let min_score = query.min_score.unwrap_or(self.config.default_min_score);
        if !min_score.is_finite() || min_score < 0.0 {
            return Err(AppError::validation(
                "min_score",
                format!("min_score must be a non-negative number, got {min_score}"),
            ));
        }

        Ok(RankFilters {
            min_score: Some(min_score),
            require_all_mandatory: query.require_all_mandatory.unwrap_or(false),
            limit: Some(limit),
            offset: query.offset.unwrap_or(0),
        })
    }

    /// Applies the fetch timeout. Store errors pass through untouched.
    async fn bounded<T>(
        &self,
        what: &str,
        fetch: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.config.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                AppError::Unavailable(format!(
                    "{what} fetch timed out after {}ms",
                    self.config.fetch_timeout.as_millis()
                ))
            })?
    }
}
