//! External collaborators the matching engine reads from.
//!
//! The orchestrator holds `Arc<dyn ProfileStore>` / `Arc<dyn JobStore>` and never
//! writes through them. Implementations surface `NotFound` / `Unavailable`
//! unchanged and do not retry.

pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::skill::{CandidateId, JobId, JobRequirementSet, SkillProfile};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Skill snapshot for one candidate. `NotFound` if the candidate does not exist.
    async fn fetch_profile(&self, candidate_id: CandidateId) -> Result<SkillProfile, AppError>;

    /// Every candidate eligible for ranking (public and available).
    async fn list_candidates(&self) -> Result<Vec<(CandidateId, SkillProfile)>, AppError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Requirement snapshot for one job. `NotFound` if the job does not exist.
    async fn fetch_job(&self, job_id: JobId) -> Result<JobRequirementSet, AppError>;

    /// Requirement snapshot for one job that is currently open for applications.
    async fn fetch_active_job(&self, job_id: JobId) -> Result<JobRequirementSet, AppError>;

    /// Every job eligible for ranking (status active).
    async fn list_jobs(&self) -> Result<Vec<(JobId, JobRequirementSet)>, AppError>;
}
