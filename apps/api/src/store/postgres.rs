use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::rows::{JobSkillRow, ProfileSkillRow};
use crate::models::skill::{
    CandidateId, CandidateSkill, JobId, JobRequirementSet, SkillProfile, SkillRequirement,
};
use crate::store::{JobStore, ProfileStore};

const PROFILE_SKILLS_SELECT: &str = r#"
    SELECT ps.profile_id::bigint AS profile_id, s.slug AS skill_slug, ps.level,
           ps.years_experience::float8 AS years_experience
    FROM profile_skills ps
    JOIN skills s ON s.id = ps.skill_id
"#;

const JOB_SKILLS_SELECT: &str = r#"
    SELECT js.job_id::bigint AS job_id, s.slug AS skill_slug,
           js.importance::float8 AS importance, js.is_required
    FROM job_skills js
    JOIN skills s ON s.id = js.skill_id
"#;

/// Reads skill snapshots from the platform's Postgres schema.
///
/// Integer keys are cast to `bigint` so both `serial` and `bigserial` schemas decode.
#[derive(Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn profile_skills(&self, candidate_id: CandidateId) -> Result<SkillProfile, AppError> {
        let rows: Vec<ProfileSkillRow> =
            sqlx::query_as(&format!("{PROFILE_SKILLS_SELECT} WHERE ps.profile_id = $1"))
                .bind(candidate_id)
                .fetch_all(&self.pool)
                .await
                .map_err(classify)?;

        let skills = rows
            .into_iter()
            .map(CandidateSkill::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SkillProfile::new(skills))
    }

    async fn job_skills(&self, job_id: JobId) -> Result<JobRequirementSet, AppError> {
        let rows: Vec<JobSkillRow> =
            sqlx::query_as(&format!("{JOB_SKILLS_SELECT} WHERE js.job_id = $1"))
                .bind(job_id)
                .fetch_all(&self.pool)
                .await
                .map_err(classify)?;

        Ok(JobRequirementSet::new(
            rows.into_iter().map(SkillRequirement::from).collect(),
        ))
    }
}

#[async_trait]
impl ProfileStore for PgMatchStore {
    async fn fetch_profile(&self, candidate_id: CandidateId) -> Result<SkillProfile, AppError> {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id::bigint FROM profiles WHERE id = $1")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(classify)?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("Candidate {candidate_id} not found")));
        }

        self.profile_skills(candidate_id).await
    }

    async fn list_candidates(&self) -> Result<Vec<(CandidateId, SkillProfile)>, AppError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT p.id::bigint
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.is_public AND p.is_available AND u.user_type = 'job_seeker'
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        let rows: Vec<ProfileSkillRow> =
            sqlx::query_as(&format!("{PROFILE_SKILLS_SELECT} WHERE ps.profile_id = ANY($1)"))
                .bind(&ids)
                .fetch_all(&self.pool)
                .await
                .map_err(classify)?;

        let mut grouped: BTreeMap<CandidateId, Vec<CandidateSkill>> =
            ids.into_iter().map(|id| (id, Vec::new())).collect();
        for row in rows {
            let profile_id = row.profile_id;
            let skill = CandidateSkill::try_from(row)?;
            grouped.entry(profile_id).or_default().push(skill);
        }

        debug!("Loaded {} eligible candidates", grouped.len());
        Ok(grouped
            .into_iter()
            .map(|(id, skills)| (id, SkillProfile::new(skills)))
            .collect())
    }
}

#[async_trait]
impl JobStore for PgMatchStore {
    async fn fetch_job(&self, job_id: JobId) -> Result<JobRequirementSet, AppError> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id::bigint FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("Job {job_id} not found")));
        }

        self.job_skills(job_id).await
    }

    async fn fetch_active_job(&self, job_id: JobId) -> Result<JobRequirementSet, AppError> {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id::bigint FROM jobs WHERE id = $1 AND status = 'active'")
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(classify)?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Job {job_id} not found or not active"
            )));
        }

        self.job_skills(job_id).await
    }

    async fn list_jobs(&self) -> Result<Vec<(JobId, JobRequirementSet)>, AppError> {
        let ids: Vec<i64> =
            sqlx::query_scalar("SELECT id::bigint FROM jobs WHERE status = 'active'")
                .fetch_all(&self.pool)
                .await
                .map_err(classify)?;

        let rows: Vec<JobSkillRow> =
            sqlx::query_as(&format!("{JOB_SKILLS_SELECT} WHERE js.job_id = ANY($1)"))
                .bind(&ids)
                .fetch_all(&self.pool)
                .await
                .map_err(classify)?;

        let mut grouped: BTreeMap<JobId, Vec<SkillRequirement>> =
            ids.into_iter().map(|id| (id, Vec::new())).collect();
        for row in rows {
            grouped
                .entry(row.job_id)
                .or_default()
                .push(SkillRequirement::from(row));
        }

        debug!("Loaded {} active jobs", grouped.len());
        Ok(grouped
            .into_iter()
            .map(|(id, reqs)| (id, JobRequirementSet::new(reqs)))
            .collect())
    }
}

/// Connection-level failures mean the store is unreachable; everything else is a
/// query fault.
fn classify(err: sqlx::Error) -> AppError {
    if matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    ) {
        AppError::Unavailable(err.to_string())
    } else if matches!(err, sqlx::Error::RowNotFound) {
        AppError::NotFound(err.to_string())
    } else {
        AppError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut),
            AppError::Unavailable(_)
        ));
        assert!(matches!(
            classify(sqlx::Error::PoolClosed),
            AppError::Unavailable(_)
        ));
    }

    #[test]
    fn test_row_not_found_is_not_found() {
        assert!(matches!(
            classify(sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_other_errors_stay_database() {
        assert!(matches!(
            classify(sqlx::Error::ColumnNotFound("level".into())),
            AppError::Database(_)
        ));
    }
}
