use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::decision::{DecisionEffect, DecisionOutcome};
use super::domain::{Applicant, ApplicantId, CandidateApplication, Job, JobId, UserId};

/// Applicant state after a decide/unlock, plus whether it changed anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReceipt {
    pub applicant: Applicant,
    #[serde(flatten)]
    pub effect: DecisionEffect,
}

/// Job and applicant persistence.
///
/// `update_applicant_status` and `unlock_applicant` must apply
/// [`decide`](super::decision::decide) / [`unlock`](super::decision::unlock)
/// as a single check-and-set under the implementation's own lock, so a stale
/// caller cannot overwrite a decision that landed first.
#[async_trait]
pub trait RecruitingRepository: Send + Sync {
    /// Store a new job ahead of existing ones.
    async fn create_job(&self, job: Job) -> Result<Job, RepositoryError>;
    /// Jobs newest first.
    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError>;
    async fn fetch_job(&self, job_id: &JobId) -> Result<Option<Job>, RepositoryError>;
    /// Remove a job together with its applicants.
    async fn delete_job(&self, job_id: &JobId) -> Result<(), RepositoryError>;
    async fn append_applicant(
        &self,
        job_id: &JobId,
        applicant: Applicant,
    ) -> Result<Applicant, RepositoryError>;
    async fn update_applicant_status(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        outcome: DecisionOutcome,
    ) -> Result<DecisionReceipt, RepositoryError>;
    async fn unlock_applicant(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
    ) -> Result<DecisionReceipt, RepositoryError>;
    /// The user's first applicant on each job, in job listing order.
    async fn list_applications_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
