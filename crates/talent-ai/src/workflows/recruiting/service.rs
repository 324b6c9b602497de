use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

use chrono::Utc;
use metrics::{counter, describe_counter};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::analytics::{
    rank_applicants, skill_gap, CandidateDashboard, RankedApplicant, RecruiterDashboard,
    SkillGapReport,
};
use super::assessment::{
    AnswerEffect, AssessmentError, AssessmentSession, AssessmentSnapshot, AssessmentState,
};
use super::collaborators::{AiCollaborators, AnalyzerError, ResumeAnalysis};
use super::decision::DecisionOutcome;
use super::domain::{
    Applicant, ApplicantId, ApplicantStatus, AssessmentId, Candidate, CreateJobRequest, Job,
    JobId, JobPosting, ResumeDocument, UserId, MAX_QUESTIONS,
};
use super::repository::{DecisionReceipt, RecruitingRepository, RepositoryError};
use super::scoring::{fit_score_for, ScoringError};
use crate::config::RecruitingConfig;

/// Inputs assembled into an applicant at submission time.
#[derive(Debug, Clone)]
pub struct ApplicationDraft {
    pub candidate: Candidate,
    pub resume: ResumeDocument,
    pub analysis: ResumeAnalysis,
    pub answers: Vec<String>,
}

/// Returned when a candidate opens the timed assessment for a job.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentTicket {
    pub assessment_id: AssessmentId,
    pub job: JobPosting,
    pub questions: Vec<String>,
    pub analysis: ResumeAnalysis,
    pub assessment: AssessmentSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerReceipt {
    #[serde(flatten)]
    pub effect: AnswerEffect,
    pub assessment: AssessmentSnapshot,
}

struct PendingAssessment {
    job_id: JobId,
    candidate: Candidate,
    resume: ResumeDocument,
    analysis: ResumeAnalysis,
    session: AssessmentSession,
    opened_at: Instant,
}

impl PendingAssessment {
    /// Finished sessions go at once; idle ones once the retention window has passed.
    /// A running or submitting session is never evicted.
    fn is_stale(&self, now: Instant, retention: Duration) -> bool {
        match self.session.state() {
            AssessmentState::Submitted | AssessmentState::Abandoned => true,
            AssessmentState::Running | AssessmentState::Submitting => false,
            AssessmentState::NotStarted | AssessmentState::Expired => {
                now.saturating_duration_since(self.opened_at) >= retention
            }
        }
    }
}

/// Facade over persistence, the analysis collaborators, and open assessments.
pub struct RecruitingService<R> {
    repository: Arc<R>,
    collaborators: AiCollaborators,
    config: RecruitingConfig,
    job_sequence: AtomicU64,
    applicant_sequence: AtomicU64,
    assessment_sequence: AtomicU64,
    assessments: Mutex<HashMap<AssessmentId, Arc<PendingAssessment>>>,
}

fn describe_metrics() {
    static ONCE: OnceLock<()> = OnceLock::new();
    ONCE.get_or_init(|| {
        describe_counter!("recruiting_jobs_created_total", "Job postings created.");
        describe_counter!(
            "recruiting_applications_submitted_total",
            "Applications appended to a job."
        );
        describe_counter!(
            "recruiting_decisions_total",
            "Decide/unlock attempts by outcome and effect."
        );
        describe_counter!(
            "recruiting_assessments_expired_total",
            "Timed assessments that ran out of time."
        );
    });
}

impl<R> RecruitingService<R>
where
    R: RecruitingRepository + 'static,
{
    pub fn new(repository: Arc<R>, collaborators: AiCollaborators, config: RecruitingConfig) -> Self {
        describe_metrics();
        Self {
            repository,
            collaborators,
            config,
            job_sequence: AtomicU64::new(1),
            applicant_sequence: AtomicU64::new(1),
            assessment_sequence: AtomicU64::new(1),
            assessments: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RecruitingConfig {
        &self.config
    }

    fn next_job_id(&self) -> JobId {
        let id = self.job_sequence.fetch_add(1, Ordering::Relaxed);
        JobId(format!("job-{id:06}"))
    }

    fn next_applicant_id(&self) -> ApplicantId {
        let id = self.applicant_sequence.fetch_add(1, Ordering::Relaxed);
        ApplicantId(format!("applicant-{id:06}"))
    }

    fn next_assessment_id(&self) -> AssessmentId {
        let id = self.assessment_sequence.fetch_add(1, Ordering::Relaxed);
        AssessmentId(format!("assessment-{id:06}"))
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<AssessmentId, Arc<PendingAssessment>>> {
        self.assessments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop sessions nobody can use any more.
    fn evict_stale_assessments(&self) {
        let now = Instant::now();
        let retention = self.config.assessment_retention;
        let mut registry = self.registry();
        let before = registry.len();
        registry.retain(|_, pending| !pending.is_stale(now, retention));
        let evicted = before - registry.len();
        if evicted > 0 {
            debug!(evicted, open = registry.len(), "evicted stale assessments");
        }
    }

    fn pending(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Arc<PendingAssessment>, RecruitingServiceError> {
        self.registry()
            .get(assessment_id)
            .cloned()
            .ok_or_else(|| RecruitingServiceError::UnknownAssessment(assessment_id.0.clone()))
    }

    async fn job(&self, job_id: &JobId) -> Result<Job, RecruitingServiceError> {
        let job = self
            .repository
            .fetch_job(job_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(job)
    }

    /// Validate and store a posting on behalf of `recruiter`.
    pub async fn create_job(
        &self,
        recruiter: &UserId,
        request: CreateJobRequest,
    ) -> Result<Job, RecruitingServiceError> {
        let CreateJobRequest {
            title,
            company,
            description,
            deadline,
            questions,
            weights,
            required_skills,
        } = request;

        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(JobValidationError::BlankTitle.into());
        }
        if description.trim().is_empty() {
            return Err(JobValidationError::BlankDescription.into());
        }

        let questions = non_blank(questions);
        if questions.len() > MAX_QUESTIONS {
            return Err(JobValidationError::TooManyQuestions {
                count: questions.len(),
            }
            .into());
        }

        let weights = weights.unwrap_or(self.config.default_weights);
        if weights.total() == 0 {
            return Err(JobValidationError::Weights(ScoringError::ZeroCombinedWeight).into());
        }

        let job = Job {
            id: self.next_job_id(),
            title,
            company: company.trim().to_string(),
            description,
            deadline,
            questions,
            weights,
            required_skills: non_blank(required_skills),
            applicants: Vec::new(),
            created_at: Utc::now().date_naive(),
            created_by: recruiter.clone(),
        };

        let stored = self.repository.create_job(job).await?;
        counter!("recruiting_jobs_created_total").increment(1);
        info!(job_id = %stored.id.0, title = %stored.title, recruiter = %recruiter.0, "job created");
        Ok(stored)
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>, RecruitingServiceError> {
        Ok(self.repository.list_jobs().await?)
    }

    /// Candidate-facing listing without applicant records.
    pub async fn list_postings(&self) -> Result<Vec<JobPosting>, RecruitingServiceError> {
        let jobs = self.repository.list_jobs().await?;
        Ok(jobs.iter().map(Job::posting).collect())
    }

    pub async fn delete_job(&self, job_id: &JobId) -> Result<(), RecruitingServiceError> {
        self.repository.delete_job(job_id).await?;
        info!(job_id = %job_id.0, "job deleted");
        Ok(())
    }

    /// Draft up to three behavioural prompts from a job description.
    pub async fn generate_questions(
        &self,
        description: &str,
    ) -> Result<Vec<String>, RecruitingServiceError> {
        if description.trim().is_empty() {
            return Err(JobValidationError::BlankDescription.into());
        }

        let mut questions = non_blank(self.collaborators.questions.generate(description).await?);
        questions.truncate(MAX_QUESTIONS);
        Ok(questions)
    }

    pub async fn analyze_resume(
        &self,
        resume: &ResumeDocument,
    ) -> Result<ResumeAnalysis, RecruitingServiceError> {
        Ok(self.collaborators.resume.analyze(resume).await?)
    }

    /// Score the answers, assemble the applicant, and append it to the job.
    pub async fn submit_application(
        &self,
        job_id: &JobId,
        draft: ApplicationDraft,
    ) -> Result<Applicant, RecruitingServiceError> {
        let job = self.job(job_id).await?;
        let applicant = self.assemble_applicant(&job, draft).await?;
        self.append(job_id, applicant).await
    }

    async fn assemble_applicant(
        &self,
        job: &Job,
        draft: ApplicationDraft,
    ) -> Result<Applicant, RecruitingServiceError> {
        let ApplicationDraft {
            candidate,
            resume,
            analysis,
            answers,
        } = draft;

        let behaviour = self.collaborators.behaviour.score(&answers).await?;
        let resume_score = analysis.match_score.min(100);
        let behaviour_score = behaviour.score.min(100);
        let fit_score = fit_score_for(resume_score, behaviour_score, job.weights)?;

        let match_explanation = Some(analysis.match_explanation)
            .filter(|explanation| !explanation.trim().is_empty());

        Ok(Applicant {
            id: self.next_applicant_id(),
            user_id: candidate.user_id,
            name: candidate.name,
            applied_at: Utc::now(),
            resume,
            resume_score,
            behaviour_score,
            fit_score: Some(fit_score),
            resume_insights: analysis.strengths.join(", "),
            behaviour_insights: behaviour.insights,
            status: ApplicantStatus::UnderReview,
            locked: false,
            behavioural_answers: answers,
            personality_traits: behaviour.personality,
            extracted_skills: analysis.extracted_skills,
            extracted_experience: analysis.extracted_experience,
            extracted_education: analysis.extracted_education,
            match_explanation,
        })
    }

    async fn append(
        &self,
        job_id: &JobId,
        applicant: Applicant,
    ) -> Result<Applicant, RecruitingServiceError> {
        let stored = self.repository.append_applicant(job_id, applicant).await?;
        counter!("recruiting_applications_submitted_total").increment(1);
        info!(
            job_id = %job_id.0,
            applicant_id = %stored.id.0,
            fit_score = stored.fit_score,
            "application submitted"
        );
        Ok(stored)
    }

    /// Record a final outcome. A locked applicant comes back unchanged with `NoEffect`.
    pub async fn decide(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        outcome: DecisionOutcome,
    ) -> Result<DecisionReceipt, RecruitingServiceError> {
        let receipt = self
            .repository
            .update_applicant_status(job_id, applicant_id, outcome)
            .await?;
        record_decision(outcome.label(), applicant_id, &receipt);
        Ok(receipt)
    }

    pub async fn unlock(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
    ) -> Result<DecisionReceipt, RecruitingServiceError> {
        let receipt = self
            .repository
            .unlock_applicant(job_id, applicant_id)
            .await?;
        record_decision("unlock", applicant_id, &receipt);
        Ok(receipt)
    }

    pub async fn ranked_applicants(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<RankedApplicant>, RecruitingServiceError> {
        let job = self.job(job_id).await?;
        Ok(rank_applicants(&job))
    }

    pub async fn skill_gap(&self, job_id: &JobId) -> Result<SkillGapReport, RecruitingServiceError> {
        let job = self.job(job_id).await?;
        Ok(SkillGapReport {
            entries: skill_gap(&job),
            job_id: job.id,
            job_title: job.title,
        })
    }

    pub async fn recruiter_dashboard(
        &self,
        focus: Option<&JobId>,
    ) -> Result<RecruiterDashboard, RecruitingServiceError> {
        let jobs = self.repository.list_jobs().await?;
        Ok(RecruiterDashboard::build(&jobs, focus))
    }

    pub async fn candidate_dashboard(
        &self,
        user_id: &UserId,
    ) -> Result<CandidateDashboard, RecruitingServiceError> {
        let applications = self.repository.list_applications_for_user(user_id).await?;
        Ok(CandidateDashboard::build(applications))
    }

    /// Analyze the resume once and open a not-yet-started assessment for the job.
    pub async fn open_assessment(
        &self,
        job_id: &JobId,
        candidate: Candidate,
        resume: ResumeDocument,
    ) -> Result<AssessmentTicket, RecruitingServiceError> {
        self.evict_stale_assessments();
        let job = self.job(job_id).await?;
        let analysis = self.collaborators.resume.analyze(&resume).await?;
        let questions = job.assessment_questions().to_vec();

        let session = AssessmentSession::new(
            questions.len(),
            self.config.assessment_budget_secs,
            self.config.tick_period,
        );
        let assessment_id = self.next_assessment_id();
        let ticket = AssessmentTicket {
            assessment_id: assessment_id.clone(),
            job: job.posting(),
            questions,
            analysis: analysis.clone(),
            assessment: session.snapshot(),
        };

        self.registry().insert(
            assessment_id.clone(),
            Arc::new(PendingAssessment {
                job_id: job.id,
                candidate,
                resume,
                analysis,
                session,
                opened_at: Instant::now(),
            }),
        );
        info!(assessment_id = %assessment_id.0, job_id = %job_id.0, "assessment opened");
        Ok(ticket)
    }

    pub fn assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentSnapshot, RecruitingServiceError> {
        Ok(self.pending(assessment_id)?.session.snapshot())
    }

    pub fn start_assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentSnapshot, RecruitingServiceError> {
        let snapshot = self.pending(assessment_id)?.session.start()?;
        info!(
            assessment_id = %assessment_id.0,
            remaining_secs = snapshot.remaining_secs,
            "assessment started"
        );
        Ok(snapshot)
    }

    pub fn step_back(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentSnapshot, RecruitingServiceError> {
        Ok(self.pending(assessment_id)?.session.step_back()?)
    }

    pub fn answer(
        &self,
        assessment_id: &AssessmentId,
        index: usize,
        text: String,
    ) -> Result<AnswerReceipt, RecruitingServiceError> {
        let pending = self.pending(assessment_id)?;
        let effect = pending.session.set_answer(index, text);
        Ok(AnswerReceipt {
            effect,
            assessment: pending.session.snapshot(),
        })
    }

    /// Close the flow and forget it. Returns false if it had already finished.
    ///
    /// Fails while a submission is in flight; the assessment stays open so the
    /// submit call decides the outcome.
    pub fn abandon_assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<bool, RecruitingServiceError> {
        let pending = self.pending(assessment_id)?;
        let abandoned = pending.session.abandon()?;
        self.registry().remove(assessment_id);
        info!(assessment_id = %assessment_id.0, abandoned, "assessment closed");
        Ok(abandoned)
    }

    /// Submit the assessment's answers as an application.
    ///
    /// On failure the assessment returns to its pre-submit state with the
    /// remaining time intact. It cannot be abandoned until the call returns.
    pub async fn submit_assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Applicant, RecruitingServiceError> {
        let pending = self.pending(assessment_id)?;
        let answers = pending.session.begin_submission()?;

        match self.finish_submission(&pending, answers).await {
            Ok(applicant) => {
                pending.session.complete_submission()?;
                self.registry().remove(assessment_id);
                Ok(applicant)
            }
            Err(err) => {
                if let Err(recover) = pending.session.fail_submission() {
                    warn!(assessment_id = %assessment_id.0, %recover, "assessment not recoverable");
                }
                warn!(assessment_id = %assessment_id.0, %err, "assessment submission failed");
                Err(err)
            }
        }
    }

    async fn finish_submission(
        &self,
        pending: &PendingAssessment,
        answers: Vec<String>,
    ) -> Result<Applicant, RecruitingServiceError> {
        let job = self.job(&pending.job_id).await?;
        let draft = ApplicationDraft {
            candidate: pending.candidate.clone(),
            resume: pending.resume.clone(),
            analysis: pending.analysis.clone(),
            answers,
        };
        let applicant = self.assemble_applicant(&job, draft).await?;
        self.append(&pending.job_id, applicant).await
    }
}

fn record_decision(action: &'static str, applicant_id: &ApplicantId, receipt: &DecisionReceipt) {
    counter!(
        "recruiting_decisions_total",
        "outcome" => action,
        "effect" => receipt.effect.label()
    )
    .increment(1);

    if receipt.effect.applied() {
        info!(
            applicant_id = %applicant_id.0,
            action,
            status = receipt.applicant.status.label(),
            locked = receipt.applicant.locked,
            "decision applied"
        );
    } else {
        info!(applicant_id = %applicant_id.0, action, effect = ?receipt.effect, "decision had no effect");
    }
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Rejections raised while validating a job posting.
#[derive(Debug, thiserror::Error)]
pub enum JobValidationError {
    #[error("job title cannot be blank")]
    BlankTitle,
    #[error("job description cannot be blank")]
    BlankDescription,
    #[error("a job carries at most 3 questions (found {count})")]
    TooManyQuestions { count: usize },
    #[error(transparent)]
    Weights(ScoringError),
}

/// Error raised by the recruiting service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitingServiceError {
    #[error(transparent)]
    Validation(#[from] JobValidationError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error("assessment {0} not found")]
    UnknownAssessment(String),
}
