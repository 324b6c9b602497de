use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::RecruitingConfig;
use crate::workflows::recruiting::collaborators::{
    AiCollaborators, AnalyzerError, BehaviouralAnalyzer, BehaviouralAssessment,
    QuestionGenerator, ResumeAnalysis, ResumeAnalyzer,
};
use crate::workflows::recruiting::decision::{self, DecisionOutcome};
use crate::workflows::recruiting::domain::{
    Applicant, ApplicantId, Candidate, CandidateApplication, CreateJobRequest, ExtractedSkill,
    Job, JobId, JobWeights, PersonalityTraits, ResumeDocument, SkillCategory, UserId,
};
use crate::workflows::recruiting::repository::{
    DecisionReceipt, RecruitingRepository, RepositoryError,
};
use crate::workflows::recruiting::{recruiting_router, RecruitingService};

pub(super) fn recruiter() -> UserId {
    UserId("recruiter-1".to_string())
}

pub(super) fn candidate(user: &str) -> Candidate {
    Candidate {
        user_id: UserId(user.to_string()),
        name: format!("Candidate {user}"),
    }
}

pub(super) fn resume(user: &str) -> ResumeDocument {
    ResumeDocument {
        name: format!("{user}.pdf"),
        url: format!("blob:{user}"),
    }
}

pub(super) fn job_request() -> CreateJobRequest {
    CreateJobRequest {
        title: "AI Engineer".to_string(),
        company: "TechCorp AI".to_string(),
        description: "Design and ship machine learning services.".to_string(),
        deadline: NaiveDate::from_ymd_opt(2026, 4, 15).expect("valid date"),
        questions: vec![
            "Tell us about a challenging situation you handled at work.".to_string(),
            "How do you handle pressure and tight deadlines?".to_string(),
        ],
        weights: Some(JobWeights {
            resume: 50,
            behaviour: 20,
        }),
        required_skills: vec!["Python".to_string(), "R".to_string()],
    }
}

pub(super) fn recruiting_config() -> RecruitingConfig {
    RecruitingConfig {
        assessment_budget_secs: 180,
        tick_period: Duration::from_secs(1),
        assessment_retention: Duration::from_secs(1800),
        default_weights: JobWeights::default(),
        simulated_latency: false,
    }
}

pub(super) fn analysis(match_score: u8) -> ResumeAnalysis {
    ResumeAnalysis {
        match_score,
        strengths: vec![
            "Strong technical skills".to_string(),
            "Relevant project experience".to_string(),
        ],
        improvements: vec!["Add more quantifiable achievements".to_string()],
        extracted_skills: vec![ExtractedSkill {
            name: "Python".to_string(),
            relevance: 95,
            category: SkillCategory::Technical,
        }],
        extracted_experience: Vec::new(),
        extracted_education: Vec::new(),
        match_explanation: "Solid match for the role.".to_string(),
    }
}

pub(super) fn personality() -> PersonalityTraits {
    PersonalityTraits {
        openness: 80,
        conscientiousness: 75,
        extraversion: 60,
        agreeableness: 70,
        neuroticism: 30,
    }
}

pub(super) struct FixedResumeAnalyzer {
    pub(super) match_score: u8,
}

#[async_trait]
impl ResumeAnalyzer for FixedResumeAnalyzer {
    async fn analyze(&self, _resume: &ResumeDocument) -> Result<ResumeAnalysis, AnalyzerError> {
        Ok(analysis(self.match_score))
    }
}

/// Scores answers at a fixed value; can be switched to fail on demand.
#[derive(Default)]
pub(super) struct FixedBehaviouralAnalyzer {
    pub(super) score: u8,
    pub(super) failing: AtomicBool,
}

impl FixedBehaviouralAnalyzer {
    pub(super) fn scoring(score: u8) -> Self {
        Self {
            score,
            failing: AtomicBool::new(false),
        }
    }

    pub(super) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl BehaviouralAnalyzer for FixedBehaviouralAnalyzer {
    async fn score(&self, _answers: &[String]) -> Result<BehaviouralAssessment, AnalyzerError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AnalyzerError::Unavailable("scoring offline".to_string()));
        }
        Ok(BehaviouralAssessment {
            score: self.score,
            insights: "Clear and structured responses".to_string(),
            personality: Some(personality()),
        })
    }
}

pub(super) struct CannedQuestions(pub(super) Vec<String>);

#[async_trait]
impl QuestionGenerator for CannedQuestions {
    async fn generate(&self, _job_description: &str) -> Result<Vec<String>, AnalyzerError> {
        Ok(self.0.clone())
    }
}

pub(super) fn canned_questions() -> CannedQuestions {
    CannedQuestions(vec![
        "Tell us about a challenging situation you handled at work.".to_string(),
        "  ".to_string(),
        "How do you handle pressure and tight deadlines?".to_string(),
        "Describe a failure and what you learned from it.".to_string(),
        "What motivates you?".to_string(),
    ])
}

pub(super) struct Harness<R> {
    pub(super) service: Arc<RecruitingService<R>>,
    pub(super) repository: Arc<R>,
    pub(super) behaviour: Arc<FixedBehaviouralAnalyzer>,
}

pub(super) fn harness_with<R>(repository: R) -> Harness<R>
where
    R: RecruitingRepository + 'static,
{
    let repository = Arc::new(repository);
    let behaviour = Arc::new(FixedBehaviouralAnalyzer::scoring(60));
    let collaborators = AiCollaborators::new(
        Arc::new(FixedResumeAnalyzer { match_score: 80 }),
        behaviour.clone(),
        Arc::new(canned_questions()),
    );
    let service = Arc::new(RecruitingService::new(
        repository.clone(),
        collaborators,
        recruiting_config(),
    ));
    Harness {
        service,
        repository,
        behaviour,
    }
}

pub(super) fn harness() -> Harness<MemoryRepository> {
    harness_with(MemoryRepository::default())
}

pub(super) fn router_for<R>(harness: &Harness<R>) -> axum::Router
where
    R: RecruitingRepository + 'static,
{
    recruiting_router(harness.service.clone())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) jobs: Arc<Mutex<Vec<Job>>>,
}

impl MemoryRepository {
    fn with_applicant<F>(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        apply: F,
    ) -> Result<DecisionReceipt, RepositoryError>
    where
        F: FnOnce(&mut Applicant) -> decision::DecisionEffect,
    {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        let applicant = guard
            .iter_mut()
            .find(|job| &job.id == job_id)
            .and_then(|job| job.applicant_mut(applicant_id))
            .ok_or(RepositoryError::NotFound)?;
        let effect = apply(applicant);
        Ok(DecisionReceipt {
            applicant: applicant.clone(),
            effect,
        })
    }
}

#[async_trait]
impl RecruitingRepository for MemoryRepository {
    async fn create_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(0, job.clone());
        Ok(job)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.jobs.lock().expect("repository mutex poisoned").clone())
    }

    async fn fetch_job(&self, job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|job| &job.id == job_id).cloned())
    }

    async fn delete_job(&self, job_id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|job| &job.id != job_id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn append_applicant(
        &self,
        job_id: &JobId,
        applicant: Applicant,
    ) -> Result<Applicant, RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        let job = guard
            .iter_mut()
            .find(|job| &job.id == job_id)
            .ok_or(RepositoryError::NotFound)?;
        if job.applicant(&applicant.id).is_some() {
            return Err(RepositoryError::Conflict);
        }
        job.applicants.push(applicant.clone());
        Ok(applicant)
    }

    async fn update_applicant_status(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        outcome: DecisionOutcome,
    ) -> Result<DecisionReceipt, RepositoryError> {
        self.with_applicant(job_id, applicant_id, |applicant| {
            decision::decide(applicant, outcome)
        })
    }

    async fn unlock_applicant(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
    ) -> Result<DecisionReceipt, RepositoryError> {
        self.with_applicant(job_id, applicant_id, decision::unlock)
    }

    async fn list_applications_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter_map(|job| {
                job.applicant_for_user(user_id)
                    .map(|applicant| CandidateApplication {
                        job: job.posting(),
                        applicant: applicant.clone(),
                    })
            })
            .collect())
    }
}

/// Accepts jobs but refuses to store applicants.
#[derive(Default)]
pub(super) struct ReadOnlyApplicants {
    pub(super) inner: MemoryRepository,
}

#[async_trait]
impl RecruitingRepository for ReadOnlyApplicants {
    async fn create_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.inner.create_job(job).await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        self.inner.list_jobs().await
    }

    async fn fetch_job(&self, job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.inner.fetch_job(job_id).await
    }

    async fn delete_job(&self, job_id: &JobId) -> Result<(), RepositoryError> {
        self.inner.delete_job(job_id).await
    }

    async fn append_applicant(
        &self,
        _job_id: &JobId,
        _applicant: Applicant,
    ) -> Result<Applicant, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    async fn update_applicant_status(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        outcome: DecisionOutcome,
    ) -> Result<DecisionReceipt, RepositoryError> {
        self.inner
            .update_applicant_status(job_id, applicant_id, outcome)
            .await
    }

    async fn unlock_applicant(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
    ) -> Result<DecisionReceipt, RepositoryError> {
        self.inner.unlock_applicant(job_id, applicant_id).await
    }

    async fn list_applications_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError> {
        self.inner.list_applications_for_user(user_id).await
    }
}

/// Stores applicants only after a delay, leaving a submission in flight.
#[derive(Default)]
pub(super) struct SlowAppends {
    pub(super) inner: MemoryRepository,
    pub(super) delay: Duration,
}

#[async_trait]
impl RecruitingRepository for SlowAppends {
    async fn create_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.inner.create_job(job).await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        self.inner.list_jobs().await
    }

    async fn fetch_job(&self, job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.inner.fetch_job(job_id).await
    }

    async fn delete_job(&self, job_id: &JobId) -> Result<(), RepositoryError> {
        self.inner.delete_job(job_id).await
    }

    async fn append_applicant(
        &self,
        job_id: &JobId,
        applicant: Applicant,
    ) -> Result<Applicant, RepositoryError> {
        tokio::time::sleep(self.delay).await;
        self.inner.append_applicant(job_id, applicant).await
    }

    async fn update_applicant_status(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        outcome: DecisionOutcome,
    ) -> Result<DecisionReceipt, RepositoryError> {
        self.inner
            .update_applicant_status(job_id, applicant_id, outcome)
            .await
    }

    async fn unlock_applicant(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
    ) -> Result<DecisionReceipt, RepositoryError> {
        self.inner.unlock_applicant(job_id, applicant_id).await
    }

    async fn list_applications_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError> {
        self.inner.list_applications_for_user(user_id).await
    }
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl RecruitingRepository for UnavailableRepository {
    async fn create_job(&self, _job: Job) -> Result<Job, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn fetch_job(&self, _job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn delete_job(&self, _job_id: &JobId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn append_applicant(
        &self,
        _job_id: &JobId,
        _applicant: Applicant,
    ) -> Result<Applicant, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update_applicant_status(
        &self,
        _job_id: &JobId,
        _applicant_id: &ApplicantId,
        _outcome: DecisionOutcome,
    ) -> Result<DecisionReceipt, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn unlock_applicant(
        &self,
        _job_id: &JobId,
        _applicant_id: &ApplicantId,
    ) -> Result<DecisionReceipt, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn list_applications_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
