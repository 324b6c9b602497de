//! Recruiting workflows: job postings, applicant fit scoring, the decision lock,
//! timed behavioural assessments, and the analytics behind both dashboards.
//!
//! AI work (resume parsing, answer scoring, question drafting) sits behind the
//! traits in [`collaborators`] so the service can run against real providers or
//! deterministic fakes.

pub mod analytics;
pub mod assessment;
pub mod collaborators;
pub mod decision;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{
    CandidateDashboard, RankedApplicant, RecruiterDashboard, SkillGapEntry, SkillGapReport,
};
pub use assessment::{AssessmentSession, AssessmentSnapshot, AssessmentState, TimedAssessment};
pub use collaborators::{
    AiCollaborators, AnalyzerError, BehaviouralAnalyzer, BehaviouralAssessment,
    QuestionGenerator, ResumeAnalysis, ResumeAnalyzer,
};
pub use decision::{DecisionConflict, DecisionEffect, DecisionOutcome};
pub use domain::{
    Applicant, ApplicantId, ApplicantStatus, AssessmentId, Candidate, CandidateApplication,
    CreateJobRequest, ExtractedEducation, ExtractedExperience, ExtractedSkill, Job, JobId,
    JobPosting, JobWeights, PersonalityTraits, ResumeDocument, SkillCategory, UserId,
    MAX_QUESTIONS,
};
pub use repository::{DecisionReceipt, RecruitingRepository, RepositoryError};
pub use router::{error_status, recruiting_router};
pub use scoring::{fit_score, ScoreBand, ScoringError};
pub use service::{
    AnswerReceipt, ApplicationDraft, AssessmentTicket, JobValidationError, RecruitingService,
    RecruitingServiceError,
};
