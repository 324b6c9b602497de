use serde::Serialize;

use super::super::domain::{
    Applicant, ApplicantStatus, ExtractedSkill, JobId, JobPosting, PersonalityTraits,
};
use super::super::scoring::ScoreBand;
use super::timeline::TimelineStep;

#[derive(Debug, Clone, Serialize)]
pub struct RankedApplicant {
    pub rank: usize,
    pub fit_score: u8,
    pub band: ScoreBand,
    pub band_label: &'static str,
    pub status_label: &'static str,
    pub applicant: Applicant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunnelView {
    pub total: usize,
    pub under_review: usize,
    pub shortlisted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBucket {
    pub status: ApplicantStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunnelStageEntry {
    pub stage_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGapEntry {
    pub skill: String,
    pub required: u8,
    pub available: u8,
    pub gap: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGapReport {
    pub job_id: JobId,
    pub job_title: String,
    pub entries: Vec<SkillGapEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobApplicantCount {
    pub job_id: JobId,
    pub chart_label: String,
    pub applicants: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalityProfileView {
    pub traits: PersonalityTraits,
    pub emotional_stability: u8,
}

impl From<PersonalityTraits> for PersonalityProfileView {
    fn from(traits: PersonalityTraits) -> Self {
        Self {
            emotional_stability: traits.emotional_stability(),
            traits,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecruiterDashboard {
    pub total_jobs: usize,
    pub funnel: FunnelView,
    pub funnel_stages: Vec<FunnelStageEntry>,
    pub status_distribution: Vec<StatusBucket>,
    pub average_fit_score: u8,
    pub applicants_per_job: Vec<JobApplicantCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<PersonalityProfileView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_gap: Option<SkillGapReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateStats {
    pub applied: usize,
    pub under_review: usize,
    pub shortlisted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateApplicationView {
    pub job: JobPosting,
    pub applicant: Applicant,
    pub fit_score: u8,
    pub band_label: &'static str,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<PersonalityProfileView>,
    pub timeline: Vec<TimelineStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateDashboard {
    pub stats: CandidateStats,
    pub applications: Vec<CandidateApplicationView>,
    pub unique_skills: Vec<ExtractedSkill>,
}
