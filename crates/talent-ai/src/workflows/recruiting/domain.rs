use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of behavioural prompts attached to a job.
pub const MAX_QUESTIONS: usize = 3;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for applicants, unique within their job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Handle for an in-progress timed assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Weak reference to a platform user (candidate or recruiter).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Relative weights used when blending resume and behaviour scores.
///
/// The pair is relative, not a percentage split: `50/20` and `5/2` rank
/// applicants identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobWeights {
    pub resume: u32,
    pub behaviour: u32,
}

impl JobWeights {
    pub const fn total(self) -> u64 {
        self.resume as u64 + self.behaviour as u64
    }
}

impl Default for JobWeights {
    fn default() -> Self {
        Self {
            resume: 50,
            behaviour: 20,
        }
    }
}

/// A posted job together with the applicants it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub questions: Vec<String>,
    pub weights: JobWeights,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub applicants: Vec<Applicant>,
    pub created_at: NaiveDate,
    pub created_by: UserId,
}

impl Job {
    pub fn applicant(&self, id: &ApplicantId) -> Option<&Applicant> {
        self.applicants.iter().find(|applicant| &applicant.id == id)
    }

    pub fn applicant_mut(&mut self, id: &ApplicantId) -> Option<&mut Applicant> {
        self.applicants.iter_mut().find(|applicant| &applicant.id == id)
    }

    /// First applicant submitted by `user_id`, mirroring how candidate views resolve them.
    pub fn applicant_for_user(&self, user_id: &UserId) -> Option<&Applicant> {
        self.applicants
            .iter()
            .find(|applicant| &applicant.user_id == user_id)
    }

    /// Prompts shown during the timed assessment, capped at [`MAX_QUESTIONS`].
    pub fn assessment_questions(&self) -> &[String] {
        let end = self.questions.len().min(MAX_QUESTIONS);
        &self.questions[..end]
    }

    pub fn posting(&self) -> JobPosting {
        JobPosting {
            id: self.id.clone(),
            title: self.title.clone(),
            company: self.company.clone(),
            description: self.description.clone(),
            deadline: self.deadline,
            questions: self.questions.clone(),
            weights: self.weights,
            required_skills: self.required_skills.clone(),
            applicant_count: self.applicants.len(),
            created_at: self.created_at,
            created_by: self.created_by.clone(),
        }
    }
}

/// Job metadata without the applicant collection, safe to hand to candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub questions: Vec<String>,
    pub weights: JobWeights,
    pub required_skills: Vec<String>,
    pub applicant_count: usize,
    pub created_at: NaiveDate,
    pub created_by: UserId,
}

/// Recruiter input for a new posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub description: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub weights: Option<JobWeights>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// Uploaded resume metadata; the blob itself lives behind `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: String,
    pub url: String,
}

/// Identity of the candidate submitting an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub user_id: UserId,
    pub name: String,
}

/// Review status tracked per applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStatus {
    UnderReview,
    Shortlisted,
    Rejected,
}

impl ApplicantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantStatus::UnderReview => "Under Review",
            ApplicantStatus::Shortlisted => "Shortlisted",
            ApplicantStatus::Rejected => "Rejected",
        }
    }

    pub const fn ordered() -> [ApplicantStatus; 3] {
        [
            ApplicantStatus::UnderReview,
            ApplicantStatus::Shortlisted,
            ApplicantStatus::Rejected,
        ]
    }
}

/// A single submission against a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub user_id: UserId,
    pub name: String,
    pub applied_at: DateTime<Utc>,
    pub resume: ResumeDocument,
    pub resume_score: u8,
    pub behaviour_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_score: Option<u8>,
    #[serde(default)]
    pub resume_insights: String,
    #[serde(default)]
    pub behaviour_insights: String,
    pub status: ApplicantStatus,
    pub locked: bool,
    #[serde(default)]
    pub behavioural_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_traits: Option<PersonalityTraits>,
    #[serde(default)]
    pub extracted_skills: Vec<ExtractedSkill>,
    #[serde(default)]
    pub extracted_experience: Vec<ExtractedExperience>,
    #[serde(default)]
    pub extracted_education: Vec<ExtractedEducation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_explanation: Option<String>,
}

impl Applicant {
    /// `locked` may only be set alongside a final decision.
    pub fn lock_invariant_holds(&self) -> bool {
        !self.locked || self.status != ApplicantStatus::UnderReview
    }

    /// Exact skill name match under full Unicode lowercasing.
    pub fn has_skill(&self, skill: &str) -> bool {
        let wanted = skill.to_lowercase();
        self.extracted_skills
            .iter()
            .any(|extracted| extracted.name.to_lowercase() == wanted)
    }
}

/// Big-five traits inferred from behavioural answers, each nominally 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
}

impl PersonalityTraits {
    /// Display-only inverse of neuroticism.
    pub fn emotional_stability(&self) -> u8 {
        100u8.saturating_sub(self.neuroticism)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Soft,
    Domain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub name: String,
    pub relevance: u8,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedExperience {
    pub company: String,
    pub role: String,
    pub duration: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEducation {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub year: String,
}

/// A candidate's view of one of their applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateApplication {
    pub job: JobPosting,
    pub applicant: Applicant,
}
