use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{
    ExtractedEducation, ExtractedExperience, ExtractedSkill, PersonalityTraits, ResumeDocument,
};

/// Structured output of a resume analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub match_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub extracted_skills: Vec<ExtractedSkill>,
    pub extracted_experience: Vec<ExtractedExperience>,
    pub extracted_education: Vec<ExtractedEducation>,
    pub match_explanation: String,
}

/// Score and narrative for a set of behavioural answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviouralAssessment {
    pub score: u8,
    pub insights: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<PersonalityTraits>,
}

/// Failure reported by an analysis collaborator. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("analyzer unavailable: {0}")]
    Unavailable(String),
    #[error("analyzer rejected input: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, resume: &ResumeDocument) -> Result<ResumeAnalysis, AnalyzerError>;
}

#[async_trait]
pub trait BehaviouralAnalyzer: Send + Sync {
    async fn score(&self, answers: &[String]) -> Result<BehaviouralAssessment, AnalyzerError>;
}

#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Best effort; fewer than three prompts (or none) is a valid answer.
    async fn generate(&self, job_description: &str) -> Result<Vec<String>, AnalyzerError>;
}

/// The analysis collaborators the service depends on.
#[derive(Clone)]
pub struct AiCollaborators {
    pub resume: Arc<dyn ResumeAnalyzer>,
    pub behaviour: Arc<dyn BehaviouralAnalyzer>,
    pub questions: Arc<dyn QuestionGenerator>,
}

impl AiCollaborators {
    pub fn new(
        resume: Arc<dyn ResumeAnalyzer>,
        behaviour: Arc<dyn BehaviouralAnalyzer>,
        questions: Arc<dyn QuestionGenerator>,
    ) -> Self {
        Self {
            resume,
            behaviour,
            questions,
        }
    }
}
