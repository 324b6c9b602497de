use chrono::{NaiveDate, TimeZone, Utc};

use super::super::domain::{
    Applicant, ApplicantId, ApplicantStatus, ExtractedSkill, Job, JobId, JobWeights,
    PersonalityTraits, ResumeDocument, SkillCategory, UserId,
};

pub(super) fn job(required_skills: &[&str]) -> Job {
    let posted = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
    Job {
        id: JobId("job-fixture".to_string()),
        title: "AI Engineer".to_string(),
        company: "TechCorp AI".to_string(),
        description: "Build production ML systems".to_string(),
        deadline: NaiveDate::from_ymd_opt(2026, 4, 15).expect("valid date"),
        questions: Vec::new(),
        weights: JobWeights::default(),
        required_skills: required_skills.iter().map(|skill| skill.to_string()).collect(),
        applicants: Vec::new(),
        created_at: posted,
        created_by: UserId("recruiter-1".to_string()),
    }
}

pub(super) fn applicant(id: &str) -> Applicant {
    Applicant {
        id: ApplicantId(id.to_string()),
        user_id: UserId(format!("user-{id}")),
        name: format!("Candidate {id}"),
        applied_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        resume: ResumeDocument {
            name: format!("{id}.pdf"),
            url: format!("blob:{id}"),
        },
        resume_score: 80,
        behaviour_score: 80,
        fit_score: Some(80),
        resume_insights: String::new(),
        behaviour_insights: String::new(),
        status: ApplicantStatus::UnderReview,
        locked: false,
        behavioural_answers: Vec::new(),
        personality_traits: None,
        extracted_skills: Vec::new(),
        extracted_experience: Vec::new(),
        extracted_education: Vec::new(),
        match_explanation: None,
    }
}

pub(super) fn skill(name: &str) -> ExtractedSkill {
    ExtractedSkill {
        name: name.to_string(),
        relevance: 80,
        category: SkillCategory::Technical,
    }
}

pub(super) fn traits(
    openness: u8,
    conscientiousness: u8,
    extraversion: u8,
    agreeableness: u8,
    neuroticism: u8,
) -> PersonalityTraits {
    PersonalityTraits {
        openness,
        conscientiousness,
        extraversion,
        agreeableness,
        neuroticism,
    }
}
