use std::collections::HashSet;

use super::super::domain::{CandidateApplication, ExtractedSkill, Job};
use super::views::SkillGapEntry;

/// Coverage of each required skill across the job's applicants.
///
/// `available` is the rounded share of applicants listing the skill
/// (case-insensitive exact name); `gap` is its complement so each pair sums
/// to 100. With no applicants every skill reports 0 available.
pub fn skill_gap(job: &Job) -> Vec<SkillGapEntry> {
    let total = job.applicants.len();

    job.required_skills
        .iter()
        .map(|skill| {
            let holders = job
                .applicants
                .iter()
                .filter(|applicant| applicant.has_skill(skill))
                .count();
            let available = percentage(holders, total);
            SkillGapEntry {
                skill: skill.clone(),
                required: 100,
                available,
                gap: 100 - available,
            }
        })
        .collect()
}

fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let (part, total) = (part as u64, total as u64);
    ((200 * part + total) / (2 * total)).min(100) as u8
}

/// Union of skills across a candidate's applications, first occurrence wins.
pub fn unique_skills(applications: &[CandidateApplication]) -> Vec<ExtractedSkill> {
    let mut seen = HashSet::new();
    applications
        .iter()
        .flat_map(|application| application.applicant.extracted_skills.iter())
        .filter(|skill| seen.insert(skill.name.clone()))
        .cloned()
        .collect()
}
