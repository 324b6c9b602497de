//! Read-only reductions over jobs and applicants feeding the dashboards.

mod dashboard;
mod funnel;
mod personality;
mod ranking;
mod skills;
mod timeline;
pub mod views;

#[cfg(test)]
mod fixtures;

pub use funnel::FunnelCounts;
pub use personality::average_traits;
pub use ranking::rank_applicants;
pub use skills::{skill_gap, unique_skills};
pub use timeline::{application_timeline, StepStatus, TimelineStep};
pub use views::{
    CandidateApplicationView, CandidateDashboard, CandidateStats, FunnelStageEntry, FunnelView,
    JobApplicantCount, PersonalityProfileView, RankedApplicant, RecruiterDashboard,
    SkillGapEntry, SkillGapReport, StatusBucket,
};
