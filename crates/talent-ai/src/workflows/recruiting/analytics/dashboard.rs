use super::super::domain::{CandidateApplication, Job, JobId};
use super::super::scoring::ScoreBand;
use super::funnel::FunnelCounts;
use super::personality::average_traits;
use super::skills::{skill_gap, unique_skills};
use super::timeline::application_timeline;
use super::views::{
    CandidateApplicationView, CandidateDashboard, CandidateStats, JobApplicantCount,
    RecruiterDashboard, SkillGapReport,
};

const CHART_LABEL_LIMIT: usize = 15;

impl RecruiterDashboard {
    /// Aggregate every job. The skill-gap report covers `focus` when it names a
    /// known job, otherwise the first job listed.
    pub fn build(jobs: &[Job], focus: Option<&JobId>) -> Self {
        let counts = FunnelCounts::for_jobs(jobs);

        let scores: Vec<u64> = jobs
            .iter()
            .flat_map(|job| {
                job.applicants
                    .iter()
                    .map(|applicant| u64::from(applicant.effective_fit_score(job.weights)))
            })
            .collect();
        let average_fit_score = match scores.len() as u64 {
            0 => 0,
            n => ((2 * scores.iter().sum::<u64>() + n) / (2 * n)) as u8,
        };

        let applicants_per_job = jobs
            .iter()
            .map(|job| JobApplicantCount {
                job_id: job.id.clone(),
                chart_label: chart_label(&job.title),
                applicants: job.applicants.len(),
            })
            .collect();

        let personality =
            average_traits(jobs.iter().flat_map(|job| job.applicants.iter())).map(Into::into);

        let focused = focus
            .and_then(|id| jobs.iter().find(|job| &job.id == id))
            .or_else(|| jobs.first());
        let skill_gap = focused.map(|job| SkillGapReport {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            entries: skill_gap(job),
        });

        Self {
            total_jobs: jobs.len(),
            funnel: counts.to_view(),
            funnel_stages: counts.stages(),
            status_distribution: counts.status_distribution(),
            average_fit_score,
            applicants_per_job,
            personality,
            skill_gap,
        }
    }
}

fn chart_label(title: &str) -> String {
    if title.chars().count() > CHART_LABEL_LIMIT {
        let head: String = title.chars().take(CHART_LABEL_LIMIT).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

impl CandidateDashboard {
    pub fn build(applications: Vec<CandidateApplication>) -> Self {
        let counts = FunnelCounts::from_applicants(
            applications.iter().map(|application| &application.applicant),
        );
        let stats = CandidateStats {
            applied: counts.total,
            under_review: counts.under_review(),
            shortlisted: counts.shortlisted,
            rejected: counts.rejected,
        };
        let unique_skills = unique_skills(&applications);

        let applications = applications
            .into_iter()
            .map(|CandidateApplication { job, applicant }| {
                let fit_score = applicant.effective_fit_score(job.weights);
                CandidateApplicationView {
                    fit_score,
                    band_label: ScoreBand::from_score(fit_score).label(),
                    status_label: applicant.status.label(),
                    personality: applicant.personality_traits.map(Into::into),
                    timeline: application_timeline(&applicant),
                    job,
                    applicant,
                }
            })
            .collect();

        Self {
            stats,
            applications,
            unique_skills,
        }
    }

    pub fn has_applied(&self, job_id: &JobId) -> bool {
        self.applications
            .iter()
            .any(|application| &application.job.id == job_id)
    }
}
