use super::super::domain::{Applicant, ApplicantStatus, Job};
use super::views::{FunnelStageEntry, FunnelView, StatusBucket};

/// Decision counts for one or more jobs.
///
/// Only decided outcomes are tallied; the under-review figure is always
/// derived so the three buckets sum to `total` by construction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FunnelCounts {
    pub total: usize,
    pub shortlisted: usize,
    pub rejected: usize,
}

impl FunnelCounts {
    pub fn from_applicants<'a, I>(applicants: I) -> Self
    where
        I: IntoIterator<Item = &'a Applicant>,
    {
        applicants
            .into_iter()
            .fold(Self::default(), |mut counts, applicant| {
                counts.total += 1;
                match applicant.status {
                    ApplicantStatus::Shortlisted => counts.shortlisted += 1,
                    ApplicantStatus::Rejected => counts.rejected += 1,
                    ApplicantStatus::UnderReview => {}
                }
                counts
            })
    }

    pub fn for_job(job: &Job) -> Self {
        Self::from_applicants(&job.applicants)
    }

    pub fn for_jobs(jobs: &[Job]) -> Self {
        Self::from_applicants(jobs.iter().flat_map(|job| job.applicants.iter()))
    }

    pub fn under_review(&self) -> usize {
        self.total
            .saturating_sub(self.shortlisted)
            .saturating_sub(self.rejected)
    }

    pub fn count(&self, status: ApplicantStatus) -> usize {
        match status {
            ApplicantStatus::UnderReview => self.under_review(),
            ApplicantStatus::Shortlisted => self.shortlisted,
            ApplicantStatus::Rejected => self.rejected,
        }
    }

    pub fn to_view(&self) -> FunnelView {
        FunnelView {
            total: self.total,
            under_review: self.under_review(),
            shortlisted: self.shortlisted,
            rejected: self.rejected,
        }
    }

    /// Status buckets for the distribution chart; empty buckets are omitted.
    pub fn status_distribution(&self) -> Vec<StatusBucket> {
        ApplicantStatus::ordered()
            .into_iter()
            .map(|status| StatusBucket {
                status,
                status_label: status.label(),
                count: self.count(status),
            })
            .filter(|bucket| bucket.count > 0)
            .collect()
    }

    pub fn stages(&self) -> Vec<FunnelStageEntry> {
        vec![
            FunnelStageEntry {
                stage_label: "Applications",
                count: self.total,
            },
            FunnelStageEntry {
                stage_label: "Under Review",
                count: self.under_review(),
            },
            FunnelStageEntry {
                stage_label: "Shortlisted",
                count: self.shortlisted,
            },
        ]
    }
}
