use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::domain::{Applicant, ApplicantStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub key: &'static str,
    pub label: &'static str,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TimelineStep {
    const fn new(key: &'static str, label: &'static str, status: StepStatus) -> Self {
        Self {
            key,
            label,
            status,
            timestamp: None,
        }
    }
}

/// Progress steps shown to the candidate for one application.
pub fn application_timeline(applicant: &Applicant) -> Vec<TimelineStep> {
    let review = match applicant.status {
        ApplicantStatus::UnderReview => StepStatus::Current,
        _ => StepStatus::Completed,
    };

    let decision = match applicant.status {
        ApplicantStatus::Shortlisted => {
            TimelineStep::new("shortlisted", "Shortlisted", StepStatus::Completed)
        }
        ApplicantStatus::Rejected => {
            TimelineStep::new("decision", "Not Selected", StepStatus::Completed)
        }
        ApplicantStatus::UnderReview => {
            TimelineStep::new("decision", "Final Decision", StepStatus::Pending)
        }
    };

    vec![
        TimelineStep {
            timestamp: Some(applicant.applied_at),
            ..TimelineStep::new("applied", "Application Submitted", StepStatus::Completed)
        },
        TimelineStep::new("resume", "Resume Analyzed", StepStatus::Completed),
        TimelineStep::new("behavioural", "Behavioural Assessment", StepStatus::Completed),
        TimelineStep::new("review", "Under Review", review),
        decision,
    ]
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::applicant;
    use super::*;

    #[test]
    fn pending_decision_while_under_review() {
        let entry = applicant("a");
        let steps = application_timeline(&entry);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].timestamp, Some(entry.applied_at));
        assert_eq!(steps[3].status, StepStatus::Current);
        assert_eq!(steps[4].label, "Final Decision");
        assert_eq!(steps[4].status, StepStatus::Pending);
    }

    #[test]
    fn decided_applications_complete_the_timeline() {
        let mut entry = applicant("a");
        entry.status = ApplicantStatus::Rejected;
        entry.locked = true;
        let steps = application_timeline(&entry);
        assert!(steps.iter().all(|step| step.status == StepStatus::Completed));
        assert_eq!(steps[4].label, "Not Selected");

        entry.status = ApplicantStatus::Shortlisted;
        assert_eq!(application_timeline(&entry)[4].key, "shortlisted");
    }
}
