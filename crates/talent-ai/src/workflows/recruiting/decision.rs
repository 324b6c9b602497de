//! Hiring decision lock.
//!
//! An applicant leaves `UnderReview` only through [`decide`], which also sets
//! `locked`. [`unlock`] clears the lock without touching the status so a
//! recruiter can re-decide. Conflicts are reported as [`DecisionEffect::NoEffect`]
//! rather than errors.

use serde::{Deserialize, Serialize};

use super::domain::{Applicant, ApplicantStatus};

/// Final outcomes a recruiter can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Shortlisted,
    Rejected,
}

impl DecisionOutcome {
    pub const fn status(self) -> ApplicantStatus {
        match self {
            DecisionOutcome::Shortlisted => ApplicantStatus::Shortlisted,
            DecisionOutcome::Rejected => ApplicantStatus::Rejected,
        }
    }

    pub const fn label(self) -> &'static str {
        self.status().label()
    }
}

impl From<DecisionOutcome> for ApplicantStatus {
    fn from(value: DecisionOutcome) -> Self {
        value.status()
    }
}

/// Why a decision operation left the applicant untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum DecisionConflict {
    AlreadyLocked { status: ApplicantStatus },
    NotLocked,
}

impl DecisionConflict {
    pub fn summary(&self) -> String {
        match self {
            DecisionConflict::AlreadyLocked { status } => {
                format!("decision already locked as {}", status.label())
            }
            DecisionConflict::NotLocked => "decision is not locked".to_string(),
        }
    }
}

/// Result of a decide/unlock attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum DecisionEffect {
    Applied,
    NoEffect(DecisionConflict),
}

impl DecisionEffect {
    pub const fn applied(&self) -> bool {
        matches!(self, DecisionEffect::Applied)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            DecisionEffect::Applied => "applied",
            DecisionEffect::NoEffect(_) => "no_effect",
        }
    }
}

/// Record a final outcome and lock it. No-op while already locked.
pub fn decide(applicant: &mut Applicant, outcome: DecisionOutcome) -> DecisionEffect {
    if applicant.locked {
        return DecisionEffect::NoEffect(DecisionConflict::AlreadyLocked {
            status: applicant.status,
        });
    }

    applicant.status = outcome.status();
    applicant.locked = true;
    DecisionEffect::Applied
}

/// Clear the lock, keeping the recorded status. No-op while unlocked.
pub fn unlock(applicant: &mut Applicant) -> DecisionEffect {
    if !applicant.locked {
        return DecisionEffect::NoEffect(DecisionConflict::NotLocked);
    }

    applicant.locked = false;
    DecisionEffect::Applied
}
