//! Weighted fit scoring.
//!
//! `fit_score` is the only place the blend is computed. Everything that needs
//! an applicant's score goes through [`effective_fit_score`], which prefers the
//! value stored at submission time and recomputes only when none was stored.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{Applicant, JobWeights};

/// Validation failures for the scoring inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("resume and behaviour weights cannot both be zero")]
    ZeroCombinedWeight,
}

/// Blend two 0..=100 sub-scores by relative weight, rounding half up.
pub fn fit_score(
    resume_score: u8,
    behaviour_score: u8,
    resume_weight: u32,
    behaviour_weight: u32,
) -> Result<u8, ScoringError> {
    let total = resume_weight as u64 + behaviour_weight as u64;
    if total == 0 {
        return Err(ScoringError::ZeroCombinedWeight);
    }

    let weighted = resume_score.min(100) as u64 * resume_weight as u64
        + behaviour_score.min(100) as u64 * behaviour_weight as u64;

    // floor((2n + d) / 2d) == round-half-up(n / d) for non-negative integers.
    let rounded = (2 * weighted + total) / (2 * total);
    Ok(rounded as u8)
}

pub fn fit_score_for(
    resume_score: u8,
    behaviour_score: u8,
    weights: JobWeights,
) -> Result<u8, ScoringError> {
    fit_score(
        resume_score,
        behaviour_score,
        weights.resume,
        weights.behaviour,
    )
}

/// Score used for display, ranking, and aggregation.
///
/// A stored `fit_score` always wins. A record with no stored score and a
/// zero-weight job reports 0.
pub fn effective_fit_score(applicant: &Applicant, weights: JobWeights) -> u8 {
    if let Some(stored) = applicant.fit_score {
        return stored;
    }

    match fit_score_for(applicant.resume_score, applicant.behaviour_score, weights) {
        Ok(score) => score,
        Err(err) => {
            warn!(applicant_id = %applicant.id.0, %err, "fit score unavailable, reporting 0");
            0
        }
    }
}

impl Applicant {
    pub fn effective_fit_score(&self, weights: JobWeights) -> u8 {
        effective_fit_score(self, weights)
    }
}

/// Qualitative band for a fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= 85 {
            ScoreBand::Excellent
        } else if score >= 70 {
            ScoreBand::Good
        } else if score >= 50 {
            ScoreBand::Fair
        } else {
            ScoreBand::NeedsWork
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsWork => "Needs Work",
        }
    }
}
