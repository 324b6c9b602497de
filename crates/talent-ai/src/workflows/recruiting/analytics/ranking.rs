use std::cmp::Reverse;

use super::super::domain::{Applicant, Job};
use super::super::scoring::ScoreBand;
use super::views::RankedApplicant;

/// Applicants of `job` ordered by effective fit score, best first.
///
/// Ties keep submission order, so the `#N` badge is stable across reloads.
pub fn rank_applicants(job: &Job) -> Vec<RankedApplicant> {
    let mut scored: Vec<(u8, &Applicant)> = job
        .applicants
        .iter()
        .map(|applicant| (applicant.effective_fit_score(job.weights), applicant))
        .collect();

    // `sort_by_key` is stable.
    scored.sort_by_key(|(score, _)| Reverse(*score));

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (fit_score, applicant))| {
            let band = ScoreBand::from_score(fit_score);
            RankedApplicant {
                rank: index + 1,
                fit_score,
                band,
                band_label: band.label(),
                status_label: applicant.status.label(),
                applicant: applicant.clone(),
            }
        })
        .collect()
}
