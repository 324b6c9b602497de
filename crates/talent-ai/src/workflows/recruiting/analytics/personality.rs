use super::super::domain::{Applicant, PersonalityTraits};

/// Per-trait mean across applicants that carry traits, rounded half up.
///
/// Applicants without traits are skipped entirely. Returns `None` when no
/// applicant has any.
pub fn average_traits<'a, I>(applicants: I) -> Option<PersonalityTraits>
where
    I: IntoIterator<Item = &'a Applicant>,
{
    let mut sums = [0u64; 5];
    let mut count = 0u64;

    for traits in applicants
        .into_iter()
        .filter_map(|applicant| applicant.personality_traits.as_ref())
    {
        let values = [
            traits.openness,
            traits.conscientiousness,
            traits.extraversion,
            traits.agreeableness,
            traits.neuroticism,
        ];
        for (sum, value) in sums.iter_mut().zip(values) {
            *sum += u64::from(value);
        }
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let mean = |sum: u64| ((2 * sum + count) / (2 * count)) as u8;
    Some(PersonalityTraits {
        openness: mean(sums[0]),
        conscientiousness: mean(sums[1]),
        extraversion: mean(sums[2]),
        agreeableness: mean(sums[3]),
        neuroticism: mean(sums[4]),
    })
}
