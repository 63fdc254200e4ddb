use serde::{Deserialize, Serialize};

/// Commit counts summed over trailing windows of the weekly participation
/// timeline (52 buckets, most recent week last).
///
/// Invariant: `other = all - owner` for every window width. The arithmetic is
/// signed; inconsistent timelines can make `other` negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationStats {
    pub commits_owner_week: i64,
    pub commits_owner_two_weeks: i64,
    pub commits_owner_month: i64,
    pub commits_owner_year: i64,
    pub commits_all_week: i64,
    pub commits_all_two_weeks: i64,
    pub commits_all_month: i64,
    pub commits_all_year: i64,
    pub commits_other_week: i64,
    pub commits_other_two_weeks: i64,
    pub commits_other_month: i64,
    pub commits_other_year: i64,
}

impl ParticipationStats {
    /// Build the window sums from the owner-only and all-contributors weekly
    /// timelines.
    #[must_use]
    pub fn from_weekly(owner: &[i64], all: &[i64]) -> Self {
        let owner_week = sum_last(owner, Some(1));
        let owner_two_weeks = sum_last(owner, Some(2));
        let owner_month = sum_last(owner, Some(4));
        let owner_year = sum_last(owner, None);
        let all_week = sum_last(all, Some(1));
        let all_two_weeks = sum_last(all, Some(2));
        let all_month = sum_last(all, Some(4));
        let all_year = sum_last(all, None);

        Self {
            commits_owner_week: owner_week,
            commits_owner_two_weeks: owner_two_weeks,
            commits_owner_month: owner_month,
            commits_owner_year: owner_year,
            commits_all_week: all_week,
            commits_all_two_weeks: all_two_weeks,
            commits_all_month: all_month,
            commits_all_year: all_year,
            commits_other_week: all_week - owner_week,
            commits_other_two_weeks: all_two_weeks - owner_two_weeks,
            commits_other_month: all_month - owner_month,
            commits_other_year: all_year - owner_year,
        }
    }
}

/// Sum of the trailing `n` buckets, or of the whole timeline when `n` is `None`.
fn sum_last(buckets: &[i64], n: Option<usize>) -> i64 {
    let start = n.map_or(0, |n| buckets.len().saturating_sub(n));
    buckets[start..].iter().sum()
}
