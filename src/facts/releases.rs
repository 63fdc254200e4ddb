use crate::facts::{recent_window_start, round_days, round_days_ms};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One release, reduced to what cadence statistics need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    pub published_at: DateTime<Utc>,
    pub draft: bool,
    pub prerelease: bool,
}

impl ReleaseRecord {
    /// A final release is neither a draft nor a prerelease.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        !self.draft && !self.prerelease
    }
}

/// Release cadence summary, overall and restricted to the trailing two-month
/// window. Gap averages need at least two releases in the relevant set and
/// are `None` otherwise; `None` always means "not computable", never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseStats {
    pub count: usize,
    pub last: Option<DateTime<Utc>>,
    pub last_in_days: Option<i64>,
    pub avg_release_time: Option<i64>,
    pub count_in_two_months: usize,
    pub avg_release_time_in_two_months: Option<i64>,
    pub count_final_in_two_months: usize,
    pub avg_final_release_time_in_two_months: Option<i64>,
    pub count_prerelease_in_two_months: usize,
}

impl ReleaseStats {
    /// Summarize release cadence as of the given instant. Releases are walked
    /// newest first.
    #[must_use]
    pub fn from_releases(mut releases: Vec<ReleaseRecord>, as_of: DateTime<Utc>) -> Self {
        if releases.is_empty() {
            return Self::default();
        }

        releases.sort_by_key(|release| core::cmp::Reverse(release.published_at));

        let published: Vec<_> = releases.iter().map(|release| release.published_at).collect();
        let last = published[0];

        let window_start = recent_window_start(as_of);
        let recent: Vec<&ReleaseRecord> = releases.iter().filter(|release| release.published_at >= window_start).collect();
        let recent_published: Vec<_> = recent.iter().map(|release| release.published_at).collect();
        let final_published: Vec<_> = recent.iter().filter(|release| release.is_final()).map(|release| release.published_at).collect();
        let final_count = final_published.len();

        Self {
            count: releases.len(),
            last: Some(last),
            last_in_days: Some(round_days(as_of - last)),
            avg_release_time: mean_gap_ms(&published).map(round_days_ms),
            count_in_two_months: recent.len(),
            avg_release_time_in_two_months: mean_gap_ms(&recent_published).map(round_days_ms),
            count_final_in_two_months: final_count,
            avg_final_release_time_in_two_months: mean_gap_ms(&final_published).map(round_days_ms),
            count_prerelease_in_two_months: recent.len() - final_count,
        }
    }
}

/// Mean gap between consecutive timestamps in milliseconds, walking the slice
/// in the given order. The deltas are signed, so an out-of-order sequence can
/// produce a negative mean. `None` with fewer than two timestamps.
#[expect(clippy::cast_precision_loss, reason = "spans and pair counts are far below 2^52")]
fn mean_gap_ms(published: &[DateTime<Utc>]) -> Option<f64> {
    if published.len() < 2 {
        return None;
    }

    let total_ms: i64 = published.windows(2).map(|pair| (pair[0] - pair[1]).num_milliseconds()).sum();
    Some(total_ms as f64 / (published.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn release(days_ago: i64) -> ReleaseRecord {
        ReleaseRecord {
            published_at: as_of() - Duration::days(days_ago),
            draft: false,
            prerelease: false,
        }
    }

    #[test]
    fn no_releases_is_all_sentinels() {
        let stats = ReleaseStats::from_releases(Vec::new(), as_of());

        assert_eq!(stats, ReleaseStats::default());
        assert_eq!(stats.avg_release_time, None);
    }

    #[test]
    fn one_release_has_no_gap_average() {
        let stats = ReleaseStats::from_releases(vec![release(10)], as_of());

        assert_eq!(stats.count, 1);
        assert_eq!(stats.last_in_days, Some(10));
        assert_eq!(stats.avg_release_time, None);
    }

    #[test]
    fn gap_average_is_the_mean_pairwise_delta() {
        // Publishes at days 25, 10 and 0, walked newest first: deltas of
        // 10 and 15 days between consecutive releases, mean 12.5 days.
        let published: Vec<_> = [0, 10, 25].map(|d| as_of() - Duration::days(d)).into_iter().collect();
        assert_eq!(mean_gap_ms(&published), Some(12.5 * 86_400_000.0));

        // The stored day count carries the rounded value.
        let stats = ReleaseStats::from_releases(vec![release(25), release(0), release(10)], as_of());
        assert_eq!(stats.avg_release_time, Some(13));
        assert_eq!(stats.last_in_days, Some(0));
    }

    #[test]
    fn gap_deltas_keep_their_sign() {
        // Oldest first, so every delta is negative.
        let published: Vec<_> = [25, 10, 0].map(|d| as_of() - Duration::days(d)).into_iter().collect();

        assert_eq!(mean_gap_ms(&published), Some(-12.5 * 86_400_000.0));
    }

    #[test]
    fn two_month_window_splits_final_and_pre_releases() {
        let mut pre = release(20);
        pre.prerelease = true;

        let releases = vec![release(5), pre, release(40), release(100), release(200)];
        let stats = ReleaseStats::from_releases(releases, as_of());

        assert_eq!(stats.count, 5);
        assert_eq!(stats.count_in_two_months, 3);
        assert_eq!(stats.count_final_in_two_months, 2);
        assert_eq!(stats.count_prerelease_in_two_months, 1);
        // Final releases 5 and 40 days ago: a single 35-day gap.
        assert_eq!(stats.avg_final_release_time_in_two_months, Some(35));
        // All recent releases: gaps of 15 and 20 days, mean 17.5, rounded.
        assert_eq!(stats.avg_release_time_in_two_months, Some(18));
    }
}
