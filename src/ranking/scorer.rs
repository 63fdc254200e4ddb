//! Scoring logic for evaluating repository activity and health.

use crate::metrics::RepoMetrics;

/// Empirical mean team response time in hours; answering faster than this
/// baseline (less a 72-hour grace) earns credit.
const RESPONSE_HOURS_BASELINE: f64 = 710.0;

/// Compute the heuristic score for one repository. Higher is better; the
/// value is unbounded in both directions.
///
/// Each term contributes only when its guard holds, so a denominator is never
/// touched unless the same guard proves it non-zero. Skipped terms contribute
/// nothing rather than a penalty, except where a term is itself negative.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
pub fn score(m: &RepoMetrics) -> f64 {
    // Popularity, saturating at 100 subscribers and 250 forks.
    let mut score = 0.5 * (m.subscribers as f64 / 2.0).min(50.0) / 50.0;
    score += 0.5 * (m.forks as f64 / 5.0).min(50.0) / 50.0;

    let recent_total = m.issues_by_others_count as f64;
    let recent_open = m.issues_by_others_open as f64;
    let without_comments = m.issues_by_others_without_comments as f64;

    // Reward a low open-to-total ratio among recent outside issues once there
    // is enough traffic; more open than closed drives this negative.
    if m.issues_by_others_open > 5 {
        score += 2.0 * (0.5 - recent_open / recent_total);
    }

    // A standing backlog that dwarfs the freshly opened issues costs points.
    if m.issues_by_others_open > 0 && m.open_issues > 0 {
        let backlog = m.open_issues as f64;
        score -= (1.0 - recent_open / backlog) * (backlog / 100.0).min(1.0);
    }

    if m.issues_by_others_closed > 0 {
        score += 2.0 * (m.issues_by_others_closed as f64).min(50.0) / 50.0;
    }

    // Unanswered outside issues hurt in proportion to their share, scaled by
    // absolute volume.
    if m.issues_by_others_without_comments > 0 {
        score -= 4.0 * without_comments / recent_total * ((without_comments / 2.0).min(15.0) / 15.0);
    }

    if let Some(hours) = m.issues_by_others_avg_response_hours {
        score += 0.5 * (RESPONSE_HOURS_BASELINE - hours as f64 - 72.0).max(0.0) / RESPONSE_HOURS_BASELINE;
    }

    if let Some(days) = m.issues_by_others_avg_resolve_days {
        score += 0.5 * (30.0 - days as f64 - 7.0).max(0.0) / 30.0;
    }

    // Commit recency ladder, one rung only: recent activity earns a small
    // bonus, a year of near-silence a flat penalty, and anything in between a
    // staleness penalty graded by the days since the last push.
    if m.commits_all_two_weeks > 0 {
        score += 0.2;
    } else if m.commits_all_month > 0 {
        score += 0.1;
    } else if m.commits_all_year <= 1 {
        score -= 1.0;
    } else {
        score -= ((m.pushed_days_ago as f64 / 30.0) / 12.0).min(1.0);
    }

    score += (m.commits_all_month as f64).min(10.0) / 10.0;

    if m.releases_count > 0 {
        score += 0.3 * (m.releases_count as f64).min(14.0) / 14.0;
        score += 0.2 * (m.releases_count_in_two_months as f64).min(2.0) / 2.0;
    }

    score += (m.tags as f64).min(8.0) / 8.0;

    score
}
