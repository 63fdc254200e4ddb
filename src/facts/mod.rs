//! Data collection and aggregation.

mod fetcher;
pub mod github;
mod issues;
mod paged;
mod participation;
mod provider_result;
mod releases;
mod repo_record;
mod repo_spec;
pub mod snapshot;

pub use fetcher::Fetcher;
pub use github::GithubClient;
pub use issues::{AuthorAssociation, CommentRecord, IssueBreakdown, IssueRecord, IssueState, IssueStats, PullRequestRecord, PullStats};
pub use paged::{PageParams, fetch_paged};
pub use participation::ParticipationStats;
pub use provider_result::FetchResult;
pub use releases::{ReleaseRecord, ReleaseStats};
pub use repo_record::RepoRecord;
pub use repo_spec::RepoSpec;

use chrono::{DateTime, Months, TimeDelta, Utc};

const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Start of the trailing two-month recency window ending at `as_of`.
#[must_use]
pub fn recent_window_start(as_of: DateTime<Utc>) -> DateTime<Utc> {
    as_of.checked_sub_months(Months::new(2)).unwrap_or(as_of)
}

/// Round a time span to whole days, the granularity the statistics report.
#[expect(clippy::cast_precision_loss, reason = "spans are far below 2^52 milliseconds")]
pub(crate) fn round_days(span: TimeDelta) -> i64 {
    round_days_ms(span.num_milliseconds() as f64)
}

#[expect(clippy::cast_possible_truncation, reason = "rounded day counts fit in i64")]
pub(crate) fn round_days_ms(ms: f64) -> i64 {
    (ms / MS_PER_DAY).round() as i64
}

#[expect(clippy::cast_possible_truncation, reason = "rounded hour counts fit in i64")]
pub(crate) fn round_hours_ms(ms: f64) -> i64 {
    (ms / MS_PER_HOUR).round() as i64
}
