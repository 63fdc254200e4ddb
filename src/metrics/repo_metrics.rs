use crate::facts::{RepoRecord, round_days};
use chrono::{DateTime, Utc};

/// Scalar scoring inputs flattened out of a repository record.
///
/// Field names mirror the nested fields they come from
/// (`issues_by_others_open` is `issues.by_others.open`); the age fields are
/// derived against the explicit as-of instant so scoring stays clear of the
/// wall clock.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoMetrics {
    pub id: u64,
    pub name: String,
    pub stargazers: u64,
    pub subscribers: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub tags: usize,
    pub created_days_ago: i64,
    pub updated_days_ago: i64,
    pub pushed_days_ago: i64,
    pub commits_all_two_weeks: i64,
    pub commits_all_month: i64,
    pub commits_all_year: i64,
    pub releases_count: usize,
    pub releases_count_in_two_months: usize,
    pub issues_by_others_count: usize,
    pub issues_by_others_open: usize,
    pub issues_by_others_closed: usize,
    pub issues_by_others_without_comments: usize,
    pub issues_by_others_avg_resolve_days: Option<i64>,
    pub issues_by_others_avg_response_hours: Option<i64>,
}

impl RepoMetrics {
    /// Flatten a record as of the given instant.
    #[must_use]
    pub fn from_record(record: &RepoRecord, as_of: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            stargazers: record.stargazers,
            subscribers: record.subscribers,
            forks: record.forks,
            open_issues: record.open_issues,
            tags: record.tags,
            created_days_ago: round_days(as_of - record.created_at),
            updated_days_ago: round_days(as_of - record.updated_at),
            pushed_days_ago: round_days(as_of - record.pushed_at),
            commits_all_two_weeks: record.participation.commits_all_two_weeks,
            commits_all_month: record.participation.commits_all_month,
            commits_all_year: record.participation.commits_all_year,
            releases_count: record.releases.count,
            releases_count_in_two_months: record.releases.count_in_two_months,
            issues_by_others_count: record.issues.by_others.count,
            issues_by_others_open: record.issues.by_others.open,
            issues_by_others_closed: record.issues.by_others.closed,
            issues_by_others_without_comments: record.issues.by_others.without_comments,
            issues_by_others_avg_resolve_days: record.issues.by_others.avg_resolve_days,
            issues_by_others_avg_response_hours: record.issues.by_others.avg_response_hours,
        }
    }
}
