use crate::facts::{round_days_ms, round_hours_ms};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::Display;

/// Relationship of an author to the repository, as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorAssociation {
    Owner,
    Member,
    Collaborator,
    Contributor,
    FirstTimeContributor,
    FirstTimer,
    Mannequin,
    None,
}

impl AuthorAssociation {
    /// Team membership: owners, members, and collaborators.
    #[must_use]
    pub const fn in_team(self) -> bool {
        matches!(self, Self::Owner | Self::Member | Self::Collaborator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// An issue in the recency window, with its matched comments attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub project_id: u64,
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub comments_count: u64,
    pub author_association: AuthorAssociation,
    pub author: String,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub comments: Vec<CommentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub project_id: u64,
    pub issue_id: u64,
    pub id: u64,
    pub author_association: AuthorAssociation,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub project_id: u64,
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub author_association: AuthorAssociation,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    pub closed: bool,
    pub merged: bool,
}

/// Issue statistics for one partition of the record set.
///
/// `avg_resolve_days` averages over closed issues only and `avg_response_hours`
/// over issues that received a team reply; both are `None` when no issue
/// qualifies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStats {
    pub count: usize,
    pub open: usize,
    pub closed: usize,
    pub without_comments: usize,
    pub avg_resolve_days: Option<i64>,
    pub avg_response_hours: Option<i64>,
}

/// Pull-request statistics. Computed and carried on the record, but the score
/// does not consume them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullStats {
    pub count: usize,
    pub open: usize,
    pub closed: usize,
    pub merged: usize,
    pub merge_ratio: Option<f64>,
    pub avg_resolve_hours: Option<i64>,
}

/// Issue statistics split by whether the author is on the team, plus the
/// pull-request summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueBreakdown {
    pub by_team: IssueStats,
    pub by_others: IssueStats,
    pub total: IssueStats,
    pub pulls: PullStats,
}

impl IssueBreakdown {
    /// Partition the issue set by team membership and compute per-partition
    /// statistics.
    #[must_use]
    pub fn from_records(issues: &[IssueRecord], pulls: &[PullRequestRecord]) -> Self {
        let by_team: Vec<&IssueRecord> = issues.iter().filter(|issue| issue.author_association.in_team()).collect();
        let by_others: Vec<&IssueRecord> = issues.iter().filter(|issue| !issue.author_association.in_team()).collect();
        let total: Vec<&IssueRecord> = issues.iter().collect();

        Self {
            by_team: IssueStats::from_issues(&by_team),
            by_others: IssueStats::from_issues(&by_others),
            total: IssueStats::from_issues(&total),
            pulls: PullStats::from_pulls(pulls),
        }
    }
}

impl IssueStats {
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "issue counts are far below 2^52")]
    pub fn from_issues(issues: &[&IssueRecord]) -> Self {
        let closed: Vec<_> = issues.iter().filter(|issue| issue.state == IssueState::Closed).collect();
        let open = issues.iter().filter(|issue| issue.state == IssueState::Open).count();
        let without_comments = issues.iter().filter(|issue| issue.comments_count == 0).count();

        let avg_resolve_days = if closed.is_empty() {
            None
        } else {
            let total_ms: i64 = closed
                .iter()
                .filter_map(|issue| issue.closed_at.map(|closed_at| (closed_at - issue.created_at).num_milliseconds()))
                .sum();
            Some(round_days_ms(total_ms as f64 / closed.len() as f64))
        };

        let response_times: Vec<i64> = issues.iter().filter_map(|issue| team_response_ms(issue)).collect();
        let avg_response_hours = if response_times.is_empty() {
            None
        } else {
            let total_ms: i64 = response_times.iter().sum();
            Some(round_hours_ms(total_ms as f64 / response_times.len() as f64))
        };

        Self {
            count: issues.len(),
            open,
            closed: closed.len(),
            without_comments,
            avg_resolve_days,
            avg_response_hours,
        }
    }
}

impl PullStats {
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "pull counts are far below 2^52")]
    pub fn from_pulls(pulls: &[PullRequestRecord]) -> Self {
        let closed: Vec<_> = pulls.iter().filter(|pull| pull.state == IssueState::Closed).collect();
        let open = pulls.iter().filter(|pull| pull.state == IssueState::Open).count();
        let merged = closed.iter().filter(|pull| pull.merged).count();

        let merge_ratio = if closed.is_empty() {
            None
        } else {
            Some((merged as f64 / closed.len() as f64 * 100.0).round() / 100.0)
        };

        let avg_resolve_hours = if closed.is_empty() {
            None
        } else {
            let total_ms: i64 = closed
                .iter()
                .filter_map(|pull| pull.closed_at.map(|closed_at| (closed_at - pull.created_at).num_milliseconds()))
                .sum();
            Some(round_hours_ms(total_ms as f64 / closed.len() as f64))
        };

        Self {
            count: pulls.len(),
            open,
            closed: closed.len(),
            merged,
            merge_ratio,
            avg_resolve_hours,
        }
    }
}

/// Attach comments to their parent issues, matching on the issue number.
/// Issues without matches get an empty sequence.
pub fn attach_comments(issues: &mut [IssueRecord], comments: Vec<CommentRecord>) {
    let mut grouped: HashMap<u64, Vec<CommentRecord>> = HashMap::new();
    for comment in comments {
        grouped.entry(comment.issue_id).or_default().push(comment);
    }

    for issue in issues {
        issue.comments = grouped.remove(&issue.number).unwrap_or_default();
    }
}

/// Time from issue creation to the earliest team-authored comment. Issues
/// whose comments are all from outside the team contribute no sample, and a
/// reply must strictly follow the creation to count.
fn team_response_ms(issue: &IssueRecord) -> Option<i64> {
    let first_team_reply = issue
        .comments
        .iter()
        .filter(|comment| comment.author_association.in_team())
        .map(|comment| comment.created_at)
        .min()?;

    let elapsed = (first_team_reply - issue.created_at).num_milliseconds();
    (elapsed > 0).then_some(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
    }

    fn issue(number: u64, association: AuthorAssociation) -> IssueRecord {
        IssueRecord {
            project_id: 1,
            number,
            title: format!("issue {number}"),
            state: IssueState::Open,
            comments_count: 0,
            author_association: association,
            author: "someone".to_string(),
            labels: Vec::new(),
            created_at: t0(),
            closed_at: None,
            comments: Vec::new(),
        }
    }

    fn comment(issue_id: u64, id: u64, association: AuthorAssociation, hours_after: i64) -> CommentRecord {
        CommentRecord {
            project_id: 1,
            issue_id,
            id,
            author_association: association,
            author: "someone".to_string(),
            created_at: t0() + Duration::hours(hours_after),
            updated_at: None,
        }
    }

    #[test]
    fn partition_splits_on_team_membership() {
        let issues = vec![
            issue(1, AuthorAssociation::Owner),
            issue(2, AuthorAssociation::None),
            issue(3, AuthorAssociation::Member),
            issue(4, AuthorAssociation::None),
        ];

        let breakdown = IssueBreakdown::from_records(&issues, &[]);

        assert_eq!(breakdown.by_team.count, 2);
        assert_eq!(breakdown.by_others.count, 2);
        assert_eq!(breakdown.total.count, 4);
    }

    #[test]
    fn response_time_is_the_earliest_team_reply() {
        let mut subject = issue(1, AuthorAssociation::None);
        subject.comments_count = 2;
        subject.comments = vec![
            comment(1, 10, AuthorAssociation::None, 1),
            comment(1, 11, AuthorAssociation::Member, 5),
        ];

        let stats = IssueStats::from_issues(&[&subject]);

        assert_eq!(stats.avg_response_hours, Some(5));
    }

    #[test]
    fn issues_without_a_team_reply_contribute_no_sample() {
        let mut subject = issue(1, AuthorAssociation::None);
        subject.comments_count = 1;
        subject.comments = vec![comment(1, 10, AuthorAssociation::Contributor, 2)];

        let stats = IssueStats::from_issues(&[&subject]);

        assert_eq!(stats.avg_response_hours, None);
    }

    #[test]
    fn replies_at_or_before_creation_do_not_count() {
        let mut subject = issue(1, AuthorAssociation::None);
        subject.comments_count = 1;
        subject.comments = vec![comment(1, 10, AuthorAssociation::Owner, 0)];

        let stats = IssueStats::from_issues(&[&subject]);

        assert_eq!(stats.avg_response_hours, None);
    }

    #[test]
    fn resolve_time_averages_closed_issues_only() {
        let mut fast = issue(1, AuthorAssociation::None);
        fast.state = IssueState::Closed;
        fast.closed_at = Some(t0() + Duration::days(2));
        let mut slow = issue(2, AuthorAssociation::None);
        slow.state = IssueState::Closed;
        slow.closed_at = Some(t0() + Duration::days(6));
        let still_open = issue(3, AuthorAssociation::None);

        let stats = IssueStats::from_issues(&[&fast, &slow, &still_open]);

        assert_eq!(stats.open, 1);
        assert_eq!(stats.closed, 2);
        assert_eq!(stats.avg_resolve_days, Some(4));
    }

    #[test]
    fn no_closed_issues_means_no_resolve_average() {
        let subject = issue(1, AuthorAssociation::None);

        let stats = IssueStats::from_issues(&[&subject]);

        assert_eq!(stats.avg_resolve_days, None);
        assert_eq!(stats.without_comments, 1);
    }

    #[test]
    fn comments_attach_by_issue_number() {
        let mut issues = vec![issue(1, AuthorAssociation::None), issue(2, AuthorAssociation::None)];
        let comments = vec![
            comment(2, 20, AuthorAssociation::Owner, 1),
            comment(2, 21, AuthorAssociation::None, 2),
            comment(9, 30, AuthorAssociation::None, 3),
        ];

        attach_comments(&mut issues, comments);

        assert!(issues[0].comments.is_empty());
        assert_eq!(issues[1].comments.len(), 2);
    }

    #[test]
    fn pull_stats_compute_merge_ratio_and_resolve_hours() {
        let pull = |number: u64, merged: bool, closed_hours: Option<i64>| PullRequestRecord {
            project_id: 1,
            number,
            title: format!("pull {number}"),
            state: if closed_hours.is_some() { IssueState::Closed } else { IssueState::Open },
            author_association: AuthorAssociation::Contributor,
            author: "someone".to_string(),
            created_at: t0(),
            updated_at: None,
            closed_at: closed_hours.map(|h| t0() + Duration::hours(h)),
            merged_at: None,
            closed: closed_hours.is_some(),
            merged,
        };

        let pulls = vec![pull(1, true, Some(10)), pull(2, false, Some(20)), pull(3, true, Some(30)), pull(4, false, None)];
        let stats = PullStats::from_pulls(&pulls);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.closed, 3);
        assert_eq!(stats.merged, 2);
        assert_eq!(stats.merge_ratio, Some(0.67));
        assert_eq!(stats.avg_resolve_hours, Some(20));
    }

    #[test]
    fn empty_pull_set_has_sentinel_ratios() {
        let stats = PullStats::from_pulls(&[]);

        assert_eq!(stats.merge_ratio, None);
        assert_eq!(stats.avg_resolve_hours, None);
    }
}
