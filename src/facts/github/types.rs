//! Wire shapes for the API payloads, reduced to the fields the aggregation needs.

use crate::facts::issues::{AuthorAssociation, IssueState};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    pub login: String,
    pub id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLicense {
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub id: u64,
    pub full_name: String,
    pub owner: RawAccount,
    pub description: Option<String>,
    pub license: Option<RawLicense>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,
    pub size: u64,
    pub stargazers_count: u64,
    pub watchers: u64,
    pub subscribers_count: u64,
    pub forks: u64,
    pub open_issues: u64,
}

/// Weekly commit timelines, most recent week last. The stats endpoint answers
/// with an empty object while it is still computing, hence the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParticipation {
    #[serde(default)]
    pub all: Vec<i64>,
    #[serde(default)]
    pub owner: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTag {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRelease {
    pub draft: bool,
    pub prerelease: bool,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub comments: u64,
    pub author_association: AuthorAssociation,
    pub user: RawAccount,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComment {
    pub id: u64,
    /// Reference to the parent issue; the trailing path segment is its number.
    pub issue_url: String,
    pub author_association: AuthorAssociation,
    pub user: RawAccount,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPull {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub author_association: AuthorAssociation,
    pub user: RawAccount,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub total_count: u64,
    pub items: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub owner: RawAccount,
}
