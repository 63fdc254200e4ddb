use crate::facts::issues::IssueBreakdown;
use crate::facts::participation::ParticipationStats;
use crate::facts::releases::ReleaseStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything known about one repository after a fetch cycle: the metadata
/// response plus the aggregated participation, release, and issue statistics.
/// Assembled once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub id: u64,
    pub name: String,
    pub owner: String,
    pub owner_id: u64,
    pub description: Option<String>,
    pub license: Option<String>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,
    pub size: u64,
    pub stargazers: u64,
    pub watchers: u64,
    pub subscribers: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub tags: usize,
    pub participation: ParticipationStats,
    pub releases: ReleaseStats,
    pub issues: IssueBreakdown,
}
