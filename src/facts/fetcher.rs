//! Per-repository fact collection.

use crate::facts::github::types::{RawComment, RawIssue, RawPull, RawRelease, RawRepo};
use crate::facts::github::{GithubClient, NotFound};
use crate::facts::issues::{CommentRecord, IssueBreakdown, IssueRecord, PullRequestRecord, attach_comments};
use crate::facts::paged::{PageParams, fetch_paged};
use crate::facts::participation::ParticipationStats;
use crate::facts::provider_result::FetchResult;
use crate::facts::recent_window_start;
use crate::facts::releases::{ReleaseRecord, ReleaseStats};
use crate::facts::repo_record::RepoRecord;
use crate::facts::repo_spec::RepoSpec;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Log target for fact collection
const LOG_TARGET: &str = "fetcher";

/// Page caps protecting against runaway pagination on very active repositories.
const MAX_ISSUE_PAGES: u32 = 10;
const MAX_COMMENT_PAGES: u32 = 50;
const MAX_PULL_PAGES: u32 = 10;

/// The search endpoint serves at most this many hits per page.
const MAX_SEARCH_PAGE_SIZE: usize = 100;

/// Collects and aggregates the facts for repositories, one at a time.
///
/// The as-of instant is fixed at construction so every derived statistic of a
/// batch is computed against the same clock.
#[derive(Debug, Clone)]
pub struct Fetcher<'a> {
    client: &'a GithubClient,
    as_of: DateTime<Utc>,
}

impl<'a> Fetcher<'a> {
    #[must_use]
    pub const fn new(client: &'a GithubClient, as_of: DateTime<Utc>) -> Self {
        Self { client, as_of }
    }

    /// Search for repositories and fetch each hit in search-result order.
    /// Individual failures are captured per repository and the batch keeps
    /// going; only a failed search itself is fatal.
    pub async fn fetch_by_search(&self, query: &str, sort: &str, order: &str, limit: usize) -> Result<Vec<FetchResult<RepoRecord>>> {
        let per_page = limit.min(MAX_SEARCH_PAGE_SIZE);
        let page = self.client.search_repositories(query, sort, order, per_page).await?;
        log::info!(
            target: LOG_TARGET,
            "search matched {} repositories, fetching {}",
            page.total_count,
            page.items.len()
        );

        let mut results = Vec::with_capacity(page.items.len());
        for (idx, hit) in page.items.into_iter().enumerate() {
            let spec = RepoSpec::new(hit.owner.login, hit.name);
            log::info!(target: LOG_TARGET, "fetching {idx}: {spec}");

            match self.fetch(&spec).await {
                Ok(record) => results.push(FetchResult::Found(record)),
                Err(e) if e.root_cause().downcast_ref::<NotFound>().is_some() => {
                    log::warn!(target: LOG_TARGET, "{spec} not found");
                    results.push(FetchResult::RepoNotFound);
                }
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "failed to fetch {spec}: {e:#}");
                    results.push(FetchResult::Error(Arc::new(e)));
                }
            }
        }

        Ok(results)
    }

    /// Fetch and aggregate one repository. The metadata request runs first to
    /// seed the repository id; the four sub-fetches then run concurrently.
    pub async fn fetch(&self, spec: &RepoSpec) -> Result<RepoRecord> {
        let meta = self.client.repository(spec).await?;

        let (participation, tags, releases, issues) = tokio::try_join!(
            self.fetch_participation(spec),
            self.fetch_tag_count(spec),
            self.fetch_release_stats(spec),
            self.fetch_issue_breakdown(spec, meta.id),
        )?;

        Ok(assemble(meta, participation, tags, releases, issues))
    }

    async fn fetch_participation(&self, spec: &RepoSpec) -> Result<ParticipationStats> {
        let raw = self.client.participation(spec).await?;
        Ok(ParticipationStats::from_weekly(&raw.owner, &raw.all))
    }

    async fn fetch_tag_count(&self, spec: &RepoSpec) -> Result<usize> {
        Ok(self.client.tags(spec, PageParams::default()).await?.len())
    }

    async fn fetch_release_stats(&self, spec: &RepoSpec) -> Result<ReleaseStats> {
        let raw = self.client.releases(spec, PageParams::default()).await?;
        let records = raw.into_iter().map(release_record).collect();
        Ok(ReleaseStats::from_releases(records, self.as_of))
    }

    async fn fetch_issue_breakdown(&self, spec: &RepoSpec, project_id: u64) -> Result<IssueBreakdown> {
        let (mut issues, comments, pulls) = tokio::try_join!(
            self.fetch_issues(spec, project_id),
            self.fetch_comments(spec, project_id),
            self.fetch_pulls(spec, project_id),
        )?;

        attach_comments(&mut issues, comments);
        Ok(IssueBreakdown::from_records(&issues, &pulls))
    }

    async fn fetch_issues(&self, spec: &RepoSpec, project_id: u64) -> Result<Vec<IssueRecord>> {
        let cutoff = recent_window_start(self.as_of);
        let raw = fetch_paged(
            |params| self.client.issues_page(spec, params),
            PageParams::default(),
            |page: &[RawIssue]| page.last().is_some_and(|issue| issue.created_at > cutoff),
            MAX_ISSUE_PAGES,
        )
        .await?;

        Ok(raw.into_iter().map(|issue| issue_record(issue, project_id)).collect())
    }

    async fn fetch_comments(&self, spec: &RepoSpec, project_id: u64) -> Result<Vec<CommentRecord>> {
        let cutoff = recent_window_start(self.as_of);
        let raw = fetch_paged(
            |params| self.client.comments_page(spec, params),
            PageParams::default(),
            |page: &[RawComment]| page.last().is_some_and(|comment| comment.created_at > cutoff),
            MAX_COMMENT_PAGES,
        )
        .await?;

        raw.into_iter().map(|comment| comment_record(comment, project_id)).collect()
    }

    async fn fetch_pulls(&self, spec: &RepoSpec, project_id: u64) -> Result<Vec<PullRequestRecord>> {
        let cutoff = recent_window_start(self.as_of);
        let raw = fetch_paged(
            |params| self.client.pulls_page(spec, params),
            PageParams::default(),
            |page: &[RawPull]| page.last().is_some_and(|pull| pull.created_at > cutoff),
            MAX_PULL_PAGES,
        )
        .await?;

        Ok(raw.into_iter().map(|pull| pull_record(pull, project_id)).collect())
    }
}

fn assemble(meta: RawRepo, participation: ParticipationStats, tags: usize, releases: ReleaseStats, issues: IssueBreakdown) -> RepoRecord {
    RepoRecord {
        id: meta.id,
        name: meta.full_name,
        owner: meta.owner.login,
        owner_id: meta.owner.id,
        description: meta.description,
        license: meta.license.map(|license| license.key),
        language: meta.language,
        created_at: meta.created_at,
        updated_at: meta.updated_at,
        pushed_at: meta.pushed_at,
        size: meta.size,
        stargazers: meta.stargazers_count,
        watchers: meta.watchers,
        subscribers: meta.subscribers_count,
        forks: meta.forks,
        open_issues: meta.open_issues,
        tags,
        participation,
        releases,
        issues,
    }
}

fn release_record(raw: RawRelease) -> ReleaseRecord {
    ReleaseRecord {
        // Drafts carry no publish time yet; their creation time keeps them sortable.
        published_at: raw.published_at.unwrap_or(raw.created_at),
        draft: raw.draft,
        prerelease: raw.prerelease,
    }
}

fn issue_record(raw: RawIssue, project_id: u64) -> IssueRecord {
    IssueRecord {
        project_id,
        number: raw.number,
        title: raw.title,
        state: raw.state,
        comments_count: raw.comments,
        author_association: raw.author_association,
        author: raw.user.login,
        labels: raw.labels.into_iter().map(|label| label.name).collect(),
        created_at: raw.created_at,
        closed_at: raw.closed_at,
        comments: Vec::new(),
    }
}

fn comment_record(raw: RawComment, project_id: u64) -> Result<CommentRecord> {
    let issue_id = raw
        .issue_url
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .with_context(|| format!("unparsable issue reference '{}'", raw.issue_url))?;

    Ok(CommentRecord {
        project_id,
        issue_id,
        id: raw.id,
        author_association: raw.author_association,
        author: raw.user.login,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    })
}

fn pull_record(raw: RawPull, project_id: u64) -> PullRequestRecord {
    PullRequestRecord {
        project_id,
        number: raw.number,
        title: raw.title,
        state: raw.state,
        author_association: raw.author_association,
        author: raw.user.login,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        closed_at: raw.closed_at,
        merged_at: raw.merged_at,
        closed: raw.closed_at.is_some(),
        merged: raw.merged_at.is_some(),
    }
}
