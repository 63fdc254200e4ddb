use crate::facts::github::types::{RawComment, RawIssue, RawParticipation, RawPull, RawRelease, RawRepo, RawTag, SearchPage};
use crate::facts::paged::PageParams;
use crate::facts::repo_spec::RepoSpec;
use anyhow::{Context, Result, bail};
use reqwest::{Response, StatusCode, header};
use url::Url;

/// Log target for the API client
const LOG_TARGET: &str = "github";

const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const USER_AGENT: &str = concat!("repo-rank/", env!("CARGO_PKG_VERSION"));

/// Marker error for a 404 from the API, letting callers tell an absent
/// repository apart from a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound;

impl core::fmt::Display for NotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("resource not found")
    }
}

impl core::error::Error for NotFound {}

/// Authenticated client for the handful of REST endpoints the fetcher needs.
///
/// The client is transport only: it decodes pages and surfaces the remaining
/// rate limit in the logs, but never retries and never alters behavior based
/// on rate-limit state.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(DEFAULT_BASE_URL).context("parsing the default API base URL")?;
        Ok(Self::with_base_url(token, base_url))
    }

    /// Point the client at a different API root (used by tests).
    #[must_use]
    pub fn with_base_url(token: impl Into<String>, base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: token.into(),
        }
    }

    pub async fn repository(&self, spec: &RepoSpec) -> Result<RawRepo> {
        self.get_json(&format!("repos/{spec}"), &[]).await
    }

    /// Weekly commit participation. The statistics endpoint answers 202 while
    /// the data is still being computed; that shows up as empty timelines.
    pub async fn participation(&self, spec: &RepoSpec) -> Result<RawParticipation> {
        let path = format!("repos/{spec}/stats/participation");
        let response = self.get(&path, &[]).await?;
        if response.status() == StatusCode::ACCEPTED {
            return Ok(RawParticipation::default());
        }

        response.json().await.with_context(|| format!("decoding the response from {path}"))
    }

    pub async fn tags(&self, spec: &RepoSpec, params: PageParams) -> Result<Vec<RawTag>> {
        self.get_json(&format!("repos/{spec}/tags"), &page_query(params)).await
    }

    pub async fn releases(&self, spec: &RepoSpec, params: PageParams) -> Result<Vec<RawRelease>> {
        self.get_json(&format!("repos/{spec}/releases"), &page_query(params)).await
    }

    /// One page of issues (all states, newest first). Note that this endpoint
    /// interleaves pull requests with issues.
    pub async fn issues_page(&self, spec: &RepoSpec, params: PageParams) -> Result<Vec<RawIssue>> {
        let mut query = page_query(params);
        query.push(("state", "all".to_string()));
        query.push(("sort", "created".to_string()));
        self.get_json(&format!("repos/{spec}/issues"), &query).await
    }

    /// One page of issue comments across the whole repository, newest first.
    pub async fn comments_page(&self, spec: &RepoSpec, params: PageParams) -> Result<Vec<RawComment>> {
        let mut query = page_query(params);
        query.push(("sort", "created".to_string()));
        query.push(("direction", "desc".to_string()));
        self.get_json(&format!("repos/{spec}/issues/comments"), &query).await
    }

    pub async fn pulls_page(&self, spec: &RepoSpec, params: PageParams) -> Result<Vec<RawPull>> {
        let mut query = page_query(params);
        query.push(("state", "all".to_string()));
        query.push(("sort", "created".to_string()));
        query.push(("direction", "desc".to_string()));
        self.get_json(&format!("repos/{spec}/pulls"), &query).await
    }

    pub async fn search_repositories(&self, query: &str, sort: &str, order: &str, per_page: usize) -> Result<SearchPage> {
        let query = [
            ("q", query.to_string()),
            ("sort", sort.to_string()),
            ("order", order.to_string()),
            ("per_page", per_page.to_string()),
            ("page", "1".to_string()),
        ];
        self.get_json("search/repositories", &query).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.get(path, query).await?;
        response.json().await.with_context(|| format!("decoding the response from {path}"))
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = self.base_url.join(path).with_context(|| format!("building the URL for {path}"))?;
        let response = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::USER_AGENT, USER_AGENT)
            .query(query)
            .send()
            .await
            .with_context(|| format!("requesting {path}"))?;

        if let Some(remaining) = rate_limit_remaining(&response) {
            log::debug!(target: LOG_TARGET, "GET {path}: rate limit remaining {remaining}");
        }

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(anyhow::Error::new(NotFound).context(format!("GET {path}")));
        }
        if !status.is_success() {
            bail!("GET {path} returned {status}");
        }

        Ok(response)
    }
}

fn rate_limit_remaining(response: &Response) -> Option<&str> {
    response.headers().get("x-ratelimit-remaining").and_then(|value| value.to_str().ok())
}

fn page_query(params: PageParams) -> Vec<(&'static str, String)> {
    vec![("per_page", params.per_page.to_string()), ("page", params.page.to_string())]
}
