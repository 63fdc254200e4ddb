//! The rank command: search, fetch, score, report.

use crate::facts::{FetchResult, Fetcher, GithubClient, RepoRecord, snapshot};
use crate::ranking;
use crate::reports;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::Path;

/// Log target for command orchestration
const LOG_TARGET: &str = "rank";

/// Ranks GitHub repositories by activity and health.
#[derive(Debug, Parser)]
#[command(name = "repo-rank", version, about)]
pub struct Args {
    /// Repository search query.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Maximum number of repositories to fetch.
    #[arg(short, long, default_value_t = 100)]
    pub limit: usize,

    /// Search sort field (stars, forks, updated).
    #[arg(short, long, default_value = "updated")]
    pub sort: String,

    /// Search sort order.
    #[arg(short, long, default_value = "desc")]
    pub order: String,

    /// Snapshot name to export fetched records to.
    #[arg(short, long, default_value = "data_latest")]
    pub export: String,

    /// Snapshot name to import records from, bypassing search and fetch.
    #[arg(short, long)]
    pub import: Option<String>,

    /// Personal access token; falls back to $TOKEN, then to a ./token file.
    #[arg(long, env = "TOKEN")]
    pub token: Option<String>,
}

/// Run the tool to completion. Everything above the per-repository level is
/// fatal here; per-repository failures were already swallowed by the fetcher.
pub async fn run(args: Args, as_of: DateTime<Utc>) -> Result<()> {
    if args.import.is_none() && args.query.is_none() {
        bail!("either a search query (--query) or a snapshot to import (--import) is required");
    }
    let token = resolve_token(args.token.as_deref())?;

    let records = if let Some(name) = &args.import {
        let records = snapshot::load(name)?;
        log::info!(target: LOG_TARGET, "imported {} records from snapshot '{name}'", records.len());
        records
    } else {
        let query = args.query.as_deref().unwrap_or_default();
        let client = GithubClient::new(token)?;
        let fetcher = Fetcher::new(&client, as_of);

        let outcomes = fetcher.fetch_by_search(query, &args.sort, &args.order, args.limit).await?;
        let records: Vec<RepoRecord> = outcomes.into_iter().filter_map(FetchResult::ok).collect();

        let path = snapshot::save(&args.export, &records)?;
        log::info!(target: LOG_TARGET, "exported {} records to {}", records.len(), path.display());
        records
    };

    if records.is_empty() {
        bail!("no repositories to rank");
    }

    let ranked = ranking::rank(&records, as_of);

    let mut stdout = std::io::stdout();
    reports::generate_console(&mut stdout, &ranked).context("writing the ranked table")?;
    Ok(())
}

/// Resolve the access credential: the flag (or $TOKEN via clap) first, then a
/// `token` file in the working directory.
fn resolve_token(flag: Option<&str>) -> Result<String> {
    if let Some(token) = flag {
        return Ok(token.trim().to_string());
    }

    let path = Path::new("token");
    if path.exists() {
        let token = std::fs::read_to_string(path).context("reading the token file")?;
        return Ok(token.trim().to_string());
    }

    bail!("personal access token is missing (use --token, $TOKEN, or a ./token file)")
}
