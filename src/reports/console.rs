//! Console report: the ranked repository table.

use crate::ranking::RankedRepo;
use std::io::{Result, Write};

/// Every metric column carried on a ranked repository, listed once above the
/// table so operators know what the snapshot holds.
const FIELDS: &[&str] = &[
    "id",
    "name",
    "score",
    "stargazers",
    "subscribers",
    "forks",
    "open_issues",
    "tags",
    "created_days_ago",
    "updated_days_ago",
    "pushed_days_ago",
    "commits_all_two_weeks",
    "commits_all_month",
    "commits_all_year",
    "releases_count",
    "releases_count_in_two_months",
    "issues_by_others_count",
    "issues_by_others_open",
    "issues_by_others_closed",
    "issues_by_others_without_comments",
    "issues_by_others_avg_resolve_days",
    "issues_by_others_avg_response_hours",
];

/// Write the ranked table, projecting name, score, stargazers, and id.
pub fn generate(out: &mut impl Write, ranked: &[RankedRepo]) -> Result<()> {
    writeln!(out, "Fields: {}", FIELDS.join(","))?;

    let name_width = ranked.iter().map(|repo| repo.metrics.name.len()).chain(Some("name".len())).max().unwrap_or(4);

    writeln!(out, "{:<name_width$}  {:>10}  {:>10}  {:>12}", "name", "score", "stargazers", "id")?;
    writeln!(out, "{:-<name_width$}  {:->10}  {:->10}  {:->12}", "", "", "", "")?;

    for repo in ranked {
        writeln!(
            out,
            "{:<name_width$}  {:>10.3}  {:>10}  {:>12}",
            repo.metrics.name, repo.score, repo.metrics.stargazers, repo.metrics.id
        )?;
    }

    Ok(())
}
