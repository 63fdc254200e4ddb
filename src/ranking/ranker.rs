//! Ordering of scored repositories.

use crate::facts::RepoRecord;
use crate::metrics::RepoMetrics;
use crate::ranking::scorer;
use chrono::{DateTime, Utc};

/// A repository together with its computed score.
#[derive(Debug, Clone)]
pub struct RankedRepo {
    pub metrics: RepoMetrics,
    pub score: f64,
}

/// Score every record and order best-first.
///
/// The sort is stable and ascending with a final reversal, so equal scores
/// land in reversed input order.
#[must_use]
pub fn rank(records: &[RepoRecord], as_of: DateTime<Utc>) -> Vec<RankedRepo> {
    let mut ranked: Vec<RankedRepo> = records
        .iter()
        .map(|record| {
            let metrics = RepoMetrics::from_record(record, as_of);
            let score = scorer::score(&metrics);
            RankedRepo { metrics, score }
        })
        .collect();

    ranked.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(core::cmp::Ordering::Equal));
    ranked.reverse();
    ranked
}
