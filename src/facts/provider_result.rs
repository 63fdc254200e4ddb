use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of fetching and aggregating one repository.
///
/// A failed repository never aborts the batch; it is carried as a non-`Found`
/// variant so downstream ranking only ever sees present records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Clone + Serialize", deserialize = "T: Clone + for<'de2> Deserialize<'de2>"))]
pub enum FetchResult<T> {
    /// The repository was fetched and aggregated successfully.
    Found(T),

    /// The repository does not exist, or is not visible with the supplied token.
    RepoNotFound,

    /// An error occurred while fetching this repository.
    /// The error message is serialized as a string.
    #[serde(serialize_with = "serialize_error", deserialize_with = "deserialize_error")]
    Error(Arc<anyhow::Error>),
}

/// Serialize Arc<anyhow::Error> as a string
fn serialize_error<S>(error: &Arc<anyhow::Error>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("{error}"))
}

/// Deserialize a string back into Arc<anyhow::Error>
fn deserialize_error<'de, D>(deserializer: D) -> Result<Arc<anyhow::Error>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let error_str = String::deserialize(deserializer)?;
    Ok(Arc::new(anyhow::anyhow!("{error_str}")))
}

impl<T: Clone> FetchResult<T> {
    /// Returns `true` if the result is `Found`.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts this result into a standard `Result`, mapping all non-Found variants to errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not `Found`.
    pub fn into_result(self) -> anyhow::Result<T> {
        match self {
            Self::Found(data) => Ok(data),
            Self::RepoNotFound => anyhow::bail!("repository not found"),
            Self::Error(e) => Err(anyhow::anyhow!("{e}")),
        }
    }

    /// Converts this result into an `Option`, returning `Some` only for `Found`.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }

    /// Returns a string describing the status of this result.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Found(_) => "Found",
            Self::RepoNotFound => "RepoNotFound",
            Self::Error(_) => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variant_round_trips_as_string() {
        let result: FetchResult<u32> = FetchResult::Error(Arc::new(anyhow::anyhow!("boom")));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("boom"));

        let back: FetchResult<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status_str(), "Error");
        assert_eq!(back.into_result().unwrap_err().to_string(), "boom");
    }

    #[test]
    fn found_is_the_only_present_variant() {
        assert!(FetchResult::Found(7).is_found());
        assert_eq!(FetchResult::Found(7).ok(), Some(7));
        assert_eq!(FetchResult::<u32>::RepoNotFound.ok(), None);
    }
}
