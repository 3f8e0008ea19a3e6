//! Error types for dataset loading.

use factorlake_traits::{DataIntegrityError, LakeError};
use thiserror::Error;

/// Errors that can occur while fetching or normalizing a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required credential is not configured.
    #[error("{0} environment variable not set")]
    MissingCredentials(&'static str),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote API returned an error.
    #[error("Supabase API error: {0}")]
    Api(String),

    /// The source returned no rows.
    #[error("No data returned from {0}")]
    NoData(String),

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),

    /// The table violates a dataset invariant.
    #[error(transparent)]
    Integrity(#[from] DataIntegrityError),

    /// Error from Polars while reading or converting the table.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// File access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DataError> for LakeError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Integrity(e) => Self::DataIntegrity(e),
            DataError::Polars(e) => Self::Polars(e),
            DataError::Io(e) => Self::Io(e),
            other => Self::DataFetch(other.to_string()),
        }
    }
}
