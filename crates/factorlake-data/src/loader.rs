//! The loader abstraction shared by every dataset source.

use crate::Result;
use factorlake_traits::Dataset;
use std::future::Future;

/// A source that can produce a normalized [`Dataset`].
///
/// Loaders own their normalization options, so two loaders reading the same
/// table yield the same dataset.
pub trait Loader: Send + Sync {
    /// Human-readable description of the source, used in log lines.
    fn source(&self) -> String;

    /// Fetches and normalizes the whole table.
    fn load(&self) -> impl Future<Output = Result<Dataset>> + Send;
}
