#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorlake/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the factorlake backtester.
//!
//! This crate defines the annual stock panel ([`Dataset`], [`StockRecord`]),
//! the [`Factor`] scoring contract, the fatal error taxonomy
//! ([`LakeError`]) and the recoverable [`MissingData`] conditions.

/// The version of the factorlake-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod condition;
pub mod error;
pub mod factor;
pub mod types;

// Re-exports
pub use condition::MissingData;
pub use error::{ConfigError, DataIntegrityError, LakeError, Result};
pub use factor::Factor;
pub use types::{Dataset, StockRecord, Ticker, Year, column_key};
