//! Recoverable missing-data conditions.
//!
//! These are never raised as errors. The rebalancer absorbs them into its
//! selection and weighting policy and records them per holding period so a
//! caller can see what was skipped and why.

use crate::types::{Ticker, Year};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A per-ticker or per-year data gap that was handled locally.
#[derive(Debug, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingData {
    /// The stock had no tradable ending price in its formation year.
    #[display("{ticker}: no usable ending price in {year}")]
    NoPrice {
        /// Affected ticker.
        ticker: Ticker,
        /// Formation year.
        year: Year,
    },

    /// An active factor could not score the stock.
    #[display("{ticker}: no input for factor {factor} in {year}")]
    NoFactorInput {
        /// Affected ticker.
        ticker: Ticker,
        /// Formation year.
        year: Year,
        /// Name of the factor that returned no score.
        factor: String,
    },

    /// An exclusion screen removed the stock.
    #[display("{ticker}: removed by {screen} screen in {year}")]
    Excluded {
        /// Affected ticker.
        ticker: Ticker,
        /// Formation year.
        year: Year,
        /// Name of the screen.
        screen: String,
    },

    /// Nothing was eligible, so the portfolio stayed in cash for the period.
    #[display("{year}: no eligible stocks")]
    EmptyUniverse {
        /// Formation year.
        year: Year,
    },

    /// A held stock had no exit price in the following year.
    #[display("{ticker}: no exit price in {year}")]
    Delisted {
        /// Affected ticker.
        ticker: Ticker,
        /// Exit (pricing) year.
        year: Year,
    },
}

impl MissingData {
    /// The ticker concerned, if the condition is per-ticker.
    pub fn ticker(&self) -> Option<&str> {
        match self {
            Self::NoPrice { ticker, .. }
            | Self::NoFactorInput { ticker, .. }
            | Self::Excluded { ticker, .. }
            | Self::Delisted { ticker, .. } => Some(ticker),
            Self::EmptyUniverse { .. } => None,
        }
    }
}
