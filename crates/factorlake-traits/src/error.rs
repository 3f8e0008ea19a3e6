//! Error types for the factorlake backtester.
//!
//! Only two families of failure ever reach a caller: the input dataset is
//! untrustworthy ([`DataIntegrityError`]) or the run was configured in a way
//! that cannot be executed ([`ConfigError`]). Missing per-ticker data is not
//! an error; see [`crate::MissingData`].

use crate::types::Year;
use thiserror::Error;

/// The main error type for factorlake operations.
#[derive(Debug, Error)]
pub enum LakeError {
    /// The dataset violates an invariant the backtest relies on.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    /// The run configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// I/O failure while reading a dataset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error when a factor name is not known to the registry.
    #[error("Factor not found: {0}")]
    FactorNotFound(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for LakeError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for LakeError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// Fatal problems with the input dataset.
///
/// Any of these aborts the whole run; partial results are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    /// Two rows share a ticker within one year, so its price is ambiguous.
    #[error("ticker {ticker} appears more than once in {year}")]
    DuplicateTicker {
        /// The repeated ticker.
        ticker: String,
        /// The year in which it repeats.
        year: Year,
    },

    /// A numeric field holds text that is neither a number nor a null marker.
    #[error("column '{column}' row {row}: cannot parse {value:?} as a number")]
    UnparseableField {
        /// Column the value came from.
        column: String,
        /// Zero-based row index in the raw table.
        row: usize,
        /// The offending raw value.
        value: String,
    },

    /// A year inside the backtest horizon has no rows at all.
    #[error("no rows for year {year} inside the backtest horizon")]
    MissingYear {
        /// The empty year.
        year: Year,
    },

    /// A column the dataset cannot be built without is absent.
    #[error("missing required column: {0}")]
    MissingColumn(String),
}

/// Configuration problems detected before the rebalancing loop starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No factor was selected.
    #[error("at least one factor is required")]
    NoFactors,

    /// The horizon holds no holding period.
    #[error("start year {start_year} must be before end year {end_year}")]
    EmptyHorizon {
        /// First formation year.
        start_year: Year,
        /// Terminal pricing year.
        end_year: Year,
    },

    /// Starting capital must be a positive finite number.
    #[error("initial AUM must be positive, got {0}")]
    NonPositiveAum(f64),

    /// The selection rule cannot pick any stock.
    #[error("invalid selection rule: {0}")]
    InvalidSelection(String),

    /// A sector filter names a sector the dataset does not use.
    #[error("unknown sector '{0}'")]
    UnknownSector(String),
}

/// A specialized Result type for factorlake operations.
pub type Result<T> = std::result::Result<T, LakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LakeError::from(DataIntegrityError::DuplicateTicker {
            ticker: "AAPL".to_string(),
            year: 2010,
        });
        assert_eq!(
            err.to_string(),
            "Data integrity violation: ticker AAPL appears more than once in 2010"
        );

        let err = LakeError::from(ConfigError::EmptyHorizon {
            start_year: 2010,
            end_year: 2010,
        });
        assert_eq!(
            err.to_string(),
            "Invalid configuration: start year 2010 must be before end year 2010"
        );
    }

    #[test]
    fn test_unparseable_field_names_column_and_row() {
        let err = DataIntegrityError::UnparseableField {
            column: "Ending Price".to_string(),
            row: 7,
            value: "n/a".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Ending Price"));
        assert!(text.contains("row 7"));
        assert!(text.contains("\"n/a\""));
    }

    #[test]
    fn test_error_from_string() {
        let err: LakeError = "boom".into();
        assert!(matches!(err, LakeError::Other(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(ConfigError::NoFactors.into());
        assert!(matches!(
            err_result,
            Err(LakeError::Configuration(ConfigError::NoFactors))
        ));
    }
}
