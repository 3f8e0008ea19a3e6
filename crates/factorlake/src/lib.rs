#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/factorlake/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Quick Start
//!
//! ```
//! use factorlake::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let dataset = Dataset::new(vec![
//!     StockRecord::new("AAA", 2010).with_price(10.0).with_field("ROE using 9/30 Data", 0.30),
//!     StockRecord::new("BBB", 2010).with_price(20.0).with_field("ROE using 9/30 Data", 0.10),
//!     StockRecord::new("AAA", 2011).with_price(11.0),
//!     StockRecord::new("BBB", 2011).with_price(40.0),
//! ]);
//!
//! let config = RebalanceConfig {
//!     start_year: 2010,
//!     end_year: 2011,
//!     selection: SelectionRule::TopCount(1),
//!     verbosity: 0,
//!     ..Default::default()
//! };
//! let rebalancer = Rebalancer::new(create_factors(&["roe"])?, config)?;
//! let results = rebalancer.run(&dataset)?;
//!
//! // AAA ranks first and gains 10%
//! assert_eq!(results.years(), vec![2011]);
//! assert!((results.final_value() - 1.1).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types ([`StockRecord`], [`Dataset`]), the [`Factor`] trait and errors
//! - [`factors`] - Column-backed factors and the factor registry
//! - [`combine`] - Rank-average factor combination
//! - [`eval`] - Snapshots, screens, portfolios, the rebalancing loop and metrics
//! - [`data`] - CSV and Supabase loaders

/// Version information for the factorlake crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and traits.
///
/// - [`Factor`] - Scores one stock-year record
/// - [`StockRecord`] / [`Dataset`] - The input table
/// - [`MissingData`] - Recoverable per-ticker gaps
/// - [`LakeError`] - Fatal errors
pub mod traits {
    pub use factorlake_traits::*;
}

pub use factorlake_traits::{
    Dataset, Factor, LakeError, MissingData, Result, StockRecord, Ticker, Year,
};

// ============================================================================
// Factors
// ============================================================================

/// Factor implementations and registry.
///
/// ## Categories
///
/// - **Momentum**: 1, 6 and 12-month trailing returns
/// - **Value**: book-to-price, price-to-book, forward earnings yield
/// - **Quality**: ROE, ROA, accruals
/// - **Growth**: asset growth, capex growth
/// - **Volatility**: one-year price volatility
///
/// # Example
///
/// ```
/// use factorlake::factors::registry::{available_factors, create_factor};
///
/// let names: Vec<_> = available_factors().iter().map(|f| f.name).collect();
/// assert!(names.contains(&"return_on_equity"));
/// assert!(create_factor("mom_12m").is_ok());
/// ```
pub mod factors {
    pub use factorlake_factors::*;
}

pub use factorlake_factors::{create_factor, create_factors};

// ============================================================================
// Factor Combination
// ============================================================================

/// Factor combination.
///
/// [`RankAverageCombiner`](combine::RankAverageCombiner) ranks each factor's
/// scores (1 = best) and averages the ranks; a smaller combined value is
/// better.
pub mod combine {
    pub use factorlake_combine::*;
}

pub use factorlake_combine::Combiner;

// ============================================================================
// Backtesting
// ============================================================================

/// The rebalancing engine and its output.
pub mod eval {
    pub use factorlake_eval::*;
}

pub use factorlake_eval::{
    BacktestOutput, DelistingPolicy, PerformanceMetrics, RebalanceConfig, Rebalancer,
    ResultSeries, SelectionRule,
};

// ============================================================================
// Data Loading
// ============================================================================

/// Dataset loaders.
///
/// ```ignore
/// use factorlake::data::{CsvLoader, Loader};
///
/// let dataset = CsvLoader::new("data/factors.csv").load().await?;
/// ```
pub mod data {
    pub use factorlake_data::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use factorlake::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Combiner, Dataset, DelistingPolicy, Factor, LakeError, RebalanceConfig, Rebalancer,
        Result, ResultSeries, SelectionRule, StockRecord, Year, create_factor, create_factors,
    };
}
