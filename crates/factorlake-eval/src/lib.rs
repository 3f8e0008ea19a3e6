//! Backtesting for factorlake.
//!
//! This crate holds the annual rebalancing engine and everything it needs:
//! - Per-year market snapshots with tolerant price lookup
//! - Exclusion screens (fossil-fuel industries, sector selection)
//! - Equal-weighted portfolios
//! - The [`Rebalancer`] loop and its [`ResultSeries`] output
//! - Performance metrics against a built-in benchmark
//!
//! # Example
//!
//! ```rust
//! use factorlake_eval::{RebalanceConfig, Rebalancer, SelectionRule};
//! use factorlake_traits::{Dataset, Factor, StockRecord};
//!
//! #[derive(Debug)]
//! struct Roe;
//!
//! impl Factor for Roe {
//!     fn name(&self) -> &str { "roe" }
//!     fn description(&self) -> &str { "Return on equity" }
//!     fn required_columns(&self) -> &[&str] { &["ROE"] }
//!     fn score(&self, record: &StockRecord) -> Option<f64> { record.field("ROE") }
//! }
//!
//! let dataset = Dataset::new(vec![
//!     StockRecord::new("A", 2010).with_price(10.0).with_field("ROE", 0.2),
//!     StockRecord::new("A", 2011).with_price(12.0).with_field("ROE", 0.2),
//! ]);
//! let config = RebalanceConfig {
//!     start_year: 2010,
//!     end_year: 2011,
//!     selection: SelectionRule::TopCount(1),
//!     verbosity: 0,
//!     ..Default::default()
//! };
//!
//! let results = Rebalancer::new(vec![Box::new(Roe)], config)?.run(&dataset)?;
//! assert_eq!(results.years(), vec![2011]);
//! assert!((results.final_value() - 1.2).abs() < 1e-9);
//! # Ok::<(), factorlake_traits::LakeError>(())
//! ```

pub mod benchmark;
pub mod metrics;
pub mod portfolio;
pub mod rebalance;
pub mod results;
pub mod screen;
pub mod snapshot;

// Re-export main types
pub use benchmark::{benchmark_return, benchmark_return_pct};
pub use metrics::PerformanceMetrics;
pub use portfolio::{Holding, Portfolio};
pub use rebalance::{DelistingPolicy, RebalanceConfig, Rebalancer, SelectionRule};
pub use results::{BacktestOutput, MissingCounts, PeriodRecord, PeriodSummary, ResultSeries};
pub use screen::{FossilFuelScreen, SECTORS, Screen, SectorScreen};
pub use snapshot::MarketSnapshot;
