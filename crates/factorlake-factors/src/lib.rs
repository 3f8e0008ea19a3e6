//! Factor implementations for the factorlake backtester.
//!
//! This crate provides concrete column-backed factors across several categories:
//! - Momentum: 1-month, 6-month and 12-month trailing returns
//! - Value: book-to-price, price-to-book, forward earnings yield
//! - Quality: return on equity, return on assets, accruals
//! - Growth: asset growth, capital expenditure growth
//! - Volatility: trailing one-year price volatility
//!
//! Each factor reads one field of a [`factorlake_traits::StockRecord`] and
//! reports it oriented so that a higher score is more attractive.
//!
//! # Example
//!
//! ```
//! use factorlake_factors::registry::{available_factors, create_factor};
//! use factorlake_traits::StockRecord;
//!
//! // Construct a factor by name or alias
//! let factor = create_factor("mom_12m").unwrap();
//! let record = StockRecord::new("AAPL", 2010).with_field("12-Mo Momentum %", 31.0);
//! assert_eq!(factor.score(&record), Some(31.0));
//!
//! // Discover available factors
//! assert!(!available_factors().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod columns;
pub mod direction;
pub mod growth;
pub mod momentum;
pub mod quality;
pub mod registry;
pub mod value;
pub mod volatility;

// Re-export key types
pub use direction::Direction;
pub use registry::{FactorCategory, FactorInfo, create_factor, create_factors};
