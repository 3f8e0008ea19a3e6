//! Factor combination for factorlake.
//!
//! When several factors are active, each stock's per-factor scores are
//! reduced to a single *combined rank average*: every factor ranks the
//! universe (rank 1 = most attractive) and the ranks are averaged. Smaller
//! combined values are better.
//!
//! # Examples
//!
//! ```rust
//! use factorlake_combine::{Combiner, FactorScores, RankAverageCombiner};
//!
//! let factors = vec![
//!     FactorScores::new("momentum", vec![0.5, -0.2, 1.0]),
//!     FactorScores::new("value", vec![-0.3, 0.8, 0.1]),
//! ];
//!
//! let combined = RankAverageCombiner.combine(&factors).unwrap();
//! assert_eq!(combined.len(), 3);
//! ```

mod combiner;
mod rank;
mod rank_average;

// Re-export main types
pub use combiner::{Combiner, FactorScores};
pub use rank::descending_ranks;
pub use rank_average::RankAverageCombiner;
