//! Short-term momentum factor based on 1-month returns.

use crate::{
    columns::MOMENTUM_1M,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Short-term momentum factor.
///
/// Scores each stock by its trailing one-month return. Higher recent
/// returns indicate near-term strength.
///
/// # Example
///
/// ```ignore
/// use factorlake_factors::momentum::ShortTermMomentum;
///
/// let factor = ShortTermMomentum;
/// let score = factor.score(&record);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortTermMomentum;

impl Factor for ShortTermMomentum {
    fn name(&self) -> &str {
        "short_term_momentum"
    }

    fn description(&self) -> &str {
        "Trailing 1-month total return"
    }

    fn required_columns(&self) -> &[&str] {
        &[MOMENTUM_1M]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, MOMENTUM_1M, Direction::HigherIsBetter)
    }
}
