//! Medium-term momentum factor based on 6-month returns.

use crate::{
    columns::MOMENTUM_6M,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Medium-term momentum factor.
///
/// Stocks with strong six-month performance tend to keep outperforming over
/// the following months. This is the intermediate-horizon momentum used by
/// the default backtest.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediumTermMomentum;

impl Factor for MediumTermMomentum {
    fn name(&self) -> &str {
        "medium_term_momentum"
    }

    fn description(&self) -> &str {
        "Trailing 6-month total return"
    }

    fn required_columns(&self) -> &[&str] {
        &[MOMENTUM_6M]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, MOMENTUM_6M, Direction::HigherIsBetter)
    }
}
