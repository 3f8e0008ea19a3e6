//! Forward earnings yield factor.

use crate::{
    columns::NEXT_FY_EARNINGS_YIELD,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Next fiscal year earnings over price.
///
/// Indicates how cheaply the market prices expected earnings. Higher yield
/// means a more attractive valuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarningsYield;

impl Factor for EarningsYield {
    fn name(&self) -> &str {
        "next_fy_earnings_yield"
    }

    fn description(&self) -> &str {
        "Next fiscal year earnings relative to price"
    }

    fn required_columns(&self) -> &[&str] {
        &[NEXT_FY_EARNINGS_YIELD]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, NEXT_FY_EARNINGS_YIELD, Direction::HigherIsBetter)
    }
}
