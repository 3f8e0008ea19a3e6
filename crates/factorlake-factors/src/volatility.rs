//! Low-volatility factor.

use crate::{
    columns::PRICE_VOLATILITY,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Trailing one-year price volatility, inverted.
///
/// Lower volatility is treated as preferable, so the raw percentage is
/// negated and the calmest stock scores highest.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceVolatility;

impl Factor for PriceVolatility {
    fn name(&self) -> &str {
        "price_volatility"
    }

    fn description(&self) -> &str {
        "Trailing one-year price volatility (lower is better)"
    }

    fn required_columns(&self) -> &[&str] {
        &[PRICE_VOLATILITY]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, PRICE_VOLATILITY, Direction::LowerIsBetter)
    }
}
