//! One-year capital expenditure growth factor.

use crate::{
    columns::CAPEX_GROWTH,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// One-year growth in capital expenditure.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapexGrowth;

impl Factor for CapexGrowth {
    fn name(&self) -> &str {
        "capex_growth"
    }

    fn description(&self) -> &str {
        "One-year growth in capital expenditure"
    }

    fn required_columns(&self) -> &[&str] {
        &[CAPEX_GROWTH]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, CAPEX_GROWTH, Direction::HigherIsBetter)
    }
}
