//! Return on equity factor.

use crate::{
    columns::ROE,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Return on Equity factor.
///
/// Firms with higher return on equity generate more profit from shareholder
/// capital, a sign of efficient capital allocation. The value is taken from
/// the September 30 fiscal snapshot so that it is known at formation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnOnEquity;

impl Factor for ReturnOnEquity {
    fn name(&self) -> &str {
        "return_on_equity"
    }

    fn description(&self) -> &str {
        "Net income relative to shareholder equity"
    }

    fn required_columns(&self) -> &[&str] {
        &[ROE]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, ROE, Direction::HigherIsBetter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        assert_eq!(ReturnOnEquity.name(), "return_on_equity");
        assert_eq!(ReturnOnEquity.required_columns(), &[ROE]);
    }

    #[test]
    fn test_negative_roe_is_kept() {
        let record = StockRecord::new("F", 2009).with_field(ROE, -0.4);
        assert_eq!(ReturnOnEquity.score(&record), Some(-0.4));
    }
}
