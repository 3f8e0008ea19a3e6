//! Long-term momentum factor based on 12-month returns.

use crate::{
    columns::MOMENTUM_12M,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Long-term momentum factor.
///
/// Scores each stock by its trailing twelve-month return, the classic
/// cross-sectional momentum horizon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongTermMomentum;

impl Factor for LongTermMomentum {
    fn name(&self) -> &str {
        "long_term_momentum"
    }

    fn description(&self) -> &str {
        "Trailing 12-month total return"
    }

    fn required_columns(&self) -> &[&str] {
        &[MOMENTUM_12M]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, MOMENTUM_12M, Direction::HigherIsBetter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score() {
        let record = StockRecord::new("JPM", 2008).with_field(MOMENTUM_12M, -38.5);
        assert_eq!(LongTermMomentum.score(&record), Some(-38.5));
        assert_eq!(LongTermMomentum.score(&StockRecord::new("JPM", 2008)), None);
    }
}
