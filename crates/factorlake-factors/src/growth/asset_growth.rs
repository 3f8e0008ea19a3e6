//! One-year total asset growth factor.

use crate::{
    columns::ASSET_GROWTH,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// One-year growth in total assets.
///
/// Higher asset growth signals expansion and is treated as more attractive
/// for growth-oriented portfolios.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetGrowth;

impl Factor for AssetGrowth {
    fn name(&self) -> &str {
        "asset_growth"
    }

    fn description(&self) -> &str {
        "One-year growth in total assets"
    }

    fn required_columns(&self) -> &[&str] {
        &[ASSET_GROWTH]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, ASSET_GROWTH, Direction::HigherIsBetter)
    }
}
