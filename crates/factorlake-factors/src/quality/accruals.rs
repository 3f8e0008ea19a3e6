//! Accruals-to-assets factor.

use crate::{
    columns::ACCRUALS_TO_ASSETS,
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Accruals relative to total assets.
///
/// High accruals point to earnings that are not backed by cash, i.e. lower
/// earnings quality. The raw ratio is negated so that low-accrual firms
/// score highest.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualsToAssets;

impl Factor for AccrualsToAssets {
    fn name(&self) -> &str {
        "accruals_to_assets"
    }

    fn description(&self) -> &str {
        "Accruals scaled by total assets (lower is better)"
    }

    fn required_columns(&self) -> &[&str] {
        &[ACCRUALS_TO_ASSETS]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, ACCRUALS_TO_ASSETS, Direction::LowerIsBetter)
    }
}
