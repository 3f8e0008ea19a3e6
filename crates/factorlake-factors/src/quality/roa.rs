//! Return on assets factors.
//!
//! The source data carries ROA twice: once from the September 30 fiscal
//! snapshot and once as a plain percentage. Both are exposed.

use crate::{
    columns::{ROA, ROA_PCT},
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Return on Assets factor (September 30 fiscal snapshot).
///
/// Measures how efficiently a company uses its asset base to generate
/// earnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnOnAssets;

impl Factor for ReturnOnAssets {
    fn name(&self) -> &str {
        "return_on_assets"
    }

    fn description(&self) -> &str {
        "Net income relative to total assets"
    }

    fn required_columns(&self) -> &[&str] {
        &[ROA]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, ROA, Direction::HigherIsBetter)
    }
}

/// Return on Assets factor, percentage form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoaPercent;

impl Factor for RoaPercent {
    fn name(&self) -> &str {
        "roa_percent"
    }

    fn description(&self) -> &str {
        "Return on assets, percent"
    }

    fn required_columns(&self) -> &[&str] {
        &[ROA_PCT]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, ROA_PCT, Direction::HigherIsBetter)
    }
}
