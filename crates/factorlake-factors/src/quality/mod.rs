//! Quality factors based on profitability and earnings quality.
//!
//! - Return on equity (ROE)
//! - Return on assets (ROA), in both the fiscal-snapshot and percent forms
//! - Accruals relative to assets (lower is better)

mod accruals;
mod roa;
mod roe;

pub use accruals::AccrualsToAssets;
pub use roa::{ReturnOnAssets, RoaPercent};
pub use roe::ReturnOnEquity;
