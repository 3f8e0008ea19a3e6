//! Dataset column names the built-in factors read.
//!
//! Names are given in their display form. Lookups go through
//! [`factorlake_traits::column_key`], so snake_case exports of the same
//! table match as well.

/// Trailing 1-month total return, percent.
pub const MOMENTUM_1M: &str = "1-Mo Momentum %";
/// Trailing 6-month total return, percent.
pub const MOMENTUM_6M: &str = "6-Mo Momentum %";
/// Trailing 12-month total return, percent.
pub const MOMENTUM_12M: &str = "12-Mo Momentum %";
/// Return on equity as of the September 30 fiscal snapshot.
pub const ROE: &str = "ROE using 9/30 Data";
/// Return on assets as of the September 30 fiscal snapshot.
pub const ROA: &str = "ROA using 9/30 Data";
/// Return on assets, percent.
pub const ROA_PCT: &str = "ROA %";
/// Accruals scaled by total assets.
pub const ACCRUALS_TO_ASSETS: &str = "Accruals/Assets";
/// Book value per share over price.
pub const BOOK_TO_PRICE: &str = "Book/Price";
/// Price over book value as of the September 30 fiscal snapshot.
pub const PRICE_TO_BOOK: &str = "Price to Book Using 9/30 Data";
/// Next fiscal year consensus earnings over price.
pub const NEXT_FY_EARNINGS_YIELD: &str = "Next FY Earns/P";
/// One-year growth in total assets, percent.
pub const ASSET_GROWTH: &str = "1-Yr Asset Growth %";
/// One-year growth in capital expenditure, percent.
pub const CAPEX_GROWTH: &str = "1-Yr CapEX Growth %";
/// Trailing one-year price volatility, percent.
pub const PRICE_VOLATILITY: &str = "1-Yr Price Vol %";

/// Every factor-input column, in registry order.
pub const ALL: &[&str] = &[
    ROE,
    ROA,
    MOMENTUM_12M,
    MOMENTUM_6M,
    MOMENTUM_1M,
    PRICE_TO_BOOK,
    NEXT_FY_EARNINGS_YIELD,
    PRICE_VOLATILITY,
    ACCRUALS_TO_ASSETS,
    ROA_PCT,
    ASSET_GROWTH,
    CAPEX_GROWTH,
    BOOK_TO_PRICE,
];
