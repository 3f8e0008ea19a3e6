//! Factor registry for discovering, describing and constructing factors.
//!
//! Every factor the crate ships is listed here with the dataset column it
//! reads, the direction in which that column is attractive and a one-line
//! economic thesis. Factors can be looked up by canonical name, by a short
//! alias, or by the column name itself in any spelling accepted by
//! [`column_key`].

use crate::{
    columns,
    direction::Direction,
    growth::{AssetGrowth, CapexGrowth},
    momentum::{LongTermMomentum, MediumTermMomentum, ShortTermMomentum},
    quality::{AccrualsToAssets, ReturnOnAssets, ReturnOnEquity, RoaPercent},
    value::{BookToPrice, EarningsYield, PriceToBook},
    volatility::PriceVolatility,
};
use derive_more::Display;
use factorlake_traits::{Factor, LakeError, Result, column_key};
use serde::{Deserialize, Serialize};

/// Factor category classification.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactorCategory {
    /// Trailing price momentum
    Momentum,
    /// Valuation ratios
    Value,
    /// Profitability and earnings quality
    Quality,
    /// Balance-sheet and investment growth
    Growth,
    /// Price risk
    Volatility,
}

impl FactorCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Momentum => "Price momentum and trend-following factors",
            Self::Value => "Valuation metrics comparing fundamentals to price",
            Self::Quality => "Profitability and earnings quality metrics",
            Self::Growth => "Asset and investment growth factors",
            Self::Volatility => "Price risk factors",
        }
    }
}

/// Metadata about a factor.
#[derive(Debug, Clone, Serialize)]
pub struct FactorInfo {
    /// Unique identifier for the factor
    pub name: &'static str,

    /// Dataset column the factor reads
    pub column: &'static str,

    /// Category classification
    pub category: FactorCategory,

    /// Whether larger column values are more attractive
    pub direction: Direction,

    /// Human-readable description
    pub description: &'static str,

    /// Short economic rationale
    pub thesis: &'static str,

    /// Alternative names accepted by [`create_factor`]
    pub aliases: &'static [&'static str],
}

impl FactorInfo {
    /// Whether `query` names this factor, by name, alias or column.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if self.name.eq_ignore_ascii_case(query)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(query))
        {
            return true;
        }
        let key = column_key(query);
        !key.is_empty() && key == column_key(self.column)
    }
}

/// Get information about all available factors.
#[must_use]
pub fn available_factors() -> Vec<FactorInfo> {
    vec![
        // Quality factors
        FactorInfo {
            name: "return_on_equity",
            column: columns::ROE,
            category: FactorCategory::Quality,
            direction: Direction::HigherIsBetter,
            description: "Net income relative to shareholder equity",
            thesis: "Firms with higher ROE generate more profit from shareholder capital, \
                     a sign of efficient capital allocation.",
            aliases: &["roe"],
        },
        FactorInfo {
            name: "return_on_assets",
            column: columns::ROA,
            category: FactorCategory::Quality,
            direction: Direction::HigherIsBetter,
            description: "Net income relative to total assets",
            thesis: "ROA measures how efficiently a company uses its assets to generate \
                     earnings; higher ROA signals better operational efficiency.",
            aliases: &["roa"],
        },
        // Momentum factors
        FactorInfo {
            name: "long_term_momentum",
            column: columns::MOMENTUM_12M,
            category: FactorCategory::Momentum,
            direction: Direction::HigherIsBetter,
            description: "Trailing 12-month total return",
            thesis: "Stocks that performed well over the past year tend to keep \
                     outperforming in the near term.",
            aliases: &["momentum_12m", "mom_12m"],
        },
        FactorInfo {
            name: "medium_term_momentum",
            column: columns::MOMENTUM_6M,
            category: FactorCategory::Momentum,
            direction: Direction::HigherIsBetter,
            description: "Trailing 6-month total return",
            thesis: "Strong 6-month performance often continues; captures \
                     intermediate-term momentum.",
            aliases: &["momentum_6m", "mom_6m"],
        },
        FactorInfo {
            name: "short_term_momentum",
            column: columns::MOMENTUM_1M,
            category: FactorCategory::Momentum,
            direction: Direction::HigherIsBetter,
            description: "Trailing 1-month total return",
            thesis: "One-month momentum captures very short-term trend continuation.",
            aliases: &["momentum_1m", "mom_1m"],
        },
        // Value factors
        FactorInfo {
            name: "price_to_book",
            column: columns::PRICE_TO_BOOK,
            category: FactorCategory::Value,
            direction: Direction::LowerIsBetter,
            description: "Price relative to book value",
            thesis: "A lower P/B means the stock is cheaper relative to its book value.",
            aliases: &["pb", "p_b"],
        },
        FactorInfo {
            name: "next_fy_earnings_yield",
            column: columns::NEXT_FY_EARNINGS_YIELD,
            category: FactorCategory::Value,
            direction: Direction::HigherIsBetter,
            description: "Next fiscal year earnings relative to price",
            thesis: "Forward earnings yield shows how cheaply the market prices future \
                     earnings.",
            aliases: &["earnings_yield", "ey"],
        },
        // Volatility factors
        FactorInfo {
            name: "price_volatility",
            column: columns::PRICE_VOLATILITY,
            category: FactorCategory::Volatility,
            direction: Direction::LowerIsBetter,
            description: "Trailing one-year price volatility",
            thesis: "Higher volatility means higher risk; lower volatility is treated \
                     as preferable.",
            aliases: &["volatility", "vol"],
        },
        // Quality factors, continued
        FactorInfo {
            name: "accruals_to_assets",
            column: columns::ACCRUALS_TO_ASSETS,
            category: FactorCategory::Quality,
            direction: Direction::LowerIsBetter,
            description: "Accruals scaled by total assets",
            thesis: "High accruals point to lower earnings quality; lower accrual \
                     ratios are preferable.",
            aliases: &["accruals"],
        },
        FactorInfo {
            name: "roa_percent",
            column: columns::ROA_PCT,
            category: FactorCategory::Quality,
            direction: Direction::HigherIsBetter,
            description: "Return on assets, percent",
            thesis: "Profitability relative to the asset base; higher ROA suggests \
                     better operating performance.",
            aliases: &["roa_pct"],
        },
        // Growth factors
        FactorInfo {
            name: "asset_growth",
            column: columns::ASSET_GROWTH,
            category: FactorCategory::Growth,
            direction: Direction::HigherIsBetter,
            description: "One-year growth in total assets",
            thesis: "Asset growth signals expansion and investment opportunities.",
            aliases: &[],
        },
        FactorInfo {
            name: "capex_growth",
            column: columns::CAPEX_GROWTH,
            category: FactorCategory::Growth,
            direction: Direction::HigherIsBetter,
            description: "One-year growth in capital expenditure",
            thesis: "Rising capital expenditure can indicate investment in future growth.",
            aliases: &[],
        },
        // Value factors, continued
        FactorInfo {
            name: "book_to_price",
            column: columns::BOOK_TO_PRICE,
            category: FactorCategory::Value,
            direction: Direction::HigherIsBetter,
            description: "Book value of equity relative to price",
            thesis: "Higher book/price means cheaper relative to book value and aligns \
                     directly with the value thesis.",
            aliases: &["bp", "b_p"],
        },
    ]
}

/// Get all factors in a specific category.
#[must_use]
pub fn factors_by_category(category: &FactorCategory) -> Vec<FactorInfo> {
    available_factors()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific factor by name, alias or column.
#[must_use]
pub fn get_factor_info(name: &str) -> Option<FactorInfo> {
    available_factors().into_iter().find(|info| info.matches(name))
}

/// Constructs the factor registered under `name`.
///
/// # Errors
///
/// Returns [`LakeError::FactorNotFound`] if no factor matches.
pub fn create_factor(name: &str) -> Result<Box<dyn Factor>> {
    let info = get_factor_info(name).ok_or_else(|| LakeError::FactorNotFound(name.to_string()))?;
    let factor: Box<dyn Factor> = match info.name {
        "return_on_equity" => Box::new(ReturnOnEquity),
        "return_on_assets" => Box::new(ReturnOnAssets),
        "long_term_momentum" => Box::new(LongTermMomentum),
        "medium_term_momentum" => Box::new(MediumTermMomentum),
        "short_term_momentum" => Box::new(ShortTermMomentum),
        "price_to_book" => Box::new(PriceToBook),
        "next_fy_earnings_yield" => Box::new(EarningsYield),
        "price_volatility" => Box::new(PriceVolatility),
        "accruals_to_assets" => Box::new(AccrualsToAssets),
        "roa_percent" => Box::new(RoaPercent),
        "asset_growth" => Box::new(AssetGrowth),
        "capex_growth" => Box::new(CapexGrowth),
        "book_to_price" => Box::new(BookToPrice),
        other => return Err(LakeError::FactorNotFound(other.to_string())),
    };
    Ok(factor)
}

/// Constructs every factor named in `names`, in order.
///
/// # Errors
///
/// Fails on the first unknown name.
pub fn create_factors<S: AsRef<str>>(names: &[S]) -> Result<Vec<Box<dyn Factor>>> {
    names.iter().map(|n| create_factor(n.as_ref())).collect()
}

/// Get all factor categories with factors.
#[must_use]
pub fn available_categories() -> Vec<FactorCategory> {
    let mut categories: Vec<_> = available_factors()
        .into_iter()
        .map(|info| info.category)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}
