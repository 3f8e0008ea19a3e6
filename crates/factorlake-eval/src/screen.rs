//! Exclusion screens applied to each year's universe before scoring.

use crate::snapshot::MarketSnapshot;
use factorlake_traits::StockRecord;

/// The five sector labels carried by the dataset's sector column.
pub const SECTORS: &[&str] = &[
    "Consumer",
    "Technology",
    "Financials",
    "Industrials",
    "Healthcare",
];

/// Industry keywords that mark a fossil-fuel business.
pub const FOSSIL_FUEL_KEYWORDS: &[&str] = &["oil", "gas", "coal", "energy", "fossil"];

/// A filter that removes disqualified stocks from a year's universe.
///
/// Screens run per year on that year's snapshot, since classifications can
/// change from one year to the next.
pub trait Screen: Send + Sync + std::fmt::Debug {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Whether the screen has anything to act on in this snapshot.
    ///
    /// An inactive screen keeps every stock.
    fn is_active_for(&self, _snapshot: &MarketSnapshot<'_>) -> bool {
        true
    }

    /// Whether `record` is removed.
    fn excludes(&self, record: &StockRecord) -> bool;
}

/// Removes stocks whose industry mentions a fossil-fuel keyword.
///
/// Matching is a case-insensitive substring search, so "Oil & Gas Production"
/// and "Integrated Oil" are both removed. Stocks without an industry are kept.
#[derive(Debug, Clone)]
pub struct FossilFuelScreen {
    keywords: Vec<String>,
}

impl FossilFuelScreen {
    /// Screen with a custom keyword list.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl Default for FossilFuelScreen {
    fn default() -> Self {
        Self::with_keywords(FOSSIL_FUEL_KEYWORDS)
    }
}

impl Screen for FossilFuelScreen {
    fn name(&self) -> &str {
        "fossil_fuel"
    }

    fn excludes(&self, record: &StockRecord) -> bool {
        record.industry.as_deref().is_some_and(|industry| {
            let industry = industry.to_lowercase();
            self.keywords.iter().any(|k| industry.contains(k.as_str()))
        })
    }
}

/// Keeps only stocks in the selected sectors.
///
/// If no stock in a year carries a sector label (the dataset has no sector
/// column) the screen leaves that year's universe unchanged.
#[derive(Debug, Clone)]
pub struct SectorScreen {
    sectors: Vec<String>,
}

impl SectorScreen {
    /// Screen keeping the given sectors (compared case-insensitively).
    pub fn new<I, S>(sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            sectors: sectors
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// The selected sectors.
    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }
}

impl Screen for SectorScreen {
    fn name(&self) -> &str {
        "sector"
    }

    fn is_active_for(&self, snapshot: &MarketSnapshot<'_>) -> bool {
        snapshot.records().any(|r| r.sector.is_some())
    }

    fn excludes(&self, record: &StockRecord) -> bool {
        match record.sector.as_deref() {
            Some(sector) => !self
                .sectors
                .iter()
                .any(|s| s.eq_ignore_ascii_case(sector.trim())),
            None => true,
        }
    }
}

/// Resolves a sector name against [`SECTORS`], case-insensitively.
pub fn canonical_sector(name: &str) -> Option<&'static str> {
    SECTORS
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(name.trim()))
}
