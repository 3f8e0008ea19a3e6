//! Holdings for one holding period.

use factorlake_traits::{Ticker, Year};
use serde::{Deserialize, Serialize};

/// One position: a ticker, its weight and the price it was bought at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Held ticker.
    pub ticker: Ticker,
    /// Fraction of the portfolio.
    pub weight: f64,
    /// Ending price in the formation year.
    pub entry_price: f64,
}

/// The positions selected at one formation year.
///
/// Created fresh each year and never mutated; the next year's portfolio
/// supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Formation year.
    pub year: Year,
    holdings: Vec<Holding>,
}

impl Portfolio {
    /// An empty portfolio (held in cash).
    pub const fn empty(year: Year) -> Self {
        Self {
            year,
            holdings: Vec::new(),
        }
    }

    /// Equal-weights the given `(ticker, entry_price)` pairs at `1 / N` each.
    pub fn equal_weight<I>(year: Year, positions: I) -> Self
    where
        I: IntoIterator<Item = (Ticker, f64)>,
    {
        let positions: Vec<_> = positions.into_iter().collect();
        let weight = if positions.is_empty() {
            0.0
        } else {
            1.0 / positions.len() as f64
        };
        let holdings = positions
            .into_iter()
            .map(|(ticker, entry_price)| Holding {
                ticker,
                weight,
                entry_price,
            })
            .collect();
        Self { year, holdings }
    }

    /// The positions, in selection order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Whether the portfolio holds nothing.
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of weights (1.0 unless empty).
    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }

    /// Held tickers, in selection order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.holdings.iter().map(|h| h.ticker.as_str())
    }
}
