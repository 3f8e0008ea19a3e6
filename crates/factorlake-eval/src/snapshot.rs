//! Per-year market view.

use factorlake_traits::{DataIntegrityError, Dataset, StockRecord, Year};
use std::collections::HashMap;

/// Immutable view of one year of the dataset, indexed by ticker.
///
/// A snapshot borrows its rows from the [`Dataset`]; it owns no cross-year
/// state. The rebalancer keeps at most two alive at once: the formation year
/// and the following pricing year.
#[derive(Debug, Clone)]
pub struct MarketSnapshot<'a> {
    year: Year,
    records: Vec<&'a StockRecord>,
    index: HashMap<&'a str, usize>,
}

impl<'a> MarketSnapshot<'a> {
    /// Builds the snapshot for `year` from the full dataset.
    ///
    /// # Errors
    ///
    /// [`DataIntegrityError::DuplicateTicker`] if two rows of that year share a
    /// ticker.
    pub fn build(dataset: &'a Dataset, year: Year) -> Result<Self, DataIntegrityError> {
        Self::from_records(year, dataset.rows_for(year))
    }

    /// Builds a snapshot from rows already known to belong to `year`.
    ///
    /// # Errors
    ///
    /// [`DataIntegrityError::DuplicateTicker`] on a repeated ticker.
    pub fn from_records<I>(year: Year, rows: I) -> Result<Self, DataIntegrityError>
    where
        I: IntoIterator<Item = &'a StockRecord>,
    {
        let mut records = Vec::new();
        let mut index = HashMap::new();
        for record in rows {
            if index.insert(record.ticker.as_str(), records.len()).is_some() {
                return Err(DataIntegrityError::DuplicateTicker {
                    ticker: record.ticker.clone(),
                    year,
                });
            }
            records.push(record);
        }
        Ok(Self {
            year,
            records,
            index,
        })
    }

    /// The snapshot's year.
    pub const fn year(&self) -> Year {
        self.year
    }

    /// Looks up a ticker's row.
    pub fn get(&self, ticker: &str) -> Option<&'a StockRecord> {
        self.index.get(ticker).map(|&i| self.records[i])
    }

    /// Ending price of `ticker`, if it is listed and has a finite positive price.
    ///
    /// An unknown ticker or a missing price is an expected condition
    /// (delisting, merger, data gap) and yields `None`.
    pub fn price_of(&self, ticker: &str) -> Option<f64> {
        self.get(ticker).and_then(StockRecord::usable_price)
    }

    /// Rows in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a StockRecord> + '_ {
        self.records.iter().copied()
    }

    /// Number of tickers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the year has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            StockRecord::new("AAPL", 2010).with_price(10.0),
            StockRecord::new("MSFT", 2010),
            StockRecord::new("AAPL", 2011).with_price(12.0),
            StockRecord::new("GE", 2010).with_price(-1.0),
        ])
    }

    #[test]
    fn test_build_filters_year() {
        let dataset = dataset();
        let snapshot = MarketSnapshot::build(&dataset, 2010).unwrap();
        assert_eq!(snapshot.year(), 2010);
        assert_eq!(snapshot.len(), 3);
        let tickers: Vec<_> = snapshot.records().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT", "GE"]);
    }

    #[test]
    fn test_price_of_tolerates_gaps() {
        let dataset = dataset();
        let snapshot = MarketSnapshot::build(&dataset, 2010).unwrap();
        assert_eq!(snapshot.price_of("AAPL"), Some(10.0));
        assert_eq!(snapshot.price_of("MSFT"), None);
        assert_eq!(snapshot.price_of("GE"), None);
        assert_eq!(snapshot.price_of("ENRN"), None);
    }

    #[test]
    fn test_empty_year() {
        let dataset = dataset();
        let snapshot = MarketSnapshot::build(&dataset, 1999).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_duplicate_ticker_is_fatal() {
        let dataset = Dataset::new(vec![
            StockRecord::new("AAPL", 2010).with_price(10.0),
            StockRecord::new("AAPL", 2010).with_price(11.0),
        ]);
        let err = MarketSnapshot::build(&dataset, 2010).unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::DuplicateTicker {
                ticker: "AAPL".to_string(),
                year: 2010
            }
        );
    }
}
