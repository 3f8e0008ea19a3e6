//! Common types used throughout factorlake.
//!
//! The core works on a fully materialized [`Dataset`] of annual
//! [`StockRecord`]s. Loaders are responsible for turning whatever tabular
//! source they read into this shape.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A ticker symbol, the identifying key of a stock within one year.
pub type Ticker = String;

/// A calendar year.
pub type Year = i32;

/// Canonical lookup key for a column name.
///
/// Lowercases the name and collapses every run of non-alphanumeric
/// characters into a single `_`, so `"Ending Price"` and `"ending_price"`
/// (or `"ROE using 9/30 Data"` and `"roe_using_9_30_data"`) address the
/// same column.
///
/// # Example
///
/// ```
/// use factorlake_traits::column_key;
///
/// assert_eq!(column_key("12-Mo Momentum %"), "12_mo_momentum");
/// assert_eq!(column_key("ending_price"), column_key("Ending Price"));
/// ```
pub fn column_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    key
}

/// One (ticker, year) observation.
///
/// Factor-input fields are stored under their [`column_key`]; a field that
/// is null in the source is simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Observation year.
    pub year: Year,
    /// Price at the end of the year, if reported.
    pub ending_price: Option<f64>,
    /// Industry classification used by exclusion screens.
    pub industry: Option<String>,
    /// Sector classification used by the sector screen.
    pub sector: Option<String>,
    fields: BTreeMap<String, f64>,
}

impl StockRecord {
    /// Creates a record with no price, classification or fields.
    pub fn new(ticker: impl Into<Ticker>, year: Year) -> Self {
        Self {
            ticker: ticker.into(),
            year,
            ending_price: None,
            industry: None,
            sector: None,
            fields: BTreeMap::new(),
        }
    }

    /// Sets the ending price.
    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.ending_price = Some(price);
        self
    }

    /// Sets a factor-input field.
    #[must_use]
    pub fn with_field(mut self, column: &str, value: f64) -> Self {
        self.set_field(column, Some(value));
        self
    }

    /// Sets the industry classification.
    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Sets the sector classification.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets or clears a factor-input field. Non-finite values are dropped.
    pub fn set_field(&mut self, column: &str, value: Option<f64>) {
        let key = column_key(column);
        match value {
            Some(v) if v.is_finite() => {
                self.fields.insert(key, v);
            }
            _ => {
                self.fields.remove(&key);
            }
        }
    }

    /// Returns a factor-input field, or `None` when it is null or absent.
    pub fn field(&self, column: &str) -> Option<f64> {
        self.fields.get(&column_key(column)).copied()
    }

    /// Returns the ending price if it can be traded at: finite and positive.
    pub fn usable_price(&self) -> Option<f64> {
        self.ending_price.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Iterates the canonical keys of the populated fields.
    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// The full panel of annual observations handed to the backtester.
///
/// Besides the rows, a dataset remembers which factor-input columns its
/// source carried. A column that was never present lets factors that need
/// it degrade to "always absent" once, up front, instead of per row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<StockRecord>,
    columns: BTreeSet<String>,
}

impl Dataset {
    /// Creates a dataset whose known columns are the fields its rows populate.
    pub fn new(records: Vec<StockRecord>) -> Self {
        let columns = records
            .iter()
            .flat_map(|r| r.field_keys().map(str::to_string))
            .collect();
        Self { records, columns }
    }

    /// Creates a dataset with an explicit column list (all-null columns included).
    pub fn with_columns<I, S>(records: Vec<StockRecord>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dataset = Self::new(records);
        dataset
            .columns
            .extend(columns.into_iter().map(|c| column_key(c.as_ref())));
        dataset
    }

    /// All rows, in source order.
    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source carried the given factor-input column.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column_key(column))
    }

    /// Returns the subset of `required` columns the dataset lacks.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|c| !self.has_column(c))
            .collect()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> BTreeSet<Year> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Rows for one year, in source order.
    pub fn rows_for(&self, year: Year) -> impl Iterator<Item = &StockRecord> {
        self.records.iter().filter(move |r| r.year == year)
    }
}

impl From<Vec<StockRecord>> for Dataset {
    fn from(records: Vec<StockRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_key_forms_agree() {
        assert_eq!(column_key("Ending Price"), "ending_price");
        assert_eq!(column_key("  Ending Price "), "ending_price");
        assert_eq!(column_key("ROE using 9/30 Data"), "roe_using_9_30_data");
        assert_eq!(column_key("Next FY Earns/P"), "next_fy_earns_p");
        assert_eq!(column_key("Scott's Sector (5)"), "scott_s_sector_5");
        assert_eq!(column_key("Ticker-Region"), column_key("ticker_region"));
    }

    #[test]
    fn test_record_fields_by_any_spelling() {
        let record = StockRecord::new("AAPL", 2010).with_field("ROE using 9/30 Data", 0.25);
        assert_eq!(record.field("roe_using_9_30_data"), Some(0.25));
        assert_eq!(record.field("ROE using 9/30 Data"), Some(0.25));
        assert_eq!(record.field("ROA %"), None);
    }

    #[test]
    fn test_non_finite_field_is_absent() {
        let mut record = StockRecord::new("AAPL", 2010).with_field("ROA %", 1.0);
        record.set_field("ROA %", Some(f64::NAN));
        assert_eq!(record.field("ROA %"), None);
    }

    #[test]
    fn test_usable_price() {
        assert_eq!(StockRecord::new("A", 2010).usable_price(), None);
        assert_eq!(
            StockRecord::new("A", 2010).with_price(0.0).usable_price(),
            None
        );
        assert_eq!(
            StockRecord::new("A", 2010).with_price(-3.0).usable_price(),
            None
        );
        assert_eq!(
            StockRecord::new("A", 2010).with_price(12.5).usable_price(),
            Some(12.5)
        );
    }

    #[test]
    fn test_dataset_columns() {
        let dataset = Dataset::with_columns(
            vec![StockRecord::new("A", 2010).with_field("ROA %", 1.0)],
            ["Book/Price"],
        );
        assert!(dataset.has_column("ROA %"));
        assert!(dataset.has_column("book_price"));
        assert!(!dataset.has_column("1-Mo Momentum %"));
        assert_eq!(
            dataset.missing_columns(&["ROA %", "1-Mo Momentum %"]),
            vec!["1-Mo Momentum %"]
        );
    }

    #[test]
    fn test_dataset_years_and_rows() {
        let dataset = Dataset::new(vec![
            StockRecord::new("A", 2011),
            StockRecord::new("B", 2010),
            StockRecord::new("C", 2011),
        ]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.years().into_iter().collect::<Vec<_>>(), vec![2010, 2011]);
        let tickers: Vec<_> = dataset.rows_for(2011).map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["A", "C"]);
    }
}
