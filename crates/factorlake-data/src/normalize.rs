//! Turning a raw table into a [`Dataset`].
//!
//! Every loader produces a polars [`DataFrame`] and hands it to
//! [`normalize_frame`], which
//!
//! - trims column names and keeps only the first of any repeated column,
//! - treats `--` and empty strings as null,
//! - derives the ticker from `Ticker-Region` and the year from `Date` when
//!   the plain columns are missing,
//! - parses the ending price and factor-input columns strictly,
//! - keeps the first row of any repeated `(ticker, year)` pair.
//!
//! Column names match in display form (`Ending Price`) or snake form
//! (`ending_price`).

use crate::{Result, error::DataError};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use factorlake_traits::{DataIntegrityError, Dataset, StockRecord, Year, column_key};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::{info, warn};

/// Plain ticker column.
pub const TICKER: &str = "Ticker";
/// Ticker with exchange region suffix, e.g. `AAPL-US`.
pub const TICKER_REGION: &str = "Ticker-Region";
/// Observation year.
pub const YEAR: &str = "Year";
/// Observation date, used when there is no year column.
pub const DATE: &str = "Date";
/// Year-end price.
pub const ENDING_PRICE: &str = "Ending Price";
/// Industry classification used by the fossil-fuel screen.
pub const INDUSTRY: &str = "FactSet Industry";
/// Sector classification used by the sector screen.
pub const SECTOR: &str = "Scott's Sector (5)";

const NULL_MARKERS: &[&str] = &["", "--"];

/// Which columns to parse as factor inputs.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Factor-input columns, any spelling. Other non-key columns are ignored.
    pub numeric_columns: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            numeric_columns: factorlake_factors::columns::ALL
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

/// One column as optional text cells.
struct TextColumn {
    name: String,
    cells: Vec<Option<String>>,
}

impl TextColumn {
    fn cell(&self, row: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|c| c.as_deref())
            .map(str::trim)
            .filter(|c| !NULL_MARKERS.contains(c))
    }
}

/// Normalizes a raw table into a dataset.
///
/// # Errors
///
/// - [`DataIntegrityError::MissingColumn`] when no ticker, year or ending
///   price column can be found
/// - [`DataIntegrityError::UnparseableField`] when a numeric cell is neither a
///   number nor a null marker
pub fn normalize_frame(frame: &DataFrame, options: &NormalizeOptions) -> Result<Dataset> {
    let columns = text_columns(frame)?;
    let find = |name: &str| {
        let key = column_key(name);
        columns.iter().find(|c| column_key(&c.name) == key)
    };

    let ticker = find(TICKER);
    let ticker_region = find(TICKER_REGION);
    if ticker.is_none() && ticker_region.is_none() {
        return Err(DataIntegrityError::MissingColumn(TICKER.to_string()).into());
    }
    let year = find(YEAR);
    let date = find(DATE);
    if year.is_none() && date.is_none() {
        return Err(DataIntegrityError::MissingColumn(YEAR.to_string()).into());
    }
    let price = find(ENDING_PRICE)
        .ok_or_else(|| DataIntegrityError::MissingColumn(ENDING_PRICE.to_string()))?;
    let industry = find(INDUSTRY);
    let sector = find(SECTOR);

    let numeric: Vec<&TextColumn> = {
        let mut seen = HashSet::new();
        options
            .numeric_columns
            .iter()
            .filter_map(|name| find(name))
            .filter(|c| seen.insert(column_key(&c.name)))
            .collect()
    };

    let mut records = Vec::with_capacity(frame.height());
    let mut seen = HashSet::new();
    let mut no_ticker = 0usize;
    let mut duplicates = 0usize;

    for row in 0..frame.height() {
        let Some(symbol) = ticker
            .and_then(|c| c.cell(row))
            .map(str::to_string)
            .or_else(|| ticker_region.and_then(|c| c.cell(row)).map(strip_region))
        else {
            no_ticker += 1;
            continue;
        };

        let row_year = match year.and_then(|c| c.cell(row)) {
            Some(raw) => parse_year(raw).ok_or_else(|| unparseable(year, row, raw))?,
            None => match date.and_then(|c| c.cell(row)) {
                Some(raw) => parse_date_year(raw).ok_or_else(|| unparseable(date, row, raw))?,
                None => {
                    warn!("Row {} ({}) has no year, dropped", row, symbol);
                    continue;
                }
            },
        };

        if !seen.insert((symbol.clone(), row_year)) {
            duplicates += 1;
            warn!(
                "Duplicate row for {} in {} at row {}, keeping the first",
                symbol, row_year, row
            );
            continue;
        }

        let mut record = StockRecord::new(symbol, row_year);
        record.ending_price = parse_number(price, row)?;
        record.industry = industry.and_then(|c| c.cell(row)).map(str::to_string);
        record.sector = sector.and_then(|c| c.cell(row)).map(str::to_string);
        for column in &numeric {
            record.set_field(&column.name, parse_number(column, row)?);
        }
        records.push(record);
    }

    if no_ticker > 0 {
        warn!("Dropped {} rows without a ticker", no_ticker);
    }
    info!(
        "Normalized {} rows ({} duplicates dropped, {} factor columns)",
        records.len(),
        duplicates,
        numeric.len()
    );

    Ok(Dataset::with_columns(
        records,
        numeric.iter().map(|c| c.name.as_str()),
    ))
}

/// Reads every column as text, trimming names and dropping repeats.
fn text_columns(frame: &DataFrame) -> Result<Vec<TextColumn>> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(frame.width());
    for column in frame.get_columns() {
        let name = column.name().as_str().trim().to_string();
        if !seen.insert(column_key(&name)) {
            continue;
        }
        let text = column
            .as_materialized_series()
            .cast(&DataType::String)?;
        let cells = text
            .str()?
            .into_iter()
            .map(|cell| cell.map(str::to_string))
            .collect();
        columns.push(TextColumn { name, cells });
    }
    Ok(columns)
}

/// `AAPL-US` -> `AAPL`.
fn strip_region(ticker_region: &str) -> String {
    ticker_region
        .split('-')
        .next()
        .unwrap_or(ticker_region)
        .trim()
        .to_string()
}

fn parse_number(column: &TextColumn, row: usize) -> Result<Option<f64>> {
    column
        .cell(row)
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|_| unparseable(Some(column), row, raw))
        })
        .transpose()
}

fn parse_year(raw: &str) -> Option<Year> {
    raw.parse::<Year>().ok().or_else(|| {
        let value = raw.parse::<f64>().ok()?;
        (value.fract() == 0.0 && value.abs() < 1e5).then_some(value as Year)
    })
}

fn parse_date_year(raw: &str) -> Option<Year> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Some(date.year());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.year());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.year());
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|d| d.year())
}

fn unparseable(column: Option<&TextColumn>, row: usize, raw: &str) -> DataError {
    DataIntegrityError::UnparseableField {
        column: column.map(|c| c.name.clone()).unwrap_or_default(),
        row,
        value: raw.to_string(),
    }
    .into()
}
