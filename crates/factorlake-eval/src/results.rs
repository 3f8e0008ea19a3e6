//! Backtest output: the year-indexed value series and its JSON form.

use crate::{metrics::PerformanceMetrics, portfolio::Portfolio, rebalance::RebalanceConfig};
use factorlake_traits::{MissingData, Year};
use serde::{Deserialize, Serialize};

/// One realized holding period, `formation_year -> year`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Year the portfolio was formed and bought.
    pub formation_year: Year,
    /// Year the portfolio was priced and sold.
    pub year: Year,
    /// Positions held over the period.
    pub portfolio: Portfolio,
    /// Realized portfolio return (0.10 = +10%).
    pub period_return: f64,
    /// Portfolio value at formation.
    pub aum_start: f64,
    /// Portfolio value at the end of the period.
    pub aum_end: f64,
    /// Data gaps absorbed while forming and pricing the portfolio.
    pub missing: Vec<MissingData>,
}

/// Tally of the missing-data conditions in one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCounts {
    /// Stocks without a usable entry price.
    pub no_price: usize,
    /// Stocks some active factor could not score.
    pub no_factor_input: usize,
    /// Stocks removed by a screen.
    pub excluded: usize,
    /// Holdings without an exit price.
    pub delisted: usize,
    /// Whether nothing was eligible.
    pub empty_universe: bool,
}

impl MissingCounts {
    /// Counts conditions by kind.
    pub fn from_conditions(conditions: &[MissingData]) -> Self {
        let mut counts = Self::default();
        for condition in conditions {
            match condition {
                MissingData::NoPrice { .. } => counts.no_price += 1,
                MissingData::NoFactorInput { .. } => counts.no_factor_input += 1,
                MissingData::Excluded { .. } => counts.excluded += 1,
                MissingData::Delisted { .. } => counts.delisted += 1,
                MissingData::EmptyUniverse { .. } => counts.empty_universe = true,
            }
        }
        counts
    }
}

/// The accumulated result of a backtest run.
///
/// Holds one point per holding period, for years `start_year + 1 ..= end_year`.
/// The starting point `(start_year, initial_aum)` is not a period and is only
/// included by [`ResultSeries::with_origin`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSeries {
    start_year: Year,
    initial_aum: f64,
    periods: Vec<PeriodRecord>,
}

impl ResultSeries {
    /// An empty series starting at `start_year` with `initial_aum`.
    pub const fn new(start_year: Year, initial_aum: f64) -> Self {
        Self {
            start_year,
            initial_aum,
            periods: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, period: PeriodRecord) {
        self.periods.push(period);
    }

    /// First formation year.
    pub const fn start_year(&self) -> Year {
        self.start_year
    }

    /// Starting portfolio value.
    pub const fn initial_aum(&self) -> f64 {
        self.initial_aum
    }

    /// All realized periods, in order.
    pub fn periods(&self) -> &[PeriodRecord] {
        &self.periods
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether no period was realized.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Pricing year of each period, strictly increasing by one.
    pub fn years(&self) -> Vec<Year> {
        self.periods.iter().map(|p| p.year).collect()
    }

    /// Portfolio value at the end of each period, index-aligned with [`Self::years`].
    pub fn portfolio_values(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.aum_end).collect()
    }

    /// Realized return of each period.
    pub fn returns(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.period_return).collect()
    }

    /// Years and values with the starting point prepended, for plotting.
    pub fn with_origin(&self) -> (Vec<Year>, Vec<f64>) {
        let years = std::iter::once(self.start_year).chain(self.years()).collect();
        let values = std::iter::once(self.initial_aum)
            .chain(self.portfolio_values())
            .collect();
        (years, values)
    }

    /// Value after the last period (the initial AUM if there were none).
    pub fn final_value(&self) -> f64 {
        self.periods.last().map_or(self.initial_aum, |p| p.aum_end)
    }

    /// `(final_value - initial_aum) / initial_aum * 100`.
    pub fn overall_growth_pct(&self) -> f64 {
        (self.final_value() - self.initial_aum) / self.initial_aum * 100.0
    }
}

/// Per-period detail in [`BacktestOutput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Formation year.
    pub formation_year: Year,
    /// Pricing year.
    pub year: Year,
    /// Number of holdings.
    pub holdings: usize,
    /// Held tickers, best first.
    pub tickers: Vec<String>,
    /// Realized return.
    pub period_return: f64,
    /// Value at the end of the period.
    pub portfolio_value: f64,
    /// Missing-data tally.
    pub missing: MissingCounts,
}

impl From<&PeriodRecord> for PeriodSummary {
    fn from(period: &PeriodRecord) -> Self {
        Self {
            formation_year: period.formation_year,
            year: period.year,
            holdings: period.portfolio.len(),
            tickers: period.portfolio.tickers().map(str::to_string).collect(),
            period_return: period.period_return,
            portfolio_value: period.aum_end,
            missing: MissingCounts::from_conditions(&period.missing),
        }
    }
}

/// Serializable report handed to plotting and reporting consumers.
///
/// `years` and `portfolio_values` are index-aligned and exclude the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestOutput {
    /// Pricing year of each period.
    pub years: Vec<Year>,
    /// Portfolio value at each of `years`.
    pub portfolio_values: Vec<f64>,
    /// Value after the last period.
    pub final_value: f64,
    /// Total growth in percent.
    pub overall_growth_pct: f64,
    /// First formation year.
    pub start_year: Year,
    /// Starting value.
    pub initial_aum: f64,
    /// Active factor names.
    pub factors: Vec<String>,
    /// Whether the fossil-fuel screen was on.
    pub restrict_fossil_fuels: bool,
    /// Sector filter (empty = all sectors).
    pub sectors: Vec<String>,
    /// Risk and benchmark statistics.
    pub metrics: PerformanceMetrics,
    /// Per-period detail.
    pub periods: Vec<PeriodSummary>,
}

impl BacktestOutput {
    /// Assembles the report for a finished run.
    pub fn new<S: AsRef<str>>(series: &ResultSeries, config: &RebalanceConfig, factors: &[S]) -> Self {
        Self {
            years: series.years(),
            portfolio_values: series.portfolio_values(),
            final_value: series.final_value(),
            overall_growth_pct: series.overall_growth_pct(),
            start_year: series.start_year(),
            initial_aum: series.initial_aum(),
            factors: factors.iter().map(|f| f.as_ref().to_string()).collect(),
            restrict_fossil_fuels: config.restrict_fossil_fuels,
            sectors: config.sectors.clone(),
            metrics: PerformanceMetrics::calculate(series),
            periods: series.periods().iter().map(PeriodSummary::from).collect(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be represented in JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn period(formation_year: Year, aum_start: f64, period_return: f64) -> PeriodRecord {
        PeriodRecord {
            formation_year,
            year: formation_year + 1,
            portfolio: Portfolio::equal_weight(formation_year, vec![("A".to_string(), 10.0)]),
            period_return,
            aum_start,
            aum_end: aum_start * (1.0 + period_return),
            missing: Vec::new(),
        }
    }

    fn series() -> ResultSeries {
        let mut series = ResultSeries::new(2010, 100.0);
        series.push(period(2010, 100.0, 0.10));
        series.push(period(2011, 110.0, -0.50));
        series
    }

    #[test]
    fn test_accessors() {
        let series = series();
        assert_eq!(series.len(), 2);
        assert_eq!(series.years(), vec![2011, 2012]);
        assert_relative_eq!(series.final_value(), 55.0);
        assert_relative_eq!(series.overall_growth_pct(), -45.0);
        assert_eq!(series.returns(), vec![0.10, -0.50]);
    }

    #[test]
    fn test_with_origin() {
        let (years, values) = series().with_origin();
        assert_eq!(years, vec![2010, 2011, 2012]);
        assert_eq!(values.len(), 3);
        assert_relative_eq!(values[0], 100.0);
    }

    #[test]
    fn test_empty_series_final_value() {
        let series = ResultSeries::new(2010, 5.0);
        assert!(series.is_empty());
        assert_relative_eq!(series.final_value(), 5.0);
        assert_relative_eq!(series.overall_growth_pct(), 0.0);
    }

    #[test]
    fn test_missing_counts() {
        let counts = MissingCounts::from_conditions(&[
            MissingData::NoPrice {
                ticker: "A".to_string(),
                year: 2010,
            },
            MissingData::Delisted {
                ticker: "B".to_string(),
                year: 2011,
            },
            MissingData::Delisted {
                ticker: "C".to_string(),
                year: 2011,
            },
        ]);
        assert_eq!(counts.no_price, 1);
        assert_eq!(counts.delisted, 2);
        assert!(!counts.empty_universe);
    }

    #[test]
    fn test_output_json_fields() {
        let output = BacktestOutput::new(&series(), &RebalanceConfig::default(), &["roe"]);
        assert_eq!(output.years.len(), output.portfolio_values.len());

        let value: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        for key in [
            "years",
            "portfolio_values",
            "final_value",
            "overall_growth_pct",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["factors"][0], "roe");
        assert_eq!(value["periods"][0]["tickers"][0], "A");
    }
}
