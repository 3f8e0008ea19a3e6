//! Annual rebalancing engine.
//!
//! For each formation year `t` in `start_year..end_year` the rebalancer
//!
//! 1. builds the snapshot for `t`,
//! 2. drops stocks without a usable price and stocks removed by a screen,
//! 3. scores the rest with every active factor, dropping any stock that some
//!    factor cannot score,
//! 4. combines the scores into a combined rank average,
//! 5. selects the best stocks (ties by ticker) and equal-weights them,
//! 6. prices the holdings in the snapshot for `t + 1` and compounds the
//!    portfolio value.
//!
//! Missing data never aborts a run. Only a malformed dataset
//! ([`DataIntegrityError`]) or an unusable configuration ([`ConfigError`])
//! does.

use crate::{
    portfolio::Portfolio,
    results::{PeriodRecord, ResultSeries},
    screen::{FossilFuelScreen, Screen, SectorScreen, canonical_sector},
    snapshot::MarketSnapshot,
};
use derive_more::Display;
use factorlake_combine::{Combiner, FactorScores, RankAverageCombiner};
use factorlake_traits::{
    ConfigError, DataIntegrityError, Dataset, Factor, MissingData, Result, StockRecord, Year,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How many of the ranked stocks to hold.
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// The best fraction of the eligible universe, at least one stock.
    #[display("top {:.1}%", _0 * 100.0)]
    TopFraction(f64),
    /// A fixed number of stocks (or all of them, if fewer are eligible).
    #[display("top {_0}")]
    TopCount(usize),
}

impl SelectionRule {
    /// Number of stocks to hold out of `eligible`.
    ///
    /// `TopFraction(f)` holds `max(1, floor(eligible * f))`, `TopCount(k)`
    /// holds `min(k, eligible)`. Nothing eligible means nothing held.
    pub fn count(&self, eligible: usize) -> usize {
        if eligible == 0 {
            return 0;
        }
        match *self {
            // The epsilon keeps e.g. 0.1 * 30 from flooring to 2.
            Self::TopFraction(f) => ((eligible as f64 * f + 1e-9).floor() as usize).clamp(1, eligible),
            Self::TopCount(k) => k.min(eligible),
        }
    }

    /// Checks that the rule can select anything.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSelection`] for a fraction outside `(0, 1]` or a
    /// zero count.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        match *self {
            Self::TopFraction(f) if !(f > 0.0 && f <= 1.0) => Err(ConfigError::InvalidSelection(
                format!("fraction must be in (0, 1], got {f}"),
            )),
            Self::TopCount(0) => Err(ConfigError::InvalidSelection(
                "count must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for SelectionRule {
    fn default() -> Self {
        Self::TopFraction(0.10)
    }
}

/// What a holding with no exit price contributes to the period return.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelistingPolicy {
    /// The position is written off: it contributes exactly `-weight`.
    #[default]
    #[display("total_loss")]
    TotalLoss,
    /// The position is dropped and its weight spread over the priced holdings.
    #[display("redistribute")]
    Redistribute,
    /// The position is sold at its entry price: it contributes zero.
    #[display("liquidate_at_entry")]
    LiquidateAtEntry,
}

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalanceConfig {
    /// First formation year (inclusive).
    pub start_year: Year,
    /// Terminal pricing year; the last portfolio is formed in `end_year - 1`.
    pub end_year: Year,
    /// Starting portfolio value.
    pub initial_aum: f64,
    /// Remove fossil-fuel industries before scoring.
    pub restrict_fossil_fuels: bool,
    /// Keep only these sectors; empty keeps all.
    pub sectors: Vec<String>,
    /// How many ranked stocks to hold.
    pub selection: SelectionRule,
    /// Treatment of holdings that disappear before they can be priced.
    pub delisting: DelistingPolicy,
    /// 0 = silent, 1 = one line per year, 2+ = per-ticker diagnostics.
    pub verbosity: u8,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            start_year: 2002,
            end_year: 2023,
            initial_aum: 1.0,
            restrict_fossil_fuels: false,
            sectors: Vec::new(),
            selection: SelectionRule::default(),
            delisting: DelistingPolicy::default(),
            verbosity: 1,
        }
    }
}

impl RebalanceConfig {
    /// Checks the configuration before any data is touched.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.start_year >= self.end_year {
            return Err(ConfigError::EmptyHorizon {
                start_year: self.start_year,
                end_year: self.end_year,
            });
        }
        if !(self.initial_aum.is_finite() && self.initial_aum > 0.0) {
            return Err(ConfigError::NonPositiveAum(self.initial_aum));
        }
        self.selection.validate()?;
        if let Some(unknown) = self.sectors.iter().find(|s| canonical_sector(s).is_none()) {
            return Err(ConfigError::UnknownSector(unknown.clone()));
        }
        Ok(())
    }

    /// Number of holding periods in the horizon.
    pub const fn periods(&self) -> usize {
        if self.end_year > self.start_year {
            self.end_year.abs_diff(self.start_year) as usize
        } else {
            0
        }
    }
}

/// The annual rebalancing loop.
///
/// Factors are shared read-only across years. The rebalancer owns its
/// screens, its combiner and the value accumulator of each run; `run` takes
/// `&self`, so one rebalancer can be run repeatedly with identical results.
#[derive(Debug)]
pub struct Rebalancer {
    factors: Vec<Box<dyn Factor>>,
    screens: Vec<Box<dyn Screen>>,
    combiner: Box<dyn Combiner>,
    config: RebalanceConfig,
}

impl Rebalancer {
    /// Creates a rebalancer, validating the configuration.
    ///
    /// Screens implied by the configuration (fossil fuels, sectors) are
    /// installed here.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoFactors`] for an empty factor list, or whatever
    /// [`RebalanceConfig::validate`] reports.
    pub fn new(factors: Vec<Box<dyn Factor>>, config: RebalanceConfig) -> Result<Self> {
        if factors.is_empty() {
            return Err(ConfigError::NoFactors.into());
        }
        config.validate()?;

        let mut screens: Vec<Box<dyn Screen>> = Vec::new();
        if config.restrict_fossil_fuels {
            screens.push(Box::new(FossilFuelScreen::default()));
        }
        if !config.sectors.is_empty() {
            let sectors = config.sectors.iter().filter_map(|s| canonical_sector(s));
            screens.push(Box::new(SectorScreen::new(sectors)));
        }

        Ok(Self {
            factors,
            screens,
            combiner: Box::new(RankAverageCombiner),
            config,
        })
    }

    /// Adds another exclusion screen.
    #[must_use]
    pub fn with_screen(mut self, screen: impl Screen + 'static) -> Self {
        self.screens.push(Box::new(screen));
        self
    }

    /// Replaces the rank-average combiner.
    #[must_use]
    pub fn with_combiner(mut self, combiner: impl Combiner + 'static) -> Self {
        self.combiner = Box::new(combiner);
        self
    }

    /// The run configuration.
    pub const fn config(&self) -> &RebalanceConfig {
        &self.config
    }

    /// Names of the active factors, in order.
    pub fn factor_names(&self) -> Vec<&str> {
        self.factors.iter().map(|f| f.name()).collect()
    }

    /// Runs the backtest over `dataset`.
    ///
    /// # Errors
    ///
    /// [`DataIntegrityError::MissingYear`] if a year of the horizon has no
    /// rows, [`DataIntegrityError::DuplicateTicker`] if a year repeats a
    /// ticker. Partial results are discarded.
    pub fn run(&self, dataset: &Dataset) -> Result<ResultSeries> {
        let RebalanceConfig {
            start_year,
            end_year,
            initial_aum,
            ..
        } = self.config;

        let years = dataset.years();
        if let Some(year) = (start_year..=end_year).find(|y| !years.contains(y)) {
            return Err(DataIntegrityError::MissingYear { year }.into());
        }

        let supported: Vec<bool> = self
            .factors
            .iter()
            .map(|factor| {
                let supported = factor.is_supported_by(dataset);
                if !supported && self.verbose() {
                    warn!(
                        "Factor {} needs columns {:?} that the dataset lacks; it scores nothing",
                        factor.name(),
                        dataset.missing_columns(factor.required_columns())
                    );
                }
                supported
            })
            .collect();

        if self.verbose() {
            info!(
                "Backtesting {} from {} to {} ({}, {} delisting)",
                self.factor_names().join(", "),
                start_year,
                end_year,
                self.config.selection,
                self.config.delisting
            );
        }

        let mut results = ResultSeries::new(start_year, initial_aum);
        let mut aum = initial_aum;
        let mut current = MarketSnapshot::build(dataset, start_year)?;

        for year in start_year..end_year {
            let next = MarketSnapshot::build(dataset, year + 1)?;
            let period = self.rebalance_year(&current, &next, &supported, aum)?;
            aum = period.aum_end;
            results.push(period);
            current = next;
        }

        if self.verbose() {
            info!(
                "Final value after {}: {:.4} ({:+.2}% overall)",
                end_year,
                results.final_value(),
                results.overall_growth_pct()
            );
        }

        Ok(results)
    }

    /// One formation-to-pricing transition.
    fn rebalance_year(
        &self,
        formation: &MarketSnapshot<'_>,
        pricing: &MarketSnapshot<'_>,
        supported: &[bool],
        aum: f64,
    ) -> Result<PeriodRecord> {
        let year = formation.year();
        let mut missing = Vec::new();

        let universe = self.eligible(formation, &mut missing);
        let (scored, factor_scores) = self.score(&universe, year, supported, &mut missing);

        let portfolio = if scored.is_empty() {
            missing.push(MissingData::EmptyUniverse { year });
            if self.verbose() {
                info!("{}: no eligible stocks, value carried forward", year);
            }
            Portfolio::empty(year)
        } else {
            let combined = self.combiner.combine(&factor_scores)?;
            self.select(formation, &scored, combined.as_slice().unwrap_or_default())
        };

        let period_return = self.realize(&portfolio, pricing, &mut missing);
        let aum_end = aum * (1.0 + period_return);

        if self.verbose() {
            info!(
                "{} -> {}: {} holdings, return {:+.2}%, value {:.4}",
                year,
                pricing.year(),
                portfolio.len(),
                period_return * 100.0,
                aum_end
            );
        }

        Ok(PeriodRecord {
            formation_year: year,
            year: pricing.year(),
            portfolio,
            period_return,
            aum_start: aum,
            aum_end,
            missing,
        })
    }

    /// Stocks with a usable price that no active screen removes.
    fn eligible<'a>(
        &self,
        snapshot: &MarketSnapshot<'a>,
        missing: &mut Vec<MissingData>,
    ) -> Vec<&'a StockRecord> {
        let year = snapshot.year();
        let screens: Vec<&dyn Screen> = self
            .screens
            .iter()
            .map(|s| &**s)
            .filter(|s| s.is_active_for(snapshot))
            .collect();

        snapshot
            .records()
            .filter(|record| {
                if record.usable_price().is_none() {
                    self.trace(&format!("{}: skipped, no usable price in {}", record.ticker, year));
                    missing.push(MissingData::NoPrice {
                        ticker: record.ticker.clone(),
                        year,
                    });
                    return false;
                }
                if let Some(screen) = screens.iter().find(|s| s.excludes(record)) {
                    self.trace(&format!(
                        "{}: removed by {} screen in {}",
                        record.ticker,
                        screen.name(),
                        year
                    ));
                    missing.push(MissingData::Excluded {
                        ticker: record.ticker.clone(),
                        year,
                        screen: screen.name().to_string(),
                    });
                    return false;
                }
                true
            })
            .collect()
    }

    /// Scores the universe; only stocks every factor can score survive.
    fn score<'a>(
        &self,
        universe: &[&'a StockRecord],
        year: Year,
        supported: &[bool],
        missing: &mut Vec<MissingData>,
    ) -> (Vec<&'a StockRecord>, Vec<FactorScores>) {
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(universe.len()); self.factors.len()];
        let mut scored = Vec::with_capacity(universe.len());
        let mut row = Vec::with_capacity(self.factors.len());

        'records: for &record in universe {
            row.clear();
            for (factor, &is_supported) in self.factors.iter().zip(supported) {
                let score = if is_supported {
                    factor.score(record).filter(|s| s.is_finite())
                } else {
                    None
                };
                match score {
                    Some(score) => row.push(score),
                    None => {
                        self.trace(&format!(
                            "{}: skipped, no {} input in {}",
                            record.ticker,
                            factor.name(),
                            year
                        ));
                        missing.push(MissingData::NoFactorInput {
                            ticker: record.ticker.clone(),
                            year,
                            factor: factor.name().to_string(),
                        });
                        continue 'records;
                    }
                }
            }
            for (column, &score) in columns.iter_mut().zip(&row) {
                column.push(score);
            }
            scored.push(record);
        }

        let factor_scores = self
            .factors
            .iter()
            .zip(columns)
            .map(|(factor, scores)| FactorScores::new(factor.name(), scores))
            .collect();
        (scored, factor_scores)
    }

    /// Picks the best stocks by combined rank (smaller first, ties by ticker).
    fn select(
        &self,
        formation: &MarketSnapshot<'_>,
        scored: &[&StockRecord],
        combined: &[f64],
    ) -> Portfolio {
        let mut order: Vec<usize> = (0..scored.len().min(combined.len())).collect();
        order.sort_by(|&a, &b| {
            combined[a]
                .total_cmp(&combined[b])
                .then_with(|| scored[a].ticker.cmp(&scored[b].ticker))
        });

        let count = self.config.selection.count(order.len());
        let positions = order.into_iter().take(count).filter_map(|i| {
            let ticker = &scored[i].ticker;
            formation.price_of(ticker).map(|price| (ticker.clone(), price))
        });
        Portfolio::equal_weight(formation.year(), positions)
    }

    /// Weighted return of the holdings priced in the following year.
    fn realize(
        &self,
        portfolio: &Portfolio,
        pricing: &MarketSnapshot<'_>,
        missing: &mut Vec<MissingData>,
    ) -> f64 {
        let mut period_return = 0.0;
        let mut priced_weight = 0.0;

        for holding in portfolio.holdings() {
            match pricing.price_of(&holding.ticker) {
                Some(exit) => {
                    period_return += holding.weight * (exit / holding.entry_price - 1.0);
                    priced_weight += holding.weight;
                }
                None => {
                    self.trace(&format!(
                        "{}: no exit price in {}, applying {}",
                        holding.ticker,
                        pricing.year(),
                        self.config.delisting
                    ));
                    missing.push(MissingData::Delisted {
                        ticker: holding.ticker.clone(),
                        year: pricing.year(),
                    });
                    if self.config.delisting == DelistingPolicy::TotalLoss {
                        period_return -= holding.weight;
                    }
                }
            }
        }

        match self.config.delisting {
            DelistingPolicy::Redistribute if priced_weight > 0.0 => period_return / priced_weight,
            DelistingPolicy::Redistribute => 0.0,
            DelistingPolicy::TotalLoss | DelistingPolicy::LiquidateAtEntry => period_return,
        }
    }

    const fn verbose(&self) -> bool {
        self.config.verbosity >= 1
    }

    fn trace(&self, message: &str) {
        if self.config.verbosity >= 2 {
            debug!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    const SCORE: &str = "Score";
    const OTHER: &str = "Other";

    /// Reads one column as its score.
    #[derive(Debug)]
    struct ColumnFactor(&'static str);

    impl Factor for ColumnFactor {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "column"
        }

        fn required_columns(&self) -> &[&str] {
            std::slice::from_ref(&self.0)
        }

        fn score(&self, record: &StockRecord) -> Option<f64> {
            record.field(self.0)
        }
    }

    fn stock(ticker: &str, year: Year, price: f64, score: f64) -> StockRecord {
        StockRecord::new(ticker, year)
            .with_price(price)
            .with_field(SCORE, score)
    }

    fn config(start_year: Year, end_year: Year) -> RebalanceConfig {
        RebalanceConfig {
            start_year,
            end_year,
            verbosity: 0,
            ..Default::default()
        }
    }

    fn rebalancer(config: RebalanceConfig) -> Rebalancer {
        Rebalancer::new(vec![Box::new(ColumnFactor(SCORE))], config).unwrap()
    }

    /// Ten stocks per year for 2010..=2013, prices growing 10% a year.
    fn panel() -> Dataset {
        let mut records = Vec::new();
        for year in 2010..=2013 {
            for i in 0..10 {
                let price = 10.0 * (i + 1) as f64 * 1.1_f64.powi(year - 2010);
                records.push(stock(&format!("T{i}"), year, price, i as f64));
            }
        }
        Dataset::new(records)
    }

    #[test]
    fn test_selection_rule_count() {
        assert_eq!(SelectionRule::TopFraction(0.10).count(0), 0);
        assert_eq!(SelectionRule::TopFraction(0.10).count(5), 1);
        assert_eq!(SelectionRule::TopFraction(0.10).count(30), 3);
        assert_eq!(SelectionRule::TopFraction(0.10).count(99), 9);
        assert_eq!(SelectionRule::TopFraction(1.0).count(7), 7);
        assert_eq!(SelectionRule::TopCount(5).count(3), 3);
        assert_eq!(SelectionRule::TopCount(5).count(30), 5);
    }

    #[test]
    fn test_selection_rule_validate() {
        assert!(SelectionRule::TopFraction(0.1).validate().is_ok());
        assert!(SelectionRule::TopFraction(0.0).validate().is_err());
        assert!(SelectionRule::TopFraction(1.5).validate().is_err());
        assert!(SelectionRule::TopFraction(f64::NAN).validate().is_err());
        assert!(SelectionRule::TopCount(0).validate().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = RebalanceConfig::default();
        assert_eq!(config.start_year, 2002);
        assert_eq!(config.end_year, 2023);
        assert_eq!(config.initial_aum, 1.0);
        assert!(!config.restrict_fossil_fuels);
        assert_eq!(config.selection, SelectionRule::TopFraction(0.10));
        assert_eq!(config.delisting, DelistingPolicy::TotalLoss);
        assert_eq!(config.periods(), 21);
    }

    #[test]
    fn test_periods_on_extreme_horizon() {
        let extreme = config(Year::MIN, Year::MAX);
        assert!(extreme.validate().is_ok());
        assert_eq!(extreme.periods(), u32::MAX as usize);
        assert_eq!(RebalanceConfig { end_year: 2010, ..config(2010, 2012) }.periods(), 0);
    }

    #[test]
    fn test_configuration_errors() {
        let empty = Rebalancer::new(Vec::new(), config(2010, 2012));
        assert!(matches!(
            empty,
            Err(factorlake_traits::LakeError::Configuration(ConfigError::NoFactors))
        ));

        let factors = || -> Vec<Box<dyn Factor>> { vec![Box::new(ColumnFactor(SCORE))] };
        assert!(Rebalancer::new(factors(), config(2012, 2012)).is_err());
        assert!(
            Rebalancer::new(
                factors(),
                RebalanceConfig {
                    initial_aum: 0.0,
                    ..config(2010, 2012)
                }
            )
            .is_err()
        );
        assert!(
            Rebalancer::new(
                factors(),
                RebalanceConfig {
                    sectors: vec!["Energy".to_string()],
                    ..config(2010, 2012)
                }
            )
            .is_err()
        );
    }

    #[test]
    fn test_series_covers_every_period() {
        let results = rebalancer(config(2010, 2013)).run(&panel()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results.years(), vec![2011, 2012, 2013]);
        for pair in results.years().windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
        // Every holding gains 10% a year.
        assert_relative_eq!(results.final_value(), 1.1_f64.powi(3), epsilon = 1e-9);
    }

    #[test]
    fn test_top_decile_picks_best_score() {
        let results = rebalancer(config(2010, 2011)).run(&panel()).unwrap();
        let period = &results.periods()[0];
        assert_eq!(period.portfolio.tickers().collect::<Vec<_>>(), vec!["T9"]);
    }

    #[test]
    fn test_rerun_is_bit_identical() {
        let dataset = panel();
        let rebalancer = rebalancer(config(2010, 2013));
        let first = rebalancer.run(&dataset).unwrap();
        let second = rebalancer.run(&dataset).unwrap();
        assert_eq!(first.portfolio_values(), second.portfolio_values());
        assert_eq!(first, second);
    }

    #[test]
    fn test_disabled_screen_matches_no_screen() {
        let mut records: Vec<StockRecord> = panel().records().to_vec();
        for record in records.iter_mut().filter(|r| r.ticker == "T9") {
            record.industry = Some("Oil & Gas Production".to_string());
        }
        let dataset = Dataset::new(records);

        let plain = rebalancer(config(2010, 2013)).run(&dataset).unwrap();
        let disabled = rebalancer(RebalanceConfig {
            restrict_fossil_fuels: false,
            ..config(2010, 2013)
        })
        .run(&dataset)
        .unwrap();
        assert_eq!(plain.portfolio_values(), disabled.portfolio_values());

        let screened = rebalancer(RebalanceConfig {
            restrict_fossil_fuels: true,
            ..config(2010, 2013)
        })
        .run(&dataset)
        .unwrap();
        let held: Vec<_> = screened.periods()[0].portfolio.tickers().collect();
        assert_eq!(held, vec!["T8"]);
    }

    #[test]
    fn test_screen_applies_per_year() {
        let mut records: Vec<StockRecord> = panel().records().to_vec();
        for record in records.iter_mut().filter(|r| r.ticker == "T9" && r.year == 2011) {
            record.industry = Some("Coal".to_string());
        }
        let results = rebalancer(RebalanceConfig {
            restrict_fossil_fuels: true,
            ..config(2010, 2013)
        })
        .run(&Dataset::new(records))
        .unwrap();

        let held: Vec<Vec<&str>> = results
            .periods()
            .iter()
            .map(|p| p.portfolio.tickers().collect())
            .collect();
        assert_eq!(held, vec![vec!["T9"], vec!["T8"], vec!["T9"]]);
    }

    #[test]
    fn test_sector_screen() {
        let mut records: Vec<StockRecord> = panel().records().to_vec();
        for record in &mut records {
            let sector = if record.ticker == "T3" { "Healthcare" } else { "Technology" };
            record.sector = Some(sector.to_string());
        }
        let results = rebalancer(RebalanceConfig {
            sectors: vec!["healthcare".to_string()],
            ..config(2010, 2011)
        })
        .run(&Dataset::new(records))
        .unwrap();
        let held: Vec<_> = results.periods()[0].portfolio.tickers().collect();
        assert_eq!(held, vec!["T3"]);
    }

    #[test]
    fn test_empty_universe_carries_value() {
        let dataset = Dataset::new(vec![
            stock("A", 2010, 10.0, 1.0),
            StockRecord::new("A", 2011).with_price(12.0),
            stock("A", 2012, 15.0, 1.0),
        ]);
        let results = rebalancer(RebalanceConfig {
            initial_aum: 100.0,
            ..config(2010, 2012)
        })
        .run(&dataset)
        .unwrap();

        let values = results.portfolio_values();
        assert_relative_eq!(values[0], 120.0, epsilon = 1e-9);
        // 2011 has no scoreable stock: value unchanged.
        assert_relative_eq!(values[1], values[0]);
        let period = &results.periods()[1];
        assert!(period.portfolio.is_empty());
        assert!(period.missing.contains(&MissingData::EmptyUniverse { year: 2011 }));
    }

    #[test]
    fn test_equal_weight_two_stocks() {
        let dataset = Dataset::new(vec![
            stock("A", 2010, 100.0, 2.0),
            stock("B", 2010, 50.0, 1.0),
            stock("A", 2011, 110.0, 2.0),
            stock("B", 2011, 55.0, 1.0),
        ]);
        let results = rebalancer(RebalanceConfig {
            initial_aum: 1000.0,
            selection: SelectionRule::TopCount(2),
            ..config(2010, 2011)
        })
        .run(&dataset)
        .unwrap();

        assert_relative_eq!(results.periods()[0].period_return, 0.10, epsilon = 1e-12);
        assert_relative_eq!(results.final_value(), 1100.0, epsilon = 1e-9);
        assert_relative_eq!(results.overall_growth_pct(), 10.0, epsilon = 1e-9);
    }

    fn delisting_dataset() -> Dataset {
        Dataset::new(vec![
            stock("A", 2010, 100.0, 2.0),
            stock("B", 2010, 50.0, 1.0),
            stock("A", 2011, 120.0, 2.0),
        ])
    }

    fn delisting_run(delisting: DelistingPolicy) -> ResultSeries {
        rebalancer(RebalanceConfig {
            selection: SelectionRule::TopCount(2),
            delisting,
            ..config(2010, 2011)
        })
        .run(&delisting_dataset())
        .unwrap()
    }

    #[test]
    fn test_delisting_is_total_loss() {
        let results = delisting_run(DelistingPolicy::TotalLoss);
        let period = &results.periods()[0];
        // A: 0.5 * 0.2 = 0.1; B delisted: exactly -0.5.
        assert_relative_eq!(period.period_return, 0.1 - 0.5, epsilon = 1e-12);
        assert_relative_eq!(results.final_value(), 0.6, epsilon = 1e-12);
        assert!(period.missing.contains(&MissingData::Delisted {
            ticker: "B".to_string(),
            year: 2011
        }));
    }

    #[test]
    fn test_delisting_redistribute_and_liquidate() {
        let redistributed = delisting_run(DelistingPolicy::Redistribute);
        assert_relative_eq!(redistributed.periods()[0].period_return, 0.2, epsilon = 1e-12);

        let liquidated = delisting_run(DelistingPolicy::LiquidateAtEntry);
        assert_relative_eq!(liquidated.periods()[0].period_return, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_single_holding_exact_growth() {
        let dataset = Dataset::new(vec![stock("A", 2010, 10.0, 1.0), stock("A", 2011, 12.0, 1.0)]);
        let results = rebalancer(config(2010, 2011)).run(&dataset).unwrap();
        assert_relative_eq!(results.final_value(), 1.2, epsilon = 1e-9);
    }

    #[test]
    fn test_rank_ties_break_alphabetically() {
        // X, Y, Z all average rank 2.0 under two opposed factors.
        let rows = |year| {
            vec![
                StockRecord::new("Z", year)
                    .with_price(10.0)
                    .with_field(SCORE, 2.0)
                    .with_field(OTHER, 2.0),
                StockRecord::new("Y", year)
                    .with_price(10.0)
                    .with_field(SCORE, 1.0)
                    .with_field(OTHER, 3.0),
                StockRecord::new("X", year)
                    .with_price(10.0)
                    .with_field(SCORE, 3.0)
                    .with_field(OTHER, 1.0),
            ]
        };
        let dataset = Dataset::new([rows(2010), rows(2011)].concat());
        let rebalancer = Rebalancer::new(
            vec![Box::new(ColumnFactor(SCORE)), Box::new(ColumnFactor(OTHER))],
            RebalanceConfig {
                selection: SelectionRule::TopCount(3),
                ..config(2010, 2011)
            },
        )
        .unwrap();

        let results = rebalancer.run(&dataset).unwrap();
        let held: Vec<_> = results.periods()[0].portfolio.tickers().collect();
        assert_eq!(held, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_partially_scoreable_stock_is_skipped() {
        let dataset = Dataset::new(vec![
            stock("A", 2010, 10.0, 1.0).with_field(OTHER, 1.0),
            stock("B", 2010, 10.0, 5.0),
            stock("A", 2011, 11.0, 1.0),
            stock("B", 2011, 20.0, 5.0),
        ]);
        let rebalancer = Rebalancer::new(
            vec![Box::new(ColumnFactor(SCORE)), Box::new(ColumnFactor(OTHER))],
            config(2010, 2011),
        )
        .unwrap();

        let results = rebalancer.run(&dataset).unwrap();
        let period = &results.periods()[0];
        assert_eq!(period.portfolio.tickers().collect::<Vec<_>>(), vec!["A"]);
        assert!(period.missing.iter().any(|m| matches!(
            m,
            MissingData::NoFactorInput { ticker, factor, .. } if ticker == "B" && factor == OTHER
        )));
    }

    #[test]
    fn test_unpriced_stock_is_ineligible() {
        let dataset = Dataset::new(vec![
            StockRecord::new("A", 2010).with_field(SCORE, 9.0),
            stock("B", 2010, 10.0, 1.0),
            stock("A", 2011, 10.0, 9.0),
            stock("B", 2011, 11.0, 1.0),
        ]);
        let results = rebalancer(config(2010, 2011)).run(&dataset).unwrap();
        let period = &results.periods()[0];
        assert_eq!(period.portfolio.tickers().collect::<Vec<_>>(), vec!["B"]);
        assert!(period.missing.contains(&MissingData::NoPrice {
            ticker: "A".to_string(),
            year: 2010
        }));
    }

    #[test]
    fn test_missing_column_degrades_factor() {
        // No row carries OTHER, so every stock is unscoreable.
        let rebalancer = Rebalancer::new(
            vec![Box::new(ColumnFactor(SCORE)), Box::new(ColumnFactor(OTHER))],
            config(2010, 2012),
        )
        .unwrap();
        let results = rebalancer.run(&panel()).unwrap();
        assert_eq!(results.len(), 2);
        assert_relative_eq!(results.final_value(), 1.0);
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn logged_run(verbosity: u8) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let rebalancer = Rebalancer::new(
            vec![Box::new(ColumnFactor(SCORE)), Box::new(ColumnFactor(OTHER))],
            RebalanceConfig {
                verbosity,
                ..config(2010, 2012)
            },
        )
        .unwrap();
        tracing::subscriber::with_default(subscriber, || rebalancer.run(&panel()).unwrap());
        captured.text()
    }

    #[test]
    fn test_verbosity_zero_is_silent() {
        assert_eq!(logged_run(0), "");
    }

    #[test]
    fn test_verbosity_gates_diagnostics() {
        let summary = logged_run(1);
        assert!(summary.contains("lacks; it scores nothing"));
        assert!(summary.contains("2010 -> 2011"));
        assert!(!summary.contains("skipped, no"));

        let detailed = logged_run(2);
        assert!(detailed.contains("skipped, no Other input in 2010"));
    }

    #[test]
    fn test_missing_year_is_fatal() {
        let dataset = Dataset::new(vec![stock("A", 2010, 10.0, 1.0), stock("A", 2012, 12.0, 1.0)]);
        let err = rebalancer(config(2010, 2012)).run(&dataset).unwrap_err();
        assert!(matches!(
            err,
            factorlake_traits::LakeError::DataIntegrity(DataIntegrityError::MissingYear { year: 2011 })
        ));
    }

    #[test]
    fn test_duplicate_ticker_aborts_run() {
        let dataset = Dataset::new(vec![
            stock("A", 2010, 10.0, 1.0),
            stock("A", 2011, 11.0, 1.0),
            stock("A", 2011, 12.0, 1.0),
        ]);
        let err = rebalancer(config(2010, 2011)).run(&dataset).unwrap_err();
        assert!(matches!(
            err,
            factorlake_traits::LakeError::DataIntegrity(DataIntegrityError::DuplicateTicker { .. })
        ));
    }
}
