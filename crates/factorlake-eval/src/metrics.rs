//! Performance metrics for a finished backtest.
//!
//! All statistics use yearly data, so annualization is the identity for
//! volatility and the geometric mean for returns. Benchmark returns come from
//! the built-in table in [`crate::benchmark`].

use crate::{benchmark::benchmark_return, results::ResultSeries};
use serde::{Deserialize, Serialize};

/// Return, risk and benchmark-relative statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Number of holding periods
    pub n_periods: usize,
    /// Compounded return over the whole run
    pub total_return: f64,
    /// Geometric mean yearly return
    pub annualized_return: Option<f64>,
    /// Sample standard deviation of yearly returns
    pub annualized_volatility: Option<f64>,
    /// Largest peak-to-trough loss of portfolio value, as a fraction
    pub max_drawdown: f64,
    /// Benchmark return of each period
    pub benchmark_returns: Vec<f64>,
    /// Portfolio minus benchmark return, per period
    pub active_returns: Vec<f64>,
    /// Mean active return
    pub mean_active_return: Option<f64>,
    /// Sample standard deviation of active returns
    pub tracking_error: Option<f64>,
    /// Mean active return over tracking error
    pub information_ratio: Option<f64>,
}

impl PerformanceMetrics {
    /// Computes metrics for a run against the built-in benchmark.
    ///
    /// Each period is compared with the benchmark return of its formation year.
    pub fn calculate(series: &ResultSeries) -> Self {
        let benchmark: Vec<f64> = series
            .periods()
            .iter()
            .map(|p| benchmark_return(p.formation_year))
            .collect();
        let (_, values) = series.with_origin();
        Self::from_returns(&series.returns(), &benchmark, &values)
    }

    /// Computes metrics from explicit return and value series.
    ///
    /// `returns` and `benchmark` are index-aligned; `values` is the value path
    /// including the starting point.
    pub fn from_returns(returns: &[f64], benchmark: &[f64], values: &[f64]) -> Self {
        let n_periods = returns.len();
        let growth: f64 = returns.iter().map(|r| 1.0 + r).product();

        let annualized_return =
            (n_periods > 0).then(|| growth.max(0.0).powf(1.0 / n_periods as f64) - 1.0);

        let active_returns: Vec<f64> = returns
            .iter()
            .zip(benchmark)
            .map(|(r, b)| r - b)
            .collect();
        let mean_active_return = mean(&active_returns);
        let tracking_error = sample_std(&active_returns);

        let information_ratio = match (mean_active_return, tracking_error) {
            (Some(mean), Some(te)) if te > 0.0 => Some(mean / te),
            _ => None,
        };

        Self {
            n_periods,
            total_return: growth - 1.0,
            annualized_return,
            annualized_volatility: sample_std(returns),
            max_drawdown: max_drawdown(values),
            benchmark_returns: benchmark.to_vec(),
            active_returns,
            mean_active_return,
            tracking_error,
            information_ratio,
        }
    }
}

/// Largest fractional decline from a running peak.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut max_dd = 0.0;
    let mut peak = f64::NEG_INFINITY;

    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (ddof = 1); needs at least two observations.
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
