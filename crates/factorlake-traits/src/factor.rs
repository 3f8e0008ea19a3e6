//! Factor trait for scoring stocks.
//!
//! A factor maps one [`StockRecord`] to a real-valued score where higher
//! means more attractive. Factors are pure and stateless, so one instance is
//! shared read-only across every year of a backtest.

use crate::{Dataset, StockRecord};

/// A scoring function over a single stock-year observation.
///
/// `score` returns `None` whenever an input the factor depends on is null or
/// absent. Absent inputs are never coerced to zero; a stock that cannot be
/// scored is left out of ranking for that year.
///
/// # Example
///
/// ```
/// use factorlake_traits::{Factor, StockRecord};
///
/// #[derive(Debug)]
/// struct Cheapness;
///
/// impl Factor for Cheapness {
///     fn name(&self) -> &str {
///         "cheapness"
///     }
///
///     fn description(&self) -> &str {
///         "Negated ending price"
///     }
///
///     fn required_columns(&self) -> &[&str] {
///         &[]
///     }
///
///     fn score(&self, record: &StockRecord) -> Option<f64> {
///         record.usable_price().map(|p| -p)
///     }
/// }
///
/// let record = StockRecord::new("AAPL", 2010).with_price(10.0);
/// assert_eq!(Cheapness.score(&record), Some(-10.0));
/// ```
pub trait Factor: Send + Sync + std::fmt::Debug {
    /// Unique, stable identifier (snake_case).
    fn name(&self) -> &str;

    /// Human-readable description of what this factor measures.
    fn description(&self) -> &str;

    /// Dataset columns this factor reads.
    fn required_columns(&self) -> &[&str];

    /// Scores one record; `None` when it cannot be scored.
    fn score(&self, record: &StockRecord) -> Option<f64>;

    /// Whether every required column is present in `dataset`.
    ///
    /// A factor that is not supported scores nothing for the whole run.
    fn is_supported_by(&self, dataset: &Dataset) -> bool {
        dataset.missing_columns(self.required_columns()).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestFactor {
        column: &'static str,
    }

    impl Factor for TestFactor {
        fn name(&self) -> &str {
            "test_factor"
        }

        fn description(&self) -> &str {
            "Reads one column"
        }

        fn required_columns(&self) -> &[&str] {
            std::slice::from_ref(&self.column)
        }

        fn score(&self, record: &StockRecord) -> Option<f64> {
            record.field(self.column)
        }
    }

    #[test]
    fn test_factor_score_absent_input() {
        let factor = TestFactor { column: "ROA %" };
        let scored = StockRecord::new("A", 2010).with_field("ROA %", 4.0);
        let unscored = StockRecord::new("B", 2010);
        assert_eq!(factor.score(&scored), Some(4.0));
        assert_eq!(factor.score(&unscored), None);
    }

    #[test]
    fn test_factor_supported_by_dataset() {
        let factor = TestFactor { column: "ROA %" };
        let with = Dataset::new(vec![StockRecord::new("A", 2010).with_field("ROA %", 4.0)]);
        let without = Dataset::new(vec![StockRecord::new("A", 2010)]);
        assert!(factor.is_supported_by(&with));
        assert!(!factor.is_supported_by(&without));
    }

    #[test]
    fn test_factor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Factor>();
    }
}
