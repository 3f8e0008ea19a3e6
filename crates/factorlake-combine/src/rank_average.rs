//! Combined rank average.

use ndarray::Array1;
use factorlake_traits::Result;

use crate::{
    combiner::{Combiner, FactorScores},
    rank::descending_ranks,
};

/// Averages per-factor ranks across factors.
///
/// Each factor's scores are converted to ordinal ranks (1 = best, ties by
/// input order) within the universe, then the ranks are averaged. Working on
/// ranks puts factors with different units on the same footing; averaging
/// raw scores would let the widest-ranging factor dominate.
///
/// With a single factor the output is just that factor's ranks.
///
/// # Examples
///
/// ```rust
/// use factorlake_combine::{Combiner, FactorScores, RankAverageCombiner};
///
/// let combined = RankAverageCombiner
///     .combine(&[
///         FactorScores::new("a", vec![3.0, 1.0, 2.0]),
///         FactorScores::new("b", vec![3.0, 2.0, 1.0]),
///     ])
///     .unwrap();
/// assert_eq!(combined.to_vec(), vec![1.0, 2.5, 2.5]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RankAverageCombiner;

impl Combiner for RankAverageCombiner {
    fn combine(&self, factors: &[FactorScores]) -> Result<Array1<f64>> {
        if factors.is_empty() {
            return Err("Cannot combine zero factors".into());
        }

        let n_assets = factors[0].scores.len();

        for factor in factors {
            if factor.scores.len() != n_assets {
                return Err(format!(
                    "Factor '{}' has {} assets, expected {}",
                    factor.name,
                    factor.scores.len(),
                    n_assets
                )
                .into());
            }
            if factor.scores.iter().any(|s| !s.is_finite()) {
                return Err(format!("Factor '{}' has non-finite scores", factor.name).into());
            }
        }

        let mut combined = Array1::zeros(n_assets);
        for factor in factors {
            combined += &descending_ranks(&factor.scores);
        }
        combined /= factors.len() as f64;

        Ok(combined)
    }

    fn name(&self) -> &str {
        "rank_average"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_opposed_factors_tie() {
        // Tickers X, Y, Z: A = [3, 1, 2], B = [1, 3, 2]
        let combined = RankAverageCombiner
            .combine(&[
                FactorScores::new("a", vec![3.0, 1.0, 2.0]),
                FactorScores::new("b", vec![1.0, 3.0, 2.0]),
            ])
            .unwrap();

        for value in combined.iter() {
            assert_relative_eq!(*value, 2.0);
        }
    }

    #[test]
    fn test_scale_does_not_dominate() {
        // "big" spans thousands, "small" spans fractions; both count equally.
        let combined = RankAverageCombiner
            .combine(&[
                FactorScores::new("big", vec![1000.0, 2000.0, 3000.0]),
                FactorScores::new("small", vec![0.3, 0.2, 0.1]),
            ])
            .unwrap();

        assert_eq!(combined.to_vec(), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_single_factor_is_its_ranks() {
        let combined = RankAverageCombiner
            .combine(&[FactorScores::new("roe", vec![0.1, 0.4, 0.2])])
            .unwrap();
        assert_eq!(combined.to_vec(), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_mismatched_lengths() {
        let result = RankAverageCombiner.combine(&[
            FactorScores::new("a", vec![1.0, 2.0]),
            FactorScores::new("b", vec![1.0, 2.0, 3.0]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_factors() {
        assert!(RankAverageCombiner.combine(&[]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = RankAverageCombiner.combine(&[FactorScores::new("a", vec![1.0, f64::NAN])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_universe() {
        let combined = RankAverageCombiner
            .combine(&[FactorScores::new("a", Vec::<f64>::new())])
            .unwrap();
        assert!(combined.is_empty());
    }
}
