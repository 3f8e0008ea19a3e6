//! Core trait definition for factor combiners.

use ndarray::Array1;
use factorlake_traits::Result;

/// Scores from a single factor over one year's eligible universe.
///
/// Index `i` of every [`FactorScores`] handed to a combiner refers to the
/// same stock, and higher scores are more attractive.
#[derive(Debug, Clone)]
pub struct FactorScores {
    /// Factor name (for diagnostics)
    pub name: String,

    /// Raw oriented scores, one per stock
    pub scores: Array1<f64>,
}

impl FactorScores {
    /// Bundles a factor name with its scores.
    pub fn new(name: impl Into<String>, scores: impl Into<Array1<f64>>) -> Self {
        Self {
            name: name.into(),
            scores: scores.into(),
        }
    }
}

/// Combines several factors' scores into one composite per stock.
///
/// The composite is a *combined rank*: smaller values are more attractive,
/// so the best stock sorts first in ascending order.
///
/// # Examples
///
/// ```rust
/// use factorlake_combine::{Combiner, FactorScores};
/// use ndarray::Array1;
///
/// #[derive(Debug)]
/// struct FirstFactorOnly;
///
/// impl Combiner for FirstFactorOnly {
///     fn combine(&self, factors: &[FactorScores]) -> factorlake_traits::Result<Array1<f64>> {
///         Ok(factors[0].scores.mapv(|s| -s))
///     }
///
///     fn name(&self) -> &str {
///         "first_factor_only"
///     }
/// }
///
/// let combined = FirstFactorOnly
///     .combine(&[FactorScores::new("roe", vec![0.1, 0.3])])
///     .unwrap();
/// assert!(combined[1] < combined[0]);
/// ```
pub trait Combiner: Send + Sync + std::fmt::Debug {
    /// Combine factor scores into a composite vector.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No factors are provided
    /// - Score vectors have mismatched lengths
    /// - A score is NaN or infinite
    fn combine(&self, factors: &[FactorScores]) -> Result<Array1<f64>>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}
