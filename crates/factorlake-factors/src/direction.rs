//! Orientation of raw column values.

use derive_more::Display;
use factorlake_traits::StockRecord;
use serde::{Deserialize, Serialize};

/// How a raw column value relates to attractiveness.
///
/// Factors always report "higher is better". Columns where a smaller value
/// is preferable (valuation multiples, volatility, accruals) are negated,
/// which preserves their ordering without the blow-ups a reciprocal has
/// around zero.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Larger raw values are more attractive.
    #[display("higher is better")]
    HigherIsBetter,
    /// Smaller raw values are more attractive.
    #[display("lower is better")]
    LowerIsBetter,
}

impl Direction {
    /// Orients a raw value so that larger is better.
    #[must_use]
    pub const fn orient(self, value: f64) -> f64 {
        match self {
            Self::HigherIsBetter => value,
            Self::LowerIsBetter => -value,
        }
    }

    /// Whether larger raw values are preferred.
    #[must_use]
    pub const fn higher_is_better(self) -> bool {
        matches!(self, Self::HigherIsBetter)
    }
}

/// Reads `column` from `record` and orients it.
pub(crate) fn oriented_field(
    record: &StockRecord,
    column: &str,
    direction: Direction,
) -> Option<f64> {
    record.field(column).map(|v| direction.orient(v))
}
