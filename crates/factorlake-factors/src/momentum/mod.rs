//! Momentum factors based on trailing total return.
//!
//! Three horizons are provided:
//! - Short-term: 1-month return
//! - Medium-term: 6-month return
//! - Long-term: 12-month return
//!
//! The dataset already carries the trailing returns as of each formation
//! year, so each factor reads a single column.

mod long_term;
mod medium_term;
mod short_term;

pub use long_term::LongTermMomentum;
pub use medium_term::MediumTermMomentum;
pub use short_term::ShortTermMomentum;
