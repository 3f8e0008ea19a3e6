//! Value factors comparing fundamentals to price.
//!
//! - Book-to-price and its inverse, price-to-book (lower is better)
//! - Forward earnings yield (next fiscal year earnings over price)

mod book_to_price;
mod earnings_yield;

pub use book_to_price::{BookToPrice, PriceToBook};
pub use earnings_yield::EarningsYield;
