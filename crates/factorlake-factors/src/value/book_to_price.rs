//! Book-to-price and price-to-book value factors.

use crate::{
    columns::{BOOK_TO_PRICE, PRICE_TO_BOOK},
    direction::{Direction, oriented_field},
};
use factorlake_traits::{Factor, StockRecord};

/// Book-to-price value factor.
///
/// Higher book/price means the stock is cheap relative to its book value,
/// which aligns directly with the value thesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookToPrice;

impl Factor for BookToPrice {
    fn name(&self) -> &str {
        "book_to_price"
    }

    fn description(&self) -> &str {
        "Book value of equity relative to price"
    }

    fn required_columns(&self) -> &[&str] {
        &[BOOK_TO_PRICE]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, BOOK_TO_PRICE, Direction::HigherIsBetter)
    }
}

/// Price-to-book value factor.
///
/// A low P/B marks a cheap stock, so the multiple is negated: the cheapest
/// stock gets the highest score. Ranking on this factor orders stocks the
/// same way as [`BookToPrice`] whenever book value is positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceToBook;

impl Factor for PriceToBook {
    fn name(&self) -> &str {
        "price_to_book"
    }

    fn description(&self) -> &str {
        "Price relative to book value (lower is better)"
    }

    fn required_columns(&self) -> &[&str] {
        &[PRICE_TO_BOOK]
    }

    fn score(&self, record: &StockRecord) -> Option<f64> {
        oriented_field(record, PRICE_TO_BOOK, Direction::LowerIsBetter)
    }
}
