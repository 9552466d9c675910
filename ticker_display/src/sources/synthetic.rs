//! Offline stand-ins for the network sources.
//!
//! `SyntheticMarket` walks every symbol's price randomly around a start price so rows
//! visibly change between refreshes; `FixedQuote` always answers with the same quote.
use std::cell::RefCell;
use std::collections::HashMap;

use rand::Rng;
use ticker_common::{Result, Symbol};

use crate::model::quote::{QuoteFeed, ZenQuote};
use crate::model::stock::{LiveQuote, StockProvider};

/// Price every symbol starts from.
const INITIAL_PRICE: f64 = 100.0;

/// Random-walk market. Each live lookup moves the price by at most ±1%.
#[derive(Debug, Default)]
pub struct SyntheticMarket {
    prices: RefCell<HashMap<Symbol, (f64, f64)>>,
}

impl SyntheticMarket {
    /// A market where every symbol starts at the same price.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next price of a random walk, clamped to a small positive minimum.
    pub fn next_price(current_price: f64) -> f64 {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-0.01..0.01);
        (current_price * (1.0 + change)).max(0.01)
    }
}

impl StockProvider for SyntheticMarket {
    fn live_quote(&self, symbol: &Symbol) -> Result<LiveQuote> {
        let mut prices = self.prices.borrow_mut();
        let entry = prices
            .entry(symbol.clone())
            .or_insert((INITIAL_PRICE, INITIAL_PRICE));
        entry.1 = Self::next_price(entry.1);
        Ok(LiveQuote {
            price: Some(entry.1),
            previous_close: Some(entry.0),
        })
    }

    fn daily_closes(&self, symbol: &Symbol) -> Result<Vec<f64>> {
        Ok(self
            .prices
            .borrow()
            .get(symbol)
            .map(|(previous, last)| vec![*previous, *last])
            .unwrap_or_default())
    }
}

/// Quote feed that never changes.
#[derive(Debug, Clone)]
pub struct FixedQuote(ZenQuote);

impl FixedQuote {
    /// Answers every fetch with `text` by `author`.
    pub fn new(text: &str, author: &str) -> Self {
        Self(ZenQuote {
            text: text.to_string(),
            author: author.to_string(),
        })
    }
}

impl Default for FixedQuote {
    fn default() -> Self {
        Self::new(
            "The stock market is a device for transferring money from the impatient to the patient.",
            "Warren Buffett",
        )
    }
}

impl QuoteFeed for FixedQuote {
    fn fetch(&self) -> Result<ZenQuote> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stock::{fetch_stock_line, StockLine};

    #[test]
    fn walk_stays_within_one_percent() {
        let mut price = INITIAL_PRICE;
        for _ in 0..1000 {
            let next = SyntheticMarket::next_price(price);
            assert!((next - price).abs() <= price * 0.01 + f64::EPSILON);
            price = next;
        }
    }

    #[test]
    fn rows_are_priced_against_the_start_price() {
        let market = SyntheticMarket::new();
        let symbol: Symbol = "COF".parse().unwrap();
        match fetch_stock_line(&market, &symbol) {
            StockLine::Priced { change_percent, .. } => assert!(change_percent.abs() <= 1.0),
            other => panic!("expected a priced row, got {:?}", other),
        }
        assert_eq!(market.daily_closes(&symbol).unwrap()[0], INITIAL_PRICE);
    }

    #[test]
    fn fixed_quote_repeats() {
        let feed = FixedQuote::new("Same.", "Me");
        assert_eq!(feed.fetch().unwrap(), feed.fetch().unwrap());
    }
}
