//! Stock rows and the stock fetch policy.
//!
//! Each configured symbol becomes one [`StockLine`]. The price pair is taken from the
//! provider's live quote when both the live price and the previous close are present;
//! otherwise the last two daily closes are used; otherwise the row shows `N/A`. Any
//! provider error turns the row into `SYMBOL: Error` and is logged, never propagated.
use std::fmt;

use log::warn;
use ticker_common::{Result, Symbol};

/// Live price fields of a quote lookup. Either may be missing outside trading hours.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveQuote {
    /// Current or regular market price.
    pub price: Option<f64>,
    /// Close of the previous session.
    pub previous_close: Option<f64>,
}

/// Symbol-keyed market data lookup.
pub trait StockProvider {
    /// Live price and previous close for `symbol`.
    fn live_quote(&self, symbol: &Symbol) -> Result<LiveQuote>;

    /// Recent daily closes for `symbol`, oldest first. May be shorter than two.
    fn daily_closes(&self, symbol: &Symbol) -> Result<Vec<f64>>;
}

/// What one stock row shows.
#[derive(Debug, Clone, PartialEq)]
pub enum StockLine {
    /// Nothing fetched yet.
    Pending(Symbol),
    /// Price and signed percent change against the reference close.
    Priced {
        /// Symbol of the row.
        symbol: Symbol,
        /// Latest price.
        price: f64,
        /// `(price - reference) / reference * 100`.
        change_percent: f64,
    },
    /// The provider had neither live fields nor enough history.
    Unavailable(Symbol),
    /// The lookup itself failed.
    Failed(Symbol),
}

impl StockLine {
    /// Builds a priced row, or `Unavailable` if `reference` cannot be divided by.
    pub fn priced(symbol: Symbol, price: f64, reference: f64) -> Self {
        if !price.is_finite() || !reference.is_finite() || reference <= 0.0 {
            return StockLine::Unavailable(symbol);
        }
        StockLine::Priced {
            symbol,
            price,
            change_percent: (price - reference) / reference * 100.0,
        }
    }
}

impl fmt::Display for StockLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockLine::Pending(_) => write!(f, "Loading..."),
            StockLine::Priced {
                symbol,
                price,
                change_percent,
            } => write!(f, "{}: ${:.2} {:+.2}%", symbol, price, change_percent),
            StockLine::Unavailable(symbol) => write!(f, "{}: N/A", symbol),
            StockLine::Failed(symbol) => write!(f, "{}: Error", symbol),
        }
    }
}

fn price_pair(provider: &dyn StockProvider, symbol: &Symbol) -> Result<Option<(f64, f64)>> {
    let live = provider.live_quote(symbol)?;
    if let (Some(price), Some(previous_close)) = (live.price, live.previous_close) {
        return Ok(Some((price, previous_close)));
    }
    let closes = provider.daily_closes(symbol)?;
    Ok(match closes.as_slice() {
        [.., previous, last] => Some((*last, *previous)),
        _ => None,
    })
}

/// Applies the fetch policy for one symbol.
pub fn fetch_stock_line(provider: &dyn StockProvider, symbol: &Symbol) -> StockLine {
    match price_pair(provider, symbol) {
        Ok(Some((price, reference))) => StockLine::priced(symbol.clone(), price, reference),
        Ok(None) => StockLine::Unavailable(symbol.clone()),
        Err(e) => {
            warn!("Error fetching {}: {}", symbol, e);
            StockLine::Failed(symbol.clone())
        }
    }
}

/// Applies the fetch policy to every symbol, in order.
pub fn fetch_stock_lines(provider: &dyn StockProvider, symbols: &[Symbol]) -> Vec<StockLine> {
    symbols
        .iter()
        .map(|symbol| fetch_stock_line(provider, symbol))
        .collect()
}
