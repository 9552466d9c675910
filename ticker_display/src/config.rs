//! Compile-time defaults and the validated runtime settings.
use std::time::Duration;

use ticker_common::display::{LINE_HEIGHT, SCREEN_HEIGHT};
use ticker_common::{Result, Symbol, TickerError};

// =============================================================================
// Refresh cadence
// =============================================================================

/// How often stock lines are re-fetched.
pub const STOCK_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// How often a new quote is fetched.
pub const QUOTE_UPDATE_INTERVAL: Duration = Duration::from_secs(300);

/// Render tick. Smaller values give a smoother scroll.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Transport timeout for both HTTP endpoints.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Scrolling
// =============================================================================

/// Pixels the quote moves left per frame.
pub const SCROLL_STEP_PX: u32 = 1;

/// Gap appended to the quote so consecutive loops do not touch.
pub const SCROLL_PADDING: &str = "    ";

/// Which rows the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Stock rows, a scrolling quote row and a time row with seconds.
    StocksAndQuote,
    /// Stock rows and a `Time: hh:mm AM` row.
    StocksOnly,
}

impl Layout {
    /// Number of rows reserved at the bottom of the panel.
    pub fn footer_rows(self) -> u32 {
        match self {
            Layout::StocksAndQuote => 2,
            Layout::StocksOnly => 1,
        }
    }

    /// How many stock rows fit above the footer.
    pub fn stock_rows(self) -> usize {
        let free = SCREEN_HEIGHT as i32 - self.footer_rows() as i32 * LINE_HEIGHT;
        (free / LINE_HEIGHT) as usize
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Symbols in display order.
    pub symbols: Vec<Symbol>,
    /// Stock poll interval.
    pub stock_interval: Duration,
    /// Quote poll interval.
    pub quote_interval: Duration,
    /// Render tick.
    pub frame_interval: Duration,
    /// Scroll step in pixels per frame.
    pub scroll_step: u32,
    /// Text appended to a scrolling quote.
    pub scroll_padding: String,
    /// HTTP request timeout.
    pub request_timeout: Duration,
    /// Panel layout.
    pub layout: Layout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbols: Symbol::defaults(),
            stock_interval: STOCK_UPDATE_INTERVAL,
            quote_interval: QUOTE_UPDATE_INTERVAL,
            frame_interval: FRAME_INTERVAL,
            scroll_step: SCROLL_STEP_PX,
            scroll_padding: SCROLL_PADDING.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            layout: Layout::StocksAndQuote,
        }
    }
}

impl Settings {
    /// Shortest poll interval among the enabled sources.
    pub fn shortest_poll(&self) -> Duration {
        match self.layout {
            Layout::StocksAndQuote => self.stock_interval.min(self.quote_interval),
            Layout::StocksOnly => self.stock_interval,
        }
    }

    /// Checks the settings and returns them unchanged, or a `TickerError::Config`.
    pub fn validate(self) -> Result<Self> {
        if self.symbols.is_empty() {
            return Err(TickerError::Config("no ticker symbols configured".into()));
        }
        let rows = self.layout.stock_rows();
        if self.symbols.len() > rows {
            return Err(TickerError::Config(format!(
                "{} tickers configured but only {} rows fit on the panel",
                self.symbols.len(),
                rows
            )));
        }
        if self.stock_interval.is_zero() || self.quote_interval.is_zero() {
            return Err(TickerError::Config("poll intervals must be positive".into()));
        }
        if self.frame_interval.is_zero() {
            return Err(TickerError::Config("frame interval must be positive".into()));
        }
        if self.frame_interval > self.shortest_poll() {
            return Err(TickerError::Config(format!(
                "frame interval {:?} is longer than the shortest poll interval {:?}",
                self.frame_interval,
                self.shortest_poll()
            )));
        }
        if self.scroll_step == 0 {
            return Err(TickerError::Config("scroll step must be at least 1 px".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(TickerError::Config("request timeout must be positive".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_common::tickers::SymbolParser;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default().validate().unwrap();
        assert_eq!(settings.symbols.len(), 3);
        assert_eq!(settings.shortest_poll(), STOCK_UPDATE_INTERVAL);
    }

    #[test]
    fn row_budget_depends_on_layout() {
        assert_eq!(Layout::StocksAndQuote.stock_rows(), 4);
        assert_eq!(Layout::StocksOnly.stock_rows(), 5);
    }

    #[test]
    fn frame_interval_must_not_exceed_shortest_poll() {
        let settings = Settings {
            frame_interval: Duration::from_secs(61),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("frame interval"));
    }

    #[test]
    fn too_many_tickers_are_rejected() {
        let settings = Settings {
            symbols: Symbol::parse_list("A B C D E").unwrap(),
            ..Settings::default()
        };
        assert!(settings.clone().validate().is_err());
        let stocks_only = Settings {
            layout: Layout::StocksOnly,
            ..settings
        };
        assert!(stocks_only.validate().is_ok());
    }

    #[test]
    fn empty_ticker_list_is_rejected() {
        let settings = Settings {
            symbols: Vec::new(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(TickerError::Config(_))));
    }
}
