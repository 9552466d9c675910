//! The refresh scheduler and render loop.
//!
//! One owned state struct holds every cached value. Each tick checks which sources are
//! due, refreshes them, composes a frame and presents it. Source failures become
//! placeholder rows inside the model layer; presentation failures are logged here. None
//! of them stop the loop.
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, error, info, log_enabled, Level};
use ticker_common::display::{DisplaySink, Frame};
use ticker_common::Symbol;

use crate::clock::Clock;
use crate::config::{Layout, Settings};
use crate::model::quote::{fetch_quote, QuoteFeed, QuoteText};
use crate::model::refreshable::Refreshable;
use crate::model::scroll::ScrollState;
use crate::model::stock::{fetch_stock_lines, StockLine, StockProvider};
use crate::render::{compose, format_time, FrameInputs};

struct QuoteSource {
    feed: Box<dyn QuoteFeed>,
    cache: Refreshable<QuoteText>,
}

/// Owns the sources, their caches, the marquee state and the display.
pub struct Scheduler<S> {
    sink: S,
    clock: Box<dyn Clock>,
    provider: Box<dyn StockProvider>,
    symbols: Vec<Symbol>,
    stocks: Refreshable<Vec<StockLine>>,
    quote: Option<QuoteSource>,
    scroll: ScrollState,
    padding: String,
    layout: Layout,
    frame_interval: Duration,
}

impl<S: DisplaySink> Scheduler<S> {
    /// Wires the sources to `sink`. `feed` is ignored in the stocks-only layout.
    pub fn new(
        settings: Settings,
        sink: S,
        clock: Box<dyn Clock>,
        provider: Box<dyn StockProvider>,
        feed: Box<dyn QuoteFeed>,
    ) -> Self {
        let placeholders = settings
            .symbols
            .iter()
            .cloned()
            .map(StockLine::Pending)
            .collect();
        let quote = match settings.layout {
            Layout::StocksAndQuote => Some(QuoteSource {
                feed,
                cache: Refreshable::new(QuoteText::Pending, settings.quote_interval),
            }),
            Layout::StocksOnly => None,
        };
        Self {
            sink,
            clock,
            provider,
            stocks: Refreshable::new(placeholders, settings.stock_interval),
            symbols: settings.symbols,
            quote,
            scroll: ScrollState::new(settings.scroll_step),
            padding: settings.scroll_padding,
            layout: settings.layout,
            frame_interval: settings.frame_interval,
        }
    }

    /// Runs one iteration: refresh due sources, compose, present. Returns the frame.
    pub fn tick(&mut self) -> Frame {
        let now = self.clock.monotonic();
        let mut refreshed = false;

        if self.stocks.is_due(now) {
            info!("Fetching new stock data...");
            let lines = fetch_stock_lines(self.provider.as_ref(), &self.symbols);
            self.stocks.store(lines, now);
            info!("Stock data updated.");
            refreshed = true;
        }

        if let Some(source) = self.quote.as_mut() {
            if source.cache.is_due(now) {
                let text = fetch_quote(source.feed.as_ref());
                source.cache.store(text, now);
                self.scroll.reset();
                refreshed = true;
            }
        }

        let time = format_time(self.clock.wall_time(), self.layout);
        let inputs = FrameInputs {
            stocks: self.stocks.value(),
            quote: self.quote.as_ref().map(|source| source.cache.value()),
            padding: &self.padding,
            time: &time,
        };
        let frame = compose(&self.sink, &inputs, &mut self.scroll);

        if let Err(e) = self.sink.present(&frame) {
            error!("Error drawing on display: {}", e);
        }
        if refreshed && log_enabled!(Level::Debug) {
            if let Some(picture) = self.sink.snapshot() {
                debug!("Panel after refresh:\n{}", picture);
            }
        }
        frame
    }

    /// Ticks until `shutdown` is set, sleeping one frame interval between ticks, then
    /// blanks the panel.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        info!(
            "Starting display loop (frame every {:?}, {} tickers).",
            self.frame_interval,
            self.symbols.len()
        );
        let mut frames: u64 = 0;
        while !shutdown.load(Ordering::Relaxed) {
            self.tick();
            frames += 1;
            if frames % 1200 == 0 {
                debug!("{} frames rendered, scroll offset {}", frames, self.scroll.offset());
            }
            thread::sleep(self.frame_interval);
        }
        info!("Display loop stopping after {} frames...", frames);
        if let Err(e) = self.sink.blank() {
            error!("Failed to blank display: {}", e);
        }
    }
}
