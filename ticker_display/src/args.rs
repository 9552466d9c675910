//! Command-line arguments for the ticker display.
//!
//! Every option defaults to the compiled-in constant in `config`, so running the binary
//! without arguments shows the default watch list on the default wiring.
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;
use clap::Parser;
use ticker_common::display::PanelConfig;
use ticker_common::tickers::SymbolParser;
use ticker_common::{Result, Symbol, TickerError};

use crate::config::{self, Layout, Settings};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Ticker symbols separated by commas or spaces, e.g. `COF,^GSPC,AAPL`.
    #[clap(long, conflicts_with = "tickers_file")]
    pub tickers: Option<String>,

    /// Path to a text file with ticker symbols.
    /// Symbols may be separated by commas, spaces, or new lines; `#` starts a comment.
    #[clap(long)]
    pub tickers_file: Option<String>,

    /// Seconds between stock refreshes.
    #[clap(long, default_value_t = config::STOCK_UPDATE_INTERVAL.as_secs())]
    pub stock_interval: u64,

    /// Seconds between quote refreshes.
    #[clap(long, default_value_t = config::QUOTE_UPDATE_INTERVAL.as_secs())]
    pub quote_interval: u64,

    /// Milliseconds between frames.
    #[clap(long, default_value_t = config::FRAME_INTERVAL.as_millis() as u64)]
    pub frame_interval_ms: u64,

    /// Pixels the quote moves per frame.
    #[clap(long, default_value_t = config::SCROLL_STEP_PX)]
    pub scroll_step: u32,

    /// Gap appended to a scrolling quote.
    #[clap(long, default_value = config::SCROLL_PADDING)]
    pub scroll_padding: String,

    /// HTTP request timeout in seconds.
    #[clap(long, default_value_t = config::REQUEST_TIMEOUT.as_secs())]
    pub request_timeout: u64,

    /// Show only stocks and a `Time:` row, without the quote feed.
    #[clap(long)]
    pub no_quote: bool,

    /// Use synthetic prices and a fixed quote instead of the network.
    #[clap(long)]
    pub offline: bool,

    /// Pin the displayed time, e.g. `2025-04-09T23:21:46`.
    #[clap(long)]
    pub fixed_time: Option<NaiveDateTime>,

    /// Render into memory instead of the SPI panel.
    #[clap(long)]
    pub headless: bool,

    /// SPI device node of the panel.
    #[clap(long, default_value = "/dev/spidev0.0")]
    pub spi_device: PathBuf,

    /// GPIO character device owning the DC and RST lines.
    #[clap(long, default_value = "/dev/gpiochip0")]
    pub gpio_chip: PathBuf,

    /// Data/command GPIO line.
    #[clap(long, default_value_t = 6)]
    pub dc_pin: u32,

    /// Reset GPIO line.
    #[clap(long, default_value_t = 5)]
    pub rst_pin: u32,
}

impl Args {
    /// Reads the symbol list from `--tickers`, `--tickers-file` or the defaults.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        if let Some(list) = &self.tickers {
            return Symbol::parse_list(list);
        }
        if let Some(path) = &self.tickers_file {
            let file = File::open(normalize_path(path)).map_err(|e| {
                TickerError::ParseTickers(format!("cannot open {}: {}", path.trim(), e))
            })?;
            return Symbol::parse_from_file(BufReader::new(file));
        }
        Ok(Symbol::defaults())
    }

    /// Builds and validates the run settings.
    pub fn settings(&self) -> Result<Settings> {
        let symbols = self
            .symbols()
            .map_err(|e| TickerError::Config(e.to_string()))?;
        Settings {
            symbols,
            stock_interval: Duration::from_secs(self.stock_interval),
            quote_interval: Duration::from_secs(self.quote_interval),
            frame_interval: Duration::from_millis(self.frame_interval_ms),
            scroll_step: self.scroll_step,
            scroll_padding: self.scroll_padding.clone(),
            request_timeout: Duration::from_secs(self.request_timeout),
            layout: if self.no_quote {
                Layout::StocksOnly
            } else {
                Layout::StocksAndQuote
            },
        }
        .validate()
    }

    /// Panel wiring from the pin options.
    pub fn panel(&self) -> PanelConfig {
        PanelConfig {
            spi_device: self.spi_device.clone(),
            gpio_chip: self.gpio_chip.clone(),
            dc_pin: self.dc_pin,
            rst_pin: self.rst_pin,
            ..PanelConfig::default()
        }
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
