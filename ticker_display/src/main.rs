//! Ticker Display — shows stock prices, a scrolling inspirational quote and the time
//! on a 128x64 SPI OLED attached to a single-board computer.
//!
//! Stock rows refresh every minute, the quote every five minutes and the panel redraws
//! every 50 ms so long quotes crawl smoothly. A failing source only ever replaces its
//! own row with a placeholder; the only fatal errors are bad settings and a panel that
//! cannot be initialized.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_display --tickers COF,^GSPC,AAPL --quote-interval 60
//! RUST_LOG=debug ticker_display --offline --headless --fixed-time 2025-04-09T23:21:46
//! ```
#![warn(missing_docs)]
mod args;
mod clock;
mod config;
mod model;
mod render;
mod scheduler;
mod sources;

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use embedded_graphics::prelude::Size;
use log::{error, info, warn};
use ticker_common::display::{open_panel, DisplaySink, GraphicsSink, MemoryPanel, SCREEN_HEIGHT, SCREEN_WIDTH};
use ticker_common::{Result, TickerError};

use crate::args::Args;
use crate::clock::{Clock, FixedWallClock, SystemClock};
use crate::config::Settings;
use crate::model::quote::QuoteFeed;
use crate::model::stock::StockProvider;
use crate::scheduler::Scheduler;
use crate::sources::synthetic::{FixedQuote, SyntheticMarket};
use crate::sources::yahoo::YahooChart;
use crate::sources::zen::ZenQuotes;

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("Termination signal received. Shutting down display...");
            shutdown.store(true, Ordering::SeqCst);
        }) {
            warn!("Could not install signal handler, stop with SIGKILL: {}", e);
        }
    }

    match launch(&args, &shutdown) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(exit_status(&e)),
    }
}

/// Process status after a failed launch. A panel that cannot be brought up ends the
/// process with 0 once the error and wiring hints are logged; bad settings exit with 1.
fn exit_status(error: &TickerError) -> u8 {
    match error {
        TickerError::DisplayInit(_) => 0,
        _ => 1,
    }
}

/// Validates the settings, opens the sink and runs the loop until `shutdown` is set.
fn launch(args: &Args, shutdown: &AtomicBool) -> Result<()> {
    let settings = args.settings().inspect_err(|e| error!("{}", e))?;
    info!("Tickers: {:?}", settings.symbols.iter().map(|s| s.as_str()).collect::<Vec<_>>());

    if args.headless {
        info!("Rendering headless into memory, RUST_LOG=debug prints the panel on refresh.");
        let sink = GraphicsSink::new(MemoryPanel::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)));
        run(args, settings, sink, shutdown);
        return Ok(());
    }

    let panel = args.panel();
    let sink = open_panel(&panel).inspect_err(|e| {
        error!("Error initializing display: {}", e);
        for hint in panel.hints() {
            error!("{}", hint);
        }
    })?;
    run(args, settings, sink, shutdown);
    Ok(())
}

fn run<S: DisplaySink>(args: &Args, settings: Settings, sink: S, shutdown: &AtomicBool) {
    let clock: Box<dyn Clock> = match args.fixed_time {
        Some(wall) => {
            info!("Displayed time pinned to {}", wall);
            Box::new(FixedWallClock::new(wall))
        }
        None => Box::new(SystemClock),
    };
    let (provider, feed): (Box<dyn StockProvider>, Box<dyn QuoteFeed>) = if args.offline {
        info!("Offline mode: synthetic prices and a fixed quote.");
        (Box::new(SyntheticMarket::new()), Box::new(FixedQuote::default()))
    } else {
        (
            Box::new(YahooChart::new(settings.request_timeout)),
            Box::new(ZenQuotes::new(settings.request_timeout)),
        )
    };

    Scheduler::new(settings, sink, clock, provider, feed).run(shutdown);
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
