//! Display Check — brings the SPI OLED up step by step, draws a border and
//! `Hello World`, and holds the picture so wiring can be verified by eye.
//!
//! Usage example (CLI):
//! ```bash
//! display_check --hold-secs 10 --dc-pin 6 --rst-pin 5
//! ```
#![warn(missing_docs)]
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use ticker_common::display::{open_panel, DisplaySink, Frame, PanelConfig};
use ticker_common::{Result, TickerError};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// SPI device node of the panel.
    #[clap(long, default_value = "/dev/spidev0.0")]
    spi_device: PathBuf,

    /// GPIO character device owning the DC and RST lines.
    #[clap(long, default_value = "/dev/gpiochip0")]
    gpio_chip: PathBuf,

    /// Data/command GPIO line.
    #[clap(long, default_value_t = 6)]
    dc_pin: u32,

    /// Reset GPIO line.
    #[clap(long, default_value_t = 5)]
    rst_pin: u32,

    /// Seconds to keep the test picture on screen.
    #[clap(long, default_value_t = 30)]
    hold_secs: u64,
}

impl Args {
    fn panel(&self) -> PanelConfig {
        PanelConfig {
            spi_device: self.spi_device.clone(),
            gpio_chip: self.gpio_chip.clone(),
            dc_pin: self.dc_pin,
            rst_pin: self.rst_pin,
            ..PanelConfig::default()
        }
    }
}

/// Border around the panel and a greeting at (10, 20).
fn test_picture() -> Frame {
    let mut frame = Frame::new();
    frame.outline().text("Hello World", 10, 20);
    frame
}

fn check(panel: &PanelConfig, hold: Duration) -> Result<(), TickerError> {
    info!("Step 1: Initializing SPI interface and controller...");
    let mut sink = open_panel(panel)?;
    info!("Step 1: Display initialized successfully.");

    info!("Step 2: Clearing display...");
    sink.blank()?;
    sink.blank()?;
    info!("Step 2: Display cleared.");

    info!("Step 3: Drawing 'Hello World' text...");
    sink.present(&test_picture())?;
    info!("Step 3: Drawing complete.");

    info!("SUCCESS! The screen should be displaying 'Hello World'.");
    info!("Keeping the picture for {} seconds.", hold.as_secs());
    thread::sleep(hold);
    Ok(())
}

fn main() -> Result<(), TickerError> {
    init_logger();
    let args = Args::parse();
    let panel = args.panel();

    info!("--- Starting panel check ---");
    info!("Wiring: {}", panel.describe());
    info!("Expected: CS->GPIO8 (CE0), MOSI->GPIO10, SCLK->GPIO11");

    let outcome = check(&panel, Duration::from_secs(args.hold_secs));
    if let Err(e) = &outcome {
        error!("Panel check failed: {}", e);
        for hint in panel.hints() {
            error!("{}", hint);
        }
    }
    info!("--- Panel check finished ---");
    outcome
}

fn init_logger() {
    logger(env_logger::Env::default()).init();
}

/// Info by default; `RUST_LOG` is applied afterwards so it can raise or lower the level.
fn logger(env: env_logger::Env) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info).parse_env(env);
    builder
}
