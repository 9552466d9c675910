//! SSD1306-family OLED over Linux SPI.
//!
//! The SSD1309 used on the 2.42" 128x64 modules accepts the SSD1306 command set, so the
//! `ssd1306` driver is used in buffered graphics mode. Chip select is handled by the
//! kernel (`/dev/spidev0.0` uses CE0 / GPIO 8); DC and RST are plain GPIO lines
//! requested from the character device.
use std::path::PathBuf;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};
use log::info;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::Ssd1306;

use super::{DisplaySink, FrameTarget, GraphicsSink};
use crate::error::TickerError;
use crate::Result;

/// Buffered SSD1306 driver bound to Linux SPI and cdev GPIO.
pub type OledDriver = Ssd1306<
    SPIInterface<SpidevDevice, CdevPin>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

const GPIO_CONSUMER: &str = "ticker_display";
const RESET_PULSE_MS: u32 = 10;

/// Bus and pin wiring of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// SPI device node; bus 0, chip select 0 by default.
    pub spi_device: PathBuf,
    /// GPIO character device that owns the DC and RST lines.
    pub gpio_chip: PathBuf,
    /// Data/command line offset (GPIO 6, header pin 31).
    pub dc_pin: u32,
    /// Reset line offset (GPIO 5, header pin 29).
    pub rst_pin: u32,
    /// SPI clock.
    pub spi_speed_hz: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            spi_device: PathBuf::from("/dev/spidev0.0"),
            gpio_chip: PathBuf::from("/dev/gpiochip0"),
            dc_pin: 6,
            rst_pin: 5,
            spi_speed_hz: 8_000_000,
        }
    }
}

impl PanelConfig {
    /// Wiring summary for startup logs.
    pub fn describe(&self) -> String {
        format!(
            "SPI {} @ {} Hz, DC=GPIO{}, RST=GPIO{} on {}",
            self.spi_device.display(),
            self.spi_speed_hz,
            self.dc_pin,
            self.rst_pin,
            self.gpio_chip.display()
        )
    }

    /// Remediation hints printed when bring-up fails.
    pub fn hints(&self) -> [String; 3] {
        [
            "Check that SPI is enabled (raspi-config -> Interface Options -> SPI).".to_string(),
            format!(
                "Check that {} and {} exist and are accessible to this user.",
                self.spi_device.display(),
                self.gpio_chip.display()
            ),
            format!(
                "Check wiring: RST->GPIO{}, DC->GPIO{}, CS->CE0 (GPIO 8), MOSI->GPIO10, SCLK->GPIO11.",
                self.rst_pin, self.dc_pin
            ),
        ]
    }
}

impl FrameTarget for OledDriver {
    fn commit(&mut self) -> Result<()> {
        self.flush()
            .map_err(|e| TickerError::Draw(format!("flush failed: {:?}", e)))
    }
}

fn output_line(chip: &mut Chip, offset: u32, label: &str) -> Result<CdevPin> {
    let handle = chip
        .get_line(offset)
        .and_then(|line| line.request(LineRequestFlags::OUTPUT, 1, GPIO_CONSUMER))
        .map_err(|e| TickerError::DisplayInit(format!("{} line GPIO{}: {}", label, offset, e)))?;
    CdevPin::new(handle)
        .map_err(|e| TickerError::DisplayInit(format!("{} line GPIO{}: {:?}", label, offset, e)))
}

/// Opens the bus, resets and initializes the controller, and returns a blank sink.
///
/// Any failure here is fatal for the caller: the returned error is always
/// [`TickerError::DisplayInit`].
pub fn open_panel(config: &PanelConfig) -> Result<GraphicsSink<OledDriver>> {
    info!("Initializing display: {}", config.describe());

    let mut spi = SpidevDevice::open(&config.spi_device).map_err(|e| {
        TickerError::DisplayInit(format!("open {}: {:?}", config.spi_device.display(), e))
    })?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(config.spi_speed_hz)
        .mode(SpiModeFlags::SPI_MODE_0)
        .build();
    spi.configure(&options).map_err(|e| {
        TickerError::DisplayInit(format!("configure {}: {}", config.spi_device.display(), e))
    })?;

    let mut chip = Chip::new(&config.gpio_chip).map_err(|e| {
        TickerError::DisplayInit(format!("open {}: {}", config.gpio_chip.display(), e))
    })?;
    let dc = output_line(&mut chip, config.dc_pin, "DC")?;
    let mut rst = output_line(&mut chip, config.rst_pin, "RST")?;

    let mut delay = Delay;
    rst.set_low()
        .map_err(|e| TickerError::DisplayInit(format!("reset low: {:?}", e)))?;
    delay.delay_ms(RESET_PULSE_MS);
    rst.set_high()
        .map_err(|e| TickerError::DisplayInit(format!("reset high: {:?}", e)))?;
    delay.delay_ms(RESET_PULSE_MS);

    let interface = SPIInterface::new(spi, dc);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display
        .init()
        .map_err(|e| TickerError::DisplayInit(format!("controller init: {:?}", e)))?;

    let mut sink = GraphicsSink::new(display);
    sink.blank()
        .map_err(|e| TickerError::DisplayInit(format!("first flush: {}", e)))?;
    info!("Display initialized ({}x{}).", super::SCREEN_WIDTH, super::SCREEN_HEIGHT);
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wiring_matches_the_header_layout() {
        let config = PanelConfig::default();
        assert_eq!(config.dc_pin, 6);
        assert_eq!(config.rst_pin, 5);
        assert_eq!(
            config.describe(),
            "SPI /dev/spidev0.0 @ 8000000 Hz, DC=GPIO6, RST=GPIO5 on /dev/gpiochip0"
        );
    }

    #[test]
    fn missing_spi_device_is_an_init_error() {
        let config = PanelConfig {
            spi_device: PathBuf::from("/nonexistent/spidev9.9"),
            ..PanelConfig::default()
        };
        let err = open_panel(&config).err().expect("bring-up must fail");
        assert!(err.is_fatal());
        assert!(matches!(err, TickerError::DisplayInit(_)));
    }

    #[test]
    fn hints_name_the_configured_pins() {
        let hints = PanelConfig::default().hints();
        assert!(hints[2].contains("RST->GPIO5"));
        assert!(hints[2].contains("DC->GPIO6"));
    }
}
