//! Display surface abstraction.
//!
//! The scheduler composes a [`Frame`] every tick and hands it to a [`DisplaySink`],
//! which clears the buffer, draws every element and commits the result in one step so
//! the visible image is replaced atomically. [`GraphicsSink`] implements the sink on top
//! of any `embedded-graphics` target using a fixed mono font; the SSD1306-family SPI
//! panel lives in [`panel`], an in-memory target for headless runs in [`memory`].
pub mod memory;
pub mod panel;

use std::fmt;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use log::debug;

use crate::error::TickerError;
use crate::Result;

pub use memory::MemoryPanel;
pub use panel::{open_panel, OledDriver, PanelConfig};

/// Panel width in pixels (SSD1309 128x64).
pub const SCREEN_WIDTH: u32 = 128;
/// Panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;
/// Vertical distance between text rows. `FONT_6X10` glyphs are 10 px tall.
pub const LINE_HEIGHT: i32 = 10;
/// Font used for every text element.
pub const FONT: &MonoFont<'static> = &FONT_6X10;

/// One drawable element of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Text whose top-left corner is at `origin`. `origin.x` may be negative for
    /// scrolled text; pixels outside the panel are clipped.
    Text {
        /// Text to draw.
        text: String,
        /// Top-left corner.
        origin: Point,
    },
    /// A one pixel outline around the whole panel.
    Outline,
}

/// A complete picture for one tick. Built, presented and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    elements: Vec<Element>,
}

impl Frame {
    /// Creates an empty (blank) frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text element at `(x, y)`.
    pub fn text(&mut self, text: impl Into<String>, x: i32, y: i32) -> &mut Self {
        self.elements.push(Element::Text {
            text: text.into(),
            origin: Point::new(x, y),
        });
        self
    }

    /// Appends an outline around the panel.
    pub fn outline(&mut self) -> &mut Self {
        self.elements.push(Element::Outline);
        self
    }

    /// Elements in drawing order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Text elements only, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text { text, origin } => Some((text.as_str(), *origin)),
            Element::Outline => None,
        })
    }
}

/// A rectangular monochrome surface that can show frames.
pub trait DisplaySink {
    /// Panel size in pixels.
    fn size(&self) -> Size;

    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str) -> u32;

    /// Replaces the visible image with `frame`.
    fn present(&mut self, frame: &Frame) -> Result<()>;

    /// Shows an empty frame.
    fn blank(&mut self) -> Result<()> {
        self.present(&Frame::new())
    }

    /// Text picture of the last presented frame, if the sink can produce one.
    fn snapshot(&self) -> Option<String> {
        None
    }
}

/// A draw target that buffers pixels until the frame is committed.
pub trait FrameTarget: DrawTarget<Color = BinaryColor> {
    /// Pushes the buffered image to the visible surface.
    fn commit(&mut self) -> Result<()>;

    /// Text picture of the committed image. Hardware targets cannot read it back.
    fn snapshot(&self) -> Option<String> {
        None
    }
}

/// [`DisplaySink`] over an `embedded-graphics` target.
pub struct GraphicsSink<D> {
    target: D,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl<D> GraphicsSink<D>
where
    D: FrameTarget,
    D::Error: fmt::Debug,
{
    /// Wraps `target`, drawing text with [`FONT`].
    pub fn new(target: D) -> Self {
        Self {
            target,
            style: MonoTextStyle::new(FONT, BinaryColor::On),
        }
    }

    /// The wrapped target.
    pub fn target(&self) -> &D {
        &self.target
    }

    fn draw(&mut self, frame: &Frame) -> std::result::Result<(), D::Error> {
        self.target.clear(BinaryColor::Off)?;
        for element in frame.elements() {
            match element {
                Element::Text { text, origin } => {
                    Text::with_baseline(text, *origin, self.style, Baseline::Top)
                        .draw(&mut self.target)?;
                }
                Element::Outline => {
                    let bounds = self.target.bounding_box();
                    bounds
                        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                        .draw(&mut self.target)?;
                }
            }
        }
        Ok(())
    }
}

impl<D> DisplaySink for GraphicsSink<D>
where
    D: FrameTarget,
    D::Error: fmt::Debug,
{
    fn size(&self) -> Size {
        self.target.bounding_box().size
    }

    fn text_width(&self, text: &str) -> u32 {
        self.style
            .measure_string(text, Point::zero(), Baseline::Top)
            .bounding_box
            .size
            .width
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.draw(frame)
            .map_err(|e| TickerError::Draw(format!("{:?}", e)))?;
        self.target.commit()?;
        debug!("Frame committed ({} elements)", frame.elements().len());
        Ok(())
    }

    fn snapshot(&self) -> Option<String> {
        self.target.snapshot()
    }
}
