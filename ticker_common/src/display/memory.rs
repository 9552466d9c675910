//! In-memory panel used for headless runs and tests.
use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::FrameTarget;
use crate::Result;

/// A 1 bit per pixel frame buffer that never touches hardware.
#[derive(Debug, Clone)]
pub struct MemoryPanel {
    size: Size,
    pixels: Vec<bool>,
    commits: usize,
}

impl MemoryPanel {
    /// Creates a blank panel of `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![false; (size.width * size.height) as usize],
            commits: 0,
        }
    }

    /// Whether the pixel at `(x, y)` is on. Out of range reads as off.
    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        self.pixels[(y * self.size.width + x) as usize]
    }

    /// Number of pixels currently on.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|lit| **lit).count()
    }

    /// Number of committed frames.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Renders the buffer as text, `#` for on and `.` for off, one row per line.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.size.width + 1) * self.size.height) as usize);
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                out.push(if self.is_lit(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl OriginDimensions for MemoryPanel {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for MemoryPanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.size.width && y < self.size.height {
                self.pixels[(y * self.size.width + x) as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

impl FrameTarget for MemoryPanel {
    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }

    fn snapshot(&self) -> Option<String> {
        Some(self.to_ascii())
    }
}
