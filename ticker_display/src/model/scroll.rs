//! Horizontal marquee state for the quote row.

/// Pixel offset of a text crawling leftwards across the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    offset: u32,
    step: u32,
}

impl ScrollState {
    /// Starts at offset 0, moving `step` pixels per frame.
    pub fn new(step: u32) -> Self {
        Self { offset: 0, step }
    }

    /// Current offset in pixels.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Restarts the crawl, used whenever the text changes.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Advances one frame for a text `text_width` pixels wide (padding included) on a
    /// viewport `viewport_width` pixels wide.
    ///
    /// Returns `None` if the text fits and should be drawn unscrolled; the offset is held
    /// at 0. Otherwise returns the x coordinate to draw this frame at and then moves the
    /// offset by one step, wrapping to 0 once the whole padded text has passed.
    pub fn advance(&mut self, text_width: u32, viewport_width: u32) -> Option<i32> {
        if text_width <= viewport_width {
            self.offset = 0;
            return None;
        }
        let x = -(self.offset as i32);
        self.offset += self.step;
        if self.offset >= text_width {
            self.offset = 0;
        }
        Some(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_text_never_scrolls() {
        let mut scroll = ScrollState::new(1);
        for _ in 0..10 {
            assert_eq!(scroll.advance(128, 128), None);
            assert_eq!(scroll.offset(), 0);
        }
    }

    #[test]
    fn wide_text_crawls_by_step_and_wraps_at_full_width() {
        let mut scroll = ScrollState::new(4);
        let width = 140;
        let xs: Vec<i32> = (0..36).map(|_| scroll.advance(width, 128).unwrap()).collect();
        assert_eq!(xs[0], 0);
        assert_eq!(xs[1], -4);
        assert_eq!(xs[34], -136);
        assert_eq!(xs[35], 0, "offset 140 >= width wraps to the start");
        assert_eq!(scroll.offset(), 4);
    }

    #[test]
    fn cycle_repeats_identically() {
        let mut scroll = ScrollState::new(3);
        let first: Vec<_> = (0..50).map(|_| scroll.advance(150, 128)).collect();
        let second: Vec<_> = (0..50).map(|_| scroll.advance(150, 128)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn shrinking_text_resets_the_offset() {
        let mut scroll = ScrollState::new(1);
        scroll.advance(300, 128);
        scroll.advance(300, 128);
        assert_eq!(scroll.offset(), 2);
        assert_eq!(scroll.advance(60, 128), None);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn reset_restarts_the_crawl() {
        let mut scroll = ScrollState::new(2);
        scroll.advance(300, 128);
        scroll.reset();
        assert_eq!(scroll.advance(300, 128), Some(0));
    }
}
