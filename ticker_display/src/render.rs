//! Frame composition.
//!
//! Rows are placed at fixed coordinates: stock rows top-down from y = 0, the quote row
//! two rows above the bottom edge and the time row on the bottom row.
use chrono::NaiveDateTime;
use ticker_common::display::{DisplaySink, Frame, LINE_HEIGHT};

use crate::config::Layout;
use crate::model::quote::QuoteText;
use crate::model::scroll::ScrollState;
use crate::model::stock::StockLine;

/// Time row text for `layout`.
pub fn format_time(now: NaiveDateTime, layout: Layout) -> String {
    match layout {
        Layout::StocksAndQuote => now.format("%I:%M:%S %p").to_string(),
        Layout::StocksOnly => format!("Time: {}", now.format("%I:%M %p")),
    }
}

/// Everything one frame shows.
pub struct FrameInputs<'a> {
    /// Stock rows in display order.
    pub stocks: &'a [StockLine],
    /// Quote row, absent in the stocks-only layout.
    pub quote: Option<&'a QuoteText>,
    /// Gap appended to a scrolling quote.
    pub padding: &'a str,
    /// Time row text.
    pub time: &'a str,
}

/// Builds the frame for this tick and advances the quote marquee by one step.
pub fn compose(sink: &impl DisplaySink, inputs: &FrameInputs<'_>, scroll: &mut ScrollState) -> Frame {
    let size = sink.size();
    let height = size.height as i32;
    let mut frame = Frame::new();

    for (row, line) in inputs.stocks.iter().enumerate() {
        frame.text(line.to_string(), 0, row as i32 * LINE_HEIGHT);
    }

    if let Some(quote) = inputs.quote {
        let quote_y = height - 2 * LINE_HEIGHT;
        let text = quote.to_string();
        let padded = format!("{}{}", text, inputs.padding);
        match scroll.advance(sink.text_width(&padded), size.width) {
            None => frame.text(text, 0, quote_y),
            Some(x) => frame.text(padded, x, quote_y),
        };
    }

    frame.text(inputs.time, 0, height - LINE_HEIGHT);
    frame
}
