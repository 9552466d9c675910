//! Data model of the ticker display.
//!
//! This module groups the state the scheduler owns and the values it renders:
//! - `refreshable` — cached values with a poll interval.
//! - `scroll` — marquee offset of the quote row.
//! - `stock` — per-symbol stock rows and the stock fetch policy.
//! - `quote` — inspirational quote text and its diagnostics.
pub mod quote;
pub mod refreshable;
pub mod scroll;
pub mod stock;
