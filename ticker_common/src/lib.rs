//!
//! Common types and utilities shared by the ticker display and the panel check tool.
//!
//! This crate aggregates:
//! - `error` — unified error type `TickerError` used across the workspace.
//! - `result` — handy `Result<T, TickerError>` alias.
//! - `tickers` — ticker symbols and parsing helpers.
//! - `net` — HTTP endpoints and transport helpers.
//! - `display` — frame model, display sink trait and the SPI OLED panel.
#![warn(missing_docs)]
pub mod display;
pub mod error;
pub mod net;
pub mod result;
pub mod tickers;

pub use error::TickerError;
pub use result::Result;
pub use tickers::Symbol;
