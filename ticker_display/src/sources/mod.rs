//! Concrete data sources behind the model traits.
//!
//! - `yahoo` — stock lookups against the Yahoo Finance chart API.
//! - `zen` — random quotes from ZenQuotes.
//! - `synthetic` — offline stand-ins for both.
pub mod synthetic;
pub mod yahoo;
pub mod zen;
