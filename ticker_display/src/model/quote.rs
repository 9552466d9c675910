//! Inspirational quote shown on the scrolling row.
//!
//! The feed answers with `[{"q": "...", "a": "..."}]`. Any failure is folded into a
//! fixed [`QuoteDiagnostic`] so the row always has something to show.
use std::fmt;

use log::{info, warn};
use serde::Deserialize;
use strum_macros::Display;
use ticker_common::{Result, TickerError};

/// One quote as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZenQuote {
    /// Quote text.
    #[serde(rename = "q", default = "unavailable_text")]
    pub text: String,
    /// Author.
    #[serde(rename = "a", default = "unknown_author")]
    pub author: String,
}

fn unavailable_text() -> String {
    "Quote unavailable.".to_string()
}

fn unknown_author() -> String {
    "Unknown".to_string()
}

/// Source of quotes.
pub trait QuoteFeed {
    /// Fetches one quote.
    fn fetch(&self) -> Result<ZenQuote>;
}

/// Fixed text shown instead of a quote when fetching fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum QuoteDiagnostic {
    /// The request did not finish within the timeout.
    #[strum(serialize = "Quote API timeout.")]
    Timeout,
    /// Connection failure or non-2xx status.
    #[strum(serialize = "Quote API error.")]
    Transport,
    /// JSON that is not a non-empty array of quote objects.
    #[strum(serialize = "Invalid API response.")]
    InvalidResponse,
    /// Anything else, e.g. a body that is not JSON.
    #[strum(serialize = "Quote processing error.")]
    Processing,
}

impl From<&TickerError> for QuoteDiagnostic {
    fn from(err: &TickerError) -> Self {
        match err {
            TickerError::Timeout(_) => QuoteDiagnostic::Timeout,
            TickerError::HttpStatus { .. } | TickerError::Transport(_) | TickerError::Io(_) => {
                QuoteDiagnostic::Transport
            }
            TickerError::InvalidResponse(_) => QuoteDiagnostic::InvalidResponse,
            _ => QuoteDiagnostic::Processing,
        }
    }
}

/// What the quote row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteText {
    /// Nothing fetched yet.
    Pending,
    /// A fetched quote.
    Quote(ZenQuote),
    /// The last fetch failed.
    Diagnostic(QuoteDiagnostic),
}

impl fmt::Display for QuoteText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteText::Pending => write!(f, "Loading quote..."),
            QuoteText::Quote(quote) => write!(f, "\"{}\" - {}", quote.text, quote.author),
            QuoteText::Diagnostic(diagnostic) => write!(f, "{}", diagnostic),
        }
    }
}

/// Fetches a quote, folding failures into a diagnostic.
pub fn fetch_quote(feed: &dyn QuoteFeed) -> QuoteText {
    match feed.fetch() {
        Ok(quote) => {
            info!("Quote updated.");
            QuoteText::Quote(quote)
        }
        Err(e) => {
            warn!("Error fetching quote: {}", e);
            QuoteText::Diagnostic(QuoteDiagnostic::from(&e))
        }
    }
}
