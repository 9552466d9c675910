//! ZenQuotes client.
use std::time::Duration;

use log::info;
use serde::Deserialize;
use serde_json::Value;
use ticker_common::net::{self, ZENQUOTES_URL};
use ticker_common::{Result, TickerError};

use crate::model::quote::{QuoteFeed, ZenQuote};

/// Blocking client for the random-quote endpoint.
pub struct ZenQuotes {
    agent: ureq::Agent,
    url: String,
}

impl ZenQuotes {
    /// Client for the public endpoint.
    pub fn new(timeout: Duration) -> Self {
        Self::with_url(ZENQUOTES_URL, timeout)
    }

    /// Client for a custom endpoint URL.
    pub fn with_url(url: &str, timeout: Duration) -> Self {
        Self {
            agent: net::agent(timeout),
            url: url.to_string(),
        }
    }
}

impl QuoteFeed for ZenQuotes {
    fn fetch(&self) -> Result<ZenQuote> {
        info!("Fetching new quote from {}...", self.url);
        let body = net::get_text(&self.agent, &self.url)?;
        parse_quote(&body)
    }
}

/// Extracts the first quote of a `[{"q": .., "a": ..}, ..]` body.
pub fn parse_quote(body: &str) -> Result<ZenQuote> {
    let value: Value = serde_json::from_str(body)?;
    let first = value
        .as_array()
        .ok_or_else(|| TickerError::InvalidResponse("expected a JSON array".into()))?
        .first()
        .ok_or_else(|| TickerError::InvalidResponse("empty quote array".into()))?;
    if !first.is_object() {
        return Err(TickerError::InvalidResponse(
            "quote entry is not an object".into(),
        ));
    }
    ZenQuote::deserialize(first).map_err(|e| TickerError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quote::{fetch_quote, QuoteDiagnostic, QuoteText};
    use crate::sources::testing::serve_once;

    #[test]
    fn parses_first_entry() {
        let body = r#"[{"q":"Act as if.","a":"William James","h":"..."},{"q":"x","a":"y"}]"#;
        let quote = parse_quote(body).unwrap();
        assert_eq!(quote.text, "Act as if.");
        assert_eq!(quote.author, "William James");
    }

    #[test]
    fn empty_array_is_invalid() {
        assert!(matches!(parse_quote("[]"), Err(TickerError::InvalidResponse(_))));
    }

    #[test]
    fn object_instead_of_array_is_invalid() {
        let err = parse_quote(r#"{"error":"Too many requests"}"#).unwrap_err();
        assert!(matches!(err, TickerError::InvalidResponse(_)));
    }

    #[test]
    fn non_object_entry_is_invalid() {
        assert!(matches!(parse_quote("[42]"), Err(TickerError::InvalidResponse(_))));
    }

    #[test]
    fn non_json_body_is_a_processing_error() {
        let err = parse_quote("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, TickerError::SerdeJson(_)));
    }

    #[test]
    fn fetches_over_http() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 27\r\nConnection: close\r\n\r\n[{\"q\":\"Go on.\",\"a\":\"Anon\"}]",
            None,
        );
        let feed = ZenQuotes::with_url(&format!("{}/api/random", url), Duration::from_secs(5));
        assert_eq!(fetch_quote(&feed).to_string(), "\"Go on.\" - Anon");
    }

    #[test]
    fn server_error_status_is_a_transport_diagnostic() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            None,
        );
        let feed = ZenQuotes::with_url(&url, Duration::from_secs(5));
        assert_eq!(
            fetch_quote(&feed),
            QuoteText::Diagnostic(QuoteDiagnostic::Transport)
        );
    }

    #[test]
    fn silent_server_times_out() {
        let url = serve_once("", Some(Duration::from_secs(3)));
        let feed = ZenQuotes::with_url(&url, Duration::from_millis(300));
        let err = feed.fetch().unwrap_err();
        assert!(err.is_timeout(), "unexpected error: {}", err);
        assert_eq!(
            QuoteDiagnostic::from(&err),
            QuoteDiagnostic::Timeout
        );
    }

    #[test]
    fn body_stalling_after_headers_is_a_timeout() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n[{\"q\":",
            Some(Duration::from_secs(3)),
        );
        let feed = ZenQuotes::with_url(&url, Duration::from_millis(300));
        assert_eq!(
            fetch_quote(&feed),
            QuoteText::Diagnostic(QuoteDiagnostic::Timeout)
        );
    }
}
