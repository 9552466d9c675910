//! HTTP endpoints and small transport helpers shared by the data sources.
use std::error::Error as _;
use std::io;
use std::time::Duration;

use log::debug;
use url::Url;

use crate::error::TickerError;
use crate::Result;

/// Random inspirational quote endpoint. Answers with `[{"q": "...", "a": "..."}]`.
pub const ZENQUOTES_URL: &str = "https://zenquotes.io/api/random";
/// Base URL of the Yahoo Finance chart API; the symbol is appended as a path segment.
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
/// Sent with every request. Yahoo rejects requests without a user agent.
pub const USER_AGENT: &str = concat!("ticker_display/", env!("CARGO_PKG_VERSION"));

/// Builds a blocking HTTP agent whose requests fail after `timeout`.
pub fn agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Performs a GET and returns the body as text. Non-2xx answers are errors.
pub fn get_text(agent: &ureq::Agent, url: &str) -> Result<String> {
    debug!("GET {}", url);
    let response = agent.get(url).call()?;
    // The agent timeout also bounds reading the body; a stall there is still a timeout.
    response.into_string().map_err(|e| match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
            TickerError::Timeout(format!("reading body of {}: {}", url, e))
        }
        _ => TickerError::Io(e),
    })
}

/// Appends `segment` to the path of `base`, percent-encoding it, and sets `query`.
pub fn segment_url(base: &str, segment: &str, query: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| TickerError::Config(format!("{} cannot take a path segment", base)))?
        .pop_if_empty()
        .push(segment);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// Returns `true` if a transport failure was caused by the request timeout.
pub(crate) fn is_timeout(transport: &ureq::Transport) -> bool {
    let io_timeout = transport
        .source()
        .and_then(|source| source.downcast_ref::<io::Error>())
        .is_some_and(|e| matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock));
    io_timeout || transport.to_string().contains("timed out")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_becomes_one_encoded_path_segment() {
        let url = segment_url(YAHOO_CHART_URL, "BRK-B", &[("range", "1d"), ("interval", "1d")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/BRK-B?range=1d&interval=1d"
        );

        let url = segment_url("http://127.0.0.1:8080/", "A/B C", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/A%2FB%20C");

        let url = segment_url(YAHOO_CHART_URL, "^GSPC", &[]).unwrap();
        assert!(url.path().starts_with("/v8/finance/chart/"));
        assert!(url.path().ends_with("GSPC"));
    }

    #[test]
    fn base_without_path_is_rejected() {
        assert!(matches!(
            segment_url("mailto:ticker@example.com", "AAPL", &[]),
            Err(TickerError::Config(_))
        ));
        assert!(matches!(segment_url("not a url", "AAPL", &[]), Err(TickerError::Url(_))));
    }

    #[test]
    fn user_agent_carries_the_crate_version() {
        assert!(USER_AGENT.starts_with("ticker_display/"));
    }
}
