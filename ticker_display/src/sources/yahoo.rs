//! Yahoo Finance chart API client.
//!
//! `range=1d` gives the live fields in `chart.result[0].meta`; `range=5d&interval=1d`
//! gives daily closes in `chart.result[0].indicators.quote[0].close`, with `null` for
//! sessions without a print.
use std::time::Duration;

use log::debug;
use serde::Deserialize;
use ticker_common::net::{self, YAHOO_CHART_URL};
use ticker_common::{Result, Symbol, TickerError};

use crate::model::stock::{LiveQuote, StockProvider};

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    current_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn first_result(body: &str) -> Result<ChartResult> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;
    if let Some(error) = envelope.chart.error {
        return Err(TickerError::InvalidResponse(format!(
            "{}: {}",
            error.code, error.description
        )));
    }
    envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| TickerError::InvalidResponse("chart has no result".into()))
}

/// Live fields of a `range=1d` chart body.
pub fn parse_live_quote(body: &str) -> Result<LiveQuote> {
    let meta = first_result(body)?.meta;
    Ok(LiveQuote {
        price: meta.regular_market_price.or(meta.current_price),
        previous_close: meta.previous_close.or(meta.chart_previous_close),
    })
}

/// Non-null daily closes of a chart body, oldest first.
pub fn parse_daily_closes(body: &str) -> Result<Vec<f64>> {
    let result = first_result(body)?;
    Ok(result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|series| {
            series
                .close
                .into_iter()
                .flatten()
                .filter(|close| close.is_finite())
                .collect()
        })
        .unwrap_or_default())
}

/// Blocking Yahoo chart client.
pub struct YahooChart {
    agent: ureq::Agent,
    base_url: String,
}

impl YahooChart {
    /// Client for the public endpoint.
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(YAHOO_CHART_URL, timeout)
    }

    /// Client for a custom base URL.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        Self {
            agent: net::agent(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn chart(&self, symbol: &Symbol, range: &str) -> Result<String> {
        let url = net::segment_url(
            &self.base_url,
            symbol.as_str(),
            &[("range", range), ("interval", "1d")],
        )?;
        debug!("Chart request for {}", symbol);
        net::get_text(&self.agent, url.as_str())
    }
}

impl StockProvider for YahooChart {
    fn live_quote(&self, symbol: &Symbol) -> Result<LiveQuote> {
        parse_live_quote(&self.chart(symbol, "1d")?)
    }

    fn daily_closes(&self, symbol: &Symbol) -> Result<Vec<f64>> {
        parse_daily_closes(&self.chart(symbol, "5d")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stock::fetch_stock_line;
    use crate::sources::testing::serve_once;

    const LIVE: &str = r#"{"chart":{"result":[{"meta":{"currency":"USD","symbol":"COF",
        "regularMarketPrice":176.25,"chartPreviousClose":170.1,"previousClose":172.5},
        "timestamp":[1744300800],"indicators":{"quote":[{"close":[176.25]}]}}],"error":null}}"#;

    const HISTORY: &str = r#"{"chart":{"result":[{"meta":{"symbol":"^GSPC"},
        "indicators":{"quote":[{"close":[5000.0,null,5100.0,5202.0,null]}]}}],"error":null}}"#;

    const NOT_FOUND: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found",
        "description":"No data found, symbol may be delisted"}}}"#;

    #[test]
    fn previous_close_wins_over_chart_previous_close() {
        let live = parse_live_quote(LIVE).unwrap();
        assert_eq!(live.price, Some(176.25));
        assert_eq!(live.previous_close, Some(172.5));
    }

    #[test]
    fn current_price_stands_in_for_a_missing_market_price() {
        let body = r#"{"chart":{"result":[{"meta":{"currentPrice":52.5,
            "chartPreviousClose":50.0}}],"error":null}}"#;
        let live = parse_live_quote(body).unwrap();
        assert_eq!(live.price, Some(52.5));
        assert_eq!(live.previous_close, Some(50.0));
    }

    #[test]
    fn history_skips_null_sessions() {
        assert_eq!(
            parse_daily_closes(HISTORY).unwrap(),
            vec![5000.0, 5100.0, 5202.0]
        );
        let live = parse_live_quote(HISTORY).unwrap();
        assert_eq!(live, LiveQuote::default());
    }

    #[test]
    fn chart_error_is_an_invalid_response() {
        let err = parse_live_quote(NOT_FOUND).unwrap_err();
        assert!(matches!(err, TickerError::InvalidResponse(ref m) if m.contains("Not Found")));
    }

    #[test]
    fn missing_indicators_mean_no_history() {
        let body = r#"{"chart":{"result":[{"meta":{}}],"error":null}}"#;
        assert!(parse_daily_closes(body).unwrap().is_empty());
    }

    #[test]
    fn live_quote_over_http() {
        let response: &'static str = Box::leak(
            format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                LIVE.len(),
                LIVE
            )
            .into_boxed_str(),
        );
        let url = serve_once(response, None);
        let provider = YahooChart::with_base_url(&url, Duration::from_secs(5));
        let line = fetch_stock_line(&provider, &"COF".parse().unwrap());
        assert_eq!(line.to_string(), "COF: $176.25 +2.17%");
    }

    #[test]
    fn unknown_symbol_status_becomes_an_error_row() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            None,
        );
        let provider = YahooChart::with_base_url(&url, Duration::from_secs(5));
        let line = fetch_stock_line(&provider, &"NOPE".parse().unwrap());
        assert_eq!(line.to_string(), "NOPE: Error");
    }
}
