//! Error types shared by the ticker display and the panel check tool.
//!
//! The `TickerError` enum unifies the failure cases of both binaries: I/O, JSON decoding,
//! HTTP transport, ticker parsing, configuration and display errors. Callers decide how
//! to react through [`TickerError::is_fatal`].
use std::io;

use thiserror::Error;

/// Unified error type shared by both binaries.
#[derive(Error, Debug)]
pub enum TickerError {
    /// I/O error originating from the standard library, files or device nodes.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while decoding JSON via serde_json.
    #[error("JSON deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The remote endpoint answered with a non-2xx status code.
    #[error("HTTP status {code} from {url}")]
    HttpStatus {
        /// Status code returned by the server.
        code: u16,
        /// Requested URL.
        url: String,
    },

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Connection, DNS or protocol failure before a response was received.
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response was valid JSON but did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Error while parsing ticker symbols from a file or the command line.
    #[error("Parse tickers error: {0}")]
    ParseTickers(String),

    /// Settings that cannot be run with (zero intervals, no tickers, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// SPI/GPIO bus or controller bring-up failed.
    #[error("Display initialization failed: {0}")]
    DisplayInit(String),

    /// Drawing into the frame buffer or flushing it to the panel failed.
    #[error("Display drawing error: {0}")]
    Draw(String),
}

impl TickerError {
    /// Returns `true` for errors the process cannot continue after.
    ///
    /// Everything a data source can produce is recoverable: the scheduler substitutes a
    /// placeholder and tries again on the next interval.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TickerError::DisplayInit(_) | TickerError::Config(_))
    }

    /// Returns `true` if the error is a transport timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TickerError::Timeout(_))
    }
}

impl From<ureq::Error> for TickerError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => TickerError::HttpStatus {
                code,
                url: response.get_url().to_string(),
            },
            ureq::Error::Transport(transport) => {
                if crate::net::is_timeout(&transport) {
                    TickerError::Timeout(transport.to_string())
                } else {
                    TickerError::Transport(transport.to_string())
                }
            }
        }
    }
}
