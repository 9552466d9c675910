//! Ticker symbols and parsing helpers.
//!
//! Symbols are free-form exchange identifiers such as `COF`, `BRK-B` or the index
//! symbol `^GSPC`. They are upper-cased on parse and validated against the character
//! set Yahoo uses.
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TickerError;

/// Longest symbol accepted. Yahoo symbols for futures and FX stay well below this.
pub const MAX_SYMBOL_LEN: usize = 16;

/// Symbols shown when no tickers are configured explicitly.
pub const DEFAULT_SYMBOLS: [&str; 3] = ["COF", "^GSPC", "AAPL"];

/// Trait providing list parsing for symbols.
pub trait SymbolParser: Sized {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace or new lines. Lines starting
    /// with `#` are comments. Returns an error on the first invalid symbol.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, TickerError>;

    /// Parses a comma/whitespace separated list such as `COF,^GSPC AAPL`.
    fn parse_list(list: &str) -> Result<Vec<Self>, TickerError>;
}

/// A validated, upper-case ticker symbol.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// The symbol as sent to the provider and shown on the panel.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The compiled-in default watch list.
    pub fn defaults() -> Vec<Symbol> {
        DEFAULT_SYMBOLS
            .iter()
            .map(|s| Symbol(s.to_string()))
            .collect()
    }
}

impl FromStr for Symbol {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TickerError::ParseTickers("empty symbol".to_string()));
        }
        if trimmed.len() > MAX_SYMBOL_LEN {
            return Err(TickerError::ParseTickers(format!(
                "symbol `{}` is longer than {} characters",
                trimmed, MAX_SYMBOL_LEN
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '^' | '.' | '-' | '=')))
        {
            return Err(TickerError::ParseTickers(format!(
                "symbol `{}` contains invalid character `{}`",
                trimmed, bad
            )));
        }
        Ok(Symbol(trimmed.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for Symbol {
    type Error = TickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl SymbolParser for Symbol {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, TickerError> {
        let mut symbols = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(TickerError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }
            symbols.extend(Self::parse_list(trimmed_line)?);
        }
        Ok(symbols)
    }

    fn parse_list(list: &str) -> Result<Vec<Self>, TickerError> {
        list.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::parse)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_mixed_separators_and_comments() {
        let input = "# watch list\ncof, ^gspc\n\n  aapl qqq\n";
        let symbols = Symbol::parse_from_file(Cursor::new(input)).unwrap();
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, ["COF", "^GSPC", "AAPL", "QQQ"]);
    }

    #[test]
    fn rejects_invalid_characters() {
        let err = "AA$PL".parse::<Symbol>().unwrap_err();
        assert!(matches!(err, TickerError::ParseTickers(_)));
        assert!(err.to_string().contains('$'));
    }

    #[test]
    fn rejects_overlong_symbols() {
        assert!("ABCDEFGHIJKLMNOPQ".parse::<Symbol>().is_err());
    }

    #[test]
    fn defaults_match_the_compiled_list() {
        let defaults = Symbol::defaults();
        assert_eq!(defaults.len(), DEFAULT_SYMBOLS.len());
        assert_eq!(defaults[1].to_string(), "^GSPC");
    }

    #[test]
    fn deserializes_through_validation() {
        let symbols: Vec<Symbol> = serde_json::from_str(r#"["brk-b", "^ixic"]"#).unwrap();
        assert_eq!(symbols[0].as_str(), "BRK-B");
        assert!(serde_json::from_str::<Symbol>(r#""bad symbol""#).is_err());
    }
}
