//! Currency identity: tickers and their packed integer keys

use crate::error::{FxGraphError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of letters in a currency ticker
pub const TICKER_LEN: usize = 3;

/// Three-letter alphabetic currency code (e.g. "EUR")
///
/// Tickers are compared byte for byte, so "eur" and "EUR" are different
/// currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticker([u8; TICKER_LEN]);

impl Ticker {
    /// Parse a ticker, returning `None` unless it is exactly 3 ASCII letters
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != TICKER_LEN || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        Some(Self([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse a ticker found on a given input line
    pub fn parse_at(s: &str, line: usize) -> Result<Self> {
        Self::parse(s).ok_or_else(|| FxGraphError::InvalidTicker {
            line,
            ticker: s.to_string(),
        })
    }

    /// Get ticker as string
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Packed integer identity of this ticker
    pub fn key(&self) -> CurrencyKey {
        encode(self)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Ticker {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Ticker {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ticker::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid currency ticker: {}", s)))
    }
}

/// Compact integer identity of a currency
///
/// Each letter occupies its own 8-bit field, most significant letter first,
/// so distinct tickers always map to distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyKey(u32);

impl CurrencyKey {
    /// Raw packed value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CurrencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", decode(*self))
    }
}

/// Pack a ticker into its currency key
pub fn encode(ticker: &Ticker) -> CurrencyKey {
    let [a, b, c] = ticker.0;
    CurrencyKey((u32::from(a) << 16) | (u32::from(b) << 8) | u32::from(c))
}

/// Recover the ticker a key was packed from (diagnostics only)
pub fn decode(key: CurrencyKey) -> Ticker {
    let [_, a, b, c] = key.0.to_be_bytes();
    Ticker([a, b, c])
}
