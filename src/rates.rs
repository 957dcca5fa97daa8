//! Rate table validation
//!
//! Turns raw `(from, to, rate)` text triples into validated exchange rates
//! and the set of currencies taking part in one request. Validation is
//! fail-fast: the first bad line aborts the whole table.

use crate::currency::{CurrencyKey, Ticker};
use crate::error::{FxGraphError, Result};
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// One unvalidated rate line, already split into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRate {
    /// 1-based input line the triple came from
    pub line: usize,
    pub from: String,
    pub to: String,
    pub rate: String,
}

impl RawRate {
    /// Create a raw rate triple
    pub fn new(
        line: usize,
        from: impl Into<String>,
        to: impl Into<String>,
        rate: impl Into<String>,
    ) -> Self {
        Self {
            line,
            from: from.into(),
            to: to.into(),
            rate: rate.into(),
        }
    }
}

/// A validated exchange rate: 1 `from` buys `rate` units of `to`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from: Ticker,
    pub to: Ticker,
    pub rate: f64,
}

/// Direction-insensitive identity of a currency pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey(CurrencyKey, CurrencyKey);

impl PairKey {
    /// Build the key; `new(a, b) == new(b, a)`
    pub fn new(a: CurrencyKey, b: CurrencyKey) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

/// Output of validation: participating currencies plus rates in input order
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    currencies: HashSet<CurrencyKey>,
    rates: Vec<ExchangeRate>,
}

impl RateTable {
    /// Distinct currencies appearing on either side of any rate
    pub fn currencies(&self) -> &HashSet<CurrencyKey> {
        &self.currencies
    }

    /// Validated rates, in the order they were supplied
    pub fn rates(&self) -> &[ExchangeRate] {
        &self.rates
    }

    /// Whether a currency appears in any rate
    pub fn contains(&self, key: CurrencyKey) -> bool {
        self.currencies.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Validate a declared number of raw rate lines
pub fn validate(declared: usize, raw: &[RawRate]) -> Result<RateTable> {
    if declared != raw.len() {
        return Err(FxGraphError::CountMismatch {
            expected: declared,
            actual: raw.len(),
        });
    }

    let mut table = RateTable {
        currencies: HashSet::with_capacity(raw.len() * 2),
        rates: Vec::with_capacity(raw.len()),
    };
    let mut seen: HashSet<PairKey> = HashSet::with_capacity(raw.len());

    for entry in raw {
        let from = Ticker::parse_at(&entry.from, entry.line)?;
        let to = Ticker::parse_at(&entry.to, entry.line)?;

        if !seen.insert(PairKey::new(from.key(), to.key())) {
            return Err(FxGraphError::DuplicateRate {
                line: entry.line,
                first: from.to_string(),
                second: to.to_string(),
            });
        }

        let rate = parse_rate(&entry.rate, entry.line)?;

        if from == to {
            log::warn!(
                "Line {}: self-pair {}/{} is accepted but never used for conversion",
                entry.line,
                from,
                to
            );
        }

        table.currencies.insert(from.key());
        table.currencies.insert(to.key());
        table.rates.push(ExchangeRate { from, to, rate });
    }

    log::debug!(
        "Validated {} rate(s) over {} currencies",
        table.rates.len(),
        table.currencies.len()
    );

    Ok(table)
}

/// Parse rate text as a strictly positive decimal number
///
/// Only ASCII digits and '.' are accepted, so signs, exponents and
/// "inf"/"NaN" are all rejected.
pub fn parse_rate(text: &str, line: usize) -> Result<f64> {
    let invalid = || FxGraphError::InvalidRate {
        line,
        text: text.to_string(),
    };

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(invalid());
    }

    let rate: f64 = text.parse().map_err(|_| invalid())?;
    if !rate.is_finite() {
        return Err(invalid());
    }
    if rate == 0.0 {
        return Err(FxGraphError::ZeroRate { line });
    }

    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: usize, from: &str, to: &str, rate: &str) -> RawRate {
        RawRate::new(line, from, to, rate)
    }

    #[test]
    fn test_validate_collects_currencies() {
        let table = validate(
            2,
            &[raw(3, "EUR", "USD", "1.1000"), raw(4, "USD", "JPY", "150")],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.currencies().len(), 3);
        assert!(table.contains(Ticker::parse("JPY").unwrap().key()));
        assert!(!table.contains(Ticker::parse("GBP").unwrap().key()));
        assert_eq!(table.rates()[0].from.as_str(), "EUR");
        assert_eq!(table.rates()[1].rate, 150.0);
    }

    #[test]
    fn test_validate_count_mismatch() {
        let err = validate(3, &[raw(3, "EUR", "USD", "1.1")]).unwrap_err();
        assert!(matches!(
            err,
            FxGraphError::CountMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_validate_empty_table() {
        let table = validate(0, &[]).unwrap();
        assert!(table.is_empty());
        assert!(table.currencies().is_empty());
    }

    #[test]
    fn test_validate_invalid_ticker() {
        let err = validate(1, &[raw(3, "EURO", "USD", "1.1")]).unwrap_err();
        assert!(matches!(err, FxGraphError::InvalidTicker { line: 3, .. }));

        let err = validate(1, &[raw(3, "EUR", "U5D", "1.1")]).unwrap_err();
        assert!(matches!(err, FxGraphError::InvalidTicker { ref ticker, .. } if ticker == "U5D"));
    }

    #[test]
    fn test_validate_duplicate_is_direction_insensitive() {
        let err = validate(
            2,
            &[raw(3, "EUR", "CHF", "1.2"), raw(4, "CHF", "EUR", "0.83")],
        )
        .unwrap_err();
        assert!(matches!(err, FxGraphError::DuplicateRate { line: 4, .. }));

        let err = validate(
            2,
            &[raw(3, "CHF", "EUR", "0.83"), raw(4, "CHF", "EUR", "0.83")],
        )
        .unwrap_err();
        assert!(matches!(err, FxGraphError::DuplicateRate { line: 4, .. }));
    }

    #[test]
    fn test_duplicate_reported_before_bad_rate() {
        let err = validate(
            2,
            &[raw(3, "EUR", "CHF", "1.2"), raw(4, "CHF", "EUR", "0")],
        )
        .unwrap_err();
        assert!(matches!(err, FxGraphError::DuplicateRate { line: 4, .. }));

        let err = validate(
            2,
            &[raw(3, "EUR", "CHF", "1.2"), raw(4, "EUR", "CHF", "abc")],
        )
        .unwrap_err();
        assert!(matches!(err, FxGraphError::DuplicateRate { line: 4, .. }));
    }

    #[test]
    fn test_validate_accepts_self_pair() {
        let table = validate(1, &[raw(3, "EUR", "EUR", "1.0")]).unwrap();
        assert_eq!(table.currencies().len(), 1);
    }

    #[test]
    fn test_pair_key_symmetric() {
        let a = Ticker::parse("AAA").unwrap().key();
        let b = Ticker::parse("BBB").unwrap().key();
        assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
        assert_ne!(PairKey::new(a, a), PairKey::new(a, b));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("1.1000", 1).unwrap(), 1.1);
        assert_eq!(parse_rate("150", 1).unwrap(), 150.0);
        assert_eq!(parse_rate(".5", 1).unwrap(), 0.5);

        for bad in ["", "-1.2", "1.2.3", "abc", "1e5", "inf", ".", "1,2"] {
            assert!(
                matches!(parse_rate(bad, 7), Err(FxGraphError::InvalidRate { line: 7, .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rate_zero() {
        assert!(matches!(parse_rate("0", 5), Err(FxGraphError::ZeroRate { line: 5 })));
        assert!(matches!(parse_rate("0.0000", 5), Err(FxGraphError::ZeroRate { line: 5 })));
    }
}
