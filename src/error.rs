//! Error types for rusty_fxgraph

use thiserror::Error;

/// Main error type for rusty_fxgraph
///
/// Line numbers are 1-based positions in the input file.
#[derive(Error, Debug)]
pub enum FxGraphError {
    #[error("Input too short: expected at least 3 non-empty lines, got {lines}")]
    TooShort { lines: usize },

    #[error("Malformed line {line}: expected {expected} field(s) separated by ';', found {found}")]
    MalformedLine {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid rate count '{text}': second line should be a non-negative integer")]
    InvalidCount { text: String },

    #[error("Invalid amount '{text}': amount should be a positive integer")]
    InvalidAmount { text: String },

    #[error("Number of expected pairs does not match provided pairs: expected {expected}, actual {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Invalid ticker '{ticker}' on line {line}: tickers must be exactly 3 alphabetic characters")]
    InvalidTicker { line: usize, ticker: String },

    #[error("Invalid exchange rate '{text}' on line {line}: should be a positive decimal number")]
    InvalidRate { line: usize, text: String },

    #[error("Exchange rate on line {line} is equal to 0")]
    ZeroRate { line: usize },

    #[error("Duplicate exchange rate on line {line}: {first}/{second} already given (in either direction)")]
    DuplicateRate {
        line: usize,
        first: String,
        second: String,
    },

    #[error("Impossible to convert {from} to {to}: missing exchange rate pair(s)")]
    Unreachable { from: String, to: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl FxGraphError {
    /// Whether the error came out of the path solver rather than input validation
    pub fn is_unreachable(&self) -> bool {
        matches!(self, FxGraphError::Unreachable { .. })
    }
}

/// Result type alias for rusty_fxgraph operations
pub type Result<T> = std::result::Result<T, FxGraphError>;
