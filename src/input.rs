//! Input file reader
//!
//! File layout, fields separated by ';':
//!
//! ```text
//! EUR;550;JPY        <- FROM;AMOUNT;TO
//! 6                  <- number of rate lines that follow
//! AUD;CHF;0.9661     <- 1 AUD buys 0.9661 CHF
//! JPY;KRW;13.1151
//! EUR;CHF;1.2053
//! AUD;JPY;86.0305
//! EUR;USD;1.2989
//! JPY;INR;0.6571
//! ```
//!
//! Empty lines are ignored.

use crate::currency::Ticker;
use crate::error::{FxGraphError, Result};
use crate::rates::RawRate;
use crate::request::{run_request, Conversion, ConversionRequest};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;

/// Fields on the header and rate lines
const TRIPLE_FIELDS: usize = 3;

/// One parsed input file: a request and the rate lines it brings along
#[derive(Debug, Clone)]
pub struct RateFile {
    pub request: ConversionRequest,
    /// Count announced on the second line
    pub declared: usize,
    pub rates: Vec<RawRate>,
}

impl RateFile {
    /// Read and split an input file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read and split input from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut lines: Vec<(usize, StringRecord)> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            // Blank line; a line of bare separators still counts
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            let line = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(lines.len() + 1);
            lines.push((line, record));
        }

        if lines.len() < TRIPLE_FIELDS {
            return Err(FxGraphError::TooShort { lines: lines.len() });
        }

        let (header_line, header) = &lines[0];
        let header = fields(header, *header_line, TRIPLE_FIELDS)?;
        let source = Ticker::parse_at(header[0], *header_line)?;
        let amount = ConversionRequest::parse_amount(header[1])?;
        let destination = Ticker::parse_at(header[2], *header_line)?;

        let (count_line, count) = &lines[1];
        let count = fields(count, *count_line, 1)?[0];
        let declared = parse_count(count)?;

        let rates = lines[2..]
            .iter()
            .map(|(line, record)| -> Result<RawRate> {
                let f = fields(record, *line, TRIPLE_FIELDS)?;
                Ok(RawRate::new(*line, f[0], f[1], f[2]))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Read request {} with {} rate line(s), {} declared",
            ConversionRequest::new(source, amount, destination),
            rates.len(),
            declared
        );

        Ok(Self {
            request: ConversionRequest::new(source, amount, destination),
            declared,
            rates,
        })
    }

    /// Run the conversion described by this file
    pub fn run(&self) -> Result<Conversion> {
        run_request(self.request, self.declared, &self.rates)
    }
}

/// Parse the declared rate count: ASCII digits only
fn parse_count(text: &str) -> Result<usize> {
    let invalid = || FxGraphError::InvalidCount {
        text: text.to_string(),
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse::<usize>().map_err(|_| invalid())
}

fn fields(record: &StringRecord, line: usize, expected: usize) -> Result<Vec<&str>> {
    if record.len() != expected {
        return Err(FxGraphError::MalformedLine {
            line,
            expected,
            found: record.len(),
        });
    }
    Ok(record.iter().collect())
}

/// Read an input file and run its conversion
pub fn convert_file(path: &Path) -> Result<Conversion> {
    RateFile::from_path(path)?.run()
}
