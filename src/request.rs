//! Conversion requests and the single-request pipeline
//!
//! validate -> build graph -> solve -> evaluate, once per request. Nothing
//! built for one request is reused by another.

use crate::currency::Ticker;
use crate::error::{FxGraphError, Result};
use crate::evaluator::{convert, round_rate};
use crate::graph::ExchangeGraph;
use crate::rates::{validate, RawRate};
use crate::solver::solve;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Convert `amount` units of `source` into `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub source: Ticker,
    pub amount: u64,
    pub destination: Ticker,
}

impl ConversionRequest {
    /// Create new conversion request
    pub fn new(source: Ticker, amount: u64, destination: Ticker) -> Self {
        Self {
            source,
            amount,
            destination,
        }
    }

    /// Parse a positive whole amount (ASCII digits only, no sign)
    pub fn parse_amount(text: &str) -> Result<u64> {
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FxGraphError::InvalidAmount {
                text: text.to_string(),
            });
        }
        match text.parse::<u64>() {
            Ok(amount) if amount > 0 => Ok(amount),
            _ => Err(FxGraphError::InvalidAmount {
                text: text.to_string(),
            }),
        }
    }

    pub fn is_same_currency(&self) -> bool {
        self.source == self.destination
    }
}

impl fmt::Display for ConversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.amount, self.source, self.destination)
    }
}

/// One step of a solved conversion, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionStep {
    pub from: Ticker,
    pub to: Ticker,
    /// Rate as applied, after rounding to fixed decimals
    pub rate: f64,
}

/// Successful outcome of one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub request: ConversionRequest,
    /// Converted amount, rounded to whole units
    pub result: u64,
    /// Hops taken, empty for a same-currency request
    pub steps: Vec<ConversionStep>,
}

impl Conversion {
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    /// Currencies visited, source first
    pub fn path(&self) -> Vec<Ticker> {
        let mut path = vec![self.request.source];
        path.extend(self.steps.iter().map(|step| step.to));
        path
    }
}

/// Run one request against its own declared rate lines
pub fn run_request(
    request: ConversionRequest,
    declared: usize,
    raw_rates: &[RawRate],
) -> Result<Conversion> {
    let table = validate(declared, raw_rates)?;

    if request.is_same_currency() {
        log::info!("{}: same currency, amount unchanged", request);
        return Ok(Conversion {
            request,
            result: request.amount,
            steps: Vec::new(),
        });
    }

    let graph = ExchangeGraph::build(&table);
    let unreachable = || FxGraphError::Unreachable {
        from: request.source.to_string(),
        to: request.destination.to_string(),
    };

    let source = graph
        .node_index(request.source.key())
        .ok_or_else(unreachable)?;
    let destination = graph
        .node_index(request.destination.key())
        .ok_or_else(unreachable)?;

    let path = solve(&graph, source, destination).ok_or_else(unreachable)?;
    let result = convert(&path, request.amount);

    let steps = path
        .hops()
        .iter()
        .filter_map(|hop| {
            Some(ConversionStep {
                from: graph.ticker_of(hop.from)?,
                to: graph.ticker_of(hop.to)?,
                rate: round_rate(hop.rate),
            })
        })
        .collect::<Vec<_>>();

    log::info!(
        "{}: {} in {} hop(s)",
        request,
        result,
        path.hop_count()
    );

    Ok(Conversion {
        request,
        result,
        steps,
    })
}
