//! Conversion evaluator - compounds rates hop by hop along a solved path
//!
//! Each hop's rate is first rounded to [`RATE_DECIMALS`] fixed decimals and
//! the running notional is then multiplied by the rounded rate at full
//! precision. The result therefore differs slightly from multiplying the raw
//! rates end to end, and must stay that way for output parity.

use crate::solver::PathResult;

/// Fixed number of decimals every hop rate is rounded to
pub const RATE_DECIMALS: usize = 4;

/// Round a rate to [`RATE_DECIMALS`] fixed decimals
///
/// The rate is rendered in fixed notation and parsed back. Rounding goes to
/// the nearest 4-decimal value of the exact binary `rate`, and exact ties
/// round half to even: `0.03125` becomes `0.0312`, `0.09375` becomes
/// `0.0938`. A decimal literal that only looks like a tie (e.g. `1.00005`)
/// rounds toward whichever side its binary approximation lies on.
pub fn round_rate(rate: f64) -> f64 {
    format!("{:.*}", RATE_DECIMALS, rate)
        .parse()
        .unwrap_or(rate)
}

/// Compound a notional along a path, returning the unrounded final amount
pub fn compound(path: &PathResult, notional: f64) -> f64 {
    path.hops().iter().fold(notional, |amount, hop| {
        let rate = round_rate(hop.rate);
        if rate == 0.0 {
            log::warn!(
                "Rate {} between nodes {} and {} rounds to zero",
                hop.rate,
                hop.from,
                hop.to
            );
        }
        let next = amount * rate;
        log::debug!("{} x {:.4} = {}", amount, rate, next);
        next
    })
}

/// Convert a whole-unit notional along a path
///
/// The compounded amount is rounded to the nearest integer, halves away from
/// zero.
pub fn convert(path: &PathResult, notional: u64) -> u64 {
    // Saturating cast: rates are positive so the amount is never negative
    compound(path, notional as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Ticker;
    use crate::graph::ExchangeGraph;
    use crate::rates::{validate, RawRate};
    use crate::solver::solve;
    use approx::assert_relative_eq;

    fn path(rows: &[(&str, &str, &str)], from: &str, to: &str) -> PathResult {
        let raw: Vec<RawRate> = rows
            .iter()
            .enumerate()
            .map(|(i, (f, t, r))| RawRate::new(i + 3, *f, *t, *r))
            .collect();
        let graph = ExchangeGraph::build(&validate(raw.len(), &raw).unwrap());
        let idx = |t: &str| graph.node_index(Ticker::parse(t).unwrap().key()).unwrap();
        solve(&graph, idx(from), idx(to)).unwrap()
    }

    #[test]
    fn test_round_rate() {
        assert_eq!(round_rate(1.1), 1.1);
        assert_eq!(round_rate(1.0 / 0.9661), 1.0351);
        assert_eq!(round_rate(1.0 / 3.0), 0.3333);
        assert_eq!(round_rate(2.0 / 3.0), 0.6667);
        assert_eq!(round_rate(0.00001), 0.0);
        assert_eq!(round_rate(150.0), 150.0);
    }

    #[test]
    fn test_round_rate_ties_to_even() {
        // 0.03125 and 0.09375 are exact in binary, so these are true ties
        assert_eq!(round_rate(0.03125), 0.0312);
        assert_eq!(round_rate(0.09375), 0.0938);
        assert_eq!(round_rate(1.03125), 1.0312);
    }

    #[test]
    fn test_single_hop_conversion() {
        let p = path(&[("EUR", "USD", "1.1000")], "EUR", "USD");
        assert_eq!(convert(&p, 100), 110);
    }

    #[test]
    fn test_two_hop_conversion() {
        let p = path(
            &[("EUR", "USD", "1.1000"), ("USD", "JPY", "150.0000")],
            "EUR",
            "JPY",
        );
        assert_relative_eq!(compound(&p, 100.0), 16500.0, epsilon = 1e-6);
        assert_eq!(convert(&p, 100), 16500);
    }

    #[test]
    fn test_rate_rounded_before_multiplying() {
        // 1 / 3 becomes 0.3333 before compounding: 3000 x 0.3333 = 999.9
        let p = path(&[("USD", "EUR", "3")], "EUR", "USD");
        assert_relative_eq!(compound(&p, 3000.0), 999.9, epsilon = 1e-9);
        assert_eq!(convert(&p, 3000), 1000);

        // end-to-end multiplication would give exactly 10000 here
        let p = path(&[("USD", "EUR", "3")], "EUR", "USD");
        assert_eq!(convert(&p, 30000), 9999);
    }

    #[test]
    fn test_running_notional_not_rounded() {
        // 1 x 1.5 = 1.5, x 1.5 = 2.25, x 1.5 = 3.375 -> 3
        let p = path(
            &[("AAA", "BBB", "1.5"), ("BBB", "CCC", "1.5"), ("CCC", "DDD", "1.5")],
            "AAA",
            "DDD",
        );
        assert_relative_eq!(compound(&p, 1.0), 3.375);
        assert_eq!(convert(&p, 1), 3);
    }

    #[test]
    fn test_final_rounding_half_away_from_zero() {
        let p = path(&[("AAA", "BBB", "2.5")], "AAA", "BBB");
        assert_eq!(convert(&p, 1), 3);
    }

    #[test]
    fn test_tiny_rate_collapses_to_zero() {
        let p = path(&[("AAA", "BBB", "200000")], "BBB", "AAA");
        assert_eq!(convert(&p, 1000), 0);
    }
}
