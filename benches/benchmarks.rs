use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rusty_fxgraph::prelude::*;

/// Ticker for the i-th synthetic currency ("AAA", "AAB", ...)
fn synthetic_ticker(i: usize) -> String {
    let letter = |n: usize| (b'A' + (n % 26) as u8) as char;
    [letter(i / 676), letter(i / 26), letter(i)].iter().collect()
}

/// Rate lines forming a single chain of `n` currencies
fn chain_rates(n: usize) -> Vec<RawRate> {
    (0..n - 1)
        .map(|i| {
            RawRate::new(
                i + 3,
                synthetic_ticker(i),
                synthetic_ticker(i + 1),
                format!("{:.4}", 1.0 + (i % 7) as f64 / 100.0),
            )
        })
        .collect()
}

/// Rate lines forming a `side` x `side` grid
fn grid_rates(side: usize) -> Vec<RawRate> {
    let mut rates = Vec::new();
    for row in 0..side {
        for col in 0..side {
            let here = row * side + col;
            if col + 1 < side {
                rates.push(RawRate::new(
                    rates.len() + 3,
                    synthetic_ticker(here),
                    synthetic_ticker(here + 1),
                    "1.0100",
                ));
            }
            if row + 1 < side {
                rates.push(RawRate::new(
                    rates.len() + 3,
                    synthetic_ticker(here),
                    synthetic_ticker(here + side),
                    "0.9900",
                ));
            }
        }
    }
    rates
}

fn benchmark_chain_conversion(c: &mut Criterion) {
    let rates = chain_rates(500);
    let request = ConversionRequest::new(
        Ticker::parse(&synthetic_ticker(0)).unwrap(),
        1_000_000,
        Ticker::parse(&synthetic_ticker(499)).unwrap(),
    );

    c.bench_function("chain_500_conversion", |b| {
        b.iter(|| run_request(black_box(request), rates.len(), black_box(&rates)).unwrap());
    });
}

fn benchmark_grid_solve(c: &mut Criterion) {
    let rates = grid_rates(40);
    let table = validate(rates.len(), &rates).unwrap();
    let graph = ExchangeGraph::build(&table);
    let source = graph
        .node_index(Ticker::parse(&synthetic_ticker(0)).unwrap().key())
        .unwrap();
    let destination = graph
        .node_index(Ticker::parse(&synthetic_ticker(40 * 40 - 1)).unwrap().key())
        .unwrap();

    c.bench_function("grid_40x40_solve", |b| {
        b.iter(|| solve(black_box(&graph), source, destination).unwrap());
    });
}

fn benchmark_graph_build(c: &mut Criterion) {
    let rates = grid_rates(40);
    let table = validate(rates.len(), &rates).unwrap();

    c.bench_function("grid_40x40_build", |b| {
        b.iter(|| ExchangeGraph::build(black_box(&table)));
    });
}

criterion_group!(
    benches,
    benchmark_chain_conversion,
    benchmark_grid_solve,
    benchmark_graph_build
);
criterion_main!(benches);
