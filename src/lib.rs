//! # rusty_fxgraph
//!
//! Currency conversion over a sparse set of exchange rates.
//!
//! Currencies are nodes, rates are edges (each rate is usable in both
//! directions, the reverse one at the reciprocal rate), and an amount is
//! converted along the path with the **fewest hops** between source and
//! destination. The path is not optimised for the best compounded rate.
//!
//! ## Example
//!
//! ```rust
//! use rusty_fxgraph::prelude::*;
//!
//! let input = "EUR;100;JPY\n2\nEUR;USD;1.1000\nUSD;JPY;150.0000\n";
//! let file = RateFile::from_reader(input.as_bytes()).unwrap();
//! let conversion = file.run().unwrap();
//!
//! assert_eq!(conversion.result, 16500);
//! assert_eq!(conversion.hop_count(), 2);
//! ```

pub mod currency;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod input;
pub mod rates;
pub mod request;
pub mod solver;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::currency::{decode, encode, CurrencyKey, Ticker};
    pub use crate::error::{FxGraphError, Result};
    pub use crate::evaluator::{compound, convert, round_rate};
    pub use crate::graph::{ExchangeGraph, RateEdge};
    pub use crate::input::{convert_file, RateFile};
    pub use crate::rates::{validate, ExchangeRate, RateTable, RawRate};
    pub use crate::request::{run_request, Conversion, ConversionRequest, ConversionStep};
    pub use crate::solver::{solve, Hop, PathResult};
}
