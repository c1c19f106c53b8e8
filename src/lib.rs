//! `cardinality-sketches` estimates the number of distinct elements in a stream or dataset with
//! sublinear memory, using one of two independent sketches:
//!
//! - [`HyperLogLog`] with `m` registers: expected relative error `1.04 / sqrt(m)`, exactly
//!   mergeable, `m` bytes of state.
//! - [`Recordinality`] with `k` records: keeps the `k` distinct items with the largest hashes
//!   and counts how often that set changed. Exact below `k` distinct items, not mergeable.
//!
//! Both hash items with a pluggable `H: Hasher + Default` (`WyHash` by default) and implement
//! [`CardinalitySketch`]. [`Sketch`] selects either kind at runtime.
//!
//! ```rust
//! use cardinality_sketches::{HyperLogLog, Recordinality};
//!
//! let mut hll: HyperLogLog = HyperLogLog::new(1024).unwrap();
//! let mut rec: Recordinality<u64> = Recordinality::new(64).unwrap();
//! for i in 0..10_000u64 {
//!     hll.insert(&(i % 5_000));
//!     rec.insert(&(i % 5_000));
//! }
//! assert!((hll.estimate() - 5_000.0).abs() < 5_000.0 * 0.2);
//! assert!(rec.estimate() > 0.0);
//! ```
//!
//! Sketches are single-writer. To ingest in parallel build one `HyperLogLog` per worker
//! and [`merge`](HyperLogLog::merge) them.
pub mod accuracy;
mod error;
pub mod experiment;
pub mod hash;
pub mod hyperloglog;
pub mod recordinality;
pub mod sketch;
pub mod zipf;

pub use error::SketchError;
pub use hyperloglog::HyperLogLog;
pub use recordinality::Recordinality;
pub use sketch::{CardinalitySketch, Estimate, Sketch, SketchKind};
