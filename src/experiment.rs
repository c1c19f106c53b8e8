//! # Evaluation harness
//!
//! Thin driver over [`Sketch`] which measures how close estimates come to the exact number of
//! distinct items while the structural parameter (`m` or `k`) is swept:
//!
//! ```rust
//! # use cardinality_sketches::experiment::{run_sweep, words, SweepConfig};
//! let text = "the quick brown fox jumps over the lazy dog";
//! let items: Vec<&str> = words(text).collect();
//! let records = run_sweep(&items, &SweepConfig::recordinality()).unwrap();
//! assert!(records.iter().all(|r| r.actual == 8));
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use tracing::debug;

use crate::accuracy::{absolute_error, error_rate_from_counters, relative_error};
use crate::error::SketchError;
use crate::hyperloglog::HyperLogLog;
use crate::sketch::{CardinalitySketch, Sketch, SketchKind};

/// Default structural parameters: 8, 16, ..., 512
const DEFAULT_PARAMETERS: [usize; 7] = [8, 16, 32, 64, 128, 256, 512];

/// Sketch kind and the structural parameters to evaluate it with
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    pub kind: SketchKind,
    pub parameters: Vec<usize>,
    /// Size HyperLogLog from the error rate `1 / sqrt(m)` instead of using `m` registers
    #[cfg_attr(feature = "with_serde", serde(default))]
    pub from_error_rate: bool,
}

impl SweepConfig {
    /// HyperLogLog with `m` in 8, 16, ..., 512
    pub fn hyperloglog() -> Self {
        Self {
            kind: SketchKind::HyperLogLog,
            parameters: DEFAULT_PARAMETERS.to_vec(),
            from_error_rate: false,
        }
    }

    /// HyperLogLog sized by [`HyperLogLog::with_error_rate`] for the error rate of `m`
    /// counters, with `m` in 8, 16, ..., 512
    pub fn hyperloglog_from_error_rate() -> Self {
        Self {
            from_error_rate: true,
            ..Self::hyperloglog()
        }
    }

    /// Build a fresh sketch for one structural parameter
    pub fn build<T>(&self, parameter: usize) -> Result<Sketch<T>, SketchError>
    where
        T: Hash + Eq + Clone,
    {
        match self.kind {
            SketchKind::HyperLogLog if self.from_error_rate => Ok(Sketch::HyperLogLog(
                HyperLogLog::with_error_rate(error_rate_from_counters(parameter))?,
            )),
            kind => Sketch::new(kind, parameter),
        }
    }

    /// Recordinality with `k` in 8, 16, ..., 512
    pub fn recordinality() -> Self {
        Self {
            kind: SketchKind::Recordinality,
            parameters: DEFAULT_PARAMETERS.to_vec(),
            from_error_rate: false,
        }
    }
}

/// Outcome of a single sketch evaluated against the exact count
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize))]
pub struct ExperimentRecord {
    pub kind: SketchKind,
    /// Register count `m` or record count `k`
    pub parameter: usize,
    pub estimate: f64,
    pub actual: usize,
    pub error: f64,
    pub relative_error: f64,
}

/// Split text into words, i.e. maximal runs of alphanumeric characters and `_`
pub fn words(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
}

/// Return exact number of distinct items
pub fn exact_cardinality<T: Hash + Eq>(items: &[T]) -> usize {
    items.iter().collect::<HashSet<_>>().len()
}

/// Feed all items to the sketch once and return its estimate
pub fn estimate_with<T, S>(sketch: &mut S, items: &[T]) -> f64
where
    S: CardinalitySketch<T>,
{
    for item in items {
        sketch.insert(item);
    }
    sketch.estimate()
}

/// Evaluate a fresh sketch for every parameter in `config` over the same items
pub fn run_sweep<T>(
    items: &[T],
    config: &SweepConfig,
) -> Result<Vec<ExperimentRecord>, SketchError>
where
    T: Hash + Eq + Clone,
{
    let actual = exact_cardinality(items);
    debug!(kind = %config.kind, items = items.len(), actual, "running sweep");

    config
        .parameters
        .iter()
        .map(|&parameter| -> Result<ExperimentRecord, SketchError> {
            let mut sketch = config.build::<T>(parameter)?;
            let estimate = estimate_with(&mut sketch, items);
            let record = ExperimentRecord {
                kind: config.kind,
                parameter,
                estimate,
                actual,
                error: absolute_error(estimate, actual),
                relative_error: relative_error(estimate, actual),
            };
            debug!(
                kind = %config.kind,
                parameter,
                estimate,
                relative_error = record.relative_error,
                "evaluated sketch"
            );
            Ok(record)
        })
        .collect()
}
