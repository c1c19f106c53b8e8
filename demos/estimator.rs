//! Evaluate both sketches against Zipfian streams and, when a path is given, against the words
//! of a text file:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example estimator -- dracula.txt
//! ```
use cardinality_sketches::experiment::{run_sweep, words, ExperimentRecord, SweepConfig};
use cardinality_sketches::zipf::{Zipf, DEFAULT_ALPHAS, DEFAULT_DISTINCT, DEFAULT_STREAM_LEN};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tabled::settings::{Settings, Style};
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[derive(Tabled)]
struct Row {
    input: String,
    kind: String,
    parameter: usize,
    estimate: String,
    actual: usize,
    relative_error: String,
}

impl Row {
    fn new(input: &str, record: &ExperimentRecord) -> Self {
        Self {
            input: input.to_string(),
            kind: record.kind.to_string(),
            parameter: record.parameter,
            estimate: format!("{:.1}", record.estimate),
            actual: record.actual,
            relative_error: format!("{:.4}", record.relative_error),
        }
    }
}

fn sweep_both<T>(
    input: &str,
    items: &[T],
    rows: &mut Vec<Row>,
) -> Result<(), Box<dyn std::error::Error>>
where
    T: std::hash::Hash + Eq + Clone,
{
    for config in [
        SweepConfig::hyperloglog(),
        SweepConfig::hyperloglog_from_error_rate(),
        SweepConfig::recordinality(),
    ] {
        for record in run_sweep(items, &config)? {
            rows.push(Row::new(input, &record));
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rows = Vec::new();
    let mut rng = StdRng::seed_from_u64(12345);
    for alpha in DEFAULT_ALPHAS {
        let zipf = Zipf::new(DEFAULT_DISTINCT, alpha)?;
        let stream = zipf.stream(&mut rng, DEFAULT_STREAM_LEN);
        sweep_both(&format!("zipf alpha={alpha}"), &stream, &mut rows)?;
    }

    if let Some(path) = std::env::args().nth(1) {
        let text = std::fs::read_to_string(&path)?;
        let items: Vec<&str> = words(&text).collect();
        sweep_both(&path, &items, &mut rows)?;
    }

    let table_config = Settings::default().with(Style::markdown());
    println!("{}", Table::new(rows).with(table_config));
    Ok(())
}
