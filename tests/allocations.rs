#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use cardinality_sketches::{HyperLogLog, Recordinality};
use hyperloglogplus::{HyperLogLog as HyperLogLogTrait, HyperLogLogPlus};
use std::hash::BuildHasherDefault;
use tabled::{
    settings::{Settings, Style},
    Table, Tabled,
};
use wyhash::WyHash;

#[derive(Tabled)]
struct Record {
    cardinality: usize,
    hyperloglog: String,
    recordinality: String,
    hyperloglogplus: String,
}

struct Usage {
    size: usize,
    max_bytes: usize,
    total_blocks: u64,
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.size, self.max_bytes, self.total_blocks)
    }
}

fn measure_memory_usage<T>(
    cardinality: usize,
    create: impl Fn() -> T,
    insert: impl Fn(&mut T, &usize),
) -> Usage
where
    T: Sized,
{
    let _profiler = dhat::Profiler::builder().testing().build();
    let mut estimator = create();
    for i in 0..cardinality {
        insert(&mut estimator, &i);
    }
    let stats = dhat::HeapStats::get();
    Usage {
        size: std::mem::size_of::<T>(),
        max_bytes: stats.max_bytes,
        total_blocks: stats.total_blocks,
    }
}

#[test]
fn test_allocations() {
    let mut records = Vec::new();
    for cardinality in std::iter::once(0)
        .chain((0..).map(|c| 1 << c))
        .take_while(|&c| c <= 1 << 18)
    {
        let hyperloglog = measure_memory_usage(
            cardinality,
            || HyperLogLog::<WyHash>::new(4096).unwrap(),
            |est, i| est.insert(i),
        );
        // registers are allocated once, whatever the cardinality
        assert!(
            (4096..4096 + 1024).contains(&hyperloglog.max_bytes),
            "cardinality = {cardinality} usage = {hyperloglog}"
        );

        let recordinality = measure_memory_usage(
            cardinality,
            || Recordinality::<usize>::new(64).unwrap(),
            |est, i| est.insert(i),
        );
        // at most 64 records are kept
        assert!(
            recordinality.max_bytes < 64 * 1024,
            "cardinality = {cardinality} usage = {recordinality}"
        );

        let hyperloglogplus = measure_memory_usage(
            cardinality,
            || {
                HyperLogLogPlus::<usize, _>::new(12, BuildHasherDefault::<WyHash>::default())
                    .unwrap()
            },
            |est, i| est.insert(i),
        );

        records.push(Record {
            cardinality,
            hyperloglog: hyperloglog.to_string(),
            recordinality: recordinality.to_string(),
            hyperloglogplus: hyperloglogplus.to_string(),
        });
    }

    let table_config = Settings::default().with(Style::markdown());
    let markdown = Table::new(records).with(table_config).to_string();
    println!("{}", markdown);
}
