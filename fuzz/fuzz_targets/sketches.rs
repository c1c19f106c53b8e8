#![no_main]

use cardinality_sketches::{HyperLogLog, Recordinality};
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut hll1 = HyperLogLog::<wyhash::WyHash>::new(64).unwrap();
    let mut hll_all = HyperLogLog::<wyhash::WyHash>::new(64).unwrap();
    let mut rec = Recordinality::<&[u8]>::new(8).unwrap();
    for chunk in first_half.chunks(4) {
        hll1.insert(chunk);
        hll_all.insert(chunk);
        rec.insert(&chunk);
        assert!(hll1.estimate() > 0.0);
        assert!(rec.estimate() >= rec.len() as f64);
    }

    let mut hll2 = HyperLogLog::<wyhash::WyHash>::new(64).unwrap();
    for chunk in second_half.chunks(4) {
        hll2.insert(chunk);
        hll_all.insert(chunk);
        rec.insert(&chunk);
        assert!(hll2.estimate() > 0.0);
        assert!(rec.len() <= rec.k());
    }

    hll1.merge(&hll2).unwrap();
    assert_eq!(hll1, hll_all);
    assert!(hll1.registers().iter().all(|&r| r <= 64 - 6 + 1));
});
