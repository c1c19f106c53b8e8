//! # Hashing contract
//!
//! Both sketches map every item to a 64-bit value that is deterministic within a process and
//! approximately uniform over `[0, 2^64)`. The hash function is a type parameter `H: Hasher + Default`
//! on each sketch, so any hasher can be plugged in without touching sketch logic. `WyHash` is the
//! default.
//!
//! Collisions between distinct items are not detected: they are an accepted source of estimation
//! error, exactly like collisions inside HyperLogLog registers.

use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

/// Hash `item` with a freshly built `H` hasher
#[inline]
pub(crate) fn hash_item<H, T>(build_hasher: &BuildHasherDefault<H>, item: &T) -> u64
where
    H: Hasher + Default,
    T: Hash + ?Sized,
{
    let mut hasher = build_hasher.build_hasher();
    item.hash(&mut hasher);
    hasher.finish()
}

/// Hasher returning the integer written into it unchanged.
///
/// Integers hash to themselves (`5u64` hashes to `5`), which makes record ordering predictable in
/// worked examples. Longer inputs such as strings are folded into the state 8 bytes at a time.
/// It is not uniform and should not be used to estimate real streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl IdentityHasher {
    /// Fold `bits` wide integer into the state; the first write leaves the integer as is.
    #[inline]
    fn fold(&mut self, value: u64, bits: u32) {
        self.0 = self.0.rotate_left(bits) ^ value;
    }
}

impl Hasher for IdentityHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            self.fold(u64::from_le_bytes(buf), 8 * chunk.len() as u32);
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.fold(u64::from(i), 8);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.fold(u64::from(i), 16);
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.fold(u64::from(i), 32);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.fold(i, 64);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64, usize::BITS);
    }
}
