//! ## HyperLogLog sketch
//! Estimates cardinality with `M` registers, where `M` is a power of two in `[2, 2^18]`.
//!
//! [Original HyperLogLog paper](https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
//!
//! Hash layout (64-bit hash `h`, `P = log2(M)`):
//! - top `P` bits      - register index
//! - low `64 - P` bits - rank is the number of leading zeros of these bits plus one,
//!   or `64 - P + 1` when they are all zero.
//!
//! Each register keeps the maximum rank seen for its index, so registers never decrease.
//! Number of zero registers and the harmonic sum `Σ 2^-register` are updated together with
//! the registers, which keeps `estimate` constant time. The sum is kept exactly as an integer
//! scaled by `2^64`, so it does not drift however many ranks are raised.
//!
//! Two sketches with the same `M` merge exactly: the pointwise maximum of their registers is
//! the sketch of the concatenated streams.

use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasherDefault, Hash, Hasher};
use std::mem::{size_of, size_of_val};

use tracing::debug;
use wyhash::WyHash;

use crate::error::SketchError;
use crate::hash::hash_item;

/// Largest supported precision, i.e. `M <= 2^18` registers.
pub const MAX_PRECISION: u32 = 18;
/// `2^64` as `f64`, the size of the hash space.
const HASH_SPACE: f64 = 18_446_744_073_709_551_616.0;

/// HyperLogLog sketch hashing items with `H`.
pub struct HyperLogLog<H: Hasher + Default = WyHash> {
    /// Number of hash bits used for register index
    precision: u32,
    /// Register ranks, one byte per register
    registers: Box<[u8]>,
    /// Number of registers still set to 0
    zeros: usize,
    /// Harmonic sum of registers scaled by `2^64`
    harmonic_sum: u128,
    /// Zero-sized build hasher
    build_hasher: BuildHasherDefault<H>,
}

impl<H: Hasher + Default> HyperLogLog<H> {
    /// Creates new `HyperLogLog` sketch with `m` registers.
    ///
    /// `m` must be a power of two in `[2, 2^18]`.
    pub fn new(m: usize) -> Result<Self, SketchError> {
        if m < 2 || !m.is_power_of_two() {
            return Err(SketchError::invalid(
                "m",
                format!("register count must be a power of two >= 2, got {m}"),
            ));
        }
        let precision = m.trailing_zeros();
        if precision > MAX_PRECISION {
            return Err(SketchError::invalid(
                "m",
                format!("register count must not exceed 2^{MAX_PRECISION}, got {m}"),
            ));
        }
        debug!(m, precision, "creating hyperloglog sketch");

        Ok(Self {
            precision,
            registers: vec![0u8; m].into_boxed_slice(),
            zeros: m,
            harmonic_sum: (m as u128) << 64,
            build_hasher: BuildHasherDefault::default(),
        })
    }

    /// Creates new `HyperLogLog` sketch with the smallest register count whose
    /// expected standard error `1.04 / sqrt(m)` does not exceed `error_rate`.
    pub fn with_error_rate(error_rate: f64) -> Result<Self, SketchError> {
        if !(error_rate > 0.0 && error_rate < 1.0) {
            return Err(SketchError::invalid(
                "error_rate",
                format!("must be in (0, 1), got {error_rate}"),
            ));
        }
        let precision = (1.04 / error_rate).powi(2).log2().ceil().max(1.0);
        if precision > f64::from(MAX_PRECISION) {
            return Err(SketchError::invalid(
                "error_rate",
                format!("{error_rate} needs more than 2^{MAX_PRECISION} registers"),
            ));
        }
        Self::new(1 << precision as u32)
    }

    /// Insert a hashable item into `HyperLogLog`
    #[inline]
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        let hash = hash_item(&self.build_hasher, item);
        self.insert_hash(hash);
    }

    /// Insert hash into `HyperLogLog`
    #[inline]
    pub fn insert_hash(&mut self, hash: u64) {
        let (idx, rank) = self.decode_hash(hash);
        self.update_rank(idx, rank);
    }

    /// Return register index and rank of the hash
    #[inline]
    fn decode_hash(&self, hash: u64) -> (usize, u8) {
        let idx = (hash >> (64 - self.precision)) as usize;
        let rest = hash << self.precision;
        let rank = if rest == 0 {
            64 - self.precision + 1
        } else {
            rest.leading_zeros() + 1
        };
        (idx, rank as u8)
    }

    /// Raise register `idx` to `new_rank` if it is larger than the current rank
    #[inline]
    fn update_rank(&mut self, idx: usize, new_rank: u8) {
        let old_rank = self.registers[idx];
        if new_rank <= old_rank {
            return;
        }
        self.registers[idx] = new_rank;

        // Update number of zero registers and harmonic sum
        if old_rank == 0 {
            self.zeros -= 1;
        }
        self.harmonic_sum -= scaled_inverse_pow2(old_rank);
        self.harmonic_sum += scaled_inverse_pow2(new_rank);
    }

    /// Return cardinality estimate
    ///
    /// Raw harmonic mean estimate is replaced with linear counting in the small range
    /// and corrected for hash space saturation in the large range.
    pub fn estimate(&self) -> f64 {
        let m = self.registers.len();
        if self.zeros == m {
            return 0.0;
        }

        let m_f64 = m as f64;
        let raw = alpha(m) * m_f64 * m_f64 / self.harmonic_sum();

        if raw <= 2.5 * m_f64 && self.zeros > 0 {
            return linear_counting(m, self.zeros);
        }
        if raw > HASH_SPACE / 30.0 {
            return large_range_correction(raw);
        }
        raw
    }

    /// Return harmonic sum `Σ 2^-register`
    #[inline]
    fn harmonic_sum(&self) -> f64 {
        self.harmonic_sum as f64 / HASH_SPACE
    }

    /// Merge `rhs` into `self` by taking the maximum of each register pair.
    ///
    /// Fails if sketches have different number of registers.
    pub fn merge(&mut self, rhs: &Self) -> Result<(), SketchError> {
        if self.precision != rhs.precision {
            return Err(SketchError::RegisterCountMismatch {
                lhs: self.num_registers(),
                rhs: rhs.num_registers(),
            });
        }
        for (idx, &rhs_rank) in rhs.registers.iter().enumerate() {
            self.update_rank(idx, rhs_rank);
        }
        Ok(())
    }

    /// Return number of registers `m`
    #[inline]
    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    /// Return number of hash bits used for register index, `log2(m)`
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Return register ranks
    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Return largest rank a register can hold, `64 - log2(m) + 1`
    #[inline]
    pub fn max_rank(&self) -> u8 {
        (64 - self.precision + 1) as u8
    }

    /// Return whether nothing was inserted yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zeros == self.registers.len()
    }

    /// Return memory size of `HyperLogLog`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(&*self.registers)
    }
}

impl<H: Hasher + Default> Clone for HyperLogLog<H> {
    fn clone(&self) -> Self {
        Self {
            precision: self.precision,
            registers: self.registers.clone(),
            zeros: self.zeros,
            harmonic_sum: self.harmonic_sum,
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<H: Hasher + Default> PartialEq for HyperLogLog<H> {
    /// Sketches are equal when their registers are equal
    fn eq(&self, rhs: &Self) -> bool {
        self.registers == rhs.registers
    }
}

impl<H: Hasher + Default> Debug for HyperLogLog<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ m: {}, zeros: {}, estimate: {:.0}, size: {} }}",
            self.num_registers(),
            self.zeros,
            self.estimate(),
            self.size_of()
        )
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Linear counting estimate `m * ln(m / zeros)`
#[inline]
fn linear_counting(m: usize, zeros: usize) -> f64 {
    m as f64 * (m as f64 / zeros as f64).ln()
}

/// Return `2^-rank` scaled by `2^64`, ranks never exceed 64
#[inline]
fn scaled_inverse_pow2(rank: u8) -> u128 {
    1u128 << (64 - u32::from(rank))
}

/// Correct raw estimate `E` for hash collisions with `-2^64 * ln(1 - E / 2^64)`.
///
/// Raw estimates at or above `2^64` are clamped just below it, which keeps the result finite.
#[inline]
fn large_range_correction(raw: f64) -> f64 {
    let ratio = (raw / HASH_SPACE).min(1.0 - f64::EPSILON);
    -HASH_SPACE * (-ratio).ln_1p()
}
