//! ## Recordinality sketch
//! Estimates cardinality from the number of times the set of `k` largest hashes changed.
//!
//! [Recordinality paper](https://arxiv.org/abs/1308.1216)
//!
//! The sketch keeps the records `S`: up to `k` distinct items with the largest hash values seen
//! so far, and the record counter `R`:
//! - the first `k` distinct items fill `S` regardless of their hashes, after which `R = k`;
//! - afterwards an item whose hash is larger than the smallest hash in `S` and which is not
//!   already in `S` evicts the record with the smallest hash and increments `R`.
//!
//! With a uniform hash `R` grows like `k * ln(n / k)`, and `k * (1 + 1/k)^(R - k + 1) - 1`
//! is an estimate of the number `n` of distinct items.
//!
//! Below `k` distinct items the sketch counts exactly and the estimate is `|S|`.
//!
//! Unlike HyperLogLog the sketch is not mergeable: `R` depends on the order in which records
//! were replaced, which can not be recovered from two independently built sketches.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasherDefault, Hash, Hasher};

use tracing::{debug, trace};
use wyhash::WyHash;

use crate::error::SketchError;
use crate::hash::hash_item;

/// Recordinality sketch keeping the `k` distinct items with the largest hashes under `H`.
///
/// Each time an item enters the record set the record counter grows, and the estimate is
/// derived from that counter alone. Record counts depend on arrival order, so two sketches
/// cannot be merged.
pub struct Recordinality<T, H: Hasher + Default = WyHash> {
    /// Maximum number of records
    k: usize,
    /// Records keyed by hash and arrival order, the first entry has the smallest hash
    records: BTreeMap<(u64, u64), T>,
    /// Records used for membership checks by value
    members: HashSet<T>,
    /// Number of items that ever became records, equals `R` once `S` is full
    record_count: u64,
    /// Zero-sized build hasher
    build_hasher: BuildHasherDefault<H>,
}

impl<T, H> Recordinality<T, H>
where
    T: Hash + Eq + Clone,
    H: Hasher + Default,
{
    /// Creates new `Recordinality` sketch keeping up to `k` records.
    pub fn new(k: usize) -> Result<Self, SketchError> {
        if k < 1 {
            return Err(SketchError::invalid("k", "record count must be at least 1"));
        }
        debug!(k, "creating recordinality sketch");

        Ok(Self {
            k,
            records: BTreeMap::new(),
            members: HashSet::new(),
            record_count: 0,
            build_hasher: BuildHasherDefault::default(),
        })
    }

    /// Insert an item into `Recordinality`.
    ///
    /// Item is cloned only when it becomes a record.
    pub fn insert<Q>(&mut self, item: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = T> + ?Sized,
    {
        if self.members.contains(item) {
            return;
        }
        let hash = hash_item(&self.build_hasher, item);

        if !self.is_full() {
            self.push_record(hash, item.to_owned());
            if self.is_full() {
                trace!(k = self.k, "recordinality records filled");
            }
            return;
        }

        // `S` is full, so there always is a smallest record
        let Some(smallest) = self.records.first_entry() else {
            return;
        };
        if hash <= smallest.key().0 {
            return;
        }
        let evicted = smallest.remove();
        self.members.remove::<T>(&evicted);
        self.push_record(hash, item.to_owned());
    }

    /// Add a new record and count it
    #[inline]
    fn push_record(&mut self, hash: u64, item: T) {
        self.records.insert((hash, self.record_count), item.clone());
        self.members.insert(item);
        self.record_count += 1;
    }

    /// Return cardinality estimate.
    ///
    /// Once `k` records are kept this is `k * (1 + 1/k)^(R - k + 1) - 1`,
    /// before that it is the exact number of distinct items seen.
    pub fn estimate(&self) -> f64 {
        match self.record_count() {
            Some(r) => {
                let k = self.k as f64;
                let exponent = (r - self.k as u64 + 1) as f64;
                k * (1.0 + 1.0 / k).powf(exponent) - 1.0
            }
            None => self.len() as f64,
        }
    }

    /// Return record counter `R`, or `None` while fewer than `k` records are kept
    #[inline]
    pub fn record_count(&self) -> Option<u64> {
        self.is_full().then_some(self.record_count)
    }

    /// Return maximum number of records `k`
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Return number of records currently kept
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return whether nothing was inserted yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return whether `k` records are kept
    #[inline]
    pub fn is_full(&self) -> bool {
        self.records.len() == self.k
    }

    /// Return smallest hash among the records
    #[inline]
    pub fn min_record_hash(&self) -> Option<u64> {
        self.records.keys().next().map(|&(hash, _)| hash)
    }

    /// Return whether `item` is currently a record
    #[inline]
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.members.contains(item)
    }

    /// Return records ordered by ascending hash
    pub fn records(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.values()
    }
}

impl<T: Clone, H: Hasher + Default> Clone for Recordinality<T, H> {
    fn clone(&self) -> Self {
        Self {
            k: self.k,
            records: self.records.clone(),
            members: self.members.clone(),
            record_count: self.record_count,
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<T, H> Debug for Recordinality<T, H>
where
    T: Hash + Eq + Clone,
    H: Hasher + Default,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ k: {}, records: {}, record_count: {:?}, estimate: {:.3} }}",
            self.k,
            self.len(),
            self.record_count(),
            self.estimate()
        )
    }
}
