use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use enum_dispatch::enum_dispatch;

use crate::error::SketchError;
use crate::hyperloglog::HyperLogLog;
use crate::recordinality::Recordinality;

/// Read side shared by all distinct count sketches.
#[enum_dispatch(Sketch<T>)]
pub trait Estimate {
    /// Return cardinality estimate
    fn estimate(&self) -> f64;
    /// Return whether nothing was inserted yet
    fn is_empty(&self) -> bool;
}

/// Distinct count sketch over items of type `T`.
pub trait CardinalitySketch<T: ?Sized>: Estimate {
    /// Insert an item, repeated items do not change the sketch
    fn insert(&mut self, item: &T);
}

/// Sketch types which can be selected at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SketchKind {
    /// Parameterized by register count `m`
    HyperLogLog,
    /// Parameterized by record count `k`
    Recordinality,
}

/// Sketch of either kind with the default hasher
#[derive(Debug, Clone)]
#[enum_dispatch]
pub enum Sketch<T: Hash + Eq + Clone> {
    HyperLogLog(HyperLogLog),
    Recordinality(Recordinality<T>),
}

impl<T: Hash + Eq + Clone> Sketch<T> {
    /// Creates new sketch of `kind` with structural `parameter` (`m` or `k`)
    pub fn new(kind: SketchKind, parameter: usize) -> Result<Self, SketchError> {
        Ok(match kind {
            SketchKind::HyperLogLog => Sketch::HyperLogLog(HyperLogLog::new(parameter)?),
            SketchKind::Recordinality => Sketch::Recordinality(Recordinality::new(parameter)?),
        })
    }

    /// Return kind of the sketch
    pub fn kind(&self) -> SketchKind {
        match self {
            Sketch::HyperLogLog(_) => SketchKind::HyperLogLog,
            Sketch::Recordinality(_) => SketchKind::Recordinality,
        }
    }
}

impl<T: Hash + Eq + Clone> CardinalitySketch<T> for Sketch<T> {
    #[inline]
    fn insert(&mut self, item: &T) {
        match self {
            Sketch::HyperLogLog(hll) => hll.insert(item),
            Sketch::Recordinality(rec) => rec.insert(item),
        }
    }
}

impl<H: Hasher + Default> Estimate for HyperLogLog<H> {
    #[inline]
    fn estimate(&self) -> f64 {
        HyperLogLog::estimate(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        HyperLogLog::is_empty(self)
    }
}

impl<T, H> CardinalitySketch<T> for HyperLogLog<H>
where
    T: Hash + ?Sized,
    H: Hasher + Default,
{
    #[inline]
    fn insert(&mut self, item: &T) {
        HyperLogLog::insert(self, item);
    }
}

impl<T, H> Estimate for Recordinality<T, H>
where
    T: Hash + Eq + Clone,
    H: Hasher + Default,
{
    #[inline]
    fn estimate(&self) -> f64 {
        Recordinality::estimate(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Recordinality::is_empty(self)
    }
}

impl<T, H> CardinalitySketch<T> for Recordinality<T, H>
where
    T: Hash + Eq + Clone,
    H: Hasher + Default,
{
    #[inline]
    fn insert(&mut self, item: &T) {
        Recordinality::insert(self, item);
    }
}

impl Display for SketchKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SketchKind::HyperLogLog => f.write_str("hyperloglog"),
            SketchKind::Recordinality => f.write_str("recordinality"),
        }
    }
}
