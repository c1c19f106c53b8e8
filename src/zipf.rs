//! ## Zipfian streams
//! Synthetic streams where element `i` in `[1, n]` is drawn with probability proportional to
//! `i^-alpha`. `alpha = 0` yields a uniform stream, larger `alpha` concentrates the stream on
//! the first elements and leaves more of the `n` elements unseen.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::debug;

use crate::error::SketchError;

/// Number of distinct elements of the default synthetic streams
pub const DEFAULT_DISTINCT: usize = 1000;
/// Length of the default synthetic streams
pub const DEFAULT_STREAM_LEN: usize = 10_000;
/// Skew parameters of the default synthetic streams
pub const DEFAULT_ALPHAS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Zipfian distribution over `[1, n]`
#[derive(Debug, Clone)]
pub struct Zipf {
    n: usize,
    alpha: f64,
    index: WeightedIndex<f64>,
}

impl Zipf {
    /// Creates new Zipfian distribution over `n` elements with skew `alpha`
    pub fn new(n: usize, alpha: f64) -> Result<Self, SketchError> {
        if n == 0 {
            return Err(SketchError::invalid("n", "at least one element is required"));
        }
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(SketchError::invalid(
                "alpha",
                format!("must be finite and non-negative, got {alpha}"),
            ));
        }

        let weights = (1..=n).map(|i| (i as f64).powf(-alpha));
        let index =
            WeightedIndex::new(weights).map_err(|e| SketchError::invalid("alpha", e.to_string()))?;
        debug!(n, alpha, "created zipf distribution");

        Ok(Self { n, alpha, index })
    }

    /// Return number of elements
    pub fn n(&self) -> usize {
        self.n
    }

    /// Return skew parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Return `len` draws from the distribution
    pub fn stream<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Vec<usize> {
        (0..len).map(|_| self.sample(rng)).collect()
    }
}

impl Distribution<usize> for Zipf {
    /// Draw an element in `[1, n]`
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index.sample(rng) + 1
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::experiment::exact_cardinality;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    #[test_case(0, 1.0; "no elements")]
    #[test_case(10, -0.5; "negative alpha")]
    #[test_case(10, f64::NAN; "nan alpha")]
    #[test_case(10, f64::INFINITY; "infinite alpha")]
    fn test_invalid(n: usize, alpha: f64) {
        assert!(matches!(
            Zipf::new(n, alpha),
            Err(SketchError::InvalidParameter { .. })
        ));
    }

    #[test_case(0.0)]
    #[test_case(0.25)]
    #[test_case(1.0)]
    #[test_case(2.5)]
    fn test_range(alpha: f64) {
        let zipf = Zipf::new(100, alpha).unwrap();
        let mut rng = StdRng::seed_from_u64(12345);
        let stream = zipf.stream(&mut rng, 10_000);
        assert_eq!(stream.len(), 10_000);
        assert!(stream.iter().all(|&x| (1..=100).contains(&x)));
    }

    #[test]
    fn test_seeded_streams_repeat() {
        let zipf = Zipf::new(DEFAULT_DISTINCT, 0.5).unwrap();
        let a = zipf.stream(&mut StdRng::seed_from_u64(7), 1000);
        let b = zipf.stream(&mut StdRng::seed_from_u64(7), 1000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform() {
        let zipf = Zipf::new(10, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(12345);
        let mut counts = [0usize; 10];
        for x in zipf.stream(&mut rng, 100_000) {
            counts[x - 1] += 1;
        }
        // each element expects 10000 draws with standard deviation below 100
        assert!(counts.iter().all(|&c| (9_500..=10_500).contains(&c)), "{counts:?}");
    }

    #[test]
    fn test_skew() {
        let mut rng = StdRng::seed_from_u64(12345);
        let zipf = Zipf::new(1000, 1.0).unwrap();
        let stream = zipf.stream(&mut rng, 100_000);
        let ones = stream.iter().filter(|&&x| x == 1).count();
        let tens = stream.iter().filter(|&&x| x == 10).count();
        // harmonic number H(1000) is about 7.485, so element 1 has probability about 0.1336
        assert!((12_500..=14_200).contains(&ones), "ones = {ones}");
        assert!(ones > 5 * tens);

        // higher skew leaves fewer distinct elements in a stream of the same length
        let flat = Zipf::new(DEFAULT_DISTINCT, DEFAULT_ALPHAS[0]).unwrap();
        let steep = Zipf::new(DEFAULT_DISTINCT, DEFAULT_ALPHAS[3]).unwrap();
        let flat_distinct = exact_cardinality(&flat.stream(&mut rng, DEFAULT_STREAM_LEN));
        let steep_distinct = exact_cardinality(&steep.stream(&mut rng, DEFAULT_STREAM_LEN));
        assert!(steep_distinct < flat_distinct);
    }
}
