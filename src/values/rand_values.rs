/*!
 * Random Value Builder
 *
 * Chainable builder for the value streams the trials consume: sparse random
 * keys for pre-population and write targets, identical booleans for
 * operation-mix flag vectors, consecutive ranges, and uniform shuffles.
 *
 * # Reproducibility
 *
 * A builder created with [`RandValues::seeded`] produces identical streams
 * across runs; [`RandValues::new`] seeds from OS entropy. Generation is total
 * over its domain and never touches a store.
 */

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Chainable random value stream builder.
///
/// Once materialized, a stream's length and multiset of values are fixed;
/// shuffling permutes in place but never duplicates or drops elements.
pub struct RandValues<T> {
    values: Vec<T>,
    rng: StdRng,
}

impl<T> RandValues<T> {
    /// Empty builder seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Empty builder with a fixed seed, for reproducible streams.
    pub fn seeded(seed: u64) -> Self {
        Self {
            values: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of values accumulated so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Materialized values.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Consume the builder, yielding the materialized stream.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T: Copy> RandValues<T>
where
    Standard: Distribution<T>,
{
    /// Append `n` values drawn uniformly from the type's full range.
    ///
    /// At the stream lengths the driver uses, draws from the full 32-bit
    /// space are effectively collision-free, so pre-population keys and
    /// write targets stay disjoint.
    pub fn add_sparse(mut self, n: usize) -> Self {
        self.values.reserve(n);
        for _ in 0..n {
            self.values.push(self.rng.gen());
        }
        self
    }
}

impl<T: Copy> RandValues<T> {
    /// Append `value` repeated `n` times.
    ///
    /// Boolean flag vectors for operation mixes are built this way: `n` true
    /// flags for one role interleaved (after a shuffle) with `m` false flags
    /// for another.
    pub fn add_identical(mut self, value: T, n: usize) -> Self {
        self.values.resize(self.values.len() + n, value);
        self
    }

    /// Uniformly permute the accumulated values in place.
    ///
    /// Callable repeatedly; each call is an independent permutation.
    pub fn shuffle(mut self) -> Self {
        self.values.shuffle(&mut self.rng);
        self
    }

    /// Fresh independent permutation of the accumulated values.
    ///
    /// Leaves the builder's own stream untouched, so distinct trials can each
    /// take their own ordering of the same multiset.
    pub fn permutation(&mut self) -> Vec<T> {
        let mut out = self.values.clone();
        out.shuffle(&mut self.rng);
        out
    }
}

macro_rules! impl_add_range {
    ($($t:ty),*) => {
        $(
            impl RandValues<$t> {
                /// Append the exact integers `[start, start + n)`.
                pub fn add_range(mut self, start: $t, n: usize) -> Self {
                    self.values.extend((0..n).map(|i| start + i as $t));
                    self
                }
            }
        )*
    };
}

impl_add_range!(i32, i64);

impl<T> Default for RandValues<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn sparse_produces_requested_length() {
        let vals = RandValues::<i32>::seeded(7).add_sparse(10_000).into_vec();
        assert_eq!(vals.len(), 10_000);
    }

    #[test]
    fn sparse_is_effectively_collision_free() {
        let vals = RandValues::<i32>::seeded(7).add_sparse(100_000).into_vec();
        let mut sorted = vals.clone();
        sorted.sort_unstable();
        sorted.dedup();
        // Birthday bound over 2^32 keeps duplicates to a handful at 100k draws.
        assert!(vals.len() - sorted.len() < 10);
    }

    #[test]
    fn identical_repeats_one_value() {
        let flags = RandValues::seeded(1)
            .add_identical(true, 3)
            .add_identical(false, 2)
            .into_vec();
        assert_eq!(flags, vec![true, true, true, false, false]);
    }

    #[test]
    fn range_is_exact() {
        let vals = RandValues::<i32>::seeded(1).add_range(5, 4).into_vec();
        assert_eq!(vals, vec![5, 6, 7, 8]);
    }

    #[test]
    fn seeded_streams_are_reproducible() {
        let a = RandValues::<i64>::seeded(99).add_sparse(1000).into_vec();
        let b = RandValues::<i64>::seeded(99).add_sparse(1000).into_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn permutations_are_independent_but_same_multiset() {
        let mut builder = RandValues::<i32>::seeded(3).add_range(0, 512);
        let first = builder.permutation();
        let second = builder.permutation();
        assert_ne!(first, second);

        let mut a = first;
        let mut b = second;
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(seed: u64, len in 0usize..500) {
            let original = RandValues::<i32>::seeded(seed).add_sparse(len).into_vec();
            let mut builder = RandValues::<i32>::seeded(seed).add_sparse(len);
            builder = builder.shuffle();
            let shuffled = builder.into_vec();

            let mut a = original;
            let mut b = shuffled;
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);
        }
    }
}
