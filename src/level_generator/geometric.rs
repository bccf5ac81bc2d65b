//! Geometric level generator.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

use crate::level_generator::LevelGenerator;

/// Seed used by [`Geometric::default`], and therefore by every list which is
/// not given an explicit generator.
pub const DEFAULT_SEED: u64 = 42;

/// Number of levels assumed by the default generator.
///
/// Lists additionally cap the height of new nodes based on their length, so
/// this only bounds lists with more than `$2^{32}$` elements.
pub const DEFAULT_TOTAL: usize = 32;

/// Probability of promotion used by the default generator.
pub const DEFAULT_P: f64 = 0.5;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The maximum number of levels must be non-zero.
    #[error("max must be non-zero.")]
    ZeroMax,
    /// The maximum number of levels must fit in a pointer-sized bit count.
    #[error("max must be at most {}.", usize::BITS)]
    MaxTooLarge,
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `$n$`,
/// then the probability that it is present at level `$n+1$` is some constant
/// `$p \in (0, 1)$`. This produces a geometric distribution, albeit truncated
/// at the maximum number of levels allowed.
///
/// The generator is generic over its source of randomness. Unless stated
/// otherwise, a [`SmallRng`] seeded with [`DEFAULT_SEED`] is used, which makes
/// the layout of a list a pure function of its insertion sequence.
#[derive(Debug, Clone)]
pub struct Geometric<R = SmallRng> {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The probability that a node is present in the next level.
    p: f64,
    /// The random number generator.
    rng: R,
}

impl Geometric {
    /// Create a new geometric level generator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// The generator is seeded with [`DEFAULT_SEED`].
    ///
    /// # Errors
    ///
    /// `p` must be in `$(0, 1)$` and `total` must be in `$[1, 64]$` (on 64-bit
    /// targets), otherwise a [`GeometricError`] is returned.
    #[inline]
    pub fn new(total: usize, p: f64) -> Result<Self, GeometricError> {
        Self::with_rng(total, p, SmallRng::seed_from_u64(DEFAULT_SEED))
    }

    /// Create the default generator with a different seed.
    ///
    /// Lists built from the same insertion sequence and the same seed always
    /// share their layout.
    #[must_use]
    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    /// Create the default generator seeded from the thread-local entropy
    /// source. Layouts are no longer reproducible across runs.
    #[must_use]
    #[inline]
    pub fn from_entropy() -> Self {
        Self::from_rng(SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> Geometric<R> {
    /// Create a generator with the default parameters drawing from `rng`.
    #[must_use]
    #[inline]
    pub fn from_rng(rng: R) -> Self {
        Geometric {
            total: DEFAULT_TOTAL,
            p: DEFAULT_P,
            rng,
        }
    }

    /// Create a generator with `total` levels and promotion probability `p`,
    /// drawing from `rng`.
    ///
    /// # Errors
    ///
    /// See [`Geometric::new`].
    #[inline]
    pub fn with_rng(total: usize, p: f64, rng: R) -> Result<Self, GeometricError> {
        if total == 0 {
            return Err(GeometricError::ZeroMax);
        }
        if total > usize::BITS as usize {
            return Err(GeometricError::MaxTooLarge);
        }
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(Geometric { total, p, rng })
    }

    /// The probability that a node reaches the next level.
    #[must_use]
    #[inline]
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Default for Geometric {
    #[inline]
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl<R: Rng> LevelGenerator for Geometric<R> {
    #[inline]
    fn total(&self) -> usize {
        self.total
    }

    /// Generate a level for a new node using a geometric distribution.
    ///
    /// Starting from level 0, a coin with bias `$p$` is flipped and the node
    /// is promoted for as long as the coin lands heads, up to `total - 1`.
    #[inline]
    fn level(&mut self) -> usize {
        let mut level = 0;
        while level + 1 < self.total && self.rng.random_bool(self.p) {
            level += 1;
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::{assert_eq, assert_ne};
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;

    use super::{DEFAULT_TOTAL, Geometric, GeometricError, LevelGenerator};

    #[test]
    fn invalid_max() {
        assert_eq!(Geometric::new(0, 0.5).err(), Some(GeometricError::ZeroMax));
        assert_eq!(
            Geometric::new(usize::BITS as usize + 1, 0.5).err(),
            Some(GeometricError::MaxTooLarge)
        );
    }

    #[rstest]
    fn invalid_p(#[values(0.0, 1.0, -0.5, 1.5, f64::NAN)] p: f64) {
        assert_eq!(
            Geometric::new(1, p).err(),
            Some(GeometricError::InvalidProbability)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(GeometricError::ZeroMax.to_string(), "max must be non-zero.");
        assert_eq!(
            GeometricError::InvalidProbability.to_string(),
            "p must be in (0, 1)."
        );
    }

    #[rstest]
    fn levels_in_range(
        #[values(1, 2, 16, 64)] n: usize,
        #[values(0.01, 0.1, 0.5, 0.99)] p: f64,
    ) -> Result<()> {
        let mut generator = Geometric::new(n, p)?;
        assert_eq!(generator.total(), n);
        for _ in 0..10_000 {
            let level = generator.level();
            assert!((0..n).contains(&level));
        }
        Ok(())
    }

    #[test]
    fn default_parameters() {
        let generator = Geometric::default();
        assert_eq!(generator.total(), DEFAULT_TOTAL);
        assert!((generator.p() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn promotion_rate() {
        let mut generator = Geometric::with_seed(7);
        let draws: u32 = 100_000;
        let promoted = (0..draws).filter(|_| generator.level() > 0).count();
        let rate = promoted as f64 / f64::from(draws);
        assert!((0.48..0.52).contains(&rate), "promotion rate was {rate}");
    }

    #[test]
    fn same_seed_same_levels() {
        let mut a = Geometric::default();
        let mut b = Geometric::with_seed(super::DEFAULT_SEED);
        let xs: Vec<_> = (0..256).map(|_| a.level()).collect();
        let ys: Vec<_> = (0..256).map(|_| b.level()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_seed_different_levels() {
        let mut a = Geometric::with_seed(1);
        let mut b = Geometric::with_seed(42);
        let xs: Vec<_> = (0..256).map(|_| a.level()).collect();
        let ys: Vec<_> = (0..256).map(|_| b.level()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn custom_rng() -> Result<()> {
        let mut generator = Geometric::with_rng(4, 0.25, StdRng::seed_from_u64(3))?;
        assert_eq!(generator.total(), 4);
        assert!((0..256).all(|_| generator.level() < 4));
        Ok(())
    }
}
