//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level $n > 0$ will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level $n$ is $p$ times the chance of occupying level $n-1$
//! (with $0 < p < 1$).
//!
//! The generator is owned by the list and is the only source of randomness it
//! uses. The default [`Geometric`] generator is seeded with
//! [`DEFAULT_SEED`][geometric::DEFAULT_SEED], so two lists fed the same
//! insertion sequence end up with the same layout unless a different seed or
//! RNG is supplied.

pub mod geometric;

pub use geometric::{Geometric, GeometricError};

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a [`LevelGenerator`].
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist.
    #[must_use]
    fn total(&self) -> usize;

    /// Generate a random level for a new node in the range `[0, total)`.
    ///
    /// This function should _never_ return a level greater or equal to
    /// [`total`][LevelGenerator::total].
    #[must_use]
    fn level(&mut self) -> usize;
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for &mut G {
    #[inline]
    fn total(&self) -> usize {
        (**self).total()
    }

    #[inline]
    fn level(&mut self) -> usize {
        (**self).level()
    }
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for Box<G> {
    #[inline]
    fn total(&self) -> usize {
        (**self).total()
    }

    #[inline]
    fn level(&mut self) -> usize {
        (**self).level()
    }
}
