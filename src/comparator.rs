//! Orderings used to sort the keys of a [`SkipList`][crate::SkipList].
//!
//! A comparator is a pure `less(a, b)` predicate. It **must** define a strict
//! weak ordering over the keys it is used with:
//!
//! - Be irreflexive: `less(a, a)` is always `false`.
//! - Be transitive: `less(a, b)` and `less(b, c)` imply `less(a, c)`.
//! - Be consistent: `less(a, b)` always returns the same value.
//!
//! The list relies on these properties without checking them. A comparator
//! which violates them silently corrupts the ordering of the list and the
//! ranks it reports, but never causes undefined behaviour.

use std::marker::PhantomData;

/// A strict weak ordering over keys of type `K`.
///
/// Any `Fn(&K, &K) -> bool` closure is a comparator.
///
/// ```
/// use ranked_skiplist::SkipList;
///
/// // Sort strings by length, then alphabetically.
/// let mut list = SkipList::with_comparator(|a: &&str, b: &&str| (a.len(), a) < (b.len(), b));
/// list.insert("ccc", 3);
/// list.insert("a", 1);
/// list.insert("bb", 2);
/// assert_eq!(list.to_string(), "{a:1 bb:2 ccc:3}");
/// ```
pub trait Comparator<K: ?Sized> {
    /// Returns `true` if `a` sorts strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Returns `true` if neither key sorts before the other.
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Ascending order as given by [`Ord`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Descending order as given by [`Ord`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reverse;

impl<K: Ord + ?Sized> Comparator<K> for Reverse {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        b < a
    }
}

/// Orders keys by a projection of them.
///
/// ```
/// use ranked_skiplist::{SkipList, comparator::ByKey};
///
/// let mut list = SkipList::with_comparator(ByKey::new(|s: &String| s.len()));
/// list.insert("three".to_owned(), ());
/// list.insert("one".to_owned(), ());
/// assert_eq!(list.front().map(|e| e.key().clone()), Some("one".to_owned()));
/// ```
pub struct ByKey<F, T> {
    /// Projection applied to both sides of every comparison.
    f: F,
    _projected: PhantomData<fn() -> T>,
}

impl<F, T> ByKey<F, T> {
    /// Create a comparator which orders keys by `f(key)`.
    #[inline]
    pub fn new(f: F) -> Self {
        Self {
            f,
            _projected: PhantomData,
        }
    }
}

impl<K: ?Sized, F, T> Comparator<K> for ByKey<F, T>
where
    F: Fn(&K) -> T,
    T: Ord,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.f)(a) < (self.f)(b)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{ByKey, Comparator, Natural, Reverse};

    #[rstest]
    #[case(1, 2, true)]
    #[case(2, 1, false)]
    #[case(2, 2, false)]
    fn natural(#[case] a: i32, #[case] b: i32, #[case] expected: bool) {
        assert_eq!(Natural.less(&a, &b), expected);
    }

    #[rstest]
    #[case(1, 2, false)]
    #[case(2, 1, true)]
    #[case(2, 2, false)]
    fn reverse(#[case] a: i32, #[case] b: i32, #[case] expected: bool) {
        assert_eq!(Reverse.less(&a, &b), expected);
    }

    #[test]
    fn closure() {
        let by_abs = |a: &i32, b: &i32| a.abs() < b.abs();
        assert!(by_abs.less(&1, &-2));
        assert!(!by_abs.less(&-2, &1));
        assert!(by_abs.equivalent(&-2, &2));
    }

    #[test]
    fn by_key() {
        let cmp = ByKey::new(|s: &&str| s.len());
        assert!(cmp.less(&"a", &"bb"));
        assert!(cmp.equivalent(&"ab", &"cd"));
    }

    #[test]
    fn unsized_keys() {
        assert!(Natural.less("abc", "abd"));
        assert!(Reverse.less("abd", "abc"));
    }
}
