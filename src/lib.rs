//! A skiplist is a way of storing elements in such a way that elements can be efficiently
//! accessed, inserted and removed, all in `O(log(n))` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where we each node `[x]` has references to nodes further down the list, allowing the algorithm
//! to effectively skip ahead.
//!
//! The [`SkipList`] in this crate additionally records, for every link, how many nodes it skips.
//! This turns it into an order-statistics structure: besides looking elements up by key, they can
//! be looked up and removed by rank (their 0-based position in sorted order), without any
//! auxiliary index.
//!
//! ```
//! use ranked_skiplist::SkipList;
//!
//! let mut list = SkipList::new();
//! for k in [5, 3, 9, 1] {
//!     list.insert(k, k * 10);
//! }
//! assert_eq!(list.to_string(), "{1:10 3:30 5:50 9:90}");
//!
//! // Rank of a key, and key at a rank.
//! assert_eq!(list.find(&5).1, 2);
//! assert_eq!(list.find_n(2).map(|e| *e.key()), Some(5));
//!
//! // Removal by rank.
//! assert_eq!(list.remove_n(1).map(|e| e.into_inner()), Some((3, 30)));
//! assert_eq!(list.to_string(), "{1:10 5:50 9:90}");
//! ```
//!
//! The list is sorted with a [`Comparator`] which **must** be well-behaved: it must define a
//! strict weak ordering (see the [`comparator`] module). **Failure to satisfy this results in
//! unexpected ordering and ranks**, but never in undefined behaviour.
//!
//! The heights of the nodes are drawn from a [`LevelGenerator`]. Unless another one is given,
//! a [`Geometric`] generator seeded with a fixed constant is used, making the layout of a list
//! reproducible from run to run.
//!
//! The list is not thread-safe in the sense of allowing concurrent mutation: callers which need
//! to share one must wrap it in a lock.

pub mod comparator;
pub mod level_generator;
mod skiplist;
mod skipnode;

pub use comparator::{Comparator, Natural, Reverse};
pub use level_generator::{Geometric, GeometricError, LevelGenerator};
pub use skiplist::{Element, Entry, IntoIter, Iter, Keys, SkipList, Values};
