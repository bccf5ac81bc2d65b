//! An ordered key-value container with efficient access by key and by rank.
//!
//! Every forward link of the skiplist records its width, that is the number of
//! level-0 steps it skips. Summing the widths along a search path gives the
//! exact rank of the node reached, so positions can be looked up, inserted
//! around and removed in `O(log(n))` just like keys.

use std::{fmt, iter, ops, ptr};

use log::trace;

use crate::comparator::{Comparator, Natural};
use crate::level_generator::{Geometric, LevelGenerator};
use crate::skipnode::{Arena, Link, NodeId, SkipNode, levels_required};

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// A sorted key-value container which can be accessed by key and by rank.
///
/// Keys are sorted according to the comparator `C` and a key's rank is its
/// 0-based position in that order. The heights of the nodes are drawn from
/// the level generator `G`, which defaults to a [`Geometric`] generator seeded
/// with a fixed constant: unless told otherwise, the internal layout of the
/// list only depends on the sequence of operations applied to it.
///
/// Keys need not be unique. A key equal to keys already present is placed
/// after all of them, and lookups by key address the first one.
///
/// # Examples
///
/// ```
/// use ranked_skiplist::SkipList;
///
/// let mut list = SkipList::new();
/// for k in [3, 1, 2] {
///     list.insert(k, 2 * k);
/// }
/// assert_eq!(list.to_string(), "{1:2 2:4 3:6}");
///
/// let (element, rank) = list.find(&2);
/// assert_eq!(rank, 1);
/// assert_eq!(element, list.find_n(1));
///
/// let removed = list.remove_n(0).unwrap();
/// assert_eq!((removed.key(), removed.value), (&1, 2));
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Clone)]
pub struct SkipList<K, V, C = Natural, G = Geometric> {
    // Links of the head sentinel; its length is the current number of levels.
    head: Vec<Link>,
    nodes: Arena<K, V>,
    len: usize,
    comparator: C,
    level_generator: G,
}

/// Where a search stood when it dropped down a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    /// Last node visited at the level; `None` is the head.
    node: Option<NodeId>,
    /// Rank of that node, the head having rank 0.
    rank: usize,
}

impl Step {
    const HEAD: Step = Step {
        node: None,
        rank: 0,
    };
}

// ///////////////////////////////////////////////
// Construction
// ///////////////////////////////////////////////

impl<K: Ord, V> SkipList<K, V> {
    /// Create an empty list sorted by [`Ord`], using the default level
    /// generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let list: SkipList<i64, String> = SkipList::new();
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    /// Create an empty list sorted by `comparator`, using the default level
    /// generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::{SkipList, comparator::Reverse};
    ///
    /// let mut list = SkipList::with_comparator(Reverse);
    /// list.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
    /// assert_eq!(list.to_string(), "{3:c 2:b 1:a}");
    /// ```
    #[inline]
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_generator(comparator, Geometric::default())
    }
}

impl<K, V, C: Comparator<K>, G: LevelGenerator> SkipList<K, V, C, G> {
    /// Create an empty list sorted by `comparator` whose node heights are
    /// drawn from `level_generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::{Geometric, SkipList, comparator::Natural};
    ///
    /// let mut a = SkipList::with_generator(Natural, Geometric::with_seed(7));
    /// let mut b = SkipList::with_generator(Natural, Geometric::with_seed(7));
    /// for i in 0..64 {
    ///     a.insert(i, ());
    ///     b.insert(i, ());
    /// }
    /// assert_eq!(a.visualization(), b.visualization());
    /// ```
    #[inline]
    pub fn with_generator(comparator: C, level_generator: G) -> Self {
        SkipList {
            head: vec![Link::end(1)],
            nodes: Arena::new(),
            len: 0,
            comparator,
            level_generator,
        }
    }

    /// Insert a key-value pair, returning a view of the new element.
    ///
    /// If equal keys are already present, the new element is placed after
    /// them. Existing elements are never replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert_eq!(list.insert(1, "Hello").to_string(), "1:Hello");
    /// list.insert(1, "World");
    /// assert_eq!(list.to_string(), "{1:Hello 1:World}");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Element<'_, K, V> {
        let mut path = self.path_by(|node, _| !self.comparator.less(&key, &node.key));
        let height = self.random_height();
        while self.levels() < height {
            trace!(
                "growing skiplist from {} to {} levels",
                self.levels(),
                self.levels() + 1
            );
            self.head.push(Link::end(self.len + 1));
            path.push(Step::HEAD);
        }

        let rank = path[0].rank + 1;
        let mut node = SkipNode::new(key, value, height);
        for (level, (link, step)) in node.links.iter_mut().zip(&path).enumerate() {
            let old = self.links(step.node)[level];
            *link = Link {
                to: old.to,
                width: old.width + 1 - (rank - step.rank),
            };
        }

        let id = self.nodes.insert(node);
        for (level, step) in path.iter().enumerate() {
            let link = self.link_mut(step.node, level);
            if level < height {
                *link = Link {
                    to: Some(id),
                    width: rank - step.rank,
                };
            } else {
                link.width += 1;
            }
        }
        self.len += 1;
        trace!("inserted node of height {height} at rank {rank}");

        Element::new(&self.nodes, id)
    }

    /// Remove the first element whose key is equal to `key`, returning it.
    ///
    /// Returns `None`, leaving the list untouched, if no such element exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut list: SkipList<_, _> = (0..10).map(|x| (x, x)).collect();
    /// assert_eq!(list.remove(&4).map(|e| e.into_inner()), Some((4, 4)));
    /// assert!(list.remove(&4).is_none());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let path = self.path_by(|node, _| self.comparator.less(&node.key, key));
        let id = self.equal_successor(path[0].node, key)?;
        Some(self.unlink(&path, id))
    }

    /// Find the first element whose key is equal to `key`.
    ///
    /// Alongside the element, the rank at which it was found is returned. If
    /// there is no such element, the rank is the position at which `key` would
    /// be inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let list: SkipList<_, _> = [(10, 'a'), (20, 'b'), (30, 'c')].into_iter().collect();
    /// let (element, rank) = list.find(&20);
    /// assert_eq!(element.map(|e| *e.value()), Some('b'));
    /// assert_eq!(rank, 1);
    ///
    /// let (element, rank) = list.find(&25);
    /// assert!(element.is_none());
    /// assert_eq!(rank, 2);
    /// ```
    pub fn find(&self, key: &K) -> (Option<Element<'_, K, V>>, usize) {
        let (found, rank) = self.seek(key);
        (found.map(|id| Element::new(&self.nodes, id)), rank)
    }

    /// The rank of the first element equal to `key`, or `Err` with the rank at
    /// which `key` would be inserted, in the manner of
    /// [`slice::binary_search`].
    ///
    /// # Errors
    ///
    /// Returns the insertion rank if `key` is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let list: SkipList<_, _> = [(1, ()), (3, ())].into_iter().collect();
    /// assert_eq!(list.rank(&3), Ok(1));
    /// assert_eq!(list.rank(&2), Err(1));
    /// ```
    pub fn rank(&self, key: &K) -> Result<usize, usize> {
        match self.seek(key) {
            (Some(_), rank) => Ok(rank),
            (None, rank) => Err(rank),
        }
    }

    /// Returns the value of the first element equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert!(list.get(&0).is_none());
    /// list.extend((0..10).map(|x| (x, 2 * x)));
    /// assert_eq!(list.get(&3), Some(&6));
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.seek(key).0.map(|id| &self.nodes.get(id).value)
    }

    /// Returns a mutable reference to the value of the first element equal to
    /// `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut list: SkipList<_, _> = (0..10).map(|x| (x, x)).collect();
    /// if let Some(x) = list.find_mut(&0) {
    ///     *x = 100;
    /// }
    /// assert_eq!(list.get(&0), Some(&100));
    /// ```
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.seek(key).0?;
        Some(&mut self.nodes.get_mut(id).value)
    }

    /// Returns `true` if an element equal to `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.seek(key).0.is_some()
    }

    /// Height of a new node: one more than the generated level, capped by the
    /// number of levels the list needs once the node is in.
    fn random_height(&mut self) -> usize {
        let cap = levels_required(self.len + 1);
        (self.level_generator.level() + 1).min(cap)
    }

    /// Locate the first element equal to `key` and the rank it is or would be
    /// at.
    fn seek(&self, key: &K) -> (Option<NodeId>, usize) {
        let last = self.walk(|node, _| self.comparator.less(&node.key, key), |_, _| {});
        (self.equal_successor(last.node, key), last.rank)
    }

    /// The level-0 successor of `at`, provided it is equal to `key`.
    ///
    /// `at` must be the last node before `key`.
    fn equal_successor(&self, at: Option<NodeId>, key: &K) -> Option<NodeId> {
        self.links(at)[0]
            .to
            .filter(|&id| self.comparator.equivalent(key, &self.nodes.get(id).key))
    }
}

// ///////////////////////////////////////////////
// Rank-based and structural methods
// ///////////////////////////////////////////////

impl<K, V, C, G> SkipList<K, V, C, G> {
    /// Returns the number of elements in the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let list: SkipList<_, _> = (0..5).map(|x| (x, x)).collect();
    /// assert_eq!(list.len(), 5);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of levels of the list.
    ///
    /// The number of levels only ever grows: removing elements leaves it
    /// untouched, and only [`clear`](Self::clear) brings it back to one.
    #[inline]
    pub fn levels(&self) -> usize {
        self.head.len()
    }

    /// Removes every element.
    ///
    /// The level generator is left as is and keeps its state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = vec![Link::end(1)];
        self.len = 0;
    }

    /// The element with the smallest key, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert!(list.front().is_none());
    ///
    /// list.insert(2, "World");
    /// list.insert(1, "Hello");
    /// let front = list.front().unwrap();
    /// assert_eq!((front.key(), front.value()), (&1, &"Hello"));
    /// assert_eq!(front.next().map(|e| *e.key()), Some(2));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<Element<'_, K, V>> {
        self.head[0].to.map(|id| Element::new(&self.nodes, id))
    }

    /// Mutable reference to the value of the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut V> {
        let id = self.head[0].to?;
        Some(&mut self.nodes.get_mut(id).value)
    }

    /// The element with the largest key, or `None` if the list is empty.
    #[inline]
    pub fn back(&self) -> Option<Element<'_, K, V>> {
        self.find_n(self.len.checked_sub(1)?)
    }

    /// The element at rank `pos`, or `None` if `pos` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let list: SkipList<_, _> = (0..10).map(|x| (x * 10, x)).collect();
    /// assert_eq!(list.find_n(3).map(|e| *e.key()), Some(30));
    /// assert!(list.find_n(10).is_none());
    /// ```
    pub fn find_n(&self, pos: usize) -> Option<Element<'_, K, V>> {
        self.seek_rank(pos).map(|id| Element::new(&self.nodes, id))
    }

    /// Mutable reference to the value at rank `pos`.
    pub fn find_n_mut(&mut self, pos: usize) -> Option<&mut V> {
        let id = self.seek_rank(pos)?;
        Some(&mut self.nodes.get_mut(id).value)
    }

    /// Remove the element at rank `pos`, returning it, or `None` if `pos` is
    /// out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut list: SkipList<_, _> = (0..10).map(|x| (x, x)).collect();
    /// assert_eq!(list.remove_n(4).map(|e| e.into_inner()), Some((4, 4)));
    /// assert_eq!(list.remove_n(4).map(|e| e.into_inner()), Some((5, 5)));
    /// assert!(list.remove_n(8).is_none());
    /// ```
    pub fn remove_n(&mut self, pos: usize) -> Option<Entry<K, V>> {
        if pos >= self.len {
            return None;
        }
        let path = self.path_by(|_, rank| rank <= pos);
        let id = self.links(path[0].node)[0].to?;
        Some(self.unlink(&path, id))
    }

    /// Removes the first element and returns it.
    #[inline]
    pub fn pop_front(&mut self) -> Option<Entry<K, V>> {
        self.remove_n(0)
    }

    /// Removes the last element and returns it.
    #[inline]
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        self.remove_n(self.len.checked_sub(1)?)
    }

    /// Iterate over the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let list: SkipList<_, _> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// let pairs: Vec<_> = list.iter().collect();
    /// assert_eq!(pairs, [(&1, &'a'), (&2, &'b')]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            next: self.head[0].to,
            remaining: self.len,
        }
    }

    /// Iterate over the keys in ascending order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Iterate over the values in ascending order of their keys.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// The node at rank `pos`.
    fn seek_rank(&self, pos: usize) -> Option<NodeId> {
        if pos >= self.len {
            return None;
        }
        let last = self.walk(|_, rank| rank <= pos, |_, _| {});
        self.links(last.node)[0].to
    }

    /// Walk down from the head, advancing at each level for as long as
    /// `advance` accepts the next node given the rank it sits at.
    ///
    /// `descend` is told where the walk stood at each level before dropping
    /// down. Returns where the walk ended on level 0.
    fn walk<F, D>(&self, mut advance: F, mut descend: D) -> Step
    where
        F: FnMut(&SkipNode<K, V>, usize) -> bool,
        D: FnMut(usize, Step),
    {
        let mut step = Step::HEAD;
        for level in (0..self.levels()).rev() {
            while let Link {
                to: Some(next),
                width,
            } = self.links(step.node)[level]
            {
                let rank = step.rank + width;
                if !advance(self.nodes.get(next), rank) {
                    break;
                }
                step = Step {
                    node: Some(next),
                    rank,
                };
            }
            descend(level, step);
        }
        step
    }

    /// The predecessor at every level of the position found by `advance`.
    fn path_by<F>(&self, advance: F) -> Vec<Step>
    where
        F: FnMut(&SkipNode<K, V>, usize) -> bool,
    {
        let mut path = vec![Step::HEAD; self.levels()];
        self.walk(advance, |level, step| path[level] = step);
        path
    }

    /// Splice node `id` out of the list. `path` must hold its predecessor at
    /// every level.
    fn unlink(&mut self, path: &[Step], id: NodeId) -> Entry<K, V> {
        let mut node = self.nodes.remove(id);
        for (level, step) in path.iter().enumerate() {
            let link = self.link_mut(step.node, level);
            match node.links.get(level) {
                Some(removed) => {
                    debug_assert_eq!(link.to, Some(id));
                    link.to = removed.to;
                    link.width += removed.width - 1;
                }
                None => link.width -= 1,
            }
        }
        node.links.clear();
        self.len -= 1;
        trace!("removed node at rank {}", path[0].rank + 1);

        let (key, value) = node.into_inner();
        Entry { key, value }
    }

    /// Links of the head (`None`) or of a node.
    fn links(&self, at: Option<NodeId>) -> &[Link] {
        match at {
            None => &self.head,
            Some(id) => &self.nodes.get(id).links,
        }
    }

    fn link_mut(&mut self, at: Option<NodeId>, level: usize) -> &mut Link {
        match at {
            None => &mut self.head[level],
            Some(id) => &mut self.nodes.get_mut(id).links[level],
        }
    }
}

// ///////////////////////////////////////////////
// Presentation
// ///////////////////////////////////////////////

impl<K: fmt::Display, V, C, G> SkipList<K, V, C, G> {
    /// Draw the structure of the list, one line per level from the top.
    ///
    /// Each link is an arrow three characters wide per level-0 step it spans,
    /// and each level ends with `/`. The last line labels every element with
    /// the last two characters of its key's [`Display`](fmt::Display) form,
    /// aligned with the tail of the arrows it emits. Keys are not assumed to
    /// be integers, so there are no rows of hex digits: a single label row is
    /// written whatever the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1, ());
    /// assert_eq!(list.visualization(), "L0 |->|->/\n      1");
    /// ```
    #[must_use]
    pub fn visualization(&self) -> String {
        fn arrow(width: usize) -> String {
            match width * 3 {
                0 => "X".to_owned(),
                1 => ">".to_owned(),
                n => format!("|{}>", "-".repeat(n - 2)),
            }
        }

        let mut s = String::new();
        for level in (0..self.levels()).rev() {
            s.push_str(&format!("L{level} "));
            let mut at = None;
            loop {
                let link = self.links(at)[level];
                s.push_str(&arrow(link.width));
                match link.to {
                    Some(next) => at = Some(next),
                    None => break,
                }
            }
            s.push_str("/\n");
        }
        s.push_str("    ");
        for key in self.keys() {
            let label = key.to_string();
            let tail: String = label.chars().skip(label.chars().count().saturating_sub(2)).collect();
            s.push_str(&format!("{tail:>3}"));
        }
        s
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V, C, G> Default for SkipList<K, V, C, G>
where
    C: Comparator<K> + Default,
    G: LevelGenerator + Default,
{
    #[inline]
    fn default() -> Self {
        SkipList::with_generator(C::default(), G::default())
    }
}

impl<K, V, C, G> Extend<(K, V)> for SkipList<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> iter::FromIterator<(K, V)> for SkipList<K, V> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iterable);
        list
    }
}

impl<K, V, C, G> ops::Index<usize> for SkipList<K, V, C, G> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        let id = self.seek_rank(index).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the len is {} but the index is {index}",
                self.len
            )
        });
        &self.nodes.get(id).value
    }
}

impl<AK, AV, AC, AG, BK, BV, BC, BG> PartialEq<SkipList<BK, BV, BC, BG>>
    for SkipList<AK, AV, AC, AG>
where
    AK: PartialEq<BK>,
    AV: PartialEq<BV>,
{
    #[inline]
    fn eq(&self, other: &SkipList<BK, BV, BC, BG>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(x, y)| x.0 == y.0 && x.1 == y.1)
    }
}

impl<K: Eq, V: Eq, C, G> Eq for SkipList<K, V, C, G> {}

impl<K: fmt::Debug, V: fmt::Debug, C, G> fmt::Debug for SkipList<K, V, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Writes `{k1:v1 k2:v2 ...}` in ascending order.
impl<K: fmt::Display, V: fmt::Display, C, G> fmt::Display for SkipList<K, V, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{k}:{v}")?;
        }
        write!(f, "}}")
    }
}

impl<K, V, C, G> IntoIterator for SkipList<K, V, C, G> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            next: self.head[0].to,
            remaining: self.len,
            nodes: self.nodes,
        }
    }
}

impl<'a, K, V, C, G> IntoIterator for &'a SkipList<K, V, C, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Element and Entry
// ////////////////////////////////////////////////////////////////////////////

/// A view of an element of a [`SkipList`].
///
/// Elements are compared by identity: two views are equal if they designate
/// the same element of the same list, regardless of the keys involved.
pub struct Element<'a, K, V> {
    nodes: &'a Arena<K, V>,
    id: NodeId,
}

impl<'a, K, V> Element<'a, K, V> {
    fn new(nodes: &'a Arena<K, V>, id: NodeId) -> Self {
        Element { nodes, id }
    }

    fn node(&self) -> &'a SkipNode<K, V> {
        self.nodes.get(self.id)
    }

    /// The key of the element.
    #[inline]
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// The value of the element.
    #[inline]
    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    /// The following element in ascending order, or `None` at the end.
    #[inline]
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.node().next().map(|id| Element::new(self.nodes, id))
    }

    /// Number of levels the element takes part in.
    #[inline]
    pub fn height(&self) -> usize {
        self.node().height()
    }
}

impl<K, V> Clone for Element<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Element<'_, K, V> {}

impl<K, V> PartialEq for Element<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

impl<K, V> Eq for Element<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Element<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}

/// Writes `key:value`.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for Element<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key(), self.value())
    }
}

/// An element which has been removed from a [`SkipList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    /// The value the element held.
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// The key the element was sorted by.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Consumes the entry, returning its key and value.
    #[inline]
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Writes `key:value`.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

// ///////////////////////////////////////////////
// Iterators
// ///////////////////////////////////////////////

/// Iterator over the `(key, value)` pairs of a [`SkipList`].
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<K, V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?);
        self.next = node.next();
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> iter::FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of a [`SkipList`].
pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|x| x.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over the values of a [`SkipList`].
pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|x| x.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Consuming iterator over the `(key, value)` pairs of a [`SkipList`].
pub struct IntoIter<K, V> {
    nodes: Arena<K, V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.remove(self.next?);
        self.next = node.next();
        self.remaining -= 1;
        Some(node.into_inner())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

// ////////////////////////////////////////////////////////////////////////////
// Internal checks
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
impl<K, V, C: Comparator<K>, G> SkipList<K, V, C, G> {
    /// Assert every structural invariant of the list.
    fn check(&self) {
        use std::collections::HashMap;

        assert!(!self.head.is_empty());
        assert_eq!(self.nodes.live(), self.len);

        // Ranks as given by level 0, which must be sorted.
        let mut ranks = HashMap::new();
        let mut at = self.head[0].to;
        let mut prev: Option<&K> = None;
        while let Some(id) = at {
            let node = self.nodes.get(id);
            assert!(node.height() <= self.levels());
            if let Some(prev) = prev {
                assert!(!self.comparator.less(&node.key, prev), "out of order");
            }
            ranks.insert(id, ranks.len() + 1);
            prev = Some(&node.key);
            at = node.next();
        }
        assert_eq!(ranks.len(), self.len);

        let rank_of = |to: Option<NodeId>| to.map_or(self.len + 1, |id| ranks[&id]);
        for level in 0..self.levels() {
            let mut at = None;
            let mut rank = 0;
            let mut visited = 0;
            loop {
                let link = self.links(at)[level];
                assert_eq!(
                    link.width,
                    rank_of(link.to) - rank,
                    "bad width at level {level} from rank {rank}"
                );
                let Some(next) = link.to else { break };
                assert!(self.nodes.get(next).height() > level);
                at = Some(next);
                rank += link.width;
                visited += 1;
            }
            // Every node tall enough must be reachable at this level.
            let expected = ranks
                .keys()
                .filter(|&&id| self.nodes.get(id).height() > level)
                .count();
            assert_eq!(visited, expected, "missing nodes at level {level}");
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
