//! Nodes, links and the arena which owns them.
//!
//! Nodes live in an [`Arena`] and refer to each other by [`NodeId`] rather than
//! by pointer. The list owns the arena, hence every node and every link; ids
//! handed out to callers are only ever used to look nodes up again.
//!
//! The head sentinel is not stored in the arena. A link's origin is therefore
//! an `Option<NodeId>`, where `None` designates the head.

/// Minimum levels required for a list of size n.
#[must_use]
pub fn levels_required(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        (usize::BITS - n.leading_zeros()) as usize
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Link
// ////////////////////////////////////////////////////////////////////////////

/// A forward link at one level.
///
/// `width` is the number of level-0 steps between the owner of the link and
/// `to`. The head has rank 0 and the first element rank 1; a link which leads
/// past the end (`to == None`) spans up to the virtual rank `len + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// The next node at this level, if any.
    pub to: Option<NodeId>,
    /// Number of level-0 steps covered by the link.
    pub width: usize,
}

impl Link {
    /// A link leading past the end of the list, `width` steps away.
    #[must_use]
    pub fn end(width: usize) -> Self {
        Link { to: None, width }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// Stable index of a node within an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A key-value pair together with its forward links.
///
/// The number of links is the node's height. It is drawn once on insertion
/// and never changes; only the contents of the links do.
#[derive(Clone)]
pub struct SkipNode<K, V> {
    pub key: K,
    pub value: V,
    // links[l] is the forward link at level l.
    pub links: Vec<Link>,
}

impl<K, V> SkipNode<K, V> {
    /// Create a new node of the given height with all links pointing past the
    /// end.
    pub fn new(key: K, value: V, height: usize) -> Self {
        SkipNode {
            key,
            value,
            links: vec![Link::end(0); height],
        }
    }

    /// Number of levels this node takes part in.
    pub fn height(&self) -> usize {
        self.links.len()
    }

    /// The level-0 successor.
    pub fn next(&self) -> Option<NodeId> {
        self.links.first().and_then(|link| link.to)
    }

    /// Consumes the node returning its key and value.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Arena
// ////////////////////////////////////////////////////////////////////////////

/// Slab of nodes with stable ids and slot reuse.
#[derive(Clone)]
pub struct Arena<K, V> {
    slots: Vec<Option<SkipNode<K, V>>>,
    // Vacant slots, reused last-in first-out.
    free: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `node`, returning its id.
    pub fn insert(&mut self, node: SkipNode<K, V>) -> NodeId {
        if let Some(index) = self.free.pop() {
            self.slots[index] = Some(node);
            NodeId(index)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Take the node out of the arena, freeing its slot.
    pub fn remove(&mut self, id: NodeId) -> SkipNode<K, V> {
        let node = self.slots[id.0].take().expect("invalid node id");
        self.free.push(id.0);
        node
    }

    pub fn get(&self, id: NodeId) -> &SkipNode<K, V> {
        self.slots[id.0].as_ref().expect("invalid node id")
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut SkipNode<K, V> {
        self.slots[id.0].as_mut().expect("invalid node id")
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Number of live nodes.
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
