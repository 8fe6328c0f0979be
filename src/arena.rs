//! Node arena shared by the tree structures.
//!
//! Tree nodes live in a single `Vec` and refer to each other through 32-bit
//! [`NodeId`]s instead of owning pointers. This keeps ownership flat (the arena
//! owns every node, dropping the tree is one deallocation) while rotations
//! remain plain index swaps.
//!
//! Nodes are never freed individually; the trees only grow.

use std::ops::{Index, IndexMut};

/// A 32-bit reference to a node in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The absent child / absent parent.
    pub const NULL: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == u32::MAX
    }

    /// `None` for [`NodeId::NULL`].
    #[inline]
    pub fn get(self) -> Option<NodeId> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }

    /// # Panics
    /// Panics if `idx >= u32::MAX`.
    #[inline]
    fn new(idx: usize) -> Self {
        assert!(idx < u32::MAX as usize, "arena index too large");
        NodeId(idx as u32)
    }

    #[inline]
    fn index(self) -> usize {
        debug_assert!(!self.is_null());
        self.0 as usize
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NULL
    }
}

/// Append-only storage for tree nodes.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    nodes: Vec<T>,
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Move a node into the arena and return its id.
    pub fn alloc(&mut self, node: T) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Look up a node, returning `None` for [`NodeId::NULL`].
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if id.is_null() {
            None
        } else {
            self.nodes.get(id.index())
        }
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        &self.nodes[id.index()]
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id.index()]
    }
}
