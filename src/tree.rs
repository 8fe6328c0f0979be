//! Traversals shared by the arena-backed trees.
//!
//! Both trees store nodes in an [`Arena`] and expose their child links through
//! [`Links`]; search, height and in-order walks are written once against that
//! trait. All of them are iterative.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::arena::{Arena, NodeId};
use crate::record::Record;

/// Inline capacity of traversal stacks. Balanced trees over billions of
/// records stay below this depth.
pub(crate) const STACK_INLINE: usize = 64;

/// Child links common to both tree node types.
pub(crate) trait Links {
    fn record(&self) -> &Record;
    fn left(&self) -> NodeId;
    fn right(&self) -> NodeId;
}

/// Directed search collecting every record whose key equals `key`.
///
/// Smaller keys descend left only, larger keys right only. On an exact match
/// both children are searched, since rotations can leave equal keys on either
/// side of a match. Matches are emitted in in-order position; because equal
/// keys are inserted to the right and rotations preserve in-order sequence,
/// duplicates come out in insertion order.
pub(crate) fn find_matches<N: Links>(arena: &Arena<N>, root: NodeId, key: &str) -> Vec<Record> {
    let mut out = Vec::new();
    let mut pending: SmallVec<[NodeId; STACK_INLINE]> = SmallVec::new();
    let mut cur = root;

    loop {
        while let Some(id) = cur.get() {
            let node = &arena[id];
            cur = match key.cmp(node.record().key()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => {
                    pending.push(id);
                    node.left()
                }
            };
        }

        match pending.pop() {
            Some(id) => {
                let node = &arena[id];
                out.push(node.record().clone());
                cur = node.right();
            }
            None => break,
        }
    }

    out
}

/// Number of nodes on the longest root-to-leaf path. `0` for an empty tree.
pub(crate) fn height<N: Links>(arena: &Arena<N>, root: NodeId) -> usize {
    let mut max = 0;
    let mut stack: SmallVec<[(NodeId, usize); STACK_INLINE]> = SmallVec::new();
    if !root.is_null() {
        stack.push((root, 1));
    }
    while let Some((id, depth)) = stack.pop() {
        max = max.max(depth);
        let node = &arena[id];
        for child in [node.left(), node.right()] {
            if !child.is_null() {
                stack.push((child, depth + 1));
            }
        }
    }
    max
}

/// In-order walk over every record.
pub(crate) fn in_order<N: Links>(arena: &Arena<N>, root: NodeId) -> Vec<&Record> {
    let mut out = Vec::with_capacity(arena.len());
    let mut stack: SmallVec<[NodeId; STACK_INLINE]> = SmallVec::new();
    let mut cur = root;
    loop {
        while let Some(id) = cur.get() {
            stack.push(id);
            cur = arena[id].left();
        }
        match stack.pop() {
            Some(id) => {
                out.push(arena[id].record());
                cur = arena[id].right();
            }
            None => break,
        }
    }
    out
}

/// Shape of a node in pre-order, as returned by the trees' `shape` methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeEntry {
    /// Key stored at the node.
    pub key: String,
    /// Distance from the root (root is `0`).
    pub depth: usize,
    pub has_left: bool,
    pub has_right: bool,
}
