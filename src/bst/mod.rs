//! Unbalanced binary search tree.
//!
//! Keys smaller than a node go left, everything else (including equal keys)
//! goes right. There is no rebalancing: the shape is a direct function of
//! insertion order, so sorted input degenerates into a right-leaning chain of
//! height `n`. That is the baseline behavior being measured, not a bug.
//!
//! Every traversal here is iterative. A degenerate tree over a few hundred
//! thousand records would overflow the call stack with recursion.

use smallvec::SmallVec;

use crate::arena::{Arena, NodeId};
use crate::record::Record;
use crate::tree::{self, Links, ShapeEntry, STACK_INLINE};
use crate::SearchIndex;

#[derive(Clone, Debug)]
struct Node {
    record: Record,
    left: NodeId,
    right: NodeId,
}

impl Links for Node {
    #[inline]
    fn record(&self) -> &Record {
        &self.record
    }

    #[inline]
    fn left(&self) -> NodeId {
        self.left
    }

    #[inline]
    fn right(&self) -> NodeId {
        self.right
    }
}

/// An unbalanced binary search tree over [`Record`]s.
#[derive(Clone, Debug, Default)]
pub struct BinarySearchTree {
    nodes: Arena<Node>,
    root: NodeId,
}

impl BinarySearchTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: NodeId::NULL,
        }
    }

    /// Create an empty tree with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: NodeId::NULL,
        }
    }

    /// Insert a record. Equal keys are attached to the right.
    pub fn insert(&mut self, record: Record) {
        let mut parent = NodeId::NULL;
        let mut go_left = false;
        let mut cur = self.root;
        while let Some(id) = cur.get() {
            parent = id;
            go_left = record.key() < self.nodes[id].record.key();
            cur = if go_left {
                self.nodes[id].left
            } else {
                self.nodes[id].right
            };
        }

        let id = self.nodes.alloc(Node {
            record,
            left: NodeId::NULL,
            right: NodeId::NULL,
        });

        if parent.is_null() {
            self.root = id;
        } else if go_left {
            self.nodes[parent].left = id;
        } else {
            self.nodes[parent].right = id;
        }
    }

    /// All records whose key equals `key`, in insertion order.
    pub fn find_all(&self, key: &str) -> Vec<Record> {
        tree::find_matches(&self.nodes, self.root, key)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_null()
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn height(&self) -> usize {
        tree::height(&self.nodes, self.root)
    }

    /// Records in key order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Record> {
        tree::in_order(&self.nodes, self.root).into_iter()
    }

    /// Pre-order description of the tree, for comparing shapes.
    pub fn shape(&self) -> Vec<ShapeEntry> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: SmallVec<[(NodeId, usize); STACK_INLINE]> = SmallVec::new();
        if !self.root.is_null() {
            stack.push((self.root, 0));
        }
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            out.push(ShapeEntry {
                key: node.record.country.clone(),
                depth,
                has_left: !node.left.is_null(),
                has_right: !node.right.is_null(),
            });
            if !node.right.is_null() {
                stack.push((node.right, depth + 1));
            }
            if !node.left.is_null() {
                stack.push((node.left, depth + 1));
            }
        }
        out
    }

    /// Check the ordering invariant: left subtree keys `<` node key, right
    /// subtree keys `>=` node key. Returns the violations found.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(NodeId, Option<&str>, Option<&str>)> = Vec::new();
        if !self.root.is_null() {
            stack.push((self.root, None, None));
        }
        while let Some((id, lower, upper)) = stack.pop() {
            let node = &self.nodes[id];
            let key = node.record.key();
            if lower.is_some_and(|lo| key < lo) {
                issues.push(format!("key {key:?} below inclusive bound {lower:?}"));
            }
            if upper.is_some_and(|hi| key >= hi) {
                issues.push(format!("key {key:?} not below exclusive bound {upper:?}"));
            }
            if !node.left.is_null() {
                stack.push((node.left, lower, Some(key)));
            }
            if !node.right.is_null() {
                stack.push((node.right, Some(key), upper));
            }
        }
        let reachable = self.shape().len();
        if reachable != self.len() {
            issues.push(format!(
                "{reachable} reachable nodes but {} allocated",
                self.len()
            ));
        }
        issues
    }
}

impl SearchIndex for BinarySearchTree {
    fn name(&self) -> &'static str {
        "bst"
    }

    fn add(&mut self, record: Record) -> crate::Result<()> {
        self.insert(record);
        Ok(())
    }

    fn find_all(&self, key: &str) -> Vec<Record> {
        BinarySearchTree::find_all(self, key)
    }

    fn len(&self) -> usize {
        BinarySearchTree::len(self)
    }
}
