//! Red-black tree with rotation/recolor insert repair.
//!
//! Nodes are stored in an [`Arena`] and linked by [`NodeId`]. Each node keeps a
//! non-owning `parent` index used only to walk upward during insert repair;
//! ownership is entirely the arena's.
//!
//! Invariants after every insertion:
//! 1. The root is black.
//! 2. No red node has a red child.
//! 3. Every path from a node to an absent child crosses the same number of
//!    black nodes.
//! 4. Absent children count as black.
//!
//! Equal keys are attached to the right on insertion, as in the plain BST.
//! Rotations can later move an equal key into a left subtree, so ordering is
//! `left <= node <= right` and [`RedBlackTree::find_all`] searches both
//! children on an exact match.

mod debug;

use smallvec::SmallVec;

use crate::arena::{Arena, NodeId};
use crate::tree::{self, Links, ShapeEntry, STACK_INLINE};
use crate::record::Record;
use crate::SearchIndex;

/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
struct Node {
    record: Record,
    left: NodeId,
    right: NodeId,
    parent: NodeId,
    color: Color,
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

/// A red-black tree over [`Record`]s.
#[derive(Clone, Debug, Default)]
pub struct RedBlackTree {
    nodes: Arena<Node>,
    root: NodeId,
}

impl RedBlackTree {
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

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_null()
    }

    /// Color of the root, `None` for an empty tree.
    pub fn root_color(&self) -> Option<Color> {
        self.nodes.get(self.root).map(|n| n.color)
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn height(&self) -> usize {
        tree::height(&self.nodes, self.root)
    }

    /// Black nodes on the leftmost root-to-leaf path, root excluded.
    ///
    /// Equal on every path while invariant 3 holds.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut cur = match self.root.get() {
            Some(root) => self.nodes[root].left,
            None => return 0,
        };
        while let Some(id) = cur.get() {
            if self.nodes[id].color == Color::Black {
                count += 1;
            }
            cur = self.nodes[id].left;
        }
        count
    }

    /// All records whose key equals `key`, in insertion order.
    pub fn find_all(&self, key: &str) -> Vec<Record> {
        tree::find_matches(&self.nodes, self.root, key)
    }

    /// Records in key order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Record> {
        tree::in_order(&self.nodes, self.root).into_iter()
    }

    /// Pre-order description of the tree with node colors.
    pub fn shape(&self) -> Vec<(ShapeEntry, Color)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: SmallVec<[(NodeId, usize); STACK_INLINE]> = SmallVec::new();
        if !self.root.is_null() {
            stack.push((self.root, 0));
        }
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            out.push((
                ShapeEntry {
                    key: node.record.country.clone(),
                    depth,
                    has_left: !node.left.is_null(),
                    has_right: !node.right.is_null(),
                },
                node.color,
            ));
            if !node.right.is_null() {
                stack.push((node.right, depth + 1));
            }
            if !node.left.is_null() {
                stack.push((node.left, depth + 1));
            }
        }
        out
    }

    /// Insert a record and restore the red-black invariants.
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

        let node = self.nodes.alloc(Node {
            record,
            left: NodeId::NULL,
            right: NodeId::NULL,
            parent,
            color: Color::Red,
        });

        if parent.is_null() {
            self.root = node;
            self.nodes[node].color = Color::Black;
            return;
        }
        if go_left {
            self.nodes[parent].left = node;
        } else {
            self.nodes[parent].right = node;
        }

        self.fix_insert(node);
    }

    #[inline]
    fn is_red(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.color == Color::Red)
    }

    #[inline]
    fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id].parent
    }

    /// Walk up from a freshly attached red node, recoloring and rotating until
    /// no red node has a red parent.
    fn fix_insert(&mut self, mut node: NodeId) {
        while node != self.root && self.is_red(self.parent(node)) {
            let parent = self.parent(node);
            // A red parent is never the root, so the grandparent exists.
            let grand = self.parent(parent);

            if parent == self.nodes[grand].left {
                let uncle = self.nodes[grand].right;
                if self.is_red(uncle) {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grand].color = Color::Red;
                    node = grand;
                } else {
                    if node == self.nodes[parent].right {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grand = self.parent(parent);
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grand].color = Color::Red;
                    self.rotate_right(grand);
                }
            } else {
                let uncle = self.nodes[grand].left;
                if self.is_red(uncle) {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grand].color = Color::Red;
                    node = grand;
                } else {
                    if node == self.nodes[parent].left {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grand = self.parent(parent);
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grand].color = Color::Red;
                    self.rotate_left(grand);
                }
            }
        }

        let root = self.root;
        self.nodes[root].color = Color::Black;
    }

    /// Point whatever referenced `old` (its parent's child slot, or the root)
    /// at `new`, and give `new` the old parent.
    fn replace_child(&mut self, old: NodeId, new: NodeId) {
        let parent = self.nodes[old].parent;
        self.nodes[new].parent = parent;
        match parent.get() {
            None => self.root = new,
            Some(p) if self.nodes[p].left == old => self.nodes[p].left = new,
            Some(p) => self.nodes[p].right = new,
        }
    }

    /// Promote the right child of `node` into its place.
    ///
    /// ```text
    ///     node              pivot
    ///    /    \            /     \
    ///   a    pivot  =>   node     c
    ///        /   \      /    \
    ///       b     c    a      b
    /// ```
    fn rotate_left(&mut self, node: NodeId) {
        let pivot = self.nodes[node].right;
        debug_assert!(!pivot.is_null(), "rotate_left without right child");

        let inner = self.nodes[pivot].left;
        self.nodes[node].right = inner;
        if !inner.is_null() {
            self.nodes[inner].parent = node;
        }

        self.replace_child(node, pivot);

        self.nodes[pivot].left = node;
        self.nodes[node].parent = pivot;
    }

    /// Mirror of [`rotate_left`](Self::rotate_left): promote the left child.
    fn rotate_right(&mut self, node: NodeId) {
        let pivot = self.nodes[node].left;
        debug_assert!(!pivot.is_null(), "rotate_right without left child");

        let inner = self.nodes[pivot].right;
        self.nodes[node].left = inner;
        if !inner.is_null() {
            self.nodes[inner].parent = node;
        }

        self.replace_child(node, pivot);

        self.nodes[pivot].right = node;
        self.nodes[node].parent = pivot;
    }
}

impl SearchIndex for RedBlackTree {
    fn name(&self) -> &'static str {
        "rbtree"
    }

    fn add(&mut self, record: Record) -> crate::Result<()> {
        self.insert(record);
        Ok(())
    }

    fn find_all(&self, key: &str) -> Vec<Record> {
        RedBlackTree::find_all(self, key)
    }

    fn len(&self) -> usize {
        RedBlackTree::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(key: &str, name: &str) -> Record {
        Record {
            name: name.into(),
            ..Record::with_key(key)
        }
    }

    fn build<'a>(keys: impl IntoIterator<Item = &'a str>) -> RedBlackTree {
        let mut t = RedBlackTree::new();
        for (i, k) in keys.into_iter().enumerate() {
            t.insert(rec(k, &i.to_string()));
        }
        t
    }

    #[test]
    fn test_empty() {
        let t = RedBlackTree::new();
        assert!(t.is_empty());
        assert_eq!(t.root_color(), None);
        assert_eq!(t.height(), 0);
        assert_eq!(t.black_height(), 0);
        assert!(t.find_all("A").is_empty());
        assert!(t.verify_integrity().is_empty());
    }

    #[test]
    fn test_single_node_is_black_root() {
        let t = build(["A"]);
        assert_eq!(t.root_color(), Some(Color::Black));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_scenario() {
        let t = build(["A", "B", "A", "C", "B"]);
        assert_eq!(t.root_color(), Some(Color::Black));
        assert!(t.verify_integrity().is_empty(), "{:?}", t.verify_integrity());

        let b: Vec<_> = t.find_all("B").into_iter().map(|r| r.name).collect();
        assert_eq!(b, ["1", "4"]);
        assert!(t.find_all("Z").is_empty());
    }

    #[test]
    fn test_left_rotation_on_sorted_input() {
        // A, B, C: B's right child C triggers a left rotation at A.
        let t = build(["A", "B", "C"]);
        let shape = t.shape();
        assert_eq!(shape[0].0.key, "B");
        assert_eq!(shape[0].1, Color::Black);
        assert_eq!(shape[1].0.key, "A");
        assert_eq!(shape[1].1, Color::Red);
        assert_eq!(shape[2].0.key, "C");
        assert_eq!(shape[2].1, Color::Red);
    }

    #[test]
    fn test_double_rotation() {
        // C, A, B: zig-zag, rotate left at A then right at C.
        let t = build(["C", "A", "B"]);
        let keys: Vec<_> = t.shape().into_iter().map(|(e, _)| e.key).collect();
        assert_eq!(keys, ["B", "A", "C"]);
        assert!(t.verify_integrity().is_empty());
    }

    #[test]
    fn test_uncle_recolor() {
        // B, A, C then D: red uncle A forces a recolor, root stays black.
        let t = build(["B", "A", "C", "D"]);
        let shape = t.shape();
        let colors: Vec<_> = shape.iter().map(|(e, c)| (e.key.as_str(), *c)).collect();
        assert_eq!(
            colors,
            [
                ("B", Color::Black),
                ("A", Color::Black),
                ("C", Color::Black),
                ("D", Color::Red)
            ]
        );
        assert_eq!(t.black_height(), 1);
    }

    #[test]
    fn test_sorted_input_stays_balanced() {
        let mut t = RedBlackTree::with_capacity(1 << 12);
        for i in 0..(1 << 12) {
            t.insert(Record::with_key(format!("{i:05}")));
        }
        assert!(t.verify_integrity().is_empty());
        // h <= 2 * log2(n + 1)
        assert!(t.height() <= 2 * 13, "height {}", t.height());
        assert_eq!(t.find_all("04095").len(), 1);
    }

    #[test]
    fn test_duplicates_survive_rotations() {
        let mut t = RedBlackTree::new();
        for i in 0..200 {
            t.insert(rec("Same", &i.to_string()));
            t.insert(rec(&format!("K{i:03}"), "x"));
        }
        assert!(t.verify_integrity().is_empty());
        let got: Vec<_> = t.find_all("Same").into_iter().map(|r| r.name).collect();
        let expected: Vec<_> = (0..200).map(|i| i.to_string()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_shape_is_deterministic() {
        let keys = ["M", "C", "X", "A", "M", "E", "Z", "C", "M", "B"];
        assert_eq!(build(keys).shape(), build(keys).shape());
    }
}
