//! Debug utilities for red-black tree troubleshooting.

use std::fmt::Write;

use super::{Color, NodeId, RedBlackTree};

impl RedBlackTree {
    /// Log the tree structure at debug level, one node per line.
    pub fn debug_dump(&self) {
        log::debug!("=== RedBlackTree ({} nodes) ===", self.len());
        if self.root.is_null() {
            log::debug!("(empty)");
            return;
        }
        let mut line = String::new();
        for (entry, color) in self.shape() {
            line.clear();
            let _ = write!(
                line,
                "{}{:?} [{}]",
                "  ".repeat(entry.depth),
                entry.key,
                match color {
                    Color::Red => 'R',
                    Color::Black => 'B',
                }
            );
            log::debug!("{line}");
        }
    }

    /// Verify tree integrity - returns list of issues found.
    ///
    /// Checks the coloring rules, equal black-height on every path, the
    /// parent back-links, and that an in-order walk is sorted by key.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let Some(root) = self.root.get() else {
            if !self.nodes.is_empty() {
                issues.push(format!("empty root but {} nodes allocated", self.nodes.len()));
            }
            return issues;
        };

        if self.nodes[root].color != Color::Black {
            issues.push("root is red".to_string());
        }
        if !self.nodes[root].parent.is_null() {
            issues.push("root has a parent".to_string());
        }

        // (node, black nodes above it, excluding the root)
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        let mut leaf_black_height: Option<usize> = None;
        let mut reachable = 0usize;

        while let Some((id, above)) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[id];
            let here = if id != root && node.color == Color::Black {
                above + 1
            } else {
                above
            };

            for (side, child) in [("left", node.left), ("right", node.right)] {
                match child.get() {
                    Some(c) => {
                        let child_node = &self.nodes[c];
                        if child_node.parent != id {
                            issues.push(format!(
                                "{side} child {:?} of {:?} has wrong parent link",
                                child_node.record.key(),
                                node.record.key()
                            ));
                        }
                        if node.color == Color::Red && child_node.color == Color::Red {
                            issues.push(format!(
                                "red node {:?} has red {side} child {:?}",
                                node.record.key(),
                                child_node.record.key()
                            ));
                        }
                        stack.push((c, here));
                    }
                    None => match leaf_black_height {
                        None => leaf_black_height = Some(here),
                        Some(expected) if expected != here => issues.push(format!(
                            "black-height {here} below {:?} differs from {expected}",
                            node.record.key()
                        )),
                        Some(_) => {}
                    },
                }
            }
        }

        if reachable != self.nodes.len() {
            issues.push(format!(
                "{reachable} reachable nodes but {} allocated",
                self.nodes.len()
            ));
        }

        let sorted = self.iter_sorted().collect::<Vec<_>>();
        for pair in sorted.windows(2) {
            if pair[0].key() > pair[1].key() {
                issues.push(format!(
                    "in-order keys out of order: {:?} before {:?}",
                    pair[0].key(),
                    pair[1].key()
                ));
            }
        }

        issues
    }
}
