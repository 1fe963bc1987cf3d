//! The cut operation: `spec.md` §4.2.
//!
//! Marks a subtree's nodes DELETED (in the per-run bitset, not on the
//! node itself — see `core::tree`) and returns the leaves encountered,
//! breadth-first. Idempotent: cutting an already-deleted subtree returns
//! an empty cluster without touching the bitset further.

use std::collections::VecDeque;

use bitvec::vec::BitVec;

use crate::core::tree::{NodeId, Tree};

/// Cuts the subtree rooted at `start`, marking every previously-undeleted
/// node in it as deleted and returning the leaf ids it contained.
pub fn cut(tree: &Tree, deleted: &mut BitVec, start: NodeId) -> Vec<NodeId> {
    let mut cluster = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(id) = queue.pop_front() {
        if deleted[id] {
            continue;
        }
        deleted.set(id, true);

        if tree.is_leaf(id) {
            cluster.push(id);
        } else if let Some([l, r]) = tree.children(id) {
            queue.push_back(l);
            queue.push_back(r);
        }
    }

    cluster
}
