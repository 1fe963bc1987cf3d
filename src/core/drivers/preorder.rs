//! `root_dist`: `spec.md` §4.6.
//!
//! A single preorder pass. Unlike the bottom-up drivers, `root_dist` needs no
//! postorder aggregation: the distance from the root is already determined by
//! the parent's distance plus one edge, so a top-down walk that cuts as soon
//! as the running distance exceeds the threshold is enough. Because `cut`
//! marks an entire subtree deleted in one call, a child of a node just cut is
//! already marked deleted by the time preorder reaches it, and is skipped.

use bitvec::vec::BitVec;

use crate::core::cut::cut;
use crate::core::tree::Tree;
use crate::Partition;

pub fn run_root_dist(tree: &Tree, threshold: f64) -> Partition {
    let n = tree.len();
    let mut deleted = BitVec::repeat(false, n);
    let mut root_dist = vec![0.0_f64; n];
    let mut clusters = Vec::new();
    let mut remaining: std::collections::BTreeSet<usize> = tree.leaves().into_iter().collect();

    for node in tree.preorder() {
        if deleted[node] {
            continue;
        }

        root_dist[node] = match tree.parent(node) {
            None => 0.0,
            Some(parent) => root_dist[parent] + tree.edge_length(node),
        };

        if root_dist[node] > threshold {
            let cluster = cut(tree, &mut deleted, node);
            if !cluster.is_empty() {
                for &leaf in &cluster {
                    remaining.remove(&leaf);
                }
                clusters.push(cluster);
            }
        }
    }

    if !remaining.is_empty() {
        clusters.push(remaining.into_iter().collect());
    }
    clusters
}
