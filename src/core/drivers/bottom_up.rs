//! Bottom-up (single postorder pass) drivers: `spec.md` §4.4.
//!
//! `max`, `max_clade`, and `single_linkage_clade` share one recurrence
//! (maintain a running distance to the farthest — or, for single-linkage,
//! nearest — undeleted descendant leaf through each child) and differ only
//! in the aggregator (max vs. min) and the cut policy (cut the worse child
//! only, vs. cut both). `length` and `length_clade` share a simpler
//! recurrence keyed on raw edge length. Both families are expressed here as
//! one parameterized scaffold each, rather than four near-duplicate
//! functions, per the tagged-dispatch re-architecture in the design notes.

use bitvec::vec::BitVec;

use crate::core::cut::cut;
use crate::core::tree::Tree;
use crate::{Cluster, Partition};

/// Which extremum `max`/`max_clade`/`single_linkage_clade` track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiameterAgg {
    /// `max` / `max_clade`: longest path to an undeleted descendant leaf.
    Max,
    /// `single_linkage_clade`: shortest path to an undeleted descendant leaf.
    Min,
}

impl DiameterAgg {
    fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            DiameterAgg::Max => a.max(b),
            DiameterAgg::Min => a.min(b),
        }
    }
}

/// Whether a threshold violation cuts only the more offending child
/// (`max`), or both children unconditionally (`max_clade`,
/// `single_linkage_clade`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutPolicy {
    WorseChildOnly,
    BothChildren,
}

/// Runs the shared `left_dist`/`right_dist` recurrence and diameter
/// constraint that backs `max`, `max_clade`, and `single_linkage_clade`.
pub fn run_diameter(tree: &Tree, threshold: f64, agg: DiameterAgg, cut_policy: CutPolicy) -> Partition {
    let n = tree.len();
    let mut deleted = BitVec::repeat(false, n);
    let mut left_dist = vec![0.0_f64; n];
    let mut right_dist = vec![0.0_f64; n];
    let mut remaining: std::collections::BTreeSet<usize> = tree.leaves().into_iter().collect();
    let mut clusters: Partition = Vec::new();

    for node in tree.postorder() {
        if deleted[node] {
            continue;
        }

        if tree.is_leaf(node) {
            left_dist[node] = 0.0;
            right_dist[node] = 0.0;
            continue;
        }

        let [l, r] = tree.children(node).expect("internal node has two children");
        if deleted[l] && deleted[r] {
            cut(tree, &mut deleted, node);
            continue;
        }

        left_dist[node] = if deleted[l] {
            0.0
        } else {
            agg.combine(left_dist[l], right_dist[l]) + tree.edge_length(l)
        };
        right_dist[node] = if deleted[r] {
            0.0
        } else {
            agg.combine(left_dist[r], right_dist[r]) + tree.edge_length(r)
        };

        if left_dist[node] + right_dist[node] > threshold {
            let mut emit = |cluster: Cluster, remaining: &mut std::collections::BTreeSet<usize>| {
                if !cluster.is_empty() {
                    for &leaf in &cluster {
                        remaining.remove(&leaf);
                    }
                    clusters.push(cluster);
                }
            };

            match cut_policy {
                CutPolicy::WorseChildOnly => {
                    if left_dist[node] > right_dist[node] {
                        let cluster = cut(tree, &mut deleted, l);
                        left_dist[node] = 0.0;
                        emit(cluster, &mut remaining);
                    } else {
                        let cluster = cut(tree, &mut deleted, r);
                        right_dist[node] = 0.0;
                        emit(cluster, &mut remaining);
                    }
                }
                CutPolicy::BothChildren => {
                    let cluster_l = cut(tree, &mut deleted, l);
                    left_dist[node] = 0.0;
                    let cluster_r = cut(tree, &mut deleted, r);
                    right_dist[node] = 0.0;
                    emit(cluster_l, &mut remaining);
                    emit(cluster_r, &mut remaining);
                }
            }
        }
    }

    if !remaining.is_empty() {
        clusters.push(remaining.into_iter().collect());
    }
    clusters
}

/// Whether a branch-length violation cuts just the offending node
/// (`length`) or, tested at each internal node's children, both children
/// (`length_clade`).
pub fn run_length(tree: &Tree, threshold: f64, clade: bool) -> Partition {
    if clade {
        run_length_clade(tree, threshold)
    } else {
        run_length_plain(tree, threshold)
    }
}

fn run_length_plain(tree: &Tree, threshold: f64) -> Partition {
    let mut deleted = BitVec::repeat(false, tree.len());
    let mut remaining: std::collections::BTreeSet<usize> = tree.leaves().into_iter().collect();
    let mut clusters = Vec::new();

    for node in tree.postorder() {
        if deleted[node] {
            continue;
        }
        if tree.edge_length(node) > threshold {
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

fn run_length_clade(tree: &Tree, threshold: f64) -> Partition {
    let mut deleted = BitVec::repeat(false, tree.len());
    let mut remaining: std::collections::BTreeSet<usize> = tree.leaves().into_iter().collect();
    let mut clusters = Vec::new();

    for node in tree.postorder() {
        if deleted[node] || tree.is_leaf(node) {
            continue;
        }
        let [l, r] = tree.children(node).expect("internal node has two children");
        if tree.edge_length(l) > threshold || tree.edge_length(r) > threshold {
            for child in [l, r] {
                let cluster = cut(tree, &mut deleted, child);
                if !cluster.is_empty() {
                    for &leaf in &cluster {
                        remaining.remove(&leaf);
                    }
                    clusters.push(cluster);
                }
            }
        }
    }

    if !remaining.is_empty() {
        clusters.push(remaining.into_iter().collect());
    }
    clusters
}
