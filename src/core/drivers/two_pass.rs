//! Two-pass drivers: `spec.md` §4.5.
//!
//! `avg_clade` and `med_clade` test a whole-clade property that cannot be
//! decided locally at a child, so both compute their DP quantity bottom-up
//! over the whole tree first, then descend from the root to cut out the
//! maximal clades that satisfy the constraint.

use std::collections::VecDeque;

use bitvec::vec::BitVec;

use crate::core::cut::cut;
use crate::core::merge::{merge_k, merge_two, median};
use crate::core::tree::Tree;
use crate::Partition;

/// `avg_clade`: `spec.md` §4.5.1.
pub fn run_avg_clade(tree: &Tree, threshold: f64) -> Partition {
    let n = tree.len();
    let mut num_leaves = vec![0usize; n];
    let mut total_leaf_dist = vec![0.0_f64; n];
    let mut total_pair_dist = vec![0.0_f64; n];
    let mut avg_pair_dist = vec![0.0_f64; n];

    for node in tree.postorder() {
        if tree.is_leaf(node) {
            num_leaves[node] = 1;
            // total_leaf_dist / total_pair_dist already zero-initialized.
            avg_pair_dist[node] = 0.0;
            continue;
        }

        let [l, r] = tree.children(node).expect("internal node has two children");
        let (n_l, n_r) = (num_leaves[l], num_leaves[r]);
        let (e_l, e_r) = (tree.edge_length(l), tree.edge_length(r));
        let (s_l, s_r) = (total_leaf_dist[l], total_leaf_dist[r]);
        let (p_l, p_r) = (total_pair_dist[l], total_pair_dist[r]);

        num_leaves[node] = n_l + n_r;
        total_pair_dist[node] = p_l + p_r + s_l * n_r as f64 + s_r * n_l as f64 + (n_l * n_r) as f64 * (e_l + e_r);
        total_leaf_dist[node] = (s_l + e_l * n_l as f64) + (s_r + e_r * n_r as f64);

        let pairs = (num_leaves[node] * (num_leaves[node] - 1)) as f64 / 2.0;
        avg_pair_dist[node] = total_pair_dist[node] / pairs;
    }

    cut_maximal_clades(tree, threshold, |node| avg_pair_dist[node])
}

/// `med_clade`: `spec.md` §4.5.2.
pub fn run_med_clade(tree: &Tree, threshold: f64) -> Partition {
    let n = tree.len();
    let mut leaf_dists: Vec<Vec<f64>> = vec![Vec::new(); n];
    let mut pair_dists: Vec<Vec<f64>> = vec![Vec::new(); n];
    let mut med_pair_dist = vec![0.0_f64; n];

    for node in tree.postorder() {
        if tree.is_leaf(node) {
            leaf_dists[node] = vec![0.0];
            med_pair_dist[node] = 0.0;
            continue;
        }

        let [l, r] = tree.children(node).expect("internal node has two children");
        let (e_l, e_r) = (tree.edge_length(l), tree.edge_length(r));

        let l_leaf_dists: Vec<f64> = leaf_dists[l].iter().map(|&d| d + e_l).collect();
        let r_leaf_dists: Vec<f64> = leaf_dists[r].iter().map(|&d| d + e_r).collect();

        // "across" pairwise distances, grouped as |smaller-side| runs of
        // length |larger-side| so merge_k has as few lists as possible.
        let across: Vec<Vec<f64>> = if l_leaf_dists.len() < r_leaf_dists.len() {
            l_leaf_dists.iter().map(|&l| r_leaf_dists.iter().map(|&r| l + r).collect()).collect()
        } else {
            r_leaf_dists.iter().map(|&r| l_leaf_dists.iter().map(|&l| l + r).collect()).collect()
        };

        leaf_dists[node] = merge_two(&l_leaf_dists, &r_leaf_dists);

        let mut merge_inputs = vec![
            std::mem::take(&mut pair_dists[l]),
            std::mem::take(&mut pair_dists[r]),
        ];
        merge_inputs.extend(across);
        let node_pair_dists = merge_k(merge_inputs);

        med_pair_dist[node] = match node_pair_dists.last() {
            Some(&last) if last.is_infinite() => f64::INFINITY,
            Some(_) => median(&node_pair_dists),
            None => 0.0,
        };
        pair_dists[node] = node_pair_dists;

        // Children's scratch is no longer needed; drop it to cap peak
        // memory, per `spec.md` §5.
        leaf_dists[l] = Vec::new();
        leaf_dists[r] = Vec::new();
    }

    cut_maximal_clades(tree, threshold, |node| med_pair_dist[node])
}

/// Shared top-down BFS: cut the maximal clades whose DP-computed quantity
/// (read via `value_of`) satisfies the constraint.
fn cut_maximal_clades(tree: &Tree, threshold: f64, value_of: impl Fn(usize) -> f64) -> Partition {
    let mut deleted = BitVec::repeat(false, tree.len());
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(tree.root());

    while let Some(node) = queue.pop_front() {
        if value_of(node) <= threshold {
            clusters.push(cut(tree, &mut deleted, node));
        } else {
            let [l, r] = tree.children(node).expect("constraint violated only at internal nodes with two children");
            queue.push_back(l);
            queue.push_back(r);
        }
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prepare;
    use crate::newick;

    fn build(newick_str: &str) -> Tree {
        let raw = newick::parse_all(newick_str).unwrap().remove(0);
        prepare::normalize(raw, f64::NEG_INFINITY).unwrap().0
    }

    fn labels(tree: &Tree, cluster: &[usize]) -> Vec<String> {
        let mut labels: Vec<String> = cluster.iter().map(|&id| tree.label(id).unwrap().to_string()).collect();
        labels.sort();
        labels
    }

    #[test]
    fn avg_clade_splits_distant_cherries() {
        // S5: ((A:1,B:1):1,(C:1,D:1):1); avg_clade, tau=2 -> {A,B}, {C,D}
        let tree = build("((A:1,B:1):1,(C:1,D:1):1);");
        let mut clusters = run_avg_clade(&tree, 2.0);
        clusters.sort_by_key(|c| c.len());
        let mut labelled: Vec<Vec<String>> = clusters.iter().map(|c| labels(&tree, c)).collect();
        labelled.sort();
        assert_eq!(labelled, vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string(), "D".to_string()]]);
    }

    #[test]
    fn avg_clade_whole_tree_within_threshold_is_one_cluster() {
        let tree = build("((A:1,B:1):0,(C:1,D:1):0);");
        let clusters = run_avg_clade(&tree, 2.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 4);
    }

    #[test]
    fn med_clade_splits_distant_cherries() {
        // S6: same tree as S5, med_clade, tau=3 -> {A,B}, {C,D}
        let tree = build("((A:1,B:1):1,(C:1,D:1):1);");
        let mut labelled: Vec<Vec<String>> = run_med_clade(&tree, 3.0).iter().map(|c| labels(&tree, c)).collect();
        labelled.sort();
        assert_eq!(labelled, vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string(), "D".to_string()]]);
    }

    #[test]
    fn med_clade_infinite_support_filtered_edge_forces_split() {
        let raw = newick::parse_all("((A:1,B:1)0:1,C:1);").unwrap().remove(0);
        let (tree, _leaves) = prepare::normalize(raw, 50.0).unwrap();
        let clusters = run_med_clade(&tree, 10.0);
        assert!(clusters.len() >= 2);
    }
}
