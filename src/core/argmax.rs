//! The threshold-free wrapper: `spec.md` §4.7.
//!
//! Sweeps `K` evenly spaced candidate thresholds in `[0, threshold)` and
//! keeps whichever gives the most *non-singleton* clusters — the count
//! `TreeCluster.py`'s `argmax_clusters` maximizes (`num_non_singleton =
//! len([c for c in clusters if len(c) > 1])`), not the total cluster count,
//! which is trivially maximized by the degenerate all-singleton partition at
//! threshold 0. Ties break toward the lowest threshold (earliest index) so
//! the result is deterministic regardless of how `rayon` schedules the
//! sweep. Each candidate gets its own cloned [`Tree`] and driver-private
//! scratch state; `spec.md` §5 only asks for single-threaded drivers, not a
//! single-threaded program, and this is the one place in the crate where
//! independent candidates are evaluated with `rayon` rather than
//! sequentially.

use rayon::prelude::*;

use crate::core::method::Method;
use crate::core::tree::Tree;
use crate::Partition;

const NUM_CANDIDATES: usize = 1000;

fn non_singleton_count(partition: &Partition) -> usize {
    partition.iter().filter(|c| c.len() > 1).count()
}

/// Runs `method` against `K` evenly spaced thresholds in `[0, max_threshold)`,
/// returning the partition with the most non-singleton clusters. Logs the
/// chosen threshold at info level.
pub fn argmax_clusters(tree: &Tree, method: Method, max_threshold: f64) -> Partition {
    let candidates: Vec<f64> =
        (0..NUM_CANDIDATES).map(|i| max_threshold * i as f64 / NUM_CANDIDATES as f64).collect();

    let scored: Vec<(usize, f64, Partition)> = candidates
        .into_par_iter()
        .enumerate()
        .map(|(index, threshold)| {
            let partition = method.run(tree, threshold);
            (index, threshold, partition)
        })
        .collect();

    let (_, chosen_threshold, chosen_partition) = scored
        .into_iter()
        .max_by(|(i_a, _, a), (i_b, _, b)| {
            non_singleton_count(a).cmp(&non_singleton_count(b)).then_with(|| i_b.cmp(i_a))
        })
        .expect("NUM_CANDIDATES candidates always produces at least one result");

    log::info!(
        "threshold-free search chose threshold {:.6} for method {} ({} non-singleton clusters)",
        chosen_threshold,
        method,
        non_singleton_count(&chosen_partition)
    );

    chosen_partition
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

    #[test]
    fn picks_the_threshold_with_the_most_non_singleton_clusters() {
        // Below threshold 2, both cherries are cut apart into singletons
        // (0 non-singleton clusters). From 2 up to (but not including) 4,
        // each cherry survives intact while the root still splits them
        // apart: {A,B} and {C,D}, 2 non-singleton clusters. At 4 and above
        // everything merges into one cluster: only 1 non-singleton cluster.
        // The sweep must prefer the middle regime over the trivial
        // all-singleton one at threshold 0.
        let tree = build("((A:1,B:1):1,(C:1,D:1):1);");
        let partition = argmax_clusters(&tree, Method::Max, 5.0);
        assert_eq!(partition.len(), 2);
        assert!(partition.iter().all(|c| c.len() == 2));

        let mut labelled: Vec<Vec<&str>> = partition
            .iter()
            .map(|c| {
                let mut labels: Vec<&str> = c.iter().map(|&id| tree.label(id).unwrap()).collect();
                labels.sort();
                labels
            })
            .collect();
        labelled.sort();
        assert_eq!(labelled, vec![vec!["A", "B"], vec!["C", "D"]]);
    }

    #[test]
    fn every_leaf_is_covered_exactly_once() {
        let tree = build("((A:1,B:1):1,(C:1,D:1):1);");
        let partition = argmax_clusters(&tree, Method::AvgClade, 4.0);
        let mut all_labels: Vec<&str> = partition.iter().flatten().map(|&id| tree.label(id).unwrap()).collect();
        all_labels.sort();
        assert_eq!(all_labels, vec!["A", "B", "C", "D"]);
    }
}
