//! The preparation pass: `spec.md` §4.1.
//!
//! Consumes a parsed [`RawNode`] tree and a support threshold, resolves
//! unifurcations and polytomies, applies the low-support-edge-to-+inf
//! substitution, and flattens the result into an arena [`Tree`]. This is a
//! pure rewrite (design notes: "a pure tree-rewrite producing a normalized
//! tree"); it does not mutate the caller's `RawNode` tree in place, it
//! consumes it by value.

use std::collections::HashSet;

use crate::core::tree::{Node, Tree};
use crate::error::{Result, TreeClusterError};
use crate::newick::RawNode;

/// Resolves unifurcations (step 2) and polytomies (step 3) of one subtree,
/// bottom-up.
fn resolve(mut raw: RawNode) -> RawNode {
    raw.children = raw.children.into_iter().map(resolve).collect();

    while raw.children.len() == 1 {
        let child = raw.children.pop().expect("checked len == 1");
        raw.edge_length += child.edge_length;
        if raw.name.is_none() {
            raw.name = child.name;
        }
        raw.children = child.children;
    }

    while raw.children.len() > 2 {
        let c1 = raw.children.pop().expect("checked len > 2");
        let c2 = raw.children.pop().expect("checked len > 2");
        raw.children.push(RawNode {
            name: None,
            edge_length: 0.0,
            children: vec![c2, c1],
            offset: raw.offset,
        });
    }

    raw
}

/// Flattens a resolved [`RawNode`] into the arena, applying the support
/// filter (step 4) as it goes. Returns the id of the node just inserted.
fn flatten(
    raw: RawNode,
    parent: Option<usize>,
    support_threshold: f64,
    nodes: &mut Vec<Node>,
    leaves: &mut HashSet<String>,
) -> Result<usize> {
    let id = nodes.len();
    nodes.push(Node {
        parent,
        children: None,
        label: None,
        edge_length: raw.edge_length,
        support: None,
    });

    match raw.children.len() {
        0 => {
            let label = raw.name.ok_or(TreeClusterError::MissingLeafLabel { offset: raw.offset })?;
            if !leaves.insert(label.clone()) {
                return Err(TreeClusterError::DuplicateLeafLabel { label });
            }
            nodes[id].label = Some(label);
        }
        2 => {
            let parsed_support = raw.name.as_ref().and_then(|s| s.parse::<f64>().ok());
            let effective_support = parsed_support.unwrap_or(100.0);
            nodes[id].support = parsed_support;
            if effective_support < support_threshold {
                nodes[id].edge_length = f64::INFINITY;
            }

            let mut children = raw.children.into_iter();
            let left_raw = children.next().expect("checked len == 2");
            let right_raw = children.next().expect("checked len == 2");
            let left = flatten(left_raw, Some(id), support_threshold, nodes, leaves)?;
            let right = flatten(right_raw, Some(id), support_threshold, nodes, leaves)?;
            nodes[id].children = Some([left, right]);
        }
        arity => {
            return Err(TreeClusterError::InvalidArity {
                node: raw.name.unwrap_or_else(|| format!("<offset {}>", raw.offset)),
                arity,
            });
        }
    }

    Ok(id)
}

/// Runs the full preparation pass over one parsed tree, returning the
/// normalized arena and the set of leaf labels it contains.
///
/// `support_threshold` may be `f64::NEG_INFINITY` to disable the support
/// filter entirely (every edge passes).
pub fn normalize(raw: RawNode, support_threshold: f64) -> Result<(Tree, HashSet<String>)> {
    let resolved = resolve(raw);
    let mut nodes = Vec::new();
    let mut leaves = HashSet::new();
    let root = flatten(resolved, None, support_threshold, &mut nodes, &mut leaves)?;
    // Step 1: the root's own edge is definitionally zero-length, regardless
    // of whatever the support filter decided for it.
    nodes[root].edge_length = 0.0;
    Ok((Tree::new(nodes, root), leaves))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick;

    #[test]
    fn resolves_polytomy_into_cherries() {
        let raw = newick::parse_all("(A:1,B:1,C:1);").unwrap().remove(0);
        let (tree, leaves) = normalize(raw, f64::NEG_INFINITY).unwrap();
        assert_eq!(leaves.len(), 3);
        assert!(!tree.is_leaf(tree.root()));
        let [l, r] = tree.children(tree.root()).unwrap();
        assert!(tree.is_leaf(l) != tree.is_leaf(r) || (!tree.is_leaf(l) && !tree.is_leaf(r)));
    }

    #[test]
    fn resolves_unifurcation_by_summing_lengths() {
        let raw = newick::parse_all("((A:1):2,B:1);").unwrap().remove(0);
        let (tree, _leaves) = normalize(raw, f64::NEG_INFINITY).unwrap();
        let [l, r] = tree.children(tree.root()).unwrap();
        let a = if tree.label(l) == Some("A") { l } else { r };
        assert!((tree.edge_length(a) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn low_support_edge_becomes_infinite() {
        let raw = newick::parse_all("((A:1,B:1)50:1,C:1);").unwrap().remove(0);
        let (tree, _leaves) = normalize(raw, 75.0).unwrap();
        let [l, _r] = tree.children(tree.root()).unwrap();
        assert!(tree.edge_length(l).is_infinite());
    }

    #[test]
    fn absent_support_defaults_to_permissive_100() {
        let raw = newick::parse_all("((A:1,B:1):1,C:1);").unwrap().remove(0);
        let (tree, _leaves) = normalize(raw, 99.0).unwrap();
        let [l, _r] = tree.children(tree.root()).unwrap();
        assert!(tree.edge_length(l).is_finite());
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let raw = newick::parse_all("(A:1,A:1);").unwrap().remove(0);
        assert!(normalize(raw, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn root_edge_is_always_zero() {
        let raw = newick::parse_all("(A:1,B:1):5;").unwrap().remove(0);
        let (tree, _leaves) = normalize(raw, f64::NEG_INFINITY).unwrap();
        assert_eq!(tree.edge_length(tree.root()), 0.0);
    }
}
