//! Property-based tests for parent-link cycle rejection.

use proptest::prelude::*;

use super::tree::ParentTree;

/// Strategy producing a forest over nodes `0..n`: each node may only point
/// at a lower-numbered node, so the input is always acyclic.
fn forest() -> impl Strategy<Value = Vec<(u32, Option<u32>)>> {
    (1u32..24).prop_flat_map(|n| {
        (0..n)
            .map(|node| {
                if node == 0 {
                    Just(None).boxed()
                } else {
                    proptest::option::of(0..node).boxed()
                }
            })
            .collect::<Vec<_>>()
            .prop_map(|parents| {
                parents
                    .into_iter()
                    .enumerate()
                    .map(|(node, parent)| (u32::try_from(node).unwrap_or(u32::MAX), parent))
                    .collect()
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A node may never be re-parented under one of its own descendants.
    #[test]
    fn prop_descendant_parent_always_rejected(links in forest()) {
        let tree = ParentTree::from_links(links.iter().copied());
        for &(node, _) in &links {
            for below in tree.descendants(node) {
                prop_assert!(tree.ensure_acyclic(node, Some(below)).is_err());
            }
        }
    }

    /// Any accepted link leaves a tree in which walking up from the node
    /// reaches a root without coming back to it.
    #[test]
    fn prop_accepted_links_stay_acyclic(links in forest(), node in 0u32..24, parent in 0u32..24) {
        let mut tree = ParentTree::from_links(links.iter().copied());
        if tree.link(node, Some(parent)).is_ok() {
            prop_assert!(reaches_root(&tree, node));
        }
    }

    /// A link is rejected exactly when the parent is the node itself or
    /// climbing from the parent runs into the node.
    #[test]
    fn prop_rejection_matches_reachability(links in forest(), node in 0u32..24, parent in 0u32..24) {
        let tree = ParentTree::from_links(links.iter().copied());
        let loops = parent == node || climbs_to(&tree, parent, node);
        prop_assert_eq!(tree.ensure_acyclic(node, Some(parent)).is_err(), loops);
    }
}

/// Follows parent links from `node` for at most `len + 1` steps, without
/// any visited set, and reports whether a root was reached first.
fn reaches_root(tree: &ParentTree<u32>, node: u32) -> bool {
    let mut current = node;
    for _ in 0..=tree.len() {
        match tree.parent_of(current) {
            None => return true,
            Some(next) if next == node => return false,
            Some(next) => current = next,
        }
    }
    false
}

/// Whether climbing parent links from `from` meets `target`, bounded by the
/// number of nodes.
fn climbs_to(tree: &ParentTree<u32>, from: u32, target: u32) -> bool {
    let mut current = from;
    for _ in 0..=tree.len() {
        match tree.parent_of(current) {
            Some(next) if next == target => return true,
            Some(next) => current = next,
            None => return false,
        }
    }
    false
}

#[test]
fn test_root_walk_detects_loops() {
    let looped = ParentTree::from_links([(1, Some(2)), (2, Some(1))]);
    assert!(!reaches_root(&looped, 1));

    let chain = ParentTree::from_links([(1, None), (2, Some(1)), (3, Some(2))]);
    assert!(reaches_root(&chain, 3));
    assert!(climbs_to(&chain, 3, 1));
    assert!(!climbs_to(&chain, 1, 3));
}
