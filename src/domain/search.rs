//! Single-stage searches over a built tree.
//!
//! The root of a tree is the search context and never a candidate: every
//! search below only considers the root's proper descendants.

use tracing::{debug, instrument, trace};

use crate::domain::arena::{TreeArena, TreeNode, Visit};
use crate::domain::criteria::SearchCriteria;
use crate::domain::error::{DomainError, DomainResult};

fn element_of<E>(node: &TreeNode<E>) -> DomainResult<&E> {
    node.data
        .element()
        .ok_or_else(|| DomainError::nil_parameter("node"))
}

/// Breadth-first search collecting the shallowest match on every branch.
///
/// A matching node is collected and its subtree is not entered, so no two
/// results are in an ancestor/descendant relation. Results are in
/// breadth-first visitation order.
#[instrument(level = "debug", skip_all)]
pub fn collect_and_prune<E: Clone>(
    tree: &TreeArena<E>,
    criteria: &SearchCriteria<E>,
) -> DomainResult<Vec<E>> {
    let root = tree.root();
    let mut solution = Vec::new();

    tree.bfs(|idx, node| {
        if Some(idx) == root {
            return Ok(Visit::Descend);
        }
        let element = element_of(node)?;
        if !criteria.matches(element) {
            return Ok(Visit::Descend);
        }
        trace!("collected match");
        solution.push(element.clone());
        Ok(Visit::SkipSubtree)
    })?;

    debug!(matches = solution.len(), "collect_and_prune done");
    Ok(solution)
}

/// Depth-first search returning the first matching node, if any.
///
/// The whole walk stops at the first match.
#[instrument(level = "debug", skip_all)]
pub fn first_match<E: Clone>(
    tree: &TreeArena<E>,
    criteria: &SearchCriteria<E>,
) -> DomainResult<Option<E>> {
    let root = tree.root();
    let mut solution = None;

    tree.dfs(|idx, node| {
        if Some(idx) == root {
            return Ok(Visit::Descend);
        }
        let element = element_of(node)?;
        if !criteria.matches(element) {
            return Ok(Visit::Descend);
        }
        solution = Some(element.clone());
        Ok(Visit::HaltAll)
    })?;

    Ok(solution)
}

/// Root's immediate children that satisfy `criteria`, in original order.
pub fn direct_children_matching<E: Clone>(
    tree: &TreeArena<E>,
    criteria: &SearchCriteria<E>,
) -> Vec<E> {
    tree.direct_children()
        .into_iter()
        .filter_map(|node| node.data.element())
        .filter(|element| criteria.matches(element))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arena::NodeData;

    // root -> {a, b}, a -> {a1, a2}, b -> {b1}
    fn sample() -> TreeArena<String> {
        let mut tree = TreeArena::new();
        let root = tree.insert_node(NodeData::new("root".to_string()), None);
        let a = tree.insert_node(NodeData::new("a".to_string()), Some(root));
        let b = tree.insert_node(NodeData::new("b".to_string()), Some(root));
        tree.insert_node(NodeData::new("a1".to_string()), Some(a));
        tree.insert_node(NodeData::new("a2".to_string()), Some(a));
        tree.insert_node(NodeData::new("b1".to_string()), Some(b));
        tree
    }

    #[test]
    fn test_collect_and_prune_stops_at_shallowest_match() {
        let tree = sample();
        let c = SearchCriteria::new(|s: &String| s.starts_with('a'));
        assert_eq!(collect_and_prune(&tree, &c).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_collect_and_prune_reaches_deeper_levels() {
        let tree = sample();
        let c = SearchCriteria::new(|s: &String| s.ends_with('1'));
        assert_eq!(collect_and_prune(&tree, &c).unwrap(), vec!["a1", "b1"]);
    }

    #[test]
    fn test_root_is_never_a_candidate() {
        let tree = sample();
        let c = SearchCriteria::new(|s: &String| s == "root");
        assert!(collect_and_prune(&tree, &c).unwrap().is_empty());
        assert_eq!(first_match(&tree, &c).unwrap(), None);
    }

    #[test]
    fn test_first_match_is_depth_first() {
        let tree = sample();
        let c = SearchCriteria::new(|s: &String| s.len() == 2);
        assert_eq!(first_match(&tree, &c).unwrap(), Some("a1".to_string()));
    }

    #[test]
    fn test_direct_children_matching_filters_immediate_children() {
        let tree = sample();
        let c = SearchCriteria::new(|s: &String| s != "a");
        assert_eq!(direct_children_matching(&tree, &c), vec!["b"]);
        assert_eq!(
            direct_children_matching(&tree, &SearchCriteria::Wildcard),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_empty_node_fails_traversal() {
        let mut tree = TreeArena::new();
        let root = tree.insert_node(NodeData::new("root".to_string()), None);
        tree.insert_node(NodeData::empty(), Some(root));

        let err = collect_and_prune(&tree, &SearchCriteria::Wildcard).unwrap_err();
        assert!(matches!(err, DomainError::TraversalFailure { .. }));
        assert!(err.is_nil_parameter());
    }
}
