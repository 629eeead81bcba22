//! Tests for tree building and the single-stage searches

mod common;

use sitenav::domain::{
    build_tree, collect_and_prune, direct_children_matching, first_match, DomainError,
    DomainResult, NodeData, SearchCriteria, TreeBuilder,
};
use sitenav::util::testing;

use common::{is_ancestor, paths, scenario, MapProducer};

fn name_is(name: &'static str) -> SearchCriteria<String> {
    SearchCriteria::new(move |s: &String| s == name)
}

// ============================================================
// Tree building
// ============================================================

#[test]
fn given_source_when_building_then_root_wraps_original_element() {
    testing::init_test_setup();

    let tree = build_tree("root".to_string(), &scenario()).unwrap();

    assert_eq!(tree.root_element(), Some(&"root".to_string()));
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.depth(), 3);
}

#[test]
fn given_empty_root_when_building_then_fails_with_nil_parameter() {
    let producer = scenario();

    let result = TreeBuilder::new(&producer).build(NodeData::<String>::empty());

    let err = result.unwrap_err();
    assert!(err.is_nil_parameter(), "unexpected error: {}", err);
}

#[test]
fn given_leaf_root_when_building_then_tree_has_only_root() {
    let tree = build_tree("lonely".to_string(), &scenario()).unwrap();

    assert_eq!(tree.len(), 1);
    assert!(tree.direct_children().is_empty());
}

#[test]
fn given_failing_producer_when_building_then_no_tree_is_returned() {
    let producer = |node: &NodeData<String>| -> DomainResult<Vec<String>> {
        let name = node.require("node.element")?;
        if name == "root" {
            Ok(vec!["broken".to_string()])
        } else {
            Err(DomainError::Producer {
                message: format!("cannot expand {}", name),
                source: None,
            })
        }
    };

    let err = build_tree("root".to_string(), &producer).unwrap_err();

    assert!(matches!(err, DomainError::BuildFailure { .. }));
    assert!(err.to_string().contains("cannot expand broken"));
}

// ============================================================
// Collect and prune
// ============================================================

#[test]
fn given_match_everything_when_collecting_then_returns_immediate_children() {
    let tree = build_tree("r".to_string(), &paths()).unwrap();

    let found = collect_and_prune(&tree, &SearchCriteria::Wildcard).unwrap();

    assert_eq!(found, vec!["r/a", "r/b", "r/c"]);
}

#[test]
fn given_match_nothing_when_collecting_then_returns_empty() {
    let tree = build_tree("r".to_string(), &paths()).unwrap();

    let found = collect_and_prune(&tree, &SearchCriteria::new(|_: &String| false)).unwrap();

    assert!(found.is_empty());
}

#[test]
fn given_matches_at_several_depths_when_collecting_then_no_ancestor_pairs() {
    let tree = build_tree("r".to_string(), &paths()).unwrap();
    let criteria = SearchCriteria::new(|s: &String| s.contains('x') || s.ends_with("/d"));

    let found = collect_and_prune(&tree, &criteria).unwrap();

    // r/c/d shadows r/c/d/x1 and r/c/d/y/x
    assert_eq!(found, vec!["r/b/x", "r/c/d", "r/a/a1/x"]);
    for a in &found {
        for b in &found {
            assert!(!is_ancestor(a, b), "{} is an ancestor of {}", a, b);
        }
    }
}

#[test]
fn given_scenario_when_collecting_prefix_a_then_only_shallowest_is_kept() {
    let tree = build_tree("root".to_string(), &scenario()).unwrap();

    let found =
        collect_and_prune(&tree, &SearchCriteria::new(|s: &String| s.starts_with('a'))).unwrap();

    assert_eq!(found, vec!["a"]);
}

// ============================================================
// First match
// ============================================================

#[test]
fn given_nested_target_when_first_match_then_returns_it() {
    let producer = MapProducer::new(vec![("root", vec!["x", "y"]), ("x", vec!["x1"])]);
    let tree = build_tree("root".to_string(), &producer).unwrap();

    let found = first_match(&tree, &name_is("x1")).unwrap();

    assert_eq!(found, Some("x1".to_string()));
}

#[test]
fn given_several_matches_when_first_match_then_depth_first_wins() {
    let tree = build_tree("r".to_string(), &paths()).unwrap();

    // r/a/a1/x is reached before r/b/x in depth-first order
    let found = first_match(&tree, &SearchCriteria::new(|s: &String| s.ends_with("/x"))).unwrap();

    assert_eq!(found, Some("r/a/a1/x".to_string()));
}

#[test]
fn given_no_match_when_first_match_then_returns_none() {
    let tree = build_tree("r".to_string(), &paths()).unwrap();

    assert_eq!(first_match(&tree, &name_is("zzz")).unwrap(), None);
}

#[test]
fn given_wildcard_when_first_match_then_returns_first_child() {
    let tree = build_tree("r".to_string(), &paths()).unwrap();

    let found = first_match(&tree, &SearchCriteria::Wildcard).unwrap();

    assert_eq!(found, Some("r/a".to_string()));
}

// ============================================================
// Direct children
// ============================================================

#[test]
fn given_criteria_when_filtering_direct_children_then_deeper_nodes_are_ignored() {
    let tree = build_tree("r".to_string(), &paths()).unwrap();

    let found = direct_children_matching(&tree, &SearchCriteria::new(|s: &String| s != "r/b"));

    assert_eq!(found, vec!["r/a", "r/c"]);
}

#[test]
fn given_leaf_root_when_filtering_direct_children_then_empty() {
    let tree = build_tree("r/b/x".to_string(), &paths()).unwrap();

    assert!(direct_children_matching(&tree, &SearchCriteria::Wildcard).is_empty());
}
