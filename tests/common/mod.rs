//! Shared fixtures: an in-memory hierarchy driven by a name -> children table.

#![allow(dead_code)]

use std::collections::HashMap;

use sitenav::domain::{ChildrenProducer, DomainResult, NodeData};

pub struct MapProducer {
    children: HashMap<String, Vec<String>>,
}

impl MapProducer {
    pub fn new(edges: Vec<(&str, Vec<&str>)>) -> Self {
        let children = edges
            .into_iter()
            .map(|(parent, kids)| {
                (
                    parent.to_string(),
                    kids.into_iter().map(String::from).collect(),
                )
            })
            .collect();
        Self { children }
    }
}

impl ChildrenProducer<String> for MapProducer {
    fn children(&self, node: &NodeData<String>) -> DomainResult<Vec<String>> {
        let name = node.require("node.element")?;
        Ok(self.children.get(name).cloned().unwrap_or_default())
    }
}

/// `root -> {a, b}`, `a -> {a1, a2}`, `b -> {}`
pub fn scenario() -> MapProducer {
    MapProducer::new(vec![
        ("root", vec!["a", "b"]),
        ("a", vec!["a1", "a2"]),
        ("b", vec![]),
    ])
}

/// Path-named hierarchy so ancestry is visible in the names.
pub fn paths() -> MapProducer {
    MapProducer::new(vec![
        ("r", vec!["r/a", "r/b", "r/c"]),
        ("r/a", vec!["r/a/a1", "r/a/a2"]),
        ("r/a/a1", vec!["r/a/a1/x"]),
        ("r/b", vec!["r/b/x"]),
        ("r/c", vec!["r/c/d"]),
        ("r/c/d", vec!["r/c/d/x1", "r/c/d/y"]),
        ("r/c/d/y", vec!["r/c/d/y/x"]),
    ])
}

pub fn is_ancestor(ancestor: &str, descendant: &str) -> bool {
    descendant.starts_with(&format!("{}/", ancestor))
}
