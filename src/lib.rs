//! sitenav: staged structural search over tree-shaped sources.
//!
//! A tree is built eagerly from a root element and a caller-supplied
//! [`ChildrenProducer`](domain::ChildrenProducer), then searched breadth-first
//! (collect the shallowest match per branch), depth-first (first match), or in
//! cascading stages where every match of one stage becomes the root of the next
//! stage's search.
//!
//! ```ignore
//! use sitenav::domain::{extract_nodes, DomainResult, NodeData, SearchCriteria};
//!
//! let producer = |node: &NodeData<String>| -> DomainResult<Vec<String>> {
//!     let name = node.require("node.element")?;
//!     Ok(lookup_children(name))
//! };
//! let found = extract_nodes(
//!     "root".to_string(),
//!     &producer,
//!     vec![
//!         SearchCriteria::new(|s: &String| s.starts_with('a')),
//!         SearchCriteria::new(|s: &String| s.ends_with('1')),
//!     ],
//! )?;
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
