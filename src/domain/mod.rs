//! Domain layer: tree model and search engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod cascade;
pub mod criteria;
pub mod error;
pub mod graph;
pub mod producer;
pub mod search;

pub use arena::{NodeData, TreeArena, TreeNode, Visit};
pub use builder::{build_tree, TreeBuilder};
pub use cascade::{extract_nodes, extract_nodes_par};
pub use criteria::SearchCriteria;
pub use error::{DomainError, DomainResult};
pub use graph::{AdjacencyProducer, WeightedGraph};
pub use producer::ChildrenProducer;
pub use search::{collect_and_prune, direct_children_matching, first_match};
