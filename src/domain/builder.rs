//! Tree builder: eager materialization of a tree from a children producer.

use std::collections::VecDeque;

use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::producer::ChildrenProducer;

/// Result type for tree operations.
pub type TreeResult<T> = DomainResult<T>;

/// Constructs trees by repeatedly asking a producer for children.
///
/// Nodes are expanded in breadth-first order until no node yields further
/// children. There is no cycle detection: a producer that hands back an
/// ancestor never terminates.
pub struct TreeBuilder<'p, P: ?Sized> {
    producer: &'p P,
}

impl<'p, P: ?Sized> TreeBuilder<'p, P> {
    pub fn new(producer: &'p P) -> Self {
        Self { producer }
    }

    /// Build a tree rooted at `root`.
    ///
    /// Any producer failure aborts the build and is returned as
    /// `BuildFailure`; no partial tree is handed out.
    #[instrument(level = "debug", skip_all)]
    pub fn build<E>(&self, root: NodeData<E>) -> TreeResult<TreeArena<E>>
    where
        P: ChildrenProducer<E>,
    {
        let mut tree = TreeArena::new();
        let root_idx = tree.insert_node(root, None);
        let mut frontier = VecDeque::from([root_idx]);

        while let Some(current_idx) = frontier.pop_front() {
            let children = match tree.get_node(current_idx) {
                Some(node) => self
                    .producer
                    .children(&node.data)
                    .map_err(DomainError::build_failure)?,
                None => continue,
            };
            trace!(count = children.len(), "produced children");

            for child in children {
                let child_idx = tree.insert_node(NodeData::new(child), Some(current_idx));
                frontier.push_back(child_idx);
            }
        }

        debug!(nodes = tree.len(), "tree built");
        Ok(tree)
    }
}

/// Build a tree over `root` using `producer`.
pub fn build_tree<E, P>(root: E, producer: &P) -> TreeResult<TreeArena<E>>
where
    P: ChildrenProducer<E> + ?Sized,
{
    TreeBuilder::new(producer).build(NodeData::new(root))
}
