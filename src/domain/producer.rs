//! Children producer contract consumed by the tree builder.

use crate::domain::arena::NodeData;
use crate::domain::error::DomainResult;

/// Yields the ordered children of a node.
///
/// Implementations must fail with `DomainError::NilParameter` when the node
/// holds no element instead of returning an empty list, so that "structurally
/// empty" and "invalid input" stay distinguishable.
pub trait ChildrenProducer<E> {
    fn children(&self, node: &NodeData<E>) -> DomainResult<Vec<E>>;
}

impl<E, F> ChildrenProducer<E> for F
where
    F: Fn(&NodeData<E>) -> DomainResult<Vec<E>>,
{
    fn children(&self, node: &NodeData<E>) -> DomainResult<Vec<E>> {
        self(node)
    }
}
