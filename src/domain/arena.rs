use std::collections::VecDeque;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Wrapper around one raw element of the navigated source.
///
/// An empty wrapper is a legitimate state: producers and visitors must be able
/// to tell "no element" apart from "element without children".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData<E> {
    element: Option<E>,
}

impl<E> NodeData<E> {
    pub fn new(element: E) -> Self {
        Self {
            element: Some(element),
        }
    }

    pub fn empty() -> Self {
        Self { element: None }
    }

    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.element.is_none()
    }

    /// Borrow the element or fail with `NilParameter` naming `name`.
    pub fn require(&self, name: &str) -> DomainResult<&E> {
        self.element
            .as_ref()
            .ok_or_else(|| DomainError::nil_parameter(name))
    }
}

impl<E> From<E> for NodeData<E> {
    fn from(element: E) -> Self {
        Self::new(element)
    }
}

impl<E: fmt::Display> fmt::Display for NodeData<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(e) => write!(f, "{}", e),
            None => write!(f, "<nil>"),
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode<E> {
    /// Wrapped source element
    pub data: NodeData<E>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in producer order
    pub children: Vec<Index>,
}

/// Decision returned by a traversal visitor for the node it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Continue into this node's children.
    Descend,
    /// Do not enter this node's children; keep walking the rest of the tree.
    SkipSubtree,
    /// Stop the whole traversal.
    HaltAll,
}

/// Arena-based tree built once by `TreeBuilder` and read-only afterwards.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
#[derive(Debug)]
pub struct TreeArena<E> {
    arena: Arena<TreeNode<E>>,
    root: Option<Index>,
}

impl<E> Default for TreeArena<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TreeArena<E> {
    pub(crate) fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn insert_node(&mut self, data: NodeData<E>, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<E>> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode<E>> {
        self.root.and_then(|idx| self.get_node(idx))
    }

    /// Element held by the root node, if any.
    pub fn root_element(&self) -> Option<&E> {
        self.root_node().and_then(|n| n.data.element())
    }

    /// Immediate children of the root, in producer order.
    pub fn direct_children(&self) -> Vec<&TreeNode<E>> {
        self.root_node()
            .map(|root| {
                root.children
                    .iter()
                    .filter_map(|&idx| self.get_node(idx))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Whether `ancestor` lies strictly above `idx` on its parent chain.
    pub fn is_ancestor(&self, ancestor: Index, idx: Index) -> bool {
        let mut current = self.get_node(idx).and_then(|n| n.parent);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.get_node(p).and_then(|n| n.parent);
        }
        false
    }

    /// Pre-order iterator, children left to right.
    pub fn iter(&self) -> TreeIterator<'_, E> {
        TreeIterator::new(self)
    }

    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Breadth-first walk from the root.
    ///
    /// The visitor decides per node whether to descend, skip the node's
    /// subtree, or halt the walk. Visitor errors abort the walk and are
    /// returned as `TraversalFailure`.
    #[instrument(level = "trace", skip_all)]
    pub fn bfs<F>(&self, mut visit: F) -> DomainResult<()>
    where
        F: FnMut(Index, &TreeNode<E>) -> DomainResult<Visit>,
    {
        let mut queue = VecDeque::new();
        if let Some(root) = self.root {
            queue.push_back(root);
        }

        while let Some(idx) = queue.pop_front() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            match visit(idx, node).map_err(DomainError::traversal_failure)? {
                Visit::Descend => queue.extend(node.children.iter().copied()),
                Visit::SkipSubtree => trace!("bfs: skipping subtree"),
                Visit::HaltAll => {
                    trace!("bfs: halted");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Depth-first (pre-order, left to right) walk from the root.
    #[instrument(level = "trace", skip_all)]
    pub fn dfs<F>(&self, mut visit: F) -> DomainResult<()>
    where
        F: FnMut(Index, &TreeNode<E>) -> DomainResult<Visit>,
    {
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }

        while let Some(idx) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            match visit(idx, node).map_err(DomainError::traversal_failure)? {
                // Push children in reverse order for left-to-right traversal
                Visit::Descend => stack.extend(node.children.iter().rev().copied()),
                Visit::SkipSubtree => trace!("dfs: skipping subtree"),
                Visit::HaltAll => {
                    trace!("dfs: halted");
                    break;
                }
            }
        }
        Ok(())
    }
}

pub struct TreeIterator<'a, E> {
    arena: &'a TreeArena<E>,
    stack: Vec<Index>,
}

impl<'a, E> TreeIterator<'a, E> {
    fn new(arena: &'a TreeArena<E>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a, E> Iterator for TreeIterator<'a, E> {
    type Item = (Index, &'a TreeNode<E>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
