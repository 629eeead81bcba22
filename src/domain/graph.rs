//! Weighted graph stored as a dense adjacency matrix.
//!
//! Only lookup and neighbor listing are provided; trees over the graph are
//! built with the regular tree builder.

use tracing::instrument;

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::builder::{TreeBuilder, TreeResult};
use crate::domain::error::DomainResult;
use crate::domain::producer::ChildrenProducer;

#[derive(Debug, Clone)]
pub struct WeightedGraph<T> {
    vertices: Vec<T>,
    /// `edges[i][j]` is the weight of the edge from vertex i to vertex j
    edges: Vec<Vec<Option<f64>>>,
}

impl<T: PartialEq> WeightedGraph<T> {
    /// Build the adjacency matrix by asking `weight` for every ordered vertex pair.
    pub fn new<F>(vertices: Vec<T>, weight: F) -> Self
    where
        F: Fn(&T, &T) -> Option<f64>,
    {
        let edges = vertices
            .iter()
            .map(|from| vertices.iter().map(|to| weight(from, to)).collect())
            .collect();
        Self { vertices, edges }
    }

    pub fn index_of(&self, elem: &T) -> Option<usize> {
        self.vertices.iter().position(|v| v == elem)
    }

    /// Vertices reachable over one edge from `from`, in vertex order.
    pub fn adjacent_of(&self, from: &T) -> Vec<&T> {
        let Some(i) = self.index_of(from) else {
            return Vec::new();
        };
        self.edges[i]
            .iter()
            .zip(&self.vertices)
            .filter_map(|(w, v)| w.map(|_| v))
            .collect()
    }

    pub fn edge(&self, from: &T, to: &T) -> Option<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        self.edges[i][j]
    }

    pub fn vertices(&self) -> &[T] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Vec<Option<f64>>] {
        &self.edges
    }

    /// Children producer listing a vertex's neighbors.
    ///
    /// The graph must be acyclic as seen from the chosen root, otherwise a
    /// build over it never terminates.
    pub fn adjacency_producer(&self) -> AdjacencyProducer<'_, T> {
        AdjacencyProducer { graph: self }
    }

    /// Build a tree rooted at `root` with a caller-supplied producer.
    #[instrument(level = "debug", skip_all)]
    pub fn make_tree<P>(&self, root: T, producer: &P) -> TreeResult<TreeArena<T>>
    where
        P: ChildrenProducer<T> + ?Sized,
    {
        TreeBuilder::new(producer).build(NodeData::new(root))
    }
}

pub struct AdjacencyProducer<'g, T> {
    graph: &'g WeightedGraph<T>,
}

impl<T: PartialEq + Clone> ChildrenProducer<T> for AdjacencyProducer<'_, T> {
    fn children(&self, node: &NodeData<T>) -> DomainResult<Vec<T>> {
        let vertex = node.require("node.element")?;
        Ok(self.graph.adjacent_of(vertex).into_iter().cloned().collect())
    }
}
