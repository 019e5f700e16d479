//! A module for working with undirected graphs.

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

use indexmap::IndexSet;
use itertools::Itertools;
use nalgebra::DMatrix;

use crate::{
    degree,
    edge::Edge,
    error::Result,
    graph::{Direction, Graph, Neighbours, VertexIndex},
};

/// An undirected graph over the dense vertex indices `[0, size)`.
///
/// Each vertex keeps the set of its neighbours in insertion order, so iterating over a
/// neighbourhood is deterministic for a given sequence of mutations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UndirectedGraph {
    adjacency: Vec<IndexSet<VertexIndex>>,
    edge_count: usize,
}

impl UndirectedGraph {
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::undirected::UndirectedGraph;
    ///
    /// let graph = UndirectedGraph::new();
    /// assert_eq!(graph.size(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `size` isolated vertices.
    pub fn with_size(size: usize) -> Self {
        Self {
            adjacency: vec![IndexSet::new(); size],
            edge_count: 0,
        }
    }

    /// Creates a graph with `size` vertices from a collection of edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::undirected::UndirectedGraph;
    ///
    /// let graph = UndirectedGraph::from_edges(3, [(0, 1), (1, 2)])?;
    /// assert_eq!(graph.edge_count(), 2);
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn from_edges<I>(size: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        let mut graph = Self::with_size(size);
        for edge in edges {
            let edge = edge.into();
            graph.add_edge(edge.source(), edge.target())?;
        }

        Ok(graph)
    }

    /// Returns the vertex count of the graph.
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Appends a vertex and returns its index.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::undirected::UndirectedGraph;
    ///
    /// let mut graph = UndirectedGraph::new();
    /// assert_eq!(graph.add_vertex(), 0);
    /// assert_eq!(graph.add_vertex(), 1);
    /// ```
    pub fn add_vertex(&mut self) -> VertexIndex {
        self.adjacency.push(IndexSet::new());
        self.adjacency.len() - 1
    }

    /// Grows the graph to `size` vertices. Existing indices are never invalidated, so shrinking is
    /// a no-op.
    pub fn resize(&mut self, size: usize) {
        if size > self.size() {
            self.adjacency.resize_with(size, IndexSet::new);
        }
    }

    /// Inserts the edge `{u, v}` and returns whether it was absent.
    ///
    /// Inserting an existing edge is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::undirected::UndirectedGraph;
    ///
    /// let mut graph = UndirectedGraph::with_size(2);
    ///
    /// assert_eq!(graph.add_edge(0, 1)?, true);
    /// assert_eq!(graph.add_edge(1, 0)?, false);
    /// assert!(graph.add_edge(0, 2).is_err());
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn add_edge(&mut self, u: VertexIndex, v: VertexIndex) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        Ok(self.insert_edge(u, v))
    }

    /// Checks if the graph contains the edge `{u, v}`.
    pub fn has_edge(&self, u: VertexIndex, v: VertexIndex) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        Ok(self.adjacency[u].contains(&v))
    }

    /// Removes the edge `{u, v}` and returns whether it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::undirected::UndirectedGraph;
    ///
    /// let mut graph = UndirectedGraph::from_edges(3, [(0, 1)])?;
    ///
    /// assert_eq!(graph.remove_edge(1, 0)?, true);
    /// assert_eq!(graph.remove_edge(0, 2)?, false);
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn remove_edge(&mut self, u: VertexIndex, v: VertexIndex) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        // `shift_remove` keeps the remaining neighbours in insertion order.
        let is_removed = self.adjacency[u].shift_remove(&v);
        if is_removed {
            self.adjacency[v].shift_remove(&u);
            self.edge_count -= 1;
        }

        Ok(is_removed)
    }

    /// Removes every edge incident to `vertex`, keeping the vertex itself.
    pub fn remove_vertex_edges(&mut self, vertex: VertexIndex) -> Result<()> {
        self.check_vertex(vertex)?;

        let neighbours = std::mem::take(&mut self.adjacency[vertex]);
        for neighbour in &neighbours {
            if *neighbour != vertex {
                self.adjacency[*neighbour].shift_remove(&vertex);
            }
        }
        self.edge_count -= neighbours.len();

        Ok(())
    }

    /// Removes every edge of the form `{v, v}`.
    pub fn remove_self_loops(&mut self) {
        for (vertex, neighbours) in self.adjacency.iter_mut().enumerate() {
            if neighbours.shift_remove(&vertex) {
                self.edge_count -= 1;
            }
        }
    }

    /// Returns the neighbours of `vertex` in insertion order.
    pub fn neighbours(&self, vertex: VertexIndex) -> Result<Neighbours<'_>> {
        self.check_vertex(vertex)?;

        Ok(self.adjacency[vertex].iter().copied())
    }

    /// Returns the number of neighbours of `vertex`.
    pub fn degree(&self, vertex: VertexIndex) -> Result<usize> {
        self.check_vertex(vertex)?;

        Ok(self.adjacency[vertex].len())
    }

    /// Returns the degree of every vertex, in index order.
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(IndexSet::len).collect()
    }

    /// Iterates over every edge once, with `source <= target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::{edge::Edge, undirected::UndirectedGraph};
    ///
    /// let graph = UndirectedGraph::from_edges(3, [(1, 0), (2, 1)])?;
    /// let edges: Vec<Edge> = graph.edges().collect();
    ///
    /// assert_eq!(edges, vec![Edge::new(0, 1), Edge::new(1, 2)]);
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(vertex, neighbours)| {
                neighbours
                    .iter()
                    .filter(move |neighbour| vertex <= **neighbour)
                    .map(move |neighbour| Edge::new(vertex, *neighbour))
            })
    }

    /// Returns a graph of the same size that only keeps the edges between the given vertices.
    pub fn subgraph<I>(&self, vertices: I) -> Result<Self>
    where
        I: IntoIterator<Item = VertexIndex>,
    {
        let kept = self.vertex_set(vertices)?;
        let mut subgraph = Self::with_size(self.size());

        for edge in self.edges() {
            if kept.contains(&edge.source()) && kept.contains(&edge.target()) {
                subgraph.add_edge(edge.source(), edge.target())?;
            }
        }

        Ok(subgraph)
    }

    /// Returns the subgraph induced by the given vertices, reindexed to `[0, k)` in increasing
    /// order of the original indices, along with the mapping from original to new indices.
    pub fn subgraph_with_remap<I>(
        &self,
        vertices: I,
    ) -> Result<(Self, HashMap<VertexIndex, VertexIndex>)>
    where
        I: IntoIterator<Item = VertexIndex>,
    {
        let kept = self.vertex_set(vertices)?;
        let remap: HashMap<VertexIndex, VertexIndex> = kept
            .iter()
            .enumerate()
            .map(|(new, old)| (*old, new))
            .collect();

        let mut subgraph = Self::with_size(kept.len());
        for edge in self.edges() {
            if let (Some(u), Some(v)) = (remap.get(&edge.source()), remap.get(&edge.target())) {
                subgraph.add_edge(*u, *v)?;
            }
        }

        Ok((subgraph, remap))
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges.
    ///
    /// Returns 0 for graphs with fewer than two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::undirected::UndirectedGraph;
    ///
    /// let mut graph = UndirectedGraph::with_size(3);
    ///
    /// graph.add_edge(0, 1)?;
    /// assert_eq!(graph.density(), 1.0 / 3.0);
    ///
    /// graph.add_edge(0, 2)?;
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn density(&self) -> f64 {
        degree::density(self)
    }

    /// Constructs the adjacency matrix for this graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use topograph::undirected::UndirectedGraph;
    ///
    /// let graph = UndirectedGraph::from_edges(2, [(0, 1)])?;
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.size();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        // The neighbourhoods are symmetric, so this writes both the upper and lower triangles.
        for (i, neighbours) in self.adjacency.iter().enumerate() {
            for j in neighbours {
                matrix[(i, *j)] = 1.0;
            }
        }

        matrix
    }

    /// Constructs the degree matrix for this graph.
    pub fn degree_matrix(&self) -> DMatrix<f64> {
        let degrees: Vec<f64> = self.degrees().into_iter().map(|d| d as f64).collect();

        DMatrix::from_diagonal(&nalgebra::DVector::from_vec(degrees))
    }

    /// Constructs the laplacian matrix for this graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use topograph::undirected::UndirectedGraph;
    ///
    /// let graph = UndirectedGraph::from_edges(3, [(0, 1), (0, 2)])?;
    /// assert_eq!(
    ///     graph.laplacian_matrix(),
    ///     dmatrix![2.0, -1.0, -1.0;
    ///              -1.0, 1.0, 0.0;
    ///              -1.0, 0.0, 1.0]
    /// );
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn laplacian_matrix(&self) -> DMatrix<f64> {
        self.degree_matrix() - self.adjacency_matrix()
    }

    //
    // Private
    //

    /// The neighbourhood of an in-range `vertex`, for constant-time membership tests.
    pub(crate) fn neighbour_set(&self, vertex: VertexIndex) -> &IndexSet<VertexIndex> {
        &self.adjacency[vertex]
    }

    /// Inserts the edge `{u, v}` between in-range vertices, returning whether it is new.
    pub(crate) fn insert_edge(&mut self, u: VertexIndex, v: VertexIndex) -> bool {
        let is_inserted = self.adjacency[u].insert(v);
        if is_inserted {
            // A self-loop only ever appears once in its own neighbourhood.
            if u != v {
                self.adjacency[v].insert(u);
            }
            self.edge_count += 1;
        }

        is_inserted
    }

    /// Validates and deduplicates a collection of vertices, sorted by index.
    fn vertex_set<I>(&self, vertices: I) -> Result<BTreeSet<VertexIndex>>
    where
        I: IntoIterator<Item = VertexIndex>,
    {
        vertices
            .into_iter()
            .map(|vertex| self.check_vertex(vertex))
            .collect()
    }
}

impl Graph for UndirectedGraph {
    fn size(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn is_directed(&self) -> bool {
        false
    }

    fn adjacent(&self, vertex: VertexIndex, _direction: Direction) -> Neighbours<'_> {
        self.adjacency[vertex].iter().copied()
    }

    fn adjacent_count(&self, vertex: VertexIndex, _direction: Direction) -> usize {
        self.adjacency[vertex].len()
    }
}

impl fmt::Display for UndirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Undirected graph of size {}", self.size())?;
        for (vertex, neighbours) in self.adjacency.iter().enumerate() {
            writeln!(f, "{vertex}: {}", neighbours.iter().join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;
    use crate::error::GraphError;

    #[test]
    fn new() {
        let graph = UndirectedGraph::new();

        assert_eq!(graph.size(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_vertex_keeps_existing_indices() {
        let mut graph = graph!([0, 1]);

        assert_eq!(graph.add_vertex(), 2);
        assert!(graph.has_edge(0, 1).unwrap());
        assert_eq!(graph.degree(2).unwrap(), 0);
    }

    #[test]
    fn resize_only_grows() {
        let mut graph = graph!([0, 1, 2]);

        graph.resize(5);
        assert_eq!(graph.size(), 5);

        graph.resize(1);
        assert_eq!(graph.size(), 5);
    }

    #[test]
    fn add_edge() {
        let mut graph = UndirectedGraph::with_size(3);

        assert!(graph.add_edge(0, 1).unwrap());
        assert!(!graph.add_edge(0, 1).unwrap());
        assert!(!graph.add_edge(1, 0).unwrap());

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbours(0).unwrap().collect::<Vec<_>>(), vec![1]);
        assert_eq!(graph.neighbours(1).unwrap().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn add_edge_out_of_range() {
        let mut graph = UndirectedGraph::with_size(2);

        assert_eq!(
            graph.add_edge(0, 2),
            Err(GraphError::VertexOutOfRange { vertex: 2, size: 2 })
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn has_edge_is_symmetric() {
        let graph = graph!([0, 1, 2]);

        assert!(graph.has_edge(0, 1).unwrap());
        assert!(graph.has_edge(1, 0).unwrap());
        assert!(!graph.has_edge(0, 2).unwrap());
        assert!(graph.has_edge(0, 3).is_err());
    }

    #[test]
    fn remove_edge() {
        let mut graph = graph!([0, 1, 2]);

        assert!(graph.remove_edge(1, 0).unwrap());
        assert!(!graph.remove_edge(1, 0).unwrap());

        assert!(!graph.has_edge(0, 1).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(1).unwrap(), 1);
    }

    #[test]
    fn remove_edge_preserves_neighbour_order() {
        let mut graph = graph!([0, 1], [0, 2], [0, 3]);

        graph.remove_edge(0, 2).unwrap();

        assert_eq!(graph.neighbours(0).unwrap().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn remove_vertex_edges() {
        let mut graph = graph!([0, 1, 2, 0], [1, 3]);
        graph.add_edge(1, 1).unwrap();

        graph.remove_vertex_edges(1).unwrap();

        assert_eq!(graph.size(), 4);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(1).unwrap(), 0);
        assert!(graph.has_edge(0, 2).unwrap());
        assert!(!graph.has_edge(3, 1).unwrap());
    }

    #[test]
    fn remove_self_loops() {
        let mut graph = graph!([0, 1]);
        graph.add_edge(0, 0).unwrap();
        graph.add_edge(1, 1).unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree(0).unwrap(), 2);

        graph.remove_self_loops();

        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.has_edge(0, 0).unwrap());
        assert!(graph.has_edge(0, 1).unwrap());

        // Nothing left to strip.
        graph.remove_self_loops();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn neighbours_are_restartable() {
        let graph = graph!([2, 0], [2, 3], [2, 1]);

        let first: Vec<_> = graph.neighbours(2).unwrap().collect();
        let second: Vec<_> = graph.neighbours(2).unwrap().collect();

        assert_eq!(first, vec![0, 3, 1]);
        assert_eq!(first, second);
    }

    #[test]
    fn degrees() {
        let graph = graph!([0, 1, 2], [1, 3]);

        assert_eq!(graph.degrees(), vec![1, 3, 1, 1]);
        assert!(graph.degree(4).is_err());
    }

    #[test]
    fn edges() {
        let graph = graph!([0, 1, 2, 0]);
        let edges: Vec<Edge> = graph.edges().collect();

        assert_eq!(edges.len(), 3);
        assert!(edges.contains(&Edge::new(1, 2)));
        assert!(edges.iter().all(|edge| edge.source() <= edge.target()));
    }

    #[test]
    fn subgraph() {
        let graph = graph!([0, 1, 2, 3, 0]);
        let subgraph = graph.subgraph([0, 1, 2]).unwrap();

        assert_eq!(subgraph.size(), 4);
        assert_eq!(subgraph.edge_count(), 2);
        assert!(subgraph.has_edge(0, 1).unwrap());
        assert!(!subgraph.has_edge(3, 0).unwrap());

        assert!(graph.subgraph([0, 9]).is_err());
    }

    #[test]
    fn subgraph_with_remap() {
        let graph = graph!([0, 1, 2, 3, 0]);
        let (subgraph, remap) = graph.subgraph_with_remap([3, 2, 0]).unwrap();

        assert_eq!(subgraph.size(), 3);
        assert_eq!(remap[&0], 0);
        assert_eq!(remap[&2], 1);
        assert_eq!(remap[&3], 2);
        assert!(subgraph.has_edge(1, 2).unwrap());
        assert!(subgraph.has_edge(2, 0).unwrap());
        assert_eq!(subgraph.edge_count(), 2);
    }

    #[test]
    fn density() {
        let mut graph = UndirectedGraph::new();
        assert_eq!(graph.density(), 0.0);

        graph.resize(2);
        graph.add_edge(0, 1).unwrap();
        assert_eq!(graph.density(), 1.0);

        graph.add_vertex();
        graph.add_edge(0, 2).unwrap();
        assert_eq!(graph.density(), 2.0 / 3.0);
    }

    #[test]
    fn adjacency_matrix() {
        assert_eq!(UndirectedGraph::new().adjacency_matrix(), dmatrix![]);

        let graph = graph!([1, 0, 2]);
        assert_eq!(
            graph.adjacency_matrix(),
            dmatrix![0.0, 1.0, 1.0;
                     1.0, 0.0, 0.0;
                     1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn degree_matrix() {
        let graph = graph!([1, 0, 2]);

        assert_eq!(
            graph.degree_matrix(),
            dmatrix![2.0, 0.0, 0.0;
                     0.0, 1.0, 0.0;
                     0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn display() {
        let graph = graph!([0, 1, 2]);

        assert_eq!(
            graph.to_string(),
            "Undirected graph of size 3\n0: 1\n1: 0, 2\n2: 1\n"
        );
    }
}
