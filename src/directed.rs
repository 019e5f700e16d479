//! A module for working with directed graphs.

use std::fmt;

use indexmap::IndexSet;
use itertools::Itertools;
use nalgebra::DMatrix;

use crate::{
    degree,
    error::Result,
    graph::{Direction, Graph, Neighbours, VertexIndex},
    undirected::UndirectedGraph,
};

/// A directed graph over the dense vertex indices `[0, size)`.
///
/// Out- and in-neighbourhoods are both stored so that traversals can run in either direction
/// without rebuilding the graph. The two are kept consistent by every mutation:
/// `v ∈ out(u) ⇔ u ∈ in(v)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectedGraph {
    out_adjacency: Vec<IndexSet<VertexIndex>>,
    in_adjacency: Vec<IndexSet<VertexIndex>>,
    edge_count: usize,
}

impl DirectedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `size` isolated vertices.
    pub fn with_size(size: usize) -> Self {
        Self {
            out_adjacency: vec![IndexSet::new(); size],
            in_adjacency: vec![IndexSet::new(); size],
            edge_count: 0,
        }
    }

    /// Creates a graph with `size` vertices from a collection of `(source, target)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::directed::DirectedGraph;
    ///
    /// let graph = DirectedGraph::from_edges(3, [(0, 1), (1, 2)])?;
    ///
    /// assert!(graph.has_edge(0, 1)?);
    /// assert!(!graph.has_edge(1, 0)?);
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn from_edges<I>(size: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VertexIndex, VertexIndex)>,
    {
        let mut graph = Self::with_size(size);
        for (source, target) in edges {
            graph.add_edge(source, target)?;
        }

        Ok(graph)
    }

    /// Returns the vertex count of the graph.
    pub fn size(&self) -> usize {
        self.out_adjacency.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self) -> VertexIndex {
        self.out_adjacency.push(IndexSet::new());
        self.in_adjacency.push(IndexSet::new());
        self.out_adjacency.len() - 1
    }

    /// Grows the graph to `size` vertices. Shrinking is a no-op.
    pub fn resize(&mut self, size: usize) {
        if size > self.size() {
            self.out_adjacency.resize_with(size, IndexSet::new);
            self.in_adjacency.resize_with(size, IndexSet::new);
        }
    }

    /// Inserts the edge `source -> target` and returns whether it was absent.
    pub fn add_edge(&mut self, source: VertexIndex, target: VertexIndex) -> Result<bool> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;

        let is_inserted = self.out_adjacency[source].insert(target);
        if is_inserted {
            self.in_adjacency[target].insert(source);
            self.edge_count += 1;
        }

        Ok(is_inserted)
    }

    /// Inserts both `u -> v` and `v -> u`.
    pub fn add_reciprocal_edge(&mut self, u: VertexIndex, v: VertexIndex) -> Result<()> {
        self.add_edge(u, v)?;
        self.add_edge(v, u)?;

        Ok(())
    }

    /// Checks if the graph contains the edge `source -> target`.
    pub fn has_edge(&self, source: VertexIndex, target: VertexIndex) -> Result<bool> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;

        Ok(self.out_adjacency[source].contains(&target))
    }

    /// Removes the edge `source -> target` and returns whether it was present.
    pub fn remove_edge(&mut self, source: VertexIndex, target: VertexIndex) -> Result<bool> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;

        let is_removed = self.out_adjacency[source].shift_remove(&target);
        if is_removed {
            self.in_adjacency[target].shift_remove(&source);
            self.edge_count -= 1;
        }

        Ok(is_removed)
    }

    /// Removes every edge entering or leaving `vertex`, keeping the vertex itself.
    pub fn remove_vertex_edges(&mut self, vertex: VertexIndex) -> Result<()> {
        self.check_vertex(vertex)?;

        let successors = std::mem::take(&mut self.out_adjacency[vertex]);
        for successor in &successors {
            self.in_adjacency[*successor].shift_remove(&vertex);
        }
        self.edge_count -= successors.len();

        // A self-loop was already dropped with the successors.
        let predecessors = std::mem::take(&mut self.in_adjacency[vertex]);
        for predecessor in &predecessors {
            if self.out_adjacency[*predecessor].shift_remove(&vertex) {
                self.edge_count -= 1;
            }
        }

        Ok(())
    }

    /// Removes every edge of the form `v -> v`.
    pub fn remove_self_loops(&mut self) {
        for vertex in 0..self.size() {
            if self.out_adjacency[vertex].shift_remove(&vertex) {
                self.in_adjacency[vertex].shift_remove(&vertex);
                self.edge_count -= 1;
            }
        }
    }

    /// Returns the targets of the edges leaving `vertex`, in insertion order.
    pub fn out_neighbours(&self, vertex: VertexIndex) -> Result<Neighbours<'_>> {
        self.check_vertex(vertex)?;

        Ok(self.out_adjacency[vertex].iter().copied())
    }

    /// Returns the sources of the edges entering `vertex`, in insertion order.
    pub fn in_neighbours(&self, vertex: VertexIndex) -> Result<Neighbours<'_>> {
        self.check_vertex(vertex)?;

        Ok(self.in_adjacency[vertex].iter().copied())
    }

    pub fn out_degree(&self, vertex: VertexIndex) -> Result<usize> {
        self.check_vertex(vertex)?;

        Ok(self.out_adjacency[vertex].len())
    }

    pub fn in_degree(&self, vertex: VertexIndex) -> Result<usize> {
        self.check_vertex(vertex)?;

        Ok(self.in_adjacency[vertex].len())
    }

    pub fn out_degrees(&self) -> Vec<usize> {
        self.out_adjacency.iter().map(IndexSet::len).collect()
    }

    pub fn in_degrees(&self) -> Vec<usize> {
        self.in_adjacency.iter().map(IndexSet::len).collect()
    }

    /// Iterates over every edge as a `(source, target)` pair, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        self.out_adjacency
            .iter()
            .enumerate()
            .flat_map(|(source, targets)| targets.iter().map(move |target| (source, *target)))
    }

    /// Returns the graph with every edge flipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::directed::DirectedGraph;
    ///
    /// let graph = DirectedGraph::from_edges(2, [(0, 1)])?;
    /// let reversed = graph.reversed();
    ///
    /// assert!(reversed.has_edge(1, 0)?);
    /// assert!(!reversed.has_edge(0, 1)?);
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn reversed(&self) -> Self {
        Self {
            out_adjacency: self.in_adjacency.clone(),
            in_adjacency: self.out_adjacency.clone(),
            edge_count: self.edge_count,
        }
    }

    /// Returns the undirected graph obtained by forgetting edge directions. Reciprocal edges
    /// collapse into a single undirected edge.
    pub fn to_undirected(&self) -> UndirectedGraph {
        let mut graph = UndirectedGraph::with_size(self.size());
        for (source, target) in self.edges() {
            graph.insert_edge(source, target);
        }

        graph
    }

    /// Computes the density of the graph, `m / (n (n - 1))`.
    ///
    /// Returns 0 for graphs with fewer than two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::directed::DirectedGraph;
    ///
    /// let graph = DirectedGraph::from_edges(3, [(0, 1), (1, 2)])?;
    /// assert_eq!(graph.density(), 1.0 / 3.0);
    /// # Ok::<(), topograph::error::GraphError>(())
    /// ```
    pub fn density(&self) -> f64 {
        degree::density(self)
    }

    /// Constructs the (asymmetric) adjacency matrix, with `a_ij = 1` for every edge `i -> j`.
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.size();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for (i, j) in self.edges() {
            matrix[(i, j)] = 1.0;
        }

        matrix
    }

    /// The targets of the edges leaving an in-range `vertex`, for constant-time membership tests.
    pub(crate) fn successor_set(&self, vertex: VertexIndex) -> &IndexSet<VertexIndex> {
        &self.out_adjacency[vertex]
    }
}

impl Graph for DirectedGraph {
    fn size(&self) -> usize {
        self.out_adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn is_directed(&self) -> bool {
        true
    }

    fn adjacent(&self, vertex: VertexIndex, direction: Direction) -> Neighbours<'_> {
        match direction {
            Direction::Outgoing => self.out_adjacency[vertex].iter().copied(),
            Direction::Incoming => self.in_adjacency[vertex].iter().copied(),
        }
    }

    fn adjacent_count(&self, vertex: VertexIndex, direction: Direction) -> usize {
        match direction {
            Direction::Outgoing => self.out_adjacency[vertex].len(),
            Direction::Incoming => self.in_adjacency[vertex].len(),
        }
    }
}

impl fmt::Display for DirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Directed graph of size {}", self.size())?;
        for (vertex, targets) in self.out_adjacency.iter().enumerate() {
            writeln!(f, "{vertex} -> {}", targets.iter().join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;
    use crate::error::GraphError;

    /// Checks `v ∈ out(u) ⇔ u ∈ in(v)` for every pair.
    fn assert_consistent(graph: &DirectedGraph) {
        for u in graph.vertices() {
            for v in graph.out_neighbours(u).unwrap() {
                assert!(graph.in_neighbours(v).unwrap().any(|w| w == u));
            }
            for v in graph.in_neighbours(u).unwrap() {
                assert!(graph.out_neighbours(v).unwrap().any(|w| w == u));
            }
        }

        let out_total: usize = graph.out_degrees().iter().sum();
        let in_total: usize = graph.in_degrees().iter().sum();
        assert_eq!(out_total, graph.edge_count());
        assert_eq!(in_total, graph.edge_count());
    }

    #[test]
    fn add_edge() {
        let mut graph = DirectedGraph::with_size(3);

        assert!(graph.add_edge(0, 1).unwrap());
        assert!(!graph.add_edge(0, 1).unwrap());
        assert!(graph.add_edge(1, 0).unwrap());

        assert_eq!(graph.edge_count(), 2);
        assert_consistent(&graph);
    }

    #[test]
    fn add_edge_out_of_range() {
        let mut graph = DirectedGraph::with_size(2);

        assert_eq!(
            graph.add_edge(5, 0),
            Err(GraphError::VertexOutOfRange { vertex: 5, size: 2 })
        );
    }

    #[test]
    fn add_vertex_and_resize() {
        let mut graph = digraph!([0, 1]);

        assert_eq!(graph.add_vertex(), 2);
        graph.resize(4);
        graph.resize(1);

        assert_eq!(graph.size(), 4);
        assert!(graph.has_edge(0, 1).unwrap());
        assert_eq!(graph.in_degree(3).unwrap(), 0);
    }

    #[test]
    fn add_reciprocal_edge() {
        let mut graph = DirectedGraph::with_size(2);
        graph.add_reciprocal_edge(0, 1).unwrap();

        assert!(graph.has_edge(0, 1).unwrap());
        assert!(graph.has_edge(1, 0).unwrap());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn remove_edge() {
        let mut graph = digraph!([0, 1, 2]);

        assert!(!graph.remove_edge(1, 0).unwrap());
        assert!(graph.remove_edge(0, 1).unwrap());

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.in_degree(1).unwrap(), 0);
        assert_consistent(&graph);
    }

    #[test]
    fn remove_vertex_edges() {
        let mut graph = digraph!([0, 1, 2, 1, 3], [3, 0]);
        graph.add_edge(1, 1).unwrap();

        graph.remove_vertex_edges(1).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(3, 0).unwrap());
        assert_eq!(graph.out_degree(1).unwrap(), 0);
        assert_eq!(graph.in_degree(1).unwrap(), 0);
        assert_consistent(&graph);
    }

    #[test]
    fn remove_self_loops() {
        let mut graph = digraph!([0, 1]);
        graph.add_edge(1, 1).unwrap();

        graph.remove_self_loops();

        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.has_edge(1, 1).unwrap());
        assert_consistent(&graph);
    }

    #[test]
    fn degrees() {
        let graph = digraph!([0, 1, 2], [0, 2]);

        assert_eq!(graph.out_degrees(), vec![2, 1, 0]);
        assert_eq!(graph.in_degrees(), vec![0, 1, 2]);
        assert!(graph.out_degree(3).is_err());
    }

    #[test]
    fn edges() {
        let graph = digraph!([0, 1, 2], [2, 0]);

        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn to_undirected_merges_reciprocal_edges() {
        let mut graph = digraph!([0, 1, 2]);
        graph.add_edge(1, 0).unwrap();

        let undirected = graph.to_undirected();

        assert_eq!(undirected.edge_count(), 2);
        assert!(undirected.has_edge(1, 0).unwrap());
        assert!(undirected.has_edge(2, 1).unwrap());
    }

    #[test]
    fn to_undirected_keeps_isolated_vertices_and_self_loops() {
        let mut graph = digraph!([0, 0, 1]);
        graph.resize(3);

        let undirected = graph.to_undirected();

        assert_eq!(undirected.size(), 3);
        assert_eq!(undirected.edge_count(), 2);
        assert!(undirected.has_edge(0, 0).unwrap());
        assert_eq!(undirected.degrees(), vec![2, 1, 0]);
    }

    #[test]
    fn density() {
        assert_eq!(DirectedGraph::new().density(), 0.0);
        assert_eq!(digraph!([0, 1, 2]).density(), 1.0 / 3.0);
    }

    #[test]
    fn adjacency_matrix() {
        let graph = digraph!([0, 1, 2]);

        assert_eq!(
            graph.adjacency_matrix(),
            dmatrix![0.0, 1.0, 0.0;
                     0.0, 0.0, 1.0;
                     0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn display() {
        let graph = digraph!([0, 1], [0, 2]);

        assert_eq!(
            graph.to_string(),
            "Directed graph of size 3\n0 -> 1, 2\n1 -> \n2 -> \n"
        );
    }
}
