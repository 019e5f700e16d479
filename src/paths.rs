//! Geodesics: shortest paths between vertices, one or all of them.
//!
//! Paths are sequences of vertices starting at the source and ending at the destination. A vertex
//! has a single, empty geodesic to itself, and no geodesic to a vertex it can't reach.

use crate::{
    error::{GraphError, Result},
    graph::{Graph, VertexIndex},
    traversal::{find_all_predecessors, find_predecessors, MultiplePredecessors, Predecessors},
};

/// A sequence of vertices, each adjacent to the next.
pub type Path = Vec<VertexIndex>;

impl Predecessors {
    /// Rebuilds the geodesic from the source of the search to `destination` by walking the
    /// predecessors backwards.
    pub fn path_to(&self, destination: VertexIndex) -> Result<Path> {
        self.check_destination(destination)?;

        if destination == self.source || !self.is_reachable(destination) {
            return Ok(Vec::new());
        }

        let mut path = vec![destination];
        let mut current = destination;
        while let Some(predecessor) = self.predecessor(current) {
            path.push(predecessor);
            current = predecessor;
        }
        path.reverse();

        Ok(path)
    }

    fn check_destination(&self, destination: VertexIndex) -> Result<()> {
        if destination < self.distances.len() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: destination,
                size: self.distances.len(),
            })
        }
    }
}

impl MultiplePredecessors {
    /// Enumerates every geodesic from the source of the search to `destination`.
    ///
    /// The paths are grown backwards from the destination one level at a time, so the depth of
    /// the enumeration never depends on the call stack.
    pub fn paths_to(&self, destination: VertexIndex) -> Result<Vec<Path>> {
        if destination >= self.distances.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex: destination,
                size: self.distances.len(),
            });
        }

        if destination == self.source {
            return Ok(vec![Vec::new()]);
        }
        if !self.is_reachable(destination) {
            return Ok(Vec::new());
        }

        // Paths are built from the destination towards the source and flipped at the end.
        let mut reversed_paths: Vec<Path> = vec![vec![destination]];
        for _ in 0..self.distances[destination] {
            reversed_paths = reversed_paths
                .into_iter()
                .flat_map(|path| {
                    let head = path[path.len() - 1];
                    self.predecessors(head).iter().map(move |predecessor| {
                        let mut extended = path.clone();
                        extended.push(*predecessor);
                        extended
                    })
                })
                .collect();
        }

        Ok(reversed_paths
            .into_iter()
            .map(|mut path| {
                path.reverse();
                path
            })
            .collect())
    }
}

/// Finds one geodesic from `source` to `destination`.
///
/// Ties between geodesics are broken by the order in which neighbours were inserted. On
/// undirected graphs the search always starts from the smaller of the two vertices, so swapping
/// the endpoints gives the same path reversed.
pub fn find_geodesic<G: Graph>(
    graph: &G,
    source: VertexIndex,
    destination: VertexIndex,
) -> Result<Path> {
    graph.check_vertex(source)?;
    graph.check_vertex(destination)?;

    if !graph.is_directed() && source > destination {
        let mut path = find_predecessors(graph, destination)?.path_to(source)?;
        path.reverse();
        return Ok(path);
    }

    find_predecessors(graph, source)?.path_to(destination)
}

/// Finds every geodesic from `source` to `destination`.
///
/// # Examples
///
/// ```
/// use topograph::{paths::find_all_geodesics, undirected::UndirectedGraph};
///
/// // A square: there are two ways around to the opposite corner.
/// let graph = UndirectedGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)])?;
///
/// assert_eq!(
///     find_all_geodesics(&graph, 0, 2)?,
///     vec![vec![0, 1, 2], vec![0, 3, 2]]
/// );
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn find_all_geodesics<G: Graph>(
    graph: &G,
    source: VertexIndex,
    destination: VertexIndex,
) -> Result<Vec<Path>> {
    graph.check_vertex(destination)?;

    find_all_predecessors(graph, source)?.paths_to(destination)
}

/// Finds one geodesic from `source` to every vertex, sharing a single traversal.
///
/// Every path comes out of the search from `source`, so on undirected graphs ties may be broken
/// differently than by [`find_geodesic`] for destinations smaller than `source`.
pub fn find_geodesics_from_vertex<G: Graph>(graph: &G, source: VertexIndex) -> Result<Vec<Path>> {
    let predecessors = find_predecessors(graph, source)?;

    graph
        .vertices()
        .map(|destination| predecessors.path_to(destination))
        .collect()
}

/// Finds every geodesic from `source` to every vertex, sharing a single traversal.
pub fn find_all_geodesics_from_vertex<G: Graph>(
    graph: &G,
    source: VertexIndex,
) -> Result<Vec<Vec<Path>>> {
    let predecessors = find_all_predecessors(graph, source)?;

    graph
        .vertices()
        .map(|destination| predecessors.paths_to(destination))
        .collect()
}
