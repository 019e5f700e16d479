//! Breadth-first traversals and unweighted shortest-path lengths.
//!
//! Distances are edge counts. A vertex that can't be reached from the source is reported at
//! distance `n`, the size of the graph, which is strictly greater than the length of any simple
//! path. Callers tell reachable vertices apart by testing `distance < n`.

use std::collections::VecDeque;

use log::trace;

use crate::{
    compute::reduce_over_sources,
    error::Result,
    graph::{Direction, Graph, VertexIndex},
};

/// The distances and one predecessor per vertex found by a breadth-first search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predecessors {
    pub(crate) source: VertexIndex,
    pub(crate) distances: Vec<usize>,
    /// The vertex through which each vertex was first discovered, `None` for the source and the
    /// unreachable vertices.
    pub(crate) predecessors: Vec<Option<VertexIndex>>,
}

impl Predecessors {
    pub fn source(&self) -> VertexIndex {
        self.source
    }

    /// The distance from the source to every vertex, `n` if unreachable.
    pub fn distances(&self) -> &[usize] {
        &self.distances
    }

    pub fn predecessor(&self, vertex: VertexIndex) -> Option<VertexIndex> {
        self.predecessors.get(vertex).copied().flatten()
    }

    pub fn is_reachable(&self, vertex: VertexIndex) -> bool {
        self.distances
            .get(vertex)
            .map_or(false, |distance| *distance < self.distances.len())
    }
}

/// The distances and every shortest-path predecessor per vertex found by a breadth-first search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplePredecessors {
    pub(crate) source: VertexIndex,
    pub(crate) distances: Vec<usize>,
    /// For each vertex, every neighbour one step closer to the source, in discovery order.
    pub(crate) predecessors: Vec<Vec<VertexIndex>>,
}

impl MultiplePredecessors {
    pub fn source(&self) -> VertexIndex {
        self.source
    }

    /// The distance from the source to every vertex, `n` if unreachable.
    pub fn distances(&self) -> &[usize] {
        &self.distances
    }

    pub fn predecessors(&self, vertex: VertexIndex) -> &[VertexIndex] {
        self.predecessors.get(vertex).map_or(&[][..], Vec::as_slice)
    }

    pub fn is_reachable(&self, vertex: VertexIndex) -> bool {
        self.distances
            .get(vertex)
            .map_or(false, |distance| *distance < self.distances.len())
    }
}

/// Computes the distance from `source` to every vertex.
///
/// Directed graphs are traversed along their out-edges.
pub fn shortest_path_lengths_from_vertex<G: Graph>(
    graph: &G,
    source: VertexIndex,
) -> Result<Vec<usize>> {
    graph.check_vertex(source)?;

    Ok(bfs_distances(graph, source, Direction::Outgoing))
}

/// Computes the distance from every vertex to `target`.
///
/// Directed graphs are traversed along their in-edges; for undirected graphs this is the same as
/// [`shortest_path_lengths_from_vertex`].
pub fn shortest_path_lengths_to_vertex<G: Graph>(
    graph: &G,
    target: VertexIndex,
) -> Result<Vec<usize>> {
    graph.check_vertex(target)?;

    Ok(bfs_distances(graph, target, Direction::Incoming))
}

/// Computes the distance from `source` to `target`, `n` if `target` is unreachable.
pub fn shortest_path_length<G: Graph>(
    graph: &G,
    source: VertexIndex,
    target: VertexIndex,
) -> Result<usize> {
    graph.check_vertex(target)?;

    Ok(shortest_path_lengths_from_vertex(graph, source)?[target])
}

/// Computes the distance between every ordered pair of vertices; row `u` holds the distances from
/// `u`.
pub fn all_pairs_shortest_path_lengths<G: Graph>(graph: &G, num_threads: usize) -> Vec<Vec<usize>> {
    let rows = reduce_over_sources(
        "all_pairs_shortest_path_lengths",
        graph,
        num_threads,
        Vec::new,
        |rows: &mut Vec<(VertexIndex, Vec<usize>)>, source| {
            rows.push((source, bfs_distances(graph, source, Direction::Outgoing)))
        },
        |total, mut partial| total.append(&mut partial),
    );

    let mut matrix = vec![Vec::new(); graph.size()];
    for (source, distances) in rows {
        matrix[source] = distances;
    }

    matrix
}

/// Runs a breadth-first search from `source` and records the vertex through which every vertex
/// was first reached.
pub fn find_predecessors<G: Graph>(graph: &G, source: VertexIndex) -> Result<Predecessors> {
    graph.check_vertex(source)?;

    let num_nodes = graph.size();
    let mut distances = vec![num_nodes; num_nodes];
    let mut predecessors = vec![None; num_nodes];
    let mut queue = VecDeque::from([source]);

    distances[source] = 0;

    while let Some(current) = queue.pop_front() {
        for neighbour in graph.adjacent(current, Direction::Outgoing) {
            if distances[neighbour] == num_nodes {
                distances[neighbour] = distances[current] + 1;
                predecessors[neighbour] = Some(current);
                queue.push_back(neighbour);
            }
        }
    }

    trace!("find_predecessors: source {source}");

    Ok(Predecessors {
        source,
        distances,
        predecessors,
    })
}

/// Runs a breadth-first search from `source` and records, for every vertex, all of the
/// neighbours that reach it at its minimal distance.
pub fn find_all_predecessors<G: Graph>(
    graph: &G,
    source: VertexIndex,
) -> Result<MultiplePredecessors> {
    graph.check_vertex(source)?;

    let num_nodes = graph.size();
    let mut distances = vec![num_nodes; num_nodes];
    let mut predecessors = vec![Vec::new(); num_nodes];
    let mut queue = VecDeque::from([source]);

    distances[source] = 0;

    while let Some(current) = queue.pop_front() {
        for neighbour in graph.adjacent(current, Direction::Outgoing) {
            if distances[neighbour] == num_nodes {
                distances[neighbour] = distances[current] + 1;
                queue.push_back(neighbour);
            }
            // Every vertex is dequeued once, so a predecessor can't be recorded twice.
            if distances[neighbour] == distances[current] + 1 {
                predecessors[neighbour].push(current);
            }
        }
    }

    trace!("find_all_predecessors: source {source}");

    Ok(MultiplePredecessors {
        source,
        distances,
        predecessors,
    })
}

/// Breadth-first distances from `source` along `direction`, `n` for unreachable vertices.
///
/// `source` must be in range.
pub(crate) fn bfs_distances<G: Graph>(
    graph: &G,
    source: VertexIndex,
    direction: Direction,
) -> Vec<usize> {
    let num_nodes = graph.size();
    let mut distances = vec![num_nodes; num_nodes];
    let mut queue = VecDeque::from([source]);

    distances[source] = 0;

    while let Some(current) = queue.pop_front() {
        for neighbour in graph.adjacent(current, direction) {
            if distances[neighbour] == num_nodes {
                distances[neighbour] = distances[current] + 1;
                queue.push_back(neighbour);
            }
        }
    }

    distances
}
