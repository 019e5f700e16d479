//! A module for the multi-threaded computation of betweenness centrality.

use std::collections::VecDeque;

use crate::{
    compute::{add_assign, reduce_over_sources},
    graph::{Direction, Graph, VertexIndex},
};

/// How a vertex is credited for the geodesics it lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeodesicCounting {
    /// A pair of endpoints joined by `k` geodesics credits each of them with weight `1 / k`.
    Fractional,
    /// Every geodesic counts for 1, however many join the same pair.
    Absolute,
}

/// Computes the betweenness centrality of every vertex, spreading the sources over
/// `num_threads` workers.
///
/// The endpoints of a geodesic are not credited for it. Undirected graphs count every unordered
/// pair of endpoints once.
///
/// # Examples
///
/// ```
/// use topograph::{
///     betweenness::{betweenness_centrality, GeodesicCounting},
///     undirected::UndirectedGraph,
/// };
///
/// // A square: each corner lies on one of the two geodesics joining its neighbours.
/// let graph = UndirectedGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)])?;
///
/// assert_eq!(
///     betweenness_centrality(&graph, GeodesicCounting::Fractional, 2),
///     vec![0.5; 4]
/// );
/// assert_eq!(
///     betweenness_centrality(&graph, GeodesicCounting::Absolute, 2),
///     vec![1.0; 4]
/// );
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn betweenness_centrality<G: Graph>(
    graph: &G,
    counting: GeodesicCounting,
    num_threads: usize,
) -> Vec<f64> {
    let num_nodes = graph.size();

    let mut betweenness_count = reduce_over_sources(
        "betweenness_centrality",
        graph,
        num_threads,
        || vec![0.0; num_nodes],
        |partial, index| betweenness_for_node(graph, index, counting, partial),
        |total, partial| add_assign(total, partial),
    );

    if !graph.is_directed() {
        // Every unordered pair was visited from both of its endpoints.
        for value in &mut betweenness_count {
            *value /= 2.0;
        }
    }

    betweenness_count
}

/// this is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs"
///
/// In absolute mode `delta[v]` holds the number of geodesics leaving `v` towards the vertices
/// below it instead of its dependency, and is weighted by the number of geodesics reaching `v`.
fn betweenness_for_node<G: Graph>(
    graph: &G,
    index: VertexIndex,
    counting: GeodesicCounting,
    betweenness_count: &mut [f64],
) {
    let num_nodes = graph.size();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<usize> = vec![num_nodes; num_nodes];
    let mut totals: Vec<Vec<VertexIndex>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<VertexIndex> = VecDeque::new();
    let mut stack: Vec<VertexIndex> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = 0;
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for w in graph.adjacent(v, Direction::Outgoing) {
            if distance[w] == num_nodes {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                sigma[w] += sigma[v];
                totals[w].push(v);
            }
        }
    }

    // Vertices are popped in non-increasing distance, so every vertex is complete before its
    // predecessors read it.
    while let Some(w) = stack.pop() {
        for &v in &totals[w] {
            delta[v] += match counting {
                GeodesicCounting::Fractional => sigma[v] / sigma[w] * (1.0 + delta[w]),
                GeodesicCounting::Absolute => 1.0 + delta[w],
            };
        }
        if w != index {
            betweenness_count[w] += match counting {
                GeodesicCounting::Fractional => delta[w],
                GeodesicCounting::Absolute => sigma[w] * delta[w],
            };
        }
    }
}
