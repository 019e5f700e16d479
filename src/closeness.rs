//! A module for distance-based centralities: closeness, harmonic centrality and the harmonic mean
//! geodesic.
//!
//! Closeness and harmonic centrality measure how easily a vertex is reached by the others, so on
//! directed graphs they are computed from the distances *to* the vertex, i.e. on the reversed
//! graph. The harmonic mean geodesic follows the outgoing edges instead.

use log::trace;

use crate::{
    compute::{add_assign, reduce_over_sources},
    error::Result,
    graph::{Direction, Graph, VertexIndex},
    traversal::bfs_distances,
};

/// Computes the closeness centrality of `vertex`: `(r - 1) / Σ d(u, vertex)`, where the sum runs
/// over the `r` vertices (including `vertex`) that can reach it.
///
/// Returns 0 for a vertex that no other vertex can reach.
///
/// # Examples
///
/// ```
/// use topograph::{closeness::closeness_centrality, undirected::UndirectedGraph};
///
/// let graph = UndirectedGraph::from_edges(3, [(0, 1), (1, 2)])?;
///
/// assert_eq!(closeness_centrality(&graph, 1)?, 1.0);
/// assert_eq!(closeness_centrality(&graph, 0)?, 2.0 / 3.0);
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn closeness_centrality<G: Graph>(graph: &G, vertex: VertexIndex) -> Result<f64> {
    graph.check_vertex(vertex)?;
    trace!("closeness_centrality: vertex {vertex}");

    Ok(closeness_for_node(graph, vertex))
}

/// Computes the closeness centrality of every vertex, spreading the traversals over
/// `num_threads` workers.
pub fn closeness_centralities<G: Graph>(graph: &G, num_threads: usize) -> Vec<f64> {
    per_vertex("closeness_centralities", graph, num_threads, closeness_for_node)
}

/// Computes the harmonic centrality of `vertex`: `Σ 1 / d(u, vertex)` over the vertices `u ≠
/// vertex` that can reach it.
pub fn harmonic_centrality<G: Graph>(graph: &G, vertex: VertexIndex) -> Result<f64> {
    graph.check_vertex(vertex)?;
    trace!("harmonic_centrality: vertex {vertex}");

    Ok(harmonic_for_node(graph, vertex))
}

/// Computes the harmonic centrality of every vertex, spreading the traversals over `num_threads`
/// workers.
pub fn harmonic_centralities<G: Graph>(graph: &G, num_threads: usize) -> Vec<f64> {
    per_vertex("harmonic_centralities", graph, num_threads, harmonic_for_node)
}

/// Computes the mean of `1 / d(vertex, u)` over the vertices `u ≠ vertex` that it can reach.
///
/// Returns 0 for a vertex that can't reach any other vertex.
pub fn harmonic_mean_geodesic<G: Graph>(graph: &G, vertex: VertexIndex) -> Result<f64> {
    graph.check_vertex(vertex)?;

    let distances = bfs_distances(graph, vertex, Direction::Outgoing);
    let reachable = reachable_distances(&distances).count();
    if reachable == 0 {
        return Ok(0.0);
    }

    let inverse_sum: f64 = reachable_distances(&distances).map(|d| 1.0 / d as f64).sum();

    Ok(inverse_sum / reachable as f64)
}

//
// Helpers
//

fn closeness_for_node<G: Graph>(graph: &G, index: VertexIndex) -> f64 {
    let distances = bfs_distances(graph, index, Direction::Incoming);

    let mut component_size = 1;
    let mut total_path_length = 0;
    for distance in reachable_distances(&distances) {
        component_size += 1;
        total_path_length += distance;
    }

    if total_path_length == 0 {
        0.0
    } else {
        (component_size - 1) as f64 / total_path_length as f64
    }
}

fn harmonic_for_node<G: Graph>(graph: &G, index: VertexIndex) -> f64 {
    let distances = bfs_distances(graph, index, Direction::Incoming);

    reachable_distances(&distances)
        .map(|distance| 1.0 / distance as f64)
        .sum()
}

/// The finite, non-zero distances, i.e. those of the reachable vertices other than the source.
fn reachable_distances(distances: &[usize]) -> impl Iterator<Item = usize> + '_ {
    let num_nodes = distances.len();

    distances
        .iter()
        .copied()
        .filter(move |distance| *distance != 0 && *distance < num_nodes)
}

/// Evaluates `metric` for every vertex over the worker pool.
fn per_vertex<G, F>(name: &str, graph: &G, num_threads: usize, metric: F) -> Vec<f64>
where
    G: Graph,
    F: Fn(&G, VertexIndex) -> f64 + Sync,
{
    let num_nodes = graph.size();

    reduce_over_sources(
        name,
        graph,
        num_threads,
        || vec![0.0; num_nodes],
        |partial, index| partial[index] = metric(graph, index),
        |total, partial| add_assign(total, partial),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn closeness_on_a_path() {
        let graph = graph!([0, 1, 2, 3]);

        // Vertex 0: distances 1, 2, 3.
        assert_eq!(closeness_centrality(&graph, 0).unwrap(), 3.0 / 6.0);
        // Vertex 1: distances 1, 1, 2.
        assert_eq!(closeness_centrality(&graph, 1).unwrap(), 3.0 / 4.0);
    }

    #[test]
    fn closeness_only_counts_the_component() {
        let graph = graph!([0, 1, 2], [3, 4], [5]);

        assert_eq!(closeness_centrality(&graph, 1).unwrap(), 1.0);
        assert_eq!(closeness_centrality(&graph, 3).unwrap(), 1.0);
        assert_eq!(closeness_centrality(&graph, 5).unwrap(), 0.0);
    }

    #[test]
    fn directed_closeness_uses_incoming_distances() {
        let graph = digraph!([0, 1, 2]);

        // Nothing reaches the head of the path.
        assert_eq!(closeness_centrality(&graph, 0).unwrap(), 0.0);
        // 1 is reached from 0, 2 from 1 and 0.
        assert_eq!(closeness_centrality(&graph, 1).unwrap(), 1.0);
        assert_eq!(closeness_centrality(&graph, 2).unwrap(), 2.0 / 3.0);
    }

    #[test]
    fn harmonic_on_a_star() {
        let graph = graph!([1, 0, 2], [3, 0, 4]);

        assert_eq!(harmonic_centrality(&graph, 0).unwrap(), 4.0);
        assert_eq!(harmonic_centrality(&graph, 1).unwrap(), 1.0 + 3.0 * 0.5);
    }

    #[test]
    fn directed_harmonic_uses_incoming_distances() {
        let graph = digraph!([0, 1, 2]);

        assert_eq!(harmonic_centrality(&graph, 0).unwrap(), 0.0);
        assert_eq!(harmonic_centrality(&graph, 2).unwrap(), 1.5);
    }

    #[test]
    fn harmonic_mean_geodesic() {
        let graph = graph!([0, 1, 2], [3]);

        assert_eq!(super::harmonic_mean_geodesic(&graph, 0).unwrap(), 0.75);
        assert_eq!(super::harmonic_mean_geodesic(&graph, 1).unwrap(), 1.0);
        assert_eq!(super::harmonic_mean_geodesic(&graph, 3).unwrap(), 0.0);
    }

    #[test]
    fn directed_harmonic_mean_geodesic_follows_outgoing_edges() {
        let graph = digraph!([0, 1, 2]);

        // 0 reaches 1 and 2, 1 reaches 2, 2 reaches nothing.
        assert_eq!(super::harmonic_mean_geodesic(&graph, 0).unwrap(), 0.75);
        assert_eq!(super::harmonic_mean_geodesic(&graph, 1).unwrap(), 1.0);
        assert_eq!(super::harmonic_mean_geodesic(&graph, 2).unwrap(), 0.0);
    }

    #[test]
    fn all_vertices_match_single_vertex() {
        let graph = graph!([0, 1, 2, 3, 0], [2, 4, 5], [6]);
        let closeness = closeness_centralities(&graph, 3);
        let harmonic = harmonic_centralities(&graph, 3);

        for vertex in graph.vertices() {
            assert_eq!(closeness[vertex], closeness_centrality(&graph, vertex).unwrap());
            assert_eq!(harmonic[vertex], harmonic_centrality(&graph, vertex).unwrap());
        }
    }

    #[test]
    fn empty_graph() {
        let graph = graph!();

        assert!(closeness_centralities(&graph, 2).is_empty());
        assert!(harmonic_centralities(&graph, 2).is_empty());
    }

    #[test]
    fn out_of_range() {
        let graph = graph!([0, 1]);

        assert_eq!(
            closeness_centrality(&graph, 2),
            Err(GraphError::VertexOutOfRange { vertex: 2, size: 2 })
        );
        assert!(harmonic_centrality(&graph, 2).is_err());
        assert!(super::harmonic_mean_geodesic(&graph, 2).is_err());
    }
}
