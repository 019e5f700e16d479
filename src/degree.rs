//! Degree distributions, density and reciprocity.

use std::collections::BTreeMap;

use crate::{
    directed::DirectedGraph,
    graph::{Direction, Graph},
    undirected::UndirectedGraph,
};

/// Counts the vertices of every degree.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use topograph::{degree::degree_histogram, undirected::UndirectedGraph};
///
/// let graph = UndirectedGraph::from_edges(4, [(0, 1), (1, 2)])?;
///
/// assert_eq!(degree_histogram(&graph), BTreeMap::from([(0, 1), (1, 2), (2, 1)]));
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn degree_histogram(graph: &UndirectedGraph) -> BTreeMap<usize, usize> {
    histogram(graph.degrees())
}

/// Counts the vertices of every in-degree.
pub fn in_degree_histogram(graph: &DirectedGraph) -> BTreeMap<usize, usize> {
    histogram(graph.in_degrees())
}

/// Counts the vertices of every out-degree.
pub fn out_degree_histogram(graph: &DirectedGraph) -> BTreeMap<usize, usize> {
    histogram(graph.out_degrees())
}

fn histogram(degrees: Vec<usize>) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    for degree in degrees {
        *histogram.entry(degree).or_insert(0) += 1;
    }

    histogram
}

/// Computes the fraction of the possible edges present in the graph: `m / (n (n - 1))` for
/// directed graphs, twice that for undirected ones.
///
/// Returns 0 for graphs with fewer than two vertices.
pub fn density<G: Graph>(graph: &G) -> f64 {
    if graph.size() < 2 {
        return 0.0;
    }

    let n = graph.size() as f64;
    let possible_edges = if graph.is_directed() {
        n * (n - 1.0)
    } else {
        n * (n - 1.0) / 2.0
    };

    graph.edge_count() as f64 / possible_edges
}

/// Computes the fraction of the edges `u -> v` for which `v -> u` is also present. Self-loops are
/// never counted as reciprocated. Returns 0 for a graph without edges.
///
/// # Examples
///
/// ```
/// use topograph::{degree::reciprocity, directed::DirectedGraph};
///
/// let graph = DirectedGraph::from_edges(4, [(0, 1), (1, 0), (2, 0), (1, 3)])?;
///
/// assert_eq!(reciprocity(&graph), 0.5);
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn reciprocity(graph: &DirectedGraph) -> f64 {
    if graph.edge_count() == 0 {
        return 0.0;
    }

    let reciprocated: usize = reciprocal_degrees(graph).into_iter().sum();

    reciprocated as f64 / graph.edge_count() as f64
}

/// Counts, for every vertex, the neighbours it is linked to in both directions.
pub fn reciprocal_degrees(graph: &DirectedGraph) -> Vec<usize> {
    graph
        .vertices()
        .map(|vertex| {
            graph
                .adjacent(vertex, Direction::Outgoing)
                .filter(|target| {
                    *target != vertex && graph.successor_set(*target).contains(&vertex)
                })
                .count()
        })
        .collect()
}

/// Computes, for every vertex, the Jaccard similarity of its in- and out-neighbourhoods:
/// `r / (in + out - r)` with `r` the reciprocal degree. Isolated vertices get 0.
pub fn jaccard_reciprocities(graph: &DirectedGraph) -> Vec<f64> {
    per_vertex_reciprocity(graph, |reciprocal, total| reciprocal / (total - reciprocal))
}

/// Computes, for every vertex, the share of its edge endpoints that belong to reciprocal pairs:
/// `2r / (in + out)` with `r` the reciprocal degree. Isolated vertices get 0.
pub fn reciprocity_ratios(graph: &DirectedGraph) -> Vec<f64> {
    per_vertex_reciprocity(graph, |reciprocal, total| 2.0 * reciprocal / total)
}

fn per_vertex_reciprocity<F>(graph: &DirectedGraph, ratio: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let in_degrees = graph.in_degrees();
    let out_degrees = graph.out_degrees();

    reciprocal_degrees(graph)
        .into_iter()
        .zip(in_degrees.into_iter().zip(out_degrees))
        .map(|(reciprocal, (in_degree, out_degree))| {
            let total = in_degree + out_degree;
            if total == 0 {
                0.0
            } else {
                ratio(reciprocal as f64, total as f64)
            }
        })
        .collect()
}
