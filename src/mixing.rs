//! How vertices connect with respect to their degree or to a partition: degree assortativity and
//! modularity.

use std::collections::HashMap;

use log::trace;

use crate::{
    error::{GraphError, Result},
    graph::VertexIndex,
    undirected::UndirectedGraph,
};

/// Computes the degree correlation coefficient (assortativity): the Pearson correlation between
/// the degrees at both ends of the edges, every edge being counted in both orientations.
///
/// Returns 0 for a graph without edges and NaN when every edge endpoint has the same degree, the
/// correlation being undefined.
pub fn degree_correlation(graph: &UndirectedGraph) -> f64 {
    if graph.edge_count() == 0 {
        return 0.0;
    }

    let degrees = graph.degrees();

    let mut stubs = 0.0;
    let mut sum = 0.0;
    let mut sum_of_squares = 0.0;
    let mut sum_of_products = 0.0;
    for edge in graph.edges() {
        let (source, target) = (
            degrees[edge.source()] as f64,
            degrees[edge.target()] as f64,
        );

        stubs += 2.0;
        sum += source + target;
        sum_of_squares += source * source + target * target;
        sum_of_products += 2.0 * source * target;
    }

    let mean = sum / stubs;
    let variance = sum_of_squares / stubs - mean * mean;
    let covariance = sum_of_products / stubs - mean * mean;

    if variance == 0.0 {
        return f64::NAN;
    }

    covariance / variance
}

/// Computes the modularity of a partition of the vertices, given as the class of every vertex:
///
/// `Q = Σ_c [ m_c / m - (d_c / 2m)² ]`
///
/// where `m_c` is the number of edges inside class `c` and `d_c` the sum of the degrees of its
/// vertices. Class identifiers are arbitrary. Returns 0 for a graph without edges.
///
/// # Examples
///
/// ```
/// use topograph::{mixing::modularity, undirected::UndirectedGraph};
///
/// // Two triangles joined by the edge {2, 3}.
/// let graph = UndirectedGraph::from_edges(
///     6,
///     [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)],
/// )?;
///
/// let q = modularity(&graph, &[0, 0, 0, 1, 1, 1])?;
/// assert!((q - 5.0 / 14.0).abs() < 1e-12);
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn modularity(graph: &UndirectedGraph, classes: &[usize]) -> Result<f64> {
    if classes.len() != graph.size() {
        return Err(GraphError::invalid_partition(format!(
            "{} classes given for {} vertices",
            classes.len(),
            graph.size()
        )));
    }

    let edge_count = graph.edge_count();
    if edge_count == 0 {
        return Ok(0.0);
    }

    let mut internal_edges = 0;
    for edge in graph.edges() {
        if classes[edge.source()] == classes[edge.target()] {
            internal_edges += 1;
        }
    }

    let mut degree_sums: HashMap<usize, usize> = HashMap::new();
    for (class, degree) in classes.iter().zip(graph.degrees()) {
        *degree_sums.entry(*class).or_insert(0) += degree;
    }

    let stubs = 2.0 * edge_count as f64;
    let expected: f64 = degree_sums
        .values()
        .map(|sum| {
            let fraction = *sum as f64 / stubs;
            fraction * fraction
        })
        .sum();

    trace!("modularity: {} classes", degree_sums.len());

    Ok(internal_edges as f64 / edge_count as f64 - expected)
}

/// Converts a partition given as a list of classes into the class of every vertex, as expected
/// by [`modularity`]. The classes must cover every vertex of `[0, size)` exactly once.
pub fn partition_from_classes(size: usize, classes: &[Vec<VertexIndex>]) -> Result<Vec<usize>> {
    let mut partition: Vec<Option<usize>> = vec![None; size];

    for (class, vertices) in classes.iter().enumerate() {
        for vertex in vertices {
            let assigned = partition.get_mut(*vertex).ok_or_else(|| {
                GraphError::invalid_partition(format!(
                    "vertex {vertex} is out of range for size {size}"
                ))
            })?;
            if let Some(previous) = assigned {
                return Err(GraphError::invalid_partition(format!(
                    "vertex {vertex} is in classes {previous} and {class}"
                )));
            }
            *assigned = Some(class);
        }
    }

    partition
        .into_iter()
        .enumerate()
        .map(|(vertex, class)| {
            class.ok_or_else(|| {
                GraphError::invalid_partition(format!("vertex {vertex} isn't in any class"))
            })
        })
        .collect()
}
