//! Triangles and the clustering statistics derived from them.
//!
//! Every measure is defined on undirected graphs. The `undirected_*` variants evaluate a
//! [`DirectedGraph`] as if its edges had no direction, reciprocal edges counting once, without
//! touching the graph itself. Graphs are expected to be free of self-loops.

use std::collections::BTreeMap;

use log::trace;

use crate::{
    directed::DirectedGraph,
    error::{GraphError, Result},
    graph::{Graph, VertexIndex},
    undirected::UndirectedGraph,
};

/// Three vertices, pairwise adjacent, in increasing order.
pub type Triangle = [VertexIndex; 3];

/// Counts the triangles `vertex` belongs to, i.e. the edges between its neighbours.
pub fn count_triangles_around_vertex(
    graph: &UndirectedGraph,
    vertex: VertexIndex,
) -> Result<usize> {
    graph.check_vertex(vertex)?;

    Ok(triangles_around(graph, vertex))
}

/// Counts the triangles every vertex belongs to.
pub fn triangle_counts(graph: &UndirectedGraph) -> Vec<usize> {
    graph
        .vertices()
        .map(|vertex| triangles_around(graph, vertex))
        .collect()
}

/// Counts the triangles of the graph.
pub fn count_triangles(graph: &UndirectedGraph) -> usize {
    // Every triangle is seen from each of its corners.
    triangle_counts(graph).iter().sum::<usize>() / 3
}

/// Lists every triangle once, ordered by their smallest then middle vertex.
///
/// # Examples
///
/// ```
/// use topograph::{clustering::find_all_triangles, undirected::UndirectedGraph};
///
/// // Two triangles sharing the edge {1, 2}.
/// let graph = UndirectedGraph::from_edges(4, [(0, 1), (1, 2), (2, 0), (1, 3), (3, 2)])?;
///
/// assert_eq!(find_all_triangles(&graph), vec![[0, 1, 2], [1, 2, 3]]);
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn find_all_triangles(graph: &UndirectedGraph) -> Vec<Triangle> {
    let mut triangles = Vec::new();

    for first in graph.vertices() {
        let mut higher: Vec<VertexIndex> = graph
            .neighbour_set(first)
            .iter()
            .copied()
            .filter(|second| first < *second)
            .collect();
        higher.sort_unstable();

        for (i, second) in higher.iter().enumerate() {
            let second_neighbours = graph.neighbour_set(*second);
            for third in &higher[i + 1..] {
                if second_neighbours.contains(third) {
                    triangles.push([first, *second, *third]);
                }
            }
        }
    }

    trace!("find_all_triangles: {} triangles", triangles.len());

    triangles
}

/// Computes the local clustering coefficient of `vertex`, `2 T / (d (d - 1))`.
///
/// Vertices with fewer than two neighbours have a coefficient of 0.
pub fn local_clustering_coefficient(graph: &UndirectedGraph, vertex: VertexIndex) -> Result<f64> {
    graph.check_vertex(vertex)?;

    Ok(clustering_of(
        graph.neighbour_set(vertex).len(),
        triangles_around(graph, vertex),
    ))
}

/// Computes the local clustering coefficient of every vertex.
pub fn local_clustering_coefficients(graph: &UndirectedGraph) -> Vec<f64> {
    graph
        .degrees()
        .into_iter()
        .zip(triangle_counts(graph))
        .map(|(degree, triangles)| clustering_of(degree, triangles))
        .collect()
}

/// Computes the global clustering coefficient (transitivity): three times the number of
/// triangles over the number of connected triples.
///
/// Returns 0 for a graph without connected triples.
pub fn global_clustering_coefficient(graph: &UndirectedGraph) -> f64 {
    transitivity(graph, &triangle_counts(graph))
}

/// Computes the global clustering coefficient from triangle counts obtained with
/// [`triangle_counts`].
pub fn global_clustering_coefficient_with_triangles(
    graph: &UndirectedGraph,
    triangle_counts: &[usize],
) -> Result<f64> {
    if triangle_counts.len() != graph.size() {
        return Err(GraphError::LengthMismatch {
            expected: graph.size(),
            found: triangle_counts.len(),
        });
    }

    Ok(transitivity(graph, triangle_counts))
}

/// Computes the redundancy of every vertex, its local clustering coefficient times `d - 1`.
pub fn redundancy(graph: &UndirectedGraph) -> Vec<f64> {
    local_clustering_coefficients(graph)
        .into_iter()
        .zip(graph.degrees())
        .map(|(clustering, degree)| match degree {
            0 => 0.0,
            _ => clustering * (degree - 1) as f64,
        })
        .collect()
}

/// Computes the average local clustering coefficient of the vertices of each degree, for the
/// degrees of 2 and above present in the graph.
pub fn clustering_spectrum(graph: &UndirectedGraph) -> BTreeMap<usize, f64> {
    let mut sums: BTreeMap<usize, (f64, usize)> = BTreeMap::new();

    for (degree, clustering) in graph
        .degrees()
        .into_iter()
        .zip(local_clustering_coefficients(graph))
    {
        if degree < 2 {
            continue;
        }
        let entry = sums.entry(degree).or_insert((0.0, 0));
        entry.0 += clustering;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(degree, (sum, count))| (degree, sum / count as f64))
        .collect()
}

/// Lists the degree of every neighbour of `vertex`, in neighbour order.
pub fn neighbourhood_degrees(graph: &UndirectedGraph, vertex: VertexIndex) -> Result<Vec<usize>> {
    Ok(graph
        .neighbours(vertex)?
        .map(|neighbour| graph.neighbour_set(neighbour).len())
        .collect())
}

/// Counts the neighbours of `vertex` by degree.
pub fn neighbourhood_degree_histogram(
    graph: &UndirectedGraph,
    vertex: VertexIndex,
) -> Result<BTreeMap<usize, usize>> {
    let mut histogram = BTreeMap::new();
    for degree in neighbourhood_degrees(graph, vertex)? {
        *histogram.entry(degree).or_insert(0) += 1;
    }

    Ok(histogram)
}

/// Computes the average degree of the neighbours of every vertex, 0 for isolated vertices.
///
/// When `normalized`, the averages are divided by `<k²> / <k>`, the average neighbour degree
/// expected in a graph without degree correlations.
pub fn neighbour_degree_spectrum(graph: &UndirectedGraph, normalized: bool) -> Vec<f64> {
    let degrees = graph.degrees();

    let mut spectrum: Vec<f64> = graph
        .vertices()
        .map(|vertex| {
            let neighbours = graph.neighbour_set(vertex);
            if neighbours.is_empty() {
                return 0.0;
            }
            let sum: usize = neighbours.iter().map(|neighbour| degrees[*neighbour]).sum();
            sum as f64 / neighbours.len() as f64
        })
        .collect();

    if normalized {
        let first_moment: usize = degrees.iter().sum();
        let second_moment: usize = degrees.iter().map(|degree| degree * degree).sum();

        if second_moment > 0 {
            for value in &mut spectrum {
                *value *= first_moment as f64 / second_moment as f64;
            }
        }
    }

    spectrum
}

/// Computes the local clustering coefficient of every vertex of a directed graph, ignoring edge
/// directions.
pub fn undirected_local_clustering_coefficients(graph: &DirectedGraph) -> Vec<f64> {
    local_clustering_coefficients(&graph.to_undirected())
}

/// Computes the global clustering coefficient of a directed graph, ignoring edge directions.
pub fn undirected_global_clustering_coefficient(graph: &DirectedGraph) -> f64 {
    global_clustering_coefficient(&graph.to_undirected())
}

/// Lists every triangle of a directed graph, ignoring edge directions.
pub fn find_all_directed_triangles(graph: &DirectedGraph) -> Vec<Triangle> {
    find_all_triangles(&graph.to_undirected())
}

/// The seven ways three vertices can be pairwise connected by directed edges.
///
/// The number in each name is the count of directed edges in the triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TriangleType {
    /// `a -> b -> c -> a`.
    ThreeCycle,
    /// Three single edges that don't form a cycle.
    ThreeNoCycle,
    /// A reciprocal edge closed into a cycle by the two single edges.
    FourCycle,
    /// A reciprocal edge whose endpoints both point to the third vertex.
    FourOutward,
    /// A reciprocal edge whose endpoints are both pointed to by the third vertex.
    FourInward,
    /// Two reciprocal edges and a single one.
    FiveCycle,
    /// Three reciprocal edges.
    SixCycle,
}

impl TriangleType {
    pub const ALL: [TriangleType; 7] = [
        TriangleType::ThreeCycle,
        TriangleType::ThreeNoCycle,
        TriangleType::FourCycle,
        TriangleType::FourOutward,
        TriangleType::FourInward,
        TriangleType::FiveCycle,
        TriangleType::SixCycle,
    ];

    /// Classifies the triangle formed by three vertices, `None` if one of the pairs isn't
    /// connected in either direction.
    pub fn classify(graph: &DirectedGraph, triangle: Triangle) -> Result<Option<Self>> {
        for vertex in triangle {
            graph.check_vertex(vertex)?;
        }

        Ok(Self::classify_in_range(graph, triangle))
    }

    fn classify_in_range(graph: &DirectedGraph, triangle: Triangle) -> Option<Self> {
        let [a, b, c] = triangle;
        let arc = |source: VertexIndex, target: VertexIndex| {
            graph.successor_set(source).contains(&target)
        };

        let pairs = [(a, b), (b, c), (c, a)];
        if pairs.iter().any(|&(u, v)| !arc(u, v) && !arc(v, u)) {
            return None;
        }

        let arc_count = pairs
            .iter()
            .map(|&(u, v)| usize::from(arc(u, v)) + usize::from(arc(v, u)))
            .sum::<usize>();

        let triangle_type = match arc_count {
            3 => {
                let forward = pairs.iter().all(|&(u, v)| arc(u, v));
                let backward = pairs.iter().all(|&(u, v)| arc(v, u));
                if forward || backward {
                    TriangleType::ThreeCycle
                } else {
                    TriangleType::ThreeNoCycle
                }
            }
            4 => {
                // Exactly one pair is reciprocal; `apex` is the vertex outside of it.
                let (u, v, apex) = if arc(a, b) && arc(b, a) {
                    (a, b, c)
                } else if arc(b, c) && arc(c, b) {
                    (b, c, a)
                } else {
                    (c, a, b)
                };

                if arc(u, apex) && arc(v, apex) {
                    TriangleType::FourOutward
                } else if arc(apex, u) && arc(apex, v) {
                    TriangleType::FourInward
                } else {
                    TriangleType::FourCycle
                }
            }
            5 => TriangleType::FiveCycle,
            _ => TriangleType::SixCycle,
        };

        Some(triangle_type)
    }
}

/// Counts the triangles of a directed graph by [`TriangleType`]. Every type is present in the
/// result, with a count of 0 if the graph has no triangle of that type.
pub fn triangle_spectrum(graph: &DirectedGraph) -> BTreeMap<TriangleType, usize> {
    let mut spectrum: BTreeMap<TriangleType, usize> =
        TriangleType::ALL.iter().map(|kind| (*kind, 0)).collect();

    let kinds = find_all_directed_triangles(graph)
        .into_iter()
        .filter_map(|triangle| TriangleType::classify_in_range(graph, triangle));
    for kind in kinds {
        *spectrum.entry(kind).or_insert(0) += 1;
    }

    spectrum
}

//
// Helpers
//

/// Counts the edges among the neighbours of an in-range `vertex`.
fn triangles_around(graph: &UndirectedGraph, vertex: VertexIndex) -> usize {
    let neighbours = graph.neighbour_set(vertex);

    let mut doubled = 0;
    for neighbour in neighbours {
        if *neighbour == vertex {
            continue;
        }
        let others = graph.neighbour_set(*neighbour);
        // Scan the smaller neighbourhood and probe the larger one.
        let (small, large) = if neighbours.len() <= others.len() {
            (neighbours, others)
        } else {
            (others, neighbours)
        };
        doubled += small
            .iter()
            .filter(|w| **w != vertex && **w != *neighbour && large.contains(*w))
            .count();
    }

    // Each edge between two neighbours was found from both of its endpoints.
    doubled / 2
}

fn clustering_of(degree: usize, triangles: usize) -> f64 {
    if degree < 2 {
        0.0
    } else {
        2.0 * triangles as f64 / (degree * (degree - 1)) as f64
    }
}

fn transitivity(graph: &UndirectedGraph, triangle_counts: &[usize]) -> f64 {
    let wedges: usize = graph
        .degrees()
        .into_iter()
        .filter(|degree| *degree > 1)
        .map(|degree| degree * (degree - 1) / 2)
        .sum();

    if wedges == 0 {
        return 0.0;
    }

    // The per-vertex counts already see every triangle three times.
    triangle_counts.iter().sum::<usize>() as f64 / wedges as f64
}
