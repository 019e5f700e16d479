//! K-core and onion decompositions of undirected graphs.
//!
//! Both come out of the same peeling process (Batagelj and Zaversnik, with the onion extension
//! of Hébert-Dufresne, Grochow and Allard): every round removes all the vertices of minimal
//! remaining degree at once. The round is the vertex's onion layer and the minimal degree, which
//! never decreases from one round to the next, is its core number.

use std::collections::BTreeMap;

use log::trace;

use crate::{
    error::{GraphError, Result},
    graph::VertexIndex,
    undirected::UndirectedGraph,
};

/// Computes the core number (k-shell) of every vertex.
///
/// # Examples
///
/// ```
/// use topograph::{cores::kshells, undirected::UndirectedGraph};
///
/// // A triangle with a tail.
/// let graph = UndirectedGraph::from_edges(4, [(0, 1), (1, 2), (2, 0), (2, 3)])?;
///
/// assert_eq!(kshells(&graph), vec![2, 2, 2, 1]);
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn kshells(graph: &UndirectedGraph) -> Vec<usize> {
    kshells_and_onion_layers(graph).0
}

/// Computes the onion layer of every vertex, starting at 1 for the first vertices peeled.
pub fn onion_layers(graph: &UndirectedGraph) -> Vec<usize> {
    kshells_and_onion_layers(graph).1
}

/// Computes the core numbers and the onion layers of every vertex in a single peeling.
pub fn kshells_and_onion_layers(graph: &UndirectedGraph) -> (Vec<usize>, Vec<usize>) {
    let num_nodes = graph.size();
    let mut degrees = graph.degrees();
    let mut kshells = vec![0; num_nodes];
    let mut layers = vec![0; num_nodes];
    let mut removed = vec![false; num_nodes];

    // Vertices are bucketed by their remaining degree. A vertex is left in its old bucket when
    // its degree drops, so entries are only valid if they still match the vertex's degree.
    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    let mut buckets: Vec<Vec<VertexIndex>> = vec![Vec::new(); max_degree + 1];
    for (vertex, degree) in degrees.iter().enumerate() {
        buckets[*degree].push(vertex);
    }

    let mut current_degree = 0;
    let mut layer = 0;
    let mut remaining = num_nodes;

    while remaining > 0 {
        let mut peeled: Vec<VertexIndex> = std::mem::take(&mut buckets[current_degree])
            .into_iter()
            .filter(|vertex| !removed[*vertex] && degrees[*vertex] == current_degree)
            .collect();
        if peeled.is_empty() {
            current_degree += 1;
            continue;
        }
        peeled.sort_unstable();

        layer += 1;
        for vertex in &peeled {
            removed[*vertex] = true;
            kshells[*vertex] = current_degree;
            layers[*vertex] = layer;
        }
        remaining -= peeled.len();

        for vertex in peeled {
            for neighbour in graph.neighbour_set(vertex) {
                let neighbour = *neighbour;
                // Neighbours never fall below the current core.
                if !removed[neighbour] && degrees[neighbour] > current_degree {
                    degrees[neighbour] -= 1;
                    buckets[degrees[neighbour]].push(neighbour);
                }
            }
        }
    }

    trace!("kshells_and_onion_layers: {layer} layers, max core {current_degree}");

    (kshells, layers)
}

/// Lists the vertices of the `k`-core, those whose core number is at least `k`.
pub fn k_core(graph: &UndirectedGraph, k: usize) -> Vec<VertexIndex> {
    kshells(graph)
        .into_iter()
        .enumerate()
        .filter(|(_, kshell)| *kshell >= k)
        .map(|(vertex, _)| vertex)
        .collect()
}

/// Computes the onion spectrum: for every core number, the fraction of the vertices in each of
/// the onion layers peeled at that core, in peeling order.
pub fn onion_spectrum(graph: &UndirectedGraph) -> BTreeMap<usize, Vec<f64>> {
    let (kshells, layers) = kshells_and_onion_layers(graph);

    spectrum_of(&kshells, &layers)
}

/// Computes the onion spectrum from core numbers and layers obtained with
/// [`kshells_and_onion_layers`].
pub fn onion_spectrum_with_layers(
    graph: &UndirectedGraph,
    kshells: &[usize],
    onion_layers: &[usize],
) -> Result<BTreeMap<usize, Vec<f64>>> {
    for values in [kshells, onion_layers] {
        if values.len() != graph.size() {
            return Err(GraphError::LengthMismatch {
                expected: graph.size(),
                found: values.len(),
            });
        }
    }

    Ok(spectrum_of(kshells, onion_layers))
}

fn spectrum_of(kshells: &[usize], onion_layers: &[usize]) -> BTreeMap<usize, Vec<f64>> {
    let num_nodes = kshells.len();

    // layer -> (core, size)
    let mut layers: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    for (kshell, layer) in kshells.iter().zip(onion_layers) {
        layers.entry(*layer).or_insert((*kshell, 0)).1 += 1;
    }

    let mut spectrum: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for (kshell, size) in layers.into_values() {
        spectrum
            .entry(kshell)
            .or_default()
            .push(size as f64 / num_nodes as f64);
    }

    spectrum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> UndirectedGraph {
        let mut graph = graph!([0, 2, 1, 3, 0], [2, 3, 4, 1], [3, 5]);
        graph.resize(7);
        graph
    }

    #[test]
    fn kshells_and_layers() {
        let (kshells, layers) = kshells_and_onion_layers(&house());

        assert_eq!(kshells, vec![2, 2, 2, 2, 2, 1, 0]);
        assert_eq!(layers, vec![3, 4, 4, 4, 3, 2, 1]);
    }

    #[test]
    fn triangle() {
        let graph = graph!([0, 1, 2, 0]);

        assert_eq!(kshells(&graph), vec![2; 3]);
        assert_eq!(onion_layers(&graph), vec![1; 3]);
    }

    #[test]
    fn clique_behind_a_path() {
        // A 4-clique on 0..4 with the path 3-4-5-6 hanging off it.
        let graph = graph!([0, 1, 2, 3, 0, 2], [1, 3, 4, 5, 6]);

        assert_eq!(kshells(&graph), vec![3, 3, 3, 3, 1, 1, 1]);
        // The path is peeled one end at a time: 6, then 5, then 4.
        assert_eq!(onion_layers(&graph), vec![4, 4, 4, 4, 3, 2, 1]);
    }

    #[test]
    fn kshell_never_exceeds_degree() {
        let graph = graph!([0, 1, 2, 3, 4, 0, 2], [1, 3], [4, 5, 6, 7, 5], [8]);
        let degrees = graph.degrees();

        for (kshell, degree) in kshells(&graph).into_iter().zip(degrees) {
            assert!(kshell <= degree);
        }
    }

    #[test]
    fn layers_peel_non_decreasing_cores() {
        let graph = graph!([0, 1, 2, 3, 4, 0, 2], [1, 3], [4, 5, 6, 7, 5], [8, 9]);
        let (kshells, layers) = kshells_and_onion_layers(&graph);

        let mut by_layer: Vec<(usize, usize)> = layers.into_iter().zip(kshells).collect();
        by_layer.sort_unstable();
        for pair in by_layer.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn k_core() {
        let mut graph = house();
        // Closes 0-1-2-3 into a clique, 4 stays in the 2-core.
        graph.add_edge(0, 1).unwrap();

        assert_eq!(kshells(&graph), vec![3, 3, 3, 3, 2, 1, 0]);
        assert_eq!(super::k_core(&graph, 3), vec![0, 1, 2, 3]);
        assert_eq!(super::k_core(&graph, 1), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(super::k_core(&graph, 0).len(), 7);
    }

    #[test]
    fn onion_spectrum() {
        let expected: BTreeMap<usize, Vec<f64>> = [
            (0, vec![1.0 / 7.0]),
            (1, vec![1.0 / 7.0]),
            (2, vec![2.0 / 7.0, 3.0 / 7.0]),
        ]
        .into_iter()
        .collect();

        assert_eq!(super::onion_spectrum(&house()), expected);
    }

    #[test]
    fn onion_spectrum_with_layers() {
        let graph = house();
        let (kshells, layers) = kshells_and_onion_layers(&graph);

        assert_eq!(
            super::onion_spectrum_with_layers(&graph, &kshells, &layers).unwrap(),
            super::onion_spectrum(&graph)
        );
        assert_eq!(
            super::onion_spectrum_with_layers(&graph, &kshells, &layers[..3]),
            Err(GraphError::LengthMismatch {
                expected: 7,
                found: 3
            })
        );
    }

    #[test]
    fn empty_graph() {
        let graph = graph!();

        assert_eq!(kshells_and_onion_layers(&graph), (vec![], vec![]));
        assert!(super::onion_spectrum(&graph).is_empty());
    }
}
