//! Topograph is a small toolkit for computing structural metrics of directed and undirected
//! graphs: shortest paths and geodesics, closeness, harmonic and betweenness centrality,
//! clustering and triangles, k-shells and onion layers, components, degree correlation and
//! modularity.
//!
//! # Basic usage
//!
//! The library is centered around the [`UndirectedGraph`](undirected::UndirectedGraph) and
//! [`DirectedGraph`](directed::DirectedGraph) structures. Vertices are dense indices in
//! `[0, size)`; mapping them to and from external labels is left to the caller. Once populated, a
//! graph is handed by reference to the metric functions, none of which mutate it.
//!
//! ```rust
//! use topograph::{
//!     betweenness::{betweenness_centrality, GeodesicCounting},
//!     clustering::{global_clustering_coefficient, local_clustering_coefficients},
//!     cores::kshells,
//!     undirected::UndirectedGraph,
//! };
//!
//! // A triangle with a pendant vertex hanging off vertex 2.
//! let mut graph = UndirectedGraph::with_size(3);
//! graph.add_edge(0, 1)?;
//! graph.add_edge(1, 2)?;
//! graph.add_edge(2, 0)?;
//!
//! let pendant = graph.add_vertex();
//! graph.add_edge(2, pendant)?;
//!
//! assert_eq!(local_clustering_coefficients(&graph), vec![1.0, 1.0, 1.0 / 3.0, 0.0]);
//! assert_eq!(global_clustering_coefficient(&graph), 0.6);
//! assert_eq!(kshells(&graph), vec![2, 2, 2, 1]);
//!
//! // Vertex 2 sits on every geodesic towards the pendant vertex.
//! let betweenness = betweenness_centrality(&graph, GeodesicCounting::Fractional, 2);
//! assert_eq!(betweenness, vec![0.0, 0.0, 2.0, 0.0]);
//! # Ok::<(), topograph::error::GraphError>(())
//! ```
//!
//! Computations that run one traversal per source vertex (all-pairs distances, betweenness,
//! closeness of every vertex) take a `num_threads` argument and spread the sources over that many
//! worker threads. Progress is reported through the [`log`] facade.

/// Builds an undirected graph from one or more paths of vertex indices, sized to fit the largest
/// index.
#[cfg(test)]
macro_rules! graph {
    ($($path:expr),* $(,)?) => {{
        let paths: Vec<Vec<usize>> = vec![$($path.to_vec()),*];
        let size = paths.iter().flatten().max().map_or(0, |max| max + 1);

        let mut graph = crate::undirected::UndirectedGraph::with_size(size);
        for path in &paths {
            for pair in path.windows(2) {
                graph.add_edge(pair[0], pair[1]).unwrap();
            }
        }

        graph
    }};
}

/// Builds a directed graph from one or more paths of vertex indices, sized to fit the largest
/// index.
#[cfg(test)]
macro_rules! digraph {
    ($($path:expr),* $(,)?) => {{
        let paths: Vec<Vec<usize>> = vec![$($path.to_vec()),*];
        let size = paths.iter().flatten().max().map_or(0, |max| max + 1);

        let mut graph = crate::directed::DirectedGraph::with_size(size);
        for path in &paths {
            for pair in path.windows(2) {
                graph.add_edge(pair[0], pair[1]).unwrap();
            }
        }

        graph
    }};
}

pub mod betweenness;
pub mod closeness;
pub mod clustering;
pub mod components;
mod compute;
pub mod cores;
pub mod degree;
pub mod directed;
pub mod edge;
pub mod error;
pub mod graph;
pub mod mixing;
pub mod paths;
pub mod traversal;
pub mod undirected;

pub use compute::{default_num_threads, MAX_NUM_THREADS, MIN_NUM_THREADS};
