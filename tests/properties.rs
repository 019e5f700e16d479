mod common;

use common::{init_logger, Fixture, UNDIRECTED_FIXTURES};
use topograph::{
    betweenness::{betweenness_centrality, GeodesicCounting},
    closeness::closeness_centralities,
    clustering::{count_triangles, local_clustering_coefficients, triangle_counts},
    components::find_connected_components,
    cores::kshells_and_onion_layers,
    graph::Graph,
    mixing::{modularity, partition_from_classes},
    paths::{find_all_geodesics, find_geodesic},
    traversal::all_pairs_shortest_path_lengths,
    undirected::UndirectedGraph,
};

fn undirected_graphs() -> Vec<(&'static str, UndirectedGraph)> {
    UNDIRECTED_FIXTURES
        .into_iter()
        .map(|name| (name, Fixture::load(name).undirected()))
        .collect()
}

/// Checks the distances and geodesics of every ordered pair against each other. `adjacent` tells
/// whether an edge leads from its first to its second argument.
fn check_geodesics<G, F>(graph: &G, adjacent: F)
where
    G: Graph,
    F: Fn(usize, usize) -> bool,
{
    let n = graph.size();
    let distances = all_pairs_shortest_path_lengths(graph, 3);

    for u in graph.vertices() {
        assert_eq!(distances[u][u], 0);

        for v in graph.vertices().filter(|v| *v != u) {
            let geodesics = find_all_geodesics(graph, u, v).unwrap();

            assert_eq!(geodesics.is_empty(), distances[u][v] == n, "{u} -> {v}");
            for path in &geodesics {
                assert_eq!(path.len() - 1, distances[u][v]);
                assert_eq!((path[0], path[path.len() - 1]), (u, v));
                assert!(path.windows(2).all(|pair| adjacent(pair[0], pair[1])));
            }
        }
    }
}

#[test]
fn undirected_geodesics_agree_with_distances() {
    init_logger();

    for (_, graph) in undirected_graphs() {
        check_geodesics(&graph, |u, v| graph.has_edge(u, v).unwrap());
    }
}

#[test]
fn directed_geodesics_agree_with_distances() {
    init_logger();

    let graph = Fixture::load("feed_forward").directed();

    check_geodesics(&graph, |u, v| graph.has_edge(u, v).unwrap());
}

#[test]
fn undirected_distances_are_symmetric() {
    init_logger();

    for (name, graph) in undirected_graphs() {
        let distances = all_pairs_shortest_path_lengths(&graph, 2);

        for u in graph.vertices() {
            for v in graph.vertices() {
                assert_eq!(distances[u][v], distances[v][u], "{name}: {u}, {v}");

                let mut reversed = find_geodesic(&graph, u, v).unwrap();
                reversed.reverse();
                assert_eq!(find_geodesic(&graph, v, u).unwrap(), reversed, "{name}: {u}, {v}");
            }
        }
    }
}

#[test]
fn triangle_counts_are_consistent() {
    for (name, graph) in undirected_graphs() {
        let per_vertex: usize = triangle_counts(&graph).into_iter().sum();

        assert_eq!(per_vertex, 3 * count_triangles(&graph), "{name}");
    }
}

#[test]
fn local_clustering_is_bounded() {
    for (name, graph) in undirected_graphs() {
        let coefficients = local_clustering_coefficients(&graph);

        for (coefficient, degree) in coefficients.into_iter().zip(graph.degrees()) {
            assert!((0.0..=1.0).contains(&coefficient), "{name}");
            if degree < 2 {
                assert_eq!(coefficient, 0.0, "{name}");
            }
        }
    }
}

#[test]
fn cores_follow_the_peeling() {
    for (name, graph) in undirected_graphs() {
        let (kshells, layers) = kshells_and_onion_layers(&graph);

        for (kshell, degree) in kshells.iter().zip(graph.degrees()) {
            assert!(*kshell <= degree, "{name}");
        }

        let mut peeling: Vec<(usize, usize)> = layers.into_iter().zip(kshells).collect();
        peeling.sort_unstable();
        assert!(peeling.windows(2).all(|pair| pair[0].1 <= pair[1].1), "{name}");
    }
}

#[test]
fn modularity_is_bounded() {
    for (name, graph) in undirected_graphs() {
        let n = graph.size();
        let by_component =
            partition_from_classes(n, &find_connected_components(&graph)).unwrap();
        let by_parity: Vec<usize> = (0..n).map(|v| v % 2).collect();
        let singletons: Vec<usize> = (0..n).collect();

        let single_class = modularity(&graph, &vec![0; n]).unwrap();
        assert!(single_class.abs() < 1e-12, "{name}");

        for partition in [by_component, by_parity, singletons] {
            let q = modularity(&graph, &partition).unwrap();
            assert!((-1.0..=1.0).contains(&q), "{name}: {q}");
        }
    }
}

#[test]
fn worker_count_doesnt_change_results() {
    init_logger();

    for (name, graph) in undirected_graphs() {
        let counting = GeodesicCounting::Fractional;
        let sequential = betweenness_centrality(&graph, counting, 1);
        let closeness = closeness_centralities(&graph, 1);

        for num_threads in [2, 5, 64] {
            let parallel = betweenness_centrality(&graph, counting, num_threads);
            for (a, b) in sequential.iter().zip(parallel) {
                assert!((a - b).abs() < 1e-9, "{name}");
            }
            assert_eq!(closeness_centralities(&graph, num_threads), closeness, "{name}");
        }
    }
}
