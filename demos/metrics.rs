use std::{collections::HashMap, net::SocketAddr};

use topograph::{
    betweenness::{betweenness_centrality, GeodesicCounting},
    closeness::closeness_centralities,
    clustering::{global_clustering_coefficient, local_clustering_coefficients},
    components::{diameters, find_connected_components},
    cores::kshells_and_onion_layers,
    default_num_threads,
    mixing::{degree_correlation, modularity},
    undirected::UndirectedGraph,
};

// A mock node implementation, has an address and stores peers.
struct Node {
    addr: SocketAddr,
    peers: Vec<SocketAddr>,
}

impl Node {
    fn new(port: u16) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
            peers: Vec::new(),
        }
    }
}

fn connect(nodes: &mut [Node], a: usize, b: usize) {
    let (addr_a, addr_b) = (nodes[a].addr, nodes[b].addr);
    nodes[a].peers.push(addr_b);
    nodes[b].peers.push(addr_a);
}

fn main() {
    env_logger::init();

    // Two rings of five nodes bridged by a single connection.
    const RING: usize = 5;
    let mut nodes: Vec<Node> = (0..2 * RING as u16).map(|i| Node::new(8000 + i)).collect();
    for ring in [0, RING] {
        for i in 0..RING {
            connect(&mut nodes, ring + i, ring + (i + 1) % RING);
        }
    }
    connect(&mut nodes, 0, RING);

    println!("\nCrawling network with {} nodes...", nodes.len());

    // The graph only knows dense indices, the crawler keeps the mapping to addresses.
    let index: HashMap<SocketAddr, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.addr, i))
        .collect();

    let mut graph = UndirectedGraph::with_size(nodes.len());
    for node in &nodes {
        for peer in &node.peers {
            graph
                .add_edge(index[&node.addr], index[peer])
                .expect("crawled peers are indexed");
        }
    }

    let num_threads = default_num_threads();
    println!(
        "Total connection count: {}, density: {:.3}, components: {}, diameters: {:?}",
        graph.edge_count(),
        graph.density(),
        find_connected_components(&graph).len(),
        diameters(&graph, num_threads),
    );

    let betweenness = betweenness_centrality(&graph, GeodesicCounting::Fractional, num_threads);
    let closeness = closeness_centralities(&graph, num_threads);
    let clustering = local_clustering_coefficients(&graph);
    let (kshells, layers) = kshells_and_onion_layers(&graph);

    println!(
        "\n{:<16} {:>12} {:>10} {:>10} {:>6} {:>6}",
        "addr", "betweenness", "closeness", "clustering", "core", "layer"
    );
    for (i, node) in nodes.iter().enumerate() {
        println!(
            "{:<16} {:>12.3} {:>10.3} {:>10.3} {:>6} {:>6}",
            node.addr, betweenness[i], closeness[i], clustering[i], kshells[i], layers[i]
        );
    }

    let rings: Vec<usize> = (0..nodes.len()).map(|i| i / RING).collect();
    println!(
        "\nGlobal clustering: {:.3}, degree correlation: {:.3}, modularity of the rings: {:.3}",
        global_clustering_coefficient(&graph),
        degree_correlation(&graph),
        modularity(&graph, &rings).expect("one ring per node"),
    );
}
