//! Connected components and the distance statistics measured within them.
//!
//! Components are listed in increasing order of their smallest vertex. Eccentricities and
//! diameters are measured within the connected components of undirected graphs and the strongly
//! connected components of directed graphs, the largest vertex sets in which every vertex
//! reaches every other.

use std::collections::{BTreeMap, VecDeque};

use log::trace;

use crate::{
    compute::{add_assign, reduce_over_sources},
    directed::DirectedGraph,
    graph::{Direction, Graph, VertexIndex},
    traversal::bfs_distances,
    undirected::UndirectedGraph,
};

/// A set of vertices.
pub type Component = Vec<VertexIndex>;

/// Finds the connected components of an undirected graph. The vertices of each component are
/// listed in breadth-first order from its smallest vertex.
///
/// # Examples
///
/// ```
/// use topograph::{components::find_connected_components, undirected::UndirectedGraph};
///
/// let graph = UndirectedGraph::from_edges(5, [(0, 3), (1, 2), (3, 4)])?;
///
/// assert_eq!(find_connected_components(&graph), vec![vec![0, 3, 4], vec![1, 2]]);
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn find_connected_components(graph: &UndirectedGraph) -> Vec<Component> {
    flood_fill(graph, &[Direction::Outgoing])
}

/// Finds the weakly connected components of a directed graph, i.e. the connected components of
/// the graph without edge directions.
pub fn find_weakly_connected_components(graph: &DirectedGraph) -> Vec<Component> {
    flood_fill(graph, &[Direction::Outgoing, Direction::Incoming])
}

/// Finds the strongly connected components of a directed graph, each sorted by index.
pub fn find_strongly_connected_components(graph: &DirectedGraph) -> Vec<Component> {
    components_from_labels(&strongly_connected_labels(graph))
}

/// Computes the eccentricity of every vertex: its largest distance to a vertex of its own
/// component.
pub fn eccentricities<G: Graph>(graph: &G, num_threads: usize) -> Vec<usize> {
    let num_nodes = graph.size();
    let labels = component_labels(graph);

    reduce_over_sources(
        "eccentricities",
        graph,
        num_threads,
        || vec![0; num_nodes],
        |partial, source| {
            partial[source] = within_component(graph, &labels, source)
                .into_iter()
                .max()
                .unwrap_or(0)
        },
        |total: &mut Vec<usize>, partial| {
            for (t, p) in total.iter_mut().zip(partial) {
                *t = (*t).max(p);
            }
        },
    )
}

/// Computes the diameter of every component, in the order the components are listed by
/// [`find_connected_components`] or [`find_strongly_connected_components`].
///
/// # Examples
///
/// ```
/// use topograph::{components::diameters, undirected::UndirectedGraph};
///
/// // A path of length 3 and an isolated vertex.
/// let graph = UndirectedGraph::from_edges(5, [(0, 1), (1, 2), (2, 3)])?;
///
/// assert_eq!(diameters(&graph, 2), vec![3, 0]);
/// # Ok::<(), topograph::error::GraphError>(())
/// ```
pub fn diameters<G: Graph>(graph: &G, num_threads: usize) -> Vec<usize> {
    let eccentricities = eccentricities(graph, num_threads);

    components_of(graph)
        .iter()
        .map(|component| {
            component
                .iter()
                .map(|vertex| eccentricities[*vertex])
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Computes the average distance from every vertex to the other vertices it reaches, 0 for
/// vertices that reach no other vertex. Directed graphs are traversed along their out-edges.
pub fn average_shortest_path_lengths<G: Graph>(graph: &G, num_threads: usize) -> Vec<f64> {
    let num_nodes = graph.size();

    reduce_over_sources(
        "average_shortest_path_lengths",
        graph,
        num_threads,
        || vec![0.0; num_nodes],
        |partial, source| {
            let distances = reachable_from(graph, source);
            if !distances.is_empty() {
                let total: usize = distances.iter().sum();
                partial[source] = total as f64 / distances.len() as f64;
            }
        },
        |total, partial| add_assign(total, partial),
    )
}

/// Computes, for every connected component, the number of ordered pairs `(u, v)` of its vertices
/// at each distance from `u` to `v`, divided by the size of the component.
///
/// Directed graphs are split into weakly connected components and their distances follow the
/// out-edges, so only the pairs where `v` is reachable from `u` are counted. The maps are listed
/// in the order of [`find_connected_components`] or [`find_weakly_connected_components`] and
/// are empty for components of a single vertex.
pub fn shortest_path_length_distribution<G: Graph>(graph: &G) -> Vec<BTreeMap<usize, f64>> {
    let directions: &[Direction] = if graph.is_directed() {
        &[Direction::Outgoing, Direction::Incoming]
    } else {
        &[Direction::Outgoing]
    };

    flood_fill(graph, directions)
        .iter()
        .map(|component| {
            let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
            for source in component {
                for distance in reachable_from(graph, *source) {
                    *counts.entry(distance).or_insert(0) += 1;
                }
            }

            counts
                .into_iter()
                .map(|(distance, count)| (distance, count as f64 / component.len() as f64))
                .collect()
        })
        .collect()
}

//
// Helpers
//

/// The distances from `source` to the other vertices that share its label.
fn within_component<G: Graph>(graph: &G, labels: &[usize], source: VertexIndex) -> Vec<usize> {
    let num_nodes = graph.size();

    bfs_distances(graph, source, Direction::Outgoing)
        .into_iter()
        .enumerate()
        .filter(|(vertex, distance)| {
            *vertex != source && labels[*vertex] == labels[source] && *distance < num_nodes
        })
        .map(|(_, distance)| distance)
        .collect()
}

/// The distances from `source` to the other vertices it reaches.
fn reachable_from<G: Graph>(graph: &G, source: VertexIndex) -> Vec<usize> {
    let num_nodes = graph.size();

    bfs_distances(graph, source, Direction::Outgoing)
        .into_iter()
        .filter(|distance| *distance != 0 && *distance < num_nodes)
        .collect()
}

/// The components eccentricities and diameters are measured in.
fn components_of<G: Graph>(graph: &G) -> Vec<Component> {
    if graph.is_directed() {
        components_from_labels(&strongly_connected_labels(graph))
    } else {
        flood_fill(graph, &[Direction::Outgoing])
    }
}

/// Labels every vertex with the index of its component in [`components_of`].
fn component_labels<G: Graph>(graph: &G) -> Vec<usize> {
    let mut labels = vec![0; graph.size()];
    for (label, component) in components_of(graph).into_iter().enumerate() {
        for vertex in component {
            labels[vertex] = label;
        }
    }

    labels
}

/// Breadth-first flood fill following the given directions.
fn flood_fill<G: Graph>(graph: &G, directions: &[Direction]) -> Vec<Component> {
    let num_nodes = graph.size();
    let mut visited = vec![false; num_nodes];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in graph.vertices() {
        if visited[start] {
            continue;
        }

        let mut component = Vec::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            component.push(current);
            for direction in directions {
                for neighbour in graph.adjacent(current, *direction) {
                    if !visited[neighbour] {
                        visited[neighbour] = true;
                        queue.push_back(neighbour);
                    }
                }
            }
        }

        components.push(component);
    }

    trace!("flood_fill: {} components", components.len());

    components
}

/// Tarjan's algorithm, with an explicit stack of neighbour iterators in place of recursion.
///
/// Labels are assigned in the order the components are completed.
fn strongly_connected_labels<G: Graph>(graph: &G) -> Vec<usize> {
    const UNVISITED: usize = usize::MAX;

    let num_nodes = graph.size();
    let mut index = vec![UNVISITED; num_nodes];
    let mut lowlink = vec![0; num_nodes];
    let mut on_stack = vec![false; num_nodes];
    let mut stack: Vec<VertexIndex> = Vec::new();
    let mut labels = vec![0; num_nodes];
    let mut next_index = 0;
    let mut next_label = 0;

    for root in graph.vertices() {
        if index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        let mut call_stack = vec![(root, graph.adjacent(root, Direction::Outgoing))];

        while let Some((vertex, neighbours)) = call_stack.last_mut() {
            let v = *vertex;
            let next = neighbours.next();

            match next {
                Some(w) if index[w] == UNVISITED => {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    call_stack.push((w, graph.adjacent(w, Direction::Outgoing)));
                }
                Some(w) => {
                    if on_stack[w] {
                        lowlink[v] = lowlink[v].min(index[w]);
                    }
                }
                None => {
                    call_stack.pop();
                    if let Some((parent, _)) = call_stack.last() {
                        lowlink[*parent] = lowlink[*parent].min(lowlink[v]);
                    }

                    if lowlink[v] == index[v] {
                        while let Some(w) = stack.pop() {
                            on_stack[w] = false;
                            labels[w] = next_label;
                            if w == v {
                                break;
                            }
                        }
                        next_label += 1;
                    }
                }
            }
        }
    }

    labels
}

/// Groups vertices by label, each group sorted, groups ordered by their smallest vertex.
fn components_from_labels(labels: &[usize]) -> Vec<Component> {
    let num_labels = labels.iter().max().map_or(0, |max| max + 1);
    let mut components: Vec<Component> = vec![Vec::new(); num_labels];
    for (vertex, label) in labels.iter().enumerate() {
        components[*label].push(vertex);
    }
    components.sort_unstable_by_key(|component| component[0]);

    components
}
