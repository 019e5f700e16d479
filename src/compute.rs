//! A module for spreading per-source computations over worker threads.
//!
//! Every worker repeatedly grabs the next unprocessed source vertex and folds its result into a
//! private partial result. The partials are merged by the caller once all workers are done, so
//! no mutable state is shared during the traversals themselves.

use std::{
    num::NonZeroUsize,
    panic,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Instant,
};

use log::debug;

use crate::graph::{Graph, VertexIndex};

pub const MIN_NUM_THREADS: usize = 1;
pub const MAX_NUM_THREADS: usize = 128;

/// Returns the number of threads the machine can run in parallel, 1 if unknown.
pub fn default_num_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(MIN_NUM_THREADS)
}

/// Runs `task` once for every vertex of the graph, used as the source, and reduces the partial
/// results produced by the workers with `merge`.
///
/// `init` creates an empty partial result, once per worker and once for the final total. The
/// order in which sources are visited is unspecified, `task` and `merge` must not depend on it.
pub(crate) fn reduce_over_sources<G, R, I, T, M>(
    name: &str,
    graph: &G,
    num_threads: usize,
    init: I,
    task: T,
    merge: M,
) -> R
where
    G: Graph,
    R: Send,
    I: Fn() -> R + Sync,
    T: Fn(&mut R, VertexIndex) + Sync,
    M: Fn(&mut R, R),
{
    let start = Instant::now();
    let num_nodes = graph.size();
    // There is no point in spawning more workers than there are sources.
    let num_threads = num_threads
        .clamp(MIN_NUM_THREADS, MAX_NUM_THREADS)
        .min(num_nodes.max(MIN_NUM_THREADS));

    debug!("{name}: {num_nodes} sources, {num_threads} threads");

    let counter = AtomicUsize::new(0);
    let partials: Vec<R> = thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                scope.spawn(|| {
                    // Each worker thread keeps its own partial result, which is returned when the
                    // thread finishes and then merged by the caller.
                    let mut partial = init();
                    loop {
                        let index = counter.fetch_add(1, Ordering::Relaxed);
                        if index >= num_nodes {
                            break;
                        }
                        task(&mut partial, index);
                    }
                    partial
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .collect()
    });

    let mut total = init();
    for partial in partials {
        merge(&mut total, partial);
    }

    debug!("{name}: done in {:?}", start.elapsed());

    total
}

/// Adds `partial` into `total` component-wise.
pub(crate) fn add_assign(total: &mut [f64], partial: Vec<f64>) {
    for (t, p) in total.iter_mut().zip(partial) {
        *t += p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit_counts(graph: &crate::undirected::UndirectedGraph, num_threads: usize) -> Vec<usize> {
        reduce_over_sources(
            "test",
            graph,
            num_threads,
            || vec![0; graph.size()],
            |partial, source| partial[source] += 1,
            |total, partial| {
                for (t, p) in total.iter_mut().zip(partial) {
                    *t += p;
                }
            },
        )
    }

    #[test]
    fn every_source_is_visited_once() {
        let graph = graph!([0, 1, 2, 3, 4, 5, 6]);

        for num_threads in [0, 1, 3, 64, 1000] {
            assert_eq!(visit_counts(&graph, num_threads), vec![1; 7]);
        }
    }

    #[test]
    fn empty_graph() {
        let graph = graph!();

        assert!(visit_counts(&graph, 4).is_empty());
    }

    #[test]
    fn default_num_threads_is_positive() {
        assert!(default_num_threads() >= MIN_NUM_THREADS);
    }

    #[test]
    fn add_assign_sums_componentwise() {
        let mut total = vec![1.0, 2.0];
        add_assign(&mut total, vec![0.5, 0.25]);

        assert_eq!(total, vec![1.5, 2.25]);
    }
}
