//! The read-only view shared by every metric in the crate.
//!
//! Both [`UndirectedGraph`](crate::undirected::UndirectedGraph) and
//! [`DirectedGraph`](crate::directed::DirectedGraph) implement [`Graph`], which is all the
//! traversal-based algorithms need to know about a graph.

use std::{iter::Copied, ops::Range};

use crate::error::{GraphError, Result};

/// Vertices are dense indices in `[0, size)`.
pub type VertexIndex = usize;

/// A lazy, restartable sequence of neighbouring vertices, in insertion order.
pub type Neighbours<'a> = Copied<indexmap::set::Iter<'a, VertexIndex>>;

/// Which adjacency to follow during a traversal.
///
/// Undirected graphs make no distinction between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow `u -> v` edges, i.e. reachability *from* a vertex.
    Outgoing,
    /// Follow `u <- v` edges, i.e. reachability *to* a vertex.
    Incoming,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
        }
    }
}

/// An immutable snapshot of a graph, as seen by the metrics.
pub trait Graph: Sync {
    /// Returns the number of vertices.
    fn size(&self) -> usize;

    /// Returns the number of edges.
    fn edge_count(&self) -> usize;

    fn is_directed(&self) -> bool;

    /// Returns the vertices adjacent to `vertex` in the given direction.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range. Callers validate public input with
    /// [`Graph::check_vertex`] first.
    fn adjacent(&self, vertex: VertexIndex, direction: Direction) -> Neighbours<'_>;

    /// Returns the number of vertices adjacent to `vertex` in the given direction.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    fn adjacent_count(&self, vertex: VertexIndex, direction: Direction) -> usize;

    /// Iterates over every vertex index in order.
    fn vertices(&self) -> Range<VertexIndex> {
        0..self.size()
    }

    /// Returns whether `vertex` is a valid index for this graph.
    fn contains_vertex(&self, vertex: VertexIndex) -> bool {
        vertex < self.size()
    }

    /// Fails with [`GraphError::VertexOutOfRange`] if `vertex` isn't a valid index.
    fn check_vertex(&self, vertex: VertexIndex) -> Result<VertexIndex> {
        if self.contains_vertex(vertex) {
            Ok(vertex)
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                size: self.size(),
            })
        }
    }
}
