//! A module for working with undirected edges.

use std::hash::{Hash, Hasher};

use crate::graph::VertexIndex;

/// A pair of vertices representing an undirected edge. Edges don't have a direction, despite the
/// `source`-`target` nomenclature used.
#[derive(Clone, Copy, Debug, Eq)]
pub struct Edge {
    source: VertexIndex,
    target: VertexIndex,
}

impl Edge {
    /// Creates a new edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::edge::Edge;
    ///
    /// let edge = Edge::new(0, 1);
    /// assert_eq!(edge, Edge::new(1, 0));
    /// ```
    pub fn new(source: VertexIndex, target: VertexIndex) -> Self {
        Self { source, target }
    }

    /// Returns the first vertex forming the edge.
    pub fn source(&self) -> VertexIndex {
        self.source
    }

    /// Returns the second vertex forming the edge.
    pub fn target(&self) -> VertexIndex {
        self.target
    }

    /// Returns the endpoints with the smaller index first.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::edge::Edge;
    ///
    /// assert_eq!(Edge::new(3, 1).ordered(), (1, 3));
    /// ```
    pub fn ordered(&self) -> (VertexIndex, VertexIndex) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }

    /// Returns whether the edge contains the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::edge::Edge;
    ///
    /// let edge = Edge::new(0, 1);
    ///
    /// assert_eq!(edge.contains(0), true);
    /// assert_eq!(edge.contains(1), true);
    /// assert_eq!(edge.contains(2), false);
    /// ```
    pub fn contains(&self, vertex: VertexIndex) -> bool {
        self.source == vertex || self.target == vertex
    }

    /// Returns whether both endpoints are the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

//
// Trait implementations
//

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // This ensures the hash is the same for (a, b) as it is for (b, a).
        self.ordered().hash(state);
    }
}

impl From<(VertexIndex, VertexIndex)> for Edge {
    fn from((source, target): (VertexIndex, VertexIndex)) -> Self {
        Self::new(source, target)
    }
}
