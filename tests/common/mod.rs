#![allow(dead_code)]

use std::fs;

use serde::Deserialize;
use topograph::{directed::DirectedGraph, undirected::UndirectedGraph};

/// An edge list stored under `testdata/`.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub size: usize,
    pub directed: bool,
    pub edges: Vec<(usize, usize)>,
}

impl Fixture {
    pub fn load(name: &str) -> Self {
        let path = format!("{}/testdata/{name}.json", env!("CARGO_MANIFEST_DIR"));
        let json = fs::read_to_string(&path).unwrap_or_else(|e| panic!("can't read {path}: {e}"));

        serde_json::from_str(&json).unwrap()
    }

    pub fn undirected(&self) -> UndirectedGraph {
        assert!(!self.directed);

        UndirectedGraph::from_edges(self.size, self.edges.iter().copied()).unwrap()
    }

    pub fn directed(&self) -> DirectedGraph {
        assert!(self.directed);

        DirectedGraph::from_edges(self.size, self.edges.iter().copied()).unwrap()
    }
}

pub const UNDIRECTED_FIXTURES: [&str; 3] = ["house", "tree_like", "three_components"];

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{actual} differs from {expected}"
    );
}
