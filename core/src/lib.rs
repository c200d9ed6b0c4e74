//! wgraph-core: directed weighted graph engine.
//!
//! A pure Rust library that stores vertices with weighted outgoing edges and
//! provides depth-first and breadth-first traversal, reachability, and
//! Dijkstra shortest paths with path reconstruction.
//!
//! Queries never mutate the graph: visited sets, distances, and predecessors
//! live in per-call tables, so any number of read-only queries can share one
//! `&Graph`.
//!
//! The crate also ships a few standalone string and counting utilities
//! (anagram search, permutation enumeration, Fibonacci) that do not touch
//! the graph.

mod combinatorics;
mod error;
mod graph;
mod shortest;
mod text;
mod traversal;

pub use combinatorics::{
    enumerate_permutations, factorial, fibonacci, Fibonacci, Permutations, MAX_FIBONACCI_INDEX,
};
pub use error::{GraphError, Result};
pub use graph::{Graph, Vertex, VertexId, VertexKey, Weight};
pub use shortest::{
    path_to, path_weight, shortest_paths, shortest_paths_dense, Distance, PathEntry,
    ShortestPaths,
};
pub use text::{find_anagram_indices, longest_unique_substring_len};
pub use traversal::{
    breadth_first, breadth_first_layers, depth_first, fewest_hops_path, reachable, BreadthFirst,
};
