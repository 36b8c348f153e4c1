//! K-NN graph construction over point clouds.
//!
//! Each point is linked to its k nearest neighbors by Euclidean distance,
//! producing a directed edge list (i → j).
//!
//! # Ordering
//!
//! Candidates are ranked by `(squared distance, point index)`. Equal distances
//! therefore resolve to the lower index, which makes the edge list fully
//! deterministic: every search strategy and the parallel path produce
//! identical output for identical input.
//!
//! # Module Structure
//!
//! - `candidate`: the `(distance, index)` ranking and a bounded best-k buffer
//! - `knn_edge`: directed neighbor edges
//! - `knn_graph`: the resulting graph and its statistics
//! - `kd_tree`: exact k-d tree search for larger point sets
//! - `builder`: configuration and the builder itself

mod builder;
mod candidate;
mod kd_tree;
mod knn_edge;
mod knn_graph;

pub use builder::{build_knn_graph, KPolicy, KnnConfig, KnnGraphBuilder, SearchStrategy};
pub use kd_tree::KdTree;
pub use knn_edge::KnnEdge;
pub use knn_graph::{KnnGraph, KnnGraphStats};

/// Default neighbors per point (the original pipeline used `KNNGraph(k=6)`).
pub const DEFAULT_K: usize = 6;

/// Point count above which `SearchStrategy::Auto` switches to the k-d tree.
pub const AUTO_KD_TREE_THRESHOLD: usize = 1024;
