//! Shape Graph Core Library
//!
//! Builds k-nearest-neighbor connectivity graphs over 3D point-cloud samples.
//!
//! # Architecture
//!
//! This crate defines:
//! - Point-cloud value types (`Point`, `PointSet`)
//! - The K-NN graph builder and its graph type (`graph_linking`)
//! - Point sources that produce a `PointSet` (`source`)
//! - A scatter plot renderer over point coordinates (`render`)
//! - Error types, result aliases and configuration
//!
//! # Example
//!
//! ```
//! use shape_graph_core::graph_linking::build_knn_graph;
//! use shape_graph_core::types::PointSet;
//!
//! let points = PointSet::from_coords([
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 5.0],
//! ])
//! .unwrap();
//!
//! let graph = build_knn_graph(points, 1).unwrap();
//! assert_eq!(graph.edge_count(), 4);
//! assert_eq!(graph.neighbor_indices(0), vec![1]);
//! ```

pub mod config;
pub mod error;
pub mod graph_linking;
pub mod render;
pub mod source;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use graph_linking::{KnnConfig, KnnEdge, KnnGraph, KnnGraphBuilder};
pub use types::{Point, PointSet};
