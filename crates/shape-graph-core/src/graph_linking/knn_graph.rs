//! The K-NN graph produced by [`KnnGraphBuilder`](super::KnnGraphBuilder).

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::KnnEdge;
use crate::error::{CoreError, CoreResult};
use crate::types::PointSet;

/// A point set together with its directed K-NN edges.
///
/// Edges are stored grouped by source in ascending order, `k` per source,
/// each group sorted by ascending (distance, target index). The neighbors of
/// point `i` are therefore the slice `edges[i * k..(i + 1) * k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnGraph {
    points: PointSet,
    k: usize,
    edges: Vec<KnnEdge>,
}

impl KnnGraph {
    /// Assemble a graph from builder output. Layout is the builder's
    /// responsibility; `validate` re-checks it.
    pub(crate) fn from_parts(points: PointSet, k: usize, edges: Vec<KnnEdge>) -> Self {
        Self { points, k, edges }
    }

    /// The point set the graph was built over.
    #[inline]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Effective k (after clamping).
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// All edges, grouped by source.
    #[inline]
    pub fn edges(&self) -> &[KnnEdge] {
        &self.edges
    }

    /// Number of directed edges (N × k).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of points.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    /// Outgoing edges of point `index`, nearest first.
    ///
    /// Returns an empty slice for out-of-range indices.
    pub fn neighbors(&self, index: usize) -> &[KnnEdge] {
        let start = index.saturating_mul(self.k);
        let end = start.saturating_add(self.k);
        self.edges.get(start..end).unwrap_or(&[])
    }

    /// Target indices of point `index`'s neighbors, nearest first.
    pub fn neighbor_indices(&self, index: usize) -> Vec<usize> {
        self.neighbors(index).iter().map(KnnEdge::target).collect()
    }

    /// Edges in coordinate (COO) form: `[sources, targets]`.
    pub fn edge_index(&self) -> [Vec<usize>; 2] {
        let sources = self.edges.iter().map(KnnEdge::source).collect();
        let targets = self.edges.iter().map(KnnEdge::target).collect();
        [sources, targets]
    }

    /// True if `a → b` is an edge.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).iter().any(|e| e.target() == b)
    }

    /// True if `a` and `b` are each among the other's k nearest neighbors.
    pub fn is_mutual(&self, a: usize, b: usize) -> bool {
        self.has_edge(a, b) && self.has_edge(b, a)
    }

    /// Symmetrized edge set: each related pair once as `(min, max)`, sorted.
    pub fn undirected_pairs(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .map(KnnEdge::undirected_key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Summary statistics.
    pub fn stats(&self) -> KnnGraphStats {
        let edge_count = self.edges.len();

        let (mut min_distance, mut max_distance, mut sum) = (f64::INFINITY, 0.0f64, 0.0f64);
        for edge in &self.edges {
            min_distance = min_distance.min(edge.distance());
            max_distance = max_distance.max(edge.distance());
            sum += edge.distance();
        }
        if edge_count == 0 {
            min_distance = 0.0;
        }

        let pairs: HashSet<(usize, usize)> = self.edges.iter().map(KnnEdge::pair).collect();
        let mutual = self
            .edges
            .iter()
            .filter(|e| pairs.contains(&(e.target(), e.source())))
            .count();

        KnnGraphStats {
            node_count: self.node_count(),
            edge_count,
            k: self.k,
            min_distance,
            max_distance,
            mean_distance: if edge_count > 0 {
                sum / edge_count as f64
            } else {
                0.0
            },
            mutual_edge_ratio: if edge_count > 0 {
                mutual as f32 / edge_count as f32
            } else {
                0.0
            },
            undirected_edge_count: self.undirected_pairs().len(),
        }
    }

    /// Re-check the structural invariants.
    ///
    /// - exactly `N × k` edges, `k` per source, grouped in source order
    /// - every index in `[0, N)`, no self-loops, no duplicate targets per source
    /// - each source's edges in ascending distance
    pub fn validate(&self) -> CoreResult<()> {
        let n = self.node_count();

        if self.edges.len() != n * self.k {
            return Err(CoreError::GraphInvariant(format!(
                "expected {} edges (N = {n}, k = {}), found {}",
                n * self.k,
                self.k,
                self.edges.len()
            )));
        }

        for source in 0..n {
            let group = self.neighbors(source);
            let mut seen = HashSet::with_capacity(group.len());
            let mut previous = 0.0f64;

            for edge in group {
                if edge.source() != source {
                    return Err(CoreError::GraphInvariant(format!(
                        "edge {} -> {} stored in the group of point {source}",
                        edge.source(),
                        edge.target()
                    )));
                }
                if edge.target() >= n {
                    return Err(CoreError::GraphInvariant(format!(
                        "edge {source} -> {} references a point outside [0, {n})",
                        edge.target()
                    )));
                }
                if edge.target() == source {
                    return Err(CoreError::GraphInvariant(format!(
                        "self-loop at point {source}"
                    )));
                }
                if !seen.insert(edge.target()) {
                    return Err(CoreError::GraphInvariant(format!(
                        "duplicate edge {source} -> {}",
                        edge.target()
                    )));
                }
                if edge.distance() < previous {
                    return Err(CoreError::GraphInvariant(format!(
                        "neighbors of point {source} are not sorted by distance"
                    )));
                }
                previous = edge.distance();
            }
        }

        Ok(())
    }
}

/// Summary statistics for a K-NN graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnGraphStats {
    /// Number of points.
    pub node_count: usize,
    /// Number of directed edges.
    pub edge_count: usize,
    /// Effective k.
    pub k: usize,
    /// Shortest edge length.
    pub min_distance: f64,
    /// Longest edge length.
    pub max_distance: f64,
    /// Mean edge length.
    pub mean_distance: f64,
    /// Fraction of directed edges whose reverse edge also exists.
    pub mutual_edge_ratio: f32,
    /// Number of distinct unordered pairs.
    pub undirected_edge_count: usize,
}
