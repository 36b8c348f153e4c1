//! Directed K-NN graph edges.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A directed edge `source → target` meaning "target is one of source's k
/// nearest neighbors".
///
/// The reverse edge exists only if source is also among target's k nearest.
///
/// # Examples
///
/// ```
/// use shape_graph_core::graph_linking::KnnEdge;
///
/// let edge = KnnEdge::new(0, 3, 1.5).unwrap();
/// assert_eq!(edge.source(), 0);
/// assert_eq!(edge.target(), 3);
/// assert_eq!(edge.reversed().source(), 3);
///
/// // Self-loops are rejected
/// assert!(KnnEdge::new(2, 2, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnnEdge {
    source: usize,
    target: usize,
    distance: f64,
}

impl KnnEdge {
    /// Create a new edge.
    ///
    /// # Errors
    ///
    /// `GraphInvariant` if `source == target` or `distance` is negative or
    /// non-finite.
    pub fn new(source: usize, target: usize, distance: f64) -> CoreResult<Self> {
        if source == target {
            return Err(CoreError::GraphInvariant(format!(
                "self-loop edge at point {source}"
            )));
        }

        if !distance.is_finite() || distance < 0.0 {
            return Err(CoreError::GraphInvariant(format!(
                "edge {source} -> {target} has invalid distance {distance}"
            )));
        }

        Ok(Self {
            source,
            target,
            distance,
        })
    }

    /// Index of the point whose neighbor this is.
    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Index of the neighbor.
    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Euclidean distance between the two points.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// `(source, target)` pair.
    #[inline]
    pub fn pair(&self) -> (usize, usize) {
        (self.source, self.target)
    }

    /// The same relation in the opposite direction.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            distance: self.distance,
        }
    }

    /// Canonical undirected key `(min, max)`.
    #[inline]
    pub fn undirected_key(&self) -> (usize, usize) {
        if self.source < self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_distance() {
        assert!(KnnEdge::new(0, 1, -0.1).is_err());
        assert!(KnnEdge::new(0, 1, f64::NAN).is_err());
        assert!(KnnEdge::new(0, 1, f64::INFINITY).is_err());
        assert!(KnnEdge::new(0, 1, 0.0).is_ok());
    }

    #[test]
    fn test_undirected_key() {
        let edge = KnnEdge::new(5, 2, 1.0).unwrap();
        assert_eq!(edge.undirected_key(), (2, 5));
        assert_eq!(edge.reversed().undirected_key(), (2, 5));
        assert_eq!(edge.pair(), (5, 2));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let edge = KnnEdge::new(1, 4, 0.25).unwrap();
        let json = serde_json::to_string(&edge).unwrap();
        assert!(json.contains("\"source\":1"));
        let back: KnnEdge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edge);
    }
}
