//! Static 3-d tree for exact k-nearest-neighbor queries.
//!
//! The tree is an implicit balanced layout over a permutation of point
//! indices: the subtree covering `order[lo..hi]` has its root at
//! `mid = (lo + hi) / 2`, the left child covers `lo..mid` and the right child
//! `mid + 1..hi`. Split axes cycle x → y → z by depth.
//!
//! Queries rank candidates exactly like the brute-force scan, by
//! `(squared distance, index)`, and only prune a subtree when its splitting
//! plane is strictly farther than the current k-th best. Equal-distance
//! candidates behind a plane are still visited, so results match brute force
//! exactly, ties included.

use super::candidate::{BestK, Candidate};
use crate::types::{Point, PointSet};

/// Exact k-d tree over a borrowed point set.
pub struct KdTree<'a> {
    points: &'a [Point],
    order: Vec<usize>,
}

impl<'a> KdTree<'a> {
    /// Build the tree in O(N log N).
    pub fn build(points: &'a PointSet) -> Self {
        let points = points.points();
        let mut order: Vec<usize> = (0..points.len()).collect();
        Self::partition(points, &mut order, 0);
        Self { points, order }
    }

    fn partition(points: &[Point], order: &mut [usize], depth: usize) {
        if order.len() <= 1 {
            return;
        }
        let axis = depth % 3;
        let mid = order.len() / 2;
        order.select_nth_unstable_by(mid, |&a, &b| {
            points[a]
                .coord(axis)
                .total_cmp(&points[b].coord(axis))
                .then_with(|| a.cmp(&b))
        });
        let (left, rest) = order.split_at_mut(mid);
        Self::partition(points, left, depth + 1);
        Self::partition(points, &mut rest[1..], depth + 1);
    }

    /// Number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The `k` nearest neighbors of point `query`, excluding itself, as
    /// `(index, squared distance)` nearest first.
    pub fn nearest(&self, query: usize, k: usize) -> Vec<(usize, f64)> {
        self.nearest_candidates(query, k)
            .into_iter()
            .map(|c| (c.index, c.dist_sq))
            .collect()
    }

    pub(crate) fn nearest_candidates(&self, query: usize, k: usize) -> Vec<Candidate> {
        if k == 0 {
            return Vec::new();
        }
        let mut best = BestK::new(k);
        self.search(query, 0, self.order.len(), 0, &mut best);
        best.into_sorted_vec()
    }

    fn search(&self, query: usize, lo: usize, hi: usize, depth: usize, best: &mut BestK) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let node = self.order[mid];
        let q = &self.points[query];

        if node != query {
            best.offer(Candidate {
                dist_sq: q.distance_squared(&self.points[node]),
                index: node,
            });
        }

        let axis = depth % 3;
        let diff = f64::from(q.coord(axis)) - f64::from(self.points[node].coord(axis));
        let (near, far) = if diff < 0.0 {
            ((lo, mid), (mid + 1, hi))
        } else {
            ((mid + 1, hi), (lo, mid))
        };

        self.search(query, near.0, near.1, depth + 1, best);

        let plane_dist_sq = diff * diff;
        let visit_far = match best.worst() {
            Some(worst) => plane_dist_sq <= worst.dist_sq,
            None => true,
        };
        if visit_far {
            self.search(query, far.0, far.1, depth + 1, best);
        }
    }
}
