//! Neighbor candidate ranking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A neighbor candidate for one query point.
///
/// Ordered by squared distance, then by point index. Coordinates are finite,
/// so `total_cmp` never sees NaN and the order is total.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub dist_sq: f64,
    pub index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist_sq
            .total_cmp(&other.dist_sq)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Keeps the `k` smallest candidates seen so far.
///
/// Backed by a max-heap so the current worst candidate is at the top.
pub(crate) struct BestK {
    k: usize,
    heap: BinaryHeap<Candidate>,
}

impl BestK {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Current k-th best candidate, once `k` candidates have been seen.
    #[inline]
    pub fn worst(&self) -> Option<&Candidate> {
        if self.is_full() {
            self.heap.peek()
        } else {
            None
        }
    }

    /// Offer a candidate; it is kept if it ranks among the best `k`.
    #[inline]
    pub fn offer(&mut self, candidate: Candidate) {
        if !self.is_full() {
            self.heap.push(candidate);
        } else if let Some(mut top) = self.heap.peek_mut() {
            if candidate < *top {
                *top = candidate;
            }
        }
    }

    /// Consume into ascending order.
    pub fn into_sorted_vec(self) -> Vec<Candidate> {
        self.heap.into_sorted_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(dist_sq: f64, index: usize) -> Candidate {
        Candidate { dist_sq, index }
    }

    #[test]
    fn test_ties_break_by_index() {
        assert!(c(1.0, 1) < c(1.0, 2));
        assert!(c(0.5, 9) < c(1.0, 0));
    }

    #[test]
    fn test_best_k_keeps_smallest() {
        let mut best = BestK::new(3);
        for (i, d) in [5.0, 1.0, 4.0, 1.0, 3.0, 0.5].into_iter().enumerate() {
            best.offer(c(d, i));
        }
        let kept: Vec<usize> = best.into_sorted_vec().iter().map(|c| c.index).collect();
        assert_eq!(kept, vec![5, 1, 3]);
    }

    #[test]
    fn test_best_k_equal_distance_prefers_lower_index() {
        let mut best = BestK::new(2);
        best.offer(c(2.0, 7));
        best.offer(c(2.0, 4));
        best.offer(c(2.0, 1));
        best.offer(c(2.0, 9));
        let kept: Vec<usize> = best.into_sorted_vec().iter().map(|c| c.index).collect();
        assert_eq!(kept, vec![1, 4]);
    }

    #[test]
    fn test_worst_only_when_full() {
        let mut best = BestK::new(2);
        best.offer(c(3.0, 0));
        assert!(best.worst().is_none());
        best.offer(c(1.0, 1));
        assert_eq!(best.worst().map(|c| c.index), Some(0));
    }
}
