//! K-NN graph builder.
//!
//! For every point `i`, rank every other point by `(squared distance, index)`
//! and link `i` to the first `k`. The builder is a pure function of its
//! configuration and the point set: no I/O, no shared state, and either a
//! complete graph or an error.
//!
//! # Complexity
//!
//! - Brute force: O(N²) distance computations
//! - K-d tree: O(N log N) build, roughly O(k log N) per query on
//!   well-spread clouds

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::candidate::{BestK, Candidate};
use super::{KdTree, KnnEdge, KnnGraph, AUTO_KD_TREE_THRESHOLD, DEFAULT_K};
use crate::error::{CoreError, CoreResult};
use crate::types::PointSet;

/// What to do when `k` exceeds the number of other points (`N - 1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KPolicy {
    /// Use `k = N - 1`: every point is linked to all others.
    #[default]
    Clamp,
    /// Fail with `KExceedsPointCount`.
    Strict,
}

/// Neighbor search strategy. All strategies produce identical graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Brute force below `auto_kd_tree_threshold` points, k-d tree above.
    #[default]
    Auto,
    /// Scan every pair.
    BruteForce,
    /// Exact k-d tree queries.
    KdTree,
}

/// Configuration for K-NN graph construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnConfig {
    /// Number of neighbors per point.
    pub k: usize,
    /// Behaviour when `k > N - 1`.
    pub k_policy: KPolicy,
    /// Neighbor search strategy.
    pub strategy: SearchStrategy,
    /// Point count above which `Auto` uses the k-d tree.
    pub auto_kd_tree_threshold: usize,
    /// Run the per-point searches on the rayon thread pool.
    pub parallel: bool,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            k_policy: KPolicy::Clamp,
            strategy: SearchStrategy::Auto,
            auto_kd_tree_threshold: AUTO_KD_TREE_THRESHOLD,
            parallel: false,
        }
    }
}

impl KnnConfig {
    /// Create config with custom k value.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Create config with custom k policy.
    pub fn with_k_policy(mut self, k_policy: KPolicy) -> Self {
        self.k_policy = k_policy;
        self
    }

    /// Create config with custom search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Create config with parallel search enabled or disabled.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create config with a custom `Auto` threshold.
    pub fn with_auto_kd_tree_threshold(mut self, threshold: usize) -> Self {
        self.auto_kd_tree_threshold = threshold;
        self
    }

    /// Strategy actually used for a point set of `n` points.
    pub fn resolve_strategy(&self, n: usize) -> SearchStrategy {
        match self.strategy {
            SearchStrategy::Auto if n > self.auto_kd_tree_threshold => SearchStrategy::KdTree,
            SearchStrategy::Auto => SearchStrategy::BruteForce,
            explicit => explicit,
        }
    }
}

/// Builds K-NN graphs.
///
/// # Example
///
/// ```
/// use shape_graph_core::graph_linking::{KnnConfig, KnnGraphBuilder};
/// use shape_graph_core::types::PointSet;
///
/// let points = PointSet::from_coords([
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, 0.0, 5.0],
/// ])
/// .unwrap();
///
/// let builder = KnnGraphBuilder::new(KnnConfig::default().with_k(1));
/// let graph = builder.build(points).unwrap();
///
/// assert_eq!(graph.edge_count(), 4);
/// // (1,0,0) and (0,1,0) are equally close to the origin; the lower index wins.
/// assert_eq!(graph.neighbor_indices(0), vec![1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnnGraphBuilder {
    config: KnnConfig,
}

impl KnnGraphBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: KnnConfig) -> Self {
        Self { config }
    }

    /// Create a builder with default configuration (k = 6, clamping).
    pub fn with_defaults() -> Self {
        Self::new(KnnConfig::default())
    }

    /// The builder's configuration.
    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    /// Effective k for a point set of `n` points.
    ///
    /// # Errors
    ///
    /// - `InvalidK` if the configured k is 0 (checked first)
    /// - `InsufficientPoints` if `n < 2`
    /// - `KExceedsPointCount` if `k > n - 1` under `KPolicy::Strict`
    pub fn effective_k(&self, n: usize) -> CoreResult<usize> {
        let k = self.config.k;
        if k < 1 {
            return Err(CoreError::InvalidK { k });
        }
        if n < 2 {
            return Err(CoreError::InsufficientPoints { count: n });
        }

        let max = n - 1;
        if k <= max {
            return Ok(k);
        }

        match self.config.k_policy {
            KPolicy::Clamp => {
                warn!(requested_k = k, effective_k = max, "k exceeds N - 1, clamping");
                Ok(max)
            }
            KPolicy::Strict => Err(CoreError::KExceedsPointCount { k, max }),
        }
    }

    /// Build the K-NN graph, taking ownership of the point set.
    pub fn build(&self, points: PointSet) -> CoreResult<KnnGraph> {
        let k = self.effective_k(points.len())?;
        let edges = self.search(&points, k)?;
        Ok(KnnGraph::from_parts(points, k, edges))
    }

    /// Compute only the edge list, borrowing the point set.
    ///
    /// Edges are grouped by ascending source, `k` per source, nearest first.
    pub fn build_edges(&self, points: &PointSet) -> CoreResult<Vec<KnnEdge>> {
        let k = self.effective_k(points.len())?;
        self.search(points, k)
    }

    fn search(&self, points: &PointSet, k: usize) -> CoreResult<Vec<KnnEdge>> {
        let n = points.len();
        let strategy = self.config.resolve_strategy(n);
        debug!(
            points = n,
            k,
            ?strategy,
            parallel = self.config.parallel,
            "building k-nn graph"
        );

        let neighbor_lists: Vec<Vec<Candidate>> = match strategy {
            SearchStrategy::KdTree => {
                let tree = KdTree::build(points);
                self.per_point(n, |i| tree.nearest_candidates(i, k))
            }
            _ => self.per_point(n, |i| brute_force_neighbors(points, i, k)),
        };

        let mut edges = Vec::with_capacity(n * k);
        for (source, neighbors) in neighbor_lists.into_iter().enumerate() {
            for candidate in neighbors {
                edges.push(KnnEdge::new(source, candidate.index, candidate.dist_sq.sqrt())?);
            }
        }

        debug!(edges = edges.len(), "k-nn graph built");
        Ok(edges)
    }

    /// Run `f` for every point index, in order, optionally in parallel.
    fn per_point<F>(&self, n: usize, f: F) -> Vec<Vec<Candidate>>
    where
        F: Fn(usize) -> Vec<Candidate> + Sync + Send,
    {
        if self.config.parallel {
            (0..n).into_par_iter().map(f).collect()
        } else {
            (0..n).map(f).collect()
        }
    }
}

/// Scan every other point and keep the best `k`.
fn brute_force_neighbors(points: &PointSet, query: usize, k: usize) -> Vec<Candidate> {
    let all = points.points();
    let q = &all[query];
    let mut best = BestK::new(k);

    for (j, p) in all.iter().enumerate() {
        if j == query {
            continue;
        }
        best.offer(Candidate {
            dist_sq: q.distance_squared(p),
            index: j,
        });
    }

    best.into_sorted_vec()
}

/// Build a K-NN graph with default options and the given k.
///
/// Shorthand for `KnnGraphBuilder::new(KnnConfig::default().with_k(k)).build(points)`.
pub fn build_knn_graph(points: PointSet, k: usize) -> CoreResult<KnnGraph> {
    KnnGraphBuilder::new(KnnConfig::default().with_k(k)).build(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn random_cloud(n: usize, seed: u64) -> PointSet {
        let mut rng = StdRng::seed_from_u64(seed);
        PointSet::from_coords(
            (0..n).map(|_| [rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)]),
        )
        .unwrap()
    }

    #[test]
    fn test_edge_count_and_no_self_loops() {
        for (n, k) in [(2, 1), (10, 3), (50, 6), (64, 63)] {
            let graph = build_knn_graph(random_cloud(n, n as u64), k).unwrap();
            assert_eq!(graph.edge_count(), n * k, "n = {n}, k = {k}");
            assert!(graph.edges().iter().all(|e| e.source() != e.target()));
            graph.validate().unwrap();
        }
    }

    #[test]
    fn test_two_points() {
        let points = PointSet::from_coords([[0.0, 0.0, 0.0], [0.0, 3.0, 4.0]]).unwrap();
        let graph = build_knn_graph(points, 1).unwrap();
        let pairs: Vec<(usize, usize)> = graph.edges().iter().map(KnnEdge::pair).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
        assert_eq!(graph.edges()[0].distance(), 5.0);
    }

    #[test]
    fn test_k_zero_is_invalid() {
        let err = build_knn_graph(random_cloud(5, 1), 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidK { k: 0 }));
    }

    #[test]
    fn test_k_checked_before_point_count() {
        let single = PointSet::from_coords([[0.0, 0.0, 0.0]]).unwrap();
        let err = build_knn_graph(single, 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidK { .. }));
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let single = PointSet::from_coords([[0.0, 0.0, 0.0]]).unwrap();
        let err = build_knn_graph(single, 1).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientPoints { count: 1 }));
    }

    #[test]
    fn test_clamp_policy() {
        let graph = build_knn_graph(random_cloud(5, 3), 10).unwrap();
        assert_eq!(graph.k(), 4);
        assert_eq!(graph.edge_count(), 20);
        for i in 0..5 {
            let mut targets = graph.neighbor_indices(i);
            targets.sort_unstable();
            let expected: Vec<usize> = (0..5).filter(|&j| j != i).collect();
            assert_eq!(targets, expected);
        }
    }

    #[test]
    fn test_strict_policy() {
        let builder = KnnGraphBuilder::new(
            KnnConfig::default().with_k(10).with_k_policy(KPolicy::Strict),
        );
        let err = builder.build(random_cloud(5, 3)).unwrap_err();
        assert!(matches!(err, CoreError::KExceedsPointCount { k: 10, max: 4 }));

        // k = N - 1 is still fine under Strict
        let builder = KnnGraphBuilder::new(
            KnnConfig::default().with_k(4).with_k_policy(KPolicy::Strict),
        );
        assert_eq!(builder.build(random_cloud(5, 3)).unwrap().edge_count(), 20);
    }

    #[test]
    fn test_tie_break_lower_index() {
        let points = PointSet::from_coords([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 5.0],
        ])
        .unwrap();
        let graph = build_knn_graph(points, 1).unwrap();
        assert_eq!(graph.neighbor_indices(0), vec![1]);
        // Point 3 is equidistant (5, sqrt 26, sqrt 26) - nearest is 0
        assert_eq!(graph.neighbor_indices(3), vec![0]);
    }

    #[test]
    fn test_neighbors_are_exact_k_smallest() {
        let points = random_cloud(80, 11);
        let k = 7;
        let graph = build_knn_graph(points.clone(), k).unwrap();

        for i in 0..points.len() {
            let q = points.points()[i];
            let mut ranked: Vec<(f64, usize)> = points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(j, p)| (q.distance_squared(p), j))
                .collect();
            ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            let expected: Vec<usize> = ranked.iter().take(k).map(|(_, j)| *j).collect();
            assert_eq!(graph.neighbor_indices(i), expected, "point {i}");
        }
    }

    #[test]
    fn test_strategies_and_parallel_agree() {
        let points = random_cloud(400, 42);
        let base = KnnConfig::default().with_k(6);

        let brute = KnnGraphBuilder::new(base.clone().with_strategy(SearchStrategy::BruteForce))
            .build_edges(&points)
            .unwrap();
        let kd = KnnGraphBuilder::new(base.clone().with_strategy(SearchStrategy::KdTree))
            .build_edges(&points)
            .unwrap();
        let kd_par = KnnGraphBuilder::new(
            base.clone().with_strategy(SearchStrategy::KdTree).with_parallel(true),
        )
        .build_edges(&points)
        .unwrap();
        let brute_par = KnnGraphBuilder::new(
            base.with_strategy(SearchStrategy::BruteForce).with_parallel(true),
        )
        .build_edges(&points)
        .unwrap();

        assert_eq!(brute, kd);
        assert_eq!(brute, kd_par);
        assert_eq!(brute, brute_par);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let points =
            PointSet::from_coords([[3e38, 0.0, 0.0], [-3e38, 0.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();

        for strategy in [SearchStrategy::BruteForce, SearchStrategy::KdTree] {
            let graph = KnnGraphBuilder::new(KnnConfig::default().with_k(2).with_strategy(strategy))
                .build(points.clone())
                .unwrap();

            assert_eq!(graph.neighbor_indices(0), vec![2, 1], "{strategy:?}");
            assert_eq!(graph.neighbor_indices(1), vec![2, 0], "{strategy:?}");
            assert_eq!(graph.neighbor_indices(2), vec![0, 1], "{strategy:?}");
            assert!(graph.edges().iter().all(|e| e.distance().is_finite()));

            let far = graph.neighbors(0)[1].distance();
            let expected = 2.0 * f64::from(3e38f32);
            assert!((far - expected).abs() / expected < 1e-12, "{far}");
            graph.validate().unwrap();
        }
    }

    #[test]
    fn test_tiny_separations_are_ranked() {
        let points =
            PointSet::from_coords([[0.0, 0.0, 0.0], [2e-23, 0.0, 0.0], [1e-23, 0.0, 0.0]]).unwrap();

        for strategy in [SearchStrategy::BruteForce, SearchStrategy::KdTree] {
            let graph = KnnGraphBuilder::new(KnnConfig::default().with_k(1).with_strategy(strategy))
                .build(points.clone())
                .unwrap();

            assert_eq!(graph.neighbor_indices(0), vec![2], "{strategy:?}");
            assert_eq!(graph.neighbor_indices(1), vec![2], "{strategy:?}");
            assert!(graph.neighbors(0)[0].distance() > 0.0);
        }
    }

    #[test]
    fn test_deterministic_rebuild() {
        let points = random_cloud(120, 5);
        let builder = KnnGraphBuilder::with_defaults();
        let first = serde_json::to_vec(&builder.build_edges(&points).unwrap()).unwrap();
        let second = serde_json::to_vec(&builder.build_edges(&points).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_strategy() {
        let config = KnnConfig::default().with_auto_kd_tree_threshold(100);
        assert_eq!(config.resolve_strategy(100), SearchStrategy::BruteForce);
        assert_eq!(config.resolve_strategy(101), SearchStrategy::KdTree);
        let forced = config.with_strategy(SearchStrategy::BruteForce);
        assert_eq!(forced.resolve_strategy(10_000), SearchStrategy::BruteForce);
    }

    #[test]
    fn test_config_builder() {
        let config = KnnConfig::default()
            .with_k(15)
            .with_k_policy(KPolicy::Strict)
            .with_strategy(SearchStrategy::KdTree)
            .with_parallel(true);

        assert_eq!(config.k, 15);
        assert_eq!(config.k_policy, KPolicy::Strict);
        assert_eq!(config.strategy, SearchStrategy::KdTree);
        assert!(config.parallel);
        assert_eq!(KnnConfig::default().k, DEFAULT_K);
    }
}
