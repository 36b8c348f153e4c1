//! Arguments shared by several commands, and how they override `Config`.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use shape_graph_core::config::{SourceKind, SyntheticShape};
use shape_graph_core::graph_linking::{KPolicy, SearchStrategy};
use shape_graph_core::Config;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Shapenet,
    File,
    Synthetic,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Shapenet => SourceKind::ShapeNet,
            SourceArg::File => SourceKind::File,
            SourceArg::Synthetic => SourceKind::Synthetic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Auto,
    BruteForce,
    KdTree,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => SearchStrategy::Auto,
            StrategyArg::BruteForce => SearchStrategy::BruteForce,
            StrategyArg::KdTree => SearchStrategy::KdTree,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    Sphere,
    Cube,
}

impl From<ShapeArg> for SyntheticShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Sphere => SyntheticShape::Sphere,
            ShapeArg::Cube => SyntheticShape::Cube,
        }
    }
}

/// Where to load the point cloud from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Point source kind (defaults to config, then shapenet)
    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// ShapeNet dataset root
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// ShapeNet category, e.g. Airplane
    #[arg(long)]
    pub category: Option<String>,

    /// Sample index within the category
    #[arg(long)]
    pub sample: Option<usize>,

    /// Point file (.json, .txt, .xyz, .pts); implies --source file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Synthetic point count
    #[arg(long)]
    pub count: Option<usize>,

    /// Synthetic shape
    #[arg(long, value_enum)]
    pub shape: Option<ShapeArg>,

    /// Synthetic seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SourceArgs {
    pub fn apply(&self, config: &mut Config) {
        let source = &mut config.source;
        if let Some(path) = &self.file {
            source.kind = SourceKind::File;
            source.path = Some(path.clone());
        }
        if let Some(kind) = self.source {
            source.kind = kind.into();
        }
        if let Some(root) = &self.root {
            source.root = root.clone();
        }
        if let Some(category) = &self.category {
            source.category = category.clone();
        }
        if let Some(sample) = self.sample {
            source.sample_index = sample;
        }
        if let Some(count) = self.count {
            source.synthetic_count = count;
        }
        if let Some(shape) = self.shape {
            source.synthetic_shape = shape.into();
        }
        if let Some(seed) = self.seed {
            source.seed = seed;
        }
    }
}

/// K-NN construction options.
#[derive(Args, Debug, Clone, Default)]
pub struct KnnArgs {
    /// Neighbors per point
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Fail instead of clamping when k exceeds N - 1
    #[arg(long)]
    pub strict_k: bool,

    /// Neighbor search strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Search neighbors on all cores
    #[arg(long)]
    pub parallel: bool,
}

impl KnnArgs {
    pub fn apply(&self, config: &mut Config) {
        let knn = &mut config.knn;
        if let Some(k) = self.k {
            knn.k = k;
        }
        if self.strict_k {
            knn.k_policy = KPolicy::Strict;
        }
        if let Some(strategy) = self.strategy {
            knn.strategy = strategy.into();
        }
        if self.parallel {
            knn.parallel = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_implies_file_source() {
        let mut config = Config::default_config();
        let args = SourceArgs {
            file: Some("cloud.xyz".into()),
            ..SourceArgs::default()
        };
        args.apply(&mut config);
        assert_eq!(config.source.kind, SourceKind::File);
        assert_eq!(config.source.path, Some(PathBuf::from("cloud.xyz")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_knn_overrides() {
        let mut config = Config::default_config();
        let args = KnnArgs {
            k: Some(12),
            strict_k: true,
            strategy: Some(StrategyArg::KdTree),
            parallel: true,
        };
        args.apply(&mut config);
        assert_eq!(config.knn.k, 12);
        assert_eq!(config.knn.k_policy, KPolicy::Strict);
        assert_eq!(config.knn.strategy, SearchStrategy::KdTree);
        assert!(config.knn.parallel);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default_config();
        SourceArgs::default().apply(&mut config);
        KnnArgs::default().apply(&mut config);
        assert_eq!(config, Config::default_config());
    }
}
