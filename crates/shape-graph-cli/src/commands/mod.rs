//! CLI command handlers
//!
//! # Modules
//!
//! - `args`: shared source and K-NN flags
//! - `run`: load a sample, build its K-NN graph, render a scatter plot
//! - `build`: load a sample, build its K-NN graph, report or export edges
//! - `inspect`: summarize a sample without building a graph

pub mod args;
pub mod build;
pub mod inspect;
pub mod run;

use tracing::{error, info};

use shape_graph_core::source;
use shape_graph_core::{Config, CoreError, CoreResult, KnnGraph, KnnGraphBuilder, PointSet};

use crate::error::exit_code_for_error;

/// Validate the effective config and load the configured sample.
pub(crate) fn load_points(config: &Config) -> CoreResult<PointSet> {
    config.validate()?;
    let source = source::from_config(&config.source)?;
    info!("Loading {}", source.describe());
    source.load()
}

/// Load the configured sample and build its K-NN graph.
pub(crate) fn load_graph(config: &Config) -> CoreResult<KnnGraph> {
    let points = load_points(config)?;
    let builder = KnnGraphBuilder::new(config.knn.clone());
    let graph = builder.build(points)?;
    info!(
        points = graph.node_count(),
        k = graph.k(),
        edges = graph.edge_count(),
        "K-NN graph built"
    );
    Ok(graph)
}

/// Log `err` and return its exit code.
pub(crate) fn fail(context: &str, err: &CoreError) -> i32 {
    error!("{}: {}", context, err);
    exit_code_for_error(err).into()
}
