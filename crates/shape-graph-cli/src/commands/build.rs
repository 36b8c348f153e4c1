//! Build a K-NN graph and report it without rendering.
//!
//! The edge list can be exported as JSON for inspection; nothing reads it
//! back.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::info;

use shape_graph_core::graph_linking::{KnnEdge, KnnGraphStats};
use shape_graph_core::{Config, CoreError, KnnGraph};

use super::args::{KnnArgs, SourceArgs};
use super::{fail, load_graph};
use crate::error::CliExitCode;

/// Arguments for the build command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub knn: KnnArgs,

    /// Write the edge list as JSON to this path
    #[arg(long)]
    pub edges_out: Option<PathBuf>,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON edge-list export.
#[derive(Debug, Serialize)]
pub struct EdgeListExport<'a> {
    pub node_count: usize,
    pub k: usize,
    pub edge_index: [Vec<usize>; 2],
    pub edges: &'a [KnnEdge],
}

impl<'a> From<&'a KnnGraph> for EdgeListExport<'a> {
    fn from(graph: &'a KnnGraph) -> Self {
        Self {
            node_count: graph.node_count(),
            k: graph.k(),
            edge_index: graph.edge_index(),
            edges: graph.edges(),
        }
    }
}

/// Execute the build command.
pub fn handle_build(args: BuildArgs, mut config: Config) -> i32 {
    args.source.apply(&mut config);
    args.knn.apply(&mut config);

    let graph = match load_graph(&config) {
        Ok(graph) => graph,
        Err(e) => return fail("Failed to build K-NN graph", &e),
    };

    if let Some(path) = &args.edges_out {
        if let Err(e) = write_edges(&graph, path) {
            return fail("Failed to export edges", &e);
        }
        info!("Wrote edge list to {}", path.display());
    }

    let stats = graph.stats();
    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => return fail("Failed to serialize statistics", &CoreError::from(e)),
        }
    } else {
        print_stats(&stats);
    }

    CliExitCode::Success.into()
}

fn write_edges(graph: &KnnGraph, path: &Path) -> Result<(), CoreError> {
    let json = serde_json::to_string(&EdgeListExport::from(graph))?;
    std::fs::write(path, json)?;
    Ok(())
}

fn print_stats(stats: &KnnGraphStats) {
    println!("points:           {}", stats.node_count);
    println!("k:                {}", stats.k);
    println!("directed edges:   {}", stats.edge_count);
    println!("undirected edges: {}", stats.undirected_edge_count);
    println!("mutual ratio:     {:.3}", stats.mutual_edge_ratio);
    println!(
        "edge length:      min {:.4}  mean {:.4}  max {:.4}",
        stats.min_distance, stats.mean_distance, stats.max_distance
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_graph_core::graph_linking::build_knn_graph;
    use shape_graph_core::PointSet;

    #[test]
    fn test_edge_list_export_shape() {
        let points = PointSet::from_coords([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [5.0, 0.0, 0.0]]).unwrap();
        let graph = build_knn_graph(points, 1).unwrap();
        let value = serde_json::to_value(EdgeListExport::from(&graph)).unwrap();

        assert_eq!(value["node_count"], 3);
        assert_eq!(value["k"], 1);
        assert_eq!(value["edge_index"][0], serde_json::json!([0, 1, 2]));
        assert_eq!(value["edge_index"][1], serde_json::json!([1, 0, 1]));
        assert_eq!(value["edges"].as_array().unwrap().len(), 3);
    }
}
