//! Full pipeline: point source → K-NN graph → scatter plot.
//!
//! # Usage
//!
//! ```bash
//! # First Airplane sample of a local ShapeNet copy, k = 6
//! shape-graph run --root /tmp/ShapeNet --category Airplane
//!
//! # Synthetic sphere with edges drawn
//! shape-graph run --source synthetic --count 500 --draw-edges --output sphere.svg
//! ```

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use shape_graph_core::render::{ScatterColumns, ScatterRenderer, SvgScatterRenderer};
use shape_graph_core::Config;

use super::args::{KnnArgs, SourceArgs};
use super::{fail, load_graph};
use crate::error::CliExitCode;

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub knn: KnnArgs,

    /// SVG output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Draw K-NN edges under the points
    #[arg(long)]
    pub draw_edges: bool,

    /// View azimuth in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub azimuth: Option<f32>,

    /// View elevation in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<f32>,
}

impl RunArgs {
    fn apply(&self, config: &mut Config) {
        self.source.apply(config);
        self.knn.apply(config);
        if let Some(output) = &self.output {
            config.render.output = output.clone();
        }
        if self.draw_edges {
            config.render.draw_edges = true;
        }
        if let Some(azimuth) = self.azimuth {
            config.render.azimuth_deg = azimuth;
        }
        if let Some(elevation) = self.elevation {
            config.render.elevation_deg = elevation;
        }
    }
}

/// Execute the run command.
///
/// # Returns
///
/// Exit code (see [`CliExitCode`]).
pub fn handle_run(args: RunArgs, mut config: Config) -> i32 {
    args.apply(&mut config);

    let graph = match load_graph(&config) {
        Ok(graph) => graph,
        Err(e) => return fail("Failed to build K-NN graph", &e),
    };

    let renderer = SvgScatterRenderer::new(config.render.clone());
    let scatter = ScatterColumns::from(graph.points());
    if let Err(e) = renderer.render(&scatter, Some(graph.edges())) {
        return fail("Failed to render scatter plot", &e);
    }

    info!("Wrote {}", config.render.output.display());
    println!(
        "{} points, {} edges (k = {}) -> {}",
        graph.node_count(),
        graph.edge_count(),
        graph.k(),
        config.render.output.display()
    );
    CliExitCode::Success.into()
}
