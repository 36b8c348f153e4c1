//! Summarize a point-cloud sample.

use clap::Args;
use serde::Serialize;

use shape_graph_core::types::{BoundingBox, Point};
use shape_graph_core::{Config, CoreError};

use super::args::SourceArgs;
use super::{fail, load_points};
use crate::error::CliExitCode;

/// Arguments for the inspect command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    points: usize,
    bounding_box: BoundingBox,
    centroid: Point,
}

/// Execute the inspect command.
pub fn handle_inspect(args: InspectArgs, mut config: Config) -> i32 {
    args.source.apply(&mut config);

    let points = match load_points(&config) {
        Ok(points) => points,
        Err(e) => return fail("Failed to load point cloud", &e),
    };

    let summary = Summary {
        points: points.len(),
        bounding_box: points.bounding_box(),
        centroid: points.centroid(),
    };

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => return fail("Failed to serialize summary", &CoreError::from(e)),
        }
    } else {
        let bb = summary.bounding_box;
        println!("points:   {}", summary.points);
        println!("min:      ({:.4}, {:.4}, {:.4})", bb.min.x, bb.min.y, bb.min.z);
        println!("max:      ({:.4}, {:.4}, {:.4})", bb.max.x, bb.max.y, bb.max.z);
        println!(
            "centroid: ({:.4}, {:.4}, {:.4})",
            summary.centroid.x, summary.centroid.y, summary.centroid.z
        );
    }

    CliExitCode::Success.into()
}
