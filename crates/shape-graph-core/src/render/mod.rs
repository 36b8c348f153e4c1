//! Scatter plot rendering.
//!
//! Renderers consume coordinate columns only. Edges are optional and off by
//! default.

mod svg;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::graph_linking::KnnEdge;
use crate::types::PointSet;

pub use svg::SvgScatterRenderer;

/// Point positions as x, y, z columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterColumns {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl ScatterColumns {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl From<&PointSet> for ScatterColumns {
    fn from(points: &PointSet) -> Self {
        let [x, y, z] = points.columns();
        Self { x, y, z }
    }
}

/// A scatter plot backend.
pub trait ScatterRenderer {
    /// Draw the points, and `edges` if given and the backend supports them.
    fn render(&self, scatter: &ScatterColumns, edges: Option<&[KnnEdge]>) -> CoreResult<()>;
}
