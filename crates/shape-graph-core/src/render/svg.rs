//! Orthographic 3D scatter plot written as SVG.
//!
//! Points are centered on their bounding box, rotated by the configured
//! azimuth (about z) and elevation, and scaled by one factor on every axis so
//! the aspect ratio is equal. Markers are painted back to front.

use svg::node::element::{Circle, Group, Line, Rectangle};
use svg::{Document, Node};
use tracing::info;

use super::{ScatterColumns, ScatterRenderer};
use crate::config::RenderConfig;
use crate::error::{CoreError, CoreResult};
use crate::graph_linking::KnnEdge;

/// Fraction of the canvas the cloud may occupy.
const FILL: f32 = 0.9;
const ROUND_TO_DIGITS: usize = 2;

/// Renders scatter plots to SVG files.
#[derive(Debug, Clone, Default)]
pub struct SvgScatterRenderer {
    config: RenderConfig,
}

/// A projected point: canvas position plus depth along the view direction.
#[derive(Debug, Clone, Copy)]
struct Projected {
    sx: f32,
    sy: f32,
    depth: f32,
}

impl SvgScatterRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the SVG document.
    pub fn document(&self, scatter: &ScatterColumns, edges: Option<&[KnnEdge]>) -> CoreResult<Document> {
        let cfg = &self.config;
        if cfg.width == 0 || cfg.height == 0 {
            return Err(CoreError::RenderError("canvas width and height must be positive".into()));
        }
        if scatter.y.len() != scatter.len() || scatter.z.len() != scatter.len() {
            return Err(CoreError::RenderError(format!(
                "column lengths differ: x = {}, y = {}, z = {}",
                scatter.len(),
                scatter.y.len(),
                scatter.z.len()
            )));
        }
        let color = checked_color(&cfg.color)?;
        let edge_color = checked_color(&cfg.edge_color)?;

        let projected = self.project(scatter);

        let mut document = Document::new()
            .set("width", cfg.width)
            .set("height", cfg.height)
            .set("viewBox", format!("0 0 {} {}", cfg.width, cfg.height))
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", "white"),
            );

        if let (true, Some(edges)) = (cfg.draw_edges, edges) {
            let mut group = Group::new()
                .set("stroke", edge_color)
                .set("stroke-width", 0.5)
                .set("stroke-opacity", 0.6);
            for edge in edges {
                let (Some(a), Some(b)) = (projected.get(edge.source()), projected.get(edge.target()))
                else {
                    return Err(CoreError::RenderError(format!(
                        "edge {} -> {} references a point outside the scatter",
                        edge.source(),
                        edge.target()
                    )));
                };
                group.append(
                    Line::new()
                        .set("x1", round(a.sx))
                        .set("y1", round(a.sy))
                        .set("x2", round(b.sx))
                        .set("y2", round(b.sy)),
                );
            }
            document.append(group);
        }

        let mut order: Vec<usize> = (0..projected.len()).collect();
        order.sort_by(|&a, &b| projected[a].depth.total_cmp(&projected[b].depth));

        let mut markers = Group::new().set("fill", color).set("fill-opacity", 0.8);
        for i in order {
            let p = projected[i];
            markers.append(
                Circle::new()
                    .set("cx", round(p.sx))
                    .set("cy", round(p.sy))
                    .set("r", cfg.marker_radius),
            );
        }
        document.append(markers);

        Ok(document)
    }

    /// Produce the SVG markup.
    pub fn to_svg(&self, scatter: &ScatterColumns, edges: Option<&[KnnEdge]>) -> CoreResult<String> {
        Ok(self.document(scatter, edges)?.to_string())
    }

    fn project(&self, scatter: &ScatterColumns) -> Vec<Projected> {
        let cfg = &self.config;
        if scatter.is_empty() {
            return Vec::new();
        }

        let (min, max) = (0..3).fold(([f32::INFINITY; 3], [f32::NEG_INFINITY; 3]), |(mut lo, mut hi), axis| {
            let column = match axis {
                0 => &scatter.x,
                1 => &scatter.y,
                _ => &scatter.z,
            };
            for &v in column {
                lo[axis] = lo[axis].min(v);
                hi[axis] = hi[axis].max(v);
            }
            (lo, hi)
        });
        let center = [
            (min[0] + max[0]) * 0.5,
            (min[1] + max[1]) * 0.5,
            (min[2] + max[2]) * 0.5,
        ];
        // Half-diagonal of the bounding box bounds the projection for any view.
        let half_diagonal = ((max[0] - min[0]).powi(2) + (max[1] - min[1]).powi(2) + (max[2] - min[2]).powi(2))
            .sqrt()
            * 0.5;
        let half_canvas = cfg.width.min(cfg.height) as f32 * 0.5 * FILL;
        let scale = if half_diagonal > 0.0 {
            half_canvas / half_diagonal
        } else {
            1.0
        };

        let (sin_az, cos_az) = cfg.azimuth_deg.to_radians().sin_cos();
        let (sin_el, cos_el) = cfg.elevation_deg.to_radians().sin_cos();
        let (cx, cy) = (cfg.width as f32 * 0.5, cfg.height as f32 * 0.5);

        (0..scatter.len())
            .map(|i| {
                let x = scatter.x[i] - center[0];
                let y = scatter.y[i] - center[1];
                let z = scatter.z[i] - center[2];

                // Horizontal screen axis is perpendicular to the azimuth direction;
                // depth grows toward the viewer.
                let right = -x * sin_az + y * cos_az;
                let toward = x * cos_az + y * sin_az;
                let up = z * cos_el - toward * sin_el;
                let depth = toward * cos_el + z * sin_el;

                Projected {
                    sx: cx + right * scale,
                    sy: cy - up * scale,
                    depth,
                }
            })
            .collect()
    }
}

impl ScatterRenderer for SvgScatterRenderer {
    fn render(&self, scatter: &ScatterColumns, edges: Option<&[KnnEdge]>) -> CoreResult<()> {
        let document = self.document(scatter, edges)?;
        svg::save(&self.config.output, &document).map_err(|e| {
            CoreError::RenderError(format!(
                "failed to write {}: {}",
                self.config.output.display(),
                e
            ))
        })?;
        info!(
            output = %self.config.output.display(),
            points = scatter.len(),
            "rendered scatter plot"
        );
        Ok(())
    }
}

#[inline]
fn round(value: f32) -> f32 {
    let factor = 10f32.powi(ROUND_TO_DIGITS as i32);
    (value * factor).round() / factor
}

/// Colors must be a single non-empty attribute token.
fn checked_color(color: &str) -> CoreResult<&str> {
    if color.is_empty() || color.contains(|c: char| c.is_whitespace() || matches!(c, '"' | '<' | '>' | '&')) {
        return Err(CoreError::RenderError(format!("invalid color \"{color}\"")));
    }
    Ok(color)
}
