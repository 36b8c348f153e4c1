//! Sub-configuration sections other than `knn`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of point source to load a sample from.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// ShapeNet part-segmentation dataset on disk
    #[default]
    ShapeNet,
    /// A single point file (.json, .txt, .xyz, .pts)
    File,
    /// Seeded synthetic cloud
    Synthetic,
}

/// Shape sampled by the synthetic source.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyntheticShape {
    /// Uniform on the unit sphere surface
    #[default]
    Sphere,
    /// Uniform inside the unit cube [-1, 1]³
    Cube,
}

/// Point source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// ShapeNet dataset root
    pub root: PathBuf,
    /// ShapeNet category name, e.g. "Airplane"
    pub category: String,
    /// Which sample of the category to load
    pub sample_index: usize,
    /// Point file, for `kind = "file"`
    pub path: Option<PathBuf>,
    pub synthetic_shape: SyntheticShape,
    pub synthetic_count: usize,
    pub seed: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::ShapeNet,
            root: PathBuf::from("/tmp/ShapeNet"),
            category: "Airplane".to_string(),
            sample_index: 0,
            path: None,
            synthetic_shape: SyntheticShape::Sphere,
            synthetic_count: 2048,
            seed: 42,
        }
    }
}

/// Scatter plot rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Rotation about the vertical axis, degrees
    pub azimuth_deg: f32,
    /// Tilt above the horizontal plane, degrees
    pub elevation_deg: f32,
    pub marker_radius: f32,
    pub color: String,
    pub draw_edges: bool,
    pub edge_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        // View angles follow matplotlib's 3D axes defaults.
        Self {
            output: PathBuf::from("shape_graph.svg"),
            width: 800,
            height: 800,
            azimuth_deg: -60.0,
            elevation_deg: 30.0,
            marker_radius: 2.0,
            color: "#0000ff".to_string(),
            draw_edges: false,
            edge_color: "#9e9e9e".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            include_location: false,
        }
    }
}
