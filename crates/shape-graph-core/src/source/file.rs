//! Single-file point source.
//!
//! - `.json`: a serialized [`PointSet`] (array of `{"x", "y", "z"}` objects)
//! - anything else: whitespace-separated text, one point per line, the first
//!   three columns read as x y z and the rest ignored. Blank lines and lines
//!   starting with `#` are skipped.

use std::path::{Path, PathBuf};

use tracing::info;

use super::PointSource;
use crate::error::{CoreError, CoreResult};
use crate::types::{Point, PointSet};

/// Loads a point set from one file.
#[derive(Debug, Clone)]
pub struct PointFileSource {
    path: PathBuf,
}

impl PointFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PointSource for PointFileSource {
    fn load(&self) -> CoreResult<PointSet> {
        let is_json = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let points = if is_json {
            let content = std::fs::read_to_string(&self.path)?;
            serde_json::from_str::<PointSet>(&content)?
        } else {
            read_text_points(&self.path)?
        };

        info!(path = %self.path.display(), points = points.len(), "loaded point file");
        Ok(points)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Read a whitespace-separated text point file.
pub(crate) fn read_text_points(path: &Path) -> CoreResult<PointSet> {
    let content = std::fs::read_to_string(path)?;
    parse_text_points(path, &content)
}

/// Parse whitespace-separated text; `path` is only used in error messages.
pub(crate) fn parse_text_points(path: &Path, content: &str) -> CoreResult<PointSet> {
    let mut points = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut coords = [0.0f32; 3];
        let mut columns = line.split_whitespace();
        for (axis, slot) in coords.iter_mut().enumerate() {
            let token = columns.next().ok_or_else(|| {
                CoreError::parse_error(path, line_no + 1, format!("expected at least 3 columns, found {axis}"))
            })?;
            *slot = token.parse::<f32>().map_err(|e| {
                CoreError::parse_error(path, line_no + 1, format!("invalid number \"{token}\": {e}"))
            })?;
        }

        points.push(Point::from(coords));
    }

    if points.is_empty() {
        return Err(CoreError::SourceError(format!(
            "{} contains no points",
            path.display()
        )));
    }

    PointSet::new(points)
}
