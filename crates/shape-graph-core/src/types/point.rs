//! Point and PointSet value types.
//!
//! A [`PointSet`] is the only thing the KNN builder sees of a dataset sample:
//! an ordered, non-empty, immutable sequence of finite 3D points. Point
//! identity is the 0-based position in that sequence.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A point in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along `axis` (0 = x, 1 = y, 2 = z).
    ///
    /// # Panics
    ///
    /// Panics if `axis > 2`.
    #[inline]
    pub fn coord(&self, axis: usize) -> f32 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis out of range: {axis}"),
        }
    }

    /// Squared Euclidean distance to `other`, computed in `f64`.
    ///
    /// This is the ordering key of the neighbor search. Coordinates are
    /// widened before subtracting, so any two finite points have a finite
    /// key and tiny separations do not collapse to zero. It is exactly
    /// symmetric: `a.distance_squared(&b) == b.distance_squared(&a)`.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        let dz = f64::from(self.z) - f64::from(other.z);
        dx * dx + dy * dy + dz * dz
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    fn first_non_finite(&self) -> Option<(char, f32)> {
        [('x', self.x), ('y', self.y), ('z', self.z)]
            .into_iter()
            .find(|(_, v)| !v.is_finite())
    }
}

impl From<[f32; 3]> for Point {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f32, f32, f32)> for Point {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

/// An ordered, non-empty, immutable sequence of finite points.
///
/// # Examples
///
/// ```
/// use shape_graph_core::types::{Point, PointSet};
///
/// let set = PointSet::new(vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)]).unwrap();
/// assert_eq!(set.len(), 2);
/// assert!(PointSet::new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Build a point set, rejecting empty input and non-finite coordinates.
    ///
    /// # Errors
    ///
    /// - `EmptyPointSet` if `points` is empty
    /// - `InvalidCoordinate` for the first NaN or infinite coordinate
    pub fn new(points: Vec<Point>) -> CoreResult<Self> {
        if points.is_empty() {
            return Err(CoreError::EmptyPointSet);
        }

        for (index, point) in points.iter().enumerate() {
            if let Some((axis, value)) = point.first_non_finite() {
                return Err(CoreError::InvalidCoordinate { index, axis, value });
            }
        }

        Ok(Self { points })
    }

    /// Build a point set from `[x, y, z]` triples.
    pub fn from_coords<I>(coords: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = [f32; 3]>,
    {
        Self::new(coords.into_iter().map(Point::from).collect())
    }

    /// Number of points (always >= 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// All points in order.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate over points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Coordinate columns `[xs, ys, zs]`.
    pub fn columns(&self) -> [Vec<f32>; 3] {
        let mut xs = Vec::with_capacity(self.len());
        let mut ys = Vec::with_capacity(self.len());
        let mut zs = Vec::with_capacity(self.len());
        for p in &self.points {
            xs.push(p.x);
            ys.push(p.y);
            zs.push(p.z);
        }
        [xs, ys, zs]
    }

    /// Axis-aligned bounding box.
    pub fn bounding_box(&self) -> BoundingBox {
        let first = self.points[0];
        self.points[1..].iter().fold(
            BoundingBox {
                min: first,
                max: first,
            },
            |bb, p| BoundingBox {
                min: Point::new(bb.min.x.min(p.x), bb.min.y.min(p.y), bb.min.z.min(p.z)),
                max: Point::new(bb.max.x.max(p.x), bb.max.y.max(p.y), bb.max.z.max(p.z)),
            },
        )
    }

    /// Arithmetic mean of all points.
    pub fn centroid(&self) -> Point {
        let n = self.len() as f64;
        let (sx, sy, sz) = self.points.iter().fold((0.0f64, 0.0f64, 0.0f64), |acc, p| {
            (acc.0 + p.x as f64, acc.1 + p.y as f64, acc.2 + p.z as f64)
        });
        Point::new((sx / n) as f32, (sy / n) as f32, (sz / n) as f32)
    }
}

impl TryFrom<Vec<Point>> for PointSet {
    type Error = CoreError;

    fn try_from(points: Vec<Point>) -> CoreResult<Self> {
        Self::new(points)
    }
}

impl From<PointSet> for Vec<Point> {
    fn from(set: PointSet) -> Self {
        set.points
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
