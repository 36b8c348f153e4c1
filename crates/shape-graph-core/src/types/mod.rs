//! Domain value types.

mod point;

pub use point::{BoundingBox, Point, PointSet};
