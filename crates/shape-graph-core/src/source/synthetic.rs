//! Seeded synthetic point clouds.

use rand::prelude::*;
use std::f32::consts::TAU;

use super::PointSource;
use crate::config::SyntheticShape;
use crate::error::{CoreError, CoreResult};
use crate::types::{Point, PointSet};

/// Generates a reproducible cloud for a given `(shape, count, seed)`.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    shape: SyntheticShape,
    count: usize,
    seed: u64,
}

impl SyntheticSource {
    pub fn new(shape: SyntheticShape, count: usize, seed: u64) -> Self {
        Self { shape, count, seed }
    }
}

impl PointSource for SyntheticSource {
    fn load(&self) -> CoreResult<PointSet> {
        if self.count == 0 {
            return Err(CoreError::SourceError(
                "synthetic source needs at least one point".into(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let points = (0..self.count)
            .map(|_| match self.shape {
                // Archimedes: uniform z and azimuth give a uniform sphere surface.
                SyntheticShape::Sphere => {
                    let z: f32 = rng.gen_range(-1.0..=1.0);
                    let phi: f32 = rng.gen_range(0.0..TAU);
                    let r = (1.0 - z * z).max(0.0).sqrt();
                    Point::new(r * phi.cos(), r * phi.sin(), z)
                }
                SyntheticShape::Cube => Point::new(
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                ),
            })
            .collect();

        PointSet::new(points)
    }

    fn describe(&self) -> String {
        let shape = match self.shape {
            SyntheticShape::Sphere => "sphere",
            SyntheticShape::Cube => "cube",
        };
        format!("synthetic {shape} ({} points, seed {})", self.count, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_points_on_unit_sphere() {
        let set = SyntheticSource::new(SyntheticShape::Sphere, 500, 1).load().unwrap();
        assert_eq!(set.len(), 500);
        for p in set.iter() {
            let r = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
            assert!((r - 1.0).abs() < 1e-4, "radius {r}");
        }
    }

    #[test]
    fn test_cube_bounds() {
        let set = SyntheticSource::new(SyntheticShape::Cube, 500, 2).load().unwrap();
        let bb = set.bounding_box();
        assert!(bb.min.x >= -1.0 && bb.max.x <= 1.0);
        assert!(bb.min.z >= -1.0 && bb.max.z <= 1.0);
    }

    #[test]
    fn test_seed_reproducible() {
        let a = SyntheticSource::new(SyntheticShape::Sphere, 64, 9).load().unwrap();
        let b = SyntheticSource::new(SyntheticShape::Sphere, 64, 9).load().unwrap();
        let c = SyntheticSource::new(SyntheticShape::Sphere, 64, 10).load().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_count() {
        assert!(SyntheticSource::new(SyntheticShape::Cube, 0, 0).load().is_err());
    }
}
