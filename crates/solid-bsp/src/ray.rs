//! Ray representation and hit reporting.

use nalgebra::{Point, SVector};

/// A ray in `D`-dimensional space defined by origin and unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray<const D: usize> {
    origin: Point<f32, D>,
    direction: SVector<f32, D>,
}

impl<const D: usize> Ray<D> {
    /// Creates a ray from an origin and a direction.
    ///
    /// The direction is normalized, so ray parameters are metric distances.
    ///
    /// # Panics
    /// Panics if the direction has zero length.
    pub fn new(origin: Point<f32, D>, direction: SVector<f32, D>) -> Self {
        let norm = direction.norm();
        assert!(norm > f32::EPSILON, "Ray direction cannot be zero");
        Self {
            origin,
            direction: direction / norm,
        }
    }

    /// Returns the ray origin.
    #[inline]
    pub fn origin(&self) -> Point<f32, D> {
        self.origin
    }

    /// Returns the unit direction.
    #[inline]
    pub fn direction(&self) -> SVector<f32, D> {
        self.direction
    }

    /// Evaluates the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f32) -> Point<f32, D> {
        self.origin + self.direction * t
    }
}

/// A first-hit ray query result.
///
/// Returned inside `Option`: `None` means the ray misses the solid entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<const D: usize> {
    /// Distance from the ray origin to the hit.
    pub t: f32,
    /// The hit point, `origin + t * direction`.
    pub point: Point<f32, D>,
    /// Store index of the boundary primitive that was struck.
    ///
    /// Resolves through [`SolidBsp::item`](crate::SolidBsp::item) to the
    /// caller payload attached at build time.
    pub simplex: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Vector2};

    #[test]
    fn direction_is_normalized() {
        let ray = Ray::new(Point2::new(1.0, 2.0), Vector2::new(0.0, 3.0));
        assert!((ray.direction().norm() - 1.0).abs() < 1e-6);

        let p = ray.at(2.0);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 4.0).abs() < 1e-6);
    }
}
