//! Hyperplane representation and point classification.

use nalgebra::{Point, SVector};

use crate::Tolerance;

/// Which side of a hyperplane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of the normal)
    Front,
    /// Point is behind the plane (negative side of the normal)
    Back,
    /// Point lies on the plane (within tolerance)
    OnPlane,
}

/// Classification of a simplex relative to a hyperplane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Every vertex is in front of the plane
    Front,
    /// Every vertex is behind the plane
    Back,
    /// Every vertex lies on the plane
    Coplanar,
    /// Vertices lie on both sides; the simplex must be split
    Straddling,
}

/// A hyperplane in `D`-dimensional space, represented as `normal · x = offset`.
///
/// In 2D this is a directed line, in 3D a plane. The normal is kept at unit
/// length so signed distances are metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperplane<const D: usize> {
    normal: SVector<f32, D>,
    offset: f32,
}

impl<const D: usize> Hyperplane<D> {
    /// Creates a hyperplane from a normal vector and offset.
    /// The normal is normalized and the offset rescaled to match.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: SVector<f32, D>, offset: f32) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Hyperplane normal cannot be zero");
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a hyperplane through `point` with the given normal.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point<f32, D>, normal: SVector<f32, D>) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Hyperplane normal cannot be zero");
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            offset,
        }
    }

    /// Returns the unit normal vector.
    #[inline]
    pub fn normal(&self) -> SVector<f32, D> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as the normal)
    /// - Negative: point is behind
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: &Point<f32, D>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    pub fn classify_point(&self, point: &Point<f32, D>, tol: Tolerance) -> PlaneSide {
        let dist = self.signed_distance(point);
        if tol.gt(dist, 0.0) {
            PlaneSide::Front
        } else if tol.lt(dist, 0.0) {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns the plane with its normal facing the opposite direction.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Projects a point onto the plane (closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: &Point<f32, D>) -> Point<f32, D> {
        point - self.normal * self.signed_distance(point)
    }

    /// Computes the intersection of the segment `start..end` with the plane.
    ///
    /// Returns `Some((t, point))` with `t` the interpolation parameter
    /// (0.0 = start, 1.0 = end), or `None` if the segment is parallel to the
    /// plane or the crossing falls outside the segment.
    pub fn intersect_segment(
        &self,
        start: &Point<f32, D>,
        end: &Point<f32, D>,
    ) -> Option<(f32, Point<f32, D>)> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(&start.coords)) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some((t, start + direction * t))
    }
}

impl Hyperplane<2> {
    /// Creates the directed line through `a` and `b`.
    ///
    /// The normal is the right-hand perpendicular of `b - a`, so for a
    /// counter-clockwise outline it points out of the enclosed region.
    ///
    /// # Panics
    /// Panics if `a` and `b` coincide.
    pub fn from_segment_points(a: Point<f32, 2>, b: Point<f32, 2>) -> Self {
        let d = b - a;
        Self::from_point_and_normal(a, SVector::<f32, 2>::new(d.y, -d.x))
    }
}

impl Hyperplane<3> {
    /// Creates the plane through three non-collinear points.
    /// The normal follows the right-hand rule: `(b - a) × (c - a)`.
    ///
    /// # Panics
    /// Panics if the points are collinear (or nearly so).
    pub fn from_three_points(a: Point<f32, 3>, b: Point<f32, 3>, c: Point<f32, 3>) -> Self {
        let ab = b - a;
        let ac = c - a;
        Self::from_point_and_normal(a, ab.cross(&ac))
    }
}
