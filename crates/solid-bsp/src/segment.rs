//! Directed line segment: the 2D boundary simplex.

use nalgebra::{Point2, Vector2};

use crate::{Classification, Hyperplane, PlaneSide, Ray, Simplex, Tolerance};

/// A directed line segment in 2D space.
///
/// Direction matters: the segment's normal is the right-hand perpendicular of
/// `end - start`, so for a boundary wound counter-clockwise around a solid the
/// normal points out of the solid and the solid lies on the segment's back
/// side.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    start: Point2<f32>,
    end: Point2<f32>,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    ///
    /// # Panics (debug builds only)
    /// Panics if the endpoints coincide.
    pub fn new(start: Point2<f32>, end: Point2<f32>) -> Self {
        debug_assert!(
            (end - start).norm() > f32::EPSILON,
            "Segment endpoints must be distinct"
        );
        Self { start, end }
    }

    /// Returns the start point.
    #[inline]
    pub fn start(&self) -> Point2<f32> {
        self.start
    }

    /// Returns the end point.
    #[inline]
    pub fn end(&self) -> Point2<f32> {
        self.end
    }

    /// Returns the (unnormalized) direction `end - start`.
    #[inline]
    pub fn direction(&self) -> Vector2<f32> {
        self.end - self.start
    }

    /// Returns the segment midpoint.
    pub fn midpoint(&self) -> Point2<f32> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Returns the segment length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().norm()
    }
}

impl Simplex<2> for Segment {
    fn supporting_plane(&self) -> Hyperplane<2> {
        let n = self.normal();
        if n.norm() > f32::EPSILON {
            Hyperplane::from_point_and_normal(self.start, n)
        } else {
            // Zero-length segment: no meaningful line through it. Fall back to
            // a fixed axis so construction degrades deterministically.
            debug_assert!(false, "degenerate segment has no supporting line");
            Hyperplane::from_point_and_normal(self.start, Vector2::x())
        }
    }

    /// The right-hand perpendicular of the direction: `(dy, -dx)`.
    fn normal(&self) -> Vector2<f32> {
        let d = self.direction();
        Vector2::new(d.y, -d.x)
    }

    fn classify(&self, plane: &Hyperplane<2>, tol: Tolerance) -> Classification {
        let mut front = 0;
        let mut back = 0;

        for vertex in [self.start, self.end] {
            match plane.classify_point(&vertex, tol) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => {}
            }
        }

        // An endpoint on the plane never forces a split, so a crossing that
        // coincides with an endpoint classifies as pure front or back.
        match (front, back) {
            (0, 0) => Classification::Coplanar,
            (_, 0) => Classification::Front,
            (0, _) => Classification::Back,
            _ => Classification::Straddling,
        }
    }

    fn split(&self, plane: &Hyperplane<2>, tol: Tolerance) -> (Option<Self>, Option<Self>) {
        match self.classify(plane, tol) {
            Classification::Front | Classification::Coplanar => (Some(self.clone()), None),
            Classification::Back => (None, Some(self.clone())),
            Classification::Straddling => {
                let Some((_, crossing)) = plane.intersect_segment(&self.start, &self.end) else {
                    // Vertex classification said straddling but the parametric
                    // crossing fell out; keep the whole segment on the front.
                    debug_assert!(false, "straddling segment without a crossing");
                    return (Some(self.clone()), None);
                };

                // Both parts keep the original direction, and with it the
                // original outward normal.
                let (first, second) = (
                    Self::new(self.start, crossing),
                    Self::new(crossing, self.end),
                );
                if plane.classify_point(&self.start, tol) == PlaneSide::Front {
                    (Some(first), Some(second))
                } else {
                    (Some(second), Some(first))
                }
            }
        }
    }

    fn intersect_ray(&self, ray: &Ray<2>, tol: Tolerance) -> Option<f32> {
        let s = self.direction();
        let d = ray.direction();
        let denom = d.perp(&s);
        if tol.eq_zero(denom) {
            return None;
        }

        let ao = self.start - ray.origin();
        let t = ao.perp(&s) / denom;
        let u = ao.perp(&d) / denom;

        if tol.lt(t, 0.0) || tol.lt(u, 0.0) || tol.gt(u, 1.0) {
            return None;
        }
        Some(t.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_line_at(x: f32) -> Hyperplane<2> {
        Hyperplane::from_point_and_normal(Point2::new(x, 0.0), Vector2::x())
    }

    #[test]
    fn normal_is_right_hand_perpendicular() {
        // Bottom edge of a CCW square: direction +x, outward normal -y.
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let n = seg.normal();
        assert_eq!(n, Vector2::new(0.0, -1.0));

        let plane = seg.supporting_plane();
        assert!(plane.signed_distance(&Point2::new(0.5, 0.5)) < 0.0);
        assert!(plane.signed_distance(&Point2::new(0.5, -0.5)) > 0.0);
    }

    #[test]
    fn classify_sides() {
        let tol = Tolerance::default();
        let plane = vertical_line_at(0.0);

        let front = Segment::new(Point2::new(1.0, 0.0), Point2::new(2.0, 1.0));
        assert_eq!(front.classify(&plane, tol), Classification::Front);

        let back = Segment::new(Point2::new(-1.0, 0.0), Point2::new(-2.0, 1.0));
        assert_eq!(back.classify(&plane, tol), Classification::Back);

        let coplanar = Segment::new(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0));
        assert_eq!(coplanar.classify(&plane, tol), Classification::Coplanar);

        let straddling = Segment::new(Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0));
        assert_eq!(straddling.classify(&plane, tol), Classification::Straddling);
    }

    #[test]
    fn endpoint_on_plane_does_not_straddle() {
        let tol = Tolerance::default();
        let plane = vertical_line_at(0.0);

        let touching = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        assert_eq!(touching.classify(&plane, tol), Classification::Front);

        let (front, back) = touching.split(&plane, tol);
        assert_eq!(front, Some(touching));
        assert_eq!(back, None);
    }

    #[test]
    fn split_covers_original_endpoints() {
        let tol = Tolerance::default();
        let plane = vertical_line_at(0.5);
        let seg = Segment::new(Point2::new(-1.0, -1.0), Point2::new(2.0, 2.0));

        let (front, back) = seg.split(&plane, tol);
        let front = front.unwrap();
        let back = back.unwrap();

        // Back part starts where the original did, front part ends where the
        // original did, and they share the crossing vertex on the plane.
        assert_eq!(back.start(), seg.start());
        assert_eq!(front.end(), seg.end());
        assert_eq!(back.end(), front.start());
        assert!(tol.eq_zero(plane.signed_distance(&front.start())));

        // Direction (and so the outward normal) is preserved.
        assert!(front.normal().dot(&seg.normal()) > 0.0);
        assert!(back.normal().dot(&seg.normal()) > 0.0);
    }

    #[test]
    fn ray_hits_segment() {
        let tol = Tolerance::default();
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));

        let ray = Ray::new(Point2::new(0.5, -1.0), Vector2::new(0.0, 1.0));
        let t = seg.intersect_ray(&ray, tol).unwrap();
        assert!(tol.eq(t, 1.0));

        // Aimed past the end of the segment.
        let miss = Ray::new(Point2::new(2.0, -1.0), Vector2::new(0.0, 1.0));
        assert_eq!(seg.intersect_ray(&miss, tol), None);

        // Behind the origin.
        let behind = Ray::new(Point2::new(0.5, -1.0), Vector2::new(0.0, -1.0));
        assert_eq!(seg.intersect_ray(&behind, tol), None);

        // Parallel to the segment.
        let parallel = Ray::new(Point2::new(0.0, -1.0), Vector2::new(1.0, 0.0));
        assert_eq!(seg.intersect_ray(&parallel, tol), None);
    }
}
