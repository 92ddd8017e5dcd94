//! Convex polygon: the 3D boundary simplex.

use nalgebra::{Point3, Vector3};

use crate::{Classification, Hyperplane, PlaneSide, Ray, Simplex, Tolerance};

/// A convex polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices should be coplanar and in counter-clockwise winding order when
/// viewed from the front (the direction the normal points). For a closed
/// boundary wound this way the normals point out of the solid and the solid
/// lies on each face's back side.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f32>>,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    ///
    /// # Panics (debug builds only)
    /// Panics if fewer than 3 vertices are provided.
    pub fn new(vertices: Vec<Point3<f32>>) -> Self {
        debug_assert!(vertices.len() >= 3, "Polygon must have at least 3 vertices");
        Self { vertices }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the polygon has no vertices (never, for valid polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Computes the centroid (vertex average) of the polygon.
    pub fn centroid(&self) -> Point3<f32> {
        let sum: Vector3<f32> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f32)
    }
}

impl Simplex<3> for Polygon {
    fn supporting_plane(&self) -> Hyperplane<3> {
        let n = self.normal();
        if n.norm() > f32::EPSILON {
            Hyperplane::from_point_and_normal(self.vertices[0], n)
        } else {
            // Collinear vertices span no plane. Fall back to a fixed axis so
            // construction degrades deterministically.
            debug_assert!(false, "degenerate polygon has no supporting plane");
            Hyperplane::from_point_and_normal(self.vertices[0], Vector3::x())
        }
    }

    /// The (unnormalized) right-hand-rule normal of the first three vertices.
    fn normal(&self) -> Vector3<f32> {
        let a = &self.vertices[0];
        let b = &self.vertices[1];
        let c = &self.vertices[2];
        (b - a).cross(&(c - a))
    }

    fn classify(&self, plane: &Hyperplane<3>, tol: Tolerance) -> Classification {
        let mut front = 0;
        let mut back = 0;

        for vertex in &self.vertices {
            match plane.classify_point(vertex, tol) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => {}
            }
        }

        match (front, back) {
            (0, 0) => Classification::Coplanar,
            (_, 0) => Classification::Front,
            (0, _) => Classification::Back,
            _ => Classification::Straddling,
        }
    }

    fn split(&self, plane: &Hyperplane<3>, tol: Tolerance) -> (Option<Self>, Option<Self>) {
        match self.classify(plane, tol) {
            Classification::Front | Classification::Coplanar => (Some(self.clone()), None),
            Classification::Back => (None, Some(self.clone())),
            Classification::Straddling => split_polygon(self, plane, tol),
        }
    }

    fn intersect_ray(&self, ray: &Ray<3>, tol: Tolerance) -> Option<f32> {
        let plane = self.supporting_plane();
        let denom = plane.normal().dot(&ray.direction());
        if tol.eq_zero(denom) {
            return None;
        }

        let t = -plane.signed_distance(&ray.origin()) / denom;
        if tol.lt(t, 0.0) {
            return None;
        }

        // Containment: the crossing must lie on the inner side of every edge.
        let p = ray.at(t);
        let n = self.normal();
        let count = self.vertices.len();
        for i in 0..count {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % count];
            let edge_side = (b - a).cross(&(p - a)).dot(&n);
            if tol.lt(edge_side, 0.0) {
                return None;
            }
        }
        Some(t.max(0.0))
    }
}

/// Splits a straddling polygon into front and back parts.
///
/// A variant of the Sutherland-Hodgman algorithm: walks the polygon edges and
/// builds two vertex lists, adding intersection points when edges cross the
/// plane. On-plane vertices are emitted to both sides; a side with fewer than
/// three vertices yields no part.
fn split_polygon(
    polygon: &Polygon,
    plane: &Hyperplane<3>,
    tol: Tolerance,
) -> (Option<Polygon>, Option<Polygon>) {
    let vertices = polygon.vertices();
    let n = vertices.len();

    let mut front_verts = Vec::with_capacity(n + 1);
    let mut back_verts = Vec::with_capacity(n + 1);

    let sides: Vec<PlaneSide> = vertices
        .iter()
        .map(|v| plane.classify_point(v, tol))
        .collect();

    for i in 0..n {
        let current = vertices[i];
        let current_side = sides[i];
        let next_idx = (i + 1) % n;
        let next = vertices[next_idx];
        let next_side = sides[next_idx];

        match current_side {
            PlaneSide::Front => front_verts.push(current),
            PlaneSide::Back => back_verts.push(current),
            PlaneSide::OnPlane => {
                front_verts.push(current);
                back_verts.push(current);
            }
        }

        let crosses = matches!(
            (current_side, next_side),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );

        if crosses {
            if let Some((_, crossing)) = plane.intersect_segment(&current, &next) {
                front_verts.push(crossing);
                back_verts.push(crossing);
            }
        }
    }

    let front = (front_verts.len() >= 3).then(|| Polygon::new(front_verts));
    let back = (back_verts.len() >= 3).then(|| Polygon::new(back_verts));
    (front, back)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Polygon {
        Polygon::new(vec![
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        ])
    }

    #[test]
    fn classify_against_plane() {
        let tol = Tolerance::default();
        let plane = Hyperplane::from_point_and_normal(Point3::origin(), Vector3::y());

        let above = make_triangle([0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 1.0]);
        assert_eq!(above.classify(&plane, tol), Classification::Front);

        let below = make_triangle([0.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, -1.0, 1.0]);
        assert_eq!(below.classify(&plane, tol), Classification::Back);

        let on = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(on.classify(&plane, tol), Classification::Coplanar);

        let across = make_triangle([0.0, -1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 1.0]);
        assert_eq!(across.classify(&plane, tol), Classification::Straddling);
    }

    #[test]
    fn split_straddling_triangle() {
        let tol = Tolerance::default();
        let plane = Hyperplane::from_point_and_normal(Point3::origin(), Vector3::y());
        let tri = make_triangle([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 2.0, 0.0]);

        let (front, back) = tri.split(&plane, tol);
        let front = front.unwrap();
        let back = back.unwrap();

        // The cut runs along y = 0: the front part keeps the apex, the back
        // part becomes a quad, and the two new vertices lie on the plane.
        assert_eq!(front.len(), 3);
        assert_eq!(back.len(), 4);
        for v in front.vertices() {
            assert!(v.y >= -tol.epsilon());
        }
        for v in back.vertices() {
            assert!(v.y <= tol.epsilon());
        }

        // Winding (and so facing) is preserved on both parts.
        assert!(front.normal().dot(&tri.normal()) > 0.0);
        assert!(back.normal().dot(&tri.normal()) > 0.0);
    }

    #[test]
    fn ray_hits_interior_not_exterior() {
        let tol = Tolerance::default();
        let quad = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);

        let hit = Ray::new(Point3::new(0.5, 0.5, -2.0), Vector3::z());
        let t = quad.intersect_ray(&hit, tol).unwrap();
        assert!(tol.eq(t, 2.0));

        let miss = Ray::new(Point3::new(2.0, 0.5, -2.0), Vector3::z());
        assert_eq!(quad.intersect_ray(&miss, tol), None);

        let parallel = Ray::new(Point3::new(0.5, 0.5, -2.0), Vector3::x());
        assert_eq!(quad.intersect_ray(&parallel, tol), None);
    }
}
