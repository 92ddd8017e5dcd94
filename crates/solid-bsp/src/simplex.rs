//! The boundary-primitive seam: simplices and payload extraction.
//!
//! A *simplex* is a boundary primitive — a directed [`Segment`](crate::Segment)
//! in 2D, a convex [`Polygon`](crate::Polygon) in 3D. The tree never looks at
//! vertices directly; everything it needs from a primitive goes through this
//! trait.

use crate::{Classification, Hyperplane, Ray, Tolerance};
use nalgebra::SVector;

/// Geometry a BSP tree can partition on.
///
/// # Return values of [`split`](Simplex::split)
///
/// `(front, back)` sub-simplices. A straddling simplex yields `(Some, Some)`;
/// implementations are free to return a one-sided result for inputs that turn
/// out not to straddle after tolerance-based vertex classification (a crossing
/// that coincides with an endpoint degenerates to a pure front or back part
/// rather than producing a zero-length fragment).
pub trait Simplex<const D: usize>: Clone {
    /// Returns the supporting hyperplane, oriented by the simplex itself.
    ///
    /// Degenerate simplices (zero-length segments, collinear polygons) must
    /// still return a deterministic plane rather than fail; such input is a
    /// caller error and may be reported by a debug assertion.
    fn supporting_plane(&self) -> Hyperplane<D>;

    /// Returns the simplex's own (not necessarily unit) normal.
    fn normal(&self) -> SVector<f32, D>;

    /// Classifies the simplex relative to a plane.
    fn classify(&self, plane: &Hyperplane<D>, tol: Tolerance) -> Classification;

    /// Cuts the simplex by a plane into front and back parts.
    fn split(&self, plane: &Hyperplane<D>, tol: Tolerance) -> (Option<Self>, Option<Self>);

    /// Intersects a ray with the simplex.
    ///
    /// Returns the non-negative ray parameter of the crossing, or `None` if
    /// the ray misses (or runs parallel to the simplex).
    fn intersect_ray(&self, ray: &Ray<D>, tol: Tolerance) -> Option<f32>;
}

/// Maps caller items to simplices and re-attaches payload after a split.
///
/// The tree stores caller items `T`; geometry runs on the extracted `S`. When
/// construction splits a straddling simplex, each part is turned back into an
/// item via [`make_split`](SimplexExtractor::make_split) so caller payload
/// (ids, materials, whatever `T` carries) survives the cut. The tree does not
/// retain the extractor after construction.
pub trait SimplexExtractor<T, S> {
    /// Extracts the simplex representation of an item.
    fn extract(&self, item: &T) -> S;

    /// Builds the item for a split-generated part of `original`.
    fn make_split(&self, part: S, original: &T) -> T;
}

/// Extractor for the common case where items *are* simplices.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityExtractor;

impl<S: Clone> SimplexExtractor<S, S> for IdentityExtractor {
    fn extract(&self, item: &S) -> S {
        item.clone()
    }

    fn make_split(&self, part: S, _original: &S) -> S {
        part
    }
}
