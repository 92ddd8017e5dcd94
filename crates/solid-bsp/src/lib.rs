//! Solid-classification BSP (Binary Space Partitioning) tree.
//!
//! Builds a spatial index over boundary primitives — directed [`Segment`]s in
//! 2D or convex [`Polygon`]s in 3D — that together enclose a solid region,
//! and answers point-in-solid and first-hit ray queries against it. See the
//! [`bsp`] module for the tree itself; the root of the crate holds the
//! geometric primitives it partitions.

pub mod bsp;
mod hyperplane;
mod polygon;
mod ray;
mod segment;
mod simplex;
mod tolerance;

pub use bsp::{
    BalancedSplits, Candidates, FirstUnused, Node, NodeId, PlaneSelector, PointClass,
    SimplexStore, SolidBsp, SolidSide,
};
pub use hyperplane::{Classification, Hyperplane, PlaneSide};
pub use polygon::Polygon;
pub use ray::{Ray, RayHit};
pub use segment::Segment;
pub use simplex::{IdentityExtractor, Simplex, SimplexExtractor};
pub use tolerance::{Tolerance, DEFAULT_EPSILON};
