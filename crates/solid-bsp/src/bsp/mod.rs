//! Binary Space Partitioning tree over a solid's boundary.
//!
//! This module builds a BSP tree from the boundary simplices of a solid
//! region and answers two queries against it:
//!
//! - Point classification: inside the solid, in empty space, or on the
//!   boundary
//! - Ray casting: the first boundary hit along a ray, with its distance and
//!   the struck primitive
//!
//! # Example
//!
//! ```ignore
//! use solid_bsp::{FirstUnused, PointClass, Ray, Segment, SolidBsp, Tolerance};
//! use nalgebra::{Point2, Vector2};
//!
//! // Build a tree from a counter-clockwise boundary outline
//! let boundary: Vec<Segment> = /* create segments */;
//! let tol = Tolerance::default();
//! let tree = SolidBsp::from_simplices(boundary, &FirstUnused, tol);
//!
//! // Query it
//! let class = tree.classify(&Point2::new(0.5, 0.5), tol);
//! let hit = tree.cast_ray(&Ray::new(Point2::new(0.5, -1.0), Vector2::y()), tol);
//! ```
//!
//! # Architecture
//!
//! - [`SolidBsp`]: the tree — construction worklist, both queries, and the
//!   backing [`SimplexStore`]
//! - [`Node`]: arena-addressed nodes, interior planes or solid/empty leaves
//! - [`PlaneSelector`]: strategy trait for choosing splitting planes
//! - [`SolidSide`]: which half-space of the boundary is the solid's interior

mod node;
mod selector;
mod store;
mod tree;

// Re-export main types
pub use node::{Node, NodeId, PointClass, SolidSide};
pub use selector::{BalancedSplits, Candidates, FirstUnused, PlaneSelector};
pub use store::SimplexStore;
pub use tree::SolidBsp;
