//! BSP tree nodes, arena-addressed.

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node's id. Every tree has one, even the empty tree.
    pub const ROOT: Self = Self(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which half-space of the boundary counts as the solid's interior.
///
/// With outward-facing simplex normals (counter-clockwise outlines in 2D,
/// counter-clockwise-wound faces in 3D) the solid lies behind every boundary
/// primitive, which is the [`Back`](SolidSide::Back) convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolidSide {
    /// The front half-space (along the normals) is solid.
    Front,
    /// The back half-space (against the normals) is solid.
    #[default]
    Back,
}

/// Half-space orientation of the subtree being built, relative to its parent's
/// splitting plane. Decides leaf solidity together with [`SolidSide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    Root,
    Front,
    Back,
}

impl Orientation {
    /// A leaf is solid iff its orientation matches the solid-side convention;
    /// the root orientation (empty input) matches neither.
    pub(crate) fn is_solid(self, solid_side: SolidSide) -> bool {
        matches!(
            (self, solid_side),
            (Self::Front, SolidSide::Front) | (Self::Back, SolidSide::Back)
        )
    }
}

/// Result of classifying a point against the solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClass {
    /// The point lies strictly inside the solid.
    InSolid,
    /// The point lies strictly outside the solid.
    InEmptySpace,
    /// The point lies on the boundary: it sits on a partitioning plane whose
    /// two sides disagree about containment.
    OnBoundary,
}

/// A node in the BSP tree.
///
/// Children are arena ids rather than owned pointers, so the structure is
/// flat, relocatable, and free of deep drop chains. A node is a leaf iff it
/// has no children, which the enum encodes structurally.
#[derive(Debug, Clone)]
pub enum Node {
    /// Partitions its subtree's simplices across a hyperplane.
    Interior {
        /// Store index of the simplex whose supporting plane splits here.
        plane: u32,
        /// Store indices of the simplices classified coplanar (same-facing)
        /// with the splitting plane at this partitioning step.
        coplanar: Vec<u32>,
        /// Subtree in front of the splitting plane.
        front: NodeId,
        /// Subtree behind the splitting plane.
        back: NodeId,
    },
    /// A homogeneous region of space.
    Leaf {
        /// `true` for a region inside the solid, `false` for empty space.
        solid: bool,
        /// Store indices of the surviving simplices that landed in this
        /// leaf's bucket (mutually non-splittable remainders).
        simplices: Vec<u32>,
    },
}

impl Node {
    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Returns `true` for a leaf tagged as inside the solid.
    #[inline]
    pub fn is_solid_leaf(&self) -> bool {
        matches!(self, Self::Leaf { solid: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_solidity_follows_convention() {
        assert!(Orientation::Back.is_solid(SolidSide::Back));
        assert!(!Orientation::Front.is_solid(SolidSide::Back));
        assert!(Orientation::Front.is_solid(SolidSide::Front));
        assert!(!Orientation::Back.is_solid(SolidSide::Front));

        // Empty input builds a root-orientation leaf: never solid.
        assert!(!Orientation::Root.is_solid(SolidSide::Back));
        assert!(!Orientation::Root.is_solid(SolidSide::Front));
    }

    #[test]
    fn leaf_predicates() {
        let leaf = Node::Leaf {
            solid: true,
            simplices: vec![],
        };
        assert!(leaf.is_leaf());
        assert!(leaf.is_solid_leaf());

        let interior = Node::Interior {
            plane: 0,
            coplanar: vec![],
            front: NodeId(1),
            back: NodeId(2),
        };
        assert!(!interior.is_leaf());
        assert!(!interior.is_solid_leaf());
    }
}
