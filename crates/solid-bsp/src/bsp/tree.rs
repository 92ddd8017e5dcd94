//! BSP tree container, construction, and the two solid queries.

use nalgebra::Point;

use crate::{
    Classification, IdentityExtractor, Ray, RayHit, Simplex, SimplexExtractor, Tolerance,
};

use super::node::{Node, NodeId, Orientation, PointClass, SolidSide};
use super::selector::{Candidates, PlaneSelector};
use super::store::SimplexStore;

/// A solid-classification BSP tree over a set of boundary simplices.
///
/// The tree partitions space with the simplices' own supporting hyperplanes
/// until every region is homogeneous, then tags each leaf as inside the solid
/// or in empty space according to the configured [`SolidSide`] convention.
/// Two queries run against the built index: [`classify`](Self::classify)
/// answers point-in-solid, [`cast_ray`](Self::cast_ray) reports the first
/// boundary hit along a ray.
///
/// `T` is the caller payload carried per primitive, `S` the simplex geometry,
/// `D` the dimension (2 for [`Segment`](crate::Segment) boundaries, 3 for
/// [`Polygon`](crate::Polygon) boundaries).
///
/// # Construction
///
/// ```ignore
/// use solid_bsp::{BalancedSplits, Segment, SolidBsp, Tolerance};
///
/// let boundary: Vec<Segment> = /* counter-clockwise outline */;
/// let tree = SolidBsp::from_simplices(boundary, &BalancedSplits::default(), Tolerance::default());
/// assert_eq!(tree.classify(&point, Tolerance::default()), PointClass::InSolid);
/// ```
///
/// Build and query with the same [`Tolerance`]; mixing policies silently
/// produces inconsistent classifications near the boundary.
///
/// The tree is immutable after construction and contains no interior
/// mutability, so concurrent queries from multiple threads are safe.
#[derive(Debug, Clone)]
pub struct SolidBsp<T, S, const D: usize> {
    store: SimplexStore<T, S, D>,
    nodes: Vec<Node>,
    solid_side: SolidSide,
}

/// One pending partitioning step of the worklist builder.
struct BuildTask {
    subset: Vec<u32>,
    orientation: Orientation,
    slot: NodeId,
}

impl<S: Simplex<D>, const D: usize> SolidBsp<S, S, D> {
    /// Builds a tree directly from simplices, with the default solid side
    /// (behind outward-facing normals) and the identity extractor.
    pub fn from_simplices<P>(simplices: Vec<S>, selector: &P, tolerance: Tolerance) -> Self
    where
        P: PlaneSelector<S, D>,
    {
        Self::build(
            simplices,
            selector,
            SolidSide::default(),
            tolerance,
            &IdentityExtractor,
        )
    }
}

impl<T, S: Simplex<D>, const D: usize> SolidBsp<T, S, D> {
    /// Builds a tree from caller items.
    ///
    /// `extractor` maps each item to its simplex and re-attaches payload to
    /// split-generated parts; it is not retained after construction.
    /// `selector` picks the splitting plane at every partitioning step.
    /// `tolerance` governs every numerical decision made during the build and
    /// should be the policy later passed to queries.
    ///
    /// Empty input yields a single-leaf tree that classifies all of space as
    /// empty and reports no ray intersections.
    pub fn build<I, P, E>(
        items: I,
        selector: &P,
        solid_side: SolidSide,
        tolerance: Tolerance,
        extractor: &E,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        P: PlaneSelector<S, D>,
        E: SimplexExtractor<T, S>,
    {
        let mut store = SimplexStore::new();
        let roots: Vec<u32> = items
            .into_iter()
            .map(|item| store.ingest(item, extractor))
            .collect();

        Builder {
            store,
            nodes: Vec::new(),
            used: vec![false; roots.len()],
            solid_side,
            tolerance,
            selector,
            extractor,
        }
        .run(roots)
    }

    /// Returns the root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node with the given id.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the configured solid-side convention.
    #[inline]
    pub fn solid_side(&self) -> SolidSide {
        self.solid_side
    }

    /// Returns the number of stored simplices (originals plus split parts).
    #[inline]
    pub fn simplex_count(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the tree was built from no simplices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the caller item ingested or split-attached at `id`.
    #[inline]
    pub fn item(&self, id: u32) -> &T {
        self.store.item(id)
    }

    /// Returns the simplex at `id`.
    #[inline]
    pub fn simplex(&self, id: u32) -> &S {
        self.store.simplex(id)
    }

    /// Returns the supporting hyperplane of the simplex at `id`.
    #[inline]
    pub fn plane(&self, id: u32) -> &crate::Hyperplane<D> {
        self.store.plane(id)
    }

    /// Returns the maximum depth of the tree (1 for a single leaf).
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root(), 1usize)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Node::Interior { front, back, .. } = self.node(id) {
                stack.push((*front, depth + 1));
                stack.push((*back, depth + 1));
            }
        }
        max_depth
    }

    /// Classifies a point as inside the solid, outside it, or on its boundary.
    ///
    /// Descends by the sign of the point's distance to each splitting plane.
    /// A point within tolerance of a plane is classified against both
    /// children: agreement wins, disagreement is [`PointClass::OnBoundary`].
    pub fn classify(&self, point: &Point<f32, D>, tolerance: Tolerance) -> PointClass {
        self.classify_node(self.root(), point, tolerance)
    }

    fn classify_node(&self, id: NodeId, point: &Point<f32, D>, tol: Tolerance) -> PointClass {
        match self.node(id) {
            Node::Leaf { solid, .. } => {
                if *solid {
                    PointClass::InSolid
                } else {
                    PointClass::InEmptySpace
                }
            }
            Node::Interior {
                plane, front, back, ..
            } => {
                let dist = self.store.plane(*plane).signed_distance(point);
                if tol.gt(dist, 0.0) {
                    self.classify_node(*front, point, tol)
                } else if tol.lt(dist, 0.0) {
                    self.classify_node(*back, point, tol)
                } else {
                    let front_class = self.classify_node(*front, point, tol);
                    let back_class = self.classify_node(*back, point, tol);
                    if front_class == back_class {
                        front_class
                    } else {
                        PointClass::OnBoundary
                    }
                }
            }
        }
    }

    /// Casts a ray and returns the first boundary hit, or `None` for a miss.
    ///
    /// Visits the two half-spaces the ray crosses at each node in
    /// near-to-far order, backtracking through an explicit stack when a near
    /// half-space turns out to be empty. At a solid leaf the coplanar
    /// simplices of every plane crossed on the way are the hit candidates;
    /// the nearest actually-struck one wins.
    pub fn cast_ray(&self, ray: &Ray<D>, tolerance: Tolerance) -> Option<RayHit<D>> {
        /// Deferred far half-space: the node, the interval end that applies
        /// inside it, and the candidate set accumulated up to its plane.
        struct FarSide {
            node: NodeId,
            t_far: f32,
            candidates: Vec<u32>,
        }

        let tol = tolerance;
        let mut stack: Vec<FarSide> = Vec::new();
        let mut node = self.root();
        let mut t_far = f32::INFINITY;
        let mut candidates: Vec<u32> = Vec::new();
        // Near bound of the current interval; only comparisons use it, the
        // frames restore it implicitly as the previous interval's far bound.
        let mut t_near = 0.0f32;

        loop {
            match self.node(node) {
                Node::Interior {
                    plane,
                    coplanar,
                    front,
                    back,
                } => {
                    let plane = self.store.plane(*plane);
                    let dist = plane.signed_distance(&ray.origin());
                    let (near, far) = if dist >= 0.0 {
                        (*front, *back)
                    } else {
                        (*back, *front)
                    };

                    let denom = plane.normal().dot(&ray.direction());
                    if tol.eq_zero(denom) {
                        // Parallel ray: the whole interval stays on the
                        // origin's side of this plane.
                        node = near;
                        continue;
                    }

                    let t = -dist / denom;
                    if !tol.lt(t, 0.0) && !tol.gt(t, t_far) {
                        if !tol.lt(t, t_near) {
                            // The ray crosses the plane inside the current
                            // interval: do the near side up to t first, keep
                            // the far side for backtracking.
                            candidates.extend_from_slice(coplanar);
                            stack.push(FarSide {
                                node: far,
                                t_far,
                                candidates: candidates.clone(),
                            });
                            t_far = t;
                            node = near;
                        } else {
                            // Crossing before the interval: only the far side
                            // overlaps it.
                            node = far;
                        }
                    } else {
                        // Crossing behind the origin or beyond the interval:
                        // only the near side overlaps it.
                        node = near;
                    }
                }
                Node::Leaf { solid, .. } => {
                    if *solid {
                        let mut best: Option<RayHit<D>> = None;
                        for &id in &candidates {
                            if let Some(t) = self.store.simplex(id).intersect_ray(ray, tol) {
                                if best.is_none_or(|hit| t < hit.t) {
                                    best = Some(RayHit {
                                        t,
                                        point: ray.at(t),
                                        simplex: id,
                                    });
                                }
                            }
                        }
                        if best.is_some() {
                            return best;
                        }
                        // Solid leaf but no candidate actually struck: a
                        // tolerance artifact near edges. Backtrack instead of
                        // fabricating a hit.
                    }

                    let frame = stack.pop()?;
                    t_near = t_far;
                    node = frame.node;
                    t_far = frame.t_far;
                    candidates = frame.candidates;
                }
            }
        }
    }
}

struct Builder<'a, T, S, const D: usize, P, E> {
    store: SimplexStore<T, S, D>,
    nodes: Vec<Node>,
    /// Store-parallel marker of simplices whose plane already split a node on
    /// the path to the current subset. Subsets of sibling branches are
    /// disjoint, so one flat vector serves every branch.
    used: Vec<bool>,
    solid_side: SolidSide,
    tolerance: Tolerance,
    selector: &'a P,
    extractor: &'a E,
}

impl<T, S: Simplex<D>, const D: usize, P, E> Builder<'_, T, S, D, P, E>
where
    P: PlaneSelector<S, D>,
    E: SimplexExtractor<T, S>,
{
    /// Runs the worklist until every pending subset has become a node.
    ///
    /// An explicit worklist rather than recursion: pathological input (for
    /// instance all-but-one simplices mutually coplanar) degenerates the tree
    /// to O(n) depth, which must not take the call stack down with it.
    fn run(mut self, roots: Vec<u32>) -> SolidBsp<T, S, D> {
        self.nodes.push(Node::Leaf {
            solid: false,
            simplices: Vec::new(),
        });
        let mut worklist = vec![BuildTask {
            subset: roots,
            orientation: Orientation::Root,
            slot: NodeId::ROOT,
        }];

        while let Some(task) = worklist.pop() {
            self.partition(task, &mut worklist);
        }

        SolidBsp {
            store: self.store,
            nodes: self.nodes,
            solid_side: self.solid_side,
        }
    }

    /// Turns one subset into a node, enqueueing child subsets.
    fn partition(&mut self, task: BuildTask, worklist: &mut Vec<BuildTask>) {
        let BuildTask {
            subset,
            orientation,
            slot,
        } = task;
        let tol = self.tolerance;
        let solid = orientation.is_solid(self.solid_side);

        let Some(chosen) = self.select(&subset) else {
            // Nothing left to split on: every remaining simplex is either
            // already used or judged not worth a split. They become this
            // leaf's bucket verbatim.
            self.nodes[slot.index()] = Node::Leaf {
                solid,
                simplices: subset,
            };
            return;
        };

        let splitter = subset[chosen];
        self.used[splitter as usize] = true;
        let split_plane = self.store.plane(splitter).clone();
        let split_normal = split_plane.normal();

        let mut coplanar = Vec::new();
        let mut front_list = Vec::new();
        let mut back_list = Vec::new();

        for id in subset {
            let classification = self.store.simplex(id).classify(&split_plane, tol);
            match classification {
                Classification::Front => front_list.push(id),
                Classification::Back => back_list.push(id),
                Classification::Coplanar => {
                    // Facing decides the side: an opposite-facing coincident
                    // simplex (abutting solids) belongs to the back
                    // half-space, not to this node.
                    let facing = self.store.simplex(id).normal().dot(&split_normal);
                    if tol.lt(facing, 0.0) {
                        self.used[id as usize] = true;
                        back_list.push(id);
                    } else {
                        coplanar.push(id);
                    }
                }
                Classification::Straddling => {
                    let (front_part, back_part) =
                        self.store.simplex(id).split(&split_plane, tol);
                    if let Some(part) = front_part {
                        front_list.push(self.append_part(part, id));
                    }
                    if let Some(part) = back_part {
                        back_list.push(self.append_part(part, id));
                    }
                }
            }
        }

        let front = self.reserve_slot();
        let back = self.reserve_slot();
        self.nodes[slot.index()] = Node::Interior {
            plane: splitter,
            coplanar,
            front,
            back,
        };

        worklist.push(BuildTask {
            subset: front_list,
            orientation: Orientation::Front,
            slot: front,
        });
        worklist.push(BuildTask {
            subset: back_list,
            orientation: Orientation::Back,
            slot: back,
        });
    }

    fn select(&self, subset: &[u32]) -> Option<usize> {
        let candidates = Candidates::new(
            self.store.simplices(),
            self.store.planes(),
            subset,
            &self.used,
        );
        let chosen = self.selector.select(&candidates, self.tolerance);
        debug_assert!(
            chosen.is_none_or(|position| !candidates.is_used(subset[position])),
            "selector returned a used candidate"
        );
        chosen
    }

    /// Appends a split part to the store, inheriting the parent's plane and
    /// used marker (the part still lies on the parent's supporting plane).
    fn append_part(&mut self, part: S, parent: u32) -> u32 {
        let id = self.store.push_split(part, parent, self.extractor);
        self.used.push(self.used[parent as usize]);
        id
    }

    fn reserve_slot(&mut self) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("node arena overflow"));
        self.nodes.push(Node::Leaf {
            solid: false,
            simplices: Vec::new(),
        });
        id
    }
}
