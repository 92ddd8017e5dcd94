//! Plane selection strategies for BSP tree construction.
//!
//! The choice of splitting plane affects tree balance and the number of
//! simplex splits during construction. Different strategies offer different
//! trade-offs between build time and tree quality.

use crate::{Classification, Hyperplane, Simplex, Tolerance};

/// Read-only view of one partitioning step's remaining simplices.
///
/// `subset` holds store indices of the simplices still to be partitioned;
/// `used` is the store-parallel marker of simplices whose plane has already
/// served as a splitter on this path, so it must not be chosen again.
#[derive(Debug, Clone, Copy)]
pub struct Candidates<'a, S, const D: usize> {
    simplices: &'a [S],
    planes: &'a [Hyperplane<D>],
    subset: &'a [u32],
    used: &'a [bool],
}

impl<'a, S, const D: usize> Candidates<'a, S, D> {
    pub(crate) fn new(
        simplices: &'a [S],
        planes: &'a [Hyperplane<D>],
        subset: &'a [u32],
        used: &'a [bool],
    ) -> Self {
        Self {
            simplices,
            planes,
            subset,
            used,
        }
    }

    /// Returns the number of remaining simplices.
    #[inline]
    pub fn len(&self) -> usize {
        self.subset.len()
    }

    /// Returns `true` if the subset is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subset.is_empty()
    }

    /// Returns the store indices of the remaining simplices.
    #[inline]
    pub fn ids(&self) -> &'a [u32] {
        self.subset
    }

    /// Returns the simplex with the given store index.
    #[inline]
    pub fn simplex(&self, id: u32) -> &'a S {
        &self.simplices[id as usize]
    }

    /// Returns the supporting hyperplane of the simplex with the given index.
    #[inline]
    pub fn plane(&self, id: u32) -> &'a Hyperplane<D> {
        &self.planes[id as usize]
    }

    /// Returns `true` if the simplex's plane already served as a splitter.
    #[inline]
    pub fn is_used(&self, id: u32) -> bool {
        self.used[id as usize]
    }

    /// Iterates `(position, store index)` over candidates not yet used.
    pub fn unused(&self) -> impl Iterator<Item = (usize, u32)> + 'a {
        let used = self.used;
        self.subset
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(_, id)| !used[id as usize])
    }
}

/// Strategy for choosing which remaining simplex's plane to split on.
///
/// Returns the *position within the subset* of the chosen simplex, or `None`
/// when no further split is beneficial — the builder then makes a leaf out of
/// everything that remains. Implementations must never return a used
/// candidate, and must return `None` when every candidate is used.
pub trait PlaneSelector<S, const D: usize> {
    /// Selects a splitting candidate from the remaining subset.
    fn select(&self, candidates: &Candidates<'_, S, D>, tol: Tolerance) -> Option<usize>;
}

/// Selects the first not-yet-used candidate.
///
/// The simplest and fastest selector; tree shape follows input order, so feed
/// it pre-shuffled input or accept unbalanced trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUnused;

impl<S, const D: usize> PlaneSelector<S, D> for FirstUnused {
    fn select(&self, candidates: &Candidates<'_, S, D>, _tol: Tolerance) -> Option<usize> {
        candidates.unused().next().map(|(position, _)| position)
    }
}

/// Scores a bounded sample of candidates and picks the cheapest split.
///
/// The score penalizes straddlers (each one costs a split) and front/back
/// imbalance: `score = 8 * straddling + |front - back|`. The candidate pool is
/// capped so selection stays near-linear on large inputs.
#[derive(Debug, Clone, Copy)]
pub struct BalancedSplits {
    /// Maximum number of candidate planes to score.
    pub sample_size: usize,
}

impl BalancedSplits {
    const K_STRADDLE: f32 = 8.0;
    const K_BALANCE: f32 = 1.0;
}

impl Default for BalancedSplits {
    fn default() -> Self {
        Self { sample_size: 20 }
    }
}

impl<S: Simplex<D>, const D: usize> PlaneSelector<S, D> for BalancedSplits {
    fn select(&self, candidates: &Candidates<'_, S, D>, tol: Tolerance) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;

        for (position, id) in candidates.unused().take(self.sample_size) {
            let plane = candidates.plane(id);

            let mut front = 0i32;
            let mut back = 0i32;
            let mut straddling = 0i32;
            for &other in candidates.ids() {
                match candidates.simplex(other).classify(plane, tol) {
                    Classification::Front => front += 1,
                    Classification::Back => back += 1,
                    Classification::Coplanar => {}
                    Classification::Straddling => straddling += 1,
                }
            }

            let score = Self::K_STRADDLE * straddling as f32
                + Self::K_BALANCE * (front - back).abs() as f32;
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((position, score));
            }
        }

        best.map(|(position, _)| position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Segment;
    use nalgebra::Point2;

    fn horizontal_segments(ys: &[f32]) -> (Vec<Segment>, Vec<Hyperplane<2>>) {
        let segments: Vec<Segment> = ys
            .iter()
            .map(|&y| Segment::new(Point2::new(0.0, y), Point2::new(1.0, y)))
            .collect();
        let planes = segments.iter().map(|s| s.supporting_plane()).collect();
        (segments, planes)
    }

    #[test]
    fn first_unused_skips_used_candidates() {
        let tol = Tolerance::default();
        let (segments, planes) = horizontal_segments(&[0.0, 1.0, 2.0]);
        let subset = [0u32, 1, 2];

        let used = [true, true, false];
        let candidates = Candidates::new(&segments, &planes, &subset, &used);
        assert_eq!(FirstUnused.select(&candidates, tol), Some(2));

        let all_used = [true, true, true];
        let candidates = Candidates::new(&segments, &planes, &subset, &all_used);
        assert_eq!(FirstUnused.select(&candidates, tol), None);
    }

    #[test]
    fn empty_subset_selects_nothing() {
        let tol = Tolerance::default();
        let (segments, planes) = horizontal_segments(&[0.0]);
        let candidates = Candidates::new(&segments, &planes, &[], &[false]);
        assert_eq!(FirstUnused.select(&candidates, tol), None);
        assert_eq!(BalancedSplits::default().select(&candidates, tol), None);
    }

    #[test]
    fn balanced_splits_prefers_the_median_plane() {
        let tol = Tolerance::default();
        let (segments, planes) = horizontal_segments(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let subset = [0u32, 1, 2, 3, 4];
        let used = [false; 5];
        let candidates = Candidates::new(&segments, &planes, &subset, &used);

        // The middle segment's plane sees two fronts and two backs; every
        // other candidate is lopsided.
        let chosen = BalancedSplits::default().select(&candidates, tol);
        assert_eq!(chosen, Some(2));
    }
}
