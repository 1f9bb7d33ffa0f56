use crate::math::{Point, Real};

/// Trait of the coarse volumes stored in the nodes of a BVH.
///
/// Implementors need constant-time overlap and inclusion tests and must be closed under merging,
/// so that the volume of a node can be computed from the volumes of what lies below it.
pub trait BoundingVolume: Clone {
    /// A point inside of this volume, ideally its center.
    fn center(&self) -> Point<Real>;

    /// Does this volume overlap `other`? Touching volumes overlap.
    fn intersects(&self, other: &Self) -> bool;

    /// Is `other` entirely inside of this volume?
    fn contains(&self, other: &Self) -> bool;

    /// Grows this volume in-place so it also contains `other`.
    fn merge(&mut self, other: &Self);

    /// The smallest volume containing both `self` and `other`.
    fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Grows this volume in-place by `margin` in every direction.
    fn loosen(&mut self, margin: Real);

    /// This volume grown by `margin` in every direction.
    fn loosened(&self, margin: Real) -> Self {
        let mut result = self.clone();
        result.loosen(margin);
        result
    }
}
