//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners. Its edges are always parallel to the
/// coordinate axes which makes it very cheap to merge and to test against rays.
///
/// # Structure
///
/// - **mins**: The point with the smallest coordinates on each axis.
/// - **maxs**: The point with the largest coordinates on each axis.
/// - **Invariant**: once it contains at least one point, `mins[i] ≤ maxs[i]` on every axis.
///
/// # Empty box
///
/// [`Aabb::new_invalid`] returns the empty box, with `mins = +∞` and `maxs = -∞` on every axis.
/// Growing it with [`Aabb::take_point`] or [`BoundingVolume::merge`] yields exactly the added
/// geometry, so accumulation loops don't need a special first iteration.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use meshbvh3d::bounding_volume::{Aabb, BoundingVolume};
/// use meshbvh3d::math::Point;
///
/// let mut aabb = Aabb::new_invalid();
/// aabb.take_point(Point::new(1.0, 2.0, 3.0));
/// aabb.take_point(Point::new(-1.0, 0.0, 5.0));
///
/// assert_eq!(aabb.mins, Point::new(-1.0, 0.0, 3.0));
/// assert_eq!(aabb.maxs, Point::new(1.0, 2.0, 5.0));
///
/// let grown = aabb.loosened(0.5);
/// assert!(grown.contains(&aabb));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new_invalid()
    }
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates the empty AABB, with inverted infinite bounds.
    ///
    /// The result contains nothing: it is the identity element of [`BoundingVolume::merge`]
    /// and [`Aabb::take_point`].
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::INFINITY).into(),
            Vector::repeat(Real::NEG_INFINITY).into(),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new AABB that tightly encloses a set of points.
    ///
    /// Returns the empty AABB if the iterator yields nothing.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// Returns `true` if this AABB contains at least one point, i.e., if `mins <= maxs` on
    /// every axis.
    ///
    /// NaN bounds make the AABB invalid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= self.maxs[i])
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half-extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB, i.e., its size along each axis.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// The total area of the six faces of this AABB.
    #[inline]
    pub fn surface_area(&self) -> Real {
        let e = self.extents();
        (e.x * e.y + e.x * e.z + e.y * e.z) * 2.0
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Does this AABB contain the given point (boundary included)?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// The eight corners of this AABB.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        let (a, b) = (self.mins, self.maxs);
        [
            Point::new(a.x, a.y, a.z),
            Point::new(b.x, a.y, a.z),
            Point::new(b.x, b.y, a.z),
            Point::new(a.x, b.y, a.z),
            Point::new(a.x, a.y, b.z),
            Point::new(b.x, a.y, b.z),
            Point::new(b.x, b.y, b.z),
            Point::new(a.x, b.y, b.z),
        ]
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    #[inline]
    fn loosen(&mut self, amount: Real) {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        self.mins += Vector::repeat(-amount);
        self.maxs += Vector::repeat(amount);
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }
}
