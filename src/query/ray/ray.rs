//! Rays and their precomputed slab-test form.

use crate::math::{Point, Real, Vector, DIM};

/// A ray for ray-casting queries.
///
/// The points of the ray are `origin + dir * t`. The direction does not need to be normalized:
/// with a normalized direction `t` is a distance in world units, otherwise it is scaled by
/// `dir.norm()`.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use meshbvh3d::math::{Point, Vector};
/// use meshbvh3d::query::Ray;
///
/// let ray = Ray::new(Point::origin(), Vector::new(1.0, 0.0, 0.0));
///
/// assert_eq!(ray.point_at(5.0), Point::new(5.0, 0.0, 0.0));
/// assert_eq!(ray.point_at(0.0), ray.origin);
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray starting at `origin` and going toward `dir`.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// Translates this ray by the given vector. Its direction is unchanged.
    #[inline]
    pub fn translate_by(&self, v: Vector<Real>) -> Self {
        Self::new(self.origin + v, self.dir)
    }

    /// Computes the point at parameter `t` along this ray, i.e., `origin + dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// A ray with its inverse direction and direction signs precomputed.
///
/// This is the form consumed by the slab test of [`Aabb::clip_ray`](crate::bounding_volume::Aabb::clip_ray).
/// Computing it once per query instead of once per box saves three divisions per visited node.
///
/// Every component of `inv_dir` is `1 / dir[i]` with IEEE-754 semantics, so a zero direction
/// component gives an infinite inverse of the same sign. `sign[i]` is `1` if `inv_dir[i]` is
/// negative and `0` otherwise. It selects which of the box bounds is hit first along that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvRay {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Component-wise inverse of the ray direction.
    pub inv_dir: Vector<Real>,
    /// `1` for the axes where the ray goes toward negative coordinates, `0` otherwise.
    pub sign: [usize; DIM],
}

impl InvRay {
    /// Precomputes the inverse direction and direction signs of `ray`.
    #[inline]
    pub fn new(ray: &Ray) -> Self {
        let inv_dir = ray.dir.map(|x| 1.0 / x);
        let mut sign = [0; DIM];

        for i in 0..DIM {
            sign[i] = (inv_dir[i] < 0.0) as usize;
        }

        InvRay {
            origin: ray.origin,
            inv_dir,
            sign,
        }
    }
}

impl From<&Ray> for InvRay {
    #[inline]
    fn from(ray: &Ray) -> Self {
        InvRay::new(ray)
    }
}
