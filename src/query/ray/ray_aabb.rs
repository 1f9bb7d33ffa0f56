use crate::bounding_volume::Aabb;
use crate::math::{Real, DIM};
use crate::query::InvRay;

impl Aabb {
    /// Clips the parameter interval `[t0, t1]` of a ray by this AABB.
    ///
    /// Returns the `[tmin, tmax]` portion of `[t0, t1]` where the ray is inside this box, or
    /// `None` if they don't overlap. Both ends are inclusive: a ray touching a face or an edge
    /// yields an interval reduced to a single point.
    ///
    /// Slab values are combined with plain comparisons, so the NaN produced by `0 * inf` (a ray
    /// parallel to an axis starting exactly on one of the box planes) leaves the running interval
    /// untouched.
    #[inline]
    pub fn clip_ray(&self, ray: &InvRay, t0: Real, t1: Real) -> Option<(Real, Real)> {
        let bounds = [self.mins, self.maxs];
        let mut tmin = t0;
        let mut tmax = t1;

        for i in 0..DIM {
            let near = (bounds[ray.sign[i]][i] - ray.origin[i]) * ray.inv_dir[i];
            let far = (bounds[1 - ray.sign[i]][i] - ray.origin[i]) * ray.inv_dir[i];

            if near > tmin {
                tmin = near;
            }

            if far < tmax {
                tmax = far;
            }

            if tmin > tmax {
                return None;
            }
        }

        Some((tmin, tmax))
    }

    /// Tests if the ray intersects this AABB somewhere in `[t0, t1]`.
    #[inline]
    pub fn intersects_ray(&self, ray: &InvRay, t0: Real, t1: Real) -> bool {
        self.clip_ray(ray, t0, t1).is_some()
    }
}
