use core::fmt;

/// Error indicating that a ray query was issued against a BVH that holds no tree.
///
/// A BVH starts unbuilt, and goes back to that state after being destroyed. Querying it in that
/// state is a programming error: the panicking query methods abort with this message, the
/// `try_*` variants return it.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use meshbvh3d::math::{Point, Vector};
/// use meshbvh3d::partitioning::MeshBvh;
/// use meshbvh3d::query::{NotBuilt, Ray};
///
/// let bvh: MeshBvh = MeshBvh::new();
/// let ray = Ray::new(Point::origin(), Vector::x());
///
/// assert_eq!(bvh.try_intersect(&ray, 0.0, 10.0), Err(NotBuilt));
/// # }
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NotBuilt;

impl fmt::Display for NotBuilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("the BVH was queried before being built")
    }
}

impl core::error::Error for NotBuilt {}
