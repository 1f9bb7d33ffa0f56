//! Non-persistent geometric queries.
//!
//! Everything needed to cast a ray against boxes and triangles:
//!
//! * [`Ray`] and its precomputed form [`InvRay`] used by the slab test.
//! * [`TriangleCulling`] to pick which triangle faces can be hit.
//! * [`NotBuilt`], the error returned when querying a tree that was never built.

pub use self::error::NotBuilt;
pub use self::ray::{InvRay, Ray, TriangleCulling, TriangleRayHit};

mod error;
mod ray;

/// Queries dedicated to specific shapes.
pub mod details {
    pub use super::ray::ray_intersection_with_triangle;
}
