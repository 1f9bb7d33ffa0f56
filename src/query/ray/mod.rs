//! Ray-casting related definitions and implementations.

#[doc(inline)]
pub use self::ray::{InvRay, Ray};
pub use self::ray_triangle::{ray_intersection_with_triangle, TriangleCulling, TriangleRayHit};

#[doc(hidden)]
pub mod ray;
mod ray_aabb;
mod ray_triangle;
