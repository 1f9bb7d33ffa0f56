/*!
meshbvh
========

**meshbvh** is a bounding-volume-hierarchy for ray queries (picking, raycasting, line-of-sight)
against static triangle meshes, written with the rust programming language.

The tree is stored as a flat arena of nodes referencing each other by index, together with a
permuted array of triangle ids. It is built once per mesh with a cheap median-of-bounds split
and can then be queried concurrently from any number of threads.

```rust
# #[cfg(feature = "f32")] {
use meshbvh3d::math::{Point, Vector};
use meshbvh3d::partitioning::MeshBvh;
use meshbvh3d::query::Ray;

// Two triangles forming a quad in the XY plane.
let vertices = [
    Point::new(-1.0, -1.0, 0.0), Point::new(1.0, -1.0, 0.0), Point::new(1.0, 1.0, 0.0),
    Point::new(-1.0, -1.0, 0.0), Point::new(1.0, 1.0, 0.0), Point::new(-1.0, 1.0, 0.0),
];

let mut bvh = MeshBvh::new();
bvh.build(&vertices[..], 2, 16).unwrap();

let ray = Ray::new(Point::new(0.0, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0));
let hit = bvh.intersect(&ray, 0.0, f32::MAX).unwrap();
assert_eq!(hit.t, 5.0);
# }
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod query;
pub mod shape;
#[cfg(feature = "wavefront")]
pub mod transformation;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The safety margin added around every BVH node's bounding box.
    ///
    /// Keeps rays grazing a triangle exactly on a box face from being culled by rounding.
    pub const DEFAULT_BVH_MARGIN: Real = 1.0e-6;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;
}
