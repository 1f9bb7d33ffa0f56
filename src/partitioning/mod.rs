//! Spatial partitioning tools.

pub use self::bvh::{
    cast_ray_brute_force, Bvh, BvhBuildParams, BvhHit, BvhNode, BvhStatistics,
    ConfigurationError, TraversalCounters, MAX_TRIANGLE_COUNT,
};
pub use self::mesh_bvh::MeshBvh;

/// A bounding-volume hierarchy over triangles, and its traversal.
pub mod bvh;
mod mesh_bvh;
