pub use bvh_build::MAX_TRIANGLE_COUNT;
pub use bvh_error::ConfigurationError;
pub use bvh_queries::{cast_ray_brute_force, BvhHit, TraversalCounters};
pub use bvh_statistics::BvhStatistics;
pub use bvh_traverse::Leaves;
pub use bvh_tree::{Bvh, BvhBuildParams, BvhNode};

mod bvh_build;
mod bvh_error;
mod bvh_queries;
mod bvh_statistics;
mod bvh_traverse;
mod bvh_tree;
mod bvh_validation;
