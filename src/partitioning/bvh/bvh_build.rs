use super::{Bvh, BvhBuildParams, BvhNode, BvhStatistics, ConfigurationError};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real, DIM};
use crate::shape::TriangleSource;
use core::cmp::Ordering;

/// The largest number of triangles a single tree can index.
///
/// Triangle ids are `u32`, and so are the indices of the up to `2N` nodes of the arena.
pub const MAX_TRIANGLE_COUNT: usize = (u32::MAX / 2) as usize;

/// Per-triangle data only needed during construction.
struct BuildScratch {
    centroids: Vec<Point<Real>>,
    aabbs: Vec<Aabb>,
}

impl BuildScratch {
    fn new<S: TriangleSource + ?Sized>(geometry: &S, triangle_count: usize) -> Self {
        let mut centroids = Vec::with_capacity(triangle_count);
        let mut aabbs = Vec::with_capacity(triangle_count);

        for id in 0..triangle_count as u32 {
            let tri = geometry.triangle(id);
            centroids.push(tri.center());
            aabbs.push(tri.local_aabb());
        }

        Self { centroids, aabbs }
    }

    fn bound(&self, ids: &[u32]) -> Aabb {
        let mut result = Aabb::new_invalid();
        for id in ids {
            result.merge(&self.aabbs[*id as usize]);
        }
        result
    }
}

impl Bvh {
    /// Builds a new tree over all the triangles of `geometry`.
    ///
    /// The tree only stores triangle ids: queries must be given the same `geometry`.
    ///
    /// Fails if `geometry` is empty, if a flat vertex array isn't made of whole triangles, or if
    /// `params` has a zero leaf size hint or a negative (or NaN) margin.
    ///
    /// Construction is deterministic, identical inputs give identical trees.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "f32")] {
    /// use meshbvh3d::math::Point;
    /// use meshbvh3d::partitioning::{Bvh, BvhBuildParams};
    /// use meshbvh3d::shape::Triangle;
    ///
    /// let triangles: Vec<_> = (0..100)
    ///     .map(|i| {
    ///         let x = i as f32;
    ///         Triangle::new(
    ///             Point::new(x, 0.0, 0.0),
    ///             Point::new(x + 1.0, 0.0, 0.0),
    ///             Point::new(x, 1.0, 0.0),
    ///         )
    ///     })
    ///     .collect();
    ///
    /// let bvh = Bvh::from_triangles(&triangles[..], &BvhBuildParams::new(4)).unwrap();
    /// assert!(bvh.statistics().max_leaf_size <= 4);
    /// assert_eq!(bvh.triangle_indices().len(), 100);
    /// # }
    /// ```
    pub fn from_triangles<S: TriangleSource + ?Sized>(
        geometry: &S,
        params: &BvhBuildParams,
    ) -> Result<Self, ConfigurationError> {
        let triangle_count = geometry.num_triangles();

        if triangle_count == 0 {
            return Err(ConfigurationError::EmptyGeometry);
        }

        if params.leaf_size_hint == 0 {
            return Err(ConfigurationError::InvalidLeafSize);
        }

        if params.margin.is_nan() || params.margin < 0.0 {
            return Err(ConfigurationError::InvalidMargin);
        }

        if triangle_count > MAX_TRIANGLE_COUNT {
            return Err(ConfigurationError::TooManyTriangles(triangle_count));
        }

        if geometry.num_vertices() != triangle_count * 3 {
            return Err(ConfigurationError::VertexCountMismatch {
                triangle_count,
                vertex_count: geometry.num_vertices(),
            });
        }

        let scratch = BuildScratch::new(geometry, triangle_count);
        let mut triangle_indices: Vec<u32> = (0..triangle_count as u32).collect();
        let root_aabb = scratch.bound(&triangle_indices).loosened(params.margin);
        let depth_limit = params.depth_limit(triangle_count);

        let mut nodes = Vec::with_capacity(triangle_count * 2);
        nodes.push(BvhNode::Leaf {
            aabb: root_aabb,
            first: 0,
            count: triangle_count as u32,
        });

        let mut statistics = BvhStatistics {
            triangle_count: triangle_count as u32,
            ..BvhStatistics::default()
        };

        // Nodes waiting to be refined, with their depth. The left child is always popped first.
        let mut worklist = vec![(0u32, 1u32)];

        while let Some((node_id, depth)) = worklist.pop() {
            statistics.max_depth = statistics.max_depth.max(depth);

            let BvhNode::Leaf { aabb, first, count } = nodes[node_id as usize] else {
                continue;
            };

            if count as usize <= params.leaf_size_hint {
                statistics.record_leaf(count, false);
                continue;
            }

            if depth >= depth_limit {
                log::debug!(
                    "[{}] Maximum depth reached, forced to create a leaf of {} triangles.",
                    depth,
                    count
                );
                statistics.record_leaf(count, true);
                statistics.depth_limited_leaf_count += 1;
                continue;
            }

            let range = first as usize..first as usize + count as usize;

            match split_triangles(
                &mut triangle_indices[range],
                &scratch,
                &aabb,
                params.margin,
            ) {
                Some(split) => {
                    log::trace!(
                        "[{}] Split node {} along axis {}: {} left, {} right.",
                        depth,
                        node_id,
                        split.axis,
                        split.left_count,
                        count - split.left_count
                    );

                    let left = nodes.len() as u32;
                    nodes.push(BvhNode::Leaf {
                        aabb: split.left_aabb,
                        first,
                        count: split.left_count,
                    });
                    nodes.push(BvhNode::Leaf {
                        aabb: split.right_aabb,
                        first: first + split.left_count,
                        count: count - split.left_count,
                    });
                    nodes[node_id as usize] = BvhNode::Inner {
                        aabb,
                        left,
                        right: left + 1,
                    };

                    statistics.record_split(split.axis);
                    worklist.push((left + 1, depth + 1));
                    worklist.push((left, depth + 1));
                }
                None => {
                    log::debug!(
                        "[{}] Split dimensions exhausted, creating a leaf of {} triangles.",
                        depth,
                        count
                    );
                    statistics.record_leaf(count, true);
                }
            }
        }

        nodes.shrink_to_fit();

        Ok(Bvh {
            nodes,
            triangle_indices,
            statistics,
        })
    }

    /// Rebuilds this tree over all the triangles of `geometry`.
    ///
    /// On failure the error is logged and `self` is left unchanged, so a previously built tree
    /// stays queryable.
    pub fn build<S: TriangleSource + ?Sized>(
        &mut self,
        geometry: &S,
        params: &BvhBuildParams,
    ) -> Result<(), ConfigurationError> {
        match Self::from_triangles(geometry, params) {
            Ok(bvh) => {
                log::debug!("{}", bvh.statistics);
                *self = bvh;
                Ok(())
            }
            Err(err) => {
                log::error!("BVH build rejected: {}", err);
                Err(err)
            }
        }
    }
}

struct Split {
    axis: usize,
    left_count: u32,
    left_aabb: Aabb,
    right_aabb: Aabb,
}

/// Splits `ids` in two along the longest possible axis of `node_aabb`.
///
/// Axes are tried by decreasing extent of `node_aabb`. The split plane is the middle of the box
/// on that axis, and triangles with a centroid strictly below it go left. An axis putting every
/// triangle on the same side is skipped. Returns `None` if all axes are skipped.
fn split_triangles(
    ids: &mut [u32],
    scratch: &BuildScratch,
    node_aabb: &Aabb,
    margin: Real,
) -> Option<Split> {
    let extents = node_aabb.extents();
    let center = node_aabb.center();

    // Stable: ties keep the lowest axis first.
    let mut axes: [usize; DIM] = [0, 1, 2];
    axes.sort_by(|a, b| {
        extents[*b]
            .partial_cmp(&extents[*a])
            .unwrap_or(Ordering::Equal)
    });

    for axis in axes {
        let split_value = center[axis];
        let left_count = partition(ids, |id| scratch.centroids[id as usize][axis] < split_value);

        if left_count == 0 || left_count == ids.len() {
            log::trace!(
                "Skipping axis {}, all {} triangles on the {} side.",
                axis,
                ids.len(),
                if left_count == 0 { "right" } else { "left" }
            );
            continue;
        }

        let (left, right) = ids.split_at(left_count);

        return Some(Split {
            axis,
            left_count: left_count as u32,
            left_aabb: scratch.bound(left).loosened(margin),
            right_aabb: scratch.bound(right).loosened(margin),
        });
    }

    None
}

/// Reorders `ids` in place so the elements satisfying `goes_left` come first.
///
/// Returns the number of such elements.
fn partition(ids: &mut [u32], mut goes_left: impl FnMut(u32) -> bool) -> usize {
    let mut l = 0;
    let mut r = ids.len();

    while l < r {
        if goes_left(ids[l]) {
            l += 1;
        } else {
            r -= 1;
            ids.swap(l, r);
        }
    }

    l
}
