use super::{Bvh, BvhNode};
use crate::math::{Point, Real, Vector};
use crate::query::{InvRay, NotBuilt, Ray, TriangleCulling, TriangleRayHit};
use crate::shape::{Triangle, TriangleSource};
use na::Unit;

/// The nearest intersection between a ray and the triangles of a BVH.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BvhHit {
    /// The id of the triangle hit.
    pub triangle_id: u32,
    /// The hit point, `ray.point_at(t)`.
    pub point: Point<Real>,
    /// The ray parameter of the hit point.
    pub t: Real,
    /// Barycentric coordinate of the hit point relative to the triangle's second vertex.
    pub u: Real,
    /// Barycentric coordinate of the hit point relative to the triangle's third vertex.
    pub v: Real,
    /// `true` if the front face of the triangle was hit.
    pub front_face: bool,
    /// The unit normal of the triangle hit, given by its counter-clockwise winding.
    ///
    /// `None` for triangles too thin to have a well-defined normal.
    pub normal: Option<Unit<Vector<Real>>>,
}

impl BvhHit {
    /// Builds the hit of `ray` on `triangle`, whose id is `triangle_id`.
    pub fn new(ray: &Ray, triangle_id: u32, triangle: &Triangle, hit: TriangleRayHit) -> Self {
        Self {
            triangle_id,
            point: ray.point_at(hit.t),
            t: hit.t,
            u: hit.u,
            v: hit.v,
            front_face: hit.front_face,
            normal: triangle.normal(),
        }
    }
}

/// Work done by a single ray query.
///
/// A query that misses the root box visits exactly one node and tests no triangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalCounters {
    /// The number of node bounding boxes tested against the ray.
    pub nodes_visited: u32,
    /// The number of ray/triangle tests performed.
    pub triangles_tested: u32,
}

impl Bvh {
    /// Casts a ray on this BVH using the provided triangle ray-cast function.
    ///
    /// The `primitive_check` delegates the ray-triangle test to an external function that is
    /// assumed to map a triangle id to actual geometry. The `Real` argument given to that closure
    /// is the ray parameter of the closest hit found so far (or `t1` if nothing was hit so far).
    /// The closure must only return hits with a parameter in `[t0, that argument]`.
    ///
    /// Children are visited nearest first and sub-trees starting beyond the closest hit are
    /// pruned. When several triangles are hit at the same distance, the first one tested wins.
    ///
    /// Fails with [`NotBuilt`] if the tree has no node.
    pub fn cast_ray_with(
        &self,
        ray: &Ray,
        t0: Real,
        t1: Real,
        counters: &mut TraversalCounters,
        mut primitive_check: impl FnMut(u32, Real) -> Option<TriangleRayHit>,
    ) -> Result<Option<(u32, TriangleRayHit)>, NotBuilt> {
        let inv_ray = InvRay::new(ray);
        let root = self.nodes.first().ok_or(NotBuilt)?;

        counters.nodes_visited += 1;
        let Some((root_entry, _)) = root.aabb().clip_ray(&inv_ray, t0, t1) else {
            return Ok(None);
        };

        let mut best: Option<(u32, TriangleRayHit)> = None;
        let mut best_t = t1;
        let mut stack = Self::traversal_stack();
        stack.push((0u32, root_entry));

        while let Some((node_id, entry)) = stack.pop() {
            if entry > best_t {
                continue;
            }

            match self.nodes[node_id as usize] {
                BvhNode::Leaf { first, count, .. } => {
                    let range = first as usize..first as usize + count as usize;

                    for id in &self.triangle_indices[range] {
                        counters.triangles_tested += 1;

                        if let Some(hit) = primitive_check(*id, best_t) {
                            if best.is_none() || hit.t < best_t {
                                best_t = hit.t;
                                best = Some((*id, hit));
                            }
                        }
                    }
                }
                BvhNode::Inner { left, right, .. } => {
                    counters.nodes_visited += 2;
                    let left_hit = self.nodes[left as usize]
                        .aabb()
                        .clip_ray(&inv_ray, t0, best_t);
                    let right_hit = self.nodes[right as usize]
                        .aabb()
                        .clip_ray(&inv_ray, t0, best_t);

                    // The nearest child is pushed last so it is popped first.
                    match (left_hit, right_hit) {
                        (Some((left_entry, _)), Some((right_entry, _))) => {
                            if right_entry < left_entry {
                                stack.push((left, left_entry));
                                stack.push((right, right_entry));
                            } else {
                                stack.push((right, right_entry));
                                stack.push((left, left_entry));
                            }
                        }
                        (Some((left_entry, _)), None) => stack.push((left, left_entry)),
                        (None, Some((right_entry, _))) => stack.push((right, right_entry)),
                        (None, None) => {}
                    }
                }
            }
        }

        Ok(best)
    }

    /// Computes the nearest intersection between a ray and the triangles of `geometry`.
    ///
    /// `geometry` must be the triangle source this tree was built from. Only hits with a
    /// parameter in `[t0, t1]` are reported, and triangles are filtered by `culling`.
    ///
    /// Returns `Ok(None)` if nothing is hit, and fails with [`NotBuilt`] if the tree is unbuilt.
    pub fn cast_ray<S: TriangleSource + ?Sized>(
        &self,
        geometry: &S,
        ray: &Ray,
        t0: Real,
        t1: Real,
        culling: TriangleCulling,
        counters: &mut TraversalCounters,
    ) -> Result<Option<BvhHit>, NotBuilt> {
        let hit = self.cast_ray_with(ray, t0, t1, counters, |id, best_t| {
            geometry.triangle(id).cast_ray(ray, t0, best_t, culling)
        })?;

        Ok(hit.map(|(id, hit)| BvhHit::new(ray, id, &geometry.triangle(id), hit)))
    }

    /// Iterates through the leaves with a bounding box intersected by the ray in `[t0, t1]`.
    ///
    /// Yields arena indices; use [`Bvh::leaf_triangles`] to get their triangle ids.
    pub fn leaves_intersecting_ray<'a>(
        &'a self,
        ray: &Ray,
        t0: Real,
        t1: Real,
    ) -> impl Iterator<Item = u32> + 'a {
        let inv_ray = InvRay::new(ray);
        self.leaves(move |node: &BvhNode| node.aabb().intersects_ray(&inv_ray, t0, t1))
    }
}

/// Tests the ray against every triangle of `geometry`, without any acceleration structure.
///
/// This gives the same result as [`Bvh::cast_ray`] (up to which of several triangles hit at the
/// same distance is reported) and is meant to check it.
pub fn cast_ray_brute_force<S: TriangleSource + ?Sized>(
    geometry: &S,
    ray: &Ray,
    t0: Real,
    t1: Real,
    culling: TriangleCulling,
) -> Option<BvhHit> {
    let mut best: Option<BvhHit> = None;
    let mut best_t = t1;

    for id in 0..geometry.num_triangles() as u32 {
        let triangle = geometry.triangle(id);

        if let Some(hit) = triangle.cast_ray(ray, t0, best_t, culling) {
            if best.is_none() || hit.t < best_t {
                best_t = hit.t;
                best = Some(BvhHit::new(ray, id, &triangle, hit));
            }
        }
    }

    best
}
