use crate::math::{Point, Real};
use crate::partitioning::{
    cast_ray_brute_force, Bvh, BvhBuildParams, BvhHit, BvhStatistics, ConfigurationError,
    TraversalCounters,
};
use crate::query::{NotBuilt, Ray, TriangleCulling};
use crate::shape::TriangleSource;

/// A BVH bound to the triangles it was built from.
///
/// The geometry is borrowed for as long as the tree is built, so it can neither be dropped nor
/// mutated behind the tree's back. Changing the triangles requires a rebuild.
///
/// By default the geometry is a flat vertex slice with three consecutive vertices per
/// triangle, but any [`TriangleSource`] works.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use meshbvh3d::math::{Point, Vector};
/// use meshbvh3d::partitioning::MeshBvh;
/// use meshbvh3d::query::{Ray, TriangleCulling};
///
/// // A single triangle facing +z.
/// let vertices = [Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.0)];
///
/// let mut bvh = MeshBvh::new();
/// bvh.build(&vertices[..], 1, 16).unwrap();
///
/// let from_below = Ray::new(Point::new(0.2, 0.2, -1.0), Vector::z());
/// assert!(bvh.intersect(&from_below, 0.0, 10.0).is_some());
/// assert!(bvh.intersect_with_culling(&from_below, 0.0, 10.0, TriangleCulling::Back).is_none());
///
/// bvh.destroy();
/// assert!(!bvh.is_built());
/// # }
/// ```
pub struct MeshBvh<'a, S: TriangleSource + ?Sized = [Point<Real>]> {
    geometry: Option<&'a S>,
    bvh: Bvh,
}

impl<S: TriangleSource + ?Sized> Default for MeshBvh<'_, S> {
    fn default() -> Self {
        Self {
            geometry: None,
            bvh: Bvh::new(),
        }
    }
}

impl<S: TriangleSource + ?Sized> Clone for MeshBvh<'_, S> {
    fn clone(&self) -> Self {
        Self {
            geometry: self.geometry,
            bvh: self.bvh.clone(),
        }
    }
}

impl<S: TriangleSource + ?Sized> core::fmt::Debug for MeshBvh<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MeshBvh")
            .field("built", &self.is_built())
            .field("bvh", &self.bvh)
            .finish()
    }
}

impl<'a, S: TriangleSource + ?Sized> MeshBvh<'a, S> {
    /// An unbuilt tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the tree over the `triangle_count` triangles of `vertices`.
    ///
    /// `vertices` must provide exactly three vertices per triangle. Nodes with at most
    /// `leaf_size_hint` triangles become leaves.
    ///
    /// On failure the error is logged and the tree is left as it was: still unbuilt, or still
    /// built over its previous geometry.
    pub fn build(
        &mut self,
        vertices: &'a S,
        triangle_count: usize,
        leaf_size_hint: usize,
    ) -> Result<(), ConfigurationError> {
        let result = Self::check_vertex_count(vertices, triangle_count, leaf_size_hint)
            .and_then(|_| {
                Bvh::from_triangles(vertices, &BvhBuildParams::new(leaf_size_hint))
            });
        self.install(vertices, result)
    }

    /// Builds the tree over all the triangles of `geometry`, with custom parameters.
    ///
    /// Flat vertex arrays must hold whole triangles: trailing vertices are reported as a
    /// [`ConfigurationError::VertexCountMismatch`]. On failure the error is logged and the tree is
    /// left as it was.
    pub fn build_with_params(
        &mut self,
        geometry: &'a S,
        params: &BvhBuildParams,
    ) -> Result<(), ConfigurationError> {
        let result = Bvh::from_triangles(geometry, params);
        self.install(geometry, result)
    }

    fn check_vertex_count(
        vertices: &S,
        triangle_count: usize,
        leaf_size_hint: usize,
    ) -> Result<(), ConfigurationError> {
        if triangle_count == 0 {
            return Err(ConfigurationError::EmptyGeometry);
        }

        if leaf_size_hint == 0 {
            return Err(ConfigurationError::InvalidLeafSize);
        }

        let expected = triangle_count
            .checked_mul(3)
            .ok_or(ConfigurationError::TooManyTriangles(triangle_count))?;

        if vertices.num_vertices() != expected {
            return Err(ConfigurationError::VertexCountMismatch {
                triangle_count,
                vertex_count: vertices.num_vertices(),
            });
        }

        Ok(())
    }

    fn install(
        &mut self,
        geometry: &'a S,
        result: Result<Bvh, ConfigurationError>,
    ) -> Result<(), ConfigurationError> {
        match result {
            Ok(bvh) => {
                log::debug!("{}", bvh.statistics());
                self.geometry = Some(geometry);
                self.bvh = bvh;
                Ok(())
            }
            Err(err) => {
                log::error!("BVH build rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Frees the tree and releases the geometry. The tree can be built again afterwards.
    pub fn destroy(&mut self) {
        self.geometry = None;
        self.bvh.clear();
    }

    /// Has this tree been built (and not destroyed since)?
    #[inline]
    pub fn is_built(&self) -> bool {
        self.geometry.is_some()
    }

    /// The geometry this tree was built from.
    #[inline]
    pub fn geometry(&self) -> Option<&'a S> {
        self.geometry
    }

    /// The underlying tree.
    #[inline]
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// The statistics of the last successful build. All zeros if the tree is unbuilt.
    #[inline]
    pub fn get_statistics(&self) -> &BvhStatistics {
        self.bvh.statistics()
    }

    /// Computes the nearest intersection between the ray and the triangles, with a parameter in
    /// `[t0, t1]`. Both faces of the triangles can be hit.
    ///
    /// # Panics
    /// Panics if the tree isn't built. See [`MeshBvh::try_intersect`] for a non-panicking version.
    pub fn intersect(&self, ray: &Ray, t0: Real, t1: Real) -> Option<BvhHit> {
        self.intersect_with_culling(ray, t0, t1, TriangleCulling::None)
    }

    /// Computes the nearest intersection between the ray and the triangles, with a parameter in
    /// `[t0, t1]`, or fails if the tree isn't built.
    pub fn try_intersect(&self, ray: &Ray, t0: Real, t1: Real) -> Result<Option<BvhHit>, NotBuilt> {
        self.try_intersect_and_count(
            ray,
            t0,
            t1,
            TriangleCulling::None,
            &mut TraversalCounters::default(),
        )
    }

    /// Computes the nearest intersection between the ray and the triangles not discarded by
    /// `culling`.
    ///
    /// # Panics
    /// Panics if the tree isn't built.
    pub fn intersect_with_culling(
        &self,
        ray: &Ray,
        t0: Real,
        t1: Real,
        culling: TriangleCulling,
    ) -> Option<BvhHit> {
        match self.try_intersect_and_count(
            ray,
            t0,
            t1,
            culling,
            &mut TraversalCounters::default(),
        ) {
            Ok(hit) => hit,
            Err(err) => panic!("{}", err),
        }
    }

    /// Computes the nearest intersection, and adds the work done by the traversal to `counters`.
    ///
    /// # Panics
    /// Panics if the tree isn't built.
    pub fn intersect_and_count(
        &self,
        ray: &Ray,
        t0: Real,
        t1: Real,
        counters: &mut TraversalCounters,
    ) -> Option<BvhHit> {
        match self.try_intersect_and_count(ray, t0, t1, TriangleCulling::None, counters) {
            Ok(hit) => hit,
            Err(err) => panic!("{}", err),
        }
    }

    fn try_intersect_and_count(
        &self,
        ray: &Ray,
        t0: Real,
        t1: Real,
        culling: TriangleCulling,
        counters: &mut TraversalCounters,
    ) -> Result<Option<BvhHit>, NotBuilt> {
        let geometry = self.geometry.ok_or(NotBuilt)?;
        self.bvh.cast_ray(geometry, ray, t0, t1, culling, counters)
    }

    /// Computes the nearest intersection by testing every triangle, without using the tree.
    ///
    /// # Panics
    /// Panics if the tree isn't built.
    pub fn intersect_brute_force(
        &self,
        ray: &Ray,
        t0: Real,
        t1: Real,
        culling: TriangleCulling,
    ) -> Option<BvhHit> {
        match self.geometry {
            Some(geometry) => cast_ray_brute_force(geometry, ray, t0, t1, culling),
            None => panic!("{}", NotBuilt),
        }
    }

    /// Iterates through the leaves with a bounding box intersected by the ray in `[t0, t1]`.
    ///
    /// Yields arena indices of leaf nodes, see [`Bvh::leaf_triangles`]. Yields nothing if the
    /// tree isn't built.
    pub fn leaves_intersecting_ray(
        &self,
        ray: &Ray,
        t0: Real,
        t1: Real,
    ) -> impl Iterator<Item = u32> + '_ {
        self.bvh.leaves_intersecting_ray(ray, t0, t1)
    }

    /// The ids of the triangles of the given leaf.
    pub fn leaf_triangles(&self, node_id: u32) -> &[u32] {
        self.bvh.leaf_triangles(node_id)
    }
}

#[cfg(feature = "parallel")]
impl<S: TriangleSource + Sync + ?Sized> MeshBvh<'_, S> {
    /// Computes the nearest intersection of every ray, in parallel.
    ///
    /// The `i`-th element of the result is the hit of `rays[i]`.
    ///
    /// # Panics
    /// Panics if the tree isn't built.
    pub fn par_intersect(&self, rays: &[Ray], t0: Real, t1: Real) -> Vec<Option<BvhHit>> {
        use rayon::prelude::*;

        rays.par_iter()
            .map(|ray| self.intersect(ray, t0, t1))
            .collect()
    }
}
