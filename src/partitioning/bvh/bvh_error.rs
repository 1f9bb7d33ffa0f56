/// Errors preventing a BVH from being built.
///
/// A rejected build leaves the tree untouched: a fresh tree stays unbuilt and a previously built
/// tree keeps its old arena and geometry.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use meshbvh3d::math::Point;
/// use meshbvh3d::partitioning::{ConfigurationError, MeshBvh};
///
/// let vertices = [Point::origin(), Point::new(1.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.0)];
/// let mut bvh = MeshBvh::new();
///
/// assert_eq!(
///     bvh.build(&vertices[..], 2, 16),
///     Err(ConfigurationError::VertexCountMismatch { triangle_count: 2, vertex_count: 3 })
/// );
/// assert!(!bvh.is_built());
/// # }
/// ```
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigurationError {
    /// The geometry doesn't contain any triangle.
    #[error("cannot build a BVH over zero triangles")]
    EmptyGeometry,
    /// The length of a flat vertex array isn't three times the announced triangle count.
    #[error("expected three vertices per triangle for {triangle_count} triangles, found {vertex_count} vertices")]
    VertexCountMismatch {
        /// The announced number of triangles.
        triangle_count: usize,
        /// The number of vertices actually provided.
        vertex_count: usize,
    },
    /// The leaf size hint is zero.
    #[error("the leaf size hint must be at least 1")]
    InvalidLeafSize,
    /// The bounding box margin is negative or NaN.
    #[error("the bounding box margin must be a non-negative number")]
    InvalidMargin,
    /// The triangle ids or the node indices of the tree would not fit in 32 bits.
    #[error("{0} triangles is too many for a single BVH")]
    TooManyTriangles(usize),
    /// A triangle of an indexed mesh references a vertex that doesn't exist.
    #[error("the triangle {triangle} references the vertex {index} but there are only {vertex_count} vertices")]
    InvalidVertexIndex {
        /// The faulty triangle.
        triangle: usize,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        vertex_count: usize,
    },
}
