use crate::math::{Point, Real};
use crate::shape::Triangle;

/// Read-only access to the vertex positions of a set of triangles.
///
/// This is how a BVH reaches the geometry it indexes: the positions stay owned by the caller,
/// the tree only stores triangle ids in `0..self.num_triangles()` and fetches the three vertices
/// of a triangle when it needs them.
///
/// Every triangle has its own three vertices (the geometry is "unwelded"). Indexed meshes
/// sharing vertices between triangles must first be expanded, e.g., with
/// [`TriangleSoup::from_indexed`](crate::shape::TriangleSoup::from_indexed).
///
/// Vertex positions are not sanitized: NaN or infinite coordinates are the caller's
/// responsibility and give unspecified (but memory-safe) query results.
pub trait TriangleSource {
    /// The number of triangles in this source.
    fn num_triangles(&self) -> usize;

    /// The number of vertices in this source.
    ///
    /// This is three times the number of triangles, except for flat vertex arrays whose length
    /// isn't a multiple of three.
    fn num_vertices(&self) -> usize {
        self.num_triangles() * 3
    }

    /// The triangle with the given id.
    ///
    /// # Panics
    /// Panics if `id >= self.num_triangles()`.
    fn triangle(&self, id: u32) -> Triangle;
}

/// A flat list of vertices, three consecutive vertices per triangle.
impl TriangleSource for [Point<Real>] {
    #[inline]
    fn num_triangles(&self) -> usize {
        self.len() / 3
    }

    #[inline]
    fn num_vertices(&self) -> usize {
        self.len()
    }

    #[inline]
    fn triangle(&self, id: u32) -> Triangle {
        let i = id as usize * 3;
        Triangle::new(self[i], self[i + 1], self[i + 2])
    }
}

impl TriangleSource for [[Point<Real>; 3]] {
    #[inline]
    fn num_triangles(&self) -> usize {
        self.len()
    }

    #[inline]
    fn triangle(&self, id: u32) -> Triangle {
        Triangle::from(self[id as usize])
    }
}

impl TriangleSource for [Triangle] {
    #[inline]
    fn num_triangles(&self) -> usize {
        self.len()
    }

    #[inline]
    fn triangle(&self, id: u32) -> Triangle {
        self[id as usize]
    }
}

impl<T> TriangleSource for Vec<T>
where
    [T]: TriangleSource,
{
    #[inline]
    fn num_triangles(&self) -> usize {
        self.as_slice().num_triangles()
    }

    #[inline]
    fn num_vertices(&self) -> usize {
        self.as_slice().num_vertices()
    }

    #[inline]
    fn triangle(&self, id: u32) -> Triangle {
        self.as_slice().triangle(id)
    }
}
