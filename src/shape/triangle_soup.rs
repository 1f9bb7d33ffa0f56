use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::partitioning::ConfigurationError;
use crate::shape::{Triangle, TriangleSource};

/// An owned set of unwelded triangles: every triangle stores its own three vertices.
///
/// This is the geometry layout expected by the BVH. Meshes using an index buffer to share
/// vertices between triangles can be converted with [`TriangleSoup::from_indexed`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleSoup {
    vertices: Vec<Point<Real>>,
}

impl TriangleSoup {
    /// Creates a triangle soup from a flat vertex list, three consecutive vertices per triangle.
    ///
    /// Fails with [`ConfigurationError::VertexCountMismatch`] if the number of vertices isn't a
    /// multiple of three.
    pub fn new(vertices: Vec<Point<Real>>) -> Result<Self, ConfigurationError> {
        if vertices.len() % 3 != 0 {
            return Err(ConfigurationError::VertexCountMismatch {
                triangle_count: vertices.len() / 3,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self { vertices })
    }

    /// Creates a triangle soup by expanding an indexed mesh.
    ///
    /// The `i`-th triangle of the result has the vertices `vertices[indices[i][0]]`,
    /// `vertices[indices[i][1]]` and `vertices[indices[i][2]]`.
    ///
    /// Fails with [`ConfigurationError::InvalidVertexIndex`] if an index is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "f32")] {
    /// use meshbvh3d::math::Point;
    /// use meshbvh3d::shape::{TriangleSoup, TriangleSource};
    ///
    /// let vertices = [
    ///     Point::new(0.0, 0.0, 0.0),
    ///     Point::new(1.0, 0.0, 0.0),
    ///     Point::new(1.0, 1.0, 0.0),
    ///     Point::new(0.0, 1.0, 0.0),
    /// ];
    /// let soup = TriangleSoup::from_indexed(&vertices, &[[0, 1, 2], [0, 2, 3]]).unwrap();
    ///
    /// assert_eq!(soup.num_triangles(), 2);
    /// assert_eq!(soup.triangle(1).c, vertices[3]);
    /// assert!(TriangleSoup::from_indexed(&vertices, &[[0, 1, 4]]).is_err());
    /// # }
    /// ```
    pub fn from_indexed(
        vertices: &[Point<Real>],
        indices: &[[u32; 3]],
    ) -> Result<Self, ConfigurationError> {
        let mut result = Vec::with_capacity(indices.len() * 3);

        for (triangle, idx) in indices.iter().enumerate() {
            for index in idx {
                let pt = vertices.get(*index as usize).ok_or(
                    ConfigurationError::InvalidVertexIndex {
                        triangle,
                        index: *index,
                        vertex_count: vertices.len(),
                    },
                )?;
                result.push(*pt);
            }
        }

        Ok(Self { vertices: result })
    }

    /// Creates a triangle soup from a list of triangles.
    pub fn from_triangles<I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = Triangle>,
    {
        let vertices = triangles.into_iter().flat_map(|t| t.vertices()).collect();
        Self { vertices }
    }

    /// The flat vertex list of this soup, three consecutive vertices per triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// An iterator through all the triangles of this soup.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|pts| Triangle::new(pts[0], pts[1], pts[2]))
    }

    /// Adds a triangle at the end of this soup.
    pub fn push(&mut self, triangle: Triangle) {
        self.vertices.extend_from_slice(&triangle.vertices());
    }

    /// Does this soup contain no triangle?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The tight bounding box of all the vertices of this soup.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().copied())
    }
}

impl TriangleSource for TriangleSoup {
    #[inline]
    fn num_triangles(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    fn triangle(&self, id: u32) -> Triangle {
        self.vertices[..].triangle(id)
    }
}

impl FromIterator<Triangle> for TriangleSoup {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self::from_triangles(iter)
    }
}
