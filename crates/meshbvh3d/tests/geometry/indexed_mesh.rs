use super::mesh_generators::indexed_cube;
use approx::assert_relative_eq;
use meshbvh3d::math::{Point, Real, Vector};
use meshbvh3d::partitioning::{BvhBuildParams, ConfigurationError, MeshBvh};
use meshbvh3d::query::Ray;
use meshbvh3d::shape::{Triangle, TriangleSoup, TriangleSource};

#[test]
fn indexed_cube_is_queried_like_the_flat_one() {
    let (corners, indices) = indexed_cube();
    let soup = TriangleSoup::from_indexed(&corners, &indices).unwrap();
    assert_eq!(soup.num_triangles(), 12);

    let mut bvh = MeshBvh::new();
    bvh.build(&soup, 12, 2).unwrap();

    let ray = Ray::new(Point::new(0.4, 5.0, -0.3), -Vector::y());
    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();
    assert_relative_eq!(hit.t, 4.0);
    assert_eq!(hit.triangle_id / 2, 3, "The +y face should be hit.");
}

#[test]
fn out_of_range_index_is_rejected() {
    let (corners, mut indices) = indexed_cube();
    indices[5][1] = 8;

    assert_eq!(
        TriangleSoup::from_indexed(&corners, &indices),
        Err(ConfigurationError::InvalidVertexIndex {
            triangle: 5,
            index: 8,
            vertex_count: 8,
        })
    );
}

#[test]
fn triangle_list_geometry() {
    let triangles: Vec<Triangle> = (0..8)
        .map(|i| {
            let x = i as Real * 2.0;
            Triangle::new(
                Point::new(x, 0.0, 0.0),
                Point::new(x + 1.0, 0.0, 0.0),
                Point::new(x, 1.0, 0.0),
            )
        })
        .collect();

    let mut bvh = MeshBvh::new();
    bvh.build_with_params(&triangles[..], &BvhBuildParams::new(1))
        .unwrap();
    assert_eq!(bvh.get_statistics().leaf_count, 8);

    let ray = Ray::new(Point::new(6.25, 0.25, 1.0), -Vector::z());
    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();
    assert_eq!(hit.triangle_id, 3);
    assert_relative_eq!(hit.u, 0.25, epsilon = 1.0e-5);
    assert_relative_eq!(hit.v, 0.25, epsilon = 1.0e-5);
}
