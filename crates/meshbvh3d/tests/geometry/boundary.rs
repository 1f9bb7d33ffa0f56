use super::mesh_generators::plane;
use approx::assert_relative_eq;
use meshbvh3d::math::{Point, Real, Vector};
use meshbvh3d::partitioning::MeshBvh;
use meshbvh3d::query::{Ray, TriangleCulling};

// With one triangle per leaf, the first split of the plane is `x = 0`, and the vertices on that
// line are shared by triangles on both sides of it.
fn split_plane() -> Vec<Point<Real>> {
    plane(2)
}

#[test]
fn rays_through_the_split_plane_hit() {
    let vertices = split_plane();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 8, 1).unwrap();
    bvh.bvh().assert_well_formed();

    for y in [-1.0, -0.5, 0.0, 0.25, 1.0] {
        let ray = Ray::new(Point::new(0.0, y, 5.0), -Vector::z());
        let hit = bvh
            .intersect(&ray, 0.0, Real::MAX)
            .unwrap_or_else(|| panic!("The ray {:?} missed the split line.", ray));
        let slow = bvh
            .intersect_brute_force(&ray, 0.0, Real::MAX, TriangleCulling::None)
            .unwrap();

        assert_relative_eq!(hit.t, 5.0);
        assert_relative_eq!(hit.t, slow.t);
    }
}

#[test]
fn grazing_ray_hits_a_shared_edge() {
    let vertices = split_plane();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 8, 1).unwrap();

    // Travels inside the plane `x = 0` and reaches the mesh on the split line.
    let ray = Ray::new(Point::new(0.0, -2.5, 4.0), Vector::new(0.0, 0.6, -0.8));
    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();
    assert_relative_eq!(hit.t, 5.0, epsilon = 1.0e-5);
    assert_relative_eq!(hit.point, Point::new(0.0, 0.5, 0.0), epsilon = 1.0e-5);

    // Same thing on a corner of the mesh.
    let ray = Ray::new(Point::new(1.0, 1.0, 2.0), -Vector::z());
    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();
    assert_relative_eq!(hit.t, 2.0);
}

#[test]
fn ray_inside_the_plane_misses() {
    let vertices = split_plane();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 8, 1).unwrap();

    let ray = Ray::new(Point::new(-5.0, 0.1, 0.0), Vector::x());
    assert!(bvh.intersect(&ray, 0.0, Real::MAX).is_none());
}

#[test]
fn leaf_boxes_keep_a_margin() {
    let vertices = split_plane();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 8, 1).unwrap();

    for node in bvh.bvh().nodes() {
        let aabb = node.aabb();
        assert!(aabb.mins.z < 0.0 && aabb.maxs.z > 0.0);
    }
}
