use super::mesh_generators::cube;
use approx::assert_relative_eq;
use meshbvh3d::math::{Point, Real, Vector};
use meshbvh3d::partitioning::MeshBvh;
use meshbvh3d::query::{Ray, TriangleCulling};

#[test]
fn culling_selects_the_entry_or_exit_face() {
    let vertices = cube();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 12, 2).unwrap();

    let ray = Ray::new(Point::new(-5.0, 0.3, 0.2), Vector::x());

    let hit = bvh
        .intersect_with_culling(&ray, 0.0, Real::MAX, TriangleCulling::None)
        .unwrap();
    assert_relative_eq!(hit.t, 4.0);
    assert!(hit.front_face);

    let hit = bvh
        .intersect_with_culling(&ray, 0.0, Real::MAX, TriangleCulling::Back)
        .unwrap();
    assert_relative_eq!(hit.t, 4.0);
    assert!(hit.front_face);

    let hit = bvh
        .intersect_with_culling(&ray, 0.0, Real::MAX, TriangleCulling::Front)
        .unwrap();
    assert_relative_eq!(hit.t, 6.0);
    assert!(!hit.front_face);
    assert_relative_eq!(hit.normal.unwrap().into_inner(), Vector::x());
}

#[test]
fn from_inside_only_back_faces_are_visible() {
    let vertices = cube();
    let mut bvh = MeshBvh::new();
    bvh.build(&vertices[..], 12, 2).unwrap();

    let ray = Ray::new(Point::new(0.1, 0.3, 0.2), Vector::x());

    assert!(bvh
        .intersect_with_culling(&ray, 0.0, Real::MAX, TriangleCulling::Back)
        .is_none());

    let hit = bvh.intersect(&ray, 0.0, Real::MAX).unwrap();
    assert_relative_eq!(hit.t, 0.9);
    assert!(!hit.front_face);
}
